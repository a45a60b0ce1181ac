//
//  bitly-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod completion;
mod config;
mod link;
mod update;

pub use api::ApiCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use link::{LinkArgs, LinkCommandError};
pub use update::UpdateCommand;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{BitlyClient, LinkError};
use crate::auth::TokenResolver;
use crate::config::Config;
use crate::exit_codes;

/// Bitly CLI - Shorten and expand links from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bitly",
    version,
    about = "Shorten and expand links with Bitly",
    long_about = "bitly shortens long URLs and expands bitlinks using the Bitly v4 API.\n\n\
                  Each argument containing a known short domain (bit.ly by default) is expanded;\n\
                  every other argument is shortened.",
    propagate_version = true,
    after_help = "The access token is read from --token, then BITLY_ACCESS_TOKEN, then ~/.bitly."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub links: LinkArgs,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Bitly access token (overrides BITLY_ACCESS_TOKEN and ~/.bitly)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Bitly API base URL
    #[arg(long, global = true, env = "BITLY_API_URL", hide = true)]
    pub api_url: Option<String>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update an existing bitlink
    Update(UpdateCommand),

    /// Make raw API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Builds a client from the configuration file and global options.
///
/// Command-line options win over the configuration file. The client is
/// returned even when no token is found.
pub(crate) fn build_client(global: &GlobalOptions, config: &Config) -> Result<BitlyClient> {
    let mut options = config.client_options();
    if let Some(secs) = global.timeout {
        options.timeout = Duration::from_secs(secs);
    }
    if let Some(url) = &global.api_url {
        options.base_url = url.clone();
    }

    let resolver = TokenResolver::standard(global.token.clone());
    Ok(BitlyClient::from_resolver(&resolver, options)?)
}

/// Maps an error returned by a command to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(LinkError::Auth) = err.downcast_ref::<LinkError>() {
        return exit_codes::AUTH_ERROR;
    }
    if let Some(LinkCommandError::NoArguments) = err.downcast_ref::<LinkCommandError>() {
        return exit_codes::USAGE;
    }
    exit_codes::ERROR
}

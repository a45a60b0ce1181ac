//
//  bitly-cli
//  cli/link.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shorten and expand links given as arguments
//!
//! ## Examples
//!
//! ```bash
//! # Shorten a long URL
//! bitly https://example.com/some/long/path
//! # https://example.com/some/long/path --> https://bit.ly/3xYz
//!
//! # Expand a bitlink
//! bitly https://bit.ly/3xYz
//! # https://bit.ly/3xYz <-- https://example.com/some/long/path
//!
//! # Create a titled, tagged bitlink
//! bitly --title "Launch page" --tag launch https://example.com/launch
//!
//! # Full JSON responses, one object per line
//! bitly --json https://example.com bit.ly/3xYz
//! ```

use anyhow::Result;
use clap::Args;
use console::style;
use thiserror::Error;

use crate::api::bitlink::is_bitlink;
use crate::api::{BitlyClient, CreateRequest, LinkError, ShortenRequest};
use crate::config::Config;

use super::{build_client, GlobalOptions};

/// Failures of the link command itself, as opposed to a single link.
#[derive(Error, Debug)]
pub enum LinkCommandError {
    /// No URLs were given.
    #[error("Try specifying one or more URLs as arguments.")]
    NoArguments,

    /// Some of the given links failed; each failure was already reported.
    #[error("{failed} of {total} link(s) could not be processed")]
    Failed {
        /// Number of failed links.
        failed: usize,
        /// Number of links given.
        total: usize,
    },
}

/// Links to shorten or expand
#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    /// Long URLs to shorten or bitlinks to expand
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Group GUID to create bitlinks in
    #[arg(long)]
    pub group: Option<String>,

    /// Short domain to create bitlinks on
    #[arg(long)]
    pub domain: Option<String>,

    /// Title for new bitlinks
    #[arg(long)]
    pub title: Option<String>,

    /// Tag for new bitlinks (can be repeated)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Additional short domain whose links are expanded (can be repeated)
    #[arg(long = "short-domain", value_name = "DOMAIN")]
    pub short_domains: Vec<String>,
}

impl LinkArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        if self.urls.is_empty() {
            return Err(LinkCommandError::NoArguments.into());
        }

        let config = Config::load()?;
        let client = build_client(global, &config)?;
        if !client.has_token() {
            return Err(LinkError::Auth.into());
        }

        let mut short_domains = config.core.short_domains.clone();
        short_domains.extend(self.short_domains.iter().cloned());

        let mut failed = 0;
        for input in &self.urls {
            match self.process(&client, input, &short_domains, global.json).await {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    failed += 1;
                    eprintln!("{} {}: {}", style("✗").red(), input, e);
                }
            }
        }

        if failed > 0 {
            return Err(LinkCommandError::Failed {
                failed,
                total: self.urls.len(),
            }
            .into());
        }

        Ok(())
    }

    /// Shortens or expands one input and returns the line to print.
    async fn process(
        &self,
        client: &BitlyClient,
        input: &str,
        short_domains: &[String],
        json: bool,
    ) -> Result<String> {
        if is_bitlink(input, short_domains) {
            let expanded = client.expand_link(input).await?;
            if json {
                return Ok(serde_json::to_string(&expanded)?);
            }
            Ok(format!("{} <-- {}", input, expanded.long_url))
        } else {
            let shortened = if self.title.is_some() || !self.tags.is_empty() {
                client.create_link(&self.create_request(input)).await?
            } else {
                let mut request = ShortenRequest::new(input);
                request.group_guid = self.group.clone();
                request.domain = self.domain.clone();
                client.shorten_link(&request).await?
            };

            if json {
                return Ok(serde_json::to_string(&shortened)?);
            }
            Ok(format!("{} --> {}", input, shortened.link))
        }
    }

    fn create_request(&self, long_url: &str) -> CreateRequest {
        CreateRequest {
            long_url: long_url.to_string(),
            domain: self.domain.clone(),
            title: self.title.clone(),
            group_guid: self.group.clone(),
            tags: self.tags.clone(),
            deeplinks: Vec::new(),
        }
    }
}

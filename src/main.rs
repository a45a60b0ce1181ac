//
//  bitly-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitly_cli::cli::{self, Cli, Commands};
use bitly_cli::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(cli::exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BITLY_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Update(cmd)) => cmd.run(&cli.global).await,
        Some(Commands::Api(cmd)) => cmd.run(&cli.global).await,
        Some(Commands::Config(cmd)) => cmd.run(&cli.global).await,
        Some(Commands::Completion(cmd)) => cmd.run(&cli.global).await,
        Some(Commands::Version) => {
            println!("bitly version {}", bitly_cli::VERSION);
            Ok(())
        }
        None => cli.links.run(&cli.global).await,
    }
}

//
//  bitly-cli
//  cli/update.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Update an existing bitlink
//!
//! ```bash
//! bitly update bit.ly/3xYz --title "Spring launch" --tag launch --tag 2026
//! bitly update https://bit.ly/3xYz --archive
//! ```

use anyhow::Result;
use clap::Args;
use console::style;

use crate::api::{LinkError, UpdateRequest};
use crate::config::Config;

use super::{build_client, GlobalOptions};

/// Update an existing bitlink
#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Bitlink to update (e.g., bit.ly/abc)
    pub bitlink: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// Replace the tags (can be repeated)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// New destination URL
    #[arg(long)]
    pub long_url: Option<String>,

    /// Archive the bitlink
    #[arg(long, conflicts_with = "unarchive")]
    pub archive: bool,

    /// Unarchive the bitlink
    #[arg(long)]
    pub unarchive: bool,
}

impl UpdateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = build_client(global, &config)?;
        if !client.has_token() {
            return Err(LinkError::Auth.into());
        }

        let updated = client.update_link(&self.request()).await?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        } else {
            println!("{} Updated {}", style("✓").green(), updated.link);
        }

        Ok(())
    }

    fn request(&self) -> UpdateRequest {
        let mut request = UpdateRequest::new(&self.bitlink);
        request.title = self.title.clone();
        request.long_url = self.long_url.clone();
        if self.clear_tags {
            request.tags = Some(Vec::new());
        } else if !self.tags.is_empty() {
            request.tags = Some(self.tags.clone());
        }
        if self.archive {
            request.archived = Some(true);
        } else if self.unarchive {
            request.archived = Some(false);
        }
        request
    }
}

//
//  bitly-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! This command makes an authenticated request to any Bitly API endpoint,
//! similar to `gh api` for GitHub. It's useful for endpoints that have no
//! dedicated command.
//!
//! ## Examples
//!
//! ```bash
//! # Get the authenticated user
//! bitly api /user
//!
//! # Get a bitlink
//! bitly api /bitlinks/bit.ly/380ojFd
//!
//! # Update a bitlink title
//! bitly api -X PATCH /bitlinks/bit.ly/380ojFd -F title="Launch page"
//! ```

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::CallResponse;
use crate::config::Config;

use super::{build_client, GlobalOptions};

/// Make raw API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API endpoint (e.g., /user or /bitlinks/bit.ly/abc)
    pub endpoint: String,

    /// HTTP method (GET, POST, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request fields as key=value (can be specified multiple times)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Include the response status in output
    #[arg(long, short = 'i')]
    pub include: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method = parse_method(&self.method)?;
        let params = parse_fields(&self.field)?;

        let config = Config::load()?;
        let client = build_client(global, &config)?;
        let response = client.call(method, &self.endpoint, &params).await?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            self.print_response(&response)?;
        }

        if !response.is_successful() {
            if response.description.is_empty() {
                bail!("{} ({})", response.message, response.status_code);
            }
            bail!(
                "{}: {} ({})",
                response.message,
                response.description,
                response.status_code
            );
        }

        Ok(())
    }

    fn print_response(&self, response: &CallResponse) -> Result<()> {
        if self.include {
            let status = if response.message.is_empty() {
                format!("HTTP {}", response.status_code)
            } else {
                format!("HTTP {} {}", response.status_code, response.message)
            };
            if response.is_successful() {
                println!("{}", style(status).green());
            } else {
                println!("{}", style(status).red());
            }
        }

        if response.body.is_empty() {
            return Ok(());
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            Err(_) => println!("{}", response.body),
        }

        Ok(())
    }
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        "HEAD" => Ok(Method::HEAD),
        _ => bail!("Unsupported HTTP method: {}", method),
    }
}

/// Parses `key=value` fields into a JSON object.
///
/// `true`, `false`, `null`, numbers and JSON arrays/objects keep their type;
/// everything else is a string.
fn parse_fields(fields: &[String]) -> Result<Map<String, Value>> {
    let mut params = Map::new();

    for field in fields {
        let Some((key, raw)) = field.split_once('=') else {
            bail!("Invalid field format: {}. Expected key=value", field);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid field format: {}. Key must not be empty", field);
        }

        let value = match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ => {
                if let Ok(n) = raw.parse::<i64>() {
                    Value::Number(n.into())
                } else if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
                {
                    Value::Number(n)
                } else if raw.starts_with('[') || raw.starts_with('{') {
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
                } else {
                    Value::String(raw.to_string())
                }
            }
        };

        params.insert(key.to_string(), value);
    }

    Ok(params)
}

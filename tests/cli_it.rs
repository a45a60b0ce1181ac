//
//  bitly-cli
//  tests/cli_it.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const TOKEN: &str = "0123456789abcdef";

/// A `bitly` command isolated from the user's home, config and token.
fn bitly(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bitly").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("BITLY_ACCESS_TOKEN")
        .env_remove("BITLY_API_URL")
        .env_remove("BITLY_DEBUG");
    cmd
}

#[test]
fn no_arguments_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    bitly(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Try specifying one or more URLs"));
}

#[test]
fn missing_token_exits_with_auth_code() {
    let home = TempDir::new().unwrap();
    bitly(&home)
        .arg("https://example.com")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("BITLY_ACCESS_TOKEN"));
}

#[test]
fn shortens_and_expands_arguments_in_order() {
    let mut server = Server::new();
    let shorten = server
        .mock("POST", "/shorten")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_body(Matcher::Json(json!({"long_url": "https://example.com/long"})))
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/abc"}"#)
        .create();
    let expand = server
        .mock("POST", "/expand")
        .match_body(Matcher::Json(json!({"bitlink_id": "bit.ly/xyz"})))
        .with_status(200)
        .with_body(r#"{"long_url":"https://example.com/other"}"#)
        .create();

    let home = TempDir::new().unwrap();
    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["https://example.com/long", "https://bit.ly/xyz"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "https://example.com/long --> https://bit.ly/abc\n\
             https://bit.ly/xyz <-- https://example.com/other\n",
        ));

    shorten.assert();
    expand.assert();
}

#[test]
fn reads_token_from_dotfile() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/shorten")
        .match_header("authorization", "Bearer dotfile-token")
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/dot"}"#)
        .create();

    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".bitly"),
        "# bitly token\nBITLY_ACCESS_TOKEN=dotfile-token\n",
    )
    .unwrap();

    bitly(&home)
        .env("BITLY_API_URL", server.url())
        .arg("https://example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("--> https://bit.ly/dot"));

    mock.assert();
}

#[test]
fn failed_link_is_reported_and_others_still_processed() {
    let mut server = Server::new();
    server
        .mock("POST", "/expand")
        .with_status(404)
        .with_body(r#"{"message":"NOT_FOUND","description":"Unknown bitlink"}"#)
        .create();
    server
        .mock("POST", "/shorten")
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/ok"}"#)
        .create();

    let home = TempDir::new().unwrap();
    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["bit.ly/missing", "https://example.com"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("https://example.com --> https://bit.ly/ok"))
        .stderr(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    bitly(&home)
        .args(["config", "set", "domain", "go.acme.co"])
        .assert()
        .success();

    bitly(&home)
        .args(["config", "get", "domain"])
        .assert()
        .success()
        .stdout(predicate::eq("go.acme.co\n"));
}

#[test]
fn config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    bitly(&home)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .code(1);
}

#[test]
fn version_subcommand_prints_version() {
    let home = TempDir::new().unwrap();
    bitly(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn environment_token_beats_dotfile() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/shorten")
        .match_header("authorization", "Bearer env-token")
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/env"}"#)
        .create();

    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".bitly"), "BITLY_ACCESS_TOKEN=dotfile-token\n").unwrap();

    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", "env-token")
        .env("BITLY_API_URL", server.url())
        .arg("https://example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("--> https://bit.ly/env"));

    mock.assert();
}

#[test]
fn token_flag_beats_environment() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/shorten")
        .match_header("authorization", "Bearer flag-token")
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/flag"}"#)
        .create();

    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".bitly"), "dotfile-token\n").unwrap();

    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", "env-token")
        .env("BITLY_API_URL", server.url())
        .args(["--token", "flag-token", "https://example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--> https://bit.ly/flag"));

    mock.assert();
}

#[test]
fn zero_timeout_is_a_usage_error() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/shorten").expect(0).create();

    let home = TempDir::new().unwrap();
    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["--timeout", "0", "https://example.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--timeout"));

    mock.assert();
}

#[test]
fn json_output_is_one_object_per_line() {
    let mut server = Server::new();
    server
        .mock("POST", "/shorten")
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/abc","id":"bit.ly/abc"}"#)
        .create();
    server
        .mock("POST", "/expand")
        .with_status(200)
        .with_body(r#"{"long_url":"https://example.com/other"}"#)
        .create();

    let home = TempDir::new().unwrap();
    let output = bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["--json", "https://example.com/long", "bit.ly/xyz"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["link"], "https://bit.ly/abc");
    assert_eq!(lines[1]["long_url"], "https://example.com/other");
}

#[test]
fn title_and_tags_create_a_full_bitlink() {
    let mut server = Server::new();
    let shorten = server.mock("POST", "/shorten").expect(0).create();
    let create = server
        .mock("POST", "/bitlinks")
        .match_body(Matcher::Json(json!({
            "long_url": "https://example.com/launch",
            "title": "Launch",
            "tags": ["a", "b"],
        })))
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/launch"}"#)
        .create();

    let home = TempDir::new().unwrap();
    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["--title", "Launch", "--tag", "a", "--tag", "b", "https://example.com/launch"])
        .assert()
        .success()
        .stdout(predicate::eq("https://example.com/launch --> https://bit.ly/launch\n"));

    shorten.assert();
    create.assert();
}

#[test]
fn update_subcommand_patches_bitlink() {
    let mut server = Server::new();
    let mock = server
        .mock("PATCH", "/bitlinks/bit.ly/abc")
        .match_body(Matcher::Json(json!({"title": "Renamed", "archived": true})))
        .with_status(200)
        .with_body(r#"{"link":"https://bit.ly/abc"}"#)
        .create();

    let home = TempDir::new().unwrap();
    bitly(&home)
        .env("BITLY_ACCESS_TOKEN", TOKEN)
        .env("BITLY_API_URL", server.url())
        .args(["update", "https://bit.ly/abc", "--title", "Renamed", "--archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated https://bit.ly/abc"));

    mock.assert();
}

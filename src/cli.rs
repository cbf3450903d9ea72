// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described with Rust structs
// and attributes, and clap generates the parsing, --help and --version.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// The whole CLI: global options plus one subcommand
#[derive(Parser, Debug)]
#[command(
    name = "link-verifier",
    version,
    about = "Verify that purchase links point to live pages on trusted e-commerce platforms",
    long_about = "link-verifier checks product purchase links before they are published. \
                  A link must parse, belong to a trusted platform, and answer a live probe; \
                  redirects are checked hop by hop and may never leave the trusted platforms."
)]
pub struct Cli {
    /// TOML config file with timeouts and the trusted platform list
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-probe timeout in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify one or more purchase links
    ///
    /// Example: link-verifier verify https://www.amazon.in/dp/B000123
    Verify {
        /// Links to verify (positional, at least one)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Review a product submission: field checks plus link verification
    ///
    /// Example: link-verifier submit --name "Kettle" --image-url https://img/1.jpg
    ///          --purchase-link https://flipkart.com/kettle/p/1
    Submit {
        /// Product name (at most 100 characters)
        #[arg(long)]
        name: String,

        /// Optional description (at most 500 characters)
        #[arg(long)]
        description: Option<String>,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Purchase link to verify
        #[arg(long)]
        purchase_link: String,

        /// Output the accepted listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the trusted platforms in priority order
    Platforms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify_with_globals() {
        let cli = Cli::parse_from([
            "link-verifier",
            "verify",
            "https://flipkart.com/x",
            "https://www.amazon.in/dp/B1",
            "--json",
            "--timeout-ms",
            "2500",
        ]);
        assert_eq!(cli.timeout_ms, Some(2500));
        match cli.command {
            Commands::Verify { urls, json } => {
                assert_eq!(urls.len(), 2);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verify_requires_a_url() {
        assert!(Cli::try_parse_from(["link-verifier", "verify"]).is_err());
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::parse_from([
            "link-verifier",
            "--config",
            "platforms.toml",
            "submit",
            "--name",
            "Kettle",
            "--image-url",
            "https://img.example.com/1.jpg",
            "--purchase-link",
            "https://flipkart.com/kettle/p/1",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("platforms.toml")));
        assert!(matches!(cli.command, Commands::Submit { description: None, json: false, .. }));
    }
}

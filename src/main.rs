// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config and build the verifier (fail fast on misconfiguration)
// 3. Dispatch to the subcommand handler and print the results
// 4. Exit with proper code (0 = all links valid, 1 = rejection, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use link_verifier::{
    logging, review_submission, LinkVerifier, ProductSubmission, SubmissionError,
    VerificationResult, VerifierConfig,
};

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every link verified
//   Ok(1) = at least one link (or the submission) was rejected
//   Err   = configuration or output failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let verifier = build_verifier(&cli)?;

    match cli.command {
        Commands::Verify { urls, json } => handle_verify(&verifier, urls, json).await,
        Commands::Submit {
            name,
            description,
            image_url,
            purchase_link,
            json,
        } => {
            let submission = ProductSubmission {
                name,
                description,
                image_url,
                purchase_link,
            };
            handle_submit(&verifier, submission, json).await
        }
        Commands::Platforms => {
            print_platforms(&verifier);
            Ok(0)
        }
    }
}

// Config file first, then CLI overrides, then validation
fn build_verifier(cli: &Cli) -> Result<LinkVerifier> {
    let mut config = match &cli.config {
        Some(path) => VerifierConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VerifierConfig::default(),
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let verifier = LinkVerifier::from_config(&config).context("invalid verifier configuration")?;
    tracing::debug!(
        platforms = verifier.trust_list().len(),
        timeout_ms = config.timeout_ms,
        "verifier ready"
    );
    Ok(verifier)
}

async fn handle_verify(verifier: &LinkVerifier, urls: Vec<String>, json: bool) -> Result<i32> {
    let results = verifier.verify_many(urls.clone()).await;

    if json {
        let json_output = serde_json::to_string_pretty(&results)?;
        println!("{}", json_output);
    } else {
        print_table(&urls, &results);
    }

    let rejected = results.iter().filter(|r| !r.is_valid).count();
    Ok(if rejected > 0 { 1 } else { 0 })
}

async fn handle_submit(
    verifier: &LinkVerifier,
    submission: ProductSubmission,
    json: bool,
) -> Result<i32> {
    match review_submission(verifier, submission).await {
        Ok(listing) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                println!("✅ Listing accepted: {}", listing.name);
                println!("   Platform: {}", listing.platform_source);
                println!("   Link:     {}", listing.purchase_link);
            }
            Ok(0)
        }
        Err(e) => {
            print_submission_error(&e, json)?;
            Ok(1)
        }
    }
}

fn print_submission_error(error: &SubmissionError, json: bool) -> Result<()> {
    if json {
        let body = serde_json::json!({
            "message": error.to_string(),
            "error": error.reason(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("❌ {}", error);
        if let Some(reason) = error.reason() {
            println!("   {}", reason);
        }
    }
    Ok(())
}

// Prints results as a human-readable table
fn print_table(urls: &[String], results: &[VerificationResult]) {
    println!("{:<60} {:<10} {:<10} {}", "URL", "VERDICT", "SOURCE", "REASON");
    println!("{}", "=".repeat(110));

    for (url, result) in urls.iter().zip(results) {
        // Truncate on a char boundary; URLs may contain non-ASCII text
        let url_display = if url.chars().count() > 57 {
            format!("{}...", url.chars().take(57).collect::<String>())
        } else {
            url.clone()
        };
        let verdict = if result.is_valid { "✅ VALID" } else { "❌ REJECTED" };
        let source = result.source.as_deref().unwrap_or("-");
        let reason = result.error.as_deref().unwrap_or("");

        println!("{:<60} {:<10} {:<10} {}", url_display, verdict, source, reason);
    }

    println!();

    let valid_count = results.iter().filter(|r| r.is_valid).count();
    println!("📊 Summary:");
    println!("   ✅ Valid: {}", valid_count);
    println!("   ❌ Rejected: {}", results.len() - valid_count);
    println!("   📋 Total: {}", results.len());
}

fn print_platforms(verifier: &LinkVerifier) {
    println!("{:<4} {:<20} {}", "#", "PLATFORM", "PATTERN");
    for (i, rule) in verifier.trust_list().rules().iter().enumerate() {
        println!("{:<4} {:<20} {}", i + 1, rule.name, rule.pattern.as_str());
    }
}

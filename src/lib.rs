// src/lib.rs
// =============================================================================
// link-verifier: decides whether a product purchase link is safe to publish.
//
// A link passes when it:
// 1. parses as an absolute URL,
// 2. belongs to a trusted e-commerce platform, and
// 3. answers a live probe, with every redirect hop staying on a trusted
//    platform.
//
// Typical use:
//
//   let config = VerifierConfig::default();
//   let verifier = LinkVerifier::from_config(&config)?;
//   let verdict = verifier.verify("https://www.amazon.in/dp/B000123").await;
//   if verdict.is_valid { /* store it, tagged with verdict.source */ }
// =============================================================================

pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod trust;
pub mod verifier;

pub use config::VerifierConfig;
pub use error::{ConfigError, ErrorKind, VerificationError};
pub use listing::{review_submission, ProductSubmission, SubmissionError, VerifiedListing};
pub use trust::{PlatformSpec, TrustList, TrustedPlatformRule};
pub use verifier::{LinkVerifier, VerificationResult};

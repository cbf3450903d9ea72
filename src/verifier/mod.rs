// src/verifier/mod.rs
// =============================================================================
// This module contains the link verification pipeline.
//
// Submodules:
// - syntax: rejects strings that are not absolute URLs
// - probe: makes the HEAD / GET requests, never following redirects itself
// - pipeline: runs the stages in order and builds the verdict
// - result: the verdict type returned to callers
//
// Only the pipeline entry point and the verdict are re-exported; callers
// should not need to know how the stages are split up.
// =============================================================================

mod pipeline;
mod probe;
mod result;
mod syntax;

pub use pipeline::LinkVerifier;
pub use result::VerificationResult;
pub use syntax::parse_url;

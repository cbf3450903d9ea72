// src/trust/mod.rs
// =============================================================================
// This module owns the list of trusted e-commerce platforms.
//
// Submodules:
// - rules: the rule type, the ordered list, and pattern matching
//
// The list is built once at startup and then only read, so it can be shared
// between any number of concurrent verifications without locks.
// =============================================================================

mod rules;

pub use rules::{PlatformSpec, TrustList, TrustedPlatformRule, UNTRUSTED_SOURCE};

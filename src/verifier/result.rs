// src/verifier/result.rs
// =============================================================================
// The verdict handed back to callers.
//
// Serialized shape (camelCase, so existing front-ends can read it as-is):
//   { "isValid": false, "source": "Flipkart",
//     "error": "Link redirected to an untrusted domain.",
//     "kind": "untrusted_redirect" }
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, VerificationError};

/// Outcome of verifying one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// True only when every stage passed
    pub is_valid: bool,
    /// Matched platform name, "Other" for untrusted links, None for malformed input
    pub source: Option<String>,
    /// User-facing rejection reason; None on success
    pub error: Option<String>,
    /// Which stage rejected the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl VerificationResult {
    pub fn valid(source: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            source: Some(source.into()),
            error: None,
            kind: None,
        }
    }

    pub fn invalid(source: Option<String>, error: &VerificationError) -> Self {
        Self {
            is_valid: false,
            source,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }
}

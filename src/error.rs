// src/error.rs
// =============================================================================
// Error types for the whole crate.
//
// Two very different kinds of failure live here:
// - VerificationError: a link was rejected. These are normal business
//   outcomes, never propagated past the verifier. Their Display text is the
//   exact message shown to the person who submitted the link.
// - ConfigError: the trust list or settings are broken. These are fatal and
//   must surface once at startup, not per request.
//
// We use `thiserror` so each variant carries its message right next to it.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Why a link was rejected, one variant per pipeline stage that can fail.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The string is not an absolute URL with a host
    #[error("Invalid URL format.")]
    Syntax,

    /// The submitted URL matches no trusted platform
    #[error("Link must be from a trusted platform like {examples}.")]
    UntrustedDomain { examples: String },

    /// The URL was trusted but a redirect hop left the trust list
    #[error("Link redirected to an untrusted domain.")]
    UntrustedRedirect { target: String },

    /// A 3xx response came back without a usable Location header
    #[error("Link redirected without a destination (Status: {status}).")]
    MissingRedirectLocation { status: u16 },

    /// Timeout, DNS failure, refused connection, TLS failure...
    #[error("Link verification failed (Status: Network Error). Could not find a live product page or resource.")]
    Network {
        #[source]
        cause: reqwest::Error,
    },

    /// The probe answered with a status outside the accepted ranges
    #[error("Link verification failed (Status: {status}). Could not find a live product page or resource.")]
    UnexpectedStatus { status: u16 },
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::Syntax => ErrorKind::Syntax,
            VerificationError::UntrustedDomain { .. } => ErrorKind::UntrustedDomain,
            VerificationError::UntrustedRedirect { .. } => ErrorKind::UntrustedRedirect,
            VerificationError::MissingRedirectLocation { .. } => {
                ErrorKind::MissingRedirectLocation
            }
            VerificationError::Network { .. } => ErrorKind::Network,
            VerificationError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
        }
    }
}

impl From<reqwest::Error> for VerificationError {
    fn from(cause: reqwest::Error) -> Self {
        VerificationError::Network { cause }
    }
}

// Machine-readable rejection category.
//
// VerificationError holds a reqwest::Error and so can't be cloned or
// serialized; results carry this tag instead, next to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Syntax,
    UntrustedDomain,
    UntrustedRedirect,
    MissingRedirectLocation,
    Network,
    UnexpectedStatus,
}

// Startup misconfiguration. Anything here should stop the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trusted platform '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("trusted platform list is empty")]
    EmptyTrustList,

    #[error("trusted platform '{0}' is listed more than once")]
    DuplicatePlatform(String),

    #[error("trusted platform entry has a blank name")]
    BlankPlatformName,

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(VerificationError::Syntax.to_string(), "Invalid URL format.");
        assert_eq!(
            VerificationError::UntrustedDomain {
                examples: "Amazon or Flipkart".to_string()
            }
            .to_string(),
            "Link must be from a trusted platform like Amazon or Flipkart."
        );
        assert_eq!(
            VerificationError::UntrustedRedirect {
                target: "https://evil.example.com/x".to_string()
            }
            .to_string(),
            "Link redirected to an untrusted domain."
        );
        assert_eq!(
            VerificationError::UnexpectedStatus { status: 503 }.to_string(),
            "Link verification failed (Status: 503). Could not find a live product page or resource."
        );
    }

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(VerificationError::Syntax.kind(), ErrorKind::Syntax);
        assert_eq!(
            VerificationError::MissingRedirectLocation { status: 302 }.kind(),
            ErrorKind::MissingRedirectLocation
        );
        assert_eq!(
            VerificationError::UnexpectedStatus { status: 404 }.kind(),
            ErrorKind::UnexpectedStatus
        );
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::UntrustedRedirect).unwrap();
        assert_eq!(json, "\"untrusted_redirect\"");
    }
}

// src/listing.rs
// =============================================================================
// Product submissions: the one place the verifier's verdict is interpreted.
//
// A listing is only accepted when its purchase link verifies. Storing the
// accepted listing is the caller's business; this module decides what to
// store (the platform tag and the verified flag) or why to refuse.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verifier::LinkVerifier;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// A product listing as submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    pub purchase_link: String,
}

/// A listing whose purchase link passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    pub purchase_link: String,
    pub is_link_valid: bool,
    pub platform_source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please provide product name, image URL, and purchase link.")]
    MissingFields,

    #[error("Product name must be at most {} characters.", MAX_NAME_CHARS)]
    NameTooLong,

    #[error("Description must be at most {} characters.", MAX_DESCRIPTION_CHARS)]
    DescriptionTooLong,

    /// The verifier refused the purchase link; `reason` is its message
    #[error("Link verification failed.")]
    LinkRejected {
        reason: String,
        platform: Option<String>,
    },
}

impl SubmissionError {
    // The verifier's own message, when the link was the problem
    pub fn reason(&self) -> Option<&str> {
        match self {
            SubmissionError::LinkRejected { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

impl ProductSubmission {
    // Field checks that need no network. The name is trimmed before storage,
    // so it is measured trimmed too.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let name = self.name.trim();
        if name.is_empty() || self.image_url.trim().is_empty() || self.purchase_link.trim().is_empty() {
            return Err(SubmissionError::MissingFields);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(SubmissionError::NameTooLong);
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(SubmissionError::DescriptionTooLong);
            }
        }
        Ok(())
    }
}

// Validates the submission, verifies its purchase link, and builds the
// listing to store
pub async fn review_submission(
    verifier: &LinkVerifier,
    submission: ProductSubmission,
) -> Result<VerifiedListing, SubmissionError> {
    submission.validate()?;

    let verdict = verifier.verify(&submission.purchase_link).await;

    if !verdict.is_valid {
        tracing::info!(
            link = %submission.purchase_link,
            reason = verdict.error.as_deref().unwrap_or_default(),
            "listing refused"
        );
        return Err(SubmissionError::LinkRejected {
            reason: verdict.error.unwrap_or_default(),
            platform: verdict.source,
        });
    }

    // A valid verdict always names its platform
    let platform_source = verdict
        .source
        .unwrap_or_else(|| crate::trust::UNTRUSTED_SOURCE.to_string());

    Ok(VerifiedListing {
        name: submission.name.trim().to_string(),
        description: submission.description,
        image_url: submission.image_url,
        purchase_link: submission.purchase_link,
        is_link_valid: true,
        platform_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerifierConfig;
    use crate::trust::{PlatformSpec, TrustList};
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submission(link: &str) -> ProductSubmission {
        ProductSubmission {
            name: "  Noise-cancelling headphones ".to_string(),
            description: Some("Over-ear, 30h battery".to_string()),
            image_url: "https://img.example.com/p/1.jpg".to_string(),
            purchase_link: link.to_string(),
        }
    }

    fn local_verifier() -> LinkVerifier {
        let trust =
            TrustList::from_specs(&[PlatformSpec::new("Amazon", r"^http://127\.0\.0\.1:\d+/dp/.+")]).unwrap();
        LinkVerifier::new(trust, &VerifierConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_fields() {
        let mut s = submission("https://www.amazon.in/dp/B1");
        s.image_url = "   ".to_string();
        assert_eq!(s.validate(), Err(SubmissionError::MissingFields));
        assert_eq!(
            SubmissionError::MissingFields.to_string(),
            "Please provide product name, image URL, and purchase link."
        );
    }

    #[test]
    fn test_length_limits() {
        let mut s = submission("https://www.amazon.in/dp/B1");
        s.name = "x".repeat(MAX_NAME_CHARS);
        assert!(s.validate().is_ok());
        s.name = "x".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(s.validate(), Err(SubmissionError::NameTooLong));

        let mut s = submission("https://www.amazon.in/dp/B1");
        s.description = Some("d".repeat(MAX_DESCRIPTION_CHARS + 1));
        assert_eq!(s.validate(), Err(SubmissionError::DescriptionTooLong));
    }

    #[tokio::test]
    async fn test_invalid_fields_skip_verification() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut s = submission(&format!("{}/dp/B1", server.uri()));
        s.name = String::new();
        let err = review_submission(&local_verifier(), s).await.unwrap_err();
        assert_eq!(err, SubmissionError::MissingFields);
    }

    #[tokio::test]
    async fn test_verified_link_produces_listing() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/dp/B1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let link = format!("{}/dp/B1", server.uri());
        let listing = review_submission(&local_verifier(), submission(&link)).await.unwrap();

        assert_eq!(listing.name, "Noise-cancelling headphones");
        assert_eq!(listing.purchase_link, link);
        assert!(listing.is_link_valid);
        assert_eq!(listing.platform_source, "Amazon");
    }

    #[tokio::test]
    async fn test_rejected_link_carries_reason() {
        let err = review_submission(&local_verifier(), submission("https://shady-shop.example.com/item"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Link verification failed.");
        assert_eq!(
            err.reason(),
            Some("Link must be from a trusted platform like Amazon.")
        );
        assert!(matches!(err, SubmissionError::LinkRejected { platform: Some(ref p), .. } if p == "Other"));
    }
}

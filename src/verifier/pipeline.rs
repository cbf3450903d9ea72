// src/verifier/pipeline.rs
// =============================================================================
// The verification pipeline.
//
//   Start -> syntax -> trust -> HEAD probe -+-> 2xx ............... Valid
//                                           +-> 3xx -> trust(target)
//                                           |          -> GET ..... Valid
//                                           +-> anything else ..... Invalid
//
// Each stage can short-circuit with a rejection. Every path ends in exactly
// one VerificationResult; nothing is retried, and errors never escape.
//
// The verifier holds no mutable state, so one instance can serve any number
// of concurrent calls. The two probes inside a single call are sequential:
// the GET only happens if the HEAD redirected.
// =============================================================================

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use url::Url;

use super::probe::{categorize_error, ProbeResponse, Prober};
use super::result::VerificationResult;
use super::syntax::parse_url;
use crate::config::VerifierConfig;
use crate::error::{ConfigError, VerificationError};
use crate::trust::{TrustList, UNTRUSTED_SOURCE};

/// Decides whether a purchase link is well-formed, trusted, and live.
#[derive(Debug, Clone)]
pub struct LinkVerifier {
    trust: Arc<TrustList>,
    prober: Prober,
    max_redirects: usize,
    concurrency: usize,
}

impl LinkVerifier {
    /// Builds a verifier around an already-compiled trust list.
    pub fn new(trust: TrustList, config: &VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let prober = Prober::new(config.timeout(), &config.user_agent)?;

        Ok(Self {
            trust: Arc::new(trust),
            prober,
            max_redirects: config.max_redirects,
            concurrency: config.concurrency,
        })
    }

    /// Builds the trust list from the config too.
    pub fn from_config(config: &VerifierConfig) -> Result<Self, ConfigError> {
        let trust = config.trust_list()?;
        Self::new(trust, config)
    }

    pub fn trust_list(&self) -> &TrustList {
        &self.trust
    }

    /// Runs the full pipeline on one submitted URL.
    ///
    /// Never fails: every rejection is reported inside the result.
    pub async fn verify(&self, raw: &str) -> VerificationResult {
        // Stage 1: syntax. No trust lookup, no network for garbage input.
        let url = match parse_url(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = raw, "rejected: malformed URL");
                return VerificationResult::invalid(None, &e);
            }
        };

        // Stage 2: trust, checked against the string exactly as submitted
        let source = match self.trust.match_platform(raw) {
            Some(rule) => rule.name.clone(),
            None => {
                tracing::debug!(url = raw, "rejected: untrusted platform");
                let e = VerificationError::UntrustedDomain {
                    examples: self.trust.example_names(),
                };
                return VerificationResult::invalid(Some(UNTRUSTED_SOURCE.to_string()), &e);
            }
        };
        tracing::debug!(url = raw, platform = %source, "trusted platform matched");

        // Stage 3: liveness, with redirect interception
        match self.check_liveness(&url).await {
            Ok(()) => {
                tracing::info!(url = raw, platform = %source, "link verified");
                VerificationResult::valid(source)
            }
            Err(e) => {
                log_rejection(raw, &source, &e);
                VerificationResult::invalid(Some(source), &e)
            }
        }
    }

    /// Verifies many links concurrently.
    ///
    /// Results come back in the same order as the input.
    pub async fn verify_many(&self, urls: Vec<String>) -> Vec<VerificationResult> {
        let verifier = self;
        stream::iter(urls)
            .map(move |url| async move { verifier.verify(&url).await })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    // HEAD the URL; if it redirects, hand the target to confirm_redirect
    async fn check_liveness(&self, url: &Url) -> Result<(), VerificationError> {
        let head = self.prober.head(url).await?;

        if head.is_success() {
            return Ok(());
        }

        if !head.is_redirection() {
            return Err(VerificationError::UnexpectedStatus {
                status: head.status.as_u16(),
            });
        }

        let target = redirect_target(url, &head)?;
        tracing::debug!(from = %url, to = %target, status = head.status.as_u16(), "redirect intercepted");
        self.confirm_redirect(target).await
    }

    // Trust-check the redirect target, then GET it to be sure it is live
    //
    // The GET is not allowed to follow redirects either. If it redirects
    // again, each further hop goes through the same trust check, up to
    // max_redirects extra hops.
    async fn confirm_redirect(&self, mut target: Url) -> Result<(), VerificationError> {
        let mut hops = 0;

        loop {
            if !self.trust.is_trusted(target.as_str()) {
                return Err(VerificationError::UntrustedRedirect {
                    target: target.to_string(),
                });
            }

            let response = self.prober.get(&target).await?;

            if response.is_success() {
                return Ok(());
            }

            if !response.is_redirection() || hops >= self.max_redirects {
                return Err(VerificationError::UnexpectedStatus {
                    status: response.status.as_u16(),
                });
            }

            let next = redirect_target(&target, &response)?;
            tracing::debug!(from = %target, to = %next, "following redirect hop");
            target = next;
            hops += 1;
        }
    }
}

// Resolves a Location header against the URL that sent it
//
// Relative locations ("/dp/B1") are legal and common. A redirect with no
// Location, or one that can't be resolved, has no destination to check.
fn redirect_target(from: &Url, response: &ProbeResponse) -> Result<Url, VerificationError> {
    let missing = || VerificationError::MissingRedirectLocation {
        status: response.status.as_u16(),
    };

    let location = response.location.as_deref().ok_or_else(missing)?;
    from.join(location).map_err(|_| missing())
}

fn log_rejection(url: &str, platform: &str, error: &VerificationError) {
    match error {
        VerificationError::Network { cause } => {
            tracing::warn!(
                url,
                platform,
                category = categorize_error(cause),
                error = %cause,
                "probe failed"
            );
        }
        VerificationError::UntrustedRedirect { target } => {
            tracing::warn!(url, platform, target = %target, "rejected: redirect left trusted platforms");
        }
        other => {
            tracing::info!(url, platform, reason = %other, "rejected");
        }
    }
}

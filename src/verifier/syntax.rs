// src/verifier/syntax.rs
// =============================================================================
// Stage 1: is the string a URL at all?
//
// This is the cheapest check, so it runs first; nothing malformed ever
// reaches the trust list or the network.
// =============================================================================

use url::Url;

use crate::error::VerificationError;

// Parses an absolute URL that has a host
//
// Accepts:  "https://www.amazon.in/dp/B000123"
// Rejects:  "", "amazon.in/dp/1" (no scheme), "mailto:a@b.c" (no host)
pub fn parse_url(raw: &str) -> Result<Url, VerificationError> {
    let url = Url::parse(raw).map_err(|_| VerificationError::Syntax)?;

    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return Err(VerificationError::Syntax);
    }

    Ok(url)
}

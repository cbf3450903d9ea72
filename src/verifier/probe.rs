// src/verifier/probe.rs
// =============================================================================
// This module talks to the network on behalf of the pipeline.
//
// Key functionality:
// - HEAD probe: lightweight existence check, no body download
// - GET probe: full retrieval to confirm a redirect target is really live
// - Redirects are NEVER followed by the client. A 3xx comes back to the
//   pipeline as an ordinary response so the target can be trust-checked.
// - Transport failures are categorised (timeout, DNS, TLS...) for the logs
//
// Rust concepts:
// - async/await: each probe suspends until the response or the timeout
// - Clone on Client: reqwest clients share one connection pool internally
// =============================================================================

use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

// What the pipeline needs from a response: the status and where a
// redirect points (if it says)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: StatusCode,
    /// Raw Location header value, when present and valid UTF-8
    pub location: Option<String>,
}

impl ProbeResponse {
    fn from_response(response: &reqwest::Response) -> Self {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            status: response.status(),
            location,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_redirection(&self) -> bool {
        self.status.is_redirection()
    }
}

// Issues the outbound probes
//
// One Prober (and so one connection pool) is shared by every verification.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)            // bounds the whole request, body included
            .connect_timeout(timeout)
            .redirect(Policy::none())    // 3xx must reach the pipeline untouched
            .user_agent(user_agent)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client })
    }

    // HEAD request: status and headers only
    pub async fn head(&self, url: &Url) -> Result<ProbeResponse, reqwest::Error> {
        let response = self.client.head(url.as_str()).send().await?;
        Ok(ProbeResponse::from_response(&response))
    }

    // GET request: drains the body too, so a page that answers headers
    // but stalls on content still counts as a failure. Chunks are discarded
    // as they arrive; nothing from the body is kept in memory.
    pub async fn get(&self, url: &Url) -> Result<ProbeResponse, reqwest::Error> {
        let mut response = self.client.get(url.as_str()).send().await?;
        let probe = ProbeResponse::from_response(&response);
        while response.chunk().await?.is_some() {}
        Ok(probe)
    }
}

// Short label for why a request failed, used in log lines
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Connection refused / reset
pub fn categorize_error(error: &reqwest::Error) -> &'static str {
    // DNS and TLS failures only show up in the text of the inner errors.
    // The outer message embeds the URL, so it is skipped.
    let mut error_string = String::new();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        error_string.push_str(&inner.to_string().to_lowercase());
        error_string.push(' ');
        source = inner.source();
    }

    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        if error_string.contains("dns") || error_string.contains("resolve") {
            "dns"
        } else if error_string.contains("certificate") || error_string.contains("tls") {
            "tls"
        } else {
            "connect"
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "tls"
    } else if error.is_body() || error.is_decode() {
        "body"
    } else {
        "other"
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Policy::none()?
//    - By default reqwest follows up to 10 redirects on its own
//    - That would hide where a link really ends up
//    - A trusted-looking URL could bounce to any site; we must see each hop
//
// 2. Why both timeout() and connect_timeout()?
//    - timeout() covers the whole request, connect_timeout() only the TCP/TLS
//      handshake. Setting both makes a dead host fail as fast as a slow one.
//
// 3. Why drain the body in get()?
//    - send() resolves as soon as headers arrive
//    - Draining the body makes the GET a real retrieval under the same timeout
//    - chunk() hands out one piece at a time, so a huge page costs no memory
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober(timeout_ms: u64) -> Prober {
        Prober::new(Duration::from_millis(timeout_ms), "link-verifier-test").unwrap()
    }

    #[tokio::test]
    async fn test_head_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/dp/1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/dp/1", server.uri())).unwrap();
        let response = prober(2000).head(&url).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.location, None);
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/old", server.uri())).unwrap();
        let response = prober(2000).head(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
        assert!(response.is_redirection());
        assert_eq!(response.location.as_deref(), Some("/new"));
    }

    #[tokio::test]
    async fn test_get_reads_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>product</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        assert!(prober(2000).get(&url).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_get_drains_large_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 8 * 1024 * 1024]))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/big", server.uri())).unwrap();
        let response = prober(5000).get(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let err = prober(100).head(&url).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(categorize_error(&err), "timeout");
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        // Port 1 is reserved (tcpmux) and closed on any sane test machine
        let url = Url::parse("http://127.0.0.1:1/dp/1").unwrap();
        let err = prober(2000).head(&url).await.unwrap_err();
        assert_eq!(categorize_error(&err), "connect");
    }
}

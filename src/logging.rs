// src/logging.rs
// =============================================================================
// Structured logging setup.
//
// Logs go to stderr so stdout only carries verification results (table or
// JSON) and can be piped safely. The level is controlled with RUST_LOG, e.g.
//   RUST_LOG=link_verifier=debug link-verifier verify https://...
// =============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,link_verifier=info";

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init: calling this twice (e.g. from tests) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

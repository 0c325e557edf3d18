//! Diagnostic tracing to stderr.
//!
//! Filtered by `RUST_LOG`; defaults to `error` since the CLI prints its own notices.
//! The user-facing operation record is the audit log, not this output.

pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Diagnostic tracing for the CLI.
//!
//! Library code emits `tracing` events; this module installs the subscriber.
//! Output goes to stderr so stdout carries only the rendered literal.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Reads `RUST_LOG`, defaulting to `warn`.
pub fn init() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).compact())
		.init();
}

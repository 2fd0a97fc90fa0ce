// src/debug.rs
//! Dev-only logging helpers.
//!
//! Patient free text must never reach the logs. Dev events carry a short
//! SHA-256 prefix of the text instead, so repeated inputs can be correlated.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "RHINITIS_DEV_LOG";
pub const ENV_RUNTIME_ENV: &str = "RHINITIS_ENV";

fn dev_flag_set() -> bool {
    std::env::var(ENV_DEV_LOG).is_ok_and(|v| v.trim() == "1")
}

fn is_dev_env() -> bool {
    let env = std::env::var(ENV_RUNTIME_ENV).unwrap_or_default();
    cfg!(debug_assertions)
        || ["local", "development", "dev"]
            .iter()
            .any(|e| env.eq_ignore_ascii_case(e))
}

/// True when RHINITIS_DEV_LOG=1 in a dev environment (debug build, or
/// RHINITIS_ENV naming a local/dev deployment).
pub fn dev_logging_enabled() -> bool {
    dev_flag_set() && is_dev_env()
}

/// Correlation id for a piece of patient text: the first 6 bytes of its
/// SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Install a compact fmt subscriber when `force` is set or the dev gate is on.
/// Returns true if a subscriber was installed by this call.
pub fn init_dev_tracing(force: bool) -> bool {
    if !(force || dev_logging_enabled()) {
        return false;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rhinitis_advisor=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

/// Log a dev event about `text` without the text itself. `enabled` is the
/// gate the caller resolved at construction.
pub(crate) fn dev_log_text_event(enabled: bool, event: &str, text: &str, labels: &[String]) {
    if !enabled {
        return;
    }
    let id = anon_hash(text);
    let chars = text.chars().count();
    info!(target: "advisor", %id, chars, event, labels = ?labels);
}

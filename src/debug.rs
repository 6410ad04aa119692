// src/debug.rs
//! Minimal, anonymized dev logging for decision events.
//!
//! Activation requires BOTH:
//!   - dev environment (debug build OR APP_ENV in {local, development, dev})
//!   - DECISION_DEV_LOG=1
//!
//! Raw query text is never logged; only a short SHA-256 prefix.

use tracing::info;

pub const ENV_DECISION_DEV_LOG: &str = "DECISION_DEV_LOG";

pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DECISION_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("APP_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Log one merge decision. Never logs raw text.
pub(crate) fn dev_log_decision(
    event: &str,
    query: &str,
    strategy: &str,
    web_conf: f32,
    rag_conf: f32,
    notes: &[String],
) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(query);
    let notes_short = truncate_vec(notes, 5);
    info!(
        target: "decision",
        %id, strategy, web_conf, rag_conf, event,
        notes = ?notes_short
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("same input");
        let b = anon_hash("same input");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_inputs_hash_differently() {
        assert_ne!(anon_hash("query a"), anon_hash("query b"));
    }

    #[test]
    fn truncate_keeps_at_most_max() {
        let v = vec!["a", "b", "c", "d"];
        assert_eq!(truncate_vec(&v, 2), vec!["a", "b"]);
    }
}

// src/notice/trust.rs
//! # Source Trust
//!
//! Configurable mapping from notice sources (e.g. "nipa", "bizinfo") to
//! normalized trust weights in the range `[0.0, 1.0]`.
//!
//! - Loads from JSON config (weights + aliases).
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Aliases map alternative spellings/domains to canonical sources.
//! - Fallback order: aliases → exact match → substring match → default.
//! - Includes a built-in `default_seed()` with the known portals.

use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::confidence::clamp01;

/// Configuration for source trust, loaded from JSON or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TrustConfig {
    /// Default weight if no match is found.
    #[serde(default = "default_default_weight")]
    pub default_weight: f32,
    /// Explicit weights for canonical source names.
    #[serde(default)]
    pub weights: HashMap<String, f32>,
    /// Aliases mapping non-canonical names → canonical names.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

fn default_default_weight() -> f32 {
    0.5
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl TrustConfig {
    /// Load configuration from a JSON file.
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Get the trust weight for a given source name.
    ///
    /// Steps:
    /// 1. Alias lookup (normalized) → canonical → weight.
    /// 2. Exact weight match.
    /// 3. Substring fallback (e.g. "nipa.kr" → "nipa").
    /// 4. Default weight.
    pub fn trust_for(&self, source: &str) -> f32 {
        let s = normalize(source);

        // 1) Alias resolution.
        if let Some(canon) = self.aliases.get(&s) {
            let c = normalize(canon);
            if let Some(&w) = self.weights.get(&c) {
                return clamp01(w);
            }
        }

        // 2) Exact weight match.
        if let Some(&w) = self.weights.get(&s) {
            return clamp01(w);
        }

        // 3) Substring fallback.
        for (k, &w) in &self.weights {
            if s.contains(k) {
                return clamp01(w);
            }
        }

        // 4) Default.
        clamp01(self.default_weight)
    }

    /// Built-in seed with the notice portals this pipeline collects from.
    pub fn default_seed() -> Self {
        let mut weights = HashMap::new();
        let mut aliases = HashMap::new();

        for (k, v) in [("nipa", 1.0), ("bizinfo", 0.9), ("web", 0.6)] {
            weights.insert(k.to_string(), v);
        }

        for (a, c) in [
            ("nipa kr", "nipa"),
            ("www nipa kr", "nipa"),
            ("bizinfo go kr", "bizinfo"),
            ("k startup go kr", "web"),
            ("pps data go kr", "web"),
        ] {
            aliases.insert(a.to_string(), c.to_string());
        }

        Self {
            default_weight: 0.5,
            weights,
            aliases,
        }
    }
}

/// Normalize input string: lowercase, replace punctuation/dashes with
/// spaces, collapse multiple spaces into one.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();

    for ch in ['—', '–', '-', '_', '/', '\\'] {
        out = out.replace(ch, " ");
    }
    out = out.replace(['\n', '\r', '\t', '.', ','], " ");

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TrustConfig {
        TrustConfig::default_seed()
    }

    #[test]
    fn exact_match() {
        let c = cfg();
        assert!((c.trust_for("nipa") - 1.0).abs() < 1e-6);
        assert!((c.trust_for("bizinfo") - 0.9).abs() < 1e-6);
        assert!((c.trust_for("web") - 0.6).abs() < 1e-6);
    }

    #[test]
    fn case_insensitive_lookup() {
        let c = cfg();
        assert!((c.trust_for("NIPA") - c.trust_for("nipa")).abs() < 1e-6);
    }

    #[test]
    fn alias_match() {
        let c = cfg();
        assert!((c.trust_for("www.nipa.kr") - 1.0).abs() < 1e-6);
        assert!((c.trust_for("pps.data.go.kr") - 0.6).abs() < 1e-6);
    }

    #[test]
    fn substring_fallback() {
        let c = cfg();
        // No alias needed: "bizinfo.go.kr" normalizes to "bizinfo go kr",
        // which contains the canonical key.
        assert!((c.trust_for("bizinfo.go.kr") - 0.9).abs() < 1e-6);
    }

    #[test]
    fn unknown_and_empty_use_default() {
        let c = cfg();
        assert!((c.trust_for("somewhere-else") - 0.5).abs() < 1e-6);
        assert!((c.trust_for("") - 0.5).abs() < 1e-6);
    }

    #[test]
    fn loaded_weights_are_clamped() {
        let c = TrustConfig {
            default_weight: 2.0,
            weights: HashMap::from([("hot".to_string(), 7.0)]),
            aliases: HashMap::new(),
        };
        assert_eq!(c.trust_for("hot"), 1.0);
        assert_eq!(c.trust_for("unknown"), 1.0);
    }

    #[test]
    fn missing_file_falls_back_to_seed() {
        let c = TrustConfig::load_from_file("/definitely/not/here.json");
        assert!((c.trust_for("nipa") - 1.0).abs() < 1e-6);
    }
}

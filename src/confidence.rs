// src/confidence.rs
//! Per-source confidence scores in `[0.0, 1.0]`.
//!
//! Web confidence grows with corroborating links and saturates at
//! [`WEB_SATURATION_ITEMS`]; structured quotes add a flat bonus.
//! Retrieval confidence is the gate's own `mean_topk` statistic — the
//! engine never recomputes what the gate already measured.

use serde::Deserialize;

use crate::bundle::{RetrievalBundle, WebResultBundle};

/// Item count at which web evidence is treated as saturating.
pub const WEB_SATURATION_ITEMS: usize = 5;
/// Flat bonus when the bundle carries any ticker quotes.
pub const TICKER_BONUS: f32 = 0.2;

/// Policy thresholds used by the strategy selector. Fixed constants of
/// the shipped policy, overridable through `EngineConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConfidenceThresholds {
    /// Web evidence at or above this is strong enough to show alongside
    /// retrieval.
    #[serde(default = "default_web_threshold")]
    pub web: f32,
    /// Retrieval at or above this may lead alone when web is weak.
    #[serde(default = "default_rag_threshold")]
    pub rag: f32,
}

fn default_web_threshold() -> f32 {
    0.5
}
fn default_rag_threshold() -> f32 {
    0.35
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            web: default_web_threshold(),
            rag: default_rag_threshold(),
        }
    }
}

/// Confidence in the web bundle: item count scaled to saturation, plus
/// the ticker bonus. Absent/malformed bundle scores exactly `0.0`.
pub fn web_confidence(bundle: Option<&WebResultBundle>) -> f32 {
    let Some(b) = bundle else { return 0.0 };
    let mut base = (b.items.len() as f32 / WEB_SATURATION_ITEMS as f32).min(1.0);
    if !b.tickers.is_empty() {
        base += TICKER_BONUS;
    }
    clamp01(base)
}

/// Confidence in the retrieval bundle: the gate's `mean_topk`. Absent or
/// malformed bundle scores exactly `0.0`.
pub fn rag_confidence(bundle: Option<&RetrievalBundle>) -> f32 {
    match bundle {
        Some(b) => clamp01(b.gating.mean_topk),
        None => 0.0,
    }
}

pub(crate) fn clamp01(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

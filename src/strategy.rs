// src/strategy.rs
//! Strategy policy: which evidence source(s) to surface.
//!
//! The policy is an ordered rule list so each test case maps to exactly
//! one branch:
//!   1. retrieval gated out (and not forced)  → web_only
//!   2. forced by user                        → rag_only
//!   3. web confidence >= threshold           → web_plus_rag
//!   4. rag confidence >= threshold           → rag_only
//!   5. neither decisive                      → web_plus_rag
//!
//! Rule 5 is a conservative, tunable default: show both rather than
//! silently drop one.

use serde::{Deserialize, Serialize};

use crate::bundle::{RetrievalBundle, WebResultBundle};
use crate::confidence::{rag_confidence, web_confidence, ConfidenceThresholds};

/// The choice of which evidence source(s) to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    WebOnly,
    RagOnly,
    WebPlusRag,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::WebOnly => "web_only",
            Strategy::RagOnly => "rag_only",
            Strategy::WebPlusRag => "web_plus_rag",
        }
    }

    /// Whether the strategy surfaces web evidence at all.
    pub fn allows_web(&self) -> bool {
        matches!(self, Strategy::WebOnly | Strategy::WebPlusRag)
    }

    /// Whether the strategy surfaces retrieval evidence at all.
    pub fn allows_rag(&self) -> bool {
        matches!(self, Strategy::RagOnly | Strategy::WebPlusRag)
    }
}

/// Why retrieval was (or was not) admitted. The note form feeds
/// `MergedPayload::notes` for downstream renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RagReason {
    ForcedByUser,
    GatingPass,
    GatingFail,
    MissingOrInvalid,
}

impl RagReason {
    pub fn as_note(&self) -> &'static str {
        match self {
            RagReason::ForcedByUser => "rag:forced_by_user",
            RagReason::GatingPass => "rag:gating_pass",
            RagReason::GatingFail => "rag:gating_fail",
            RagReason::MissingOrInvalid => "rag:missing_or_invalid",
        }
    }
}

/// Admission check for retrieval evidence: the user's force flag wins,
/// otherwise the gate verdict decides.
pub fn should_use_rag(rag: Option<&RetrievalBundle>) -> (bool, RagReason) {
    let Some(b) = rag else {
        return (false, RagReason::MissingOrInvalid);
    };
    if b.plan.force_rag_only {
        return (true, RagReason::ForcedByUser);
    }
    if b.gating.passed() {
        return (true, RagReason::GatingPass);
    }
    (false, RagReason::GatingFail)
}

/// Pick the surfacing strategy. Deterministic; see the module header for
/// the rule order.
pub fn decide_strategy(
    web: Option<&WebResultBundle>,
    rag: Option<&RetrievalBundle>,
    thresholds: &ConfidenceThresholds,
) -> Strategy {
    // Rule 1: gated-out retrieval is never surfaced; web is the fallback
    // of record even when it is weak.
    let (use_rag, _reason) = should_use_rag(rag);
    if !use_rag {
        return Strategy::WebOnly;
    }

    // Rule 2: explicit user override short-circuits the comparison.
    if rag.map(|b| b.plan.force_rag_only).unwrap_or(false) {
        return Strategy::RagOnly;
    }

    let w = web_confidence(web);
    let r = rag_confidence(rag);

    // Rule 3: web evidence strong enough to show alongside retrieval.
    if w >= thresholds.web {
        return Strategy::WebPlusRag;
    }

    // Rule 4: web weak, retrieval decisive — let it lead alone.
    if r >= thresholds.rag {
        return Strategy::RagOnly;
    }

    // Rule 5: neither signal decisive; show both.
    Strategy::WebPlusRag
}

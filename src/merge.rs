// src/merge.rs
//! Evidence merger: assembles the single decision artifact out of the web
//! and retrieval bundles.
//!
//! `strategy` records the *decision*; `web_used` / `rag_used` record the
//! *actual outcome* (a strategy may admit web evidence that turned out
//! empty). Renderers should trust the `_used` flags for layout and the
//! `notes` for explanation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::{
    GatingResult, RetrievalBundle, RetrievalContext, TickerQuote, WebItem, WebResultBundle,
};
use crate::confidence::{rag_confidence, web_confidence, ConfidenceThresholds};
use crate::debug::dev_log_decision;
use crate::strategy::{decide_strategy, should_use_rag, Strategy};

/// Tag carried by the merged payload.
pub const MERGED_PAYLOAD_TYPE: &str = "merged_day1_day2";

/// Merge knobs: how many rows of each evidence section survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MergeConfig {
    #[serde(default = "default_topk")]
    pub topk: usize,
}

fn default_topk() -> usize {
    5
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            topk: default_topk(),
        }
    }
}

/// How retrieval ended up in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagNotice {
    /// Gate passed; the answer is surfaced.
    Used,
    /// Gate failed but the user forced retrieval; the answer is surfaced.
    Forced,
    /// Gate failed; the answer stays hidden.
    GatedOut,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSection {
    pub items: Vec<WebItem>,
    pub tickers: Vec<TickerQuote>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gating: Option<GatingResult>,
    pub contexts: Vec<RetrievalContext>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<RagNotice>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub web: f32,
    pub rag: f32,
}

/// The single decision artifact. Created fresh per query, never mutated
/// after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub strategy: Strategy,
    pub web_used: bool,
    pub rag_used: bool,
    pub web: WebSection,
    pub rag: RagSection,
    pub confidence: ConfidenceReport,
    pub notes: Vec<String>,
}

/// Merge the two evidence bundles into one payload.
pub fn merge(
    web: Option<&WebResultBundle>,
    rag: Option<&RetrievalBundle>,
    cfg: &MergeConfig,
    thresholds: &ConfidenceThresholds,
) -> MergedPayload {
    let mut notes: Vec<String> = Vec::new();

    // Web section is always assembled, even when the strategy later
    // drops it: renderers may still show errors from the fetch layer.
    let web_section = WebSection {
        items: web
            .map(|b| b.items.iter().take(cfg.topk).cloned().collect())
            .unwrap_or_default(),
        tickers: web.map(|b| b.tickers.clone()).unwrap_or_default(),
        errors: web.map(|b| b.errors.clone()).unwrap_or_default(),
    };
    let web_conf = web_confidence(web);

    // Retrieval section only when the bundle is well-formed.
    let mut rag_section = RagSection::default();
    let mut rag_conf = 0.0;
    let (use_rag, reason) = should_use_rag(rag);
    match rag {
        Some(b) => {
            rag_section.gating = Some(b.gating);
            rag_section.contexts = b.contexts.iter().take(cfg.topk).cloned().collect();
            rag_conf = rag_confidence(rag);

            if use_rag {
                rag_section.answer = b.answer.clone();
                rag_section.notice = Some(if b.gating.passed() {
                    RagNotice::Used
                } else {
                    RagNotice::Forced
                });
            } else {
                rag_section.notice = Some(RagNotice::GatedOut);
            }
            notes.push(reason.as_note().to_string());
        }
        None => {
            notes.push(reason.as_note().to_string());
        }
    }

    let strategy = decide_strategy(web, rag, thresholds);

    // Outcome flags: the decision admits a source, the flag records
    // whether it actually produced anything.
    let web_used =
        strategy.allows_web() && (!web_section.items.is_empty() || !web_section.tickers.is_empty());
    let rag_used = strategy.allows_rag()
        && matches!(rag_section.notice, Some(RagNotice::Used) | Some(RagNotice::Forced));

    let query = web
        .map(|b| b.query.as_str())
        .or_else(|| rag.map(|b| b.query.as_str()))
        .unwrap_or("");
    dev_log_decision("merge", query, strategy.as_str(), web_conf, rag_conf, &notes);

    MergedPayload {
        kind: MERGED_PAYLOAD_TYPE.to_string(),
        strategy,
        web_used,
        rag_used,
        web: web_section,
        rag: rag_section,
        confidence: ConfidenceReport {
            web: web_conf,
            rag: rag_conf,
        },
        notes,
    }
}

/// JSON front door: coerce raw payloads (single normalization step),
/// then merge. Malformed bundles degrade to "absent", never an error.
pub fn merge_values(
    web: Option<&Value>,
    rag: Option<&Value>,
    cfg: &MergeConfig,
    thresholds: &ConfidenceThresholds,
) -> MergedPayload {
    let web = web.and_then(WebResultBundle::from_value);
    let rag = rag.and_then(RetrievalBundle::from_value);
    merge(web.as_ref(), rag.as_ref(), cfg, thresholds)
}

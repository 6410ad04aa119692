// src/bundle.rs
//! Evidence payload types and lenient JSON coercion.
//!
//! Each upstream fetcher hands the engine one tagged payload ("bundle").
//! A bundle whose `type` tag is wrong, or that fails to deserialize, is
//! coerced to `None` at the entry of the engine — downstream code never
//! null-checks individual fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag carried by a well-formed web-search payload.
pub const WEB_RESULTS_TYPE: &str = "web_results";
/// Tag carried by a well-formed retrieval payload.
pub const RAG_ANSWER_TYPE: &str = "rag_answer";

/// One web search hit, in caller-determined relevance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    /// Raw page excerpt, when the search provider was asked for it.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub score: f32,
}

/// Quote row from the finance client. Per-symbol failures are reported
/// inline (`error` set, `price` absent) rather than dropping the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Web evidence bundle: search items plus optional structured quotes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebResultBundle {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub items: Vec<WebItem>,
    #[serde(default)]
    pub tickers: Vec<TickerQuote>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl WebResultBundle {
    /// True iff the payload carries the expected `type` tag.
    pub fn is_valid(&self) -> bool {
        self.kind == WEB_RESULTS_TYPE
    }

    /// Coerce a raw JSON payload. Wrong tag or deserialization failure
    /// yields `None`; the caller treats that as "no web evidence".
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value::<Self>(value.clone())
            .ok()
            .filter(Self::is_valid)
    }
}

/// Retrieval knobs the upstream agent ran with. Only `force_rag_only`
/// feeds the strategy policy; the rest is carried for round-tripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalPlan {
    #[serde(default)]
    pub force_rag_only: bool,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    #[serde(default = "default_min_mean_topk")]
    pub min_mean_topk: f32,
    #[serde(default = "default_max_context")]
    pub max_context: usize,
    #[serde(default = "default_true")]
    pub return_draft_when_enough: bool,
}

fn default_top_k() -> usize {
    5
}
fn default_min_score() -> f32 {
    0.5
}
fn default_min_mean_topk() -> f32 {
    0.30
}
fn default_max_context() -> usize {
    2000
}
fn default_true() -> bool {
    true
}

impl Default for RetrievalPlan {
    fn default() -> Self {
        Self {
            force_rag_only: false,
            top_k: default_top_k(),
            min_score: default_min_score(),
            min_mean_topk: default_min_mean_topk(),
            max_context: default_max_context(),
            return_draft_when_enough: true,
        }
    }
}

/// One retrieved chunk. Upstream guarantees descending `score` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalContext {
    #[serde(default)]
    pub score: f32,
    #[serde(default, alias = "text")]
    pub chunk: String,
    #[serde(default)]
    pub source: String,
}

/// Gate verdict over retrieved context quality. Produced once per
/// retrieval call and immutable thereafter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatingStatus {
    Enough,
    #[default]
    Insufficient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GatingResult {
    #[serde(default)]
    pub status: GatingStatus,
    #[serde(default)]
    pub top_score: f32,
    #[serde(default)]
    pub mean_topk: f32,
}

impl GatingResult {
    pub fn passed(&self) -> bool {
        self.status == GatingStatus::Enough
    }
}

/// Retrieval evidence bundle: gated contexts plus a drafted answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalBundle {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub plan: RetrievalPlan,
    #[serde(default)]
    pub gating: GatingResult,
    #[serde(default)]
    pub contexts: Vec<RetrievalContext>,
    #[serde(default)]
    pub answer: String,
}

impl RetrievalBundle {
    pub fn is_valid(&self) -> bool {
        self.kind == RAG_ANSWER_TYPE
    }

    /// Coerce a raw JSON payload; malformed retrieval is treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value::<Self>(value.clone())
            .ok()
            .filter(Self::is_valid)
    }
}

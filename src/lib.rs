// src/lib.rs
// Public library surface for integration tests (and potential reuse).
//
// Pure decision core for multi-source research pipelines: confidence
// scoring over evidence bundles, retrieval gating, strategy selection,
// evidence merging, and notice ranking. Fetching, rendering and agent
// wiring live in the collaborating services; this crate only turns
// already-fetched payloads into decisions and orderings.

pub mod bundle;
pub mod config;
pub mod confidence;
pub mod gate;
pub mod merge;
pub mod strategy;

// Notice pipeline (normalize, dedup, trust, rank)
pub mod notice;

// Anonymized dev logging for decision events
pub mod debug;

// ---- Re-exports for stable public API ----
pub use crate::bundle::{
    GatingResult, GatingStatus, RetrievalBundle, RetrievalContext, RetrievalPlan, TickerQuote,
    WebItem, WebResultBundle,
};
pub use crate::config::{EngineConfig, HotReloadEngineConfig};
pub use crate::confidence::{rag_confidence, web_confidence, ConfidenceThresholds};
pub use crate::gate::{gate, GateParams};
pub use crate::merge::{merge, merge_values, MergeConfig, MergedPayload, RagNotice};
pub use crate::notice::{
    normalize_and_rank, normalize_and_rank_at, rank_items, NoticeRecord, RankConfig, RawNotice,
    TrustConfig,
};
pub use crate::strategy::{decide_strategy, should_use_rag, RagReason, Strategy};

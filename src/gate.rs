// src/gate.rs
//! Retrieval-acceptance gate.
//!
//! Conjunctive threshold test over a pre-ranked context list: the single
//! best match AND the aggregate quality of the top-k window must both
//! clear their bars, so one lucky outlier cannot pass weak retrieval.

use serde::Deserialize;

use crate::bundle::{GatingResult, GatingStatus, RetrievalContext};

/// Gate thresholds. Defaults match the shipped retrieval plan.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GateParams {
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    #[serde(default = "default_min_mean_topk")]
    pub min_mean_topk: f32,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_min_score() -> f32 {
    0.5
}
fn default_min_mean_topk() -> f32 {
    0.30
}
fn default_top_k() -> usize {
    5
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            min_mean_topk: default_min_mean_topk(),
            top_k: default_top_k(),
        }
    }
}

/// Evaluate the gate. `contexts` must already be sorted descending by
/// score (upstream precondition, not re-verified here). An empty list is
/// always insufficient.
pub fn gate(contexts: &[RetrievalContext], params: &GateParams) -> GatingResult {
    if contexts.is_empty() {
        return GatingResult::default();
    }

    let top_score = contexts[0].score;
    // top_k = 0 would make the window mean undefined; treat it as 1.
    let k = params.top_k.max(1).min(contexts.len());
    let mean_topk = contexts[..k].iter().map(|c| c.score).sum::<f32>() / k as f32;

    let status = if top_score >= params.min_score && mean_topk >= params.min_mean_topk {
        GatingStatus::Enough
    } else {
        GatingStatus::Insufficient
    };

    GatingResult {
        status,
        top_score,
        mean_topk,
    }
}

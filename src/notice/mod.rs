// src/notice/mod.rs
//! Notice pipeline: raw rows → normalize → cross-source dedup → rank.
//!
//! Fetching lives upstream; this module only turns already-fetched rows
//! into a scored, totally ordered record list.

pub mod normalize;
pub mod rank;
pub mod trust;
pub mod types;

use chrono::{NaiveDate, Utc};

// Re-export convenient types.
pub use normalize::{dedup_by_title_url, dedup_by_url, normalize_all};
pub use rank::{rank_at, rank_items, RankConfig, RankWeights};
pub use trust::TrustConfig;
pub use types::{NoticeRecord, RawNotice};

/// Full pipeline against an explicit reference date (tests, replays).
pub fn normalize_and_rank_at(
    raw: Vec<RawNotice>,
    query: &str,
    cfg: &RankConfig,
    trust: &TrustConfig,
    today: NaiveDate,
) -> Vec<NoticeRecord> {
    let records = dedup_by_title_url(normalize_all(raw));
    rank_at(&records, query, cfg, trust, today)
}

/// Full pipeline against the current date.
pub fn normalize_and_rank(
    raw: Vec<RawNotice>,
    query: &str,
    cfg: &RankConfig,
    trust: &TrustConfig,
) -> Vec<NoticeRecord> {
    normalize_and_rank_at(raw, query, cfg, trust, Utc::now().date_naive())
}

// src/notice/types.rs
use serde::{Deserialize, Serialize};

/// Raw search row as the notice fetchers emit it (same flat shape the
/// web-search pipeline uses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNotice {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub date: String,
}

/// Normalized notice record. `close_date` and `announce_date` are ISO
/// dates or empty; `score` is populated by the ranker only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub agency: String,
    #[serde(default)]
    pub announce_date: String,
    #[serde(default)]
    pub close_date: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub score: f32,
}

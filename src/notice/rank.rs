// src/notice/rank.rs
//! Notice ranking: deadline urgency (50%) + keyword relevance (30%) +
//! source trust (20%), with rule corrections.
//!
//! - Missing `close_date` scores 0 on the deadline axis and sinks to the
//!   bottom of the ordering (treated as "unknown", not excluded).
//! - Corrections: government-domain bonus, hub/listing-URL demotion.
//! - Sort: deadline ascending → composite score descending → trust
//!   descending. The full list is ordered; callers slice for display.

use chrono::{NaiveDate, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use super::trust::TrustConfig;
use super::types::NoticeRecord;
use crate::confidence::clamp01;

/// Sort rank given to records without a parseable close date.
pub const UNKNOWN_DEADLINE_DAYS: i64 = 9999;

/// Relative weights of the three scoring axes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RankWeights {
    #[serde(default = "default_w_deadline")]
    pub deadline: f32,
    #[serde(default = "default_w_keyword")]
    pub keyword: f32,
    #[serde(default = "default_w_trust")]
    pub trust: f32,
}

fn default_w_deadline() -> f32 {
    0.5
}
fn default_w_keyword() -> f32 {
    0.3
}
fn default_w_trust() -> f32 {
    0.2
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            deadline: default_w_deadline(),
            keyword: default_w_keyword(),
            trust: default_w_trust(),
        }
    }
}

/// Ranking configuration. Every constant here is policy, not code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankConfig {
    #[serde(default)]
    pub weights: RankWeights,
    /// Deadline decay window in days.
    #[serde(default = "default_window_days")]
    pub deadline_window_days: i64,
    /// Bonus for URLs hosted on a government domain.
    #[serde(default = "default_gov_bonus")]
    pub gov_bonus: f32,
    /// Demotion for hub/listing URLs (index pages, not actual notices).
    #[serde(default = "default_hub_penalty")]
    pub hub_penalty: f32,
    /// Host suffixes that earn the government bonus.
    #[serde(default = "default_gov_domains")]
    pub gov_domains: Vec<String>,
    /// URL substrings marking hub/topic/listing pages.
    #[serde(default = "default_hub_patterns")]
    pub hub_patterns: Vec<String>,
}

fn default_window_days() -> i64 {
    30
}
fn default_gov_bonus() -> f32 {
    0.2
}
fn default_hub_penalty() -> f32 {
    0.5
}
fn default_gov_domains() -> Vec<String> {
    [
        "nipa.kr",
        "bizinfo.go.kr",
        "k-startup.go.kr",
        "g2b.go.kr",
        "ntis.go.kr",
        "keit.re.kr",
        "keiti.re.kr",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_hub_patterns() -> Vec<String> {
    [
        "/tag/",
        "/topic/",
        "/hub/",
        "/section/",
        "/category/",
        "/tags/",
        "/검색",
        "/search",
        "/list",
        "/lists",
        "/board/list",
        "/news/list",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            weights: RankWeights::default(),
            deadline_window_days: default_window_days(),
            gov_bonus: default_gov_bonus(),
            hub_penalty: default_hub_penalty(),
            gov_domains: default_gov_domains(),
            hub_patterns: default_hub_patterns(),
        }
    }
}

/// Days until the close date, relative to `today`. Missing/unparseable
/// dates report [`UNKNOWN_DEADLINE_DAYS`] so they sort last.
pub fn days_until(close_date: &str, today: NaiveDate) -> i64 {
    let s = close_date.trim();
    if s.is_empty() {
        return UNKNOWN_DEADLINE_DAYS;
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => (d - today).num_days(),
        Err(_) => UNKNOWN_DEADLINE_DAYS,
    }
}

/// Linear deadline decay: due/overdue → 1.0, `window_days` out or
/// unknown → 0.0.
pub fn deadline_score(close_date: &str, today: NaiveDate, window_days: i64) -> f32 {
    let days = days_until(close_date, today);
    if days == UNKNOWN_DEADLINE_DAYS {
        return 0.0;
    }
    if days <= 0 {
        return 1.0;
    }
    if days >= window_days {
        return 0.0;
    }
    clamp01(1.0 - days as f32 / window_days as f32)
}

/// Keyword overlap: +2 per query token found in the title, +1 in the
/// snippet, normalized by `2 × token count`. Tokens are alphanumeric or
/// Hangul runs, matched case-insensitively.
pub fn keyword_score(query: &str, title: &str, snippet: &str) -> f32 {
    static RE_TOKEN: OnceCell<Regex> = OnceCell::new();
    let re = RE_TOKEN.get_or_init(|| Regex::new(r"(?u)[0-9A-Za-z\p{Hangul}]+").unwrap());

    let q = query.to_lowercase();
    let tokens: Vec<&str> = re.find_iter(&q).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let t = title.to_lowercase();
    let s = snippet.to_lowercase();
    let mut hits = 0.0f32;
    for tok in &tokens {
        if t.contains(tok) {
            hits += 2.0;
        } else if s.contains(tok) {
            hits += 1.0;
        }
    }
    let denom = (2.0 * tokens.len() as f32).max(1.0);
    (hits / denom).min(1.0)
}

/// Host of a URL, lowercased; empty when the URL does not parse.
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}

fn is_gov_host(url: &str, domains: &[String]) -> bool {
    let host = host_of(url);
    if host.is_empty() {
        return false;
    }
    domains.iter().any(|d| host.ends_with(d.as_str()))
}

fn is_hub_url(url: &str, patterns: &[String]) -> bool {
    let u = url.to_lowercase();
    patterns.iter().any(|p| u.contains(p.as_str()))
}

/// Composite score for one record, corrections applied, clamped to
/// `[0,1]`.
pub fn score_record(
    rec: &NoticeRecord,
    query: &str,
    cfg: &RankConfig,
    trust: &TrustConfig,
    today: NaiveDate,
) -> f32 {
    let w = &cfg.weights;
    let mut score = w.deadline * deadline_score(&rec.close_date, today, cfg.deadline_window_days)
        + w.keyword * keyword_score(query, &rec.title, &rec.snippet)
        + w.trust * trust.trust_for(&rec.source);

    if is_gov_host(&rec.url, &cfg.gov_domains) {
        score += cfg.gov_bonus;
    }
    if is_hub_url(&rec.url, &cfg.hub_patterns) {
        score -= cfg.hub_penalty;
    }

    clamp01(score)
}

/// Score and totally order the records relative to `today`. Input is
/// untouched; the returned copies carry the populated `score`. The sort
/// is stable, so re-ranking a ranked list is a no-op.
pub fn rank_at(
    records: &[NoticeRecord],
    query: &str,
    cfg: &RankConfig,
    trust: &TrustConfig,
    today: NaiveDate,
) -> Vec<NoticeRecord> {
    let mut scored: Vec<NoticeRecord> = records
        .iter()
        .map(|rec| {
            let mut out = rec.clone();
            out.score = round4(score_record(rec, query, cfg, trust, today));
            out
        })
        .collect();

    scored.sort_by(|a, b| {
        days_until(&a.close_date, today)
            .cmp(&days_until(&b.close_date, today))
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| {
                trust
                    .trust_for(&b.source)
                    .total_cmp(&trust.trust_for(&a.source))
            })
    });
    scored
}

/// [`rank_at`] against the current date.
pub fn rank_items(
    records: &[NoticeRecord],
    query: &str,
    cfg: &RankConfig,
    trust: &TrustConfig,
) -> Vec<NoticeRecord> {
    rank_at(records, query, cfg, trust, Utc::now().date_naive())
}

fn round4(x: f32) -> f32 {
    (x * 10_000.0).round() / 10_000.0
}

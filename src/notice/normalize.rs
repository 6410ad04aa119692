// src/notice/normalize.rs
//! Raw search rows → normalized [`NoticeRecord`]s.
//!
//! Heterogeneous feeds disagree on date formats, carry HTML fragments in
//! snippets, and repeat the same notice across sources. Normalization
//! settles all of that before scoring: canonical source keys, ISO dates
//! (empty when unparseable), cleaned text, and key-based deduplication.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::OnceCell;
use regex::Regex;

use super::types::{NoticeRecord, RawNotice};

/// Date formats the feeds have been observed to use.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Parse a raw date string into ISO `YYYY-MM-DD`, or empty when nothing
/// matches. Unparseable dates degrade; they never fail the pipeline.
pub fn parse_date_iso(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    // Zoned datetimes (e.g. "2025-03-01T09:00:00+0900").
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    // Compact 8-digit form (YYYYMMDD).
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    String::new()
}

/// Clean provider text: decode HTML entities, strip tags, collapse
/// whitespace, cap length.
pub fn clean_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }
    out
}

/// Map a raw source label onto a canonical trust key.
pub fn canonical_source(raw: &str) -> String {
    let s = raw.trim().to_lowercase();
    if s.contains("nipa") {
        "nipa".to_string()
    } else if s.contains("bizinfo") {
        "bizinfo".to_string()
    } else {
        "web".to_string()
    }
}

/// Normalize raw rows into notice records and drop URL duplicates.
pub fn normalize_all(raw: Vec<RawNotice>) -> Vec<NoticeRecord> {
    let records = raw
        .into_iter()
        .map(|r| NoticeRecord {
            title: clean_text(&r.title),
            url: r.url.trim().to_string(),
            source: canonical_source(&r.source),
            agency: String::new(),
            announce_date: parse_date_iso(&r.date),
            close_date: String::new(),
            budget: String::new(),
            snippet: clean_text(&r.snippet),
            attachments: Vec::new(),
            score: 0.0,
        })
        .collect();
    dedup_by_url(records)
}

/// Drop records with an empty URL and keep the first occurrence of each
/// URL (input order wins).
pub fn dedup_by_url(records: Vec<NoticeRecord>) -> Vec<NoticeRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for rec in records {
        if rec.url.is_empty() || !seen.insert(rec.url.clone()) {
            continue;
        }
        out.push(rec);
    }
    out
}

/// Cross-source merge dedup: `(title, url)` pair, first occurrence wins.
pub fn dedup_by_title_url(records: Vec<NoticeRecord>) -> Vec<NoticeRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for rec in records {
        let key = (rec.title.trim().to_string(), rec.url.trim().to_string());
        if !seen.insert(key) {
            continue;
        }
        out.push(rec);
    }
    out
}

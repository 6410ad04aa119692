// tests/notice_pipeline.rs
//
// End-to-end notice pipeline: raw rows from several feeds → normalize →
// cross-source dedup → rank.

use chrono::{Duration, NaiveDate};

use evidence_decision_engine::{normalize_and_rank_at, RankConfig, RawNotice, TrustConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

fn raw(title: &str, url: &str, source: &str, snippet: &str, date: &str) -> RawNotice {
    RawNotice {
        title: title.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        snippet: snippet.to_string(),
        date: date.to_string(),
    }
}

#[test]
fn pipeline_normalizes_dedups_and_orders() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();

    let rows = vec![
        // Same notice surfaced by two feeds: URL dedup keeps the first.
        raw(
            "AI 바우처 지원사업 공고",
            "https://www.nipa.kr/board/view?id=77",
            "nipa.kr",
            "<b>AI 바우처</b> 수요기업 모집",
            "2025.08.20",
        ),
        raw(
            "AI 바우처 지원사업 공고",
            "https://www.nipa.kr/board/view?id=77",
            "web",
            "AI 바우처 수요기업 모집",
            "2025-08-20",
        ),
        raw(
            "창업 지원 사업 안내",
            "https://www.bizinfo.go.kr/notice/555",
            "bizinfo.go.kr",
            "창업기업 대상",
            "20250815",
        ),
        // Hub page noise from the open web.
        raw(
            "지원사업 모음",
            "https://blog.example.com/category/support",
            "web",
            "지원사업 링크 모음",
            "",
        ),
        // Row without a URL is dropped during normalization.
        raw("제목만 있는 행", "", "web", "", ""),
    ];

    let ranked = normalize_and_rank_at(rows, "AI 바우처", &cfg, &trust, today());

    assert_eq!(ranked.len(), 3);
    // Sources were canonicalized.
    assert!(ranked.iter().any(|r| r.source == "nipa"));
    assert!(ranked.iter().any(|r| r.source == "bizinfo"));
    // Announce dates were parsed to ISO regardless of input format.
    let nipa = ranked.iter().find(|r| r.source == "nipa").unwrap();
    assert_eq!(nipa.announce_date, "2025-08-20");
    // Snippets were cleaned of markup.
    assert!(!nipa.snippet.contains('<'));
    // Every record got a score in range.
    for r in &ranked {
        assert!((0.0..=1.0).contains(&r.score));
    }
    // The hub page sorts last among the undated records.
    assert_eq!(ranked.last().unwrap().url, "https://blog.example.com/category/support");
}

#[test]
fn close_dates_dominate_the_ordering() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let t = today();

    let soon = (t + Duration::days(2)).format("%Y-%m-%d").to_string();
    let later = (t + Duration::days(20)).format("%Y-%m-%d").to_string();

    let rows = vec![
        raw("closes later", "https://a.example.com/1", "web", "", ""),
        raw("closes soon", "https://a.example.com/2", "web", "", ""),
        raw("no deadline", "https://a.example.com/3", "nipa", "", ""),
    ];
    // Close dates come from detail-page parsing upstream; inject them
    // the way the caller would.
    let mut records = evidence_decision_engine::notice::normalize_all(rows);
    records[0].close_date = later;
    records[1].close_date = soon;

    let ranked =
        evidence_decision_engine::notice::rank_at(&records, "notice", &cfg, &trust, t);
    assert_eq!(ranked[0].title, "closes soon");
    assert_eq!(ranked[1].title, "closes later");
    assert_eq!(ranked[2].title, "no deadline");
}

#[test]
fn cross_source_title_url_dedup() {
    use evidence_decision_engine::notice::dedup_by_title_url;
    use evidence_decision_engine::NoticeRecord;

    let mk = |title: &str, url: &str| NoticeRecord {
        title: title.to_string(),
        url: url.to_string(),
        ..Default::default()
    };
    let merged = dedup_by_title_url(vec![
        mk("A", "https://x/1"),
        mk("A", "https://x/1"),
        mk("A", "https://x/2"),
        mk("B", "https://x/1"),
    ]);
    assert_eq!(merged.len(), 3);
}

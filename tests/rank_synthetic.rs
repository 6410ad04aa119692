// tests/rank_synthetic.rs
//
// Synthetic ranking invariants over randomized record sets: score range,
// ordering guarantees, idempotence, and the hub demotion property.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use evidence_decision_engine::notice::rank::{rank_at, score_record};
use evidence_decision_engine::{NoticeRecord, RankConfig, TrustConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

fn synth_records(n: usize) -> Vec<NoticeRecord> {
    let mut rng = rand::rng();
    let sources = ["nipa", "bizinfo", "web", "unknown-portal"];
    let t = today();
    (0..n)
        .map(|i| {
            // Roughly a quarter of the records have no deadline at all.
            let close = if rng.random_range(0..4) == 0 {
                String::new()
            } else {
                (t + Duration::days(rng.random_range(-5i64..60)))
                    .format("%Y-%m-%d")
                    .to_string()
            };
            NoticeRecord {
                title: format!("support program {i}"),
                url: format!("https://portal{}.example.com/notice/{i}", i % 7),
                source: sources[rng.random_range(0..sources.len())].to_string(),
                close_date: close,
                snippet: "startup support program open call".to_string(),
                ..Default::default()
            }
        })
        .collect()
}

#[test]
fn scores_stay_in_unit_range() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let ranked = rank_at(&synth_records(200), "startup support", &cfg, &trust, today());
    for r in &ranked {
        assert!(
            (0.0..=1.0).contains(&r.score),
            "score {} out of range for {}",
            r.score,
            r.title
        );
    }
}

#[test]
fn deadline_order_is_primary() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let t = today();
    let ranked = rank_at(&synth_records(100), "startup support", &cfg, &trust, t);

    let days: Vec<i64> = ranked
        .iter()
        .map(|r| {
            if r.close_date.is_empty() {
                9999
            } else {
                (NaiveDate::parse_from_str(&r.close_date, "%Y-%m-%d").unwrap() - t).num_days()
            }
        })
        .collect();
    assert!(
        days.windows(2).all(|w| w[0] <= w[1]),
        "deadline order violated: {days:?}"
    );
}

#[test]
fn unknown_deadlines_always_sink_below_known_ones() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let ranked = rank_at(&synth_records(150), "startup", &cfg, &trust, today());

    let first_unknown = ranked.iter().position(|r| r.close_date.is_empty());
    if let Some(pos) = first_unknown {
        assert!(
            ranked[pos..].iter().all(|r| r.close_date.is_empty()),
            "a dated record appeared after an undated one"
        );
    }
}

#[test]
fn reranking_ranked_output_is_a_fixed_point() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let t = today();
    let once = rank_at(&synth_records(80), "startup support", &cfg, &trust, t);
    let twice = rank_at(&once, "startup support", &cfg, &trust, t);
    assert_eq!(once, twice);
}

#[test]
fn hub_variant_scores_at_least_penalty_lower() {
    let cfg = RankConfig::default();
    let trust = TrustConfig::default_seed();
    let t = today();

    let leaf = NoticeRecord {
        title: "AI voucher open call".to_string(),
        url: "https://example.com/notice/123".to_string(),
        source: "web".to_string(),
        close_date: (t + Duration::days(10)).format("%Y-%m-%d").to_string(),
        snippet: "voucher".to_string(),
        ..Default::default()
    };
    let mut hub = leaf.clone();
    hub.url = "https://example.com/category/123".to_string();

    let leaf_score = score_record(&leaf, "AI voucher", &cfg, &trust, t);
    let hub_score = score_record(&hub, "AI voucher", &cfg, &trust, t);
    assert!(
        leaf_score - hub_score >= cfg.hub_penalty - 1e-6,
        "hub demotion too small: leaf {leaf_score} hub {hub_score}"
    );
}

//! End-to-end contract tests for the engine facade.
//!
//! Exercises the full surface the way a host application would: load a
//! catalog, query suggestions under different contexts, report interactions,
//! read analytics, and rebuild. Includes a multi-threaded smoke test since
//! the engine promises coordination-free concurrent reads.

use enlazar::prelude::*;
use std::sync::Arc;
use std::thread;

fn scottish_catalog() -> Vec<ContentNode> {
    vec![
        ContentNode::new("bk-spitfire", ContentType::Book, "Spitfire Women")
            .with_category("Scottish Aviation")
            .with_keywords(["spitfire", "pilots", "ferry"])
            .with_author("G. Whittell")
            .with_url("/books/spitfire-women"),
        ContentNode::new("bk-prestwick", ContentType::Book, "Prestwick at War")
            .with_category("Scottish Aviation")
            .with_keywords(["prestwick", "airfield"])
            .with_tags(["history"])
            .with_url("/books/prestwick-at-war"),
        ContentNode::new("bk-carrier", ContentType::Book, "Carrier Strike")
            .with_category("Naval Aviation")
            .with_keywords(["carrier", "fleet"])
            .with_url("/books/carrier-strike"),
        ContentNode::new("ar-restore", ContentType::Article, "Restoring a Spitfire Airframe")
            .with_keywords(["spitfire", "restoration"])
            .with_tags(["technical"])
            .with_url("/articles/restoring-a-spitfire"),
    ]
}

fn new_engine() -> ContentLinkEngine {
    let config = EngineConfig {
        min_relevance_score: 0.2,
        ..EngineConfig::default()
    };
    let engine = ContentLinkEngine::new(config).expect("valid config");
    engine.initialize(scottish_catalog());
    engine
}

#[test]
fn category_pair_produces_exactly_one_edge() {
    // The two Scottish Aviation books overlap only on category; the Naval
    // Aviation book overlaps with neither.
    let engine = new_engine();
    let edges = engine.get_relationships("bk-prestwick");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target_id, "bk-spitfire");
    assert_eq!(edges[0].relationship_type, RelationshipType::SameCategory);
    assert!((edges[0].strength - ScoreWeights::default().category).abs() < 1e-6);
}

#[test]
fn disjoint_node_has_no_edges() {
    let engine = new_engine();
    assert!(engine.get_relationships("bk-carrier").is_empty());
}

#[test]
fn clicks_accumulate_and_surface_in_analytics() {
    let engine = new_engine();
    for _ in 0..3 {
        engine.track_interaction(EventType::Click, "bk-spitfire", "bk-prestwick");
    }

    let edges = engine.get_relationships("bk-spitfire");
    let edge = edges
        .iter()
        .find(|e| e.target_id == "bk-prestwick")
        .expect("edge exists");
    assert_eq!(edge.metadata.click_count, 3);
    assert!(edge.metadata.last_accessed.is_some());

    let top = engine.analytics(5).top_performing_links;
    assert_eq!(top[0].clicks, 3);
}

#[test]
fn zero_max_suggestions_returns_empty() {
    let engine = new_engine();
    let opts = SuggestOptions {
        max_suggestions: Some(0),
        ..SuggestOptions::default()
    };
    assert!(engine.get_suggestions("bk-spitfire", &opts).is_empty());
}

#[test]
fn unknown_id_returns_empty_not_error() {
    let engine = new_engine();
    assert!(engine
        .get_suggestions("not-in-catalog", &SuggestOptions::default())
        .is_empty());
    assert!(engine.get_relationships("not-in-catalog").is_empty());
    assert!(engine.get_content_node("not-in-catalog").is_none());
}

#[test]
fn suggestions_never_include_source_and_respect_bound() {
    let engine = new_engine();
    for k in 0..4 {
        let opts = SuggestOptions {
            max_suggestions: Some(k),
            ..SuggestOptions::default()
        };
        let out = engine.get_suggestions("bk-spitfire", &opts);
        assert!(out.len() <= k);
        assert!(out.iter().all(|s| s.target_id != "bk-spitfire"));
    }
}

#[test]
fn deterministic_across_identical_calls_and_cache() {
    let engine = new_engine();
    let opts = SuggestOptions {
        user_level: Some(UserLevel::Beginner),
        user_preferences: vec!["history".to_string()],
        ..SuggestOptions::default()
    };
    let fresh = engine.get_suggestions("bk-spitfire", &opts);
    let cached = engine.get_suggestions("bk-spitfire", &opts);
    assert_eq!(fresh, cached);

    // A second engine over the same catalog ranks identically.
    let other = new_engine();
    assert_eq!(other.get_suggestions("bk-spitfire", &opts), fresh);
}

#[test]
fn rebuild_swaps_wholesale_and_clears_cache() {
    let engine = new_engine();
    let opts = SuggestOptions::default();
    assert!(!engine.get_suggestions("bk-spitfire", &opts).is_empty());

    // Rebuild with only the naval book; everything else must vanish.
    let naval = scottish_catalog()
        .into_iter()
        .filter(|n| n.id == "bk-carrier")
        .collect();
    let stats = engine.initialize(naval);
    assert_eq!(stats.total_content_nodes, 1);
    assert_eq!(stats.total_relationships, 0);
    assert!(engine.get_suggestions("bk-spitfire", &opts).is_empty());

    // Stale interaction reports from the old graph are dropped silently.
    engine.track_interaction(EventType::Click, "bk-spitfire", "bk-prestwick");
    assert!(engine.analytics(5).top_performing_links.is_empty());
}

#[test]
fn concurrent_reads_and_interactions() {
    let engine = Arc::new(new_engine());
    let mut handles = Vec::new();

    for worker in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            let opts = SuggestOptions::default();
            for _ in 0..50 {
                let out = engine.get_suggestions("bk-spitfire", &opts);
                assert!(out.iter().all(|s| s.target_id != "bk-spitfire"));
                if worker % 2 == 0 {
                    engine.track_interaction(EventType::Impression, "bk-spitfire", "bk-prestwick");
                } else {
                    engine.track_interaction(EventType::Click, "bk-spitfire", "bk-prestwick");
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker");
    }

    let edges = engine.get_relationships("bk-spitfire");
    let edge = edges
        .iter()
        .find(|e| e.target_id == "bk-prestwick")
        .expect("edge exists");
    assert_eq!(edge.metadata.impressions, 200);
    assert_eq!(edge.metadata.click_count, 200);

    let cache = engine.analytics(5).cache;
    assert!(cache.hits + cache.misses >= 400);
}

#[test]
fn suggestion_shape_is_display_ready() {
    let engine = new_engine();
    let out = engine.get_suggestions("bk-spitfire", &SuggestOptions::default());
    for suggestion in &out {
        assert!(!suggestion.suggested_anchor_text.is_empty());
        assert!(!suggestion.context.is_empty());
        assert!((0.0..=1.0).contains(&suggestion.relevance_score));
        match suggestion.priority {
            Priority::High => assert!(suggestion.relevance_score >= 0.7),
            Priority::Medium => assert!(suggestion.relevance_score >= 0.45),
            Priority::Low => assert!(suggestion.relevance_score < 0.45),
        }
    }
}

pub(crate) use super::*;
use crate::node::ContentType;
use crate::suggest::Priority;

fn key(id: &str, opts: &str) -> CacheKey {
    (id.to_string(), opts.to_string())
}

fn suggestion(id: &str) -> LinkSuggestion {
    LinkSuggestion {
        target_id: id.to_string(),
        target_type: ContentType::Book,
        target_title: format!("Title {id}"),
        relevance_score: 0.5,
        context: "same category".to_string(),
        suggested_anchor_text: format!("Title {id}"),
        priority: Priority::Medium,
    }
}

#[test]
fn test_miss_then_hit() {
    let mut cache = SuggestionCache::new(4);
    let k = key("a", "default");
    assert!(cache.get(&k).is_none());

    cache.put(k.clone(), vec![suggestion("b")]);
    let cached = cache.get(&k).expect("hit");
    assert_eq!(cached, vec![suggestion("b")]);

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - 0.5).abs() < 1e-12);
}

#[test]
fn test_lru_eviction_on_overflow() {
    let mut cache = SuggestionCache::new(2);
    cache.put(key("a", ""), vec![]);
    cache.put(key("b", ""), vec![]);

    // Touch "a" so "b" becomes the LRU victim.
    let _ = cache.get(&key("a", ""));
    cache.put(key("c", ""), vec![]);

    assert_eq!(cache.stats().entries, 2);
    assert!(cache.get(&key("a", "")).is_some());
    assert!(cache.get(&key("b", "")).is_none());
    assert!(cache.get(&key("c", "")).is_some());
}

#[test]
fn test_capacity_bound_holds() {
    let mut cache = SuggestionCache::new(3);
    for i in 0..10 {
        cache.put(key(&format!("n{i}"), ""), vec![]);
        assert!(cache.stats().entries <= 3);
    }
}

#[test]
fn test_reinsert_same_key_does_not_evict_others() {
    let mut cache = SuggestionCache::new(2);
    cache.put(key("a", ""), vec![]);
    cache.put(key("b", ""), vec![]);
    cache.put(key("a", ""), vec![suggestion("x")]);

    assert_eq!(cache.stats().entries, 2);
    assert!(cache.get(&key("b", "")).is_some());
    assert_eq!(cache.get(&key("a", "")).expect("hit"), vec![suggestion("x")]);
}

#[test]
fn test_clear_keeps_lifetime_counters() {
    let mut cache = SuggestionCache::new(4);
    cache.put(key("a", ""), vec![]);
    let _ = cache.get(&key("a", ""));
    cache.clear();

    let stats = cache.stats();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.hits, 1);
    assert!(cache.get(&key("a", "")).is_none());
}

#[test]
fn test_zero_capacity_clamped_to_one() {
    let mut cache = SuggestionCache::new(0);
    cache.put(key("a", ""), vec![]);
    assert_eq!(cache.stats().entries, 1);
}

#[test]
fn test_expired_entry_reads_as_miss() {
    let mut cache = SuggestionCache::new(4).with_ttl(std::time::Duration::ZERO);
    cache.put(key("a", ""), vec![suggestion("b")]);
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(cache.get(&key("a", "")).is_none());
    assert_eq!(cache.stats().entries, 0);
}

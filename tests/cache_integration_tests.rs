//! Integration Tests for the public cache API
//!
//! Exercises construction, eviction and policy switching through the crate's
//! re-exports, the way a host process would.

use std::sync::Arc;
use std::thread;

use policy_cache::policy::{LfuPolicy, LruPolicy};
use policy_cache::{CacheError, CacheStore, EvictionPolicy, PolicyKind, SharedCache};

// == Helper Functions ==

fn filled(kind: PolicyKind, max: usize, keys: &[&str]) -> CacheStore {
    let mut store = CacheStore::new(kind, max).unwrap();
    for key in keys {
        store.put(*key, key.to_uppercase()).unwrap();
    }
    store
}

// == Construction ==

#[test]
fn test_construct_rejects_zero_capacity() {
    for kind in [PolicyKind::Lru, PolicyKind::Lfu, PolicyKind::Fifo] {
        let err = CacheStore::new(kind, 0).unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfiguration(_)));
    }
    assert!(SharedCache::with_policy(PolicyKind::Lru, 0).is_err());
}

#[test]
fn test_construct_from_policy_name() {
    let kind: PolicyKind = "lfu".parse().unwrap();
    let store = CacheStore::new(kind, 8).unwrap();
    assert_eq!(store.policy_name(), "lfu");

    let err = "arc".parse::<PolicyKind>().unwrap_err();
    assert!(err.to_string().contains("arc"));
}

// == Walkthrough Scenario ==

#[test]
fn test_lru_walkthrough() {
    let mut cache = CacheStore::new(PolicyKind::Lru, 2).unwrap();

    cache.put("a", "1").unwrap();
    cache.put("b", "2").unwrap();
    assert_eq!(cache.get("a"), Some(b"1".to_vec()));
    cache.put("c", "3").unwrap();

    assert_eq!(cache.keys(), vec!["a", "c"]);
    assert_eq!(cache.get("a"), Some(b"1".to_vec()));
    assert_eq!(cache.get("c"), Some(b"3".to_vec()));
    assert_eq!(cache.get("b"), None);
}

#[test]
fn test_lfu_walkthrough() {
    let mut cache = CacheStore::new(PolicyKind::Lfu, 2).unwrap();

    cache.put("a", "1").unwrap();
    cache.put("b", "2").unwrap();
    for _ in 0..3 {
        cache.get("a");
    }
    cache.get("b");
    cache.put("c", "3").unwrap();

    assert_eq!(cache.keys(), vec!["a", "c"]);
}

#[test]
fn test_policies_disagree_on_same_history() {
    // a is read often but long ago; b is read once, recently
    let history = |kind| {
        let mut store = filled(kind, 3, &["a", "b", "c"]);
        for _ in 0..5 {
            store.get("a");
        }
        store.get("c");
        store.get("b");
        store.put("d", "D").unwrap();
        store.keys()
    };

    assert_eq!(history(PolicyKind::Lru), vec!["b", "c", "d"]);
    assert_eq!(history(PolicyKind::Lfu), vec!["a", "c", "d"]);
    assert_eq!(history(PolicyKind::Fifo), vec!["b", "c", "d"]);
}

// == Capacity ==

#[test]
fn test_n_plus_one_inserts() {
    for n in 1..=10 {
        let keys: Vec<String> = (0..=n).map(|i| format!("k{}", i)).collect();
        let mut store = CacheStore::new(PolicyKind::Lfu, n).unwrap();
        for key in &keys {
            store.put(key.clone(), "v").unwrap();
        }

        assert_eq!(store.len(), n);
        assert_eq!(store.stats().evictions, 1);
        // Every count is 1, so the first insert is the victim
        assert!(!store.contains("k0"));
    }
}

#[test]
fn test_explicit_evict() {
    let mut store = filled(PolicyKind::Fifo, 4, &["x", "y"]);

    assert_eq!(store.evict().unwrap(), "x");
    assert_eq!(store.evict().unwrap(), "y");
    assert!(matches!(
        store.evict(),
        Err(CacheError::EvictionImpossible(_))
    ));
    assert_eq!(store.stats().evictions, 2);
}

// == Policy Switching ==

#[test]
fn test_switch_lru_to_lfu_mid_life() {
    let mut store = filled(PolicyKind::Lru, 3, &["a", "b", "c"]);
    store.get("c");
    store.get("a");

    store.set_policy(PolicyKind::Lfu);
    assert_eq!(store.keys(), vec!["a", "b", "c"]);
    assert_eq!(store.get("b"), Some(b"B".to_vec()));

    let victim = store.evict().unwrap();
    assert!(["a", "c"].contains(&victim.as_str()));
    assert_eq!(victim, "a");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_replace_with_custom_policy() {
    let mut store = filled(PolicyKind::Fifo, 3, &["a", "b", "c"]);

    store.replace_policy(Box::new(LruPolicy::new())).unwrap();
    store.get("a");
    store.put("d", "D").unwrap();

    assert_eq!(store.policy_name(), "lru");
    assert_eq!(store.keys(), vec!["a", "c", "d"]);
}

#[test]
fn test_with_policy_rejects_prepopulated_policy() {
    let mut lfu = LfuPolicy::new();
    lfu.on_insert("leftover");

    let err = CacheStore::with_policy(Box::new(lfu), 4).unwrap_err();
    assert!(matches!(err, CacheError::InvalidConfiguration(_)));
}

// == Shared Cache ==

#[test]
fn test_shared_cache_across_threads() {
    let cache = Arc::new(SharedCache::with_policy(PolicyKind::Lfu, 32).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500 {
                    let key = format!("t{}-{}", t, i % 50);
                    if cache.get(&key).is_none() {
                        cache.put(key, vec![t as u8; 4]).unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(cache.len(), 32);
    assert_eq!(stats.total_entries, 32);
    assert_eq!(stats.hits + stats.misses, 2000);
    cache.with_store(|store| assert_eq!(store.policy_tracked(), 32));
}

#[test]
fn test_report_json() {
    let cache = SharedCache::with_policy(PolicyKind::Fifo, 2).unwrap();
    cache.put("a", "1").unwrap();
    cache.get("a");
    cache.get("missing");
    cache.set_policy(PolicyKind::Lru);

    let json = serde_json::to_value(cache.report()).unwrap();
    assert_eq!(json["policy"], "lru");
    assert_eq!(json["max_capacity"], 2);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["policy_switches"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

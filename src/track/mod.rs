//! Interaction tracking: impressions, clicks and click-through rates.
//!
//! Counters are keyed by the unordered node pair, matching the undirected
//! edge they describe, and guarded by a mutex: many concurrent requests may
//! report interactions at once. A lost increment under contention would be
//! tolerable for analytics, but the map itself must never corrupt, so all
//! mutation happens under the lock.
//!
//! The tracker holds no reference to the graph; the engine layer checks
//! edge existence and silently drops interactions for pairs that no longer
//! exist (stale client state after a rebuild).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::SystemTime;

/// Kind of reported interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// A suggestion was rendered to a reader.
    Impression,
    /// A rendered suggestion was followed.
    Click,
}

/// Counters for one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionStats {
    /// Times the edge was shown.
    pub impressions: u64,
    /// Times the edge was followed.
    pub clicks: u64,
    /// Most recent interaction of either kind.
    pub last_accessed: Option<SystemTime>,
}

impl InteractionStats {
    /// Click-through rate: clicks over impressions, 0.0 with no impressions.
    #[must_use]
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 / self.impressions as f64
        }
    }
}

/// One row of the top-performing-links report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkPerformance {
    /// Lexicographically smaller endpoint.
    pub source_id: String,
    /// Lexicographically larger endpoint.
    pub target_id: String,
    /// Click count.
    pub clicks: u64,
    /// Impression count.
    pub impressions: u64,
    /// Click-through rate.
    pub ctr: f64,
    /// Most recent interaction.
    pub last_accessed: Option<SystemTime>,
}

/// Mutex-guarded interaction counter store.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    counters: Mutex<HashMap<(String, String), InteractionStats>>,
}

/// Normalize a pair so both directions land on the same counter.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl InteractionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one interaction against the (unordered) pair.
    pub fn record(&self, event: EventType, source_id: &str, target_id: &str) {
        let key = pair_key(source_id, target_id);
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            // A panicked writer can only have left a fully-written entry;
            // counters stay usable.
            Err(poisoned) => poisoned.into_inner(),
        };
        let stats = counters.entry(key).or_default();
        match event {
            EventType::Impression => stats.impressions += 1,
            EventType::Click => stats.clicks += 1,
        }
        stats.last_accessed = Some(SystemTime::now());
    }

    /// Counters for one pair, zeroed if never reported.
    #[must_use]
    pub fn stats_for(&self, a: &str, b: &str) -> InteractionStats {
        let key = pair_key(a, b);
        let counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        counters.get(&key).copied().unwrap_or_default()
    }

    /// Top `n` pairs by click count, ties broken by pair id ascending.
    #[must_use]
    pub fn top_performing(&self, n: usize) -> Vec<LinkPerformance> {
        let counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut rows: Vec<LinkPerformance> = counters
            .iter()
            .map(|((a, b), stats)| LinkPerformance {
                source_id: a.clone(),
                target_id: b.clone(),
                clicks: stats.clicks,
                impressions: stats.impressions,
                ctr: stats.ctr(),
                last_accessed: stats.last_accessed,
            })
            .collect();
        drop(counters);

        rows.sort_unstable_by(|x, y| {
            y.clicks
                .cmp(&x.clicks)
                .then_with(|| x.source_id.cmp(&y.source_id))
                .then_with(|| x.target_id.cmp(&y.target_id))
        });
        rows.truncate(n);
        rows
    }
}

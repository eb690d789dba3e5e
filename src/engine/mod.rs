//! Engine facade: configuration, graph lifecycle and the query surface.
//!
//! [`ContentLinkEngine`] is an explicitly constructed handle — no ambient
//! global — so one process can hold several independent graphs (tests do).
//! It composes the other modules:
//!
//! - `initialize` builds a [`RelationshipGraph`] fully off to the side, then
//!   publishes it with one pointer swap; readers never observe a half-built
//!   graph.
//! - `get_suggestions` is cache-first and a pure read otherwise.
//! - `track_interaction` is the only command; it is gated on configuration
//!   and on the edge actually existing.
//!
//! # Examples
//!
//! ```
//! use enlazar::prelude::*;
//!
//! let engine = ContentLinkEngine::new(EngineConfig::default()).expect("valid config");
//! engine.initialize(vec![
//!     ContentNode::new("a", ContentType::Book, "Spitfire Women")
//!         .with_category("Scottish Aviation"),
//!     ContentNode::new("b", ContentType::Book, "Prestwick at War")
//!         .with_category("Scottish Aviation"),
//! ]);
//!
//! let suggestions = engine.get_suggestions("a", &SuggestOptions::default());
//! assert_eq!(suggestions[0].target_id, "b");
//! ```

use crate::cache::{CacheStats, SuggestionCache};
use crate::error::{EnlazarError, Result};
use crate::graph::{GraphStats, Relationship, RelationshipGraph, RelationshipMetadata};
use crate::node::ContentNode;
use crate::score::ScoreWeights;
use crate::suggest::{rank, LinkSuggestion, SuggestOptions};
use crate::track::{EventType, InteractionTracker, LinkPerformance};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

/// Engine configuration with documented defaults, validated once at
/// construction. Out-of-range values are programmer errors and fail fast;
/// nothing else in the engine ever rejects input.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Default suggestion cap when a request does not supply one. Default 5.
    pub max_links_per_page: usize,
    /// Edge-creation floor in [0, 1]. Pairs scoring below it get no edge.
    /// Default 0.3.
    pub min_relevance_score: f32,
    /// When false, `get_suggestions` is a static fallback returning nothing.
    /// Default true.
    pub enable_dynamic_linking: bool,
    /// When false, `track_interaction` is a no-op. Default true.
    pub enable_user_behavior_tracking: bool,
    /// Scoring signal weights.
    pub score_weights: ScoreWeights,
    /// Curated high-value domain terms (lowercase) for the bonus signal.
    /// Default empty.
    pub domain_keywords: Vec<String>,
    /// Maximum cached suggestion lists. Default 256.
    pub cache_capacity: usize,
    /// Optional cache entry time-to-live. Default none (LRU only).
    pub cache_ttl: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_links_per_page: 5,
            min_relevance_score: 0.3,
            enable_dynamic_linking: true,
            enable_user_behavior_tracking: true,
            score_weights: ScoreWeights::default(),
            domain_keywords: Vec::new(),
            cache_capacity: 256,
            cache_ttl: None,
        }
    }
}

impl EngineConfig {
    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns [`EnlazarError::InvalidConfig`] for any out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_relevance_score) || self.min_relevance_score.is_nan() {
            return Err(EnlazarError::InvalidConfig {
                param: "min_relevance_score".to_string(),
                value: self.min_relevance_score.to_string(),
                constraint: "must be within [0, 1]".to_string(),
            });
        }
        if self.max_links_per_page == 0 {
            return Err(EnlazarError::InvalidConfig {
                param: "max_links_per_page".to_string(),
                value: "0".to_string(),
                constraint: "must be at least 1".to_string(),
            });
        }
        if self.cache_capacity == 0 {
            return Err(EnlazarError::InvalidConfig {
                param: "cache_capacity".to_string(),
                value: "0".to_string(),
                constraint: "must be at least 1".to_string(),
            });
        }
        self.score_weights.validate()
    }
}

/// Usage analytics snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    /// Most-clicked edges, descending.
    pub top_performing_links: Vec<LinkPerformance>,
    /// Suggestion-cache health.
    pub cache: CacheStats,
}

/// The published graph plus a generation counter bumped on every rebuild.
///
/// Cache writes are stamped against the generation they computed from, so a
/// ranking that raced a rebuild can be recognized and discarded instead of
/// landing in the freshly-cleared cache.
#[derive(Debug)]
struct GraphSlot {
    generation: u64,
    graph: Arc<RelationshipGraph>,
}

/// The content relationship & recommendation engine.
///
/// Read-mostly: the graph is immutable between rebuilds, so queries run
/// concurrently without coordination. The two mutable pieces — interaction
/// counters and the suggestion cache — are each guarded separately.
#[derive(Debug)]
pub struct ContentLinkEngine {
    config: EngineConfig,
    graph: RwLock<GraphSlot>,
    cache: Mutex<SuggestionCache>,
    tracker: InteractionTracker,
}

impl ContentLinkEngine {
    /// Construct an engine with an empty graph.
    ///
    /// # Errors
    ///
    /// Returns [`EnlazarError::InvalidConfig`] when the configuration fails
    /// validation (the only fail-fast path in the engine).
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut cache = SuggestionCache::new(config.cache_capacity);
        if let Some(ttl) = config.cache_ttl {
            cache = cache.with_ttl(ttl);
        }
        Ok(Self {
            config,
            graph: RwLock::new(GraphSlot {
                generation: 0,
                graph: Arc::new(RelationshipGraph::default()),
            }),
            cache: Mutex::new(cache),
            tracker: InteractionTracker::new(),
        })
    }

    /// Load (or reload) the catalog, replacing the graph wholesale.
    ///
    /// The new graph is built completely before a single pointer swap
    /// publishes it, so concurrent readers see either the old or the new
    /// version, never a partial one. The swap also advances the graph
    /// generation, and the suggestion cache is cleared right after: any
    /// ranking still in flight against the old graph carries the old
    /// generation and will be refused by the cache write path. Returns the
    /// stats of the new graph.
    pub fn initialize(&self, nodes: Vec<ContentNode>) -> GraphStats {
        let built = Arc::new(RelationshipGraph::build(
            nodes,
            self.config.min_relevance_score,
            &self.config.score_weights,
            &self.config.domain_keywords,
        ));
        let stats = built.stats();

        match self.graph.write() {
            Ok(mut slot) => {
                slot.generation += 1;
                slot.graph = built;
            }
            Err(poisoned) => {
                let mut slot = poisoned.into_inner();
                slot.generation += 1;
                slot.graph = built;
            }
        }
        self.lock_cache().clear();
        stats
    }

    /// Ranked, bounded suggestions for `source_id`. Cache-first; unknown ids
    /// yield an empty list; with dynamic linking disabled this is a static
    /// fallback returning nothing.
    #[must_use]
    pub fn get_suggestions(&self, source_id: &str, options: &SuggestOptions) -> Vec<LinkSuggestion> {
        if !self.config.enable_dynamic_linking {
            return Vec::new();
        }

        let key = (source_id.to_string(), options.canonical_key());
        if let Some(cached) = self.lock_cache().get(&key) {
            return cached;
        }

        let (generation, graph) = self.graph_snapshot();
        let suggestions = rank(&graph, source_id, options, self.config.max_links_per_page);

        // A rebuild may have swapped the graph while we ranked. Inserting
        // the stale list after the rebuild's clear would serve it as a hit,
        // so the write is refused unless the generation still matches. The
        // check runs under the cache lock; a clear that follows a concurrent
        // swap cannot complete until this write is decided.
        let mut cache = self.lock_cache();
        if self.graph_snapshot().0 == generation {
            cache.put(key, suggestions.clone());
        }
        suggestions
    }

    /// All edges touching `id`, with live interaction counters merged into
    /// each record. Empty for unknown ids.
    #[must_use]
    pub fn get_relationships(&self, id: &str) -> Vec<Relationship> {
        let graph = self.current_graph();
        graph
            .relationships(id)
            .iter()
            .map(|edge| {
                let stats = self.tracker.stats_for(&edge.source_id, &edge.target_id);
                let mut edge = edge.clone();
                edge.metadata = RelationshipMetadata {
                    click_count: stats.clicks,
                    impressions: stats.impressions,
                    last_accessed: stats.last_accessed,
                };
                edge
            })
            .collect()
    }

    /// Look up one catalog node.
    #[must_use]
    pub fn get_content_node(&self, id: &str) -> Option<ContentNode> {
        self.current_graph().node(id).cloned()
    }

    /// The full catalog, sorted by id.
    #[must_use]
    pub fn all_content_nodes(&self) -> Vec<ContentNode> {
        self.current_graph()
            .all_nodes()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Aggregate graph shape.
    #[must_use]
    pub fn system_stats(&self) -> GraphStats {
        self.current_graph().stats()
    }

    /// Record a suggestion impression or click against an edge.
    ///
    /// Silently ignored when behavior tracking is disabled or when no edge
    /// exists between the pair (stale client state after a rebuild must not
    /// escalate).
    pub fn track_interaction(&self, event: EventType, source_id: &str, target_id: &str) {
        if !self.config.enable_user_behavior_tracking {
            return;
        }
        if !self.current_graph().contains_edge(source_id, target_id) {
            return;
        }
        self.tracker.record(event, source_id, target_id);
    }

    /// Top-N most-clicked edges plus cache health.
    #[must_use]
    pub fn analytics(&self, top_n: usize) -> Analytics {
        Analytics {
            top_performing_links: self.tracker.top_performing(top_n),
            cache: self.lock_cache().stats(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consistent (generation, graph) pair read under one lock acquisition.
    fn graph_snapshot(&self) -> (u64, Arc<RelationshipGraph>) {
        let slot = match self.graph.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        (slot.generation, Arc::clone(&slot.graph))
    }

    fn current_graph(&self) -> Arc<RelationshipGraph> {
        self.graph_snapshot().1
    }

    fn lock_cache(&self) -> MutexGuard<'_, SuggestionCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

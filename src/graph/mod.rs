//! Relationship graph: scored edges over the content catalog.
//!
//! [`RelationshipGraph`] owns the node set and the derived edge set. Edges
//! are logically undirected but stored under both endpoints, so looking up a
//! node's relationships is O(degree) with no edge-list scan.
//!
//! Construction scores every unordered pair of distinct nodes (O(n²),
//! acceptable for catalogs in the hundreds to low thousands) and keeps an
//! edge iff its strength reaches the configured floor. Pairs are visited in
//! sorted-id order so identical input always produces an identical graph.
//!
//! The graph is immutable once built; interaction counters live in the
//! tracker and are merged into returned records by the engine layer.
//!
//! # Examples
//!
//! ```
//! use enlazar::graph::RelationshipGraph;
//! use enlazar::node::{ContentNode, ContentType};
//! use enlazar::score::ScoreWeights;
//!
//! let nodes = vec![
//!     ContentNode::new("a", ContentType::Book, "Spitfire Women")
//!         .with_category("Scottish Aviation"),
//!     ContentNode::new("b", ContentType::Book, "Prestwick at War")
//!         .with_category("Scottish Aviation"),
//! ];
//! let graph = RelationshipGraph::build(nodes, 0.3, &ScoreWeights::default(), &[]);
//!
//! assert_eq!(graph.stats().total_relationships, 1);
//! assert_eq!(graph.relationships("a")[0].target_id, "b");
//! ```

use crate::node::{ContentNode, NodeStore};
use crate::score::{relevance, RelationshipType, ScoreWeights};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mutable usage counters attached to an edge when it is read back out.
///
/// Stored edges carry zeroed metadata; the engine merges live tracker
/// counts into the copies it returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// Suggestion clicks reported for this edge.
    pub click_count: u64,
    /// Suggestion impressions reported for this edge.
    pub impressions: u64,
    /// Time of the most recent interaction, if any.
    pub last_accessed: Option<SystemTime>,
}

/// A scored, directed edge record. Every logical edge exists as two records,
/// one per endpoint, with `strength` identical in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Endpoint this record is indexed under.
    pub source_id: String,
    /// The other endpoint.
    pub target_id: String,
    /// Symmetric strength in [0, 1], at or above the configured floor.
    pub strength: f32,
    /// Dominant-signal classification (display/analytics only).
    pub relationship_type: RelationshipType,
    /// Overlapping tokens justifying the edge, capped for display.
    pub keywords: Vec<String>,
    /// Usage counters, merged in at read time.
    #[serde(default)]
    pub metadata: RelationshipMetadata,
}

/// Aggregate graph shape, returned by [`RelationshipGraph::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Nodes in the catalog.
    pub total_content_nodes: usize,
    /// Undirected edge count.
    pub total_relationships: usize,
    /// Mean degree over all nodes (0.0 for an empty catalog).
    pub average_relationships_per_node: f64,
}

/// Immutable relevance graph over a loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    nodes: NodeStore,
    adjacency: HashMap<String, Vec<Relationship>>,
    edge_count: usize,
}

impl RelationshipGraph {
    /// Build the graph from a node list.
    ///
    /// Duplicate node ids resolve last-write-wins (see [`NodeStore`]).
    /// Malformed or missing optional fields never fail the build; they just
    /// contribute zero signal. An edge is stored iff its strength is at
    /// least `min_strength`; self-edges are never considered.
    #[must_use]
    pub fn build(
        nodes: Vec<ContentNode>,
        min_strength: f32,
        weights: &ScoreWeights,
        domain_terms: &[String],
    ) -> Self {
        let store = NodeStore::from_nodes(nodes);
        let mut sorted: Vec<&ContentNode> = store.iter().collect();
        sorted.sort_unstable_by(|x, y| x.id.cmp(&y.id));

        let pairs: Vec<(&ContentNode, &ContentNode)> = {
            let mut out = Vec::new();
            for (i, &a) in sorted.iter().enumerate() {
                for &b in &sorted[i + 1..] {
                    out.push((a, b));
                }
            }
            out
        };

        // Pure pairwise scoring; pair order is already deterministic, and
        // the parallel path preserves it through collect.
        #[cfg(feature = "parallel")]
        let scored: Vec<_> = pairs
            .par_iter()
            .map(|&(a, b)| (a, b, relevance(a, b, weights, domain_terms)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let scored: Vec<_> = pairs
            .iter()
            .map(|&(a, b)| (a, b, relevance(a, b, weights, domain_terms)))
            .collect();

        let mut adjacency: HashMap<String, Vec<Relationship>> = HashMap::new();
        let mut edge_count = 0usize;
        for (a, b, score) in scored {
            if score.strength < min_strength {
                continue;
            }
            edge_count += 1;
            for (src, dst) in [(a, b), (b, a)] {
                adjacency
                    .entry(src.id.clone())
                    .or_default()
                    .push(Relationship {
                        source_id: src.id.clone(),
                        target_id: dst.id.clone(),
                        strength: score.strength,
                        relationship_type: score.relationship_type,
                        keywords: score.matched_keywords.clone(),
                        metadata: RelationshipMetadata::default(),
                    });
            }
        }

        Self {
            nodes: store,
            adjacency,
            edge_count,
        }
    }

    /// All edges touching `id`, unsorted. Empty for unknown ids — a missing
    /// node means "no suggestions", never an error.
    #[must_use]
    pub fn relationships(&self, id: &str) -> &[Relationship] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    /// Whether an edge exists between the two ids (order-insensitive).
    #[must_use]
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.relationships(a).iter().any(|r| r.target_id == b)
    }

    /// All catalog nodes, sorted by id for stable output.
    #[must_use]
    pub fn all_nodes(&self) -> Vec<&ContentNode> {
        let mut out: Vec<&ContentNode> = self.nodes.iter().collect();
        out.sort_unstable_by(|x, y| x.id.cmp(&y.id));
        out
    }

    /// Aggregate shape of the graph.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let n = self.nodes.len();
        let average = if n == 0 {
            0.0
        } else {
            // Each undirected edge contributes degree to both endpoints.
            (self.edge_count * 2) as f64 / n as f64
        };
        GraphStats {
            total_content_nodes: n,
            total_relationships: self.edge_count,
            average_relationships_per_node: average,
        }
    }
}

//! Suggestion ranking: from relationships to display-ready links.
//!
//! [`rank`] is a pure read over a built [`RelationshipGraph`]: fetch the
//! source node's edges, apply the caller's context as soft biases, order
//! deterministically, truncate, and shape each survivor into a
//! [`LinkSuggestion`].
//!
//! User preferences BOOST matching targets rather than filtering; user level
//! nudges scores rather than removing entries. Starving a page of results is
//! worse than imperfect ranking.
//!
//! # Examples
//!
//! ```
//! use enlazar::graph::RelationshipGraph;
//! use enlazar::node::{ContentNode, ContentType};
//! use enlazar::score::ScoreWeights;
//! use enlazar::suggest::{rank, SuggestOptions};
//!
//! let nodes = vec![
//!     ContentNode::new("a", ContentType::Book, "Spitfire Women")
//!         .with_category("Scottish Aviation"),
//!     ContentNode::new("b", ContentType::Book, "Prestwick at War")
//!         .with_category("Scottish Aviation"),
//! ];
//! let graph = RelationshipGraph::build(nodes, 0.3, &ScoreWeights::default(), &[]);
//!
//! let suggestions = rank(&graph, "a", &SuggestOptions::default(), 5);
//! assert_eq!(suggestions.len(), 1);
//! assert_eq!(suggestions[0].target_id, "b");
//! ```

use crate::graph::{Relationship, RelationshipGraph};
use crate::node::{ContentNode, ContentType};
use serde::{Deserialize, Serialize};

/// Boost added when a target's tags/category intersect a user preference.
pub const PREFERENCE_BOOST: f32 = 0.15;

/// Penalty applied by the user-level soft bias.
pub const LEVEL_PENALTY: f32 = 0.1;

/// Strength at or above which a suggestion is high priority.
pub const HIGH_PRIORITY_FLOOR: f32 = 0.7;

/// Strength at or above which a suggestion is medium priority.
pub const MEDIUM_PRIORITY_FLOOR: f32 = 0.45;

/// Anchor text used when a target has no title.
const FALLBACK_ANCHOR: &str = "Related content";

/// Reader experience level supplied by the caller's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    /// New readers; heavy/technical material is deprioritized.
    Beginner,
    /// No bias either way.
    Intermediate,
    /// Experienced readers; introductory material is deprioritized.
    Advanced,
}

impl UserLevel {
    const fn key(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Display priority derived from the final relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Score at or above [`HIGH_PRIORITY_FLOOR`].
    High,
    /// Score at or above [`MEDIUM_PRIORITY_FLOOR`].
    Medium,
    /// Everything else.
    Low,
}

impl Priority {
    /// Classify a relevance score.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_PRIORITY_FLOOR {
            Self::High
        } else if score >= MEDIUM_PRIORITY_FLOOR {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Caller-supplied query context.
///
/// `max_suggestions: None` falls back to the engine default. Preferences are
/// free-text topic strings matched case-insensitively against target tags
/// and category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestOptions {
    /// Result cap; engine default when absent. Zero is honored and yields
    /// an empty list.
    pub max_suggestions: Option<usize>,
    /// Reader experience level, if the session knows it.
    pub user_level: Option<UserLevel>,
    /// Topic preferences used as ranking boosts, never filters.
    pub user_preferences: Vec<String>,
}

impl SuggestOptions {
    /// Canonical cache-key form: preferences lowercased, sorted and deduped,
    /// so logically equal option sets share one cache entry.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let mut prefs: Vec<String> = self
            .user_preferences
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        prefs.sort_unstable();
        prefs.dedup();

        let max = self
            .max_suggestions
            .map_or_else(|| "default".to_string(), |m| m.to_string());
        let level = self.user_level.map_or("any", UserLevel::key);
        format!("max={max};level={level};prefs={}", prefs.join(","))
    }
}

/// One display-ready recommendation. Ephemeral: computed per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    /// Suggested node id.
    pub target_id: String,
    /// Suggested node type.
    pub target_type: ContentType,
    /// Suggested node title.
    pub target_title: String,
    /// Final score after context adjustments, in [0, 1].
    pub relevance_score: f32,
    /// Short human-readable justification.
    pub context: String,
    /// Anchor text for the rendered link.
    pub suggested_anchor_text: String,
    /// Priority bucket derived from `relevance_score`.
    pub priority: Priority,
}

/// Produce the ranked, bounded suggestion list for `source_id`.
///
/// Guarantees: at most the requested number of items, never contains
/// `source_id`, deterministic for a fixed graph and options. An unknown
/// `source_id` yields an empty list, not an error.
#[must_use]
pub fn rank(
    graph: &RelationshipGraph,
    source_id: &str,
    options: &SuggestOptions,
    default_max: usize,
) -> Vec<LinkSuggestion> {
    let max = options.max_suggestions.unwrap_or(default_max);
    if max == 0 {
        return Vec::new();
    }

    let prefs: Vec<String> = options
        .user_preferences
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    let mut ranked: Vec<(f32, &Relationship)> = graph
        .relationships(source_id)
        .iter()
        .filter_map(|edge| {
            let target = graph.node(&edge.target_id)?;
            let mut score = edge.strength;
            if preference_hit(&prefs, target) {
                score += PREFERENCE_BOOST;
            }
            score -= level_penalty(options.user_level, target);
            Some((score.clamp(0.0, 1.0), edge))
        })
        .collect();

    // Strength descending, target id ascending: total order, no hidden
    // randomness.
    ranked.sort_unstable_by(|(sa, ea), (sb, eb)| {
        sb.total_cmp(sa).then_with(|| ea.target_id.cmp(&eb.target_id))
    });
    ranked.truncate(max);

    ranked
        .into_iter()
        .filter_map(|(score, edge)| {
            let target = graph.node(&edge.target_id)?;
            let anchor = if target.title.trim().is_empty() {
                FALLBACK_ANCHOR.to_string()
            } else {
                target.title.clone()
            };
            let context = if edge.keywords.is_empty() {
                edge.relationship_type.label().to_string()
            } else {
                format!(
                    "{}: {}",
                    edge.relationship_type.label(),
                    edge.keywords.join(", ")
                )
            };
            Some(LinkSuggestion {
                target_id: edge.target_id.clone(),
                target_type: target.content_type,
                target_title: target.title.clone(),
                relevance_score: score,
                context,
                suggested_anchor_text: anchor,
                priority: Priority::from_score(score),
            })
        })
        .collect()
}

/// Whether any preference string intersects the target's tags or category
/// (substring, both directions). Preferences are lowercased by the caller;
/// tags and category are stored lowercase.
fn preference_hit(prefs: &[String], target: &ContentNode) -> bool {
    if prefs.is_empty() {
        return false;
    }
    let category = &target.category;
    prefs.iter().any(|pref| {
        (!category.is_empty() && (category.contains(pref) || pref.contains(category)))
            || target
                .tags
                .iter()
                .any(|tag| tag.contains(pref) || pref.contains(tag))
    })
}

/// Soft level bias: beginners see advanced/technical targets later, advanced
/// readers see introductory targets later. Nothing is ever removed.
fn level_penalty(level: Option<UserLevel>, target: &ContentNode) -> f32 {
    let Some(level) = level else { return 0.0 };
    let tagged = |needles: &[&str]| {
        target
            .tags
            .iter()
            .any(|tag| needles.iter().any(|n| tag.contains(n)))
    };
    match level {
        UserLevel::Beginner if tagged(&["advanced", "technical"]) => LEVEL_PENALTY,
        UserLevel::Advanced if tagged(&["beginner", "introduction", "introductory"]) => {
            LEVEL_PENALTY
        }
        _ => 0.0,
    }
}

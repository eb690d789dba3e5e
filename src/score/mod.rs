//! Relevance scoring between content nodes.
//!
//! The scorer is a pure function from two [`ContentNode`]s to a strength in
//! [0, 1] plus the matched tokens that justify it. Three independent signals
//! are each normalized to [0, 1] and combined with configurable weights:
//!
//! 1. **Category match** — primary categories equal or one contains the other
//!    (case-insensitive, checked in both directions).
//! 2. **Keyword overlap** — each node's keywords and tags checked against the
//!    other node's title and token sets; the two directional ratios are
//!    averaged so the result is symmetric by construction.
//! 3. **Domain-term bonus** — a curated term list (recurring proper nouns in
//!    the catalog); a term counts when both nodes' searchable text contains it.
//!
//! Hard contracts: `relevance(a, b) == relevance(b, a)` for all inputs, more
//! overlapping evidence never lowers strength, and strength is clamped to
//! [0, 1]. Exact weights are tuning, not correctness.
//!
//! # Examples
//!
//! ```
//! use enlazar::node::{ContentNode, ContentType};
//! use enlazar::score::{relevance, ScoreWeights};
//!
//! let a = ContentNode::new("a", ContentType::Book, "Spitfire Women")
//!     .with_category("Scottish Aviation")
//!     .with_keywords(["spitfire", "pilots"]);
//! let b = ContentNode::new("b", ContentType::Book, "Spitfire Pilots of WW2")
//!     .with_category("Scottish Aviation")
//!     .with_keywords(["spitfire", "raf"]);
//!
//! let score = relevance(&a, &b, &ScoreWeights::default(), &[]);
//! assert!(score.strength > 0.5);
//! assert!(score.matched_keywords.contains(&"spitfire".to_string()));
//! ```

use crate::node::ContentNode;
use crate::error::{EnlazarError, Result};
use serde::{Deserialize, Serialize};

/// Tokens shorter than this are too trivial to count as evidence.
pub const MIN_TOKEN_LEN: usize = 4;

/// At most this many candidate tokens are checked per node, keeping the
/// per-pair cost constant regardless of how keyword-heavy a node is.
pub const MAX_CANDIDATE_TOKENS: usize = 12;

/// Matched tokens stored on an edge are capped to this display count.
pub const MAX_EDGE_KEYWORDS: usize = 5;

/// Dominant signal behind a relationship. Display and analytics grouping
/// only; ranking uses strength alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// Primary categories matched.
    SameCategory,
    /// Keyword evidence between nodes of the same type.
    KeywordOverlap,
    /// The nodes share at least one tag.
    TagOverlap,
    /// Keyword evidence across a book/article boundary.
    CrossType,
}

impl RelationshipType {
    /// Short human-readable label used in suggestion context strings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SameCategory => "same category",
            Self::KeywordOverlap => "keyword overlap",
            Self::TagOverlap => "shared tags",
            Self::CrossType => "related coverage",
        }
    }
}

/// Signal weights. Each must lie in [0, 1] and the sum must not exceed 1,
/// so a fully-matching pair cannot escape the [0, 1] strength range before
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the category-match signal.
    pub category: f32,
    /// Weight of the keyword-overlap signal.
    pub keyword: f32,
    /// Weight of the domain-term bonus.
    pub domain_bonus: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: 0.35,
            keyword: 0.45,
            domain_bonus: 0.20,
        }
    }
}

impl ScoreWeights {
    /// Validate weight ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EnlazarError::InvalidConfig`] when any weight is outside
    /// [0, 1] or the weights sum above 1.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("score_weights.category", self.category),
            ("score_weights.keyword", self.keyword),
            ("score_weights.domain_bonus", self.domain_bonus),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(EnlazarError::InvalidConfig {
                    param: name.to_string(),
                    value: value.to_string(),
                    constraint: "must be within [0, 1]".to_string(),
                });
            }
        }
        let sum = self.category + self.keyword + self.domain_bonus;
        if sum > 1.0 + f32::EPSILON {
            return Err(EnlazarError::InvalidConfig {
                param: "score_weights".to_string(),
                value: sum.to_string(),
                constraint: "weights must sum to at most 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of scoring one node pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceScore {
    /// Combined strength in [0, 1].
    pub strength: f32,
    /// Overlapping tokens justifying the score, sorted, capped to
    /// [`MAX_EDGE_KEYWORDS`].
    pub matched_keywords: Vec<String>,
    /// Dominant signal classification.
    pub relationship_type: RelationshipType,
}

/// Score a pair of distinct nodes.
///
/// Callers exclude identical nodes before invocation; the mapper never scores
/// a node against itself. Missing optional fields contribute zero signal
/// rather than failing.
///
/// `domain_terms` are expected lowercase; non-lowercase entries are folded
/// here so the comparison stays case-insensitive.
#[must_use]
pub fn relevance(
    a: &ContentNode,
    b: &ContentNode,
    weights: &ScoreWeights,
    domain_terms: &[String],
) -> RelevanceScore {
    let category_score = category_match(a, b);

    let (ratio_ab, mut matched) = directional_overlap(a, b);
    let (ratio_ba, matched_back) = directional_overlap(b, a);
    let keyword_score = (ratio_ab + ratio_ba) / 2.0;
    matched.extend(matched_back);

    let bonus_score = domain_bonus(a, b, domain_terms, &mut matched);

    let strength = (weights.category * category_score
        + weights.keyword * keyword_score
        + weights.domain_bonus * bonus_score)
        .clamp(0.0, 1.0);

    // Sorted + deduped so the list is identical regardless of call order.
    matched.sort_unstable();
    matched.dedup();
    matched.truncate(MAX_EDGE_KEYWORDS);

    RelevanceScore {
        strength,
        matched_keywords: matched,
        relationship_type: classify(a, b, category_score > 0.0),
    }
}

/// 1.0 when categories are equal or one contains the other, else 0.0.
/// Containment is checked both ways so the signal is symmetric. Categories
/// are stored lowercase, so no case-folding happens per pair.
fn category_match(a: &ContentNode, b: &ContentNode) -> f32 {
    if a.category.is_empty() || b.category.is_empty() {
        return 0.0;
    }
    if a.category == b.category
        || a.category.contains(&b.category)
        || b.category.contains(&a.category)
    {
        1.0
    } else {
        0.0
    }
}

/// Fraction of `from`'s candidate tokens that match `to`, plus the matches.
fn directional_overlap(from: &ContentNode, to: &ContentNode) -> (f32, Vec<String>) {
    let candidates: Vec<&str> = from
        .keywords
        .iter()
        .chain(from.tags.iter())
        .map(String::as_str)
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .take(MAX_CANDIDATE_TOKENS)
        .collect();
    if candidates.is_empty() {
        return (0.0, Vec::new());
    }

    let target_title = to.title.to_lowercase();
    let mut matched = Vec::new();
    for token in &candidates {
        let hit = target_title.contains(token)
            || to.keywords.iter().any(|k| k == token)
            || to.tags.iter().any(|t| t == token);
        if hit {
            matched.push((*token).to_string());
        }
    }

    let ratio = matched.len() as f32 / candidates.len() as f32;
    (ratio, matched)
}

/// Fraction of domain terms present in both nodes' searchable text.
fn domain_bonus(
    a: &ContentNode,
    b: &ContentNode,
    domain_terms: &[String],
    matched: &mut Vec<String>,
) -> f32 {
    if domain_terms.is_empty() {
        return 0.0;
    }
    let text_a = a.searchable_text();
    let text_b = b.searchable_text();
    let mut hits = 0usize;
    for term in domain_terms {
        let term = term.to_lowercase();
        if term.chars().count() >= MIN_TOKEN_LEN
            && text_a.contains(&term)
            && text_b.contains(&term)
        {
            matched.push(term);
            hits += 1;
        }
    }
    hits as f32 / domain_terms.len() as f32
}

/// Derive the dominant-signal classification. All inputs are symmetric in
/// the pair, so the classification is too.
fn classify(a: &ContentNode, b: &ContentNode, category_hit: bool) -> RelationshipType {
    if category_hit {
        return RelationshipType::SameCategory;
    }
    if a.content_type != b.content_type {
        return RelationshipType::CrossType;
    }
    let shared_tag = a.tags.iter().any(|t| b.tags.contains(t));
    if shared_tag {
        RelationshipType::TagOverlap
    } else {
        RelationshipType::KeywordOverlap
    }
}


#[cfg(test)]
mod proptests;

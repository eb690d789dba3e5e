//! Content node store: normalized catalog metadata.
//!
//! A [`ContentNode`] is one catalog item (book or article) carrying the
//! curator-supplied signals the scorer works from: keywords, tags and a
//! primary category. The [`NodeStore`] holds the full catalog keyed by id
//! for O(1) lookup.
//!
//! # Examples
//!
//! ```
//! use enlazar::node::{ContentNode, ContentType};
//!
//! let node = ContentNode::new("bk-001", ContentType::Book, "Beaufighter Boys")
//!     .with_category("Military Aviation")
//!     .with_keywords(["beaufighter", "RAF", "WW2"])
//!     .with_tags(["aviation", "history"])
//!     .with_url("/books/beaufighter-boys");
//!
//! assert_eq!(node.keywords, vec!["beaufighter", "raf", "ww2"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A book in the catalog.
    Book,
    /// An article or long-form post.
    Article,
}

impl ContentType {
    /// Human-readable label used in suggestion context strings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Article => "article",
        }
    }
}

/// One catalog item with normalized metadata.
///
/// Keywords and tags are normalized to lowercase at construction so scoring
/// never has to case-fold per comparison. Nodes with empty keyword and tag
/// sets are legal but inert: they produce no relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Unique id, stable across rebuilds.
    pub id: String,
    /// Book or article.
    pub content_type: ContentType,
    /// Display title (also mined for keyword matches).
    pub title: String,
    /// Display description; not parsed by the engine.
    #[serde(default)]
    pub description: String,
    /// Curator-supplied lowercase tokens.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Category labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Single primary classification, lowercase.
    #[serde(default)]
    pub category: String,
    /// Publication date, if known. Opaque to the engine.
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Author, if known.
    #[serde(default)]
    pub author: Option<String>,
    /// Canonical link, opaque to the engine.
    #[serde(default)]
    pub url: String,
}

impl ContentNode {
    /// Create a node with the required fields; everything else defaults
    /// to empty/absent and can be filled with the `with_*` chainers.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        content_type: ContentType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type,
            title: title.into(),
            description: String::new(),
            keywords: Vec::new(),
            tags: Vec::new(),
            category: String::new(),
            publish_date: None,
            author: None,
            url: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set keywords, normalizing each to trimmed lowercase.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// Set tags, normalizing each to trimmed lowercase.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// Set the primary category, normalized to trimmed lowercase so the
    /// scorer and ranking comparisons never case-fold per pair.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into().trim().to_lowercase();
        self
    }

    /// Set the publication date.
    #[must_use]
    pub fn with_publish_date(mut self, date: impl Into<String>) -> Self {
        self.publish_date = Some(date.into());
        self
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the canonical URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Re-apply token and category normalization in place.
    ///
    /// The `with_*` chainers already normalize, but nodes can also arrive
    /// through deserialization or struct literals; the store runs this on
    /// every ingested node so all paths behave identically.
    fn normalize(&mut self) {
        self.category = self.category.trim().to_lowercase();
        normalize_tokens(&mut self.keywords);
        normalize_tokens(&mut self.tags);
    }

    /// Lowercased text the scorer searches for keyword and domain-term
    /// matches: title plus keywords plus tags, space-joined.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        for token in self.keywords.iter().chain(self.tags.iter()) {
            text.push(' ');
            text.push_str(token);
        }
        text
    }
}

/// Lowercase and trim a token list in place, dropping empties.
fn normalize_tokens(tokens: &mut Vec<String>) {
    *tokens = tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
}

/// Id-keyed store of the full catalog.
///
/// Duplicate ids are resolved last-write-wins: the later node in the input
/// list replaces the earlier one silently. Callers that need strict
/// uniqueness should deduplicate before loading.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: HashMap<String, ContentNode>,
}

impl NodeStore {
    /// Build a store from a node list. Last write wins on duplicate ids.
    /// Every node is (re-)normalized on the way in, so deserialized nodes
    /// behave the same as builder-constructed ones.
    #[must_use]
    pub fn from_nodes(nodes: Vec<ContentNode>) -> Self {
        let mut map = HashMap::with_capacity(nodes.len());
        for mut node in nodes {
            node.normalize();
            map.insert(node.id.clone(), node);
        }
        Self { nodes: map }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in ascending order, for callers that need a stable
    /// traversal regardless of `HashMap` iteration order.
    #[must_use]
    pub fn ids_sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over stored nodes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }
}

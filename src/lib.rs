//! Enlazar: content relationship graph and link recommendation engine.
//!
//! Enlazar builds an in-memory relevance graph over a bounded catalog of
//! content items (books and articles), scores pairwise relatedness, caches
//! ranked results, and emits "you might also like" link suggestions filtered
//! by caller-supplied context (reader level, topic preferences).
//!
//! It is an embedded library: the host supplies the node list once at
//! startup and renders whatever comes back. There is no I/O, no persistence
//! and no wire protocol.
//!
//! # Quick Start
//!
//! ```
//! use enlazar::prelude::*;
//!
//! let engine = ContentLinkEngine::new(EngineConfig::default()).expect("valid config");
//!
//! engine.initialize(vec![
//!     ContentNode::new("bk-1", ContentType::Book, "Spitfire Women")
//!         .with_category("Scottish Aviation")
//!         .with_keywords(["spitfire", "pilots"]),
//!     ContentNode::new("bk-2", ContentType::Book, "Prestwick at War")
//!         .with_category("Scottish Aviation")
//!         .with_keywords(["prestwick", "airfield"]),
//! ]);
//!
//! let suggestions = engine.get_suggestions("bk-1", &SuggestOptions::default());
//! assert_eq!(suggestions[0].target_id, "bk-2");
//!
//! engine.track_interaction(EventType::Click, "bk-1", "bk-2");
//! assert_eq!(engine.analytics(10).top_performing_links[0].clicks, 1);
//! ```
//!
//! # Modules
//!
//! - [`node`]: Content node store (normalized catalog metadata)
//! - [`score`]: Pure pairwise relevance scoring
//! - [`graph`]: Relationship mapper (sparse scored edge set)
//! - [`suggest`]: Ranked, bounded, context-filtered suggestions
//! - [`track`]: Interaction tracking and click-through analytics
//! - [`cache`]: Bounded LRU suggestion cache
//! - [`engine`]: Configuration and the engine facade

pub mod cache;
pub mod engine;
pub mod error;
pub mod graph;
pub mod node;
pub mod prelude;
pub mod score;
pub mod suggest;
pub mod track;

pub use engine::{Analytics, ContentLinkEngine, EngineConfig};
pub use error::{EnlazarError, Result};

//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use enlazar::prelude::*;
//! ```

pub use crate::cache::CacheStats;
pub use crate::engine::{Analytics, ContentLinkEngine, EngineConfig};
pub use crate::error::{EnlazarError, Result};
pub use crate::graph::{GraphStats, Relationship};
pub use crate::node::{ContentNode, ContentType};
pub use crate::score::{RelationshipType, ScoreWeights};
pub use crate::suggest::{LinkSuggestion, Priority, SuggestOptions, UserLevel};
pub use crate::track::{EventType, LinkPerformance};

//! Custom score overrides and their persistence.
//!
//! Overrides are read once per analysis run and never mutated by the
//! engine; callers reload them when the store changes.

mod resolver;
mod set;
mod store;

pub use resolver::{category_price_factor, EffectiveScoreResolver, ScoreField};
pub use set::{OverrideSet, ScoreOverride, OVERRIDES_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

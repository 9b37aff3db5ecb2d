//! Collection types used throughout the front end.

use rustc_hash::FxBuildHasher;

/// An insertion-ordered map with fast FxHash lookups.
/// Used for name tables whose iteration order must follow the source.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

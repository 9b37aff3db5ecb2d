//! ember_core: Core utilities for the ember compiler front end.
//!
//! Provides source locations, line maps, the per-parse arena, string
//! interning, and the hash collections shared by every other crate.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::Arena;
pub use intern::{InternedString, StringInterner};
pub use text::{LineMap, SourceLocation};

//! Arena allocation for syntax trees.
//!
//! Every AST node produced by one parse is allocated from a single bump
//! arena, so the whole tree is released in one step when the arena drops.

use bumpalo::Bump;

/// A bump arena owning all nodes of one parse.
///
/// Nodes never run destructors: they must only own arena memory
/// (references and slices into this arena, or `Copy` data).
pub struct Arena {
    bump: Bump,
}

impl Arena {
    /// Create a new arena with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Allocate a value in the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Move the elements of `items` into an arena slice.
    #[inline]
    pub fn alloc_slice<T>(&self, items: Vec<T>) -> &[T] {
        if items.is_empty() {
            return &[];
        }
        self.bump.alloc_slice_fill_iter(items)
    }

    /// Allocate a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_slice_keeps_order() {
        let arena = Arena::new();
        let slice = arena.alloc_slice(vec![3, 1, 2]);
        assert_eq!(slice, &[3, 1, 2]);
    }

    #[test]
    fn test_alloc_empty_slice() {
        let arena = Arena::new();
        let slice: &[u32] = arena.alloc_slice(Vec::new());
        assert!(slice.is_empty());
    }

    #[test]
    fn test_alloc_str_copies() {
        let arena = Arena::new();
        let owned = String::from("a\tb");
        let s = arena.alloc_str(&owned);
        drop(owned);
        assert_eq!(s, "a\tb");
    }
}

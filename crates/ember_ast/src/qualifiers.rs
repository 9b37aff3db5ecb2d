//! Declaration qualifiers (`mut`, `volatile`, `comptime`, `extern`, `inline`).

use bitflags::bitflags;
use ember_core::text::SourceLocation;

use crate::token_kind::Keyword;

bitflags! {
    /// Presence set of the location-carrying qualifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct QualifierFlags: u8 {
        const MUTABLE  = 1 << 0;
        const VOLATILE = 1 << 1;
        const COMPTIME = 1 << 2;
        const EXTERN   = 1 << 3;
    }
}

impl QualifierFlags {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Mut => Some(QualifierFlags::MUTABLE),
            Keyword::Volatile => Some(QualifierFlags::VOLATILE),
            Keyword::Comptime => Some(QualifierFlags::COMPTIME),
            Keyword::Extern => Some(QualifierFlags::EXTERN),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self.bits().trailing_zeros() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InlinePolicy {
    #[default]
    None,
    /// `inline` was written.
    Default,
}

/// A set of qualifiers, each remembering where it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    flags: QualifierFlags,
    locations: [SourceLocation; 4],
    inline_policy: InlinePolicy,
    inline_loc: SourceLocation,
}

impl Default for Qualifiers {
    fn default() -> Self {
        Self {
            flags: QualifierFlags::empty(),
            locations: [SourceLocation::INVALID; 4],
            inline_policy: InlinePolicy::None,
            inline_loc: SourceLocation::INVALID,
        }
    }
}

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn flags(&self) -> QualifierFlags {
        self.flags
    }

    #[inline]
    pub fn contains(&self, flag: QualifierFlags) -> bool {
        self.flags.contains(flag)
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.contains(QualifierFlags::MUTABLE)
    }

    #[inline]
    pub fn is_volatile(&self) -> bool {
        self.contains(QualifierFlags::VOLATILE)
    }

    #[inline]
    pub fn is_comptime(&self) -> bool {
        self.contains(QualifierFlags::COMPTIME)
    }

    #[inline]
    pub fn is_extern(&self) -> bool {
        self.contains(QualifierFlags::EXTERN)
    }

    #[inline]
    pub fn inline_policy(&self) -> InlinePolicy {
        self.inline_policy
    }

    /// Location of a single flag's keyword, if present.
    pub fn location_of(&self, flag: QualifierFlags) -> Option<SourceLocation> {
        if flag.bits().count_ones() != 1 || !self.contains(flag) {
            return None;
        }
        Some(self.locations[flag.slot()])
    }

    pub fn inline_loc(&self) -> Option<SourceLocation> {
        match self.inline_policy {
            InlinePolicy::None => None,
            InlinePolicy::Default => Some(self.inline_loc),
        }
    }

    /// Record a single flag. Returns false if it was already present; the
    /// first location is kept.
    pub fn set(&mut self, flag: QualifierFlags, loc: SourceLocation) -> bool {
        debug_assert_eq!(flag.bits().count_ones(), 1);
        if self.contains(flag) {
            return false;
        }
        self.flags.insert(flag);
        self.locations[flag.slot()] = loc;
        true
    }

    /// Returns false if an inline policy was already set.
    pub fn set_inline_policy(&mut self, policy: InlinePolicy, loc: SourceLocation) -> bool {
        let fresh = self.inline_policy == InlinePolicy::None;
        if fresh {
            self.inline_policy = policy;
            self.inline_loc = loc;
        }
        fresh
    }

    /// Record the qualifier a keyword stands for. Returns `None` if the
    /// keyword is not a qualifier, otherwise whether it was new.
    pub fn apply_keyword(&mut self, keyword: Keyword, loc: SourceLocation) -> Option<bool> {
        if keyword == Keyword::Inline {
            return Some(self.set_inline_policy(InlinePolicy::Default, loc));
        }
        QualifierFlags::from_keyword(keyword).map(|flag| self.set(flag, loc))
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.inline_policy == InlinePolicy::None
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Union with `other`. Flags present in `other` take its locations.
    pub fn merge(&mut self, other: &Qualifiers) {
        for flag in other.flags.iter() {
            self.flags.insert(flag);
            self.locations[flag.slot()] = other.locations[flag.slot()];
        }
        if other.inline_policy != InlinePolicy::None {
            self.inline_policy = other.inline_policy;
            self.inline_loc = other.inline_loc;
        }
    }

    /// The qualifier keywords in canonical order.
    pub fn keywords(&self) -> Vec<Keyword> {
        let mut result = Vec::new();
        if self.is_mutable() {
            result.push(Keyword::Mut);
        }
        if self.is_volatile() {
            result.push(Keyword::Volatile);
        }
        if self.is_comptime() {
            result.push(Keyword::Comptime);
        }
        if self.is_extern() {
            result.push(Keyword::Extern);
        }
        if self.inline_policy == InlinePolicy::Default {
            result.push(Keyword::Inline);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(index: u32) -> SourceLocation {
        SourceLocation::new(index, 1, index + 1)
    }

    #[test]
    fn test_set_records_first_location() {
        let mut q = Qualifiers::new();
        assert!(q.is_empty());
        assert!(q.set(QualifierFlags::MUTABLE, loc(0)));
        assert!(!q.set(QualifierFlags::MUTABLE, loc(4)));
        assert!(q.is_mutable());
        assert!(!q.is_volatile());
        assert_eq!(q.location_of(QualifierFlags::MUTABLE), Some(loc(0)));
        assert_eq!(q.location_of(QualifierFlags::VOLATILE), None);
    }

    #[test]
    fn test_apply_keyword() {
        let mut q = Qualifiers::new();
        assert_eq!(q.apply_keyword(Keyword::Comptime, loc(0)), Some(true));
        assert_eq!(q.apply_keyword(Keyword::Inline, loc(9)), Some(true));
        assert_eq!(q.apply_keyword(Keyword::Inline, loc(16)), Some(false));
        assert_eq!(q.apply_keyword(Keyword::Let, loc(20)), None);
        assert_eq!(q.inline_policy(), InlinePolicy::Default);
        assert_eq!(q.inline_loc(), Some(loc(9)));
        assert_eq!(q.keywords(), vec![Keyword::Comptime, Keyword::Inline]);
    }

    #[test]
    fn test_merge_is_union() {
        let mut lhs = Qualifiers::new();
        lhs.set(QualifierFlags::MUTABLE, loc(0));
        let mut rhs = Qualifiers::new();
        rhs.set(QualifierFlags::VOLATILE, loc(5));
        rhs.set(QualifierFlags::MUTABLE, loc(12));

        lhs.merge(&rhs);
        assert!(lhs.is_mutable());
        assert!(lhs.is_volatile());
        assert_eq!(lhs.location_of(QualifierFlags::MUTABLE), Some(loc(12)));
        assert_eq!(lhs.location_of(QualifierFlags::VOLATILE), Some(loc(5)));
    }

    #[test]
    fn test_clear() {
        let mut q = Qualifiers::new();
        q.set(QualifierFlags::EXTERN, loc(3));
        q.clear();
        assert!(q.is_empty());
        assert!(q.location_of(QualifierFlags::EXTERN).is_none());
    }
}

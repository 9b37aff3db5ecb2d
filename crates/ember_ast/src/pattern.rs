//! Destructuring and binding patterns.
//!
//! `let [a, 2: b, ...rest] = xs;` and `let {x, y: [p, q]} = point;` build a
//! tree of [`BindingPattern`]s. Array items may carry an index expression,
//! object fields a key, and every level carries its own qualifiers.

use ember_core::text::SourceLocation;

use crate::node::{Expr, Name, NodeList};
use crate::qualifiers::Qualifiers;

#[derive(Debug)]
pub enum BindingPattern<'a> {
    Identifier(Name<'a>),
    Array(NodeList<'a, ArrayBindingItem<'a>>),
    Object(NodeList<'a, ObjectBindingField<'a>>),
    /// `...name` captures the remainder.
    Spread(Name<'a>),
}

impl<'a> BindingPattern<'a> {
    /// Every name this pattern binds, depth-first in source order.
    pub fn collect_names(&self, out: &mut Vec<Name<'a>>) {
        match self {
            BindingPattern::Identifier(name) | BindingPattern::Spread(name) => out.push(*name),
            BindingPattern::Array(items) => {
                for item in items.iter() {
                    item.pattern.collect_names(out);
                }
            }
            BindingPattern::Object(fields) => {
                for field in fields.iter() {
                    field.pattern.collect_names(out);
                }
            }
        }
    }
}

/// `[quals] [index:] pattern`
#[derive(Debug)]
pub struct ArrayBindingItem<'a> {
    pub loc: SourceLocation,
    pub index: Option<&'a Expr<'a>>,
    pub qualifiers: Qualifiers,
    pub pattern: BindingPattern<'a>,
}

/// `[quals] key`, `[quals] key: pattern`, or `...name`
#[derive(Debug)]
pub struct ObjectBindingField<'a> {
    pub loc: SourceLocation,
    /// `None` for a spread field.
    pub key: Option<Name<'a>>,
    pub qualifiers: Qualifiers,
    pub pattern: BindingPattern<'a>,
}

impl<'a> ObjectBindingField<'a> {
    /// Whether the field was written as a bare `key`.
    pub fn is_shorthand(&self) -> bool {
        match (&self.key, &self.pattern) {
            (Some(key), BindingPattern::Identifier(name)) => key.loc == name.loc,
            _ => false,
        }
    }
}

/// Names bound by a list of array items.
pub fn array_binding_names<'a>(items: &[ArrayBindingItem<'a>]) -> Vec<Name<'a>> {
    let mut out = Vec::new();
    for item in items {
        item.pattern.collect_names(&mut out);
    }
    out
}

/// Names bound by a list of object fields.
pub fn object_binding_names<'a>(fields: &[ObjectBindingField<'a>]) -> Vec<Name<'a>> {
    let mut out = Vec::new();
    for field in fields {
        field.pattern.collect_names(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str, index: u32) -> Name<'_> {
        Name::new(text, SourceLocation::new(index, 1, index + 1))
    }

    #[test]
    fn test_collect_names_recurses() {
        let inner = [ObjectBindingField {
            loc: SourceLocation::start(),
            key: Some(name("x", 5)),
            qualifiers: Qualifiers::new(),
            pattern: BindingPattern::Identifier(name("x", 5)),
        }];
        let items = [
            ArrayBindingItem {
                loc: SourceLocation::start(),
                index: None,
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Identifier(name("a", 1)),
            },
            ArrayBindingItem {
                loc: SourceLocation::start(),
                index: None,
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Object(&inner),
            },
            ArrayBindingItem {
                loc: SourceLocation::start(),
                index: None,
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Spread(name("rest", 12)),
            },
        ];
        let names: Vec<_> = array_binding_names(&items).iter().map(|n| n.text).collect();
        assert_eq!(names, vec!["a", "x", "rest"]);
        assert!(inner[0].is_shorthand());
    }
}

//! ember_ast: Abstract Syntax Tree definitions for the ember language.
//!
//! This crate defines the token vocabulary (`TokenKind`, `Keyword`), the
//! node kind tags with their family ranges, and every node type. Nodes are
//! grouped into the closed families [`Stmt`], [`Expr`], and [`Decl`];
//! [`Node::dyn_cast`] recovers a concrete type from any node handle.

pub mod cast;
pub mod literal;
pub mod node;
pub mod node_kind;
pub mod operator;
pub mod pattern;
pub mod qualifiers;
pub mod token_kind;
pub mod visitor;

// Re-export key types
pub use cast::{AstNode, Node};
pub use literal::*;
pub use node::*;
pub use node_kind::NodeKind;
pub use operator::{AssignmentOperator, BinaryOperator, UnaryOperator};
pub use pattern::{ArrayBindingItem, BindingPattern, ObjectBindingField};
pub use qualifiers::{InlinePolicy, QualifierFlags, Qualifiers};
pub use token_kind::{Keyword, TokenKind};

//! Kind-checked downcasts from a base node handle.
//!
//! Any holder of a [`Node`] can recover a concrete node type with
//! [`Node::dyn_cast`]. The cast first consults the type's `classof` range
//! check on the node's kind tag and only then matches the payload, so a
//! cast never succeeds for a kind outside the expected range.

use ember_core::text::SourceLocation;

use crate::node::*;
use crate::node_kind::NodeKind;

/// A reference to any AST node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Stmt(&'a Stmt<'a>),
    Expr(&'a Expr<'a>),
    Decl(&'a Decl<'a>),
}

impl<'a> Node<'a> {
    /// Unwrap family wrappers so the handle refers to the innermost node:
    /// `Stmt::Expr(e)` becomes `Node::Expr(e)`, `Expr::Decl(d)` becomes `Node::Decl(d)`.
    pub fn normalized(self) -> Node<'a> {
        match self {
            Node::Stmt(&Stmt::Expr(e)) => Node::Expr(e).normalized(),
            Node::Stmt(&Stmt::Decl(d)) => Node::Decl(d),
            Node::Expr(&Expr::Decl(d)) => Node::Decl(d),
            other => other,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Node::Stmt(s) => s.kind(),
            Node::Expr(e) => e.kind(),
            Node::Decl(d) => d.kind(),
        }
    }

    pub fn loc(self) -> SourceLocation {
        match self {
            Node::Stmt(s) => s.loc(),
            Node::Expr(e) => e.loc(),
            Node::Decl(d) => d.loc(),
        }
    }

    #[inline]
    pub fn isa<T: AstNode<'a>>(self) -> bool {
        T::classof(self.kind())
    }

    pub fn dyn_cast<T: AstNode<'a>>(self) -> Option<&'a T> {
        if !T::classof(self.kind()) {
            return None;
        }
        T::from_node(self.normalized())
    }

    /// The declaration behind this node if its kind is in the named range.
    pub fn as_named_decl(self) -> Option<&'a Decl<'a>> {
        if !self.kind().is_named_declaration() {
            return None;
        }
        match self.normalized() {
            Node::Decl(d) => Some(d),
            _ => None,
        }
    }
}

impl<'a> From<&'a Stmt<'a>> for Node<'a> {
    fn from(stmt: &'a Stmt<'a>) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr<'a>> for Node<'a> {
    fn from(expr: &'a Expr<'a>) -> Self {
        Node::Expr(expr)
    }
}

impl<'a> From<&'a Decl<'a>> for Node<'a> {
    fn from(decl: &'a Decl<'a>) -> Self {
        Node::Decl(decl)
    }
}

/// A concrete or family node type recoverable from a [`Node`].
pub trait AstNode<'a>: Sized + 'a {
    /// Whether a node of `kind` has this type.
    fn classof(kind: NodeKind) -> bool;

    /// Payload match on a normalized node. Callers go through [`Node::dyn_cast`].
    fn from_node(node: Node<'a>) -> Option<&'a Self>;
}

macro_rules! stmt_node {
    ($lt:lifetime, $ty:ty, $variant:ident, $kind:ident) => {
        impl<$lt> AstNode<$lt> for $ty {
            #[inline]
            fn classof(kind: NodeKind) -> bool {
                kind == NodeKind::$kind
            }

            fn from_node(node: Node<$lt>) -> Option<&$lt Self> {
                match node {
                    Node::Stmt(&Stmt::$variant(n)) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! expr_node {
    ($lt:lifetime, $ty:ty, $variant:ident, $kind:ident) => {
        impl<$lt> AstNode<$lt> for $ty {
            #[inline]
            fn classof(kind: NodeKind) -> bool {
                kind == NodeKind::$kind
            }

            fn from_node(node: Node<$lt>) -> Option<&$lt Self> {
                match node {
                    Node::Expr(Expr::$variant(n)) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! decl_node {
    ($lt:lifetime, $ty:ty, $variant:ident, $classof:expr) => {
        impl<$lt> AstNode<$lt> for $ty {
            #[inline]
            fn classof(kind: NodeKind) -> bool {
                let check: fn(NodeKind) -> bool = $classof;
                check(kind)
            }

            fn from_node(node: Node<$lt>) -> Option<&$lt Self> {
                match node {
                    Node::Decl(Decl::$variant(n)) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

stmt_node!('a, CompoundStmt<'a>, Compound, CompoundStmt);
stmt_node!('a, ReturnStmt<'a>, Return, ReturnStmt);

expr_node!('a, NumberLiteral<'a>, Number, NumberLiteral);
expr_node!('a, CharLiteral<'a>, Char, CharLiteral);
expr_node!('a, StringLiteral<'a>, String, StringLiteral);
expr_node!('a, DeclRefExpr<'a>, DeclRef, DeclRef);
expr_node!('a, DotIdentifierExpr<'a>, DotIdentifier, DotIdentifier);
expr_node!('a, ParenExpr<'a>, Paren, Paren);
expr_node!('a, UnaryOperation<'a>, Unary, UnaryOperation);
expr_node!('a, BinaryOperation<'a>, Binary, BinaryOperation);
expr_node!('a, AssignmentExpr<'a>, Assignment, Assignment);
expr_node!('a, CastExpr<'a>, Cast, Cast);
expr_node!('a, FieldExpr<'a>, Field, Field);
expr_node!('a, DerefExpr<'a>, Deref, Deref);
expr_node!('a, OptionalUnwrapExpr<'a>, OptionalUnwrap, OptionalUnwrap);
expr_node!('a, ArraySubscriptExpr<'a>, Subscript, ArraySubscript);
expr_node!('a, CallExpr<'a>, Call, Call);
expr_node!('a, ArrayLiteral<'a>, ArrayLiteral, ArrayLiteral);
expr_node!('a, ArrayTypeExpr<'a>, ArrayType, ArrayType);
expr_node!('a, OptionalTypeExpr<'a>, OptionalType, OptionalType);
expr_node!('a, FunctionTypeExpr<'a>, FunctionType, FunctionType);
expr_node!('a, CaptureAllByRefExpr, CaptureAllByRef, CaptureAllByRef);
expr_node!('a, CaptureAllByValueExpr, CaptureAllByValue, CaptureAllByValue);
expr_node!('a, IfExpr<'a>, If, IfExpr);

decl_node!('a, ParamVarDecl<'a>, Param, |k| k == NodeKind::ParamVarDecl);
decl_node!('a, FieldDecl<'a>, Field, |k| {
    k == NodeKind::FieldDecl || k == NodeKind::OptionalFieldDecl
});
decl_node!('a, ArrowFunctionDecl<'a>, ArrowFunction, |k| k == NodeKind::ArrowFunctionDecl);
decl_node!('a, ClosureDecl<'a>, Closure, |k| k == NodeKind::ClosureDecl);
decl_node!('a, ArrayDestructuredVarDecl<'a>, ArrayDestructure, |k| {
    k == NodeKind::ArrayDestructuredVarDecl
});
decl_node!('a, ObjectDestructuredVarDecl<'a>, ObjectDestructure, |k| {
    k == NodeKind::ObjectDestructuredVarDecl
});
decl_node!('a, RecordDecl<'a>, Record, NodeKind::is_record_declaration);
decl_node!('a, VarDecl<'a>, Var, |k| k == NodeKind::VarDecl);
decl_node!('a, FunctionDecl<'a>, Function, |k| k == NodeKind::FunctionDecl);

impl<'a> AstNode<'a> for Stmt<'a> {
    fn classof(kind: NodeKind) -> bool {
        kind.is_statement()
    }

    fn from_node(node: Node<'a>) -> Option<&'a Self> {
        match node {
            Node::Stmt(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> AstNode<'a> for Expr<'a> {
    fn classof(kind: NodeKind) -> bool {
        kind.is_expression()
    }

    fn from_node(node: Node<'a>) -> Option<&'a Self> {
        match node {
            Node::Expr(e) => Some(e),
            _ => None,
        }
    }
}

impl<'a> AstNode<'a> for Decl<'a> {
    fn classof(kind: NodeKind) -> bool {
        kind.is_declaration()
    }

    fn from_node(node: Node<'a>) -> Option<&'a Self> {
        match node {
            Node::Decl(d) => Some(d),
            _ => None,
        }
    }
}

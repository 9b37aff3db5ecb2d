//! AST node definitions.
//!
//! Nodes are arena-allocated and immutable once built; children are `&'a`
//! references into the same arena. Each family is a closed enum
//! ([`Stmt`], [`Expr`], [`Decl`]) whose variants carry the concrete node
//! structs. The one exception to immutability is [`FunctionDecl::set_body`],
//! which attaches a body to a declaration skeleton created before the body
//! was parsed.

use std::cell::Cell;

use ember_core::text::SourceLocation;

use crate::literal::{LiteralError, NumberError, ParsedNumber};
use crate::node_kind::NodeKind;
use crate::operator::{AssignmentOperator, BinaryOperator, UnaryOperator};
use crate::pattern::{ArrayBindingItem, ObjectBindingField};
use crate::qualifiers::Qualifiers;

/// A name as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name<'a> {
    pub text: &'a str,
    pub loc: SourceLocation,
}

impl<'a> Name<'a> {
    pub fn new(text: &'a str, loc: SourceLocation) -> Self {
        Self { text, loc }
    }
}

pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Stmt<'a> {
    Expr(&'a Expr<'a>),
    Decl(&'a Decl<'a>),
    Compound(&'a CompoundStmt<'a>),
    Return(&'a ReturnStmt<'a>),
}

impl<'a> Stmt<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::Expr(e) => e.kind(),
            Stmt::Decl(d) => d.kind(),
            Stmt::Compound(_) => NodeKind::CompoundStmt,
            Stmt::Return(_) => NodeKind::ReturnStmt,
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Stmt::Expr(e) => e.loc(),
            Stmt::Decl(d) => d.loc(),
            Stmt::Compound(c) => c.loc,
            Stmt::Return(r) => r.loc,
        }
    }

    /// The declaration this statement introduces, if it carries a name.
    pub fn as_named_decl(&self) -> Option<&'a Decl<'a>> {
        match *self {
            Stmt::Decl(d) if d.kind().is_named_declaration() => Some(d),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&'a Expr<'a>> {
        match *self {
            Stmt::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&'a Decl<'a>> {
        match *self {
            Stmt::Decl(d) => Some(d),
            _ => None,
        }
    }
}

/// `{ stmt; ... }`
#[derive(Debug)]
pub struct CompoundStmt<'a> {
    /// Location of `{`, or invalid for a synthesized body.
    pub loc: SourceLocation,
    pub stmts: NodeList<'a, Stmt<'a>>,
}

/// `return [expr]`
#[derive(Debug)]
pub struct ReturnStmt<'a> {
    /// Location of `return`, or invalid when implied by an arrow body.
    pub loc: SourceLocation,
    pub value: Option<&'a Expr<'a>>,
}

impl<'a> ReturnStmt<'a> {
    /// Whether the statement was synthesized around an arrow body.
    pub fn is_implicit(&self) -> bool {
        !self.loc.is_valid()
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expr<'a> {
    Number(NumberLiteral<'a>),
    Char(CharLiteral<'a>),
    String(StringLiteral<'a>),
    DeclRef(DeclRefExpr<'a>),
    DotIdentifier(DotIdentifierExpr<'a>),
    Paren(ParenExpr<'a>),
    Unary(UnaryOperation<'a>),
    Binary(BinaryOperation<'a>),
    Assignment(AssignmentExpr<'a>),
    Cast(CastExpr<'a>),
    Field(FieldExpr<'a>),
    Deref(DerefExpr<'a>),
    OptionalUnwrap(OptionalUnwrapExpr<'a>),
    Subscript(ArraySubscriptExpr<'a>),
    Call(CallExpr<'a>),
    ArrayLiteral(ArrayLiteral<'a>),
    ArrayType(ArrayTypeExpr<'a>),
    OptionalType(OptionalTypeExpr<'a>),
    FunctionType(FunctionTypeExpr<'a>),
    CaptureAllByRef(CaptureAllByRefExpr),
    CaptureAllByValue(CaptureAllByValueExpr),
    If(IfExpr<'a>),
    /// A declaration used in expression position (e.g. `struct { ... }` as a type).
    Decl(&'a Decl<'a>),
}

impl<'a> Expr<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Number(_) => NodeKind::NumberLiteral,
            Expr::Char(_) => NodeKind::CharLiteral,
            Expr::String(_) => NodeKind::StringLiteral,
            Expr::DeclRef(_) => NodeKind::DeclRef,
            Expr::DotIdentifier(_) => NodeKind::DotIdentifier,
            Expr::Paren(_) => NodeKind::Paren,
            Expr::Unary(_) => NodeKind::UnaryOperation,
            Expr::Binary(_) => NodeKind::BinaryOperation,
            Expr::Assignment(_) => NodeKind::Assignment,
            Expr::Cast(_) => NodeKind::Cast,
            Expr::Field(_) => NodeKind::Field,
            Expr::Deref(_) => NodeKind::Deref,
            Expr::OptionalUnwrap(_) => NodeKind::OptionalUnwrap,
            Expr::Subscript(_) => NodeKind::ArraySubscript,
            Expr::Call(_) => NodeKind::Call,
            Expr::ArrayLiteral(_) => NodeKind::ArrayLiteral,
            Expr::ArrayType(_) => NodeKind::ArrayType,
            Expr::OptionalType(_) => NodeKind::OptionalType,
            Expr::FunctionType(_) => NodeKind::FunctionType,
            Expr::CaptureAllByRef(_) => NodeKind::CaptureAllByRef,
            Expr::CaptureAllByValue(_) => NodeKind::CaptureAllByValue,
            Expr::If(_) => NodeKind::IfExpr,
            Expr::Decl(d) => d.kind(),
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Expr::Number(n) => n.loc,
            Expr::Char(n) => n.loc,
            Expr::String(n) => n.loc,
            Expr::DeclRef(n) => n.name.loc,
            Expr::DotIdentifier(n) => n.loc,
            Expr::Paren(n) => n.loc,
            Expr::Unary(n) => n.loc,
            Expr::Binary(n) => n.loc,
            Expr::Assignment(n) => n.loc,
            Expr::Cast(n) => n.loc,
            Expr::Field(n) => n.loc,
            Expr::Deref(n) => n.loc,
            Expr::OptionalUnwrap(n) => n.loc,
            Expr::Subscript(n) => n.loc,
            Expr::Call(n) => n.loc,
            Expr::ArrayLiteral(n) => n.loc,
            Expr::ArrayType(n) => n.loc,
            Expr::OptionalType(n) => n.loc,
            Expr::FunctionType(n) => n.loc,
            Expr::CaptureAllByRef(n) => n.loc,
            Expr::CaptureAllByValue(n) => n.loc,
            Expr::If(n) => n.loc,
            Expr::Decl(d) => d.loc(),
        }
    }

    pub fn as_decl(&self) -> Option<&'a Decl<'a>> {
        match *self {
            Expr::Decl(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, Expr::Assignment(_))
    }

    pub fn is_if(&self) -> bool {
        matches!(self, Expr::If(_))
    }
}

/// An integer or float literal. The decoded value or its error is kept.
#[derive(Debug)]
pub struct NumberLiteral<'a> {
    pub loc: SourceLocation,
    /// The literal text, including any suffix.
    pub text: &'a str,
    /// Type suffix such as `u8` or `s32`.
    pub suffix: Option<&'a str>,
    pub value: Result<ParsedNumber, NumberError>,
}

#[derive(Debug)]
pub struct CharLiteral<'a> {
    pub loc: SourceLocation,
    pub text: &'a str,
    pub value: Result<char, LiteralError>,
}

#[derive(Debug)]
pub struct StringLiteral<'a> {
    pub loc: SourceLocation,
    pub text: &'a str,
    /// Decoded contents with escapes resolved.
    pub value: Result<&'a str, LiteralError>,
}

/// A reference to a declaration by name.
#[derive(Debug)]
pub struct DeclRefExpr<'a> {
    pub name: Name<'a>,
}

/// `.name` with no base expression.
#[derive(Debug)]
pub struct DotIdentifierExpr<'a> {
    pub loc: SourceLocation,
    pub name: Name<'a>,
}

#[derive(Debug)]
pub struct ParenExpr<'a> {
    pub loc: SourceLocation,
    pub inner: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct UnaryOperation<'a> {
    pub loc: SourceLocation,
    pub op: UnaryOperator,
    pub operand: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct BinaryOperation<'a> {
    /// Location of the operator token.
    pub loc: SourceLocation,
    pub op: BinaryOperator,
    pub lhs: &'a Expr<'a>,
    pub rhs: &'a Expr<'a>,
}

/// `lhs = rhs` and the compound assignments.
#[derive(Debug)]
pub struct AssignmentExpr<'a> {
    pub loc: SourceLocation,
    pub op: AssignmentOperator,
    pub lhs: &'a Expr<'a>,
    pub rhs: &'a Expr<'a>,
}

/// `operand as Type`
#[derive(Debug)]
pub struct CastExpr<'a> {
    pub loc: SourceLocation,
    pub operand: &'a Expr<'a>,
    pub target: &'a Expr<'a>,
}

/// `base.member` or `base->member`
#[derive(Debug)]
pub struct FieldExpr<'a> {
    pub loc: SourceLocation,
    pub base: &'a Expr<'a>,
    pub member: Name<'a>,
    pub is_arrow: bool,
}

/// `operand.*`
#[derive(Debug)]
pub struct DerefExpr<'a> {
    pub loc: SourceLocation,
    pub operand: &'a Expr<'a>,
}

/// `operand?`
#[derive(Debug)]
pub struct OptionalUnwrapExpr<'a> {
    pub loc: SourceLocation,
    pub operand: &'a Expr<'a>,
}

/// `base[i, j, ...]`
#[derive(Debug)]
pub struct ArraySubscriptExpr<'a> {
    pub loc: SourceLocation,
    pub base: &'a Expr<'a>,
    pub indices: NodeList<'a, &'a Expr<'a>>,
}

#[derive(Debug)]
pub struct CallArg<'a> {
    /// `label: value` argument label.
    pub label: Option<Name<'a>>,
    pub value: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct CallExpr<'a> {
    /// Location of `(`.
    pub loc: SourceLocation,
    pub callee: &'a Expr<'a>,
    pub args: NodeList<'a, CallArg<'a>>,
}

/// `[a, b, c]`
#[derive(Debug)]
pub struct ArrayLiteral<'a> {
    pub loc: SourceLocation,
    pub elements: NodeList<'a, &'a Expr<'a>>,
}

/// `[N]T` or `[]T`
#[derive(Debug)]
pub struct ArrayTypeExpr<'a> {
    pub loc: SourceLocation,
    pub sizes: NodeList<'a, &'a Expr<'a>>,
    pub element: &'a Expr<'a>,
}

/// `?T`
#[derive(Debug)]
pub struct OptionalTypeExpr<'a> {
    pub loc: SourceLocation,
    pub inner: &'a Expr<'a>,
}

/// `(params) -> ReturnType`
#[derive(Debug)]
pub struct FunctionTypeExpr<'a> {
    pub loc: SourceLocation,
    pub params: NodeList<'a, ParamVarDecl<'a>>,
    pub return_type: &'a Expr<'a>,
}

/// `&` in a closure capture list.
#[derive(Debug)]
pub struct CaptureAllByRefExpr {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
}

/// `=` in a closure capture list.
#[derive(Debug)]
pub struct CaptureAllByValueExpr {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
}

/// `if cond then [else otherwise]`
#[derive(Debug)]
pub struct IfExpr<'a> {
    pub loc: SourceLocation,
    pub condition: &'a Expr<'a>,
    pub then_branch: Stmt<'a>,
    /// Another `IfExpr` statement for `else if` chains.
    pub else_branch: Option<Stmt<'a>>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug)]
pub enum Decl<'a> {
    Param(ParamVarDecl<'a>),
    Field(FieldDecl<'a>),
    ArrowFunction(ArrowFunctionDecl<'a>),
    Closure(ClosureDecl<'a>),
    ArrayDestructure(ArrayDestructuredVarDecl<'a>),
    ObjectDestructure(ObjectDestructuredVarDecl<'a>),
    Record(RecordDecl<'a>),
    Var(VarDecl<'a>),
    Function(FunctionDecl<'a>),
}

impl<'a> Decl<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Decl::Param(_) => NodeKind::ParamVarDecl,
            Decl::Field(f) => f.kind(),
            Decl::ArrowFunction(_) => NodeKind::ArrowFunctionDecl,
            Decl::Closure(_) => NodeKind::ClosureDecl,
            Decl::ArrayDestructure(_) => NodeKind::ArrayDestructuredVarDecl,
            Decl::ObjectDestructure(_) => NodeKind::ObjectDestructuredVarDecl,
            Decl::Record(r) => r.kind(),
            Decl::Var(_) => NodeKind::VarDecl,
            Decl::Function(_) => NodeKind::FunctionDecl,
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Decl::Param(d) => d.loc,
            Decl::Field(d) => d.loc,
            Decl::ArrowFunction(d) => d.loc,
            Decl::Closure(d) => d.loc,
            Decl::ArrayDestructure(d) => d.loc,
            Decl::ObjectDestructure(d) => d.loc,
            Decl::Record(d) => d.loc,
            Decl::Var(d) => d.loc,
            Decl::Function(d) => d.loc,
        }
    }

    /// The single name a declaration introduces.
    pub fn name(&self) -> Option<Name<'a>> {
        match self {
            Decl::Param(d) => d.name(),
            Decl::Field(d) => Some(d.name),
            Decl::Record(d) => d.name,
            Decl::Var(d) => Some(d.name),
            Decl::Function(d) => d.name,
            Decl::ArrowFunction(_)
            | Decl::Closure(_)
            | Decl::ArrayDestructure(_)
            | Decl::ObjectDestructure(_) => None,
        }
    }

    pub fn qualifiers(&self) -> Qualifiers {
        match self {
            Decl::Param(d) => d.qualifiers,
            Decl::Field(d) => d.qualifiers,
            Decl::ArrayDestructure(d) => d.qualifiers,
            Decl::ObjectDestructure(d) => d.qualifiers,
            Decl::Record(d) => d.qualifiers,
            Decl::Var(d) => d.qualifiers,
            Decl::Function(d) => d.qualifiers,
            Decl::ArrowFunction(_) | Decl::Closure(_) => Qualifiers::default(),
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl<'a>> {
        match self {
            Decl::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarDecl<'a>> {
        match self {
            Decl::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordDecl<'a>> {
        match self {
            Decl::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// How a parameter binds its argument.
#[derive(Debug)]
pub enum ParamBinding<'a> {
    Name(Name<'a>),
    Array(NodeList<'a, ArrayBindingItem<'a>>),
    Object(NodeList<'a, ObjectBindingField<'a>>),
}

/// A function parameter: `[quals] name|pattern [...] [: Type] [= default]`.
#[derive(Debug)]
pub struct ParamVarDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub binding: ParamBinding<'a>,
    /// `name...`: the parameter collects the remaining arguments as an inline array.
    pub is_inline_array: bool,
    pub type_annotation: Option<&'a Expr<'a>>,
    pub default_value: Option<&'a Expr<'a>>,
}

impl<'a> ParamVarDecl<'a> {
    pub fn name(&self) -> Option<Name<'a>> {
        match self.binding {
            ParamBinding::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// A record field: `[quals] name[?]: Type [= default]`.
#[derive(Debug)]
pub struct FieldDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub name: Name<'a>,
    pub is_optional: bool,
    /// `None` only after a reported error.
    pub type_annotation: Option<&'a Expr<'a>>,
    pub default_value: Option<&'a Expr<'a>>,
}

impl<'a> FieldDecl<'a> {
    pub fn kind(&self) -> NodeKind {
        if self.is_optional {
            NodeKind::OptionalFieldDecl
        } else {
            NodeKind::FieldDecl
        }
    }
}

/// `(params) [: RetType] => body`
#[derive(Debug)]
pub struct ArrowFunctionDecl<'a> {
    pub loc: SourceLocation,
    pub params: NodeList<'a, ParamVarDecl<'a>>,
    pub return_type: Option<&'a Expr<'a>>,
    pub body: &'a CompoundStmt<'a>,
}

/// `[captures](params) [: RetType] => body`
#[derive(Debug)]
pub struct ClosureDecl<'a> {
    pub loc: SourceLocation,
    pub captures: NodeList<'a, &'a Expr<'a>>,
    pub params: NodeList<'a, ParamVarDecl<'a>>,
    pub return_type: Option<&'a Expr<'a>>,
    pub body: &'a CompoundStmt<'a>,
}

/// `let [items] = init`
#[derive(Debug)]
pub struct ArrayDestructuredVarDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub items: NodeList<'a, ArrayBindingItem<'a>>,
    /// `None` only after a reported error.
    pub init: Option<&'a Expr<'a>>,
}

/// `let {fields} = init`
#[derive(Debug)]
pub struct ObjectDestructuredVarDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub fields: NodeList<'a, ObjectBindingField<'a>>,
    /// `None` only after a reported error.
    pub init: Option<&'a Expr<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Struct,
    Shape,
    Union,
    Interface,
}

impl RecordKind {
    pub fn node_kind(self) -> NodeKind {
        match self {
            RecordKind::Struct => NodeKind::StructDecl,
            RecordKind::Shape => NodeKind::ShapeDecl,
            RecordKind::Union => NodeKind::UnionDecl,
            RecordKind::Interface => NodeKind::InterfaceDecl,
        }
    }

    /// Whether fields may be declared optional with `name?: T`.
    pub fn allows_optional_fields(self) -> bool {
        matches!(self, RecordKind::Shape | RecordKind::Interface)
    }

    pub fn keyword_text(self) -> &'static str {
        match self {
            RecordKind::Struct => "struct",
            RecordKind::Shape => "shape",
            RecordKind::Union => "union",
            RecordKind::Interface => "interface",
        }
    }
}

/// `struct|shape|union|interface [Name] { fields }`
#[derive(Debug)]
pub struct RecordDecl<'a> {
    pub record_kind: RecordKind,
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub name: Option<Name<'a>>,
    pub fields: NodeList<'a, FieldDecl<'a>>,
}

impl<'a> RecordDecl<'a> {
    pub fn kind(&self) -> NodeKind {
        self.record_kind.node_kind()
    }
}

/// `let [quals] name [: Type] = init`
#[derive(Debug)]
pub struct VarDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub name: Name<'a>,
    pub type_annotation: Option<&'a Expr<'a>>,
    /// `None` only after a reported error.
    pub init: Option<&'a Expr<'a>>,
}

/// `func [name](params) [-> RetType] body`
#[derive(Debug)]
pub struct FunctionDecl<'a> {
    pub loc: SourceLocation,
    pub qualifiers: Qualifiers,
    pub name: Option<Name<'a>>,
    pub params: NodeList<'a, ParamVarDecl<'a>>,
    pub return_type: Option<&'a Expr<'a>>,
    body: Cell<Option<&'a CompoundStmt<'a>>>,
}

impl<'a> FunctionDecl<'a> {
    pub fn new(
        loc: SourceLocation,
        qualifiers: Qualifiers,
        name: Option<Name<'a>>,
        params: NodeList<'a, ParamVarDecl<'a>>,
        return_type: Option<&'a Expr<'a>>,
    ) -> Self {
        Self {
            loc,
            qualifiers,
            name,
            params,
            return_type,
            body: Cell::new(None),
        }
    }

    /// The body, once attached. `None` only after a reported error.
    pub fn body(&self) -> Option<&'a CompoundStmt<'a>> {
        self.body.get()
    }

    /// Attach the parsed body to this declaration.
    pub fn set_body(&self, body: &'a CompoundStmt<'a>) {
        self.body.set(Some(body));
    }
}

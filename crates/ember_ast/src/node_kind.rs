//! NodeKind - the immutable tag of every AST node.
//!
//! Structural families occupy contiguous ranges so family membership is a
//! single range comparison:
//!
//! ```text
//! [statements][expressions][declarations                        ]
//!                          [unnamed     ][named                  ]
//!                                        [records   ][lvalue named]
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum NodeKind {
    // ========================================================================
    // Statements
    // ========================================================================
    CompoundStmt = 1,
    ReturnStmt,

    // ========================================================================
    // Expressions
    // ========================================================================
    NumberLiteral,
    CharLiteral,
    StringLiteral,
    DeclRef,
    DotIdentifier,
    Paren,
    UnaryOperation,
    BinaryOperation,
    Assignment,
    Cast,
    Field,
    Deref,
    OptionalUnwrap,
    ArraySubscript,
    Call,
    ArrayLiteral,
    ArrayType,
    OptionalType,
    FunctionType,
    CaptureAllByRef,
    CaptureAllByValue,
    IfExpr,

    // ========================================================================
    // Declarations
    // ========================================================================
    ParamVarDecl,
    FieldDecl,
    OptionalFieldDecl,
    ArrowFunctionDecl,
    ClosureDecl,
    ArrayDestructuredVarDecl,
    ObjectDestructuredVarDecl,

    // Named declarations: records
    StructDecl,
    ShapeDecl,
    UnionDecl,
    InterfaceDecl,

    // Named declarations: lvalues
    VarDecl,
    FunctionDecl,
}

impl NodeKind {
    // Marker constants for NodeKind ranges. These can't be enum variants
    // because Rust doesn't allow duplicate discriminants.
    pub const FIRST_STMT: NodeKind = NodeKind::CompoundStmt;
    pub const LAST_STMT: NodeKind = NodeKind::ReturnStmt;
    pub const FIRST_EXPR: NodeKind = NodeKind::NumberLiteral;
    pub const LAST_EXPR: NodeKind = NodeKind::IfExpr;
    pub const FIRST_DECL: NodeKind = NodeKind::ParamVarDecl;
    pub const LAST_DECL: NodeKind = NodeKind::FunctionDecl;
    pub const FIRST_NAMED_DECL: NodeKind = NodeKind::StructDecl;
    pub const LAST_NAMED_DECL: NodeKind = NodeKind::FunctionDecl;
    pub const FIRST_RECORD_DECL: NodeKind = NodeKind::StructDecl;
    pub const LAST_RECORD_DECL: NodeKind = NodeKind::InterfaceDecl;
    pub const FIRST_LVALUE_NAMED_DECL: NodeKind = NodeKind::VarDecl;
    pub const LAST_LVALUE_NAMED_DECL: NodeKind = NodeKind::FunctionDecl;
}

impl NodeKind {
    #[inline]
    fn in_range(self, first: NodeKind, last: NodeKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    #[inline]
    pub fn is_statement(self) -> bool {
        self.in_range(Self::FIRST_STMT, Self::LAST_STMT)
    }

    #[inline]
    pub fn is_expression(self) -> bool {
        self.in_range(Self::FIRST_EXPR, Self::LAST_EXPR)
    }

    #[inline]
    pub fn is_declaration(self) -> bool {
        self.in_range(Self::FIRST_DECL, Self::LAST_DECL)
    }

    #[inline]
    pub fn is_named_declaration(self) -> bool {
        self.in_range(Self::FIRST_NAMED_DECL, Self::LAST_NAMED_DECL)
    }

    #[inline]
    pub fn is_record_declaration(self) -> bool {
        self.in_range(Self::FIRST_RECORD_DECL, Self::LAST_RECORD_DECL)
    }

    /// Declarations that introduce a name with storage.
    #[inline]
    pub fn is_lvalue_named_declaration(self) -> bool {
        self.in_range(Self::FIRST_LVALUE_NAMED_DECL, Self::LAST_LVALUE_NAMED_DECL)
    }

    /// Short lowercase name used by diagnostics and the AST printer.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CompoundStmt => "compound",
            NodeKind::ReturnStmt => "return",
            NodeKind::NumberLiteral => "number",
            NodeKind::CharLiteral => "char",
            NodeKind::StringLiteral => "string",
            NodeKind::DeclRef => "ref",
            NodeKind::DotIdentifier => "dot-ident",
            NodeKind::Paren => "paren",
            NodeKind::UnaryOperation => "unary",
            NodeKind::BinaryOperation => "binary",
            NodeKind::Assignment => "assign",
            NodeKind::Cast => "cast",
            NodeKind::Field => "field",
            NodeKind::Deref => "deref",
            NodeKind::OptionalUnwrap => "unwrap",
            NodeKind::ArraySubscript => "subscript",
            NodeKind::Call => "call",
            NodeKind::ArrayLiteral => "array",
            NodeKind::ArrayType => "array-type",
            NodeKind::OptionalType => "optional-type",
            NodeKind::FunctionType => "function-type",
            NodeKind::CaptureAllByRef => "capture-all-ref",
            NodeKind::CaptureAllByValue => "capture-all-value",
            NodeKind::IfExpr => "if",
            NodeKind::ParamVarDecl => "param",
            NodeKind::FieldDecl => "field-decl",
            NodeKind::OptionalFieldDecl => "optional-field-decl",
            NodeKind::ArrowFunctionDecl => "arrow",
            NodeKind::ClosureDecl => "closure",
            NodeKind::ArrayDestructuredVarDecl => "let-array",
            NodeKind::ObjectDestructuredVarDecl => "let-object",
            NodeKind::StructDecl => "struct",
            NodeKind::ShapeDecl => "shape",
            NodeKind::UnionDecl => "union",
            NodeKind::InterfaceDecl => "interface",
            NodeKind::VarDecl => "let",
            NodeKind::FunctionDecl => "func",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

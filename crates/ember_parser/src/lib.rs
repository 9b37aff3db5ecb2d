//! ember_parser: Recursive descent parser for ember source code.
//!
//! A [`Parser`] walks a [`TokenStream`](ember_lexer::TokenStream) and
//! allocates the AST into an [`Arena`](ember_core::Arena). Expressions use
//! precedence climbing; statements and declarations are parsed by mutually
//! recursive methods on the same parser. [`ParseUnit`] drives the parser
//! over a whole file and builds the top-level name table.

mod context;
mod decl;
mod error;
mod expr;
mod misc;
mod number;
mod parser;
mod precedence;
mod stmt;
mod string;
mod unit;

pub use context::ParseContext;
pub use error::{ParseError, ParseResult};
pub use misc::ListOptions;
pub use number::{parse_number, NumberParts};
pub use parser::{Parser, MAX_RECURSION_DEPTH};
pub use precedence::{get_binary_operator_info, Associativity, OperatorInfo, OperatorPrecedence};
pub use string::{parse_char_literal, parse_string_literal};
pub use unit::{ParseUnit, TopLevelName};

//! ember_lexer: Tokenizer and token cursor for ember source code.
//!
//! [`Tokenizer`] is a character-level state machine that produces one
//! [`Token`] at a time. [`TokenBuffer::create`] drives it to the end of the
//! input and keeps the tokens together with the line map. The parser walks
//! the buffer through a [`TokenStream`], which adds lookahead, backtracking
//! and nesting-aware resynchronization.

mod buffer;
mod error;
mod token;
mod token_stream;
mod tokenizer;

pub use buffer::TokenBuffer;
pub use error::{LexError, LexErrorKind};
pub use token::Token;
pub use token_stream::{Checkpoint, FindError, TokenStream};
pub use tokenizer::{Tokenizer, COLUMN_LIMIT};

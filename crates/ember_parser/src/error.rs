//! Failure classification for parse functions.

use thiserror::Error;

/// Why a parse function could not produce a node.
///
/// Both variants mean a diagnostic has already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The construct was skipped and the stream sits at a point the caller
    /// can continue from.
    #[error("parse failed, resumed after the failing construct")]
    FailedAndProceeded,
    /// No resynchronization point was found; the caller must give up on the
    /// enclosing construct.
    #[error("parse failed, could not resume")]
    FailedCouldNotProceed,
}

pub type ParseResult<T> = Result<T, ParseError>;

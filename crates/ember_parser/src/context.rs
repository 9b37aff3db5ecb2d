//! State shared by every parse function.

use ember_diagnostics::DiagnosticSink;
use ember_lexer::TokenStream;
use ember_options::ParseOptions;

/// The token cursor, the diagnostic sink and the dialect options of one
/// parse.
pub struct ParseContext<'b, 's> {
    pub stream: TokenStream<'b, 's>,
    pub diag: &'b mut dyn DiagnosticSink,
    pub options: ParseOptions,
}

impl<'b, 's> ParseContext<'b, 's> {
    pub fn new(stream: TokenStream<'b, 's>, diag: &'b mut dyn DiagnosticSink, options: ParseOptions) -> Self {
        Self { stream, diag, options }
    }
}

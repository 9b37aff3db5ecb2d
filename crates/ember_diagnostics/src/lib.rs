//! ember_diagnostics: Diagnostic events and the message catalogue.
//!
//! The front end never formats or prints diagnostics itself. Parsers push
//! structured events into a [`DiagnosticSink`]; drivers decide how to render
//! them. Every message the parser can emit is declared once in [`messages`].

use ember_core::text::SourceLocation;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Note,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Note => write!(f, "note"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and level.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1200, 6005).
    pub code: u32,
    /// The level of this diagnostic.
    pub level: DiagnosticLevel,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Where the problem was found. May be `SourceLocation::INVALID`.
    pub location: SourceLocation,
    /// The resolved message text.
    pub message: String,
    /// The catalogue code of the message.
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic from a catalogue entry.
    pub fn new(location: SourceLocation, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            level: message.level,
            location,
            message: format_message(message.message, args),
            code: message.code,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_valid() {
            write!(f, "{}: ", self.location)?;
        }
        write!(f, "{} E{}: {}", self.level, self.code, self.message)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Receiver of diagnostic events.
pub trait DiagnosticSink {
    fn consume(&mut self, diagnostic: Diagnostic);

    /// Build a diagnostic from a catalogue entry and consume it.
    fn report(&mut self, location: SourceLocation, message: &DiagnosticMessage, args: &[&str]) {
        self.consume(Diagnostic::new(location, message, args));
    }
}

/// A collection of diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Whether any diagnostic carries the given catalogue code.
    pub fn contains_code(&self, code: u32) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by position. Equal positions keep emission order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| d.location.index);
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn consume(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, level: DiagnosticLevel::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, level: DiagnosticLevel::Warning, message: $msg }
        };
        ($code:expr, Note, $msg:expr) => {
            DiagnosticMessage { code: $code, level: DiagnosticLevel::Note, message: $msg }
        };
    }

    // ========================================================================
    // Literals (1100-1199)
    // ========================================================================
    pub const INVALID_NUMBER_LITERAL: DiagnosticMessage = diag!(1100, Error, "{0}");
    pub const INVALID_CHAR_LITERAL: DiagnosticMessage = diag!(1101, Error, "{0}");
    pub const INVALID_STRING_LITERAL: DiagnosticMessage = diag!(1102, Error, "{0}");

    // ========================================================================
    // Expressions (1200-1299)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1200, Error, "Unexpected token \"{0}\"");
    pub const KEYWORD_IN_EXPRESSION: DiagnosticMessage = diag!(1201, Error, "Keyword \"{0}\" cannot be used in an expression");
    pub const EXPECTED_EXPRESSION: DiagnosticMessage = diag!(1202, Error, "Expected an expression");
    pub const EXPECTED_EXPRESSION_AFTER_OPERATOR: DiagnosticMessage = diag!(1203, Error, "Expected an expression after \"{0}\"");
    pub const EXPECTED_CLOSING_PAREN: DiagnosticMessage = diag!(1204, Error, "Expected closing parenthesis");
    pub const EXPECTED_CLOSING_BRACKET: DiagnosticMessage = diag!(1205, Error, "Expected closing bracket");
    pub const EXPECTED_FIELD_NAME: DiagnosticMessage = diag!(1206, Error, "Expected a field name after \"{0}\"");
    pub const EXPECTED_ITEM_BEFORE_SEPARATOR: DiagnosticMessage = diag!(1207, Error, "Expected {0} before '{1}'");
    pub const EXPECTED_TYPE_EXPRESSION: DiagnosticMessage = diag!(1208, Error, "Expected a type expression after \"{0}\"");
    pub const EXPRESSION_TOO_DEEP: DiagnosticMessage = diag!(1209, Error, "Expression is nested too deeply");
    pub const EXPECTED_FAT_ARROW: DiagnosticMessage = diag!(1210, Error, "Expected '=>' after parameter list");
    pub const EXPECTED_ARROW_BODY: DiagnosticMessage = diag!(1211, Error, "Expected a body after '=>'");
    pub const EXPECTED_SEPARATOR_OR_CLOSE: DiagnosticMessage = diag!(1212, Error, "Expected '{0}' or '{1}' after {2}");
    pub const EXPECTED_CLOSURE_PARAMS: DiagnosticMessage = diag!(1213, Error, "Expected a parameter list after closure captures");
    pub const EMPTY_PARENTHESES: DiagnosticMessage = diag!(1214, Error, "Expected an expression inside parenthesis, or '->' for a function type or '=>' for an arrow function");
    pub const UNEXPECTED_END_OF_FILE: DiagnosticMessage = diag!(1215, Error, "Unexpected end of file");

    // ========================================================================
    // Declarations (1300-1399)
    // ========================================================================
    pub const KEYWORD_AS_NAME: DiagnosticMessage = diag!(1300, Error, "Keywords cannot be used as a {0} name");
    pub const EXPECTED_DECL_NAME: DiagnosticMessage = diag!(1301, Error, "Expected a name for {0} declaration, found \"{1}\" instead");
    pub const EXPECTED_TYPE_ANNOTATION: DiagnosticMessage = diag!(1302, Error, "Expected a type annotation expression after ':'");
    pub const FIELD_REQUIRES_TYPE: DiagnosticMessage = diag!(1303, Error, "All fields must have a type annotation");
    pub const OPTIONAL_FIELD_NOT_ALLOWED: DiagnosticMessage = diag!(1304, Error, "Optional fields are only allowed in shapes and interfaces");
    pub const EXPECTED_FUNCTION_PARAMS: DiagnosticMessage = diag!(1305, Error, "Expected '(' after function declaration");
    pub const EXPECTED_RETURN_TYPE: DiagnosticMessage = diag!(1306, Error, "Expected a return type after '->'");
    pub const EXPECTED_FUNCTION_BODY: DiagnosticMessage = diag!(1307, Error, "Expected a function body");
    pub const EXPECTED_RECORD_BODY: DiagnosticMessage = diag!(1308, Error, "Expected '{' after {0} declaration");
    pub const VAR_REQUIRES_INIT: DiagnosticMessage = diag!(1309, Error, "Variable declarations must have an initial value");
    pub const EXPECTED_COLON_AFTER_INDEX: DiagnosticMessage = diag!(1310, Error, "Expected a colon after array-binding index");
    pub const EXPECTED_SPREAD_NAME: DiagnosticMessage = diag!(1311, Error, "Expected a name after '...'");
    pub const EXPECTED_BINDING: DiagnosticMessage = diag!(1312, Error, "Expected a name or binding pattern, found \"{0}\" instead");
    pub const FUNCTION_REQUIRES_NAME: DiagnosticMessage = diag!(1313, Error, "Function declarations in statement position must have a name");
    pub const EXPECTED_BINDING_KEY: DiagnosticMessage = diag!(1314, Error, "Expected a field name in object binding, found \"{0}\" instead");
    pub const RECORD_REQUIRES_NAME: DiagnosticMessage = diag!(1315, Error, "Expected a name for top-level {0} declaration");

    // ========================================================================
    // Statements (1400-1499)
    // ========================================================================
    pub const UNEXPECTED_KEYWORD: DiagnosticMessage = diag!(1400, Error, "Unexpected \"{0}\" keyword");
    pub const UNCLOSED_COMPOUND_STATEMENT: DiagnosticMessage = diag!(1401, Error, "Expected '}' to close compound statement");
    pub const EXPECTED_SEMICOLON: DiagnosticMessage = diag!(1402, Error, "Expected a semicolon after statement");
    pub const IF_CONDITION_REQUIRES_PARENS: DiagnosticMessage = diag!(1403, Error, "Expected condition after 'if' to be wrapped in parentheses");
    pub const EXPECTED_IF_CONDITION: DiagnosticMessage = diag!(1404, Error, "Expected a condition after 'if'");
    pub const EXPECTED_STATEMENT_AFTER: DiagnosticMessage = diag!(1405, Error, "Expected a statement after \"{0}\"");
    pub const QUALIFIERS_WITHOUT_DECLARATION: DiagnosticMessage = diag!(1406, Error, "Qualifiers are only allowed on declarations");

    // ========================================================================
    // Parse unit (1500-1599)
    // ========================================================================
    pub const DUPLICATE_DECL_NAME: DiagnosticMessage = diag!(1500, Error, "Decl name \"{0}\" is reused");

    // ========================================================================
    // Warnings (6000-6099)
    // ========================================================================
    pub const MULTIPLE_SEPARATORS: DiagnosticMessage = diag!(6001, Warning, "Multiple '{0}' found after {1}");
    pub const TRAILING_SEPARATOR: DiagnosticMessage = diag!(6002, Warning, "Trailing '{0}' after {1}");
    pub const NAME_WILL_BE_UNUSED: DiagnosticMessage = diag!(6003, Warning, "Name \"{0}\" will be unused");
    pub const DUPLICATE_QUALIFIER: DiagnosticMessage = diag!(6004, Warning, "Duplicate qualifier \"{0}\"");
    pub const UNUSED_EXPRESSION: DiagnosticMessage = diag!(6005, Warning, "Expression result unused");

    // ========================================================================
    // Notes (9000-9099)
    // ========================================================================
    pub const PREVIOUS_DECLARATION_HERE: DiagnosticMessage = diag!(9002, Note, "Previous declaration of \"{0}\" is here");
}

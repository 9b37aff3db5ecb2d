//! emberc: the ember front-end driver.
//!
//! Usage:
//!   emberc [options] [file...]
//!
//! Lexes and parses each input, reports diagnostics, and optionally dumps
//! the token stream or the syntax tree.

use clap::Parser as ClapParser;
use ember_core::Arena;
use ember_diagnostics::{Diagnostic, DiagnosticCollection, DiagnosticLevel};
use ember_lexer::TokenBuffer;
use ember_options::{load_project_config, ParseOptions};
use ember_parser::ParseUnit;
use ember_printer::{Printer, PrinterOptions};
use miette::{NamedSource, Report};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "emberc", about = "emberc - Parse and check ember source files", version)]
struct Cli {
    /// Source files to parse.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to an ember.json project file.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Print every token before parsing.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree as S-expressions.
    #[arg(long = "dump-ast")]
    dump_ast: bool,

    /// Put each block statement of the dumped tree on its own line.
    #[arg(long)]
    pretty: bool,

    /// Statements may omit their terminating semicolon.
    #[arg(long = "no-semicolons")]
    no_semicolons: bool,

    /// Do not warn about unused top-level expressions.
    #[arg(long = "ignore-unused")]
    ignore_unused: bool,

    /// Require parentheses around if conditions.
    #[arg(long = "require-if-parens")]
    require_if_parens: bool,

    /// Accept a leading `+` on number literals.
    #[arg(long = "allow-positive-sign")]
    allow_positive_sign: bool,
}

impl Cli {
    fn flag_options(&self) -> ParseOptions {
        ParseOptions {
            dont_require_semicolons: self.no_semicolons,
            ignore_unused_expressions: self.ignore_unused,
            require_parens_on_if_expr: self.require_if_parens,
            allow_positive_sign: self.allow_positive_sign,
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// A fatal problem that stops the run before all files are parsed.
enum Fatal {
    Message(String),
    Report(Report),
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(Fatal::Message(msg)) => {
            print_error(&msg);
            1
        }
        Err(Fatal::Report(report)) => {
            eprintln!("{report:?}");
            1
        }
    };
    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<i32, Fatal> {
    let start = Instant::now();
    let (files, options) = resolve_inputs(cli)?;

    if files.is_empty() {
        return Err(Fatal::Message("No input files.".to_string()));
    }
    debug!(files = files.len(), ?options, "resolved inputs");

    let use_color = atty_is_terminal();
    let mut errors = 0;
    for file in &files {
        errors += process_file(cli, file, options, use_color)?;
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "finished");

    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        if use_color {
            eprintln!("\n{RED}Found {errors} error{plural}.{RESET}");
        } else {
            eprintln!("\nFound {errors} error{plural}.");
        }
        return Ok(2);
    }

    if use_color {
        eprintln!("{GRAY}Parsed {} file(s) in {:.2}s.{RESET}", files.len(), start.elapsed().as_secs_f64());
    }
    Ok(0)
}

/// Input files and effective options. Command-line switches are added on
/// top of the project file's options.
fn resolve_inputs(cli: &Cli) -> Result<(Vec<PathBuf>, ParseOptions), Fatal> {
    let mut files = cli.files.clone();
    let mut options = ParseOptions::default();

    if let Some(project) = &cli.project {
        let config = load_project_config(project).map_err(|e| Fatal::Report(Report::new(e)))?;
        options = config.parse_options;
        files.extend(config.resolved_files(project));
    }

    options.enable_all_of(&cli.flag_options());
    Ok((files, options))
}

/// Lex and parse one file. Returns the number of errors reported.
fn process_file(cli: &Cli, path: &Path, options: ParseOptions, use_color: bool) -> Result<usize, Fatal> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| Fatal::Message(format!("Failed to read '{}': {}", path.display(), e)))?;

    let buffer = match TokenBuffer::create(&source) {
        Ok(buffer) => buffer,
        Err(error) => {
            let named = NamedSource::new(path.display().to_string(), source.clone());
            return Err(Fatal::Report(Report::new(error).with_source_code(named)));
        }
    };

    if cli.tokens {
        for token in buffer.tokens() {
            println!("{}\t{}\t{:?}", token.loc, token.kind, buffer.text(*token));
        }
    }

    let arena = Arena::new();
    let mut diagnostics = DiagnosticCollection::new();
    let unit = ParseUnit::create(&arena, &buffer, &mut diagnostics, options);

    diagnostics.sort();
    for diag in diagnostics.diagnostics() {
        print_diagnostic(path, diag, use_color);
    }

    if cli.dump_ast {
        let mut printer = Printer::with_options(PrinterOptions {
            pretty: cli.pretty,
            ..PrinterOptions::default()
        });
        println!("{}", printer.print_statements(unit.statements()));
    }

    debug!(
        file = %path.display(),
        statements = unit.statements().len(),
        errors = unit.error_count(),
        "parsed file"
    );
    Ok(unit.error_count())
}

fn print_diagnostic(path: &Path, diag: &Diagnostic, use_color: bool) {
    if !use_color {
        eprintln!("{}:{}", path.display(), diag);
        return;
    }
    let color = match diag.level {
        DiagnosticLevel::Error => RED,
        DiagnosticLevel::Warning => YELLOW,
        DiagnosticLevel::Note => GRAY,
    };
    eprint!("{CYAN}{}{RESET}", path.display());
    if diag.location.is_valid() {
        eprint!(":{}", diag.location);
    }
    eprintln!(
        ": {BOLD}{color}{}{RESET} {CYAN}E{}{RESET}: {}",
        diag.level, diag.code, diag.message
    );
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{BOLD}{RED}error{RESET}: {msg}");
    } else {
        eprintln!("error: {msg}");
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}

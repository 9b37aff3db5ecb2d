//! ember_options: Parse options and the `ember.json` project file.
//!
//! Parses project files and provides the [`ParseOptions`] structure the
//! parser is configured with.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dialect switches for the parser. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Statements may omit their terminating `;`.
    pub dont_require_semicolons: bool,
    /// Do not warn about top-level expression statements whose value is unused.
    pub ignore_unused_expressions: bool,
    /// The condition of an `if` must be wrapped in parentheses.
    pub require_parens_on_if_expr: bool,
    /// Accept a leading `+` on number literals.
    pub allow_positive_sign: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn on every option set in `other`.
    pub fn enable_all_of(&mut self, other: &ParseOptions) {
        self.dont_require_semicolons |= other.dont_require_semicolons;
        self.ignore_unused_expressions |= other.ignore_unused_expressions;
        self.require_parens_on_if_expr |= other.require_parens_on_if_expr;
        self.allow_positive_sign |= other.allow_positive_sign;
    }
}

/// The `ember.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    pub parse_options: ParseOptions,
    /// Source files, relative to the project file's directory.
    pub files: Vec<String>,
}

impl ProjectConfig {
    /// Source file paths resolved against the directory holding `project_file`.
    pub fn resolved_files(&self, project_file: &Path) -> Vec<PathBuf> {
        let base = project_file.parent().unwrap_or_else(|| Path::new(""));
        self.files.iter().map(|f| base.join(f)).collect()
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("could not read project file {}", .path.display())]
    #[diagnostic(code(ember::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file: {0}")]
    #[diagnostic(code(ember::config::json), help("expected an object with \"parseOptions\" and \"files\" keys"))]
    Json(#[from] serde_json::Error),
}

/// Parse an `ember.json` file from a string.
pub fn parse_project_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse an `ember.json` file from a path.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_off() {
        let options = ParseOptions::default();
        assert!(!options.dont_require_semicolons);
        assert!(!options.ignore_unused_expressions);
        assert!(!options.require_parens_on_if_expr);
        assert!(!options.allow_positive_sign);
    }

    #[test]
    fn test_parse_camel_case_config() {
        let config = parse_project_config(
            r#"{
                "parseOptions": { "dontRequireSemicolons": true, "requireParensOnIfExpr": true },
                "files": ["main.em", "lib/util.em"]
            }"#,
        )
        .unwrap();
        assert!(config.parse_options.dont_require_semicolons);
        assert!(config.parse_options.require_parens_on_if_expr);
        assert!(!config.parse_options.ignore_unused_expressions);
        assert_eq!(config.files, vec!["main.em", "lib/util.em"]);
    }

    #[test]
    fn test_missing_sections_default() {
        let config = parse_project_config("{}").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_project_config("{ \"files\": 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_resolved_files() {
        let config = ProjectConfig {
            parse_options: ParseOptions::default(),
            files: vec!["a.em".to_string()],
        };
        let files = config.resolved_files(Path::new("proj/ember.json"));
        assert_eq!(files, vec![PathBuf::from("proj/a.em")]);
    }

    #[test]
    fn test_enable_all_of() {
        let mut options = ParseOptions::default();
        options.enable_all_of(&ParseOptions {
            allow_positive_sign: true,
            ..ParseOptions::default()
        });
        assert!(options.allow_positive_sign);
        assert!(!options.dont_require_semicolons);
    }

    #[test]
    fn test_missing_file() {
        let err = load_project_config(Path::new("/nonexistent/ember.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

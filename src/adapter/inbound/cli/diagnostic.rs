//! Miette-based error diagnostics for CLI error presentation.
//!
//! Turns config failures into reports that show the offending TOML with the
//! bad span labeled.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};
use crate::infrastructure::config::api::API_URL_ENV;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(metron::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: Option<SourceSpan>,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic for `err` raised while loading `path`.
    ///
    /// `env` is the variable lookup the config was loaded with; a bad
    /// `base_url` taken from the environment is attributed to the variable.
    /// Returns `None` for errors that carry no useful source location.
    #[must_use]
    pub fn from_error(
        path: &Path,
        content: &str,
        err: &Error,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let Error::Config(config_err) = err else {
            return None;
        };
        let (span, help) = match config_err {
            ConfigError::Parse(parse) => (
                parse.span().map(|r| SourceSpan::from((r.start, r.end - r.start))),
                None,
            ),
            ConfigError::InvalidValue { field, .. } | ConfigError::MissingField { field } => {
                match env_override(*field, &env) {
                    Some(value) => (
                        None,
                        Some(format!(
                            "{API_URL_ENV}={value:?} overrides [api] base_url; correct or unset it"
                        )),
                    ),
                    None => (find_key(content, field), Some(help_for(field))),
                }
            }
            ConfigError::ReadFile(_) => return None,
        };
        Some(Self {
            message: config_err.to_string(),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            help,
        })
    }
}

/// Value of the environment variable that replaced `field`, if any.
fn env_override(field: &str, env: impl Fn(&str) -> Option<String>) -> Option<String> {
    if field != "base_url" {
        return None;
    }
    env(API_URL_ENV).filter(|v| !v.trim().is_empty())
}

/// Locate `key = ...` in TOML source so the label lands on the right line.
fn find_key(content: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                let start = offset + (line.len() - trimmed.len());
                return Some((start, line.trim_end().len() - (start - offset)).into());
            }
        }
        offset += line.len();
    }
    None
}

fn help_for(field: &str) -> String {
    match field {
        "base_url" => "use an absolute http(s) URL such as http://localhost:8000".to_string(),
        "interval_secs" => "use a whole number of seconds, at least 1".to_string(),
        "format" => "supported formats are \"pretty\" and \"json\"".to_string(),
        other => format!("check the value of `{other}`"),
    }
}

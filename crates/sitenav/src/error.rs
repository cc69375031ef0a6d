//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_core::{LoadError, Violations};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{}", render_load_errors(.0))]
    Declarations(Vec<LoadError>),

    #[error("{0}")]
    Navigation(#[from] Violations),

    #[error("{0}")]
    Validation(String),
}

fn render_load_errors(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

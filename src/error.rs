//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Errors raised while constructing or driving a router
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The fallback page `/` is not defined
    #[error("no page is defined for the root path `/`")]
    MissingRoot,
}

/// Errors from a [`Fetcher`](crate::content::Fetcher)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("IO error when fetching `{0}`")]
    Io(String, #[source] std::io::Error),
}

/// Errors while loading a line-delimited data set
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the build step
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("required data file is missing: {0} (run `hashsite import` first)")]
    MissingArtifact(PathBuf),

    #[error("required data file is not valid JSON: {0}")]
    InvalidArtifact(PathBuf, #[source] serde_json::Error),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

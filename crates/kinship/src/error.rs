//! Error types for Kinship operations.
//!
//! This module provides the main error type [`KinshipError`]. Layout itself
//! never fails; errors come from reading family documents, configuration,
//! and export.

use std::io;

use thiserror::Error;

/// The main error type for Kinship operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the family document source next to the TOML
/// error so that the error span can be shown in context.
#[derive(Debug, Error)]
pub enum KinshipError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid family document: {}", .err.message())]
    Parse { err: toml::de::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for KinshipError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KinshipError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

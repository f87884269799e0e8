//! Export of laid-out family trees.
//!
//! This module provides the [`Exporter`] trait that turns a [`FamilyLayout`]
//! into an output document. It is the last stage of the pipeline.
//!
//! ```text
//! Family document (TOML)
//!     ↓ parse
//! Family snapshot
//!     ↓ index
//! FamilyIndex
//!     ↓ layout
//! FamilyLayout
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`document`] - machine-readable TOML placement document
//! - [`listing`] - aligned plain-text listing for humans
//!
//! Both backends write into an in-memory buffer; the caller decides where the
//! text goes.

pub mod document;
pub mod listing;

use std::{fmt, str::FromStr};

use crate::layout::FamilyLayout;

/// Abstraction for export backends.
pub trait Exporter {
    /// Appends the given layout to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the layout cannot be encoded, or
    /// [`Error::Format`] if writing into the buffer fails.
    fn export_layout(&mut self, layout: &FamilyLayout) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`KinshipError::Export`](crate::KinshipError::Export) at
/// the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// The layout could not be encoded; carries the encoder's message.
    Serialize(String),
    /// Writing into the output buffer failed.
    Format(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(_) => None,
            Self::Format(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}

/// The output formats the built-in backends produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// TOML placement document, see [`document::Document`].
    #[default]
    Toml,
    /// Plain-text listing, see [`listing::Listing`].
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!(
                "unknown output format `{other}`, expected `toml` or `text`"
            )),
        }
    }
}

//! Kinship - layout of family trees.
//!
//! Reads a family snapshot (persons plus parent and spouse relationships),
//! assigns every person a position on a generation grid, and computes the
//! line geometry connecting couples and their children. Rendering is left to
//! the consumer; the built-in exporters only describe the placement.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use kinship_core::{family, geometry, identifier};

pub use error::KinshipError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, OutputFormat, document::Document, listing::Listing};
use family::Family;
use layout::{Engine, FamilyLayout};

/// Builder for parsing, laying out and exporting family trees.
///
/// # Examples
///
/// ```rust
/// use kinship::{TreeBuilder, config::AppConfig, export::OutputFormat};
///
/// let source = r#"
///     [[person]]
///     id = "anna"
///     first_name = "Anna"
///
///     [[person]]
///     id = "max"
///     first_name = "Max"
///
///     [[relationship]]
///     kind = "parent"
///     from = "anna"
///     to = "max"
/// "#;
///
/// let builder = TreeBuilder::new(AppConfig::default());
/// let family = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&family);
/// let text = builder
///     .export(&layout, OutputFormat::Text)
///     .expect("Failed to export");
///
/// assert_eq!(layout.len(), 2);
/// assert!(text.contains("anna -> max"));
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Create a new tree builder with the given configuration.
    ///
    /// The configuration is used as is; see [`TreeBuilder::try_new`] for a
    /// validating constructor.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Create a new tree builder after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Config`] naming the first invalid value.
    pub fn try_new(config: AppConfig) -> Result<Self, KinshipError> {
        config.validate().map_err(KinshipError::Config)?;
        Ok(Self::new(config))
    }

    /// Returns the configuration of this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML family document.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Parse`] carrying the source text when the
    /// document is not valid TOML or does not describe a family.
    pub fn parse(&self, source: &str) -> Result<Family, KinshipError> {
        info!("Parsing family document");

        let family: Family =
            toml::from_str(source).map_err(|err| KinshipError::new_parse_error(err, source))?;

        debug!(
            persons = family.persons().len(),
            relationships = family.relationships().len();
            "Family document parsed"
        );
        trace!(family:?; "Parsed family");

        Ok(family)
    }

    /// Lay out a family snapshot.
    ///
    /// Layout never fails: malformed relationships are dropped and logged.
    pub fn layout<'a>(&self, family: &'a Family) -> FamilyLayout<'a> {
        Engine::from_config(self.config.layout())
            .calculate(family.persons(), family.relationships())
    }

    /// Export a layout in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Export`] if the backend fails.
    pub fn export(
        &self,
        layout: &FamilyLayout,
        format: OutputFormat,
    ) -> Result<String, KinshipError> {
        info!(format:% = format; "Exporting layout");
        let margin = self.config.layout().margin();

        let output = match format {
            OutputFormat::Toml => {
                let mut exporter = Document::new(margin);
                exporter.export_layout(layout)?;
                exporter.into_output()
            }
            OutputFormat::Text => {
                let mut exporter = Listing::new(margin);
                exporter.export_layout(layout)?;
                exporter.into_output()
            }
        };

        debug!(bytes = output.len(); "Layout exported");
        Ok(output)
    }
}

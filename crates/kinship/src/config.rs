//! Configuration types for Kinship family tree layout.
//!
//! This module provides the configuration structures that parameterize the
//! layout. All types implement [`serde::Deserialize`] so they can be loaded
//! from external sources; every field is optional and falls back to its
//! default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - The tunable constants of the layout engine.
//! - [`MarginConfig`] - Canvas margins around the placed tree.
//!
//! # Example
//!
//! ```
//! # use kinship::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     node_width = 150.0
//!     spouse_gap = 10.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().node_width(), 150.0);
//! assert_eq!(config.layout().node_height(), 60.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use kinship_core::geometry::{Insets, Size};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Checks every section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()
    }
}

/// Dimensions and spacing used by the layout engine.
///
/// All values share one linear unit (pixels or points).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one person box.
    node_width: f32,

    /// Height of one person box.
    node_height: f32,

    /// Vertical distance between two generation rows.
    level_height: f32,

    /// Horizontal gap between sibling subtrees and between orphans.
    node_gap: f32,

    /// Horizontal gap between the two boxes of a couple.
    spouse_gap: f32,

    /// Horizontal margin between the subtrees of two roots.
    family_gap: f32,

    /// Margin around the whole tree.
    margin: MarginConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 60.0,
            level_height: 120.0,
            node_gap: 20.0,
            spouse_gap: 20.0,
            family_gap: 40.0,
            margin: MarginConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Returns the width of one person box.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Returns the height of one person box.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the person box as a [`Size`].
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    /// Returns the vertical distance between generation rows.
    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    /// Returns the gap between sibling subtrees.
    pub fn node_gap(&self) -> f32 {
        self.node_gap
    }

    /// Returns the gap between the two boxes of a couple.
    pub fn spouse_gap(&self) -> f32 {
        self.spouse_gap
    }

    /// Returns the margin between two root families.
    pub fn family_gap(&self) -> f32 {
        self.family_gap
    }

    /// Returns the canvas margin as [`Insets`].
    pub fn margin(&self) -> Insets {
        self.margin.to_insets()
    }

    /// Sets the person box size (builder style).
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_width = size.width();
        self.node_height = size.height();
        self
    }

    /// Sets the vertical distance between generation rows (builder style).
    pub fn with_level_height(mut self, level_height: f32) -> Self {
        self.level_height = level_height;
        self
    }

    /// Sets the gap between sibling subtrees (builder style).
    pub fn with_node_gap(mut self, gap: f32) -> Self {
        self.node_gap = gap;
        self
    }

    /// Sets the gap between the two boxes of a couple (builder style).
    pub fn with_spouse_gap(mut self, gap: f32) -> Self {
        self.spouse_gap = gap;
        self
    }

    /// Sets the margin between two root families (builder style).
    pub fn with_family_gap(mut self, gap: f32) -> Self {
        self.family_gap = gap;
        self
    }

    /// Sets the canvas margin (builder style).
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = MarginConfig::from(margin);
        self
    }

    /// Checks that the constants describe a drawable layout.
    ///
    /// Boxes must have a positive finite size, gaps and margins must be
    /// finite and non-negative, and a generation row must be at least as
    /// tall as a box.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending value.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("level_height", self.level_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("`{name}` must be a positive number, got {value}"));
            }
        }

        let margin = self.margin();
        let [top, right, bottom, left] = margin.values();
        for (name, value) in [
            ("node_gap", self.node_gap),
            ("spouse_gap", self.spouse_gap),
            ("family_gap", self.family_gap),
            ("margin.top", top),
            ("margin.right", right),
            ("margin.bottom", bottom),
            ("margin.left", left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("`{name}` must not be negative, got {value}"));
            }
        }

        if self.level_height < self.node_height {
            return Err(format!(
                "`level_height` ({}) must not be smaller than `node_height` ({})",
                self.level_height, self.node_height
            ));
        }

        Ok(())
    }
}

/// Canvas margins, one value per side.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 40.0,
            bottom: 60.0,
            left: 40.0,
        }
    }
}

impl MarginConfig {
    /// Converts the margins into geometry [`Insets`].
    pub fn to_insets(self) -> Insets {
        Insets::new(self.top, self.right, self.bottom, self.left)
    }
}

impl From<Insets> for MarginConfig {
    fn from(insets: Insets) -> Self {
        Self {
            top: insets.top(),
            right: insets.right(),
            bottom: insets.bottom(),
            left: insets.left(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();

        assert_eq!(config.node_size(), Size::new(120.0, 60.0));
        assert_eq!(config.level_height(), 120.0);
        assert_eq!(config.node_gap(), 20.0);
        assert_eq!(config.spouse_gap(), 20.0);
        assert_eq!(config.family_gap(), 40.0);
        assert_eq!(config.margin(), Insets::new(60.0, 40.0, 60.0, 40.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            level_height = 200.0

            [layout.margin]
            left = 0.0
            "#,
        )
        .unwrap();

        let layout = config.layout();
        assert_eq!(layout.level_height(), 200.0);
        assert_eq!(layout.node_width(), 120.0);
        assert_eq!(layout.margin(), Insets::new(60.0, 40.0, 60.0, 0.0));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout(), &LayoutConfig::default());
    }

    #[test]
    fn test_builder_setters() {
        let config = LayoutConfig::default()
            .with_node_size(Size::new(80.0, 40.0))
            .with_level_height(90.0)
            .with_node_gap(5.0)
            .with_spouse_gap(6.0)
            .with_family_gap(7.0)
            .with_margin(Insets::uniform(0.0));

        assert_eq!(config.node_width(), 80.0);
        assert_eq!(config.node_height(), 40.0);
        assert_eq!(config.level_height(), 90.0);
        assert_eq!(config.node_gap(), 5.0);
        assert_eq!(config.spouse_gap(), 6.0);
        assert_eq!(config.family_gap(), 7.0);
        assert_eq!(config.margin(), Insets::uniform(0.0));
    }

    #[test]
    fn test_validate_rejects_non_positive_sizes() {
        let config = LayoutConfig::default().with_node_size(Size::new(0.0, 60.0));
        let err = config.validate().unwrap_err();
        assert!(err.contains("node_width"), "{err}");

        let config = LayoutConfig::default().with_level_height(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_gaps() {
        let config = LayoutConfig::default().with_spouse_gap(-1.0);
        let err = config.validate().unwrap_err();
        assert!(err.contains("spouse_gap"), "{err}");

        let config = LayoutConfig::default().with_margin(Insets::new(0.0, 0.0, 0.0, -3.0));
        let err = config.validate().unwrap_err();
        assert!(err.contains("margin.left"), "{err}");
    }

    #[test]
    fn test_validate_rejects_overlapping_rows() {
        let config = LayoutConfig::default().with_level_height(50.0);
        let err = config.validate().unwrap_err();
        assert!(err.contains("level_height"), "{err}");
    }
}

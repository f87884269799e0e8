//! TOML placement document.
//!
//! The document has a `[canvas]` table with the drawing surface size, one
//! `[[node]]` table per placed person and one `[[connection]]` table per
//! line:
//!
//! ```toml
//! [canvas]
//! width = 340.0
//! height = 300.0
//!
//! [[node]]
//! id = "anna"
//! name = "Anna Keller"
//! gender = "female"
//! level = 0
//! x = 40.0
//! y = 60.0
//!
//! [[connection]]
//! kind = "spouse"
//! from = "anna"
//! to = "josef"
//! points = [[160.0, 90.0], [180.0, 90.0]]
//! ```

use log::debug;
use serde::Serialize;

use kinship_core::geometry::Insets;

use crate::{
    export::{self, Exporter},
    layout::{Connection, FamilyLayout, PlacedNode},
};

/// Exporter producing the TOML placement document.
#[derive(Debug, Clone)]
pub struct Document {
    margin: Insets,
    output: String,
}

impl Document {
    /// Creates an exporter that sizes the canvas with the given margin.
    pub fn new(margin: Insets) -> Self {
        Self {
            margin,
            output: String::new(),
        }
    }

    /// Returns the document written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the exporter and returns the document.
    pub fn into_output(self) -> String {
        self.output
    }
}

impl Exporter for Document {
    fn export_layout(&mut self, layout: &FamilyLayout) -> Result<(), export::Error> {
        let canvas = layout.canvas_size(self.margin);
        let document = DocumentEntry {
            canvas: CanvasEntry {
                width: canvas.width(),
                height: canvas.height(),
            },
            nodes: layout.nodes().iter().map(NodeEntry::from).collect(),
            connections: layout
                .connections()
                .iter()
                .map(ConnectionEntry::from)
                .collect(),
        };

        let text =
            toml::to_string(&document).map_err(|err| export::Error::Serialize(err.to_string()))?;
        debug!(bytes = text.len(); "Placement document serialized");
        self.output.push_str(&text);
        Ok(())
    }
}

#[derive(Serialize)]
struct DocumentEntry {
    canvas: CanvasEntry,
    #[serde(rename = "node")]
    nodes: Vec<NodeEntry>,
    #[serde(rename = "connection")]
    connections: Vec<ConnectionEntry>,
}

#[derive(Serialize)]
struct CanvasEntry {
    width: f32,
    height: f32,
}

#[derive(Serialize)]
struct NodeEntry {
    id: String,
    name: String,
    gender: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lifespan: Option<String>,
    level: usize,
    x: f32,
    y: f32,
}

impl From<&PlacedNode<'_>> for NodeEntry {
    fn from(node: &PlacedNode<'_>) -> Self {
        let person = node.person();
        Self {
            id: node.id().as_string(),
            name: person.display_name(),
            gender: person.gender().as_str(),
            lifespan: person.lifespan(),
            level: node.level(),
            x: node.x(),
            y: node.y(),
        }
    }
}

#[derive(Serialize)]
struct ConnectionEntry {
    kind: &'static str,
    from: String,
    to: String,
    points: Vec<[f32; 2]>,
}

impl From<&Connection> for ConnectionEntry {
    fn from(connection: &Connection) -> Self {
        Self {
            kind: connection.kind().as_str(),
            from: connection.from_person().as_string(),
            to: connection.to_person().as_string(),
            points: connection
                .waypoints()
                .into_iter()
                .map(|point| [point.x(), point.y()])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kinship_core::family::{Gender, Person, Relationship};

    use super::*;
    use crate::{config::LayoutConfig, layout::layout};

    #[test]
    fn test_document_contents() {
        let persons = vec![
            Person::new("anna", "Anna", "Keller")
                .with_gender(Gender::Female)
                .with_birth_date("1950-02-01"),
            Person::new("josef", "Josef", "Keller"),
            Person::new("max", "Max", "Keller"),
        ];
        let relationships = vec![
            Relationship::spouse("anna", "josef"),
            Relationship::parent("anna", "max"),
        ];
        let config = LayoutConfig::default();
        let layout = layout(&persons, &relationships, &config);

        let mut exporter = Document::new(config.margin());
        exporter.export_layout(&layout).unwrap();
        let output = exporter.into_output();

        let value: toml::Table = toml::from_str(&output).unwrap();
        let canvas = value["canvas"].as_table().unwrap();
        assert_eq!(canvas["width"].as_float(), Some(340.0));
        assert_eq!(canvas["height"].as_float(), Some(300.0));

        let nodes = value["node"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        let anna = nodes[0].as_table().unwrap();
        assert_eq!(anna["id"].as_str(), Some("anna"));
        assert_eq!(anna["name"].as_str(), Some("Anna Keller"));
        assert_eq!(anna["gender"].as_str(), Some("female"));
        assert_eq!(anna["lifespan"].as_str(), Some("b. 1950"));
        assert_eq!(anna["level"].as_integer(), Some(0));
        assert!(!nodes[1].as_table().unwrap().contains_key("lifespan"));

        let connections = value["connection"].as_array().unwrap();
        assert_eq!(connections.len(), 2);
        let spouse = connections[0].as_table().unwrap();
        assert_eq!(spouse["kind"].as_str(), Some("spouse"));
        assert_eq!(spouse["points"].as_array().map(Vec::len), Some(2));
        let parent = connections[1].as_table().unwrap();
        assert_eq!(parent["kind"].as_str(), Some("parent"));
        assert_eq!(parent["to"].as_str(), Some("max"));
        assert_eq!(parent["points"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_empty_layout_document() {
        let layout = layout(&[], &[], &LayoutConfig::default());

        let mut exporter = Document::new(Insets::uniform(10.0));
        exporter.export_layout(&layout).unwrap();

        let value: toml::Table = toml::from_str(exporter.output()).unwrap();
        let canvas = value["canvas"].as_table().unwrap();
        assert_eq!(canvas["width"].as_float(), Some(20.0));
        assert_eq!(canvas["height"].as_float(), Some(20.0));
    }
}

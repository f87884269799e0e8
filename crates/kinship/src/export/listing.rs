//! Plain-text listing of a layout.
//!
//! ```text
//! canvas 340 x 300
//!
//! nodes (3)
//!   anna   Anna Keller   level 0  x 40    y 60   b. 1950
//!   josef  Josef Keller  level 0  x 180   y 60
//!   max    Max Keller    level 1  x 110   y 180
//!
//! connections (2)
//!   spouse  anna -> josef  (160, 90) (180, 90)
//!   parent  anna -> max    (170, 120) (170, 150) (170, 150) (170, 180)
//! ```

use std::fmt::Write;

use kinship_core::geometry::Insets;

use crate::{
    export::{self, Exporter},
    layout::FamilyLayout,
};

/// Exporter producing an aligned, human-readable listing.
#[derive(Debug, Clone)]
pub struct Listing {
    margin: Insets,
    output: String,
}

impl Listing {
    pub fn new(margin: Insets) -> Self {
        Self {
            margin,
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Exporter for Listing {
    fn export_layout(&mut self, layout: &FamilyLayout) -> Result<(), export::Error> {
        let out = &mut self.output;
        let canvas = layout.canvas_size(self.margin);
        writeln!(out, "canvas {} x {}", canvas.width(), canvas.height())?;

        let rows: Vec<_> = layout
            .nodes()
            .iter()
            .map(|node| {
                (
                    node.id().as_string(),
                    node.person().display_name(),
                    node,
                )
            })
            .collect();
        let id_width = rows.iter().map(|(id, _, _)| id.len()).max().unwrap_or(0);
        let name_width = rows.iter().map(|(_, name, _)| name.len()).max().unwrap_or(0);

        writeln!(out)?;
        writeln!(out, "nodes ({})", rows.len())?;
        for (id, name, node) in &rows {
            let position = format!("x {:<5} y {:<5}", node.x(), node.y());
            let line = match node.person().lifespan() {
                Some(lifespan) => format!(
                    "  {id:<id_width$}  {name:<name_width$}  level {}  {position} {lifespan}",
                    node.level()
                ),
                None => format!(
                    "  {id:<id_width$}  {name:<name_width$}  level {}  {position}",
                    node.level()
                ),
            };
            writeln!(out, "{}", line.trim_end())?;
        }

        let links: Vec<_> = layout
            .connections()
            .iter()
            .map(|connection| {
                let link = format!("{} -> {}", connection.from_person(), connection.to_person());
                (connection, link)
            })
            .collect();
        let link_width = links.iter().map(|(_, link)| link.len()).max().unwrap_or(0);

        writeln!(out)?;
        writeln!(out, "connections ({})", links.len())?;
        for (connection, link) in &links {
            let points: Vec<String> = connection
                .waypoints()
                .iter()
                .map(|point| format!("({}, {})", point.x(), point.y()))
                .collect();
            writeln!(
                out,
                "  {:<6}  {link:<link_width$}  {}",
                connection.kind().as_str(),
                points.join(" ")
            )?;
        }

        Ok(())
    }
}

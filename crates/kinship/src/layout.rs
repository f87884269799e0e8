//! Family tree layout.
//!
//! This module turns a family snapshot into absolute coordinates for every
//! person plus the line geometry that connects them. The algorithm lives in
//! [`Engine`]; this module holds its output types.
//!
//! # Output
//!
//! - [`PlacedNode`] - a person with the top-left corner of its box and its
//!   generation level
//! - [`Connection`] - a spouse line or a parent-to-child elbow
//! - [`FamilyLayout`] - all nodes and connections of one layout pass
//!
//! A renderer draws what it receives and must not move anything. It should
//! size its surface with [`FamilyLayout::canvas_size`].

mod engine;

pub use engine::Engine;

use std::fmt;

use kinship_core::{
    family::{Person, Relationship},
    geometry::{Bounds, Insets, Point, Size},
    identifier::PersonId,
};

use crate::config::LayoutConfig;

/// Lays out one family graph.
///
/// Convenience wrapper around [`Engine::calculate`].
///
/// # Examples
///
/// ```
/// use kinship::{
///     config::LayoutConfig,
///     family::{Person, Relationship},
///     layout,
/// };
///
/// let persons = vec![
///     Person::new("anna", "Anna", "Keller"),
///     Person::new("josef", "Josef", "Keller"),
///     Person::new("max", "Max", "Keller"),
/// ];
/// let relationships = vec![
///     Relationship::spouse("anna", "josef"),
///     Relationship::parent("anna", "max"),
/// ];
///
/// let layout = layout::layout(&persons, &relationships, &LayoutConfig::default());
///
/// assert_eq!(layout.len(), 3);
/// assert_eq!(layout.connections().len(), 2);
/// ```
pub fn layout<'a>(
    persons: &'a [Person],
    relationships: &[Relationship],
    config: &LayoutConfig,
) -> FamilyLayout<'a> {
    Engine::from_config(config).calculate(persons, relationships)
}

/// A person placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode<'a> {
    person: &'a Person,
    position: Point,
    level: usize,
}

impl<'a> PlacedNode<'a> {
    pub(crate) fn new(person: &'a Person, position: Point, level: usize) -> Self {
        Self {
            person,
            position,
            level,
        }
    }

    /// Returns the placed person.
    pub fn person(&self) -> &'a Person {
        self.person
    }

    /// Returns the id of the placed person.
    pub fn id(&self) -> PersonId {
        self.person.id()
    }

    /// Returns the top-left corner of the person's box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    /// Returns the generation row; 0 for roots and orphans.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the box of this node for the given node size.
    pub fn bounds(&self, node_size: Size) -> Bounds {
        self.position.to_bounds(node_size)
    }

    pub(crate) fn shift_x(&mut self, dx: f32) {
        self.position = self.position.shift_x(dx);
    }
}

/// The kind of line a [`Connection`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Parent-to-child link, drawn as an elbow.
    Parent,
    /// Link between the two persons of a couple, drawn straight.
    Spouse,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Spouse => "spouse",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line between two placed persons.
///
/// For parent connections `from_person` is the person whose subtree placed
/// the child (the primary of the couple) and `from` is the bottom of the
/// couple's midpoint. For spouse connections `from` is the right middle of
/// the left box and `to` the left middle of the right box.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    kind: ConnectionKind,
    from_person: PersonId,
    to_person: PersonId,
    from: Point,
    to: Point,
}

impl Connection {
    pub(crate) fn parent(parent: PersonId, child: PersonId, from: Point, to: Point) -> Self {
        Self {
            kind: ConnectionKind::Parent,
            from_person: parent,
            to_person: child,
            from,
            to,
        }
    }

    pub(crate) fn spouse(left: PersonId, right: PersonId, from: Point, to: Point) -> Self {
        Self {
            kind: ConnectionKind::Spouse,
            from_person: left,
            to_person: right,
            from,
            to,
        }
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    pub fn from_person(&self) -> PersonId {
        self.from_person
    }

    pub fn to_person(&self) -> PersonId {
        self.to_person
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    /// Returns the polyline to draw.
    ///
    /// Spouse lines are a single segment. Parent lines are a three-segment
    /// elbow: down from the parents, across at half height, down into the
    /// child.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kinship::family::{Person, Relationship};
    /// # use kinship::{config::LayoutConfig, layout};
    /// # use kinship::geometry::Point;
    /// let persons = vec![Person::new("p", "P", ""), Person::new("c", "C", "")];
    /// let relationships = vec![Relationship::parent("p", "c")];
    /// let layout = layout::layout(&persons, &relationships, &LayoutConfig::default());
    ///
    /// let elbow = layout.connections()[0].waypoints();
    /// assert_eq!(elbow.len(), 4);
    /// assert_eq!(elbow[1].y(), elbow[2].y());
    /// assert_eq!(elbow[0].x(), elbow[1].x());
    /// assert_eq!(elbow[2].x(), elbow[3].x());
    /// ```
    pub fn waypoints(&self) -> Vec<Point> {
        match self.kind {
            ConnectionKind::Spouse => vec![self.from, self.to],
            ConnectionKind::Parent => {
                let mid_y = self.from.midpoint(self.to).y();
                vec![
                    self.from,
                    self.from.with_y(mid_y),
                    self.to.with_y(mid_y),
                    self.to,
                ]
            }
        }
    }

    pub(crate) fn shift_x(&mut self, dx: f32) {
        self.from = self.from.shift_x(dx);
        self.to = self.to.shift_x(dx);
    }
}

/// The result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyLayout<'a> {
    nodes: Vec<PlacedNode<'a>>,
    connections: Vec<Connection>,
    node_size: Size,
}

impl<'a> FamilyLayout<'a> {
    pub(crate) fn new(
        nodes: Vec<PlacedNode<'a>>,
        connections: Vec<Connection>,
        node_size: Size,
    ) -> Self {
        Self {
            nodes,
            connections,
            node_size,
        }
    }

    /// Returns every placed person, each exactly once.
    pub fn nodes(&self) -> &[PlacedNode<'a>] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the box size every node was placed with.
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Finds the node of a person.
    pub fn node(&self, id: PersonId) -> Option<&PlacedNode<'a>> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the smallest box containing every node, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(|node| node.bounds(self.node_size))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Returns the drawing surface needed to show every node unclipped.
    ///
    /// The surface starts at the origin and reaches past the right-most and
    /// bottom-most box by the right and bottom margin.
    pub fn canvas_size(&self, margin: Insets) -> Size {
        match self.bounds() {
            Some(bounds) => Size::new(
                bounds.max_x() + margin.right(),
                bounds.max_y() + margin.bottom(),
            ),
            None => Size::new(margin.horizontal_sum(), margin.vertical_sum()),
        }
    }
}

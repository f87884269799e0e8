//! Depth-first family tree layout engine
//!
//! Persons are placed depth first from each root. A person and their spouse
//! form one couple box; the couple's children are packed left to right one
//! generation below and centered against the couple. Every subtree is
//! computed as a self-contained block that reports its horizontal extent, and
//! the caller translates the block into place instead of sharing a mutable
//! cursor with it.
//!
//! ```text
//!          ┌──────┐    ┌──────┐
//!          │ Anna │────│Josef │        level 0
//!          └──────┘    └──────┘
//!                  │
//!        ┌─────────┴─────────┐
//!    ┌───┴──┐            ┌───┴──┐
//!    │ Max  │            │ Lena │      level 1
//!    └──────┘            └──────┘
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use kinship_core::{
    family::{Person, Relationship},
    geometry::{Insets, Point, Size},
    identifier::PersonId,
};

use crate::{
    config::LayoutConfig,
    layout::{Connection, ConnectionKind, FamilyLayout, PlacedNode},
    structure::FamilyIndex,
};

/// Family tree layout engine.
///
/// The engine holds only constants; every call to [`Engine::calculate`] owns
/// its own working state, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Engine {
    node_size: Size,
    level_height: f32,
    node_gap: f32,
    spouse_gap: f32,
    family_gap: f32,
    margin: Insets,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Engine {
    /// Create an engine with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from layout configuration
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            node_size: config.node_size(),
            level_height: config.level_height(),
            node_gap: config.node_gap(),
            spouse_gap: config.spouse_gap(),
            family_gap: config.family_gap(),
            margin: config.margin(),
        }
    }

    /// Calculate the layout of a family snapshot.
    ///
    /// Never fails: dangling edges, cycles, duplicate spouses and a missing
    /// root are absorbed (see [`crate::structure`]).
    pub fn calculate<'a>(
        &self,
        persons: &'a [Person],
        relationships: &[Relationship],
    ) -> FamilyLayout<'a> {
        let index = FamilyIndex::new(persons, relationships);
        self.calculate_indexed(&index)
    }

    /// Calculate the layout from a prebuilt index.
    pub fn calculate_indexed<'a>(&self, index: &FamilyIndex<'a>) -> FamilyLayout<'a> {
        info!(persons = index.len(); "Calculating family layout");

        let mut roots = index.roots();
        if roots.is_empty() {
            if let Some(first) = index.persons().next() {
                warn!(
                    person:% = first.id();
                    "No person without parents found; using the first person as root"
                );
                roots.push(first.id());
            }
        }
        debug!(roots = roots.len(); "Roots selected");

        let mut pass = Pass::new(self, index);
        let mut placed = Subtree::empty(self.margin.left());
        let mut cursor = self.margin.left();

        for root in roots {
            let subtree = pass.place(root, 0, cursor);
            if subtree.is_empty() {
                trace!(root:% = root; "Root already placed with another family");
                continue;
            }
            cursor = subtree.right + self.family_gap;
            placed.absorb(subtree);
        }

        let mut orphans = 0;
        for person in index.persons() {
            if !pass.visit(person.id()) {
                continue;
            }
            let position = Point::new(cursor, self.row_y(0));
            trace!(person:% = person.id(), x = position.x(); "Placed orphan");
            placed.nodes.push(PlacedNode::new(person, position, 0));
            cursor += self.node_size.width() + self.node_gap;
            orphans += 1;
        }
        if orphans > 0 {
            debug!(orphans; "Placed persons unreachable from any root");
        }

        self.link_placed_parents(&pass, &mut placed);

        info!(
            nodes = placed.nodes.len(),
            connections = placed.connections.len();
            "Family layout calculated"
        );

        FamilyLayout::new(placed.nodes, placed.connections, self.node_size)
    }

    /// Vertical position of a generation row.
    fn row_y(&self, level: usize) -> f32 {
        self.margin.top() + level as f32 * self.level_height
    }

    /// Draws parent edges whose child was laid out under another parent.
    ///
    /// Each (couple, child) pair is linked once, and only downward: edges
    /// closing a parent cycle stay undrawn.
    fn link_placed_parents<'a>(&self, pass: &Pass<'_, '_, 'a>, placed: &mut Subtree<'a>) {
        let positions: HashMap<PersonId, (Point, usize)> = placed
            .nodes
            .iter()
            .map(|node| (node.id(), (node.position(), node.level())))
            .collect();
        let mut linked: HashSet<(PersonId, PersonId)> = placed
            .connections
            .iter()
            .filter(|connection| connection.kind() == ConnectionKind::Parent)
            .map(|connection| (connection.from_person(), connection.to_person()))
            .collect();

        let mut added = 0;
        for person in pass.index.persons() {
            let primary = pass.primary_of(person.id());
            let Some(&(origin, level)) = positions.get(&primary) else {
                continue;
            };
            for &child in pass.index.children(person.id()) {
                let Some(&(target, child_level)) = positions.get(&child) else {
                    continue;
                };
                if child_level <= level || !linked.insert((primary, child)) {
                    continue;
                }
                placed.connections.push(Connection::parent(
                    primary,
                    child,
                    self.drop_point(origin, pass.has_spouse(primary)),
                    self.child_top(target),
                ));
                added += 1;
            }
        }
        if added > 0 {
            debug!(connections = added; "Linked children placed under another parent");
        }
    }

    /// Bottom center of the couple whose primary box starts at `position`.
    fn drop_point(&self, position: Point, with_spouse: bool) -> Point {
        Point::new(
            position.x() + self.couple_width(with_spouse) / 2.0,
            position.y() + self.node_size.height(),
        )
    }

    /// Top center of the box starting at `position`.
    fn child_top(&self, position: Point) -> Point {
        Point::new(position.x() + self.node_size.width() / 2.0, position.y())
    }

    /// Width of a single box or of a couple.
    fn couple_width(&self, with_spouse: bool) -> f32 {
        if with_spouse {
            2.0 * self.node_size.width() + self.spouse_gap
        } else {
            self.node_size.width()
        }
    }
}

/// A laid-out block: one person, their spouse and all their descendants.
///
/// Every node of the block lies horizontally within `left..=right`.
#[derive(Debug)]
struct Subtree<'a> {
    nodes: Vec<PlacedNode<'a>>,
    connections: Vec<Connection>,
    /// The block's primary person and the top-left corner of their box.
    anchor: Option<(PersonId, Point)>,
    left: f32,
    right: f32,
}

impl<'a> Subtree<'a> {
    fn empty(left: f32) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            anchor: None,
            left,
            right: left,
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn width(&self) -> f32 {
        self.right - self.left
    }

    fn translate(&mut self, dx: f32) {
        if dx == 0.0 {
            return;
        }
        for node in &mut self.nodes {
            node.shift_x(dx);
        }
        for connection in &mut self.connections {
            connection.shift_x(dx);
        }
        if let Some((_, anchor)) = &mut self.anchor {
            *anchor = anchor.shift_x(dx);
        }
        self.left += dx;
        self.right += dx;
    }

    /// Moves the nodes and connections of `other` into this block.
    fn absorb(&mut self, other: Subtree<'a>) {
        self.nodes.extend(other.nodes);
        self.connections.extend(other.connections);
    }
}

/// A person whose children are still being laid out.
struct Frame<'a> {
    person: &'a Person,
    spouse: Option<&'a Person>,
    level: usize,
    left: f32,
    cursor: f32,
    pending: indexmap::set::IntoIter<PersonId>,
    children: Vec<Subtree<'a>>,
}

/// Working state of one layout call.
struct Pass<'e, 'i, 'a> {
    engine: &'e Engine,
    index: &'i FamilyIndex<'a>,
    visited: HashSet<PersonId>,
    /// Spouse placed next to each couple's primary person.
    spouses: HashMap<PersonId, PersonId>,
    /// Primary person of each placed spouse.
    primaries: HashMap<PersonId, PersonId>,
}

impl<'e, 'i, 'a> Pass<'e, 'i, 'a> {
    fn new(engine: &'e Engine, index: &'i FamilyIndex<'a>) -> Self {
        Self {
            engine,
            index,
            visited: HashSet::with_capacity(index.len()),
            spouses: HashMap::new(),
            primaries: HashMap::new(),
        }
    }

    /// Marks a person as placed. Returns false if they already were.
    fn visit(&mut self, id: PersonId) -> bool {
        self.visited.insert(id)
    }

    /// Returns the person whose box anchors the couple `id` belongs to.
    fn primary_of(&self, id: PersonId) -> PersonId {
        self.primaries.get(&id).copied().unwrap_or(id)
    }

    fn has_spouse(&self, id: PersonId) -> bool {
        self.spouses.contains_key(&id)
    }

    /// Lays out `id`, their spouse and their descendants starting at `left`.
    ///
    /// Generations are walked with an explicit stack of frames, so the depth
    /// of an ancestry line is bounded by memory, not by the call stack.
    fn place(&mut self, id: PersonId, level: usize, left: f32) -> Subtree<'a> {
        let Some(root) = self.open(id, level, left) else {
            return Subtree::empty(left);
        };
        let mut stack = vec![root];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.next() {
                let (level, cursor) = (frame.level + 1, frame.cursor);
                if let Some(child_frame) = self.open(child, level, cursor) {
                    stack.push(child_frame);
                }
                continue;
            }

            let Some(frame) = stack.pop() else { break };
            let subtree = self.close(frame);
            match stack.last_mut() {
                Some(parent) => {
                    parent.cursor = subtree.right + self.engine.node_gap;
                    parent.children.push(subtree);
                }
                None => return subtree,
            }
        }

        Subtree::empty(left)
    }

    /// Claims a person and their spouse, and lists the couple's children.
    ///
    /// Returns `None` for unknown or already placed persons.
    fn open(&mut self, id: PersonId, level: usize, left: f32) -> Option<Frame<'a>> {
        let index = self.index;
        let person = index.person(id)?;
        if !self.visit(id) {
            trace!(person:% = id; "Person already placed");
            return None;
        }

        let spouse = index
            .spouse(id)
            .filter(|spouse| !self.visited.contains(spouse))
            .and_then(|spouse| index.person(spouse));
        if let Some(spouse) = spouse {
            self.visit(spouse.id());
            self.spouses.insert(id, spouse.id());
            self.primaries.insert(spouse.id(), id);
        }

        let spouse_children = spouse
            .map(|spouse| index.children(spouse.id()))
            .unwrap_or_default();
        let child_ids: IndexSet<PersonId> = index
            .children(id)
            .iter()
            .chain(spouse_children)
            .copied()
            .collect();

        Some(Frame {
            person,
            spouse,
            level,
            left,
            cursor: left,
            pending: child_ids.into_iter(),
            children: Vec::new(),
        })
    }

    /// Places the couple of a finished frame against its children.
    fn close(&self, frame: Frame<'a>) -> Subtree<'a> {
        let engine = self.engine;
        let Frame {
            person,
            spouse,
            level,
            left,
            children,
            ..
        } = frame;
        let id = person.id();

        let children_right = children.last().map_or(left, |subtree| subtree.right);
        let children_width = children_right - left;
        let couple_width = engine.couple_width(spouse.is_some());

        // The wider of the couple and the children block sets the extent; the
        // narrower one is centered against it.
        let (couple_left, right, children_shift) = if children_width > couple_width {
            let couple_left = left + (children_width - couple_width) / 2.0;
            (couple_left, children_right, 0.0)
        } else {
            let shift = (couple_width - children_width) / 2.0;
            (left, left + couple_width, shift)
        };

        let y = engine.row_y(level);
        let node_width = engine.node_size.width();
        let half_height = engine.node_size.height() / 2.0;

        let mut subtree = Subtree::empty(left);
        subtree.right = right;

        let position = Point::new(couple_left, y);
        subtree.anchor = Some((id, position));
        subtree.nodes.push(PlacedNode::new(person, position, level));
        trace!(person:% = id, level, x = position.x(), y; "Placed person");

        if let Some(spouse) = spouse {
            let spouse_position = position.shift_x(node_width + engine.spouse_gap);
            subtree
                .nodes
                .push(PlacedNode::new(spouse, spouse_position, level));
            subtree.connections.push(Connection::spouse(
                id,
                spouse.id(),
                Point::new(couple_left + node_width, y + half_height),
                Point::new(spouse_position.x(), y + half_height),
            ));
            trace!(person:% = spouse.id(), level, x = spouse_position.x(), y; "Placed spouse");
        }

        let drop_point = engine.drop_point(position, spouse.is_some());
        for mut child in children {
            child.translate(children_shift);
            if let Some((child_id, anchor)) = child.anchor {
                subtree.connections.push(Connection::parent(
                    id,
                    child_id,
                    drop_point,
                    engine.child_top(anchor),
                ));
            }
            subtree.absorb(child);
        }

        debug_assert!(subtree.width() >= couple_width);
        subtree
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::ConnectionKind;

    fn person(id: &str) -> Person {
        Person::new(id, id, "")
    }

    fn node_x(layout: &FamilyLayout, id: &str) -> f32 {
        layout.node(PersonId::new(id)).unwrap().x()
    }

    fn node_y(layout: &FamilyLayout, id: &str) -> f32 {
        layout.node(PersonId::new(id)).unwrap().y()
    }

    #[test]
    fn test_empty_input() {
        let layout = Engine::new().calculate(&[], &[]);

        assert!(layout.is_empty());
        assert!(layout.connections().is_empty());
    }

    #[test]
    fn test_single_person_at_origin() {
        let persons = vec![person("solo")];
        let layout = Engine::new().calculate(&persons, &[]);

        assert_eq!(layout.len(), 1);
        assert_approx_eq!(f32, node_x(&layout, "solo"), 40.0);
        assert_approx_eq!(f32, node_y(&layout, "solo"), 60.0);
        assert!(layout.connections().is_empty());
    }

    #[test]
    fn test_couple_with_child_is_centered() {
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::spouse("a", "b"), Relationship::parent("a", "c")];

        let layout = Engine::new().calculate(&persons, &relationships);

        // Couple spans 40..300, the child is centered below its midpoint.
        assert_approx_eq!(f32, node_x(&layout, "a"), 40.0);
        assert_approx_eq!(f32, node_x(&layout, "b"), 180.0);
        assert_approx_eq!(f32, node_y(&layout, "b"), 60.0);
        assert_approx_eq!(f32, node_x(&layout, "c"), 110.0);
        assert_approx_eq!(f32, node_y(&layout, "c"), 180.0);

        let spouse: Vec<_> = layout
            .connections()
            .iter()
            .filter(|c| c.kind() == ConnectionKind::Spouse)
            .collect();
        let parent: Vec<_> = layout
            .connections()
            .iter()
            .filter(|c| c.kind() == ConnectionKind::Parent)
            .collect();
        assert_eq!(spouse.len(), 1);
        assert_eq!(parent.len(), 1);

        assert_eq!(spouse[0].from(), Point::new(160.0, 90.0));
        assert_eq!(spouse[0].to(), Point::new(180.0, 90.0));
        assert_eq!(parent[0].from(), Point::new(170.0, 120.0));
        assert_eq!(parent[0].to(), Point::new(170.0, 180.0));
        assert_eq!(parent[0].to_person(), PersonId::new("c"));
    }

    #[test]
    fn test_wide_children_center_parent() {
        let persons = vec![person("p"), person("x"), person("y"), person("z")];
        let relationships = vec![
            Relationship::parent("p", "x"),
            Relationship::parent("p", "y"),
            Relationship::parent("p", "z"),
        ];

        let layout = Engine::new().calculate(&persons, &relationships);

        // Children occupy 40..440 with 20 gaps; the parent sits over the middle.
        assert_approx_eq!(f32, node_x(&layout, "x"), 40.0);
        assert_approx_eq!(f32, node_x(&layout, "y"), 180.0);
        assert_approx_eq!(f32, node_x(&layout, "z"), 320.0);
        assert_approx_eq!(f32, node_x(&layout, "p"), 180.0);
        assert_eq!(layout.connections().len(), 3);
    }

    #[test]
    fn test_spouse_children_belong_to_couple() {
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::spouse("a", "b"), Relationship::parent("b", "c")];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_approx_eq!(f32, node_y(&layout, "c"), node_y(&layout, "b") + 120.0);
        let parent = layout
            .connections()
            .iter()
            .find(|c| c.kind() == ConnectionKind::Parent)
            .unwrap();
        assert_eq!(parent.from_person(), PersonId::new("a"));
        assert_eq!(parent.to_person(), PersonId::new("c"));
    }

    #[test]
    fn test_two_roots_keep_family_gap() {
        let persons = vec![person("a"), person("b")];
        let layout = Engine::new().calculate(&persons, &[]);

        assert_approx_eq!(f32, node_x(&layout, "a"), 40.0);
        assert_approx_eq!(f32, node_x(&layout, "b"), 200.0);
        assert_approx_eq!(f32, node_y(&layout, "a"), node_y(&layout, "b"));
    }

    #[test]
    fn test_spouse_root_is_not_placed_twice() {
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::spouse("a", "b")];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), 3);
        // b is placed with a, so c follows the couple directly.
        assert_approx_eq!(f32, node_x(&layout, "c"), 340.0);
    }

    #[test]
    fn test_parent_cycle_falls_back_to_first_person() {
        let persons = vec![person("a"), person("b")];
        let relationships = vec![Relationship::parent("a", "b"), Relationship::parent("b", "a")];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.node(PersonId::new("a")).unwrap().level(), 0);
        assert_eq!(layout.node(PersonId::new("b")).unwrap().level(), 1);
        assert_eq!(layout.connections().len(), 1);
    }

    #[test]
    fn test_cycle_beside_tree_becomes_orphans() {
        let persons = vec![person("r"), person("k"), person("x"), person("y")];
        let relationships = vec![
            Relationship::parent("r", "k"),
            Relationship::parent("x", "y"),
            Relationship::parent("y", "x"),
        ];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), 4);
        // r's family ends at 160; orphans start after the family gap.
        assert_approx_eq!(f32, node_x(&layout, "x"), 200.0);
        assert_approx_eq!(f32, node_x(&layout, "y"), 340.0);
        assert_approx_eq!(f32, node_y(&layout, "x"), 60.0);
        assert_eq!(layout.connections().len(), 1);
    }

    #[test]
    fn test_unrelated_person_follows_family() {
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::parent("a", "b")];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.node(PersonId::new("b")).unwrap().level(), 1);
        assert_approx_eq!(f32, node_x(&layout, "c"), 200.0);
        assert_approx_eq!(f32, node_y(&layout, "c"), 60.0);

        let size = layout.node_size();
        let c = layout.node(PersonId::new("c")).unwrap().bounds(size);
        for id in ["a", "b"] {
            let other = layout.node(PersonId::new(id)).unwrap().bounds(size);
            assert!(!c.intersects(&other), "c overlaps {id}");
        }
    }

    #[test]
    fn test_child_of_two_unmarried_parents_links_both() {
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::parent("a", "c"), Relationship::parent("b", "c")];

        let layout = Engine::new().calculate(&persons, &relationships);

        let parents: Vec<_> = layout
            .connections()
            .iter()
            .filter(|c| c.kind() == ConnectionKind::Parent)
            .map(|c| (c.from_person(), c.to_person()))
            .collect();
        assert_eq!(
            parents,
            vec![
                (PersonId::new("a"), PersonId::new("c")),
                (PersonId::new("b"), PersonId::new("c")),
            ]
        );

        // b sits beside a's family; its elbow still ends on top of c.
        let late = &layout.connections()[1];
        assert_eq!(late.from(), Point::new(260.0, 120.0));
        assert_eq!(late.to(), Point::new(100.0, 180.0));
    }

    #[test]
    fn test_late_link_starts_at_couple_midpoint() {
        let persons = vec![person("a"), person("b"), person("s"), person("c")];
        let relationships = vec![
            Relationship::parent("a", "c"),
            Relationship::spouse("b", "s"),
            Relationship::parent("s", "c"),
        ];

        let layout = Engine::new().calculate(&persons, &relationships);

        let late = layout
            .connections()
            .iter()
            .find(|c| c.kind() == ConnectionKind::Parent && c.from_person() == PersonId::new("b"))
            .unwrap();
        // Couple b+s spans 200..460.
        assert_eq!(late.from(), Point::new(330.0, 120.0));
        assert_eq!(late.to_person(), PersonId::new("c"));
        assert_eq!(layout.connections().len(), 3);
    }

    #[test]
    fn test_long_ancestry_line() {
        let count = 5000;
        let persons: Vec<_> = (0..count)
            .map(|i| person(format!("g{i}").as_str()))
            .collect();
        let relationships: Vec<_> = (1..count)
            .map(|i| Relationship::parent(format!("g{}", i - 1).as_str(), format!("g{i}").as_str()))
            .collect();

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), count);
        assert_eq!(layout.connections().len(), count - 1);
        let last = layout.node(PersonId::new("g4999")).unwrap();
        assert_eq!(last.level(), count - 1);
        assert_approx_eq!(f32, last.x(), 40.0);
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let persons = vec![person("a")];
        let relationships = vec![
            Relationship::parent("ghost", "a"),
            Relationship::spouse("a", "nobody"),
        ];

        let layout = Engine::new().calculate(&persons, &relationships);

        assert_eq!(layout.len(), 1);
        assert!(layout.connections().is_empty());
    }

    #[test]
    fn test_custom_constants() {
        let config = LayoutConfig::default()
            .with_node_size(Size::new(100.0, 40.0))
            .with_level_height(80.0)
            .with_spouse_gap(10.0)
            .with_margin(Insets::uniform(0.0));
        let persons = vec![person("a"), person("b"), person("c")];
        let relationships = vec![Relationship::spouse("a", "b"), Relationship::parent("a", "c")];

        let layout = Engine::from_config(&config).calculate(&persons, &relationships);

        assert_approx_eq!(f32, node_x(&layout, "a"), 0.0);
        assert_approx_eq!(f32, node_x(&layout, "b"), 110.0);
        assert_approx_eq!(f32, node_x(&layout, "c"), 55.0);
        assert_approx_eq!(f32, node_y(&layout, "c"), 80.0);
    }

    #[test]
    fn test_subtree_translate_moves_everything() {
        let a = person("a");
        let mut subtree = Subtree::empty(10.0);
        subtree.right = 130.0;
        subtree.anchor = Some((a.id(), Point::new(10.0, 60.0)));
        subtree
            .nodes
            .push(PlacedNode::new(&a, Point::new(10.0, 60.0), 0));

        subtree.translate(5.0);

        assert_approx_eq!(f32, subtree.left, 15.0);
        assert_approx_eq!(f32, subtree.right, 135.0);
        assert_approx_eq!(f32, subtree.width(), 120.0);
        assert_approx_eq!(f32, subtree.nodes[0].x(), 15.0);
        assert_eq!(subtree.anchor.map(|(_, p)| p), Some(Point::new(15.0, 60.0)));
    }
}

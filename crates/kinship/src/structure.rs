//! Adjacency index over a family snapshot.
//!
//! [`FamilyIndex`] is built once per layout call in a single pass over the
//! persons and relationships. It answers the questions the layout engine asks
//! at every person (who are the children, who is the spouse) in constant
//! time instead of scanning the edge list.
//!
//! # Anomalies
//!
//! Building the index is where malformed input is absorbed:
//! - duplicate person ids keep the first occurrence;
//! - edges naming unknown persons (dangling) are dropped;
//! - self-referencing edges are dropped;
//! - repeated parent edges collapse into one;
//! - a person's first spouse edge wins, later ones are ignored.
//!
//! None of these are errors. They are counted and logged.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};
use petgraph::{
    Direction, algo,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use kinship_core::{
    family::{Person, Relationship, RelationshipKind},
    identifier::PersonId,
};

/// Counters of input anomalies absorbed while building the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub duplicate_persons: usize,
    pub dangling_edges: usize,
    pub self_references: usize,
    pub ignored_spouse_edges: usize,
    pub ignored_other_edges: usize,
}

impl IndexStats {
    fn has_anomalies(&self) -> bool {
        self.duplicate_persons > 0
            || self.dangling_edges > 0
            || self.self_references > 0
            || self.ignored_spouse_edges > 0
    }
}

/// Read-only adjacency index of one family graph.
///
/// Node indices of the parent graph follow the input order of persons, so
/// every iteration over the index is deterministic.
#[derive(Debug)]
pub struct FamilyIndex<'a> {
    persons: IndexMap<PersonId, &'a Person>,
    parent_graph: DiGraph<PersonId, ()>,
    children: Vec<Vec<PersonId>>,
    spouses: HashMap<PersonId, PersonId>,
    stats: IndexStats,
}

impl<'a> FamilyIndex<'a> {
    /// Builds the index from a snapshot.
    pub fn new(persons: &'a [Person], relationships: &[Relationship]) -> Self {
        let mut stats = IndexStats::default();

        let mut by_id = IndexMap::with_capacity(persons.len());
        for person in persons {
            if by_id.contains_key(&person.id()) {
                debug!(person:% = person.id(); "Ignoring duplicate person");
                stats.duplicate_persons += 1;
                continue;
            }
            by_id.insert(person.id(), person);
        }

        let mut parent_graph = DiGraph::with_capacity(by_id.len(), relationships.len());
        for &id in by_id.keys() {
            parent_graph.add_node(id);
        }

        let node_of = |id: PersonId| by_id.get_index_of(&id).map(NodeIndex::new);

        let mut spouses = HashMap::new();
        for relationship in relationships {
            if let RelationshipKind::Other(kind) = relationship.kind() {
                debug!(kind = kind.as_str(); "Ignoring relationship without layout meaning");
                stats.ignored_other_edges += 1;
                continue;
            }

            if relationship.is_self_reference() {
                debug!(
                    kind:% = relationship.kind(),
                    person:% = relationship.from();
                    "Dropping self-referencing relationship"
                );
                stats.self_references += 1;
                continue;
            }

            let (Some(from), Some(to)) = (node_of(relationship.from()), node_of(relationship.to()))
            else {
                debug!(
                    kind:% = relationship.kind(),
                    from:% = relationship.from(),
                    to:% = relationship.to();
                    "Dropping dangling relationship"
                );
                stats.dangling_edges += 1;
                continue;
            };

            match relationship.kind() {
                RelationshipKind::Parent => {
                    parent_graph.update_edge(from, to, ());
                }
                RelationshipKind::Spouse => {
                    let (a, b) = (relationship.from(), relationship.to());
                    let mut used = false;
                    if !spouses.contains_key(&a) {
                        spouses.insert(a, b);
                        used = true;
                    }
                    if !spouses.contains_key(&b) {
                        spouses.insert(b, a);
                        used = true;
                    }
                    if !used {
                        debug!(a:% = a, b:% = b; "Ignoring additional spouse relationship");
                        stats.ignored_spouse_edges += 1;
                    }
                }
                RelationshipKind::Other(_) => {}
            }
        }

        let children = parent_graph
            .node_indices()
            .map(|node| {
                let mut edges: Vec<_> = parent_graph
                    .edges_directed(node, Direction::Outgoing)
                    .collect();
                edges.sort_by_key(|edge| edge.id());
                edges
                    .into_iter()
                    .map(|edge| parent_graph[edge.target()])
                    .collect()
            })
            .collect();

        if stats.has_anomalies() {
            debug!(
                duplicate_persons = stats.duplicate_persons,
                dangling_edges = stats.dangling_edges,
                self_references = stats.self_references,
                ignored_spouse_edges = stats.ignored_spouse_edges;
                "Family snapshot contained anomalies"
            );
        }

        let index = Self {
            persons: by_id,
            parent_graph,
            children,
            spouses,
            stats,
        };

        if index.has_parent_cycle() {
            warn!("Parent relationships form a cycle; affected persons may lose connections");
        }

        index
    }

    /// Returns the number of distinct persons.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Returns true if the snapshot holds no persons.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Iterates over the distinct persons in input order.
    pub fn persons(&self) -> impl Iterator<Item = &'a Person> + '_ {
        self.persons.values().copied()
    }

    /// Looks up a person by id.
    pub fn person(&self, id: PersonId) -> Option<&'a Person> {
        self.persons.get(&id).copied()
    }

    /// Returns the persons nobody names as their child, in input order.
    pub fn roots(&self) -> Vec<PersonId> {
        self.parent_graph
            .node_indices()
            .filter(|&node| {
                self.parent_graph
                    .neighbors_directed(node, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|node| self.parent_graph[node])
            .collect()
    }

    /// Returns the children of a person in the order their edges were first seen.
    pub fn children(&self, id: PersonId) -> &[PersonId] {
        self.persons
            .get_index_of(&id)
            .and_then(|index| self.children.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the spouse that drives layout for this person, if any.
    pub fn spouse(&self, id: PersonId) -> Option<PersonId> {
        self.spouses.get(&id).copied()
    }

    /// Returns true if following parent edges can lead back to the start.
    pub fn has_parent_cycle(&self) -> bool {
        algo::is_cyclic_directed(&self.parent_graph)
    }

    /// Returns the anomaly counters collected while building the index.
    pub fn stats(&self) -> IndexStats {
        self.stats
    }
}

//! The family snapshot model: persons and the relationships between them.
//!
//! A [`Family`] is the plain snapshot a data-loading layer hands to the layout
//! engine. It is deserializable from a TOML document:
//!
//! ```toml
//! [[person]]
//! id = "anna"
//! first_name = "Anna"
//! last_name = "Keller"
//! gender = "female"
//! birth_date = "1931-04-02"
//!
//! [[relationship]]
//! kind = "spouse"
//! from = "anna"
//! to = "josef"
//! ```
//!
//! Only [`RelationshipKind::Parent`] and [`RelationshipKind::Spouse`] carry
//! layout meaning. Every other kind string is preserved as
//! [`RelationshipKind::Other`] and ignored by layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::PersonId;

/// Gender category of a person, used only for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Returns the lowercase name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Self::Male,
            "female" | "f" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person in the family graph.
///
/// Persons are immutable input to layout: the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,

    #[serde(default)]
    first_name: String,

    #[serde(default)]
    last_name: String,

    #[serde(default)]
    gender: Gender,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    death_date: Option<String>,
}

impl Person {
    /// Creates a person with the given id and name parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_core::family::{Gender, Person};
    ///
    /// let anna = Person::new("anna", "Anna", "Keller")
    ///     .with_gender(Gender::Female)
    ///     .with_birth_date("1931-04-02");
    ///
    /// assert_eq!(anna.display_name(), "Anna Keller");
    /// assert_eq!(anna.lifespan().as_deref(), Some("b. 1931"));
    /// ```
    pub fn new(id: impl Into<PersonId>, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: Gender::Unknown,
            birth_date: None,
            death_date: None,
        }
    }

    /// Sets the gender category (builder style).
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the birth date (builder style).
    pub fn with_birth_date(mut self, date: &str) -> Self {
        self.birth_date = Some(date.to_string());
        self
    }

    /// Sets the death date (builder style).
    pub fn with_death_date(mut self, date: &str) -> Self {
        self.death_date = Some(date.to_string());
        self
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.death_date.as_deref()
    }

    /// Returns the name shown on the person's box.
    ///
    /// Non-empty name parts are joined with a space; a person with no name
    /// at all is shown by id.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            self.id.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Returns a short lifespan label built from the year part of the dates.
    ///
    /// Returns `None` when no date is known.
    pub fn lifespan(&self) -> Option<String> {
        let birth = self.birth_date.as_deref().map(year_of);
        let death = self.death_date.as_deref().map(year_of);

        match (birth, death) {
            (Some(birth), Some(death)) => Some(format!("{birth} - {death}")),
            (Some(birth), None) => Some(format!("b. {birth}")),
            (None, Some(death)) => Some(format!("d. {death}")),
            (None, None) => None,
        }
    }
}

/// Takes the leading year of an ISO-like date (`"1931-04-02"` -> `"1931"`).
fn year_of(date: &str) -> &str {
    let date = date.trim();
    date.split(['-', '/']).next().unwrap_or(date)
}

/// The kind of a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipKind {
    /// `from` is a parent of `to`.
    Parent,
    /// `from` and `to` are married or partnered. Direction carries no meaning.
    Spouse,
    /// Any other kind known to the wider system. Ignored by layout.
    Other(String),
}

impl From<String> for RelationshipKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "parent" => Self::Parent,
            "spouse" => Self::Spouse,
            _ => Self::Other(value),
        }
    }
}

impl From<RelationshipKind> for String {
    fn from(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Parent => "parent".to_string(),
            RelationshipKind::Spouse => "spouse".to_string(),
            RelationshipKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Spouse => f.write_str("spouse"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// A typed edge between two persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    kind: RelationshipKind,
    from: PersonId,
    to: PersonId,
}

impl Relationship {
    /// Creates a relationship of any kind.
    pub fn new(kind: RelationshipKind, from: impl Into<PersonId>, to: impl Into<PersonId>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `parent` is a parent of `child`.
    pub fn parent(parent: impl Into<PersonId>, child: impl Into<PersonId>) -> Self {
        Self::new(RelationshipKind::Parent, parent, child)
    }

    /// `a` and `b` are spouses.
    pub fn spouse(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        Self::new(RelationshipKind::Spouse, a, b)
    }

    pub fn kind(&self) -> &RelationshipKind {
        &self.kind
    }

    pub fn from(&self) -> PersonId {
        self.from
    }

    pub fn to(&self) -> PersonId {
        self.to
    }

    /// Returns true if both ends name the same person.
    pub fn is_self_reference(&self) -> bool {
        self.from == self.to
    }
}

/// A snapshot of one household graph.
///
/// Relationships may reference persons that are not part of the snapshot;
/// consumers must tolerate such dangling edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Family {
    #[serde(default, rename = "person")]
    persons: Vec<Person>,

    #[serde(default, rename = "relationship")]
    relationships: Vec<Relationship>,
}

impl Family {
    pub fn new(persons: Vec<Person>, relationships: Vec<Relationship>) -> Self {
        Self {
            persons,
            relationships,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Looks up a person by id. The first match wins.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| person.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

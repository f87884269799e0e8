//! Person identifiers backed by string interning.
//!
//! This module provides the [`PersonId`] type. Backends hand out opaque string
//! identifiers; interning them once makes ids `Copy` and cheap to hash, which
//! is what the layout's adjacency index and visited set need.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// Access goes through a `Mutex`, so ids can be created from any thread.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Opaque identifier of a person in a family graph.
///
/// Two ids compare equal exactly when they were created from the same string.
///
/// # Examples
///
/// ```
/// use kinship_core::identifier::PersonId;
///
/// let alice = PersonId::new("p-001");
/// let again = PersonId::new("p-001");
/// let bob = PersonId::new("p-002");
///
/// assert_eq!(alice, again);
/// assert_ne!(alice, bob);
/// assert_eq!(alice, "p-001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(DefaultSymbol);

impl PersonId {
    /// Creates a `PersonId` from its string form.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier as supplied by the data source
    pub fn new(id: &str) -> Self {
        Self(interner().get_or_intern(id))
    }

    /// Returns the string form of this identifier.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl std::str::FromStr for PersonId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for PersonId {
    /// Allows direct comparison with string slices: `id == "p-001"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for PersonId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::new(&id))
    }
}

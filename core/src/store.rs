//! The parsed attribute mapping and its lookup API.

use std::collections::HashMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::{Attribute, Section, match_any_token, match_in_section};

/// Mapping from attributes to normalized values, populated once by a parse
/// pass and read-only afterwards.
///
/// The store holds at most one value per attribute. Insertion is
/// first-wins: once a value is recorded it cannot be replaced or mutated,
/// so a duplicate label later in the listing never clobbers the first
/// occurrence. Lookups for keys the listing did not supply return `None`,
/// never an error — reports legitimately omit optional fields.
///
/// # Examples
///
/// ```
/// use ljob_core::{Attribute, AttributeStore, HeaderAttribute, Section};
///
/// let mut store = AttributeStore::new();
/// store.insert_first(Attribute::Header(HeaderAttribute::JobName), "DUSAXX01");
///
/// assert_eq!(store.get("job name"), Some("DUSAXX01"));
/// assert_eq!(store.get_in(Section::Header, "JOB NAME"), Some("DUSAXX01"));
/// assert_eq!(store.get("owner"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    entries: HashMap<Attribute, String>,
}

impl AttributeStore {
    pub fn new() -> AttributeStore {
        AttributeStore::default()
    }

    /// Records a value for `attr` unless one is already present. Returns
    /// `false` when the attribute was already recorded (the existing value
    /// is kept untouched).
    pub fn insert_first(&mut self, attr: Attribute, value: impl Into<String>) -> bool {
        match self.entries.entry(attr) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    /// Value recorded for exactly this attribute.
    pub fn get_attr(&self, attr: Attribute) -> Option<&str> {
        self.entries.get(&attr).map(String::as_str)
    }

    /// Value for a token within one section's registry.
    pub fn get_in(&self, section: Section, token: &str) -> Option<&str> {
        match_in_section(section, token).and_then(|attr| self.get_attr(attr))
    }

    /// Value for a bare token, resolved through [`Section::PRECEDENCE`].
    ///
    /// The token is matched against each section's registry in precedence
    /// order and the first matching attribute is looked up — so a token
    /// defined in two sections always answers from the earlier one, even
    /// when only the later section recorded a value.
    pub fn get(&self, token: &str) -> Option<&str> {
        match_any_token(token).and_then(|attr| self.get_attr(attr))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.entries.iter().map(|(attr, value)| (*attr, value.as_str()))
    }

    /// Entries ordered by section precedence, then registry order — the
    /// deterministic order used for rendering.
    pub fn entries_sorted(&self) -> Vec<(Attribute, &str)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for section in Section::PRECEDENCE {
            for attr in Attribute::all_in(section) {
                if let Some(value) = self.get_attr(attr) {
                    out.push((attr, value));
                }
            }
        }
        out
    }
}

/// One rendered store entry.
#[derive(Debug, Clone, Serialize)]
pub struct StoreEntry<'a> {
    pub section: Section,
    pub token: &'a str,
    pub value: &'a str,
}

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries_sorted();
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for (attr, value) in entries {
            seq.serialize_element(&StoreEntry {
                section: attr.section(),
                token: attr.token(),
                value,
            })?;
        }
        seq.end()
    }
}

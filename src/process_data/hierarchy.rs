//! Admin-level tracking across a scan

use std::collections::BTreeMap;

use serde::{Serialize, ser::SerializeMap as _};
use crate::config::{CONTINENTS, FULL_NAME_SEPARATOR, MAX_ADMIN_LEVEL, SEPARATOR};

/// Hierarchy change caused by a marker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Continent(String),
    Level { level: usize, name: String },
}

/// Continent and admin-level names currently open while scanning rows in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HierarchyState {
    continent: Option<String>,
    levels: BTreeMap<usize, String>,
}

/// Depth of a marker row, or `None` when the name is not a marker.
///
/// Every separator in the name counts, not only the leading ones.
pub fn marker_level(raw_name: &str) -> Option<usize> {
    raw_name
        .starts_with(SEPARATOR)
        .then(|| raw_name.matches(SEPARATOR).count() + 1)
}

/// Remove every separator and surrounding whitespace.
pub fn strip_separators(raw_name: &str) -> String {
    raw_name.replace(SEPARATOR, "").trim().to_owned()
}

impl HierarchyState {
    /// Update the state from a row name. Data rows leave it untouched.
    pub fn observe(&mut self, raw_name: &str) -> Option<Marker> {
        if CONTINENTS.contains(&raw_name) {
            self.continent = Some(raw_name.to_owned());
            return Some(Marker::Continent(raw_name.to_owned()));
        }
        let level = marker_level(raw_name)?;
        let name = strip_separators(raw_name);
        self.levels.insert(level, name.clone());
        self.levels.retain(|&open, _| open <= level);
        Some(Marker::Level { level, name })
    }

    #[cfg(test)]
    fn continent(&self) -> Option<&str> {
        self.continent.as_deref()
    }

    #[cfg(test)]
    fn level(&self, level: usize) -> Option<&str> {
        self.levels.get(&level).map(String::as_str)
    }

    #[cfg(test)]
    fn deepest_level(&self) -> Option<usize> {
        self.levels.keys().next_back().copied()
    }

    /// Freeze the current state for a record. `None` until a continent is known.
    pub fn snapshot(&self) -> Option<Levels> {
        Some(Levels {
            continent: self.continent.clone()?,
            levels: self.levels.clone(),
        })
    }
}

/// Hierarchy attached to one record.
///
/// Serializes to `level_continent` followed by one `level_<n>` entry per
/// tracked level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Levels {
    pub continent: String,
    pub levels: BTreeMap<usize, String>,
}

impl Levels {
    /// Continent followed by one slot per level up to [`MAX_ADMIN_LEVEL`],
    /// empty where the level is not tracked.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.continent.as_str()).chain(
            (0..=MAX_ADMIN_LEVEL).map(|level| self.levels.get(&level).map_or("", String::as_str)),
        )
    }

    pub fn full_name(&self) -> String {
        itertools::join(self.slots(), FULL_NAME_SEPARATOR)
    }

    /// Field names and values the record carries for its hierarchy.
    pub fn fields(&self) -> impl Iterator<Item = (String, &str)> {
        std::iter::once(("level_continent".to_owned(), self.continent.as_str())).chain(
            self.levels
                .iter()
                .map(|(level, name)| (format!("level_{level}"), name.as_str())),
        )
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|(name, _)| name == field)
    }
}

impl Serialize for Levels {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut serializer = serializer.serialize_map(Some(self.levels.len() + 1))?;
        for (name, value) in self.fields() {
            serializer.serialize_entry(&name, value)?;
        }
        serializer.end()
    }
}

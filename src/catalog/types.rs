//! Catalog value types
//!
//! Everything here is immutable once loaded; a run only ever reads these
//! records.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Crafting-material identifier, opaque to the planner.
pub type Material = String;

/// Coarse region label: the alphabetic prefix shared by a family of leveled
/// zones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GeneralZone(pub String);

impl fmt::Display for GeneralZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leveled zone: general region plus a 1-based level.
///
/// The tables carry zone ids in concatenated form (`A1`, `B3`); the planner
/// keeps them structured so the hierarchy constraints can iterate regions
/// and levels without string surgery.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId {
    pub general: GeneralZone,
    pub level: u32,
}

impl ZoneId {
    pub fn new(general: impl Into<String>, level: u32) -> Self {
        Self {
            general: GeneralZone(general.into()),
            level,
        }
    }

    /// Parse the concatenated form: an alphabetic prefix followed by a
    /// positive level number. Anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let (prefix, digits) = s.split_at(split);
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let level: u32 = digits.parse().ok()?;
        if level == 0 {
            return None;
        }
        Some(Self::new(prefix, level))
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.general, self.level)
    }
}

impl Serialize for ZoneId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A zone row from the weights table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    /// Relative cost of visiting this level (difficulty, travel time, ...)
    pub weight: i64,
}

/// An augmentation recipe. Only recipes flagged for search drive the
/// optimization; the rest merely contribute to diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augment {
    pub name: String,
    pub rank: String,
    pub materials: BTreeSet<Material>,
    pub use_in_search: bool,
}

/// A huntable monster: the materials it drops and the zones it occupies.
///
/// `found_in` carries an entry for every known zone, present or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    /// Sanitized identifier, usable as a model variable name
    pub name: String,
    /// Display name as it appears in the monsters table
    pub fullname: String,
    pub materials: BTreeSet<Material>,
    pub found_in: BTreeMap<ZoneId, bool>,
}

impl Monster {
    pub fn new(
        fullname: impl Into<String>,
        materials: BTreeSet<Material>,
        found_in: BTreeMap<ZoneId, bool>,
    ) -> Self {
        let fullname = fullname.into();
        Self {
            name: sanitize_name(&fullname),
            fullname,
            materials,
            found_in,
        }
    }

    /// Zones this monster actually appears in.
    pub fn zones(&self) -> impl Iterator<Item = &ZoneId> {
        self.found_in
            .iter()
            .filter(|(_, present)| **present)
            .map(|(zone, _)| zone)
    }

    pub fn drops(&self, material: &str) -> bool {
        self.materials.contains(material)
    }
}

/// Collapse a display name into an identifier: whitespace and `-` become
/// `_`, every other non-word character is dropped.
pub fn sanitize_name(fullname: &str) -> String {
    fullname
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() || c == '-' {
                Some('_')
            } else if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

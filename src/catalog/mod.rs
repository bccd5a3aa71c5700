//! Typed catalog records and the delimited-table loader

pub mod loader;
pub mod table;
pub mod types;

pub use loader::{load_catalog, parse_augments, parse_monsters, parse_zones, Catalog};
pub use table::{Row, Table};
pub use types::{sanitize_name, Augment, GeneralZone, Material, Monster, Zone, ZoneId};

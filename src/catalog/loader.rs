//! Load the three catalog tables into typed records

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::catalog::table::Table;
use crate::catalog::types::{Augment, Monster, Zone, ZoneId};
use crate::core::config::PlanConfig;
use crate::core::error::{PlanError, Result};

/// The three loaded catalogs, read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub augments: Vec<Augment>,
    pub zones: Vec<Zone>,
    pub monsters: Vec<Monster>,
}

/// Load all three tables. The monsters table is checked against the zone
/// catalog: its presence columns must match the known zones exactly.
pub fn load_catalog(
    augments_path: &Path,
    zones_path: &Path,
    monsters_path: &Path,
    config: &PlanConfig,
) -> Result<Catalog> {
    let augments = parse_augments(&label(augments_path), &fs::read_to_string(augments_path)?, config)?;
    let zones = parse_zones(&label(zones_path), &fs::read_to_string(zones_path)?, config)?;
    let monsters = parse_monsters(
        &label(monsters_path),
        &fs::read_to_string(monsters_path)?,
        &zones,
        config,
    )?;
    tracing::debug!(
        augments = augments.len(),
        zones = zones.len(),
        monsters = monsters.len(),
        "catalog loaded"
    );
    Ok(Catalog {
        augments,
        zones,
        monsters,
    })
}

fn label(path: &Path) -> String {
    path.display().to_string()
}

/// Columns: `Augmentation`, `Rank`, `Materials` (multi-valued), `Search?`.
pub fn parse_augments(file: &str, raw: &str, config: &PlanConfig) -> Result<Vec<Augment>> {
    let table = Table::parse(file, raw, config.column_delimiter)?;
    table
        .rows()
        .map(|row| {
            Ok(Augment {
                name: row.str("Augmentation")?.to_string(),
                rank: row.str("Rank")?.to_string(),
                materials: row
                    .list("Materials", config.array_delimiter)?
                    .into_iter()
                    .collect(),
                use_in_search: row.flag("Search?")?,
            })
        })
        .collect()
}

/// Columns: `Zone` (a zone id like `A1`), `Weight` (integer).
pub fn parse_zones(file: &str, raw: &str, config: &PlanConfig) -> Result<Vec<Zone>> {
    let table = Table::parse(file, raw, config.column_delimiter)?;
    let mut seen = BTreeSet::new();
    let mut zones = Vec::new();
    for row in table.rows() {
        let raw_id = row.str("Zone")?;
        let id = ZoneId::parse(raw_id).ok_or_else(|| PlanError::Catalog {
            file: file.to_string(),
            line: row.line(),
            message: format!(
                "'{raw_id}' is not a zone id (letters then a positive level, e.g. A1)"
            ),
        })?;
        if !seen.insert(id.clone()) {
            return Err(PlanError::Catalog {
                file: file.to_string(),
                line: row.line(),
                message: format!("duplicate zone '{id}'"),
            });
        }
        zones.push(Zone {
            id,
            weight: row.int("Weight")?,
        });
    }
    Ok(zones)
}

/// Columns: `Objective` (display name), `Materials` (multi-valued), plus one
/// `0/1` presence column per known zone.
pub fn parse_monsters(
    file: &str,
    raw: &str,
    zones: &[Zone],
    config: &PlanConfig,
) -> Result<Vec<Monster>> {
    let table = Table::parse(file, raw, config.column_delimiter)?;

    let known: BTreeSet<String> = zones.iter().map(|z| z.id.to_string()).collect();
    for header in table.headers() {
        if header != "Objective" && header != "Materials" && !known.contains(header) {
            return Err(PlanError::Catalog {
                file: file.to_string(),
                line: 1,
                message: format!("unknown zone column '{header}'"),
            });
        }
    }
    for id in &known {
        if !table.headers().contains(id) {
            return Err(PlanError::Catalog {
                file: file.to_string(),
                line: 1,
                message: format!("no presence column for zone '{id}'"),
            });
        }
    }

    let mut monsters = Vec::new();
    for row in table.rows() {
        let fullname = row.str("Objective")?.to_string();
        let materials: BTreeSet<String> = row
            .list("Materials", config.array_delimiter)?
            .into_iter()
            .collect();
        let mut found_in = BTreeMap::new();
        for zone in zones {
            found_in.insert(zone.id.clone(), row.flag(&zone.id.to_string())?);
        }
        monsters.push(Monster::new(fullname, materials, found_in));
    }
    Ok(monsters)
}

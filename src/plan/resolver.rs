//! Derive the request-scoped search sets from the catalogs
//!
//! `resolve` is a pure function of the loaded catalogs: it works out which
//! materials the flagged augments need, which monsters can drop them, which
//! zones those monsters occupy, and the region/level hierarchy spanning the
//! whole zone catalog. Nothing here is persisted; every run recomputes it.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, GeneralZone, Material, Monster, ZoneId};
use crate::core::error::{PlanError, Result};

/// Everything the model builder needs, derived in one pass over the
/// catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Materials required by the augments flagged for search
    pub materials_to_search: BTreeSet<Material>,

    /// Monsters dropping at least one required material, in catalog order
    pub monsters_to_search: Vec<Monster>,

    /// Zones where any searched monster appears
    pub zones_to_search: BTreeSet<ZoneId>,

    /// Every region observed in the zone catalog, searched or not; the
    /// hierarchy spans all of them
    pub general_zones: Vec<GeneralZone>,

    /// Levels per region; the zone catalog must form a complete grid
    pub levels_per_zone: u32,

    /// Materials some augment references that no monster drops. Diagnostic
    /// only; never affects the model.
    pub unreachable_materials: Vec<Material>,
}

pub fn resolve(catalog: &Catalog) -> Result<Resolution> {
    let (general_zones, levels_per_zone) = zone_hierarchy(catalog)?;

    let materials_to_search: BTreeSet<Material> = catalog
        .augments
        .iter()
        .filter(|augment| augment.use_in_search)
        .flat_map(|augment| augment.materials.iter().cloned())
        .collect();

    let monsters_to_search: Vec<Monster> = catalog
        .monsters
        .iter()
        .filter(|monster| {
            monster
                .materials
                .iter()
                .any(|material| materials_to_search.contains(material))
        })
        .cloned()
        .collect();

    let zones_to_search: BTreeSet<ZoneId> = monsters_to_search
        .iter()
        .flat_map(|monster| monster.zones().cloned())
        .collect();

    let unreachable_materials = unreachable_materials(catalog);
    if !unreachable_materials.is_empty() {
        tracing::warn!(
            materials = ?unreachable_materials,
            "augments reference materials no monster drops"
        );
    }

    tracing::debug!(
        materials = materials_to_search.len(),
        monsters = monsters_to_search.len(),
        zones = zones_to_search.len(),
        "search sets resolved"
    );

    Ok(Resolution {
        materials_to_search,
        monsters_to_search,
        zones_to_search,
        general_zones,
        levels_per_zone,
        unreachable_materials,
    })
}

/// Regions and levels spanned by the zone catalog.
///
/// The ids must form a complete region x level grid; the hierarchy
/// constraints enumerate every cell of it, so a hole would constrain a zone
/// that was never declared.
fn zone_hierarchy(catalog: &Catalog) -> Result<(Vec<GeneralZone>, u32)> {
    if catalog.zones.is_empty() {
        return Err(PlanError::DataConsistency("zone catalog is empty".to_string()));
    }

    let generals: BTreeSet<GeneralZone> = catalog
        .zones
        .iter()
        .map(|zone| zone.id.general.clone())
        .collect();
    if catalog.zones.len() % generals.len() != 0 {
        return Err(PlanError::DataConsistency(format!(
            "{} zones do not divide evenly across {} general zones",
            catalog.zones.len(),
            generals.len()
        )));
    }
    let levels = (catalog.zones.len() / generals.len()) as u32;

    let ids: BTreeSet<&ZoneId> = catalog.zones.iter().map(|zone| &zone.id).collect();
    for general in &generals {
        for level in 1..=levels {
            let id = ZoneId {
                general: general.clone(),
                level,
            };
            if !ids.contains(&id) {
                return Err(PlanError::DataConsistency(format!(
                    "zone '{id}' is missing: every general zone needs levels 1..={levels}"
                )));
            }
        }
    }

    Ok((generals.into_iter().collect(), levels))
}

fn unreachable_materials(catalog: &Catalog) -> Vec<Material> {
    let dropped: BTreeSet<&Material> = catalog
        .monsters
        .iter()
        .flat_map(|monster| monster.materials.iter())
        .collect();
    catalog
        .augments
        .iter()
        .flat_map(|augment| augment.materials.iter())
        .collect::<BTreeSet<&Material>>()
        .into_iter()
        .filter(|material| !dropped.contains(*material))
        .cloned()
        .collect()
}

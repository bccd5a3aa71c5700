//! Decode the solver assignment back into domain terms

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Material, ZoneId};
use crate::plan::resolver::Resolution;

/// Values this close to zero count as unselected; solver noise must not
/// fabricate a hunt.
pub const EPS: f64 = 1e-9;

/// A hunted monster and the kill count the plan assigns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterKill {
    pub monster: String,
    pub value: f64,
}

/// An activated zone level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneVisit {
    pub zone: ZoneId,
    pub value: f64,
}

/// A selected supplier for one required material, with the zones it
/// occupies that the plan actually visits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSource {
    pub monster: String,
    pub zones: Vec<ZoneId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPlan {
    pub material: Material,
    pub sources: Vec<MaterialSource>,
}

/// The decoded farming plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmPlan {
    pub monsters: Vec<MonsterKill>,
    pub zones: Vec<ZoneVisit>,
    pub materials: Vec<MaterialPlan>,
    pub unreachable_materials: Vec<Material>,
}

/// Map the raw variable assignment onto monsters, zones, and the
/// per-material supplier breakdown. Zone reporting is limited to the zones
/// that were part of the search.
pub fn decode(resolution: &Resolution, assignment: &BTreeMap<String, f64>) -> FarmPlan {
    let value_of = |name: &str| assignment.get(name).copied().unwrap_or(0.0);

    let monsters = resolution
        .monsters_to_search
        .iter()
        .filter(|monster| value_of(&monster.name) > EPS)
        .map(|monster| MonsterKill {
            monster: monster.fullname.clone(),
            value: value_of(&monster.name),
        })
        .collect();

    let zones = resolution
        .zones_to_search
        .iter()
        .filter(|zone| value_of(&zone.to_string()) > EPS)
        .map(|zone| ZoneVisit {
            zone: zone.clone(),
            value: value_of(&zone.to_string()),
        })
        .collect();

    let materials = resolution
        .materials_to_search
        .iter()
        .map(|material| MaterialPlan {
            material: material.clone(),
            sources: resolution
                .monsters_to_search
                .iter()
                .filter(|monster| monster.drops(material) && value_of(&monster.name) > EPS)
                .map(|monster| MaterialSource {
                    monster: monster.fullname.clone(),
                    zones: monster
                        .zones()
                        .filter(|zone| value_of(&zone.to_string()) > EPS)
                        .cloned()
                        .collect(),
                })
                .collect(),
        })
        .collect();

    FarmPlan {
        monsters,
        zones,
        materials,
        unreachable_materials: resolution.unreachable_materials.clone(),
    }
}

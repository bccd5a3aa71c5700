//! Formulate the farming plan as a weighted linear program
//!
//! The model is built as a plain value - named variables, objective terms,
//! labeled constraints - and only lowered to the solver afterwards, so two
//! builds over the same catalogs can be compared structurally and the
//! program can be printed.
//!
//! Two formulation caveats, kept on purpose:
//!
//! * All variables are continuous with lower bound 0, as in the original
//!   formulation. A solver may therefore return fractional activation
//!   values that do not correspond to a discrete hunt; whether the
//!   relaxation is acceptable or binary selection is intended is an open
//!   question, so the relaxation stays rather than being silently changed.
//! * The factor separation between objective tiers approximates a
//!   lexicographic priority by magnitude alone. A large enough lower-tier
//!   sum can outweigh a unit change in a higher tier.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{Zone, ZoneId};
use crate::core::config::PlanConfig;
use crate::core::error::{PlanError, Result};
use crate::plan::resolver::Resolution;

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    GreaterEq,
    Eq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::Eq => "=",
        })
    }
}

/// One labeled linear constraint over named variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub label: String,
    pub terms: Vec<(String, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

/// The formulated program. Every variable is continuous and bounded below
/// by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanModel {
    /// Declaration order: searched monsters, general zones, every zone
    pub variables: Vec<String>,

    /// Minimization terms
    pub objective: Vec<(String, f64)>,

    pub constraints: Vec<Constraint>,
}

/// Build the program from a resolution. Fails with `CoverageInfeasible`
/// when a required material has no supplier at all - there is no point
/// handing the solver a constraint that reads `0 >= 1`.
pub fn build_model(
    zones: &[Zone],
    resolution: &Resolution,
    config: &PlanConfig,
) -> Result<PlanModel> {
    let mut variables = Vec::new();
    for monster in &resolution.monsters_to_search {
        variables.push(monster.name.clone());
    }
    for general in &resolution.general_zones {
        variables.push(general.to_string());
    }
    for zone in zones {
        variables.push(zone.id.to_string());
    }

    let weights: BTreeMap<&ZoneId, i64> = zones.iter().map(|z| (&z.id, z.weight)).collect();

    // Objective tiers, highest priority first.
    let mut objective = Vec::new();
    for general in &resolution.general_zones {
        objective.push((general.to_string(), config.zone_factor as f64));
    }
    for zone in &resolution.zones_to_search {
        let weight = weights.get(zone).copied().ok_or_else(|| {
            PlanError::DataConsistency(format!(
                "zone '{zone}' hosts a monster but is missing from the weights table"
            ))
        })?;
        objective.push((zone.to_string(), (config.level_factor * weight) as f64));
    }
    for monster in &resolution.monsters_to_search {
        objective.push((monster.name.clone(), config.monster_factor as f64));
    }

    let mut constraints = Vec::new();

    // Every required material needs at least one supplying monster.
    for material in &resolution.materials_to_search {
        let suppliers: Vec<_> = resolution
            .monsters_to_search
            .iter()
            .filter(|monster| monster.drops(material))
            .collect();
        if suppliers.is_empty() {
            return Err(PlanError::CoverageInfeasible {
                material: material.clone(),
            });
        }
        constraints.push(Constraint {
            label: format!("cover material {material}"),
            terms: suppliers
                .iter()
                .map(|monster| (monster.name.clone(), 1.0))
                .collect(),
            relation: Relation::GreaterEq,
            rhs: 1.0,
        });
    }

    // Hunting a monster activates the zones it is found in.
    for monster in &resolution.monsters_to_search {
        let mut terms = vec![(monster.name.clone(), 1.0)];
        terms.extend(monster.zones().map(|zone| (zone.to_string(), -1.0)));
        constraints.push(Constraint {
            label: format!("hunting {} requires an active zone", monster.name),
            terms,
            relation: Relation::LessEq,
            rhs: 0.0,
        });
    }

    // Explicit non-negativity, redundant with the variable bound.
    for monster in &resolution.monsters_to_search {
        constraints.push(Constraint {
            label: format!("{} is hunted a non-negative number of times", monster.name),
            terms: vec![(monster.name.clone(), 1.0)],
            relation: Relation::GreaterEq,
            rhs: 0.0,
        });
    }

    // A general zone is active exactly when one of its levels is: the
    // paired inequalities linearize `general = OR(levels)`.
    for general in &resolution.general_zones {
        let mut terms = vec![(general.to_string(), 1.0)];
        for level in 1..=resolution.levels_per_zone {
            terms.push((ZoneId::new(general.0.clone(), level).to_string(), -1.0));
        }
        constraints.push(Constraint {
            label: format!("general zone {general} requires an active level"),
            terms,
            relation: Relation::LessEq,
            rhs: 0.0,
        });

        for level in 1..=resolution.levels_per_zone {
            let zone = ZoneId::new(general.0.clone(), level);
            constraints.push(Constraint {
                label: format!("level {zone} activates general zone {general}"),
                terms: vec![(general.to_string(), 1.0), (zone.to_string(), -1.0)],
                relation: Relation::GreaterEq,
                rhs: 0.0,
            });
        }
    }

    tracing::debug!(
        variables = variables.len(),
        constraints = constraints.len(),
        "model formulated"
    );

    Ok(PlanModel {
        variables,
        objective,
        constraints,
    })
}

impl fmt::Display for PlanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minimize:")?;
        writeln!(f, "  {}", render_terms(&self.objective))?;
        writeln!(f, "subject to:")?;
        for constraint in &self.constraints {
            writeln!(
                f,
                "  {}: {} {} {}",
                constraint.label,
                render_terms(&constraint.terms),
                constraint.relation,
                constraint.rhs
            )?;
        }
        Ok(())
    }
}

fn render_terms(terms: &[(String, f64)]) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }
    let mut out = String::new();
    for (i, (name, coeff)) in terms.iter().enumerate() {
        if i == 0 {
            if *coeff < 0.0 {
                out.push('-');
            }
        } else if *coeff < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        let magnitude = coeff.abs();
        if (magnitude - 1.0).abs() > f64::EPSILON {
            out.push_str(&format!("{magnitude} "));
        }
        out.push_str(name);
    }
    out
}

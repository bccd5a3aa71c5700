//! Render a farming plan for humans (text) or machines (JSON)
//!
//! The text layout is not a stable format; scripts should use `--format
//! json` instead.

use std::fmt::Write;

use crate::core::error::Result;
use crate::plan::decode::FarmPlan;

const BANNER_WIDTH: usize = 41;

pub fn render_text(plan: &FarmPlan) -> String {
    let mut out = String::new();

    section(&mut out, "MONSTERS");
    if plan.monsters.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for kill in &plan.monsters {
        let _ = writeln!(out, "{}: {}", kill.monster, kill.value);
    }

    section(&mut out, "IN ZONES");
    if plan.zones.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for visit in &plan.zones {
        let _ = writeln!(out, "{}: {}", visit.zone, visit.value);
    }

    section(&mut out, "REQUIRES MATERIALS");
    for material in &plan.materials {
        let sources: Vec<String> = material
            .sources
            .iter()
            .map(|source| {
                let zones: Vec<String> = source.zones.iter().map(ToString::to_string).collect();
                format!("{} ({})", source.monster, zones.join(", "))
            })
            .collect();
        let _ = writeln!(out, "{}: {}", material.material, sources.join(", "));
    }

    if !plan.unreachable_materials.is_empty() {
        let _ = writeln!(
            out,
            "\nmaterials no monster drops: {}",
            plan.unreachable_materials.join(", ")
        );
    }

    out
}

pub fn render_json(plan: &FarmPlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", "-".repeat(BANNER_WIDTH));
    let _ = writeln!(out, "{title:^width$}", width = BANNER_WIDTH);
    let _ = writeln!(out, "{}", "-".repeat(BANNER_WIDTH));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ZoneId;
    use crate::plan::decode::{MaterialPlan, MaterialSource, MonsterKill, ZoneVisit};

    fn plan() -> FarmPlan {
        FarmPlan {
            monsters: vec![MonsterKill {
                monster: "Ashen Drake".to_string(),
                value: 1.0,
            }],
            zones: vec![ZoneVisit {
                zone: ZoneId::new("A", 1),
                value: 1.0,
            }],
            materials: vec![MaterialPlan {
                material: "Drake Scale".to_string(),
                sources: vec![MaterialSource {
                    monster: "Ashen Drake".to_string(),
                    zones: vec![ZoneId::new("A", 1)],
                }],
            }],
            unreachable_materials: vec!["Moon Prism".to_string()],
        }
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&plan());
        assert!(text.contains("MONSTERS"));
        assert!(text.contains("IN ZONES"));
        assert!(text.contains("REQUIRES MATERIALS"));
        assert!(text.contains("Ashen Drake: 1"));
        assert!(text.contains("A1: 1"));
        assert!(text.contains("Drake Scale: Ashen Drake (A1)"));
        assert!(text.contains("materials no monster drops: Moon Prism"));
    }

    #[test]
    fn test_empty_plan_renders_placeholders() {
        let empty = FarmPlan {
            monsters: vec![],
            zones: vec![],
            materials: vec![],
            unreachable_materials: vec![],
        };
        let text = render_text(&empty);
        assert!(text.contains("(none)"));
        assert!(!text.contains("materials no monster drops"));
    }

    #[test]
    fn test_json_report_is_structured() {
        let json = render_json(&plan()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["monsters"][0]["monster"], "Ashen Drake");
        assert_eq!(value["zones"][0]["zone"], "A1");
        assert_eq!(value["materials"][0]["sources"][0]["zones"][0], "A1");
    }
}

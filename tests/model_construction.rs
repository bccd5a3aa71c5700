//! Formulation-level tests: determinism and fail-fast error ordering

use farmplan::catalog::{parse_augments, parse_monsters, parse_zones, Catalog};
use farmplan::core::config::PlanConfig;
use farmplan::core::error::PlanError;
use farmplan::plan::{build_model, resolve};

const AUGMENTS: &str = "Augmentation;Rank;Materials;Search?\n\
                        Keen Edge I;6;Drake Scale|Boar Tusk;1\n\
                        Stout Guard I;6;Stalker Hide;0\n";
const ZONES: &str = "Zone;Weight\nA1;3\nA2;5\nB1;2\nB2;6\n";
const MONSTERS: &str = "Objective;Materials;A1;A2;B1;B2\n\
                        Ashen Drake;Drake Scale;1;1;0;0\n\
                        Ridge Boar;Boar Tusk|Stalker Hide;0;0;1;1\n";

fn catalog() -> Catalog {
    let config = PlanConfig::default();
    let zones = parse_zones("zones", ZONES, &config).unwrap();
    Catalog {
        augments: parse_augments("augments", AUGMENTS, &config).unwrap(),
        monsters: parse_monsters("monsters", MONSTERS, &zones, &config).unwrap(),
        zones,
    }
}

#[test]
fn test_identical_catalogs_formulate_identical_models() {
    let config = PlanConfig::default();

    let first_catalog = catalog();
    let first_resolution = resolve(&first_catalog).unwrap();
    let first_model = build_model(&first_catalog.zones, &first_resolution, &config).unwrap();

    let second_catalog = catalog();
    let second_resolution = resolve(&second_catalog).unwrap();
    let second_model = build_model(&second_catalog.zones, &second_resolution, &config).unwrap();

    assert_eq!(first_catalog, second_catalog);
    assert_eq!(first_resolution, second_resolution);
    assert_eq!(first_model, second_model);
}

#[test]
fn test_constraint_count_by_family() {
    let catalog = catalog();
    let resolution = resolve(&catalog).unwrap();
    let model = build_model(&catalog.zones, &resolution, &PlanConfig::default()).unwrap();

    // 2 materials, 2 monsters, 2 generals x 2 levels:
    // coverage (2) + activation (2) + non-negativity (2)
    // + general hierarchy (2) + per-level hierarchy (4).
    assert_eq!(model.constraints.len(), 12);
    // Variables: 2 monsters + 2 generals + 4 zones.
    assert_eq!(model.variables.len(), 8);
}

#[test]
fn test_uneven_zone_catalog_fails_before_formulation() {
    let config = PlanConfig::default();
    let zones = parse_zones("zones", "Zone;Weight\nA1;3\nA2;5\nB1;2\n", &config).unwrap();
    let catalog = Catalog {
        augments: parse_augments("augments", AUGMENTS, &config).unwrap(),
        monsters: vec![],
        zones,
    };
    let err = resolve(&catalog).unwrap_err();
    assert!(matches!(err, PlanError::DataConsistency(_)));
}

#[test]
fn test_unsupplied_searched_material_fails_before_solving() {
    let config = PlanConfig::default();
    let augments = "Augmentation;Rank;Materials;Search?\nGhost Recipe;6;Moon Prism;1\n";
    let zones = parse_zones("zones", "Zone;Weight\nA1;3\nA2;5\n", &config).unwrap();
    let catalog = Catalog {
        augments: parse_augments("augments", augments, &config).unwrap(),
        monsters: parse_monsters(
            "monsters",
            "Objective;Materials;A1;A2\nM1;X;1;0\n",
            &zones,
            &config,
        )
        .unwrap(),
        zones,
    };

    // Resolution itself succeeds; the failure belongs to formulation.
    let resolution = resolve(&catalog).unwrap();
    let err = build_model(&catalog.zones, &resolution, &config).unwrap_err();
    match err {
        PlanError::CoverageInfeasible { material } => assert_eq!(material, "Moon Prism"),
        other => panic!("expected coverage error, got {other:?}"),
    }
}

#[test]
fn test_custom_factors_reach_the_objective() {
    let mut config = PlanConfig::default();
    config.zone_factor = 400;
    config.level_factor = 200;
    config.monster_factor = 100;
    config.validate().unwrap();

    let catalog = catalog();
    let resolution = resolve(&catalog).unwrap();
    let model = build_model(&catalog.zones, &resolution, &config).unwrap();
    let general_term = model
        .objective
        .iter()
        .find(|(name, _)| name == "A")
        .unwrap();
    assert_eq!(general_term.1, 400.0);
}

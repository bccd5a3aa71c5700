//! Requirement resolution, model formulation, solving, and decoding

pub mod decode;
pub mod model;
pub mod resolver;
pub mod solve;

pub use decode::{decode, FarmPlan, MaterialPlan, MaterialSource, MonsterKill, ZoneVisit, EPS};
pub use model::{build_model, Constraint, PlanModel, Relation};
pub use resolver::{resolve, Resolution};
pub use solve::solve;

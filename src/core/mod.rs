pub mod config;
pub mod error;

pub use config::PlanConfig;
pub use error::{PlanError, Result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{file}:{line}: {message}")]
    Catalog {
        file: String,
        line: usize,
        message: String,
    },

    #[error("inconsistent zone catalog: {0}")]
    DataConsistency(String),

    #[error("material '{material}' is required but no monster drops it")]
    CoverageInfeasible { material: String },

    #[error("solver failed: {0}")]
    Solver(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

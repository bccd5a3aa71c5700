//! farmplan - plan which monsters to hunt, and where, to gather every
//! material your flagged augments need
//!
//! The pipeline runs strictly forward: load the catalogs, resolve the
//! request-scoped search sets, formulate a weighted linear program, solve it,
//! decode the assignment back into domain terms, and render the report.

pub mod catalog;
pub mod core;
pub mod plan;
pub mod report;

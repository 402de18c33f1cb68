//! Application use cases

pub mod plan;

pub use plan::{PlanError, ResourcePlanner};

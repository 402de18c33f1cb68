//! In-memory resource sink for testing and dry runs

use async_trait::async_trait;
use infra_namer_domain::{ResourcePlan, ResourceSink, SinkError};
use std::sync::RwLock;

/// Keeps every recorded plan in insertion order
pub struct InMemoryResourceSink {
    plans: RwLock<Vec<ResourcePlan>>,
}

impl InMemoryResourceSink {
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of recorded plans
    pub fn plans(&self) -> Vec<ResourcePlan> {
        self.plans
            .read()
            .map(|plans| plans.clone())
            .unwrap_or_default()
    }

    /// Find a recorded plan by physical name
    pub fn get(&self, name: &str) -> Option<ResourcePlan> {
        self.plans
            .read()
            .ok()?
            .iter()
            .find(|plan| plan.name == name)
            .cloned()
    }
}

impl Default for InMemoryResourceSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceSink for InMemoryResourceSink {
    async fn record(&self, plan: &ResourcePlan) -> Result<(), SinkError> {
        let mut plans = self
            .plans
            .write()
            .map_err(|e| SinkError::Unavailable(e.to_string()))?;
        plans.push(plan.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

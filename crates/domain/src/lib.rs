//! infra-namer domain crate
//!
//! This crate contains the core naming and tagging logic following hexagonal architecture:
//! - `model`: Project scope, service kinds, requests and plans
//! - `naming`: Standardized resource name generation
//! - `tagging`: The fixed resource tag set
//! - `permissions`: Predefined IAM permission sets
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Resource planning

pub mod model;
pub mod naming;
pub mod permissions;
pub mod ports;
pub mod tagging;
pub mod usecases;

pub use model::*;
pub use naming::NameGenerator;
pub use ports::*;
pub use tagging::TagPlanner;

use sha2::{Digest, Sha256};

/// Compute a deterministic hash of a sequence of resource plans
///
/// Order-sensitive: the same requests in another order hash differently.
pub fn compute_plan_hash(plans: &[ResourcePlan]) -> String {
    let mut hasher = Sha256::new();
    for plan in plans {
        hasher.update(plan.kind.id().as_bytes());
        hasher.update([0]);
        hasher.update(plan.action.as_str().as_bytes());
        hasher.update([0]);
        hasher.update(plan.name.as_bytes());
        hasher.update([0]);
        if let Some(tags) = &plan.tags {
            for (key, value) in tags.iter() {
                hasher.update(key.as_bytes());
                hasher.update(b"=");
                hasher.update(value.as_bytes());
                hasher.update([0]);
            }
        }
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> usecases::ResourcePlanner {
        let scope = ProjectScope::new(
            "123456789012",
            "us-east-1",
            "aje",
            "datalake",
            Environment::Dev,
            "-",
            "Data Team",
        )
        .unwrap();
        usecases::ResourcePlanner::new(scope)
    }

    #[test]
    fn test_plan_hash_is_stable() {
        let requests = [
            ResourceRequest::create(ServiceKind::S3Bucket, "raw"),
            ResourceRequest::create(ServiceKind::LambdaFunction, "ingest"),
        ];
        let first: Vec<_> = requests.iter().map(|r| planner().plan(r).unwrap()).collect();
        let second: Vec<_> = requests.iter().map(|r| planner().plan(r).unwrap()).collect();
        assert_eq!(compute_plan_hash(&first), compute_plan_hash(&second));
        assert_eq!(compute_plan_hash(&first).len(), 64);
    }

    #[test]
    fn test_plan_hash_is_order_sensitive() {
        let planner = planner();
        let a = planner
            .plan(&ResourceRequest::create(ServiceKind::S3Bucket, "raw"))
            .unwrap();
        let b = planner
            .plan(&ResourceRequest::create(ServiceKind::Sqs, "events"))
            .unwrap();
        assert_ne!(
            compute_plan_hash(&[a.clone(), b.clone()]),
            compute_plan_hash(&[b, a])
        );
    }
}

//! Planning use case - resolves names and tags for requested resources

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::compute_plan_hash;
use crate::model::{
    PlanAction, PlanSummary, ProjectScope, ResourcePlan, ResourceRequest, ServiceKind,
};
use crate::naming::NameGenerator;
use crate::ports::{ResourceSink, SinkError};
use crate::tagging::TagPlanner;

/// Errors from the planning use case
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid request '{name}': {reason}")]
    InvalidRequest { name: String, reason: String },
    #[error("Duplicate resource name '{name}' for requests '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Resolves resource requests into plans and hands them to a sink
pub struct ResourcePlanner {
    names: NameGenerator,
    tags: TagPlanner,
}

impl ResourcePlanner {
    pub fn new(scope: ProjectScope) -> Self {
        Self {
            names: NameGenerator::new(scope.clone()),
            tags: TagPlanner::new(scope),
        }
    }

    pub fn names(&self) -> &NameGenerator {
        &self.names
    }

    pub fn tags(&self) -> &TagPlanner {
        &self.tags
    }

    /// Resolve a single request
    pub fn plan(&self, request: &ResourceRequest) -> Result<ResourcePlan, PlanError> {
        let name = match &request.endpoint {
            Some(_) if request.kind != ServiceKind::DmsEndpoint => {
                return Err(PlanError::InvalidRequest {
                    name: request.name.clone(),
                    reason: format!(
                        "endpoint qualifiers only apply to {}, not {}",
                        ServiceKind::DmsEndpoint,
                        request.kind
                    ),
                });
            }
            Some(endpoint) if !endpoint.has_valid_engine() => {
                return Err(PlanError::InvalidRequest {
                    name: request.name.clone(),
                    reason: format!(
                        "engine '{}' must match [a-z0-9_]+",
                        endpoint.engine
                    ),
                });
            }
            Some(endpoint) => self.names.build_replication_endpoint_name(
                &request.name,
                &endpoint.engine,
                endpoint.direction,
            ),
            None => self.names.build(request.kind, &request.name),
        };

        let service_label = request
            .label
            .clone()
            .unwrap_or_else(|| request.kind.service_label().to_string());

        let tags = match request.action {
            PlanAction::Create => Some(self.tags.tags_for(&name, &service_label)),
            PlanAction::Import => None,
        };

        Ok(ResourcePlan {
            kind: request.kind,
            descriptive_name: request.name.clone(),
            action: request.action,
            name,
            service_label,
            tags,
        })
    }

    /// Plan every request, reject name collisions, and record into the sink
    ///
    /// Invalid requests and collisions fail the batch before anything is
    /// recorded. A sink error stops recording at that plan; plans recorded
    /// before it stay in the sink.
    pub async fn run(
        &self,
        requests: &[ResourceRequest],
        sink: &dyn ResourceSink,
    ) -> Result<(Vec<ResourcePlan>, PlanSummary), PlanError> {
        info!(
            count = requests.len(),
            sink = sink.name(),
            environment = %self.names.scope().environment(),
            "Planning resources"
        );

        let mut plans = Vec::with_capacity(requests.len());
        let mut seen: HashMap<String, String> = HashMap::new();

        for request in requests {
            let plan = self.plan(request)?;

            if let Some(first) = seen.get(&plan.name) {
                return Err(PlanError::DuplicateName {
                    name: plan.name,
                    first: first.clone(),
                    second: request.name.clone(),
                });
            }
            seen.insert(plan.name.clone(), request.name.clone());

            debug!(
                kind = %plan.kind,
                action = plan.action.as_str(),
                name = %plan.name,
                "Resolved resource"
            );
            plans.push(plan);
        }

        for plan in &plans {
            sink.record(plan).await?;
        }

        let summary = PlanSummary {
            created: plans
                .iter()
                .filter(|p| p.action == PlanAction::Create)
                .count(),
            imported: plans
                .iter()
                .filter(|p| p.action == PlanAction::Import)
                .count(),
            plan_hash: compute_plan_hash(&plans),
        };

        info!(
            created = summary.created,
            imported = summary.imported,
            plan_hash = %summary.plan_hash,
            "Planning complete"
        );

        Ok((plans, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EndpointDirection, Environment};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        recorded: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ResourceSink for RecordingSink {
        async fn record(&self, plan: &ResourcePlan) -> Result<(), SinkError> {
            self.recorded.lock().unwrap().push(plan.name.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    /// Accepts `limit` plans, then fails
    #[derive(Default)]
    struct FlakySink {
        limit: usize,
        recorded: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ResourceSink for FlakySink {
        async fn record(&self, plan: &ResourcePlan) -> Result<(), SinkError> {
            let mut recorded = self.recorded.lock().unwrap();
            if recorded.len() >= self.limit {
                return Err(SinkError::Unavailable("disk full".to_string()));
            }
            recorded.push(plan.name.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    struct FailingSink;

    #[async_trait]
    impl ResourceSink for FailingSink {
        async fn record(&self, _plan: &ResourcePlan) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("offline".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn planner() -> ResourcePlanner {
        let scope = ProjectScope::new(
            "123456789012",
            "us-east-1",
            "aje",
            "datalake",
            Environment::Prod,
            "-",
            "Data Team",
        )
        .unwrap();
        ResourcePlanner::new(scope)
    }

    #[test]
    fn test_plan_create_has_tags() {
        let plan = planner()
            .plan(&ResourceRequest::create(ServiceKind::LambdaFunction, "Ventas"))
            .unwrap();

        assert_eq!(plan.name, "aje-prod-datalake-ventas-fn");
        assert_eq!(plan.service_label, "AWS Lambda");
        let tags = plan.tags.expect("tags");
        assert_eq!(tags.name, plan.name);
        assert_eq!(tags.service, "AWS Lambda");
        assert_eq!(tags.environment, "PROD");
    }

    #[test]
    fn test_plan_import_has_no_tags() {
        let plan = planner()
            .plan(&ResourceRequest::import(ServiceKind::S3Bucket, "raw"))
            .unwrap();

        assert_eq!(plan.name, "aje-123456789012-us-east-1-prod-datalake-raw-s3");
        assert!(plan.tags.is_none());
    }

    #[test]
    fn test_plan_label_override() {
        let plan = planner()
            .plan(&ResourceRequest::create(ServiceKind::ApiGateway, "public").with_label("Public API"))
            .unwrap();
        assert_eq!(plan.tags.unwrap().service, "Public API");
    }

    #[test]
    fn test_plan_replication_endpoint() {
        let plan = planner()
            .plan(
                &ResourceRequest::create(ServiceKind::DmsEndpoint, "orders")
                    .with_endpoint("oracle", EndpointDirection::Source),
            )
            .unwrap();
        assert_eq!(plan.name, "aje-prod-datalake-orders-dms-oracle-src");
        assert_eq!(plan.service_label, "AWS DMS");
    }

    #[test]
    fn test_plan_rejects_endpoint_on_other_kind() {
        let result = planner().plan(
            &ResourceRequest::create(ServiceKind::Sqs, "orders")
                .with_endpoint("oracle", EndpointDirection::Target),
        );
        assert!(matches!(result, Err(PlanError::InvalidRequest { .. })));
    }

    #[test]
    fn test_plan_rejects_engine_outside_pattern() {
        for engine in ["Oracle 19c/x", "Oracle", "oracle-19c", ""] {
            let result = planner().plan(
                &ResourceRequest::create(ServiceKind::DmsEndpoint, "orders")
                    .with_endpoint(engine, EndpointDirection::Source),
            );
            assert!(
                matches!(result, Err(PlanError::InvalidRequest { .. })),
                "{:?}",
                engine
            );
        }
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_engine_before_recording() {
        let sink = RecordingSink::default();
        let requests = vec![
            ResourceRequest::create(ServiceKind::DmsTask, "orders"),
            ResourceRequest::create(ServiceKind::DmsEndpoint, "orders")
                .with_endpoint("Oracle 19c", EndpointDirection::Source),
        ];

        let result = planner().run(&requests, &sink).await;

        assert!(matches!(result, Err(PlanError::InvalidRequest { .. })));
        assert!(sink.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_records_all_plans() {
        let sink = RecordingSink::default();
        let requests = vec![
            ResourceRequest::create(ServiceKind::S3Bucket, "raw"),
            ResourceRequest::create(ServiceKind::GlueJob, "load raw"),
            ResourceRequest::import(ServiceKind::Secret, "db credentials"),
        ];

        let (plans, summary) = planner().run(&requests, &sink).await.unwrap();

        assert_eq!(plans.len(), 3);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.plan_hash.len(), 64);
        assert_eq!(
            *sink.recorded.lock().unwrap(),
            plans.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_run_rejects_duplicate_names_before_recording() {
        let sink = RecordingSink::default();
        let requests = vec![
            ResourceRequest::create(ServiceKind::Sqs, "Orders Queue"),
            ResourceRequest::create(ServiceKind::Sqs, "orders.queue"),
        ];

        let result = planner().run(&requests, &sink).await;

        assert!(matches!(result, Err(PlanError::DuplicateName { .. })));
        assert!(sink.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_propagates_sink_errors() {
        let requests = vec![ResourceRequest::create(ServiceKind::SnsTopic, "alerts")];
        let result = planner().run(&requests, &FailingSink).await;
        assert!(matches!(result, Err(PlanError::Sink(_))));
    }

    #[tokio::test]
    async fn test_run_keeps_plans_recorded_before_sink_failure() {
        let sink = FlakySink {
            limit: 1,
            ..Default::default()
        };
        let requests = vec![
            ResourceRequest::create(ServiceKind::SnsTopic, "alerts"),
            ResourceRequest::create(ServiceKind::Sqs, "alerts"),
            ResourceRequest::create(ServiceKind::EventBridge, "alerts"),
        ];

        let result = planner().run(&requests, &sink).await;

        assert!(matches!(result, Err(PlanError::Sink(_))));
        assert_eq!(
            *sink.recorded.lock().unwrap(),
            vec!["aje-prod-datalake-alerts-sns".to_string()]
        );
    }
}

//! Standard tag set for provisioned resources

use crate::model::{ProjectScope, ResourceTags};

/// Computes the fixed tag mapping for a resource
#[derive(Debug, Clone)]
pub struct TagPlanner {
    scope: ProjectScope,
}

impl TagPlanner {
    pub fn new(scope: ProjectScope) -> Self {
        Self { scope }
    }

    /// Tags for a resource; `name` and `service_label` are used verbatim
    pub fn tags_for(&self, name: &str, service_label: &str) -> ResourceTags {
        ResourceTags {
            enterprise: self.scope.enterprise().to_string(),
            project: self.scope.project_name().to_string(),
            environment: self.scope.environment().as_str().to_string(),
            name: name.to_string(),
            service: service_label.to_string(),
            owner: self.scope.author().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Environment;

    fn planner() -> TagPlanner {
        let scope = ProjectScope::new(
            "123456789012",
            "us-east-1",
            "AJE",
            "DataLake",
            Environment::Test,
            "-",
            "Miguel",
        )
        .unwrap();
        TagPlanner::new(scope)
    }

    #[test]
    fn test_tags_have_six_fixed_keys() {
        let tags = planner().tags_for("aje-test-datalake-orders-fn", "AWS Lambda");
        let keys: Vec<_> = tags.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["Enterprise", "Project", "Environment", "Name", "Service", "Owner"]
        );
        assert_eq!(tags.to_map().len(), 6);
    }

    #[test]
    fn test_tag_values_come_from_scope() {
        let tags = planner().tags_for("n", "s");
        assert_eq!(tags.get("Enterprise"), Some("AJE"));
        assert_eq!(tags.get("Project"), Some("DataLake"));
        assert_eq!(tags.get("Environment"), Some("TEST"));
        assert_eq!(tags.get("Owner"), Some("Miguel"));
    }

    #[test]
    fn test_name_and_service_are_verbatim() {
        let tags = planner().tags_for("Not Sanitized, Á", "");
        assert_eq!(tags.get("Name"), Some("Not Sanitized, Á"));
        assert_eq!(tags.get("Service"), Some(""));
        assert_eq!(tags.iter().count(), 6);
    }
}

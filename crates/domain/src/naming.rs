//! Standardized resource name generation

use unicode_normalization::UnicodeNormalization;

use crate::model::{EndpointDirection, ProjectScope, ServiceKind};

/// Deterministic AWS resource name generator bound to a project scope
#[derive(Debug, Clone)]
pub struct NameGenerator {
    scope: ProjectScope,
}

impl NameGenerator {
    pub fn new(scope: ProjectScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &ProjectScope {
        &self.scope
    }

    /// Generate the standardized name for a resource
    ///
    /// Bucket names must be globally unique and embed account id and region.
    /// Whole components that are empty are skipped before joining.
    pub fn build(&self, kind: ServiceKind, descriptive_name: &str) -> String {
        let scope = &self.scope;
        let environment = scope.environment().as_str();

        let components = match kind {
            ServiceKind::S3Bucket => vec![
                scope.enterprise(),
                scope.account_id(),
                scope.region_name(),
                environment,
                scope.project_name(),
                descriptive_name,
                kind.abbreviation(),
            ],
            _ => vec![
                scope.enterprise(),
                environment,
                scope.project_name(),
                descriptive_name,
                kind.abbreviation(),
            ],
        };

        let joined = components
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(scope.separator());

        Self::sanitize(&joined)
    }

    /// Name for a DMS endpoint: `<dms task name>-<engine>-<src|tgt>`
    ///
    /// `engine` is inserted verbatim; check it with
    /// [`EndpointSpec::has_valid_engine`](crate::model::EndpointSpec::has_valid_engine).
    pub fn build_replication_endpoint_name(
        &self,
        descriptive_name: &str,
        engine: &str,
        direction: EndpointDirection,
    ) -> String {
        let base = self.build(ServiceKind::DmsTask, descriptive_name);
        format!("{}-{}-{}", base, engine, direction.suffix())
    }

    /// Lower-case, strip diacritics and non-ASCII, map `.` `,` and space to `_`
    pub fn sanitize(text: &str) -> String {
        text.to_lowercase()
            .nfkd()
            .filter(char::is_ascii)
            .map(|c| match c {
                '.' | ',' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Environment;

    fn generator() -> NameGenerator {
        let scope = ProjectScope::new(
            "123456789012",
            "us-east-1",
            "AJE",
            "DataLake",
            Environment::Dev,
            "-",
            "Data Team",
        )
        .unwrap();
        NameGenerator::new(scope)
    }

    #[test]
    fn test_bucket_name_embeds_account_and_region() {
        let name = generator().build(ServiceKind::S3Bucket, "raw");
        assert_eq!(name, "aje-123456789012-us-east-1-dev-datalake-raw-s3");
    }

    #[test]
    fn test_bucket_components_appear_in_order() {
        let name = generator().build(ServiceKind::S3Bucket, "Landing Zone");
        let parts = [
            "aje",
            "123456789012",
            "us-east-1",
            "dev",
            "datalake",
            "landing_zone",
            "s3",
        ];
        let mut cursor = 0;
        for part in parts {
            let found = name[cursor..].find(part).expect(part);
            cursor += found + part.len();
        }
    }

    #[test]
    fn test_non_bucket_omits_account_and_region() {
        let names = generator();
        for kind in ServiceKind::ALL {
            if kind == ServiceKind::S3Bucket {
                continue;
            }
            let name = names.build(kind, "orders");
            assert!(!name.contains("123456789012"), "{}: {}", kind, name);
            assert!(!name.contains("us-east-1"), "{}: {}", kind, name);
            assert!(name.ends_with(kind.abbreviation()));
        }
    }

    #[test]
    fn test_lambda_name() {
        let name = generator().build(ServiceKind::LambdaFunction, "Ventas Diarias");
        assert_eq!(name, "aje-dev-datalake-ventas_diarias-fn");
    }

    #[test]
    fn test_build_is_deterministic() {
        let names = generator();
        let first = names.build(ServiceKind::GlueJob, "Carga Inicial");
        let second = names.build(ServiceKind::GlueJob, "Carga Inicial");
        assert_eq!(first, second);
    }

    #[test]
    fn test_sanitize_accents_and_punctuation() {
        let component = NameGenerator::sanitize("Café Ventas, S.A.");
        assert_eq!(component, "cafe_ventas__s_a_");
        assert!(component.is_ascii());
        assert!(!component.contains(['.', ',', ' ']));
        assert_eq!(component, component.to_lowercase());
    }

    #[test]
    fn test_sanitize_drops_non_latin_scripts() {
        assert_eq!(NameGenerator::sanitize("Ñandú 東京"), "nandu_");
    }

    #[test]
    fn test_sanitize_keeps_ascii_punctuation() {
        assert_eq!(NameGenerator::sanitize("a-b_c/d"), "a-b_c/d");
    }

    #[test]
    fn test_empty_descriptive_name_is_skipped() {
        let name = generator().build(ServiceKind::SnsTopic, "");
        assert_eq!(name, "aje-dev-datalake-sns");
        assert!(!name.contains("--"));
    }

    #[test]
    fn test_component_emptied_by_sanitizing_leaves_empty_segment() {
        let name = generator().build(ServiceKind::Sqs, "🚀");
        assert_eq!(name, "aje-dev-datalake--sqs");
    }

    #[test]
    fn test_custom_separator() {
        let scope = ProjectScope::new(
            "1",
            "sa-east-1",
            "aje",
            "sales",
            Environment::Prod,
            "_",
            "ops",
        )
        .unwrap();
        let name = NameGenerator::new(scope).build(ServiceKind::DynamodbTable, "Clientes");
        assert_eq!(name, "aje_prod_sales_clientes_ddb");
    }

    #[test]
    fn test_replication_endpoint_source_and_target() {
        let names = generator();
        let base = names.build(ServiceKind::DmsTask, "orders");

        let source =
            names.build_replication_endpoint_name("orders", "oracle", EndpointDirection::Source);
        assert_eq!(source, format!("{}-oracle-src", base));
        assert_eq!(source, "aje-dev-datalake-orders-dms-oracle-src");

        let target =
            names.build_replication_endpoint_name("orders", "postgres", EndpointDirection::Target);
        assert_eq!(target, format!("{}-postgres-tgt", base));
    }

    #[test]
    fn test_replication_engine_is_not_sanitized() {
        let name = generator().build_replication_endpoint_name(
            "orders",
            "SQLServer",
            EndpointDirection::Source,
        );
        assert!(name.ends_with("-SQLServer-src"));
    }
}

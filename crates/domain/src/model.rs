//! Domain models and value objects

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::naming::NameGenerator;

static ENGINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("Valid regex"));

/// Deployment environment a provisioning run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Test, Environment::Prod];

    /// Literal value used in names and the Environment tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Test => "TEST",
            Environment::Prod => "PROD",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEV" => Ok(Environment::Dev),
            "TEST" => Ok(Environment::Test),
            "PROD" => Ok(Environment::Prod),
            _ => Err(ScopeError::InvalidEnvironment(s.to_string())),
        }
    }
}

/// AWS resource family a name or tag set is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ServiceKind {
    S3Bucket,
    LambdaFunction,
    StepFunction,
    IamRole,
    IamPolicy,
    GlueJob,
    GlueConnection,
    GlueCrawler,
    GlueDatabase,
    SnsTopic,
    DmsTask,
    DmsInstance,
    DmsEndpoint,
    DynamodbTable,
    Secret,
    EventBridge,
    ApiGateway,
    Sqs,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 18] = [
        ServiceKind::S3Bucket,
        ServiceKind::LambdaFunction,
        ServiceKind::StepFunction,
        ServiceKind::IamRole,
        ServiceKind::IamPolicy,
        ServiceKind::GlueJob,
        ServiceKind::GlueConnection,
        ServiceKind::GlueCrawler,
        ServiceKind::GlueDatabase,
        ServiceKind::SnsTopic,
        ServiceKind::DmsTask,
        ServiceKind::DmsInstance,
        ServiceKind::DmsEndpoint,
        ServiceKind::DynamodbTable,
        ServiceKind::Secret,
        ServiceKind::EventBridge,
        ServiceKind::ApiGateway,
        ServiceKind::Sqs,
    ];

    /// Stable snake_case identifier (used in catalogs and on the CLI)
    pub fn id(&self) -> &'static str {
        match self {
            ServiceKind::S3Bucket => "s3_bucket",
            ServiceKind::LambdaFunction => "lambda_function",
            ServiceKind::StepFunction => "step_function",
            ServiceKind::IamRole => "iam_role",
            ServiceKind::IamPolicy => "iam_policy",
            ServiceKind::GlueJob => "glue_job",
            ServiceKind::GlueConnection => "glue_connection",
            ServiceKind::GlueCrawler => "glue_crawler",
            ServiceKind::GlueDatabase => "glue_database",
            ServiceKind::SnsTopic => "sns_topic",
            ServiceKind::DmsTask => "dms_task",
            ServiceKind::DmsInstance => "dms_instance",
            ServiceKind::DmsEndpoint => "dms_endpoint",
            ServiceKind::DynamodbTable => "dynamodb_table",
            ServiceKind::Secret => "secret",
            ServiceKind::EventBridge => "event_bridge",
            ServiceKind::ApiGateway => "api_gateway",
            ServiceKind::Sqs => "sqs",
        }
    }

    /// Short literal appended as the last name component
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ServiceKind::S3Bucket => "s3",
            ServiceKind::LambdaFunction => "fn",
            ServiceKind::StepFunction => "sf",
            ServiceKind::IamRole => "role",
            ServiceKind::IamPolicy => "policy",
            ServiceKind::GlueJob => "job",
            ServiceKind::GlueConnection => "cnx",
            ServiceKind::GlueCrawler => "cw",
            ServiceKind::GlueDatabase => "db",
            ServiceKind::SnsTopic => "sns",
            ServiceKind::DmsTask => "dms",
            ServiceKind::DmsInstance => "dmsi",
            ServiceKind::DmsEndpoint => "dmse",
            ServiceKind::DynamodbTable => "ddb",
            ServiceKind::Secret => "sm",
            ServiceKind::EventBridge => "eb",
            ServiceKind::ApiGateway => "api",
            ServiceKind::Sqs => "sqs",
        }
    }

    /// Human-readable label used for the Service tag
    pub fn service_label(&self) -> &'static str {
        match self {
            ServiceKind::S3Bucket => "AWS S3",
            ServiceKind::LambdaFunction => "AWS Lambda",
            ServiceKind::StepFunction => "AWS Step Functions",
            ServiceKind::IamRole | ServiceKind::IamPolicy => "AWS IAM",
            ServiceKind::GlueJob
            | ServiceKind::GlueConnection
            | ServiceKind::GlueCrawler
            | ServiceKind::GlueDatabase => "AWS Glue",
            ServiceKind::SnsTopic => "AWS SNS",
            ServiceKind::DmsTask | ServiceKind::DmsInstance | ServiceKind::DmsEndpoint => {
                "AWS DMS"
            }
            ServiceKind::DynamodbTable => "AWS DynamoDB",
            ServiceKind::Secret => "AWS Secrets Manager",
            ServiceKind::EventBridge => "AWS EventBridge",
            ServiceKind::ApiGateway => "AWS API Gateway",
            ServiceKind::Sqs => "AWS SQS",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ServiceKind {
    type Err = ServiceKindError;

    /// Accepts either the snake_case identifier or the abbreviation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.id() == needle || kind.abbreviation() == needle)
            .ok_or_else(|| ServiceKindError::Unknown(s.to_string()))
    }
}

impl TryFrom<String> for ServiceKind {
    type Error = ServiceKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceKind> for &'static str {
    fn from(kind: ServiceKind) -> Self {
        kind.id()
    }
}

/// Unrecognized service kind; always a caller bug
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceKindError {
    #[error("Unknown service kind '{0}'")]
    Unknown(String),
}

/// Which side of a database migration an endpoint sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointDirection {
    Source,
    Target,
}

impl EndpointDirection {
    pub fn suffix(&self) -> &'static str {
        match self {
            EndpointDirection::Source => "src",
            EndpointDirection::Target => "tgt",
        }
    }
}

impl FromStr for EndpointDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" | "src" => Ok(EndpointDirection::Source),
            "target" | "tgt" => Ok(EndpointDirection::Target),
            other => Err(format!("invalid endpoint direction '{}'", other)),
        }
    }
}

/// Configuration errors raised while building a [`ProjectScope`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("Missing required config key: {0}")]
    MissingField(&'static str),
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("Missing required config key: app_config.{0}")]
    MissingAppConfig(String),
    #[error("Invalid separator '{0}': removed when names are sanitized")]
    InvalidSeparator(String),
}

/// Raw project settings as loaded from configuration, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub enterprise: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
    /// Per-environment application settings, keyed by lower-case environment
    #[serde(default)]
    pub app_config: Option<BTreeMap<String, Value>>,
}

/// Immutable project-wide values shared by naming and tagging
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectScope {
    account_id: String,
    region_name: String,
    enterprise: String,
    project_name: String,
    environment: Environment,
    separator: String,
    author: String,
    app_config: Value,
}

impl ProjectScope {
    /// Build a validated scope; every string field must be non-empty
    ///
    /// The separator must also survive name sanitization.
    pub fn new(
        account_id: impl Into<String>,
        region_name: impl Into<String>,
        enterprise: impl Into<String>,
        project_name: impl Into<String>,
        environment: Environment,
        separator: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self, ScopeError> {
        let separator = required(Some(separator.into()), "separator")?;
        if NameGenerator::sanitize(&separator).is_empty() {
            return Err(ScopeError::InvalidSeparator(separator));
        }

        Ok(Self {
            account_id: required(Some(account_id.into()), "account_id")?,
            region_name: required(Some(region_name.into()), "region_name")?,
            enterprise: required(Some(enterprise.into()), "enterprise")?,
            project_name: required(Some(project_name.into()), "project_name")?,
            environment,
            separator,
            author: required(Some(author.into()), "author")?,
            app_config: Value::Object(Map::new()),
        })
    }

    /// Attach the environment-specific application settings
    pub fn with_app_config(mut self, app_config: Value) -> Self {
        self.app_config = app_config;
        self
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    pub fn enterprise(&self) -> &str {
        &self.enterprise
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Application settings for the selected environment
    pub fn app_config(&self) -> &Value {
        &self.app_config
    }

    pub fn app_setting(&self, key: &str) -> Option<&Value> {
        self.app_config.get(key)
    }
}

impl TryFrom<ProjectSettings> for ProjectScope {
    type Error = ScopeError;

    fn try_from(settings: ProjectSettings) -> Result<Self, Self::Error> {
        let environment: Environment = settings
            .environment
            .as_deref()
            .ok_or(ScopeError::MissingField("environment"))?
            .parse()?;

        let scope = ProjectScope::new(
            required(settings.account_id, "account_id")?,
            required(settings.region_name, "region_name")?,
            required(settings.enterprise, "enterprise")?,
            required(settings.project_name, "project_name")?,
            environment,
            required(settings.separator, "separator")?,
            required(settings.author, "author")?,
        )?;

        let app_config = match settings.app_config {
            None => Value::Object(Map::new()),
            Some(mut tables) => {
                let key = environment.as_str().to_ascii_lowercase();
                tables.remove(&key).ok_or(ScopeError::MissingAppConfig(key))?
            }
        };

        Ok(scope.with_app_config(app_config))
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ScopeError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ScopeError::MissingField(field)),
    }
}

/// The fixed tag set attached to every provisioned resource
///
/// Serializes and iterates in key order Enterprise, Project, Environment,
/// Name, Service, Owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceTags {
    pub enterprise: String,
    pub project: String,
    pub environment: String,
    pub name: String,
    pub service: String,
    pub owner: String,
}

impl ResourceTags {
    pub const KEYS: [&'static str; 6] = [
        "Enterprise",
        "Project",
        "Environment",
        "Name",
        "Service",
        "Owner",
    ];

    /// Iterate `(key, value)` pairs in the fixed key order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let values = [
            self.enterprise.as_str(),
            self.project.as_str(),
            self.environment.as_str(),
            self.name.as_str(),
            self.service.as_str(),
            self.owner.as_str(),
        ];
        Self::KEYS.into_iter().zip(values)
    }

    /// Look up a tag value by its key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Whether a planned resource is created or only referenced by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    #[default]
    Create,
    Import,
}

impl PlanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanAction::Create => "create",
            PlanAction::Import => "import",
        }
    }
}

/// Engine and direction qualifiers for a replication endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub engine: String,
    pub direction: EndpointDirection,
}

impl EndpointSpec {
    /// Engines go into endpoint names verbatim, so only `[a-z0-9_]+` is accepted
    pub fn has_valid_engine(&self) -> bool {
        ENGINE_PATTERN.is_match(&self.engine)
    }
}

/// A single resource a caller wants named (and tagged)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub kind: ServiceKind,
    /// Descriptive name; free text
    pub name: String,
    #[serde(default)]
    pub action: PlanAction,
    /// Overrides the default Service tag label
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub endpoint: Option<EndpointSpec>,
}

impl ResourceRequest {
    pub fn create(kind: ServiceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            action: PlanAction::Create,
            label: None,
            endpoint: None,
        }
    }

    pub fn import(kind: ServiceKind, name: impl Into<String>) -> Self {
        Self {
            action: PlanAction::Import,
            ..Self::create(kind, name)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_endpoint(mut self, engine: impl Into<String>, direction: EndpointDirection) -> Self {
        self.endpoint = Some(EndpointSpec {
            engine: engine.into(),
            direction,
        });
        self
    }
}

/// Resolved name, label and tags for one requested resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePlan {
    pub kind: ServiceKind,
    pub descriptive_name: String,
    pub action: PlanAction,
    /// Physical name, also used as the logical identifier
    pub name: String,
    pub service_label: String,
    /// Absent for imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<ResourceTags>,
}

/// Outcome of planning a batch of resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub created: usize,
    pub imported: usize,
    /// SHA-256 over every plan, in order
    pub plan_hash: String,
}

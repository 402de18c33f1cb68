//! Doctor command - validate configuration and show the resolved scope

use anyhow::Result;
use infra_namer_domain::{NameGenerator, ProjectScope, ServiceKind};
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    scope: CheckResult,
    app_config: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        scope: CheckResult::error("Not checked"),
        app_config: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = match &c.source {
                Some(path) => CheckResult::ok(format!("Loaded {}", path.display())),
                None => CheckResult::warn("No config file found; using environment only"),
            };
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        match config.project_scope() {
            Ok(scope) => {
                report.scope = check_scope(&scope);
                report.app_config = check_app_config(&scope);
            }
            Err(e) => {
                report.scope = CheckResult::error(format!("{:#}", e));
            }
        }
    }

    let checks = [&report.config, &report.scope, &report.app_config];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_scope(scope: &ProjectScope) -> CheckResult {
    let names = NameGenerator::new(scope.clone());
    let bucket = names.build(ServiceKind::S3Bucket, "example");
    let function = names.build(ServiceKind::LambdaFunction, "example");

    let details = serde_json::json!({
        "account_id": scope.account_id(),
        "region_name": scope.region_name(),
        "enterprise": scope.enterprise(),
        "project_name": scope.project_name(),
        "environment": scope.environment().as_str(),
        "separator": scope.separator(),
        "author": scope.author(),
        "examples": {
            "s3_bucket": bucket,
            "lambda_function": function,
        },
    });

    // Separators inside components make distinct inputs collide
    let sanitized_separator = NameGenerator::sanitize(scope.separator());
    let clashing: Vec<&str> = [scope.enterprise(), scope.project_name()]
        .into_iter()
        .filter(|c| NameGenerator::sanitize(c).contains(&sanitized_separator))
        .collect();

    let message = format!(
        "{} / {} ({})",
        scope.enterprise(),
        scope.project_name(),
        scope.environment()
    );

    if clashing.is_empty() {
        CheckResult::ok(message).with_details(details)
    } else {
        CheckResult::warn(format!(
            "{}; separator '{}' appears in: {}",
            message,
            scope.separator(),
            clashing.join(", ")
        ))
        .with_details(details)
    }
}

fn check_app_config(scope: &ProjectScope) -> CheckResult {
    match scope.app_config().as_object() {
        Some(table) if table.is_empty() => {
            CheckResult::ok("No app_config settings for this environment")
        }
        Some(table) => CheckResult::ok(format!("{} app_config settings", table.len()))
            .with_details(serde_json::json!({
                "keys": table.keys().collect::<Vec<_>>()
            })),
        None => CheckResult::warn("app_config entry is not a table"),
    }
}

fn print_report(report: &DoctorReport) {
    println!("infra-namer Doctor Report");
    println!("=========================");
    println!();

    print_check("Config", &report.config);
    print_check("Project Scope", &report.scope);
    print_check("App Config", &report.app_config);

    if let Some(examples) = report
        .scope
        .details
        .as_ref()
        .and_then(|d| d.get("examples"))
        .and_then(|e| e.as_object())
    {
        println!();
        println!("Example names:");
        for (kind, name) in examples {
            println!("  {}: {}", kind, name.as_str().unwrap_or_default());
        }
    }

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}

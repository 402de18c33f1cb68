//! Plan command - resolve names and tags for a resource catalog

use anyhow::{Context, Result};
use infra_namer_adapters::catalog::FsResourceCatalog;
use infra_namer_adapters::sink::{InMemoryResourceSink, ManifestSink, ManifestWriter};
use infra_namer_domain::{ResourceCatalog, ResourceSink, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::PlanArgs;

pub async fn execute(args: PlanArgs, config_path: Option<PathBuf>) -> Result<()> {
    let planner = super::load_planner(config_path)?;

    let catalog = FsResourceCatalog::new(&args.resources)
        .context("Failed to open resource catalog")?;
    let requests = catalog
        .load()
        .await
        .context("Failed to load resource catalog")?;

    let sink: Box<dyn ResourceSink> = match &args.manifest {
        Some(path) => {
            let writer = ManifestWriter::new(path.clone())
                .await
                .with_context(|| format!("Failed to open manifest: {}", path.display()))?;
            Box::new(ManifestSink::new(writer, Arc::new(SystemClock)))
        }
        None => Box::new(InMemoryResourceSink::new()),
    };

    let (plans, summary) = planner
        .run(&requests, sink.as_ref())
        .await
        .context("Planning failed")?;

    if args.json {
        let output = serde_json::json!({
            "summary": summary,
            "resources": plans,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Resource Plan ({} create, {} import)",
            summary.created, summary.imported
        );
        println!("========================");
        println!();

        for plan in &plans {
            println!("{} [{}]", plan.name, plan.action.as_str());
            println!("  Kind: {}", plan.kind);
            println!("  Service: {}", plan.service_label);
            if let Some(tags) = &plan.tags {
                let rendered: Vec<String> =
                    tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                println!("  Tags: {}", rendered.join(", "));
            }
            println!();
        }

        println!("Plan hash: {}", summary.plan_hash);
        if let Some(path) = &args.manifest {
            println!("Manifest: {}", path.display());
        }
    }

    Ok(())
}

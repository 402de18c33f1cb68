//! Tags command - show the standard tag set for one resource

use anyhow::{Context, Result};
use infra_namer_domain::ResourceRequest;
use std::path::PathBuf;

use crate::args::TagsArgs;

pub async fn execute(args: TagsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let planner = super::load_planner(config_path)?;

    let mut request = ResourceRequest::create(args.kind, args.name);
    if let Some(label) = args.label {
        request = request.with_label(label);
    }

    let plan = planner.plan(&request).context("Failed to plan resource")?;
    let tags = plan
        .tags
        .context("Created resources always carry tags")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for (key, value) in tags.iter() {
            println!("{}: {}", key, value);
        }
    }

    Ok(())
}

//! Name command - generate one standardized resource name

use anyhow::{Context, Result};
use infra_namer_domain::ResourceRequest;
use std::path::PathBuf;

use crate::args::NameArgs;

pub async fn execute(args: NameArgs, config_path: Option<PathBuf>) -> Result<()> {
    let planner = super::load_planner(config_path)?;

    let mut request = ResourceRequest::create(args.kind, args.name);
    if let (Some(engine), Some(direction)) = (args.engine, args.direction) {
        request = request.with_endpoint(engine, direction);
    }

    let plan = planner
        .plan(&request)
        .context("Failed to generate resource name")?;

    println!("{}", plan.name);
    Ok(())
}

//! Permissions command - print joined IAM permission sets

use anyhow::{Result, bail};
use infra_namer_domain::permissions::{self, SET_NAMES};

use crate::args::PermissionsArgs;

pub async fn execute(args: PermissionsArgs) -> Result<()> {
    let mut lists = Vec::with_capacity(args.sets.len());
    for name in &args.sets {
        match permissions::named_set(name) {
            Some(set) => lists.push(set),
            None => bail!(
                "Unknown permission set '{}'. Known sets: {}",
                name,
                SET_NAMES.join(", ")
            ),
        }
    }

    let joined = permissions::join_permissions(&lists);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&joined)?);
    } else {
        for action in &joined {
            println!("{}", action);
        }
    }

    Ok(())
}

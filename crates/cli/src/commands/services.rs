//! Services command - list supported service kinds

use anyhow::Result;
use infra_namer_domain::ServiceKind;

use crate::args::ServicesArgs;

pub async fn execute(args: ServicesArgs) -> Result<()> {
    if args.json {
        let output = serde_json::json!({
            "count": ServiceKind::ALL.len(),
            "services": ServiceKind::ALL.iter().map(|kind| serde_json::json!({
                "kind": kind.id(),
                "abbreviation": kind.abbreviation(),
                "label": kind.service_label(),
            })).collect::<Vec<_>>()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{:<16} {:<7} LABEL", "KIND", "ABBREV");
        for kind in ServiceKind::ALL {
            println!(
                "{:<16} {:<7} {}",
                kind.id(),
                kind.abbreviation(),
                kind.service_label()
            );
        }
    }

    Ok(())
}

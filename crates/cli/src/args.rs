//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use infra_namer_domain::{EndpointDirection, ServiceKind};
use std::path::PathBuf;

/// infra-namer: standardized AWS resource names and tags
#[derive(Parser, Debug)]
#[command(name = "infra-namer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the standardized name for one resource
    Name(NameArgs),

    /// Show the tag set for one resource
    Tags(TagsArgs),

    /// Resolve names and tags for every resource in a catalog
    Plan(PlanArgs),

    /// List supported service kinds
    Services(ServicesArgs),

    /// Print predefined IAM permission sets
    Permissions(PermissionsArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show the resolved project scope
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Service kind (identifier such as s3_bucket, or abbreviation such as s3)
    #[arg(long)]
    pub kind: ServiceKind,

    /// Descriptive name of the resource
    pub name: String,

    /// Database engine for a DMS endpoint (e.g., oracle, postgres)
    #[arg(long, requires = "direction")]
    pub engine: Option<String>,

    /// Endpoint direction (source or target)
    #[arg(long, requires = "engine")]
    pub direction: Option<EndpointDirection>,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Service kind (identifier or abbreviation)
    #[arg(long)]
    pub kind: ServiceKind,

    /// Descriptive name of the resource
    pub name: String,

    /// Override the Service tag label
    #[arg(long)]
    pub label: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// TOML catalog with [[resources]] entries
    #[arg(long, default_value = "./resources.toml")]
    pub resources: PathBuf,

    /// Write the plan as JSON lines to this file
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServicesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Set names (appflow_read_write, s3_read, s3_write, logs)
    #[arg(required = true, num_args = 1..)]
    pub sets: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./infra-namer.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Translate remote table schemas into engine schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a saved schema service response into an engine schema
    Describe(DescribeArgs),
    /// Convert a binary scan-column payload into an engine schema
    Wire(WireArgs),
    /// List every recognized remote type tag and its engine type
    Types,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// JSON body returned by the remote schema endpoint
    #[arg(short, long)]
    pub metadata: PathBuf,
    /// YAML file of read options (supports `read-field-list`)
    #[arg(short, long)]
    pub options: Option<PathBuf>,
    /// Comma-separated columns to keep; overrides `read-field-list`
    #[arg(short, long)]
    pub fields: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct WireArgs {
    /// Binary scan-column payload produced by the execution backend
    #[arg(short, long)]
    pub input: PathBuf,
    /// Comma-separated columns to keep
    #[arg(short, long)]
    pub fields: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

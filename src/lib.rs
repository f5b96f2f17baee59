pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod schema;
pub mod source;
pub mod table;
pub mod wire;

use std::{env, fs, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, DescribeArgs, OutputFormat, WireArgs},
    config::ReadOptions,
    fetch::FileMetadataClient,
    mapping::FieldSelection,
    schema::Schema,
    source::SourceType,
};

pub use crate::{
    error::SchemaError,
    fetch::{MetadataClient, discover_schema, fetch_schema, parse_schema_response},
    mapping::{map_type, project},
    wire::{ScanColumnDesc, from_wire_columns},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schema_bridge", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Describe(args) => handle_describe(&args),
        Commands::Wire(args) => handle_wire(&args),
        Commands::Types => handle_types(),
    }
}

fn handle_describe(args: &DescribeArgs) -> Result<()> {
    let mut options = match &args.options {
        Some(path) => ReadOptions::load(path)
            .with_context(|| format!("Loading read options from {path:?}"))?,
        None => ReadOptions::new(),
    };
    if let Some(fields) = &args.fields {
        options = options.with_field_list(fields.as_str());
    }
    let client = FileMetadataClient::new(&args.metadata);
    info!(
        "Describing schema from {:?} ({})",
        client.path(),
        describe_selection(&options.field_selection())
    );

    let schema = discover_schema(&client, &options)
        .with_context(|| format!("Converting schema from {:?}", args.metadata))?;
    emit(&schema, args.format)?;
    info!("Converted {} field(s)", schema.len());
    Ok(())
}

fn handle_wire(args: &WireArgs) -> Result<()> {
    let bytes =
        fs::read(&args.input).with_context(|| format!("Reading payload {:?}", args.input))?;
    let descriptors = wire::decode_scan_columns(&bytes)
        .with_context(|| format!("Decoding scan columns from {:?}", args.input))?;
    debug!(
        "Scan columns: {}",
        descriptors.iter().map(|d| d.name.as_str()).join(", ")
    );
    let raw = from_wire_columns(&descriptors);
    let schema = project(&raw, args.fields.as_deref())
        .with_context(|| format!("Converting scan columns from {:?}", args.input))?;
    emit(&schema, args.format)?;
    info!("Converted {} of {} scan column(s)", schema.len(), raw.len());
    Ok(())
}

fn handle_types() -> Result<()> {
    let headers = vec!["tag".to_string(), "type".to_string()];
    let rows = SourceType::ALL
        .iter()
        .map(|ty| {
            let target = if ty.is_decimal() {
                "decimal(precision,scale)".to_string()
            } else {
                match mapping::map_source_type(*ty, 0, 0) {
                    Ok(mapped) => mapped.signature_token(),
                    Err(_) => "unsupported".to_string(),
                }
            };
            vec![ty.as_str().to_string(), target]
        })
        .collect::<Vec<_>>();
    print!("{}", table::render_table(&headers, &rows));
    Ok(())
}

fn emit(schema: &Schema, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Table => table::render_schema(schema),
        OutputFormat::Json => format!("{}\n", schema.to_json_string()?),
        OutputFormat::Yaml => schema.to_yaml_string()?,
    };
    print!("{rendered}");
    Ok(())
}

fn describe_selection(selection: &FieldSelection) -> String {
    match selection {
        FieldSelection::All => "all fields".to_string(),
        FieldSelection::Only(names) => format!("fields {}", names.iter().sorted().join(",")),
    }
}

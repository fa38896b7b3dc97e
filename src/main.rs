//! wirecompat CLI entry point.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wirecompat::cli::{print_matrix, print_raw_fields, print_record, Args, SchemaVersion};
use wirecompat_core::compat::evaluate;
use wirecompat_core::project::project;
use wirecompat_core::schema::versions;
use wirecompat_core::wire::decode_message;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    // Handle info-only commands
    if args.list_schemas {
        list_schemas();
        return Ok(());
    }

    if args.compat {
        let old = args.old_schema.unwrap_or(SchemaVersion::V1).schema();
        let new = args.schema.schema();
        let verdicts = evaluate(old, new)
            .with_context(|| format!("schemas {} and {} are not comparable", old, new))?;
        return print_matrix(old, new, &verdicts);
    }

    let Some(hex_payload) = args.hex else {
        bail!("hex payload required (or --compat / --list-schemas). Use --help for usage.");
    };

    let payload = hex::decode(hex_payload.trim()).context("payload is not valid hex")?;
    let schema = args.schema.schema();

    let raw = match decode_message(&payload) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(offset = err.offset(), "failed to decode payload: {err}");
            bail!("malformed payload at byte {}: {err}", err.offset());
        }
    };

    if args.analyze {
        return print_raw_fields(&raw);
    }

    let record = match project(&raw, schema) {
        Ok(record) => record,
        Err(err) => {
            tracing::error!(offset = err.offset(), "failed to project payload: {err}");
            bail!("malformed embedded message at byte {}: {err}", err.offset());
        }
    };

    print_record(&record, schema, args.format)
}

fn list_schemas() {
    println!("Built-in schemas:");
    println!("{:-<50}", "");

    for schema in versions::all() {
        println!("  {}", schema.version);
        for field in schema.fields {
            println!("    {:>3}  {:<18} {}", field.number, field.name, field.kind);
        }
    }
}

//! Output rendering for decoded payloads and compatibility matrices.

use std::io::{self, Write};

use clap::ValueEnum;

use wirecompat_core::compat::Verdict;
use wirecompat_core::record::DecodedRecord;
use wirecompat_core::schema::Schema;
use wirecompat_core::text::{encode_text, TextOptions};
use wirecompat_core::wire::{RawField, RawValue};

/// Output formats for decoded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned name/value table
    Table,
    /// Canonical textual (JSON) encoding
    Json,
}

/// Print a projected record in the chosen format.
pub fn print_record(
    record: &DecodedRecord,
    schema: &Schema,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    match format {
        OutputFormat::Table => {
            writeln!(stdout, "schema {}:", schema.version)?;
            for (name, value) in &record.fields {
                writeln!(stdout, "  {name:<18} {value}")?;
            }
            for desc in schema.fields {
                if !record.contains(desc.name) {
                    writeln!(stdout, "  {:<18} (absent)", desc.name)?;
                }
            }
        }
        OutputFormat::Json => {
            let options = TextOptions {
                discard_unknown: false,
                pretty: true,
            };
            writeln!(stdout, "{}", encode_text(record, schema, &options)?)?;
        }
    }

    for diag in &record.diagnostics {
        writeln!(
            stdout,
            "  ! {} (byte {}): {}",
            diag.field, diag.offset, diag.detail
        )?;
    }

    Ok(())
}

/// Dump raw tag/wire-type/value triples with their byte offsets.
pub fn print_raw_fields(fields: &[RawField<'_>]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    for field in fields {
        match field.value {
            RawValue::Varint(v) => writeln!(
                stdout,
                "byte {:>4}: field {:>3} ({}): {v}",
                field.offset, field.number, field.wire_type
            )?,
            RawValue::Bytes(span) => {
                let printable = std::str::from_utf8(span)
                    .ok()
                    .filter(|s| s.chars().all(|c| !c.is_control()));
                match printable {
                    Some(s) => writeln!(
                        stdout,
                        "byte {:>4}: field {:>3} ({}, len={}): {s:?}",
                        field.offset,
                        field.number,
                        field.wire_type,
                        span.len()
                    )?,
                    None => writeln!(
                        stdout,
                        "byte {:>4}: field {:>3} ({}, len={}): {}",
                        field.offset,
                        field.number,
                        field.wire_type,
                        span.len(),
                        hex::encode_upper(span)
                    )?,
                }
            }
        }
    }

    Ok(())
}

/// Print a compatibility matrix for a schema pair.
pub fn print_matrix(old: &Schema, new: &Schema, verdicts: &[Verdict]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "compatibility {} -> {}:", old.version, new.version)?;
    writeln!(stdout, "  {:<18} {:>6}  {:<10} {:<10}", "field", "number", "old->new", "new->old")?;
    for pair in verdicts.chunks(2) {
        let [old_to_new, new_to_old] = pair else {
            continue;
        };
        writeln!(
            stdout,
            "  {:<18} {:>6}  {:<10} {:<10}",
            old_to_new.field_name,
            old_to_new.number,
            old_to_new.outcome.as_str(),
            new_to_old.outcome.as_str()
        )?;
    }

    Ok(())
}

//! Command-line argument definitions.

use clap::{Parser, ValueEnum};

use wirecompat_core::schema::{versions, Schema};

use super::OutputFormat;

/// Built-in schema versions selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaVersion {
    /// Infrastructure execution v1 (fields 1-5)
    V1,
    /// Infrastructure execution v2 (v1 plus message, field 6)
    V2,
    /// Documented capture layout without its message field
    CaptureV1,
    /// Documented capture layout (timestamps at 5/6, message at 7)
    CaptureV2,
}

impl SchemaVersion {
    /// Resolve to the schema table.
    pub fn schema(&self) -> &'static Schema {
        match self {
            SchemaVersion::V1 => &versions::V1,
            SchemaVersion::V2 => &versions::V2,
            SchemaVersion::CaptureV1 => &versions::CAPTURE_V1,
            SchemaVersion::CaptureV2 => &versions::CAPTURE_V2,
        }
    }
}

/// Inspect wire-format payloads and schema-evolution compatibility.
#[derive(Parser, Debug)]
#[command(name = "wirecompat")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Hex-encoded wire payload to decode
    #[arg(value_name = "HEX")]
    pub hex: Option<String>,

    /// Schema version to project the payload through
    #[arg(long = "schema", value_enum, default_value = "v2")]
    pub schema: SchemaVersion,

    /// Old-side schema for --compat (defaults to v1)
    #[arg(long = "old-schema", value_enum)]
    pub old_schema: Option<SchemaVersion>,

    /// Output format for decoded records
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Dump raw tag/wire-type/value triples with byte offsets
    #[arg(long = "analyze")]
    pub analyze: bool,

    /// Print the compatibility matrix for the schema pair
    #[arg(long = "compat")]
    pub compat: bool,

    /// List built-in schemas and their field layouts
    #[arg(long = "list-schemas")]
    pub list_schemas: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

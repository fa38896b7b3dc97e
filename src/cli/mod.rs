//! Command-line interface: argument parsing and output rendering.

mod args;
mod output;

pub use args::{Args, SchemaVersion};
pub use output::{print_matrix, print_raw_fields, print_record, OutputFormat};

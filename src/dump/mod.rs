pub mod csv;
pub mod json;

pub use crate::error::DumpError;
pub use csv::dump_csv;
pub use json::dump_json;

/// Output format for printing a tree instead of opening the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    Json,
    Csv,
}

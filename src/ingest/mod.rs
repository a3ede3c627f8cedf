//! CSV ingestion: tokenizing an uploaded file into header + data rows

mod reader;
mod schema;

pub use reader::{parse_csv, ParseError, ParsedCsv};
pub use schema::{DetectedSchema, FieldSlot, SlotMapping};

//! Storage module: reading workbook bytes and CSV/JSON/Markdown export

mod export;
mod md;
mod source;

pub use export::{dataset_to_csv, dataset_to_json, write_dataset_csv};
pub use md::preview_to_markdown;
pub use source::{MAX_SHEET_FILE_BYTES, read_sheet_bytes};

use crate::error::Result;
use std::path::Path;
use tracing::debug;

pub const MAX_SHEET_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB

/// Read the raw bytes of a workbook file.
///
/// Files larger than [`MAX_SHEET_FILE_BYTES`] are refused before reading.
pub fn read_sheet_bytes(path: &Path) -> Result<Vec<u8>> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_SHEET_FILE_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SHEET_FILE_BYTES
            ),
        )
        .into());
    }
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read sheet file");
    Ok(bytes)
}

use std::path::Path;

use crate::errors::GraderError;

/// Reads a UTF-8 text file, tagging failures with the offending path.
pub fn read_text(path: &Path) -> Result<String, GraderError> {
    std::fs::read_to_string(path).map_err(|e| GraderError::io(path, e))
}

/// Fails with `MissingInput` when `path` does not exist.
pub fn require_exists(kind: &'static str, path: &Path) -> Result<(), GraderError> {
    if path.exists() {
        Ok(())
    } else {
        Err(GraderError::MissingInput {
            kind,
            path: path.to_path_buf(),
        })
    }
}

use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::GraderError;
use crate::grading::models::EssayEvaluation;

/// Writes the evaluations as pretty-printed UTF-8 JSON, replacing any existing file.
///
/// The file is written next to its destination and renamed into place, so a
/// reader never observes a half-written report.
pub fn write_report(path: &Path, evaluations: &[EssayEvaluation]) -> Result<(), GraderError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GraderError::report(path, e))?;
    serde_json::to_writer_pretty(&mut tmp, evaluations).map_err(|e| GraderError::report(path, e))?;
    tmp.write_all(b"\n")
        .and_then(|_| tmp.flush())
        .map_err(|e| GraderError::report(path, e))?;
    // Temp files are created owner-only; keep the report's existing mode instead.
    if let Some(permissions) = report_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GraderError::report(path, e))?;
    }
    tmp.persist(path)
        .map_err(|e| GraderError::report(path, e.error))?;

    Ok(())
}

/// Mode of the report being replaced, or 0644 for a new one.
fn report_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
pub fn read_report(path: &Path) -> Result<Vec<EssayEvaluation>, GraderError> {
    let raw = crate::grading::files::read_text(path)?;
    serde_json::from_str(&raw).map_err(|e| GraderError::report(path, e))
}

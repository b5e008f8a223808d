//! Essay discovery.
//!
//! Discovery and reading are separate steps so that a failed read only
//! affects the essay it belongs to.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::GraderError;
use crate::grading::files::{read_text, require_exists};
use crate::grading::models::Essay;

/// An essay file found on disk, not yet read.
#[derive(Debug, Clone, PartialEq)]
pub struct EssaySource {
    pub name: String,
    pub path: PathBuf,
}

impl EssaySource {
    pub fn read(&self) -> Result<Essay, GraderError> {
        Ok(Essay {
            name: self.name.clone(),
            text: read_text(&self.path)?,
        })
    }
}

/// Lists the essay files in `dir` whose extension matches `extension`
/// (ASCII case-insensitive), sorted by filename.
pub fn discover_essays(dir: &Path, extension: &str) -> Result<Vec<EssaySource>, GraderError> {
    require_exists("diretório de redações", dir)?;

    let entries = std::fs::read_dir(dir).map_err(|e| GraderError::io(dir, e))?;
    let mut sources = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| GraderError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Ignorando arquivo com nome não UTF-8: {}", path.display());
            continue;
        };
        sources.push(EssaySource {
            name: name.to_string(),
            path: path.clone(),
        });
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));

    if sources.is_empty() {
        warn!("Nenhuma redação encontrada em {}", dir.display());
    }

    Ok(sources)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

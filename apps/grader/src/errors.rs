use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline-level error type.
///
/// `NonNumericOutput` is the only variant the scorer's caller recovers from;
/// the aggregator isolates everything else per essay, and startup variants
/// abort the run before any report is written.
#[derive(Debug, Error)]
pub enum GraderError {
    #[error("{kind} não encontrado: {}", path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    #[error("Nome de prompt inválido '{0}': esperado <código>_<descrição>.txt")]
    InvalidPromptName(String),

    #[error("Falha ao ler {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rubrica inválida em {}: {source}", path.display())]
    RubricParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Saída não numérica do modelo: {0:?}")]
    NonNumericOutput(String),

    #[error("Erro do modelo: {0}")]
    Llm(#[from] LlmError),

    #[error("Falha ao gravar relatório em {}: {message}", path.display())]
    Report { path: PathBuf, message: String },
}

impl GraderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraderError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn report(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        GraderError::Report {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

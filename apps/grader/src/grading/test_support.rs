use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::GradingConfig;
use crate::llm_client::{ChatModel, LlmError};

type Reply = dyn Fn(&str, &str) -> Result<String, LlmError> + Send + Sync;

/// Deterministic `ChatModel` double that records every (system, user) pair it receives.
pub struct ScriptedModel {
    reply: Box<Reply>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn with(reply: impl Fn(&str, &str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        let text = text.to_string();
        Self::with(move |_, _| Ok(text.clone()))
    }

    pub fn failing() -> Self {
        Self::with(|_, _| Err(unauthorized()))
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn submit(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        (self.reply)(system, user)
    }
}

pub fn unauthorized() -> LlmError {
    LlmError::Api {
        status: 401,
        message: "invalid api key".to_string(),
    }
}

/// Lays out prompts/, redacoes/ and rubrica.json under `root` and returns a
/// config pointing at them. Prompt files are `c1_a.txt..c5_e.txt`; each
/// rubric code maps "0" to "Nota mínima".
pub fn fixture(root: &Path, essays: &[(&str, &str)]) -> GradingConfig {
    let prompts_dir = root.join("prompts");
    let essays_dir = root.join("redacoes");
    std::fs::create_dir_all(&prompts_dir).unwrap();
    std::fs::create_dir_all(&essays_dir).unwrap();

    let prompt_files: Vec<String> = ["c1_a.txt", "c2_b.txt", "c3_c.txt", "c4_d.txt", "c5_e.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for file in &prompt_files {
        std::fs::write(prompts_dir.join(file), format!("Instruções de {file}")).unwrap();
    }

    for (name, text) in essays {
        std::fs::write(essays_dir.join(name), text).unwrap();
    }

    let rubric_path = root.join("rubrica.json");
    std::fs::write(
        &rubric_path,
        r#"{
            "c1": {"0": "Nota mínima"},
            "c2": {"0": "Nota mínima"},
            "c3": {"0": "Nota mínima"},
            "c4": {"0": "Nota mínima"},
            "c5": {"0": "Nota mínima"}
        }"#,
    )
    .unwrap();

    GradingConfig {
        prompts_dir,
        prompt_files,
        essays_dir,
        essay_extension: "txt".to_string(),
        rubric_path,
        output_path: root.join("resultados.json"),
        fallback_score: 0.0,
    }
}

// Essay grading: input loading, per-criterion scoring, rubric lookup, report output.
// Model calls go through llm_client::ChatModel only.

pub mod essays;
pub mod files;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod rubric;
pub mod scorer;

#[cfg(test)]
pub mod test_support;

//! LLM Prompt Scenarios

pub mod language;
pub mod satire;

//! LLM Service Module
//!
//! Turns a word into a one-line satire via a chat-completion API, with
//! the local template generator standing in whenever the API is not
//! configured, fails, or returns something unusable.
//!
//! # Architecture
//! ```text
//! body ─► normalizer ─► scenarios::satire::build_prompts
//!                              │
//!                              ▼
//!                      CompletionClient ──(error)──► fallback
//!                              │
//!                              ▼
//!                 scenarios::satire::parse_reply ──(none)──► fallback
//! ```

mod client;
mod models;
mod scenarios;
mod service;

// Re-exports for external use
pub use client::{CompletionClient, EMPTY_PAYLOAD, OpenAIClient};
pub use models::*;
pub use scenarios::satire::{PromptPair, build_prompts, parse_reply};
pub use service::SatireService;

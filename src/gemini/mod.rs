//! Gemini `generateContent` client used to turn headlines into narration prose.

pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiError, Summarize};

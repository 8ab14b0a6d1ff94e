//! Quran Mood Agent
//!
//! A small relay service that:
//! - Accepts a user message over HTTP
//! - Classifies the user's mood with an LLM (Gemini)
//! - Maps the mood to a thematic category
//! - Retrieves a matching verse from the alquran.cloud API, or an offline verse
//! - Explains how the verse speaks to the mood
//!
//! PIPELINE:
//! VALIDATE → CLASSIFY → LOOKUP → RETRIEVE → COMPOSE → RESPOND

pub mod agent;
pub mod api;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod history;
pub mod mapping;
pub mod models;
pub mod verses;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use agent::{AgentRequest, MoodAgent};
pub use classifier::{Intent, MoodClassifier};

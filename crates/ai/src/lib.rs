//! Remote AI adapter.
//!
//! Wraps a hosted chat model (structured JSON answers) and a hosted image
//! model behind the [`RemoteGenerator`] trait. Every failure propagates as a
//! [`RemoteError`]; callers decide whether to fall back to local processing.

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompts;

pub use client::OpenAiClient;
pub use config::AiConfig;
pub use error::RemoteError;
pub use generator::{build_generator, OfflineGenerator, OpenAiGenerator, RemoteGenerator};

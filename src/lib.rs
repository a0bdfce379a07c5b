//! kbrag: a small knowledge-base question answering service
//!
//! Web pages are ingested into a JSON document store, retrieved by embedding
//! or term-frequency similarity, and answered with snippets that link back to
//! their sources.

pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod rag;
pub mod store;
pub mod text;

#[cfg(test)]
mod errors_tests;

pub use config::AppConfig;
pub use errors::*;
pub use rag::KnowledgeBase;

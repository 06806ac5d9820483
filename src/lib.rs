//! askdb - ask a MongoDB collection questions in plain English.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod store;

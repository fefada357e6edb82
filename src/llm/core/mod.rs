//! Core abstractions for the model gateway

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

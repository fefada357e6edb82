// HTTP server modules
pub mod handlers;
pub mod models;
pub mod routes;

// Conversation orchestration
pub mod conversation;

// Chat history store
pub mod store;

// Model gateway
pub mod llm;

// Client for the HTTP API
pub mod api_client;

// Process setup
pub mod config;
pub mod logging;

// src/services/mod.rs
pub mod chatbot;
pub mod metrics_manager;
pub mod random;
pub mod replies;
pub mod report_generator;
pub mod session_config;
pub mod session_manager;
pub mod templates;
pub mod topic;

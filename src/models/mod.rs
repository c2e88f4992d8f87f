// src/models/mod.rs

//! Domain models for the report bridge.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod history;
mod project;
mod report;
mod stage;
mod website;

// Re-export all public types
pub use config::{
    ApiConfig, Config, Credentials, ENV_BASE_URL, ENV_BIND, ENV_CONSUMER_KEY,
    ENV_CONSUMER_SECRET, LoggingConfig, ReportConfig, ReportZone, ServerConfig,
};
pub use history::{HISTORY_SLOTS, HistoryEntry, HistorySlot, select_history};
pub use project::{Project, clean_project_name, select_projects};
pub use report::ReportRow;
pub use stage::StageTable;
pub use website::WebsiteRecord;

//! Service layer for the report bridge.
//!
//! This module contains the business logic for:
//! - Remote API access (`BuzzClient`)
//! - Per-website row assembly (`RecordProcessor`)
//! - The shared request bound (`WorkerPool`)

mod buzzstream;
mod pool;
mod processor;

pub use buzzstream::BuzzClient;
pub use pool::WorkerPool;
pub use processor::{RecordOutcome, RecordProcessor, ReportQuery, SkipReason};

//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod wiremock_helpers;

use std::sync::Arc;

use buzzreport::models::{ApiConfig, Credentials, ReportZone, StageTable};
use buzzreport::pipeline::Reporter;
use buzzreport::services::{BuzzClient, RecordProcessor, ReportQuery, WorkerPool};
use buzzreport::utils::dates::DateWindow;
use chrono::{FixedOffset, NaiveDate};

pub const PROJECT_ID: &str = "321";
pub const DAY_MS: i64 = 86_400_000;

pub fn utc() -> ReportZone {
    ReportZone::Fixed(FixedOffset::east_opt(0).unwrap())
}

/// Epoch milliseconds of midnight UTC on the given date.
pub fn day(y: i32, m: u32, d: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

/// 2024-01-10 through 2024-01-20, whole days in UTC.
pub fn window() -> DateWindow {
    utc().day_window(day(2024, 1, 10), day(2024, 1, 20)).unwrap()
}

pub fn query() -> ReportQuery {
    ReportQuery {
        project_id: PROJECT_ID.to_string(),
        window: window(),
    }
}

pub fn api_config(base_url: &str, page_size: usize) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        page_size,
        max_concurrent: 4,
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        consumer_key: "test-key".to_string(),
        consumer_secret: "test-secret".to_string(),
    }
}

pub fn client(base_url: &str, page_size: usize) -> Arc<BuzzClient> {
    let config = api_config(base_url, page_size);
    let pool = WorkerPool::new(config.max_concurrent);
    Arc::new(BuzzClient::new(&config, credentials(), pool).unwrap())
}

pub fn processor(base_url: &str) -> RecordProcessor {
    RecordProcessor::new(
        client(base_url, 200),
        Arc::new(StageTable::default()),
        utc(),
    )
}

pub fn reporter(base_url: &str, page_size: usize) -> Reporter {
    Reporter::new(
        client(base_url, page_size),
        Arc::new(StageTable::default()),
        ["Phase 1", "Phase 3", "Phase 5", "Phase 8"]
            .into_iter()
            .map(String::from)
            .collect(),
        utc(),
    )
}

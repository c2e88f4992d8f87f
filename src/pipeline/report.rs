// src/pipeline/report.rs

//! Pagination driver: pages through a project's websites and builds rows.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Config, Project, ReportRow, ReportZone, StageTable};
use crate::pipeline::ReportBackend;
use crate::services::{BuzzClient, RecordOutcome, RecordProcessor, ReportQuery, WorkerPool};

/// Counters describing how complete a report is.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Non-empty listing pages read
    pub pages: usize,
    /// Website URLs listed across all pages
    pub listed: usize,
    /// Rows produced
    pub rows: usize,
    /// Records that produced no row
    pub skipped: usize,
    /// Rows built with at least one failed sub-fetch
    pub degraded: usize,
    /// Paging stopped early on a listing failure
    pub truncated: bool,
}

/// A finished report.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub websites: Vec<ReportRow>,
    pub stats: ReportStats,
}

/// Builds reports against the live API.
#[derive(Debug, Clone)]
pub struct Reporter {
    client: Arc<BuzzClient>,
    processor: RecordProcessor,
    phases: Vec<String>,
    zone: ReportZone,
}

impl Reporter {
    pub fn new(
        client: Arc<BuzzClient>,
        stages: Arc<StageTable>,
        phases: Vec<String>,
        zone: ReportZone,
    ) -> Self {
        let processor = RecordProcessor::new(Arc::clone(&client), stages, zone);
        Self {
            client,
            processor,
            phases,
            zone,
        }
    }

    /// Wire up the client, shared pool and stage table from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.require_credentials()?;
        let zone = config
            .report
            .zone()
            .ok_or_else(|| AppError::config("report.utc_offset_minutes is out of range"))?;
        let pool = WorkerPool::new(config.api.max_concurrent);
        let client = BuzzClient::new(&config.api, credentials, pool)?;
        let stages = StageTable::with_overrides(&config.stages);
        log::debug!("Loaded {} relationship stages", stages.len());

        Ok(Self::new(
            Arc::new(client),
            Arc::new(stages),
            config.report.phases.clone(),
            zone,
        ))
    }

    pub fn zone(&self) -> ReportZone {
        self.zone
    }

    /// Page through every website of `query` and collect their rows.
    ///
    /// A listing failure stops paging; rows gathered so far are returned
    /// and the report is marked truncated.
    pub async fn run(&self, query: &ReportQuery) -> Report {
        let concurrency = self.client.pool().size();
        let page_size = self.client.page_size();
        let mut report = Report::default();
        let mut offset = 0;

        loop {
            let urls = match self
                .client
                .website_page(&query.project_id, query.window, offset)
                .await
            {
                Ok(urls) => urls,
                Err(e) => {
                    log::error!("Error fetching websites at offset {offset}: {e}");
                    report.stats.truncated = true;
                    break;
                }
            };
            if urls.is_empty() {
                break;
            }

            report.stats.pages += 1;
            report.stats.listed += urls.len();
            log::info!(
                "Page {} (offset {}): {} websites",
                report.stats.pages,
                offset,
                urls.len()
            );

            // Stage 1: full records for every listed URL, in listing order.
            let records: Vec<Value> = stream::iter(urls)
                .map(|url| async move {
                    self.client
                        .website_details(&url, &query.project_id, query.window)
                        .await
                        .unwrap_or_else(|e| {
                            log::warn!("Error fetching website details for {url}: {e}");
                            Value::Null
                        })
                })
                .buffered(concurrency)
                .collect()
                .await;

            // Stage 2: one row per record.
            let outcomes: Vec<RecordOutcome> = stream::iter(records)
                .map(|record| async move { self.processor.process(&record, query).await })
                .buffered(concurrency)
                .collect()
                .await;

            for outcome in outcomes {
                match outcome {
                    RecordOutcome::Complete(row) => report.websites.push(row),
                    RecordOutcome::Degraded { row, failures } => {
                        log::debug!("Website {} degraded: {}", row.id, failures.join("; "));
                        report.stats.degraded += 1;
                        report.websites.push(row);
                    }
                    RecordOutcome::Skipped(reason) => {
                        log::debug!("Skipped record: {reason}");
                        report.stats.skipped += 1;
                    }
                }
            }

            offset += page_size;
        }

        report.stats.rows = report.websites.len();
        log::info!(
            "Report for project {}: {} rows, {} skipped, {} degraded{}",
            query.project_id,
            report.stats.rows,
            report.stats.skipped,
            report.stats.degraded,
            if report.stats.truncated { " (truncated)" } else { "" }
        );
        report
    }
}

#[async_trait]
impl ReportBackend for Reporter {
    async fn projects(&self) -> Result<Vec<Project>> {
        self.client.projects(&self.phases).await
    }

    async fn report(&self, query: &ReportQuery) -> Result<Report> {
        Ok(self.run(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;

    #[test]
    fn test_from_config_requires_credentials() {
        let config = Config::default();
        assert!(matches!(
            Reporter::from_config(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_with_credentials() {
        let config = Config {
            credentials: Some(Credentials {
                consumer_key: "k".into(),
                consumer_secret: "s".into(),
            }),
            ..Config::default()
        };
        let reporter = Reporter::from_config(&config).unwrap();
        assert_eq!(reporter.zone(), ReportZone::Local);
        assert_eq!(reporter.client.pool().size(), 30);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let value = serde_json::to_value(ReportStats {
            truncated: true,
            ..ReportStats::default()
        })
        .unwrap();
        assert_eq!(value["truncated"], true);
        assert_eq!(value["degraded"], 0);
    }
}

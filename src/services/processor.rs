// src/services/processor.rs

//! Turns one website record into one flat report row.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::models::{ReportRow, ReportZone, StageTable, WebsiteRecord, select_history};
use crate::services::BuzzClient;
use crate::utils::dates::DateWindow;
use crate::utils::{lookup, text};

/// Which project and date window a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub project_id: String,
    pub window: DateWindow,
}

/// Why a record produced no row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The input was not a JSON object
    NotARecord,
    /// The record carried no id
    MissingId,
    /// The detail fetch failed or returned nothing
    DetailsUnavailable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotARecord => write!(f, "input is not a website record"),
            SkipReason::MissingId => write!(f, "website record has no id"),
            SkipReason::DetailsUnavailable(why) => write!(f, "website details unavailable: {why}"),
        }
    }
}

/// Result of processing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Every fetch succeeded
    Complete(ReportRow),
    /// A row was built but some parts fell back to empty values
    Degraded {
        row: ReportRow,
        failures: Vec<String>,
    },
    /// No row for this record
    Skipped(SkipReason),
}

impl RecordOutcome {
    pub fn into_row(self) -> Option<ReportRow> {
        match self {
            RecordOutcome::Complete(row) | RecordOutcome::Degraded { row, .. } => Some(row),
            RecordOutcome::Skipped(_) => None,
        }
    }
}

/// Merges detail, link, chronicle, rating and history fetches per website.
#[derive(Debug, Clone)]
pub struct RecordProcessor {
    client: Arc<BuzzClient>,
    stages: Arc<StageTable>,
    zone: ReportZone,
}

impl RecordProcessor {
    pub fn new(client: Arc<BuzzClient>, stages: Arc<StageTable>, zone: ReportZone) -> Self {
        Self {
            client,
            stages,
            zone,
        }
    }

    /// Process one website record for `query`.
    pub async fn process(&self, website: &Value, query: &ReportQuery) -> RecordOutcome {
        let Some(site) = WebsiteRecord::new(website) else {
            log::warn!("Invalid website record received: {website}");
            return RecordOutcome::Skipped(SkipReason::NotARecord);
        };
        let Some(website_id) = site.id() else {
            log::warn!("Website record has no id, skipping");
            return RecordOutcome::Skipped(SkipReason::MissingId);
        };

        let project_id = query.project_id.as_str();
        let detail_url = site.detail_url();
        let (details, links) = futures::join!(
            self.client
                .website_details(&detail_url, project_id, query.window),
            self.client.links(&website_id, project_id),
        );

        let details = match details {
            Ok(details) if details.as_object().is_some_and(|o| !o.is_empty()) => details,
            Ok(_) => {
                log::warn!("Website {website_id}: empty details, skipping");
                return RecordOutcome::Skipped(SkipReason::DetailsUnavailable(
                    "empty response".to_string(),
                ));
            }
            Err(e) => {
                log::warn!("Website {website_id}: could not fetch details: {e}");
                return RecordOutcome::Skipped(SkipReason::DetailsUnavailable(e.to_string()));
            }
        };
        let detail_view = WebsiteRecord::new(&details);

        let mut failures = Vec::new();
        let mut degrade = |what: &str, e: crate::error::AppError| {
            log::warn!("Website {website_id}: error fetching {what}: {e}");
            failures.push(format!("{what}: {e}"));
        };

        let links = links.unwrap_or_else(|e| {
            degrade("links", e);
            None
        });

        let chronicle_url = detail_view.map(|d| d.chronicle_url()).unwrap_or_default();
        let chronicle = self
            .client
            .chronicle(&chronicle_url)
            .await
            .unwrap_or_else(|e| {
                degrade("chronicle", e);
                String::new()
            });

        let contact_id = site.contact_id();
        let domain_rating = self
            .client
            .domain_rating(&contact_id)
            .await
            .unwrap_or_else(|e| {
                degrade("domain rating", e);
                String::new()
            });

        let history = self
            .client
            .history(&website_id, project_id)
            .await
            .unwrap_or_else(|e| {
                degrade("history", e);
                Vec::new()
            });

        let parts = RowParts {
            site,
            details: &details,
            links: links.as_ref(),
            chronicle,
            domain_rating,
        };
        let mut row = self.build_row(website_id, parts);
        row.set_history(select_history(&history, query.window, self.zone));

        if failures.is_empty() {
            RecordOutcome::Complete(row)
        } else {
            RecordOutcome::Degraded { row, failures }
        }
    }

    fn build_row(&self, website_id: String, parts: RowParts<'_>) -> ReportRow {
        let RowParts {
            site,
            details,
            links,
            chronicle,
            domain_rating,
        } = parts;

        let null = Value::Null;
        let date = |value: Option<&Value>| self.zone.format_date(value.unwrap_or(&null));
        let link = |key: &str| text(links.and_then(|l| l.get(key)));

        let project_name = site.project_name();
        let added_date = date(lookup(details, &["stateForProject", "createdDate"]));
        let stage = self.stages.stage_of(details);

        ReportRow {
            id: website_id,
            name: site.field("name"),
            primary_domain: site.field("primaryDomain"),
            associated_people_id: site.associated_people_id(),
            chronicle: chronicle.clone(),
            project_name: project_name.clone(),
            project_added_date: added_date.clone(),
            relationship_stage: stage.clone(),
            domain_rating: domain_rating.clone(),
            sendout_type: site.field_value(".Sendout Type"),
            active_projects: site.field_value("Active Projects"),
            aging_status: site.field_value("Aging Status"),
            contact_hunter: site.field_value("Contact Hunter"),
            lead_source: site.field_value("Lead Source (NEW)"),
            link_dev: site.field_value("LinkDev"),
            sequence_stage: site.field_value("Sequence Stage"),
            template: site.field_value("Template"),
            wm_decline_reason: site.field_value("WM Decline Reason"),
            wm_feedback: site.field_value("WM Feedback (WM Decline)"),
            link_id: link("id"),
            linking_from: link("linkingFrom"),
            linking_from_tld: link("linkingFromTLD"),
            link_created_date: date(links.and_then(|l| l.get("createdDate"))),
            last_communication_date: date(details.get("lastCommunicationDate")),
            website_note: chronicle,
            website_project: project_name,
            website_date_added_to_project: added_date,
            website_relationship_stage: stage,
            ahrefs_domain_rating: domain_rating,
            ..ReportRow::default()
        }
    }
}

/// Fetched pieces that feed one row.
struct RowParts<'a> {
    site: WebsiteRecord<'a>,
    details: &'a Value,
    links: Option<&'a Value>,
    chronicle: String,
    domain_rating: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{ApiConfig, Credentials};
    use crate::services::WorkerPool;

    fn offline_processor() -> RecordProcessor {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..ApiConfig::default()
        };
        let creds = Credentials {
            consumer_key: "k".into(),
            consumer_secret: "s".into(),
        };
        let client = BuzzClient::new(&config, creds, WorkerPool::new(2)).unwrap();
        RecordProcessor::new(
            Arc::new(client),
            Arc::new(StageTable::default()),
            ReportZone::Local,
        )
    }

    fn query() -> ReportQuery {
        ReportQuery {
            project_id: "1".into(),
            window: DateWindow {
                start_ms: 0,
                end_ms: 1,
            },
        }
    }

    #[tokio::test]
    async fn test_non_record_is_skipped() {
        let processor = offline_processor();
        for input in [json!(null), json!("https://x/1"), json!([{"id": 1}])] {
            assert_eq!(
                processor.process(&input, &query()).await,
                RecordOutcome::Skipped(SkipReason::NotARecord)
            );
        }
    }

    #[tokio::test]
    async fn test_record_without_id_is_skipped() {
        let processor = offline_processor();
        let outcome = processor.process(&json!({"name": "x"}), &query()).await;
        assert_eq!(outcome, RecordOutcome::Skipped(SkipReason::MissingId));
        assert!(outcome.into_row().is_none());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::DetailsUnavailable("HTTP 404".into()).to_string(),
            "website details unavailable: HTTP 404"
        );
    }
}

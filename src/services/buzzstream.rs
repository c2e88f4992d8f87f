// src/services/buzzstream.rs

//! BuzzStream REST accessors.
//!
//! One method per remote resource. Each returns an explicit `Result` so that
//! callers can tell a confirmed empty answer from a failed fetch; absent
//! fields inside a successful response still degrade to empty values.

use std::collections::HashSet;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials, HistoryEntry, Project, select_projects};
use crate::services::WorkerPool;
use crate::utils::auth::authorization_header;
use crate::utils::dates::DateWindow;
use crate::utils::http::create_client;
use crate::utils::{lookup, text};

/// Client for the BuzzStream API.
#[derive(Debug, Clone)]
pub struct BuzzClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    pool: WorkerPool,
    page_size: usize,
    history_page_size: usize,
    project_max_results: usize,
}

impl BuzzClient {
    /// Create a client from API settings, a key pair and the shared pool.
    pub fn new(config: &ApiConfig, credentials: Credentials, pool: WorkerPool) -> Result<Self> {
        Ok(Self {
            http: create_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            pool,
            page_size: config.page_size.max(1),
            history_page_size: config.history_page_size.max(1),
            project_max_results: config.project_max_results,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issue one authorized GET and decode the JSON body.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.pool
            .run(async {
                let response = self
                    .http
                    .get(url)
                    .query(query)
                    .header(AUTHORIZATION, authorization_header(&self.credentials))
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::Status {
                        url: response.url().to_string(),
                        status,
                    });
                }
                Ok(response.json::<Value>().await?)
            })
            .await
    }

    /// Active projects carrying one of `phases`, in phase order.
    pub async fn projects(&self, phases: &[String]) -> Result<Vec<Project>> {
        let body = self
            .get_json(
                &self.endpoint("projects"),
                &[
                    ("active", "true".to_string()),
                    ("expand", "true".to_string()),
                    ("max_results", self.project_max_results.to_string()),
                ],
            )
            .await?;

        let raw = list_of(&body);
        let projects = select_projects(&raw, phases);
        log::debug!("Listed {} projects, kept {}", raw.len(), projects.len());
        Ok(projects)
    }

    /// One page of website detail URLs for a project and window.
    pub async fn website_page(
        &self,
        project_id: &str,
        window: DateWindow,
        offset: usize,
    ) -> Result<Vec<String>> {
        let body = self
            .get_json(
                &self.endpoint("websites"),
                &[
                    ("project", project_id.to_string()),
                    ("project_state_added_after", window.start_ms.to_string()),
                    ("project_state_added_before", window.end_ms.to_string()),
                    ("max_results", self.page_size.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        Ok(list_of(&body)
            .iter()
            .filter_map(|entry| match entry {
                Value::String(url) => Some(url.clone()),
                Value::Object(_) => {
                    let url = text(entry.get("uri"));
                    Some(if url.is_empty() { text(entry.get("url")) } else { url })
                }
                _ => None,
            })
            .filter(|url| !url.is_empty())
            .collect())
    }

    /// Full website record with its state for `project_id`.
    pub async fn website_details(
        &self,
        website_url: &str,
        project_id: &str,
        window: DateWindow,
    ) -> Result<Value> {
        if website_url.is_empty() {
            return Err(AppError::fetch("website details", "no website URL provided"));
        }

        self.get_json(
            website_url,
            &[
                ("project_state_added_after", window.start_ms.to_string()),
                ("project_state_added_before", window.end_ms.to_string()),
                ("expand", "true".to_string()),
                ("show_project_state", project_id.to_string()),
            ],
        )
        .await
    }

    /// First link recorded for a website in a project.
    pub async fn links(&self, website_id: &str, project_id: &str) -> Result<Option<Value>> {
        let body = self
            .get_json(
                &self.endpoint("links"),
                &[
                    ("website", website_id.to_string()),
                    ("expand", "true".to_string()),
                    ("project", project_id.to_string()),
                ],
            )
            .await?;

        Ok(list_of(&body).into_iter().next())
    }

    /// Body of a chronicle note. An empty URL means there is no note.
    pub async fn chronicle(&self, chronicle_url: &str) -> Result<String> {
        if chronicle_url.is_empty() {
            return Ok(String::new());
        }
        let body = self.get_json(chronicle_url, &[]).await?;
        Ok(text(body.get("body")))
    }

    /// Domain rating metric for a contact. An empty id means no contact.
    pub async fn domain_rating(&self, contact_id: &str) -> Result<String> {
        if contact_id.is_empty() {
            return Ok(String::new());
        }
        let body = self
            .get_json(
                &self.endpoint("metrics/contact"),
                &[("id", contact_id.to_string())],
            )
            .await?;

        Ok(text(lookup(&body, &[contact_id, "domain-rating", "value"])))
    }

    /// All email history for a website in a project, following pages until a
    /// short page or a page with no unseen entry ids.
    pub async fn history(&self, website_id: &str, project_id: &str) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut offset = 0;

        loop {
            let body = self
                .get_json(
                    &self.endpoint("history"),
                    &[
                        ("contact", website_id.to_string()),
                        ("expand", "true".to_string()),
                        ("type", "email".to_string()),
                        ("project", project_id.to_string()),
                        ("max_results", self.history_page_size.to_string()),
                        ("offset", offset.to_string()),
                    ],
                )
                .await?;

            let page: Vec<HistoryEntry> = list_of(&body).iter().map(HistoryEntry::from_remote).collect();
            let page_len = page.len();
            let fresh = page.iter().filter(|e| seen.insert(e.id.clone())).count();
            if page_len > 0 && fresh == 0 {
                log::warn!(
                    "History for website {website_id} repeated at offset {offset}, stopping"
                );
                break;
            }
            entries.extend(page);

            if page_len < self.history_page_size {
                break;
            }
            offset += self.history_page_size;
        }

        Ok(entries)
    }
}

/// The `list` array of a listing response, or nothing.
fn list_of(body: &Value) -> Vec<Value> {
    body.get("list")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

//! Outreach projects and their display names.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::text;

fn phase_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)Phase \d+").expect("static phase pattern"))
}

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)([A-Za-z0-9-]+\.(?:com|co\.uk|net|org))").expect("static domain pattern")
    })
}

/// A project as listed to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub original_name: String,
    pub cleaned_name: String,
    pub id: String,
}

impl Project {
    /// Build from a raw `/projects` list entry; `None` when `id` or `name`
    /// is missing.
    pub fn from_remote(raw: &Value) -> Option<Self> {
        let name = raw.get("name").and_then(Value::as_str)?;
        let id = text(raw.get("id"));
        if name.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self {
            original_name: name.to_string(),
            cleaned_name: clean_project_name(name),
            id,
        })
    }

    /// Position of the first allow-listed phase prefix this project carries.
    pub fn phase_rank(&self, phases: &[String]) -> Option<usize> {
        phases
            .iter()
            .position(|phase| self.original_name.starts_with(phase.as_str()))
    }
}

/// Reduce a raw project name to `"<Phase n> - <domain>"`.
///
/// Names without both a phase token and a domain token are returned unchanged.
pub fn clean_project_name(name: &str) -> String {
    let phase = phase_pattern().find(name);
    let domain = domain_pattern().captures(name).and_then(|c| c.get(1));

    match (phase, domain) {
        (Some(phase), Some(domain)) => format!("{} - {}", phase.as_str(), domain.as_str()),
        _ => name.to_string(),
    }
}

/// Keep allow-listed projects and order them by allow-list position.
///
/// The sort is stable, so projects of the same phase keep remote order.
pub fn select_projects(raw: &[Value], phases: &[String]) -> Vec<Project> {
    let mut ranked: Vec<(usize, Project)> = raw
        .iter()
        .filter_map(|entry| {
            let Some(project) = Project::from_remote(entry) else {
                log::debug!("Skipping project without id or name: {entry}");
                return None;
            };
            project.phase_rank(phases).map(|rank| (rank, project))
        })
        .collect();

    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, project)| project).collect()
}

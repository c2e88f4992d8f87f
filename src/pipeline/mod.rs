//! Pipeline entry points for report operations.
//!
//! - `Reporter`: lists projects and builds paginated website reports
//! - `ReportBackend`: the seam the web layer talks to

pub mod report;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Project;
use crate::services::ReportQuery;

pub use report::{Report, ReportStats, Reporter};

/// Source of projects and reports for the web layer.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Allow-listed projects in phase order.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// All rows for a project and date window.
    async fn report(&self, query: &ReportQuery) -> Result<Report>;
}

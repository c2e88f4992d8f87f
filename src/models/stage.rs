//! Relationship stage labels.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::utils::lookup;

/// Built-in stage id to label table.
const DEFAULT_STAGES: &[(&str, &str)] = &[
    ("42990175", "Attempting To Reach"),
    ("42990176", "Replied"),
    ("42990179", "Successful Placement"),
    ("182219643", "Unsuccessful - No Reply"),
    ("243133324", "Manual Sendouts - 1st email"),
    ("243133325", "Manual Sendouts - 2nd email"),
    ("243133326", "Manual Sendouts - 3rd email"),
    ("43017713", "Client Link Sent"),
    ("62427773", "Client Link Sent - 1st Follow-Up"),
    ("62427774", "Client Link Sent - 2nd Follow-Up"),
    ("62427775", "Client Link Sent - 3rd Follow-Up"),
    ("78207176", "Client link sent - 4th follow-up"),
    ("43017709", "Contact Form Attempt"),
    ("43017710", "Contact Form Attempt (2nd)"),
    ("43017711", "Contact Form Attempt (3rd)"),
    ("74855452", "Contact Form Attempt (4th)"),
    ("43703894", "Existing Link - Do Not Outreach"),
    ("75356660", "Forwarded"),
    ("42990174", "Lead Approved"),
    ("42990178", "Lead Inactive"),
    ("43158513", "Lost (Email Blocked / Do Not Contact)"),
    ("43017715", "Lost (EMail Bounced)"),
    ("46305485", "Lost (No Response)"),
    ("43017716", "Lost (WM Declined)"),
    ("43018748", "Manual Follow-Up"),
    ("43018749", "Manual Follow-Up (2nd)"),
    ("110283369", "Manual Follow-Up (3rd)"),
    ("110283370", "Manual Follow-Up (4th)"),
    ("69037241", "Nego Zombie (15+ days)"),
    ("67336029", "Nego Zombie (31+ days)"),
    ("69037242", "Nego Zombie (60+ days)"),
    ("88539391", "Not Sent (Possible Issues)"),
    ("42990173", "Not Started"),
    ("43018746", "Opened"),
    ("43017714", "Out of Office"),
    ("88297641", "Positive Reply Received"),
    ("43537578", "Recycled - Not Started"),
    ("52881604", "Rejected by Approver"),
    ("62380086", "Rejected by Contact Hunter"),
    ("42990177", "Rejected by LinkDev"),
    ("60711551", "Sending Failed - See Error(s)"),
    ("82148650", "WM Promised to Publish Link/Article"),
    ("89961311", "--- # PHASE 5 ONLY # ---"),
    ("62610487", "Client Link Sent (Content)"),
    ("62610489", "Client Sent - Follow-Up (Max Price Offer)"),
    ("62610488", "Client Sent - Follow-Up (Price Increased)"),
    ("62610492", "Manual Follow-Up (Max Price Offer)"),
    ("62610491", "Manual Follow-Up (Price Increased)"),
    ("43017712", "Negotiating"),
    ("53135910", "Pending Approval"),
    ("62610490", "Topic Sent - Follow-up"),
    ("62610486", "Topics Sent"),
    ("90480418", "--- # OTHERS # ---"),
    ("43017707", "Attempting To Reach (2nd)"),
    ("43017708", "Attempting To Reach (3rd)"),
    ("74567975", "Attempting to Reach (4th)"),
    ("43018747", "Client Link Clicked"),
    ("44736674", "Client Webmail 1st Attempt"),
    ("44736675", "Client Webmail 2nd Attempt"),
    ("44736676", "Client Webmail 3rd Attempt"),
    ("45365975", "Delayed"),
    ("59250074", "Draft Forwarded to Client Inbox"),
    ("101549404", "Future-dated Lead"),
    ("44654869", "Live Link (Won)"),
    ("58386717", "Not Started - 2nd Priority"),
    ("58386716", "Not Started - High Priority"),
    ("43302550", "Pending (Export / Sendouts)"),
    ("45364088", "Personalizing"),
    ("43537589", "Quick Win (New)"),
    ("46477768", "Re-assessment Needed"),
    ("108180157", "STOPLIST (Client)"),
    ("171075184", "Dropped / Deactivated"),
    ("182219641", "Scheduled"),
    ("182219642", "Paused"),
    ("182219644", "Bounce"),
    ("182219645", "Send Failure"),
];

fn stage_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/(\d+)$").expect("static stage pattern"))
}

/// Immutable stage id to label lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct StageTable {
    labels: HashMap<String, String>,
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            labels: DEFAULT_STAGES
                .iter()
                .map(|(id, label)| (id.to_string(), label.to_string()))
                .collect(),
        }
    }
}

impl StageTable {
    /// Built-in labels with `overrides` layered on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        table
            .labels
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a raw stage id.
    pub fn label(&self, stage_id: &str) -> Option<&str> {
        self.labels.get(stage_id).map(String::as_str)
    }

    /// Label for the `stateForProject.relationshipStage` URL of a website
    /// detail record, or an empty string.
    pub fn stage_of(&self, website: &Value) -> String {
        lookup(website, &["stateForProject", "relationshipStage"])
            .and_then(Value::as_str)
            .and_then(|url| stage_id_pattern().captures(url))
            .and_then(|caps| caps.get(1))
            .and_then(|id| self.label(id.as_str()))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

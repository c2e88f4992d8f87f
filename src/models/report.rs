//! Flat report rows served to the browser.

use serde::{Deserialize, Serialize};

use super::history::{HISTORY_SLOTS, HistorySlot};

/// One flattened website row.
///
/// Every field is text; absent source data renders as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: String,
    pub name: String,
    pub primary_domain: String,
    pub associated_people_id: String,
    pub chronicle: String,
    pub project_name: String,
    pub project_added_date: String,
    pub relationship_stage: String,
    pub domain_rating: String,
    pub sendout_type: String,
    pub active_projects: String,
    pub aging_status: String,
    pub contact_hunter: String,
    pub lead_source: String,
    pub link_dev: String,
    pub sequence_stage: String,
    pub template: String,
    pub wm_decline_reason: String,
    pub wm_feedback: String,
    pub link_id: String,
    pub linking_from: String,
    #[serde(rename = "linkingFromTLD")]
    pub linking_from_tld: String,
    pub link_created_date: String,
    pub last_communication_date: String,

    pub chronicle_date_1st: String,
    pub email_direction_1st: String,
    #[serde(rename = "hisID1st")]
    pub his_id_1st: String,
    pub chronicle_date_2nd: String,
    pub email_direction_2nd: String,
    #[serde(rename = "hisID2nd")]
    pub his_id_2nd: String,
    pub chronicle_date_3rd: String,
    pub email_direction_3rd: String,
    #[serde(rename = "hisID3rd")]
    pub his_id_3rd: String,
    pub chronicle_date_4th: String,
    pub email_direction_4th: String,
    #[serde(rename = "hisID4th")]
    pub his_id_4th: String,

    pub website_note: String,
    pub website_project: String,
    pub website_date_added_to_project: String,
    pub website_relationship_stage: String,
    pub ahrefs_domain_rating: String,
}

impl ReportRow {
    /// Spread the history slots into the ordinal-suffixed columns.
    pub fn set_history(&mut self, slots: [HistorySlot; HISTORY_SLOTS]) {
        let [first, second, third, fourth] = slots;

        self.chronicle_date_1st = first.date;
        self.email_direction_1st = first.direction;
        self.his_id_1st = first.his_id;

        self.chronicle_date_2nd = second.date;
        self.email_direction_2nd = second.direction;
        self.his_id_2nd = second.his_id;

        self.chronicle_date_3rd = third.date;
        self.email_direction_3rd = third.direction;
        self.his_id_3rd = third.his_id;

        self.chronicle_date_4th = fourth.date;
        self.email_direction_4th = fourth.direction;
        self.his_id_4th = fourth.his_id;
    }

    /// The four history slots, oldest first.
    #[cfg(test)]
    pub fn history(&self) -> [HistorySlot; HISTORY_SLOTS] {
        let slot = |date: &str, direction: &str, his_id: &str| HistorySlot {
            date: date.to_string(),
            direction: direction.to_string(),
            his_id: his_id.to_string(),
        };
        [
            slot(&self.chronicle_date_1st, &self.email_direction_1st, &self.his_id_1st),
            slot(&self.chronicle_date_2nd, &self.email_direction_2nd, &self.his_id_2nd),
            slot(&self.chronicle_date_3rd, &self.email_direction_3rd, &self.his_id_3rd),
            slot(&self.chronicle_date_4th, &self.email_direction_4th, &self.his_id_4th),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        let value = serde_json::to_value(ReportRow::default()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "primaryDomain",
            "linkingFromTLD",
            "chronicleDate1st",
            "emailDirection2nd",
            "hisID3rd",
            "hisID4th",
            "websiteDateAddedToProject",
            "ahrefsDomainRating",
        ] {
            assert!(object.contains_key(key), "missing column {key}");
        }
        assert_eq!(object.len(), 41);
    }

    #[test]
    fn test_set_history_round_trips_slots() {
        let mut row = ReportRow::default();
        let mut slots: [HistorySlot; HISTORY_SLOTS] = Default::default();
        slots[0] = HistorySlot {
            date: "01-02-2024".into(),
            direction: "OUTGOING".into(),
            his_id: "h1".into(),
        };
        row.set_history(slots.clone());

        assert_eq!(row.chronicle_date_1st, "01-02-2024");
        assert_eq!(row.his_id_1st, "h1");
        assert_eq!(row.his_id_2nd, "");
        assert_eq!(row.history(), slots);
    }
}

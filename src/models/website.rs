//! Read-only views over remote website records.

use serde_json::Value;

use crate::utils::{last_segment, lookup, text};

/// A website entity as returned by the remote API.
///
/// The payload is kept as raw JSON; every accessor tolerates missing or
/// mistyped fields and falls back to an empty value.
#[derive(Debug, Clone, Copy)]
pub struct WebsiteRecord<'a> {
    raw: &'a Value,
}

impl<'a> WebsiteRecord<'a> {
    /// Wrap a value; `None` unless it is a JSON object.
    pub fn new(raw: &'a Value) -> Option<Self> {
        raw.is_object().then_some(Self { raw })
    }

    /// Website id, `None` when absent or empty.
    pub fn id(&self) -> Option<String> {
        let id = text(self.raw.get("id"));
        (!id.is_empty()).then_some(id)
    }

    /// URL of the full detail resource (`uri`, then `url`).
    pub fn detail_url(&self) -> String {
        ["uri", "url"]
            .iter()
            .map(|key| text(self.raw.get(*key)))
            .find(|url| !url.is_empty())
            .unwrap_or_default()
    }

    pub fn field(&self, key: &str) -> String {
        text(self.raw.get(key))
    }

    /// Value at a nested path under `stateForProject`.
    pub fn project_state(&self, path: &[&str]) -> Option<&'a Value> {
        lookup(self.raw.get("stateForProject")?, path)
    }

    /// Custom field value from `stateForProject.fieldValues`.
    pub fn field_value(&self, name: &str) -> String {
        text(self.project_state(&["fieldValues", name]))
    }

    pub fn project_name(&self) -> String {
        text(self.project_state(&["project", "name"]))
    }

    /// Contact id: last path segment of `stateForProject.contact`.
    pub fn contact_id(&self) -> String {
        let contact = text(self.project_state(&["contact"]));
        last_segment(&contact).to_string()
    }

    /// Id of the first associated person.
    pub fn associated_people_id(&self) -> String {
        self.raw
            .get("associatedPeople")
            .and_then(Value::as_array)
            .and_then(|people| people.first())
            .map(|person| text(person.get("id")))
            .unwrap_or_default()
    }

    /// URL of the most recent non-communication chronicle (detail records).
    pub fn chronicle_url(&self) -> String {
        self.field("mostRecentNonCommunicationChronicle")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "id": 1001,
            "name": "Example",
            "uri": "https://api.buzzstream.com/v1/websites/1001",
            "associatedPeople": [{"id": 77}, {"id": 78}],
            "stateForProject": {
                "project": {"name": "Phase 1 - example.com"},
                "contact": "https://api.buzzstream.com/v1/people/555",
                "fieldValues": {".Sendout Type": "Manual", "Active Projects": 3}
            }
        })
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(WebsiteRecord::new(&json!("https://x")).is_none());
        assert!(WebsiteRecord::new(&json!([1])).is_none());
        assert!(WebsiteRecord::new(&Value::Null).is_none());
    }

    #[test]
    fn test_accessors() {
        let raw = sample();
        let site = WebsiteRecord::new(&raw).unwrap();
        assert_eq!(site.id().as_deref(), Some("1001"));
        assert_eq!(site.detail_url(), "https://api.buzzstream.com/v1/websites/1001");
        assert_eq!(site.project_name(), "Phase 1 - example.com");
        assert_eq!(site.contact_id(), "555");
        assert_eq!(site.associated_people_id(), "77");
        assert_eq!(site.field_value(".Sendout Type"), "Manual");
        assert_eq!(site.field_value("Active Projects"), "3");
        assert_eq!(site.field_value("Template"), "");
    }

    #[test]
    fn test_missing_nested_fields_are_empty() {
        let raw = json!({"id": "", "url": "https://x/1", "associatedPeople": "nobody"});
        let site = WebsiteRecord::new(&raw).unwrap();
        assert_eq!(site.id(), None);
        assert_eq!(site.detail_url(), "https://x/1");
        assert_eq!(site.contact_id(), "");
        assert_eq!(site.associated_people_id(), "");
        assert_eq!(site.project_name(), "");
        assert_eq!(site.chronicle_url(), "");
    }
}

use serde_json::{Value, json};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{DAY_MS, PROJECT_ID, day};

/// A website detail record as the API returns it.
pub fn website_record(server: &MockServer, id: u64) -> Value {
    let uri = server.uri();
    json!({
        "id": id,
        "name": format!("Site {id}"),
        "primaryDomain": format!("site{id}.com"),
        "uri": format!("{uri}/websites/{id}"),
        "associatedPeople": [{"id": id * 10}],
        "mostRecentNonCommunicationChronicle": format!("{uri}/chronicles/{id}"),
        "lastCommunicationDate": day(2024, 1, 18) + 3_600_000,
        "stateForProject": {
            "project": {"name": "Phase 1 - example.com"},
            "contact": format!("{uri}/people/{}", id + 5000),
            "relationshipStage": format!("{uri}/relationshipStages/42990176"),
            "createdDate": day(2024, 1, 12),
            "fieldValues": {
                ".Sendout Type": "Manual",
                "Lead Source (NEW)": "Prospecting",
                "Active Projects": 2
            }
        }
    })
}

/// Six history entries, two of them outside the 2024-01-10..20 window.
pub fn history_entries() -> Value {
    let base = day(2024, 1, 10);
    json!({"list": [
        {"chronicleDate": base + 6 * DAY_MS, "emailDirection": "OUTGOING", "id": "h-c"},
        {"chronicleDate": base - DAY_MS, "emailDirection": "OUTGOING", "id": "h-early"},
        {"chronicleDate": base + DAY_MS, "emailDirection": "OUTGOING", "id": "h-a"},
        {"chronicleDate": base + 20 * DAY_MS, "emailDirection": "INCOMING", "id": "h-late"},
        {"chronicleDate": base + 3 * DAY_MS, "emailDirection": "INCOMING", "id": "h-b"},
        {"chronicleDate": base + 8 * DAY_MS, "emailDirection": "INCOMING", "id": "h-d"}
    ]})
}

fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Mount every per-website resource for `id`.
pub async fn mount_website(server: &MockServer, id: u64, with_link: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/websites/{id}")))
        .and(query_param("show_project_state", PROJECT_ID))
        .and(header_exists("Authorization"))
        .respond_with(ok_json(website_record(server, id)))
        .mount(server)
        .await;

    let links = if with_link {
        json!({"list": [
            {
                "id": format!("link-{id}"),
                "linkingFrom": format!("https://site{id}.com/post"),
                "linkingFromTLD": format!("site{id}.com"),
                "createdDate": day(2024, 1, 15)
            },
            {"id": "link-ignored"}
        ]})
    } else {
        json!({"list": []})
    };
    mount_links(server, id, ResponseTemplate::new(200).set_body_json(links)).await;

    Mock::given(method("GET"))
        .and(path(format!("/chronicles/{id}")))
        .respond_with(ok_json(json!({"body": format!("Note for {id}")})))
        .mount(server)
        .await;

    let contact = (id + 5000).to_string();
    let mut metrics = serde_json::Map::new();
    metrics.insert(contact.clone(), json!({"domain-rating": {"value": 54}}));
    Mock::given(method("GET"))
        .and(path("/metrics/contact"))
        .and(query_param("id", contact.as_str()))
        .respond_with(ok_json(Value::Object(metrics)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("contact", id.to_string().as_str()))
        .and(query_param("type", "email"))
        .respond_with(ok_json(history_entries()))
        .mount(server)
        .await;
}

pub async fn mount_links(server: &MockServer, id: u64, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/links"))
        .and(query_param("website", id.to_string().as_str()))
        .and(query_param("project", PROJECT_ID))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount one listing page at `offset`.
pub async fn mount_listing_page(server: &MockServer, offset: usize, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/websites"))
        .and(query_param("project", PROJECT_ID))
        .and(query_param("offset", offset.to_string().as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Listing body with detail URLs for `ids`.
pub fn listing(server: &MockServer, ids: &[u64]) -> ResponseTemplate {
    let urls: Vec<String> = ids
        .iter()
        .map(|id| format!("{}/websites/{id}", server.uri()))
        .collect();
    ok_json(json!({"list": urls}))
}

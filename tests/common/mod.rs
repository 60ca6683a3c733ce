//! Common test utilities and infrastructure
//!
//! Mock collection API server and helpers for building the real HTTP
//! stack against it.

use artline::config::ApiSettings;
use artline::{HttpTransport, Resolver, RijksCollectionService};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COLLECTION_PATH: &str = "/en/collection";

/// Settings pointing at the mock server
pub fn settings_for(server: &MockServer) -> ApiSettings {
    ApiSettings {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        culture: "en".to_string(),
        page_size: 2,
    }
}

/// Real service stack (reqwest transport, resolver, adapter) for the mock server
pub fn service_for(server: &MockServer) -> RijksCollectionService {
    let transport = HttpTransport::new().expect("HTTP client should build");
    RijksCollectionService::new(Resolver::new(transport), settings_for(server))
}

pub fn art_object(object_number: &str, title: &str) -> Value {
    json!({
        "links": { "self": format!("https://example.com/{object_number}") },
        "id": format!("en-{object_number}"),
        "objectNumber": object_number,
        "title": title,
        "principalOrFirstMaker": "Rembrandt van Rijn",
        "hasImage": true,
        "webImage": {
            "guid": "g",
            "width": 100,
            "height": 100,
            "url": format!("https://images.example.com/{object_number}.jpg")
        }
    })
}

pub fn page_body(count: u64, art_objects: Vec<Value>) -> Value {
    json!({ "elapsedMilliseconds": 1, "count": count, "artObjects": art_objects })
}

/// Serve `body` for the given page of the collection endpoint
pub async fn mount_page(server: &MockServer, page: u32, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("p", page.to_string()))
        .and(query_param("ps", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

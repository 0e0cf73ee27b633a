//! In-memory fake of the Kong Admin API for integration tests.
//!
//! Mounted on a `wiremock::MockServer` as a catch-all responder. Supports
//! `consumers`, `services`, and `routes` (including
//! `services/{id}/routes`), unique-field conflicts, server-assigned UUIDs,
//! and offset pagination with the gateway's list envelope.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kong_admin::admin::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use kong_admin::{AdminUrl, KongClient, KongConfig};
use serde_json::{json, Map, Value};
use uuid::Uuid;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const CREATED_AT: i64 = 1_700_000_000;
const DEFAULT_SIZE: usize = DEFAULT_PAGE_SIZE as usize;
const MAX_SIZE: usize = MAX_PAGE_SIZE as usize;

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Map<String, Value>>>,
}

/// Stateful responder shared by every request to the mock server.
#[derive(Clone, Default)]
pub struct FakeKong {
    state: Arc<Mutex<State>>,
}

impl FakeKong {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a mock server backed by a fresh fake and returns a client for it.
    pub async fn start() -> (MockServer, KongClient, Self) {
        let server = MockServer::start().await;
        let fake = Self::new();
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        let client = client_for(&server);
        (server, client, fake)
    }

    /// Number of entities stored in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.collections.get(collection).map_or(0, Vec::len)
    }

    fn handle(
        &self,
        method: &str,
        segments: &[&str],
        query: &HashMap<String, String>,
        body: Option<Value>,
    ) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        match (method, segments) {
            ("GET", [collection]) => state.list(collection, None, query),
            ("POST", [collection]) => state.create(collection, body, None),
            ("GET", ["services", service, "routes"]) => {
                match state.find("services", service) {
                    Some(index) => {
                        let service_id = state.id_at("services", index);
                        state.list("routes", Some(&service_id), query)
                    }
                    None => not_found(),
                }
            }
            ("POST", ["services", service, "routes"]) => {
                match state.find("services", service) {
                    Some(index) => {
                        let service_id = state.id_at("services", index);
                        state.create("routes", body, Some(&service_id))
                    }
                    None => not_found(),
                }
            }
            ("GET", [collection, id]) => match state.find(collection, id) {
                Some(index) => {
                    json_response(200, Value::Object(state.entities(collection)[index].clone()))
                }
                None => not_found(),
            },
            ("PATCH", [collection, id]) => state.update(collection, id, body),
            ("DELETE", [collection, id]) => match state.find(collection, id) {
                Some(index) => {
                    if *collection == "services" {
                        let service_id = state.id_at("services", index);
                        let has_routes = state.entities("routes").iter().any(|r| {
                            r.get("service").and_then(|s| s.get("id")).and_then(Value::as_str)
                                == Some(service_id.as_str())
                        });
                        if has_routes {
                            return json_response(
                                400,
                                json!({
                                    "code": 14,
                                    "name": "foreign key violation",
                                    "message": "an existing 'routes' entity references this 'services' entity"
                                }),
                            );
                        }
                    }
                    state.entities_mut(collection).remove(index);
                    ResponseTemplate::new(204)
                }
                // The gateway does not distinguish deleting a missing entity
                None => ResponseTemplate::new(204),
            },
            _ => not_found(),
        }
    }
}

impl Respond for FakeKong {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let method = request.method.to_string().to_uppercase();
        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let decoded: Vec<String> = segments
            .iter()
            .map(|s| urlencoding::decode(s).map_or_else(|_| (*s).to_string(), |d| d.into_owned()))
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let body = if request.body.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&request.body) {
                Ok(value) => Some(value),
                Err(_) => return json_response(400, json!({"message": "Cannot parse JSON body"})),
            }
        };
        self.handle(&method, &segments, &query, body)
    }
}

impl State {
    fn entities(&self, collection: &str) -> &[Map<String, Value>] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn entities_mut(&mut self, collection: &str) -> &mut Vec<Map<String, Value>> {
        self.collections.entry(collection.to_string()).or_default()
    }

    fn id_at(&self, collection: &str, index: usize) -> String {
        self.entities(collection)[index]
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Finds by id, or by the collection's endpoint key (username / name).
    fn find(&self, collection: &str, id_or_name: &str) -> Option<usize> {
        let name_key = endpoint_key(collection);
        self.entities(collection).iter().position(|e| {
            e.get("id").and_then(Value::as_str) == Some(id_or_name)
                || name_key.is_some_and(|k| e.get(k).and_then(Value::as_str) == Some(id_or_name))
        })
    }

    fn conflict(
        &self,
        collection: &str,
        entity: &Map<String, Value>,
        skip: Option<usize>,
    ) -> Option<ResponseTemplate> {
        for key in unique_keys(collection) {
            let Some(value) = entity.get(*key).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = self
                .entities(collection)
                .iter()
                .enumerate()
                .any(|(i, e)| Some(i) != skip && e.get(*key) == Some(value));
            if taken {
                let shown = value.as_str().map_or_else(|| value.to_string(), ToString::to_string);
                let mut fields = Map::new();
                fields.insert((*key).to_string(), json!(shown));
                return Some(json_response(
                    409,
                    json!({
                        "code": 5,
                        "name": "unique constraint violation",
                        "message": format!("UNIQUE violation detected on '{{{key}=\"{shown}\"}}'"),
                        "fields": fields
                    }),
                ));
            }
        }
        None
    }

    fn create(
        &mut self,
        collection: &str,
        body: Option<Value>,
        service_id: Option<&str>,
    ) -> ResponseTemplate {
        if !matches!(collection, "consumers" | "services" | "routes") {
            return not_found();
        }
        let Some(Value::Object(mut entity)) = body else {
            return schema_violation("@entity", "expected a record");
        };

        let assign_id = match entity.get("id").and_then(Value::as_str) {
            Some(id) if Uuid::parse_str(id).is_err() => {
                return schema_violation("id", "expected a valid UUID");
            }
            Some(_) => false,
            None => true,
        };
        if assign_id {
            entity.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        }

        if let Some(error) = validate(collection, &entity) {
            return error;
        }
        if let Some(error) = self.conflict(collection, &entity, None) {
            return error;
        }
        if self.find(collection, entity["id"].as_str().unwrap_or_default()).is_some() {
            return json_response(
                409,
                json!({"code": 5, "name": "primary key violation", "message": "primary key violation on key '{id}'"}),
            );
        }

        if let Some(service_id) = service_id {
            entity.insert("service".to_string(), json!({"id": service_id}));
        }
        for (key, value) in defaults(collection) {
            entity.entry(key).or_insert(value);
        }
        entity.insert("created_at".to_string(), json!(CREATED_AT));
        if collection != "consumers" {
            entity.insert("updated_at".to_string(), json!(CREATED_AT));
        }

        self.entities_mut(collection).push(entity.clone());
        json_response(201, Value::Object(entity))
    }

    fn update(&mut self, collection: &str, id: &str, body: Option<Value>) -> ResponseTemplate {
        let Some(index) = self.find(collection, id) else {
            return not_found();
        };
        let Some(Value::Object(changes)) = body else {
            return schema_violation("@entity", "expected a record");
        };

        let mut updated = self.entities(collection)[index].clone();
        for (key, value) in changes {
            if key == "id" || key == "created_at" || key == "updated_at" {
                continue;
            }
            updated.insert(key, value);
        }

        if let Some(error) = validate(collection, &updated) {
            return error;
        }
        if let Some(error) = self.conflict(collection, &updated, Some(index)) {
            return error;
        }
        if collection != "consumers" {
            updated.insert("updated_at".to_string(), json!(CREATED_AT + 1));
        }

        self.entities_mut(collection)[index] = updated.clone();
        json_response(200, Value::Object(updated))
    }

    fn list(
        &self,
        collection: &str,
        service_id: Option<&str>,
        query: &HashMap<String, String>,
    ) -> ResponseTemplate {
        if !matches!(collection, "consumers" | "services" | "routes") {
            return not_found();
        }

        let size = match query.get("size").map(|s| s.parse::<usize>()) {
            None => DEFAULT_SIZE,
            Some(Ok(size)) if (1..=MAX_SIZE).contains(&size) => size,
            Some(_) => {
                return schema_violation("size", "size must be an integer between 1 and 1000");
            }
        };

        let matching: Vec<&Map<String, Value>> = self
            .entities(collection)
            .iter()
            .filter(|e| {
                service_id.map_or(true, |sid| {
                    e.get("service").and_then(|s| s.get("id")).and_then(Value::as_str) == Some(sid)
                })
            })
            .filter(|e| query.get("tags").map_or(true, |tags| has_tags(e, tags)))
            .collect();

        let start = match query.get("offset") {
            None => 0,
            Some(offset) => {
                match matching
                    .iter()
                    .position(|e| e.get("id").and_then(Value::as_str) == Some(offset.as_str()))
                {
                    Some(position) => position,
                    None => {
                        return json_response(
                            400,
                            json!({"code": 7, "name": "invalid offset", "message": "invalid offset"}),
                        );
                    }
                }
            }
        };

        let end = (start + size).min(matching.len());
        let data: Vec<Value> = matching[start..end]
            .iter()
            .map(|e| Value::Object((*e).clone()))
            .collect();

        let base = service_id.map_or_else(
            || format!("/{collection}"),
            |sid| format!("/services/{sid}/{collection}"),
        );
        // The gateway encodes an empty array as an empty object
        let data = if data.is_empty() { json!({}) } else { Value::Array(data) };

        let body = match matching.get(end) {
            Some(next) => {
                let offset = next.get("id").and_then(Value::as_str).unwrap_or_default();
                json!({
                    "data": data,
                    "next": format!("{base}?offset={offset}"),
                    "offset": offset
                })
            }
            None => json!({"data": data, "next": null}),
        };
        json_response(200, body)
    }
}

fn endpoint_key(collection: &str) -> Option<&'static str> {
    match collection {
        "consumers" => Some("username"),
        "services" | "routes" => Some("name"),
        _ => None,
    }
}

fn unique_keys(collection: &str) -> &'static [&'static str] {
    match collection {
        "consumers" => &["username", "custom_id"],
        "services" | "routes" => &["name"],
        _ => &[],
    }
}

fn defaults(collection: &str) -> Map<String, Value> {
    let value = match collection {
        "consumers" => json!({"username": null, "custom_id": null, "tags": null}),
        "services" => json!({
            "name": null,
            "protocol": "http",
            "port": 80,
            "path": null,
            "retries": 5,
            "connect_timeout": 60000,
            "write_timeout": 60000,
            "read_timeout": 60000,
            "enabled": true,
            "tags": null
        }),
        "routes" => json!({
            "name": null,
            "protocols": ["http", "https"],
            "methods": null,
            "hosts": null,
            "paths": null,
            "strip_path": true,
            "preserve_host": false,
            "service": null,
            "tags": null
        }),
        _ => json!({}),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn validate(collection: &str, entity: &Map<String, Value>) -> Option<ResponseTemplate> {
    let present = |key: &str| entity.get(key).is_some_and(|v| !v.is_null());
    match collection {
        "consumers" if !present("username") && !present("custom_id") => Some(schema_violation(
            "@entity",
            "at least one of these fields must be non-empty: 'custom_id', 'username'",
        )),
        "services" if !present("host") => Some(schema_violation("host", "required field missing")),
        "services" if entity.get("host").and_then(Value::as_str) == Some("") => {
            Some(schema_violation("host", "length must be at least 1"))
        }
        "services" => match entity.get("port").and_then(Value::as_i64) {
            Some(port) if !(0..=65535).contains(&port) => Some(schema_violation(
                "port",
                "value should be between 0 and 65535",
            )),
            _ => None,
        },
        _ => None,
    }
}

fn has_tags(entity: &Map<String, Value>, filter: &str) -> bool {
    let tags: Vec<&str> = entity
        .get("tags")
        .and_then(Value::as_array)
        .map(|t| t.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if filter.contains('/') {
        filter.split('/').any(|t| tags.contains(&t))
    } else {
        filter.split(',').all(|t| tags.contains(&t))
    }
}

fn json_response(code: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(code)
        .insert_header("X-Kong-Request-Id", "fake-request-id")
        .set_body_json(body)
}

fn not_found() -> ResponseTemplate {
    json_response(404, json!({"message": "Not found"}))
}

fn schema_violation(field: &str, message: &str) -> ResponseTemplate {
    let mut fields = Map::new();
    if field == "@entity" {
        fields.insert(field.to_string(), json!([message]));
    } else {
        fields.insert(field.to_string(), json!(message));
    }
    json_response(
        400,
        json!({
            "code": 2,
            "name": "schema violation",
            "message": format!("schema violation ({field}: {message})"),
            "fields": fields
        }),
    )
}

/// A client pointed at `server` with default settings.
pub fn client_for(server: &MockServer) -> KongClient {
    let config = KongConfig::builder()
        .admin_url(AdminUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    KongClient::new(&config).unwrap()
}

/// Sorted usernames of `consumers`.
pub fn sorted_usernames(consumers: &[kong_admin::admin::resources::Consumer]) -> Vec<String> {
    let mut names: Vec<String> = consumers
        .iter()
        .filter_map(|c| c.username.clone())
        .collect();
    names.sort();
    names
}

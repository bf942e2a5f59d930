//! In-process REST backend used by the network tests.
//!
//! Serves every collection the client knows about from JSON arrays held in
//! memory, records each request (method, path, bearer header, body) and can
//! be switched into "reject everything with 401" or "fail this prefix with
//! 500" modes.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Longest prefixes first so `admin/users` wins over shorter matches.
const COLLECTIONS: &[&str] = &[
    "medication-reminders",
    "medication-adherence",
    "educational-content",
    "treatment-plans",
    "notifications",
    "consultations",
    "prescriptions",
    "arv-regimens",
    "side-effects",
    "vital-signs",
    "lab-results",
    "appointments",
    "admin/users",
    "medications",
    "patients",
    "doctors",
];

const MESSAGES: &str = "consultation-messages";

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    collections: Mutex<BTreeMap<String, Vec<Value>>>,
    requests: Mutex<Vec<SeenRequest>>,
    next_id: AtomicI64,
    reject_all: AtomicBool,
    failing: Mutex<Vec<String>>,
    login: Mutex<Option<(String, String, String, Value)>>,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            next_id: AtomicI64::new(100),
            ..Default::default()
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let app = Router::new().fallback(handle).with_state(state.clone());

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Replace a collection. Items without an `id` get one.
    pub fn seed(&self, collection: &str, items: Vec<Value>) {
        let items = items
            .into_iter()
            .map(|item| self.state.with_id(item))
            .collect();
        self.state
            .collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), items);
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<SeenRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }

    pub fn reject_all(&self, on: bool) {
        self.state.reject_all.store(on, Ordering::SeqCst);
    }

    /// Answer 500 for every path starting with `prefix`.
    pub fn fail(&self, prefix: &str) {
        self.state.failing.lock().unwrap().push(prefix.to_string());
    }

    pub fn heal(&self) {
        self.state.failing.lock().unwrap().clear();
    }

    /// Accept exactly these credentials on `/auth/login`.
    pub fn accept_login(&self, email: &str, password: &str, token: &str, user: Value) {
        *self.state.login.lock().unwrap() = Some((
            email.to_string(),
            password.to_string(),
            token.to_string(),
            user,
        ));
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl MockState {
    fn with_id(&self, mut item: Value) -> Value {
        if let Some(map) = item.as_object_mut() {
            if map.get("id").map_or(true, Value::is_null) {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                map.insert("id".into(), json!(id));
            }
        }
        item
    }

    fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    reply(StatusCode::NOT_FOUND, json!({"message": "Not found"}))
}

fn value_matches(value: Option<&Value>, expected: &str) -> bool {
    match value {
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::String(s)) => s == expected,
        _ => false,
    }
}

fn scope_field(scope: &str) -> Option<&'static str> {
    Some(match scope {
        "patient" => "patientId",
        "doctor" => "doctorId",
        "category" => "category",
        "test-type" => "testType",
        "medication" => "medicationId",
        "user" => "userId",
        _ => return None,
    })
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .trim_start_matches("/api")
        .trim_matches('/')
        .to_string();
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    state.requests.lock().unwrap().push(SeenRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    if state.reject_all.load(Ordering::SeqCst) {
        return reply(StatusCode::UNAUTHORIZED, json!({"message": "Unauthorized"}));
    }
    if state
        .failing
        .lock()
        .unwrap()
        .iter()
        .any(|p| path.starts_with(p.as_str()))
    {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "Internal error"}),
        );
    }

    route(&state, &method, &path, body.unwrap_or(Value::Null))
}

fn route(state: &MockState, method: &Method, path: &str, body: Value) -> Response {
    match (method.as_str(), path) {
        ("POST", "auth/login") => return login(state, &body),
        ("POST", "auth/register") => return reply(StatusCode::OK, json!({"success": true})),
        ("GET", "admin/system-stats") => {
            return reply(
                StatusCode::OK,
                json!({
                    "totalUsers": state.count("admin/users"),
                    "totalPatients": state.count("patients"),
                    "totalDoctors": 2,
                    "todayAppointments": 1,
                    "cpuUsage": 12.5,
                    "memoryUsage": 40.0,
                    "diskUsage": 63.0,
                    "recentLogs": [{"timestamp": "2024-05-01T08:00:00", "level": "info", "message": "boot"}]
                }),
            )
        }
        ("GET", "admin/user-stats") => {
            return reply(StatusCode::OK, json!({"activeUsers": state.count("admin/users")}))
        }
        ("GET", "dashboard/stats") => {
            return reply(
                StatusCode::OK,
                json!({
                    "totalPatients": state.count("patients"),
                    "totalAppointments": state.count("appointments"),
                    "totalPrescriptions": state.count("prescriptions"),
                    "totalLabResults": state.count("lab-results"),
                    "newPrescriptions": 3
                }),
            )
        }
        _ => {}
    }

    if method == Method::PUT && path.starts_with("users/") && path.ends_with("/password") {
        return reply(StatusCode::OK, json!({"success": true}));
    }
    if method == Method::POST && path.starts_with("admin/system/") {
        return reply(StatusCode::OK, json!({"status": "ok"}));
    }
    if method == Method::GET && path.starts_with("reports/export/patient/") {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            b"%PDF-1.4 mock".to_vec(),
        )
            .into_response();
    }
    if method == Method::GET && path.starts_with("reports/") {
        return reply(
            StatusCode::OK,
            json!({"summary": {
                "totalAppointments": state.count("appointments"),
                "totalPrescriptions": state.count("prescriptions"),
                "totalLabResults": state.count("lab-results"),
                "adherenceRate": 70
            }}),
        );
    }

    let Some(collection) = COLLECTIONS
        .iter()
        .find(|c| path == **c || path.starts_with(&format!("{c}/")))
    else {
        return not_found();
    };
    let rest: Vec<&str> = path[collection.len()..]
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    collection_route(state, method, collection, &rest, body)
}

fn login(state: &MockState, body: &Value) -> Response {
    let guard = state.login.lock().unwrap();
    match guard.as_ref() {
        Some((email, password, token, user))
            if body["email"] == json!(email) && body["password"] == json!(password) =>
        {
            reply(
                StatusCode::OK,
                json!({"success": true, "token": token, "user": user}),
            )
        }
        _ => reply(
            StatusCode::BAD_REQUEST,
            json!({"success": false, "message": "Email hoặc mật khẩu không đúng"}),
        ),
    }
}

fn collection_route(
    state: &MockState,
    method: &Method,
    collection: &str,
    rest: &[&str],
    body: Value,
) -> Response {
    let mut collections = state.collections.lock().unwrap();

    match (method.as_str(), rest) {
        ("GET", []) => {
            let items = collections.get(collection).cloned().unwrap_or_default();
            reply(StatusCode::OK, Value::Array(items))
        }
        ("POST", []) | ("POST", ["record"]) => {
            let created = state.with_id(body);
            collections
                .entry(collection.to_string())
                .or_default()
                .push(created.clone());
            reply(StatusCode::OK, created)
        }
        ("GET", ["published"]) => {
            let items: Vec<Value> = collections
                .get(collection)
                .into_iter()
                .flatten()
                .filter(|i| i["isPublished"] == json!(true))
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(items))
        }
        ("PUT", ["mark-all-read"]) => {
            for item in collections.entry(collection.to_string()).or_default() {
                item["isRead"] = json!(true);
            }
            reply(StatusCode::OK, json!({}))
        }
        ("GET", ["patient", id, "active"]) => {
            let items: Vec<Value> = collections
                .get(collection)
                .into_iter()
                .flatten()
                .filter(|i| value_matches(i.get("patientId"), id) && i["status"] == json!("ACTIVE"))
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(items))
        }
        ("GET", [id, "messages"]) => {
            let items: Vec<Value> = collections
                .get(MESSAGES)
                .into_iter()
                .flatten()
                .filter(|m| value_matches(m.get("consultationId"), id))
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(items))
        }
        ("POST", [id, "messages"]) => {
            let mut message = state.with_id(body);
            message["consultationId"] = match id.parse::<i64>() {
                Ok(n) => json!(n),
                Err(_) => json!(id),
            };
            collections
                .entry(MESSAGES.to_string())
                .or_default()
                .push(message.clone());
            reply(StatusCode::OK, message)
        }
        ("GET", [scope, value]) if scope_field(scope).is_some() => {
            let field = scope_field(scope).unwrap_or_default();
            let items: Vec<Value> = collections
                .get(collection)
                .into_iter()
                .flatten()
                .filter(|i| value_matches(i.get(field), value))
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(items))
        }
        ("POST", [_, "reset-password"]) => {
            reply(StatusCode::OK, json!({"message": "Password reset"}))
        }
        (verb, [id, action]) if verb == "PUT" => {
            let Some(item) = collections
                .get_mut(collection)
                .and_then(|items| items.iter_mut().find(|i| value_matches(i.get("id"), id)))
            else {
                return not_found();
            };
            match *action {
                "read" => item["isRead"] = json!(true),
                "taken" => item["lastTaken"] = json!(true),
                "status" => item["status"] = body["status"].clone(),
                "assign" => item["doctorId"] = body["doctorId"].clone(),
                _ => return not_found(),
            }
            reply(StatusCode::OK, item.clone())
        }
        ("GET", [id]) => collections
            .get(collection)
            .and_then(|items| items.iter().find(|i| value_matches(i.get("id"), id)))
            .map(|item| reply(StatusCode::OK, item.clone()))
            .unwrap_or_else(not_found),
        ("PUT", [id]) => {
            let Some(item) = collections
                .get_mut(collection)
                .and_then(|items| items.iter_mut().find(|i| value_matches(i.get("id"), id)))
            else {
                return not_found();
            };
            let original_id = item["id"].clone();
            *item = body;
            item["id"] = original_id;
            reply(StatusCode::OK, item.clone())
        }
        ("DELETE", [id]) => {
            let Some(items) = collections.get_mut(collection) else {
                return not_found();
            };
            let before = items.len();
            items.retain(|i| !value_matches(i.get("id"), id));
            if items.len() == before {
                return not_found();
            }
            StatusCode::NO_CONTENT.into_response()
        }
        _ => not_found(),
    }
}

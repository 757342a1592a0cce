// Stub hotel backend shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

pub const GOOD_TOKEN: &str = "access-1";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const GOOD_PASSWORD: &str = "Secret#123";
pub const TAKEN_USERNAME: &str = "taken";
// Location code for which the backend has no hotels.
pub const EMPTY_LOCATION: &str = "KTM";
pub const DUPLICATE_HOTEL: &str = "dup";

// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Backend {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    fn record(&self, method: &str, path: &str, query: Option<String>, headers: &HeaderMap, body: String) {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().expect("requests lock").push(Recorded {
            method: method.to_string(),
            path: path.to_string(),
            query,
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });
    }
}

// Start the stub on an ephemeral port and return its base URL and request log.
// The server lives on the calling test's runtime.
pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/hotels/search/", post(search_hotels))
        .route(
            "/bookmarks/",
            get(list_bookmarks).post(add_bookmark).delete(remove_bookmark),
        )
        .route("/bookmarks/search/", get(bookmarked_hotels))
        .route("/accounts/signup/", post(signup))
        .route("/accounts/login/", post(login))
        .route("/accounts/logout/", post(logout))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend failed");
    });

    (format!("http://{addr}"), backend)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(&format!("Bearer {GOOD_TOKEN}")[..])
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Given token not valid for any token type"})),
    )
        .into_response()
}

fn form_value(body: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn hotels_json() -> Value {
    json!([
        {
            "hotel_id": 1001,
            "name": "Hotel Lumiere",
            "description": "Near the river",
            "countryCode": "FR",
            "address": "1 Rue de Rivoli",
            "city": "Paris",
            "rating": "4 STARS",
            "avg_price_rate": 180.5,
            "currency": "EUR"
        },
        {
            "hotel_id": "1002",
            "city": "Paris",
            "rating": 2,
            "avg_price_rate": 75.0,
            "currency": "EUR",
            "image": "https://img.example/1002.jpg"
        }
    ])
}

async fn search_hotels(
    State(backend): State<Backend>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.record("POST", "/hotels/search/", query.clone(), &headers, body);
    if !authorized(&headers) {
        return unauthorized();
    }

    let location = query
        .as_deref()
        .and_then(|query| form_value(query, "location_code"));
    if location.as_deref() == Some(EMPTY_LOCATION) {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "No hotels found"}))).into_response();
    }
    Json(hotels_json()).into_response()
}

async fn list_bookmarks(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/bookmarks/", None, &headers, String::new());
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{"hotel_code": "1002", "date_added": "2025-05-01T10:00:00Z"}])).into_response()
}

async fn bookmarked_hotels(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/bookmarks/search/", None, &headers, String::new());
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "hotel_id": "1002",
            "name": "Budget Inn",
            "city": "Paris",
            "rating": "2",
            "avg_price_rate": 75.0,
            "currency": "EUR",
            "date_added": "2025-05-01T10:00:00Z"
        }
    ]))
    .into_response()
}

async fn add_bookmark(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    backend.record("POST", "/bookmarks/", None, &headers, body.clone());
    if !authorized(&headers) {
        return unauthorized();
    }
    let hotel_code = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value["hotel_code"].as_str().map(str::to_string));
    match hotel_code.as_deref() {
        Some(DUPLICATE_HOTEL) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Hotel already bookmarked"})),
        )
            .into_response(),
        Some(_) => StatusCode::CREATED.into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn remove_bookmark(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    backend.record("DELETE", "/bookmarks/", None, &headers, body);
    if !authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn signup(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    backend.record("POST", "/accounts/signup/", None, &headers, body.clone());
    if form_value(&body, "username").as_deref() == Some(TAKEN_USERNAME) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "username": ["A user with that username already exists."],
                "email": ["Enter a valid email address."]
            })),
        )
            .into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn login(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    backend.record("POST", "/accounts/login/", None, &headers, body.clone());
    if form_value(&body, "password").as_deref() == Some(GOOD_PASSWORD) {
        return Json(json!({"refresh": REFRESH_TOKEN, "access": GOOD_TOKEN})).into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"non_field_errors": ["Unable to log in with provided credentials."]})),
    )
        .into_response()
}

async fn logout(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    backend.record("POST", "/accounts/logout/", None, &headers, body);
    StatusCode::RESET_CONTENT.into_response()
}

//! HTTP API tests. Each test builds its own router over an in-memory store
//! and drives it in-process.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use menulinx::notify::NoopNotifier;
use menulinx::server::{AppState, create_router};
use menulinx::store::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(NoopNotifier));
        Self {
            router: create_router(Arc::new(state)),
        }
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn setup(&self, slug: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/setup",
                None,
                Some(json!({"slug": slug, "name": "Cafe X", "currency": "£"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_setup_and_profile() {
    let app = TestApp::new();
    let token = app.setup("Cafe-X!").await;
    assert!(token.starts_with("menulinx_"));

    let (status, body) = app.request(Method::GET, "/api/cafe-x", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "cafe-x");
    assert_eq!(body["data"]["name"], "Cafe X");
    assert_eq!(body["data"]["currency"], "£");
    assert!(body["data"].get("sms").is_none());

    let (status, body) = app
        .request(Method::POST, "/api/setup", None, Some(json!({"slug": "cafe-x"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = app
        .request(Method::POST, "/api/setup", None, Some(json!({"slug": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.request(Method::GET, "/api/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Restaurant not found");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new();
    let token = app.setup("cafe-x").await;
    let other = app.setup("cafe-y").await;

    let (status, _) = app.request(Method::GET, "/api/cafe-x/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/cafe-x/orders", Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/cafe-x/orders", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(Method::GET, "/api/cafe-x/orders", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_menu_flow() {
    let app = TestApp::new();
    let token = app.setup("cafe-x").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cafe-x/menu",
            Some(&token),
            Some(json!({"name": "Tea", "price": "£2.50"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let tea_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["price"], 2.5);
    assert_eq!(body["data"]["category"], "Main");
    assert_eq!(body["data"]["available"], true);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cafe-x/menu/bulk",
            Some(&token),
            Some(json!({"items": [
                {"name": "Scone", "price": 3, "category": "Bakery"},
                {"name": "Cake", "price": 4.25}
            ]})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 2);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/cafe-x/menu/bulk",
            Some(&token),
            Some(json!({"items": []})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/cafe-x/menu/{tea_id}"),
            Some(&token),
            Some(json!({"available": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["data"]["name"], "Tea");

    let (status, body) = app.request(Method::GET, "/api/cafe-x/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tea", "Scone", "Cake"]);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/cafe-x/menu/{tea_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.request(Method::GET, "/api/cafe-x/menu", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/cafe-x/menu/{tea_id}"),
            Some(&token),
            Some(json!({"price": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_flow() {
    let app = TestApp::new();
    let token = app.setup("cafe-x").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cafe-x/orders",
            None,
            Some(json!({
                "customerName": "Ann",
                "customerPhone": "07700 900123",
                "orderType": "collection",
                "items": [{"id": "tea", "name": "Tea", "price": 2.5, "qty": 2}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "new");
    assert_eq!(body["data"]["total"], 5.0);
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    let order_uri = format!("/api/cafe-x/orders/{order_id}");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/cafe-x/orders",
            None,
            Some(json!({"customerName": "Ann", "customerPhone": "1", "items": []})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(Method::PATCH, &order_uri, Some(&token), Some(json!({"status": "accepted"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "accepted");
    assert!(body["data"]["updatedAt"].is_string());

    let (status, body) = app
        .request(Method::PATCH, &order_uri, Some(&token), Some(json!({"status": "new"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    let (status, _) = app
        .request(Method::PATCH, &order_uri, Some(&token), Some(json!({"status": "delivered"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for next in ["ready", "delivered"] {
        let (status, _) = app
            .request(Method::PATCH, &order_uri, Some(&token), Some(json!({"status": next})))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app
        .request(Method::GET, "/api/cafe-x/orders", Some(&token), None)
        .await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = app.request(Method::GET, &order_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "delivered");

    let (status, _) = app
        .request(Method::PATCH, &order_uri, Some(&token), Some(json!({"status": "ready"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request(Method::GET, "/api/cafe-x/stats", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orders"], 1);
    assert_eq!(body["data"]["revenue"], 5.0);
}

#[tokio::test]
async fn test_settings_update() {
    let app = TestApp::new();
    let token = app.setup("cafe-x").await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/cafe-x/settings",
            Some(&token),
            Some(json!({
                "deliveryFee": "1.50",
                "minOrder": 10,
                "orderTypes": ["delivery"],
                "sms": {"enabled": true, "apiKey": "key", "events": {"orderReady": false}}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deliveryFee"], 1.5);
    assert_eq!(body["data"]["orderTypes"], json!(["delivery"]));
    assert_eq!(body["data"]["sms"]["enabled"], true);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cafe-x/orders",
            None,
            Some(json!({
                "customerName": "Ann",
                "customerPhone": "07700900123",
                "orderType": "collection",
                "items": [{"id": "tea", "name": "Tea", "price": 20}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cafe-x/orders",
            None,
            Some(json!({
                "customerName": "Ann",
                "customerPhone": "07700900123",
                "orderType": "delivery",
                "items": [{"id": "tea", "name": "Tea", "price": 5, "qty": 2}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["deliveryFee"], 1.5);
    assert_eq!(body["data"]["total"], 11.5);
}

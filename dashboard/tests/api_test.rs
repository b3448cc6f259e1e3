//! HTTP API tests
//!
//! Drive the full router against a mock data source.

mod fixtures;
mod helpers;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;
use shared::ClassificationMode;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use dashboard::services::PRODUCTS_PATH;
use dashboard::{DashboardConfig, DashboardServer, RealProductSource, StaticCredentialStore};
use fixtures::*;
use helpers::*;

fn products_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(create_test_envelope())
}

#[tokio::test]
async fn test_health_is_open() {
    let (router, _source) = create_test_router(products_ok()).await;

    let response = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn test_api_test_reports_diagnostics() {
    let (router, source) = create_test_router(products_ok()).await;

    let response = send(&router, Method::GET, "/api/test", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["dataSourceConfigured"], true);
    assert_eq!(body["dataSourceEndpoint"], format!("{}{}", source.uri(), PRODUCTS_PATH));
    assert_eq!(body["catalog"]["status"], "not_loaded");
    assert_eq!(body["classification"], "derive");
    assert_eq!(body["configuredUsers"], 2);
}

#[tokio::test]
async fn test_protected_routes_require_login() {
    let (router, _source) = create_test_router(products_ok()).await;

    for (method, uri) in [
        (Method::GET, "/api/products"),
        (Method::POST, "/api/products/reload"),
        (Method::GET, "/api/dashboard"),
    ] {
        let response = send(&router, method, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    let response = send(&router, Method::GET, "/api/products", Some("stock_session=forged"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_validation() {
    let (router, _source) = create_test_router(products_ok()).await;

    let missing = send(&router, Method::POST, "/api/auth", None, Some(json!({ "username": "admin" }))).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let blank = send(
        &router,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "username": "  ", "password": "password123" })),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let wrong = send(
        &router,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "username": "admin", "password": "nope" })),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(wrong).await["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_with_unreadable_body_uses_failure_shape() {
    let (router, _source) = create_test_router(products_ok()).await;

    let cases = [
        (None, ""),
        (Some("application/json"), ""),
        (Some("application/json"), "{not json"),
        (Some("text/plain"), "username=admin&password=password123"),
    ];

    for (content_type, body) in cases {
        let mut builder = Request::builder().method(Method::POST).uri("/api/auth");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{content_type:?} {body:?}");
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid request"));
    }
}

#[tokio::test]
async fn test_login_does_not_trim_credentials() {
    let (router, _source) = create_test_router(products_ok()).await;

    let padded = send(
        &router,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "username": "  admin  ", "password": "password123" })),
    )
    .await;
    assert_eq!(padded.status(), StatusCode::UNAUTHORIZED);
    assert!(padded.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (router, _source) = create_test_router(products_ok()).await;

    let response = send(
        &router,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "username": "juan.duran", "password": "imsa2025" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("stock_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "juan.duran");
}

#[tokio::test]
async fn test_session_and_logout() {
    let (router, _source) = create_test_router(products_ok()).await;

    let anonymous = body_json(send(&router, Method::GET, "/api/session", None, None).await).await;
    assert_eq!(anonymous["data"]["authenticated"], false);

    let cookie = login(&router, "admin", "password123").await;
    let session = body_json(send(&router, Method::GET, "/api/session", Some(&cookie), None).await).await;
    assert_eq!(session["data"]["authenticated"], true);
    assert_eq!(session["data"]["username"], "admin");

    let logout = send(&router, Method::POST, "/api/logout", Some(&cookie), None).await;
    assert_eq!(logout.status(), StatusCode::OK);
    let cleared = logout.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cleared.contains("Max-Age=0"));

    let after = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_products_in_source_order() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 4);

    let products = body["data"].as_array().unwrap();
    let codes: Vec<_> = products.iter().map(|p| p["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["ABC123", "DEF456", "XYZ999", "OTHER1"]);

    let states: Vec<_> = products.iter().map(|p| p["state"].as_str().unwrap()).collect();
    assert_eq!(states, vec!["Critical", "Caution", "Normal", "Overstock"]);
    assert_eq!(products[2]["pendingDispatches"], 6.0);
}

#[tokio::test]
async fn test_products_fetched_once_until_reload() {
    let source = start_data_source(products_ok()).await;
    let router = create_test_server(&source.uri(), ClassificationMode::Derive).build_router();
    let cookie = login(&router, "admin", "password123").await;

    for uri in ["/api/products", "/api/dashboard", "/api/dashboard?q=abc"] {
        let response = send(&router, Method::GET, uri, Some(&cookie), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(source.received_requests().await.unwrap().len(), 1);

    let reload = send(&router, Method::POST, "/api/products/reload", Some(&cookie), None).await;
    assert_eq!(reload.status(), StatusCode::OK);
    assert_eq!(body_json(reload).await["data"]["productCount"], 4);
    assert_eq!(source.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_unfiltered() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let body = body_json(send(&router, Method::GET, "/api/dashboard", Some(&cookie), None).await).await;
    let data = &body["data"];

    assert_eq!(data["totalProducts"], 4);
    assert_eq!(data["visibleProducts"], 4);
    assert_eq!(data["sort"], "source");
    assert_eq!(data["states"], json!(["Critical", "Caution", "Normal", "Overstock"]));

    let summary = &data["summary"];
    assert_eq!(summary["total"], 4);
    for state in ["critical", "caution", "normal", "overstock"] {
        assert_eq!(summary[state]["count"], 1);
        assert_eq!(summary[state]["percentage"], 25.0);
    }
    assert_eq!(summary["meanStock"], 10.0);
    assert_eq!(summary["dispatchPercentage"], 50.0);
    assert_eq!(summary["latestCableMovement"], "2025-05-15T08:30:00Z");
}

#[tokio::test]
async fn test_dashboard_query_filters_and_kpis_follow() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let body = body_json(send(&router, Method::GET, "/api/dashboard?q=%20abc%20", Some(&cookie), None).await).await;
    let data = &body["data"];

    // Code ABC123 and description "Conector ABC reforzado"
    let codes: Vec<_> = data["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["ABC123", "DEF456"]);

    assert_eq!(data["query"], " abc ");
    assert_eq!(data["totalProducts"], 4);
    assert_eq!(data["visibleProducts"], 2);
    assert_eq!(data["summary"]["total"], 2);
    assert_eq!(data["summary"]["critical"]["percentage"], 50.0);
    assert_eq!(data["summary"]["caution"]["percentage"], 50.0);
    assert_eq!(data["summary"]["normal"]["count"], 0);
    assert_eq!(data["summary"]["latestCableMovement"], "2025-03-01T10:00:00Z");
}

#[tokio::test]
async fn test_dashboard_state_filter_with_no_match_is_empty() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/dashboard?state=Critical&q=xyz", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["visibleProducts"], 0);
    assert_eq!(data["products"], json!([]));
    assert_eq!(data["summary"]["total"], 0);
    assert_eq!(data["summary"]["meanStock"], 0.0);
    assert!(data["summary"]["latestCableMovement"].is_null());
    // The state list still reflects the whole catalog
    assert_eq!(data["states"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_dashboard_accepts_upstream_state_labels() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let body = body_json(
        send(&router, Method::GET, "/api/dashboard?state=Sobre%20Produccion", Some(&cookie), None).await,
    )
    .await;
    assert_eq!(body["data"]["state"], "Overstock");
    assert_eq!(body["data"]["products"][0]["code"], "OTHER1");
}

#[tokio::test]
async fn test_dashboard_sort_by_criticality() {
    let reversed: Vec<_> = create_test_upstream_products().as_array().unwrap().iter().rev().cloned().collect();
    let (router, _source) = create_test_router(ResponseTemplate::new(200).set_body_json(reversed)).await;
    let cookie = login(&router, "admin", "password123").await;

    let body = body_json(send(&router, Method::GET, "/api/dashboard?sort=criticality", Some(&cookie), None).await).await;
    let states: Vec<_> = body["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["state"].as_str().unwrap())
        .collect();
    assert_eq!(states, vec!["Critical", "Caution", "Normal", "Overstock"]);
}

#[tokio::test]
async fn test_dashboard_rejects_unknown_selection() {
    let (router, _source) = create_test_router(products_ok()).await;
    let cookie = login(&router, "admin", "password123").await;

    let bad_state = send(&router, Method::GET, "/api/dashboard?state=Broken", Some(&cookie), None).await;
    assert_eq!(bad_state.status(), StatusCode::BAD_REQUEST);

    let bad_sort = send(&router, Method::GET, "/api/dashboard?sort=price", Some(&cookie), None).await;
    assert_eq!(bad_sort.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_sort).await["success"], false);
}

#[tokio::test]
async fn test_rejected_payload_is_bad_gateway() {
    let (router, _source) = create_test_router(
        ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Error en la consulta SAP" })),
    )
    .await;
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/dashboard", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error en la consulta SAP");
    assert_eq!(body["retryable"], true);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_upstream_error_status_is_bad_gateway() {
    let (router, _source) = create_test_router(
        ResponseTemplate::new(500).set_body_json(json!({ "success": false, "error": "Error en el servidor" })),
    )
    .await;
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains("500"));
    assert!(message.contains("Error en el servidor"));
}

#[tokio::test]
async fn test_unreachable_data_source_is_unavailable() {
    let router = create_test_server("http://127.0.0.1:1", ClassificationMode::Derive).build_router();
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/dashboard", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["retryable"], true);
}

#[tokio::test]
async fn test_slow_data_source_times_out() {
    let source = start_data_source(products_ok().set_delay(Duration::from_secs(3))).await;

    let config = DashboardConfig::new(
        "127.0.0.1",
        0,
        &source.uri(),
        TEST_USERS,
        ClassificationMode::Derive,
        1,
    )
    .unwrap();
    let client = RealProductSource::with_timeout(&config.data_source_url, config.request_timeout).unwrap();
    let credentials = StaticCredentialStore::new(&config.users);
    let router = DashboardServer::new(config, client, credentials).build_router();
    let cookie = login(&router, "admin", "password123").await;

    let response = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_failure_sticks_until_reload() {
    let source = start_data_source(
        ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "SAP no disponible" })),
    )
    .await;
    let router = create_test_server(&source.uri(), ClassificationMode::Derive).build_router();
    let cookie = login(&router, "admin", "password123").await;

    let first = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(first.status(), StatusCode::BAD_GATEWAY);

    source.reset().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(products_ok())
        .mount(&source)
        .await;

    let still_failed = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(still_failed.status(), StatusCode::BAD_GATEWAY);

    let reload = send(&router, Method::POST, "/api/products/reload", Some(&cookie), None).await;
    assert_eq!(reload.status(), StatusCode::OK);

    let recovered = send(&router, Method::GET, "/api/products", Some(&cookie), None).await;
    assert_eq!(recovered.status(), StatusCode::OK);
    assert_eq!(body_json(recovered).await["total"], 4);
}

#[tokio::test]
async fn test_upstream_classification_mode() {
    let mut products = create_test_upstream_products();
    // Contradicts its stock numbers, and one record has no label at all
    products[2]["EstadoStock"] = json!("Critico");
    products[3].as_object_mut().unwrap().remove("EstadoStock");

    let source = start_data_source(ResponseTemplate::new(200).set_body_json(products)).await;
    let router = create_test_server(&source.uri(), ClassificationMode::Upstream).build_router();
    let cookie = login(&router, "admin", "password123").await;

    let body = body_json(send(&router, Method::GET, "/api/dashboard?sort=criticality", Some(&cookie), None).await).await;
    let data = &body["data"];

    let states: Vec<_> = data["products"].as_array().unwrap().iter().map(|p| p["state"].clone()).collect();
    assert_eq!(states, vec![json!("Critical"), json!("Critical"), json!("Caution"), json!(null)]);
    assert_eq!(data["summary"]["critical"]["count"], 2);
    assert_eq!(data["summary"]["overstock"]["count"], 0);
    assert_eq!(data["states"], json!(["Critical", "Caution"]));
}

//! Test helper utilities for dashboard integration tests

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use serde_json::Value;
use shared::ClassificationMode;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard::services::PRODUCTS_PATH;
use dashboard::{DashboardConfig, DashboardServer, RealProductSource, StaticCredentialStore};

use crate::fixtures::TEST_USERS;

pub type TestServer = DashboardServer<RealProductSource, StaticCredentialStore>;

/// Start a mock data source that answers the product request with `response`
pub async fn start_data_source(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

/// Build a dashboard wired to the given data source
pub fn create_test_server(data_source_url: &str, mode: ClassificationMode) -> TestServer {
    let config = DashboardConfig::new("127.0.0.1", 0, data_source_url, TEST_USERS, mode, 5).unwrap();
    let source = RealProductSource::with_timeout(&config.data_source_url, config.request_timeout).unwrap();
    let credentials = StaticCredentialStore::new(&config.users);
    DashboardServer::new(config, source, credentials)
}

/// Router over a mock data source answering `response`
pub async fn create_test_router(response: ResponseTemplate) -> (Router, MockServer) {
    let data_source = start_data_source(response).await;
    let router = create_test_server(&data_source.uri(), ClassificationMode::Derive).build_router();
    (router, data_source)
}

/// Send one request through the router
pub async fn send(router: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    router.clone().oneshot(request).await.unwrap()
}

/// Log in and return the `name=value` pair to send back as a Cookie header
pub async fn login(router: &Router, username: &str, password: &str) -> String {
    let response = send(
        router,
        Method::POST,
        "/api/auth",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap()
        .to_string();

    set_cookie.split(';').next().unwrap().to_string()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

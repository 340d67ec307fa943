#![allow(dead_code)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, Response, header},
};
use inventory_tracker::{
    config::AppConfig,
    dto::{auth::Credentials, items::ItemInput},
    models::Item,
    services::{auth_service, item_service},
    state::AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub fn test_config(static_dir: &Path) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        static_dir: static_dir.to_path_buf(),
        session_secure: false,
    }
}

/// Fresh in-memory database plus a throwaway static directory. Keep the
/// `TempDir` alive for the duration of the test.
pub async fn setup() -> anyhow::Result<(AppState, AppConfig, TempDir)> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    let state = AppState::init(&config).await?;
    Ok((state, config, dir))
}

/// Like [`setup`], but backed by a database file inside the temp dir so the
/// pool runs with several connections.
pub async fn setup_file_db() -> anyhow::Result<(AppState, TempDir)> {
    let dir = tempfile::tempdir()?;
    let mut config = test_config(dir.path());
    config.database_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("inventory.db").display()
    );
    let state = AppState::init(&config).await?;
    Ok((state, dir))
}

pub async fn add_item(state: &AppState, name: &str, quantity: i64, price: f64) -> Item {
    let input = ItemInput::new(name.into(), format!("{name} description"), quantity, price)
        .expect("valid item input");
    item_service::create_item(state, input)
        .await
        .expect("create item")
        .item
}

pub async fn add_user(state: &AppState, username: &str, password: &str) {
    auth_service::register_user(
        state,
        Credentials {
            username: username.into(),
            password: password.into(),
        },
    )
    .await
    .expect("register user");
}

/// Drives the router with `oneshot`, carrying the session cookie between
/// requests like a browser would.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn send(&mut self, mut request: Request<Body>) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(
                header::COOKIE,
                HeaderValue::from_str(cookie).expect("cookie header"),
            );
        }
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("ascii cookie")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string();
            self.cookie = Some(pair);
        }
        response
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    pub async fn send_json(
        &mut self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    /// Register and log in; leaves the client holding an authenticated
    /// session.
    pub async fn sign_in(&mut self, username: &str, password: &str) {
        self.post_form(
            "/auth/register",
            &format!("username={username}&password={password}&confirm_password={password}"),
        )
        .await;
        let response = self
            .post_form(
                "/auth/login",
                &format!("username={username}&password={password}"),
            )
            .await;
        assert_eq!(location(&response), "/inventory", "login should succeed");
    }
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

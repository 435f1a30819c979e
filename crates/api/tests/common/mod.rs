#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sanse_api::auth::jwt::{generate_access_token, JwtConfig};
use sanse_api::auth::password::hash_password;
use sanse_api::config::ServerConfig;
use sanse_api::router::build_app_router;
use sanse_api::state::AppState;
use sanse_db::models::user::{NewUser, User, UserChanges};
use sanse_db::Store;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        admin: None,
    }
}

/// The full application on a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub config: Arc<ServerConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Arc::new(test_config());
        let store = Store::in_memory();
        let state = AppState {
            store: store.clone(),
            config: Arc::clone(&config),
        };
        let router = build_app_router(state, &config);
        Self {
            router,
            store,
            config,
        }
    }

    /// Insert a user that can only authenticate by token.
    pub async fn seed_user(&self, email: &str, role: &str, full_name: &str) -> User {
        self.store
            .users
            .create(&NewUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
                role: role.to_string(),
                full_name: full_name.to_string(),
            })
            .await
            .expect("seeding a user should succeed")
    }

    /// Insert a user with a real password hash, for login tests.
    pub async fn seed_user_with_password(&self, email: &str, role: &str, password: &str) -> User {
        self.store
            .users
            .create(&NewUser {
                email: email.to_string(),
                password_hash: hash_password(password).expect("hashing should succeed"),
                role: role.to_string(),
                full_name: "Login User".to_string(),
            })
            .await
            .expect("seeding a user should succeed")
    }

    pub async fn deactivate(&self, user: &User) {
        let changes = UserChanges {
            is_active: Some(false),
            ..Default::default()
        };
        self.store
            .users
            .update(user.id, &changes)
            .await
            .expect("update should succeed")
            .expect("user should exist");
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.role, &self.config.jwt)
            .expect("token generation should succeed")
    }

    /// Seed a trainer and return it with a valid token.
    pub async fn trainer(&self, email: &str, full_name: &str) -> (User, String) {
        let user = self.seed_user(email, "trainer", full_name).await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn admin(&self) -> (User, String) {
        let user = self.seed_user("admin@sanse.test", "admin", "Club Admin").await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request should build");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> Response {
        self.request(Method::POST, uri, Some(body), token).await
    }

    pub async fn put_json(&self, uri: &str, body: Value, token: Option<&str>) -> Response {
        self.request(Method::PUT, uri, Some(body), token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::DELETE, uri, None, token).await
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Create a category through the API and return its id.
pub async fn create_category(app: &TestApp, token: &str, name: &str) -> i64 {
    let response = app
        .post_json("/api/categories", serde_json::json!({ "name": name }), Some(token))
        .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("category id")
}

/// Create an exercise through the API and return its id.
pub async fn create_exercise(app: &TestApp, token: &str, name: &str, category_id: i64) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "description": "Bajar con la espalda recta",
        "estimatedTime": 10,
        "categoryId": category_id,
    });
    let response = app.post_json("/api/exercises", body, Some(token)).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("exercise id")
}

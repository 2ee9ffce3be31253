//! Shared helpers for HTTP-level tests.
//!
//! Each `TestApp` owns a fresh in-memory backend; no database is needed.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use eduhub_api::{AppState, build_app};
use eduhub_auth::PasswordHasher;
use eduhub_core::config::{AppConfig, AuthConfig, DatabaseBackend};
use eduhub_database::Stores;
use eduhub_entity::user::{CreateUser, UserRole};

/// A password that satisfies the registration policy.
pub const PASSWORD: &str = "Quartz-Lantern-88!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for seeding
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// `body.code`, for error responses.
    pub fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }

    /// `body.data.access_token`, for login and refresh responses.
    pub fn access_token(&self) -> String {
        self.body["data"]["access_token"]
            .as_str()
            .expect("response has no access token")
            .to_string()
    }

    /// `name=value` of the refresh cookie, ready for a `Cookie` header.
    pub fn refresh_cookie(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .expect("response set no cookie")
            .to_string()
    }
}

/// Configuration with valid secrets, the memory backend and no rate limit.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig {
        environment: "test".to_string(),
        auth: AuthConfig {
            jwt_secret: "test-access-secret-0123456789abcdef".to_string(),
            jwt_refresh_secret: "test-refresh-secret-0123456789abcdef".to_string(),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    };
    config.database.backend = DatabaseBackend::Memory;
    config.rate_limit.enabled = false;
    config
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        config.validate().expect("test config must be valid");
        let stores = Stores::memory();
        let state = AppState::new(config.clone(), &stores).expect("Failed to build state");
        Self {
            router: build_app(state),
            stores,
            config,
        }
    }

    /// Send a request with optional JSON body, bearer token and cookie.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// Send a request with optional JSON body and bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, None).await
    }

    /// Register a principal through the API.
    pub async fn register(&self, email: &str, role: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": email,
                "name": "Test User",
                "password": PASSWORD,
                "role": role,
            })),
            None,
        )
        .await
    }

    /// Log in through the API.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Log in through the API with a client-supplied `X-Forwarded-For`.
    pub async fn login_forwarded_for(
        &self,
        email: &str,
        password: &str,
        forwarded_for: &str,
    ) -> TestResponse {
        let body = json!({ "email": email, "password": password });
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", forwarded_for)
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.dispatch(req).await
    }

    /// Register, then log in, returning the login response.
    pub async fn register_and_login(&self, email: &str, role: &str) -> TestResponse {
        let registered = self.register(email, role).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        login
    }

    /// Exchange the refresh cookie from an earlier response for new tokens.
    pub async fn refresh(&self, cookie: &str) -> TestResponse {
        self.send("POST", "/api/auth/refresh", None, None, Some(cookie))
            .await
    }

    /// Register an institute admin, create their institute, and return a
    /// refreshed access token bound to it plus the institute id.
    pub async fn admin_with_institute(&self, email: &str, name: &str) -> (String, String) {
        let login = self.register_and_login(email, "institute_admin").await;
        let created = self
            .request(
                "POST",
                "/api/institutes",
                Some(json!({ "name": name, "institute_type": "school" })),
                Some(&login.access_token()),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
        let institute_id = created.body["data"]["id"]
            .as_str()
            .expect("institute id")
            .to_string();

        let refreshed = self.refresh(&login.refresh_cookie()).await;
        assert_eq!(refreshed.status, StatusCode::OK, "{:?}", refreshed.body);
        (refreshed.access_token(), institute_id)
    }

    /// Insert a platform administrator directly and log them in.
    pub async fn super_admin_token(&self) -> String {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("hash");
        self.stores
            .users
            .create(&CreateUser {
                email: "root@eduhub.io".to_string(),
                name: "Platform Admin".to_string(),
                password_hash,
                role: UserRole::SuperAdmin,
            })
            .await
            .expect("seed super admin");

        let login = self.login("root@eduhub.io", PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        login.access_token()
    }
}

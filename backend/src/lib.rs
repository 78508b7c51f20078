//! # Cash Statements Backend
//!
//! HTTP service for user accounts and cash-denomination statements.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Frontend form
//!     ↓
//! IO Layer (REST API, handlers, bearer-token extractor)
//!     ↓
//! Domain Layer (statement, denomination and auth services)
//!     ↓
//! Storage Layer (SQLite repositories behind storage traits)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{AuthService, DenominationService, StatementService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub statement_service: StatementService<DbConnection>,
    pub denomination_service: DenominationService<DbConnection>,
    pub auth_service: AuthService<DbConnection>,
}

impl AppState {
    pub fn new(db_conn: DbConnection, session_ttl_secs: u64) -> Self {
        let connection = Arc::new(db_conn);
        let denomination_service = DenominationService::new(connection.clone());
        let statement_service = StatementService::new(connection.clone(), denomination_service.clone());
        let auth_service = AuthService::new(connection, session_ttl_secs);

        Self {
            statement_service,
            denomination_service,
            auth_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url, config.seed_denominations).await?;

    info!("Setting up application state");
    Ok(AppState::new(db_conn, config.session_ttl_secs))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/auth/register", post(io::register))
        .route("/auth/login", post(io::login))
        .route("/auth/logout", post(io::logout))
        .route("/denominations", get(io::list_denominations))
        .route("/denominations/:id", get(io::get_denomination))
        .route("/statements", get(io::list_statements).post(io::create_statement))
        .route(
            "/statements/:id",
            get(io::get_statement)
                .put(io::update_statement)
                .delete(io::delete_statement),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn setup_router() -> Router {
        let (state, db) = test_support::setup_test_state().await;
        db.insert_test_denominations(&[(1, 100.0), (2, 1000.0), (3, 10.0)])
            .await
            .unwrap();
        create_router(state, "http://localhost:8080").unwrap()
    }

    async fn send(router: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register_and_login(router: &Router, email: &str) -> String {
        let (status, _) = send(
            router,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"email": email, "password": "long enough", "name": "Tester"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            router,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": email, "password": "long enough"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (status, created) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({
                "storeName": "X",
                "date": "2024-01-01",
                "totalAmount": 500,
                "denominationDetails": [{"denominationId": 1, "quantity": 5}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let statement_id = created["statementId"].as_i64().unwrap();

        let (status, list) = send(&router, "GET", "/api/statements", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"].as_i64(), Some(statement_id));
        assert_eq!(list[0]["storeName"], "X");
        assert_eq!(
            list[0]["denominations"],
            json!([{"denominationId": 1, "value": 100.0, "quantity": 5, "total": 500.0}])
        );
    }

    #[tokio::test]
    async fn test_unknown_denomination_names_the_id() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({
                "storeName": "X",
                "date": "2024-01-01",
                "totalAmount": 1,
                "denominationDetails": [{"denominationId": 999, "quantity": 1}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION");
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_statement_without_lines_lists_empty_array() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (status, _) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({"storeName": "Empty", "date": "2024-05-05", "totalAmount": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, list) = send(&router, "GET", "/api/statements", Some(&token), None).await;
        assert_eq!(list[0]["denominations"], json!([]));
    }

    #[tokio::test]
    async fn test_non_owner_update_and_delete_are_forbidden() {
        let router = setup_router().await;
        let owner = register_and_login(&router, "owner@example.com").await;
        let stranger = register_and_login(&router, "stranger@example.com").await;

        let (_, created) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&owner),
            Some(json!({
                "storeName": "X",
                "date": "2024-01-01",
                "totalAmount": 500,
                "denominationDetails": [{"denominationId": 1, "quantity": 5}]
            })),
        )
        .await;
        let uri = format!("/api/statements/{}", created["statementId"]);

        let (status, _) = send(
            &router,
            "PUT",
            &uri,
            Some(&stranger),
            Some(json!({"storeName": "Hijack", "date": "2024-01-01", "totalAmount": 1, "denominations": []})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&router, "DELETE", &uri, Some(&stranger), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, statement) = send(&router, "GET", &uri, Some(&owner), None).await;
        assert_eq!(statement["totalAmount"], json!(500.0));
        assert_eq!(statement["denominations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_round_trips_listed_lines() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (_, created) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({
                "storeName": "X",
                "date": "2024-01-01",
                "totalAmount": 520,
                "denominationDetails": [{"denominationId": 1, "quantity": 5}, {"denominationId": 3, "quantity": 2}]
            })),
        )
        .await;
        let uri = format!("/api/statements/{}", created["statementId"]);
        let (_, statement) = send(&router, "GET", &uri, Some(&token), None).await;

        let (status, body) = send(
            &router,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({
                "storeName": "X2",
                "date": "2024-01-02",
                "totalAmount": 520,
                "denominations": statement["denominations"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Statement updated successfully");

        let (_, updated) = send(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(updated["storeName"], "X2");
        assert_eq!(updated["denominations"], statement["denominations"]);
    }

    #[tokio::test]
    async fn test_delete_returns_prior_header() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (_, created) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({"storeName": "Gone", "date": "2024-01-01", "totalAmount": 10, "notes": "n"})),
        )
        .await;
        let uri = format!("/api/statements/{}", created["statementId"]);

        let (status, body) = send(&router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statement"]["storeName"], "Gone");
        assert_eq!(body["statement"]["notes"], "n");

        let (status, _) = send(&router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_statements_require_a_valid_token() {
        let router = setup_router().await;

        let (status, body) = send(&router, "GET", "/api/statements", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHENTICATED");

        let (status, body) = send(&router, "GET", "/api/statements", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (status, _) = send(&router, "POST", "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, "GET", "/api/statements", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_denominations_are_public_and_descending() {
        let router = setup_router().await;
        let (status, body) = send(&router, "GET", "/api/denominations", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": 2, "value": 1000.0}, {"id": 1, "value": 100.0}, {"id": 3, "value": 10.0}])
        );
    }

    #[tokio::test]
    async fn test_get_single_denomination() {
        let router = setup_router().await;

        let (status, body) = send(&router, "GET", "/api/denominations/2", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 2, "value": 1000.0}));

        let (status, body) = send(&router, "GET", "/api/denominations/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_negative_quantity_is_a_json_validation_error() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/statements",
            Some(&token),
            Some(json!({
                "storeName": "X",
                "date": "2024-01-01",
                "totalAmount": 100,
                "denominationDetails": [{"denominationId": 1, "quantity": -1}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION");
        assert!(body["error"].is_string());

        let (_, list) = send(&router, "GET", "/api/statements", Some(&token), None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_shape() {
        let router = setup_router().await;

        let (status, body) = send(&router, "POST", "/api/auth/login", None, Some(json!({"email": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION");

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .body(Body::from("not json"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "VALIDATION");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_a_json_validation_error() {
        let router = setup_router().await;
        let token = register_and_login(&router, "owner@example.com").await;

        for method in ["GET", "DELETE"] {
            let (status, body) = send(&router, method, "/api/statements/abc", Some(&token), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "VALIDATION");
        }

        let (status, body) = send(
            &router,
            "PUT",
            "/api/statements/abc",
            Some(&token),
            Some(json!({"storeName": "X", "date": "2024-01-01", "totalAmount": 1, "denominations": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION");
    }

    #[test]
    fn test_invalid_cors_origin_is_an_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (state, _db) = runtime.block_on(test_support::setup_test_state());
        assert!(create_router(state, "bad\norigin").is_err());
    }
}

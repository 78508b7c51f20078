//! # REST API for Accounts and Sessions

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::extract::AppJson;
use super::identity::AuthenticatedUser;
use crate::domain::commands::auth::{LoginCommand, RegisterCommand};
use crate::AppState;
use shared::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};

/// POST /api/auth/register
pub async fn register(State(state): State<AppState>, AppJson(request): AppJson<RegisterRequest>) -> impl IntoResponse {
    info!("POST /api/auth/register - email: {}", request.email);

    let command = RegisterCommand {
        email: request.email,
        password: request.password,
        name: request.name,
    };
    match state.auth_service.register(command).await {
        Ok(user_id) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                message: "User registered successfully".to_string(),
                user_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to register user: {}", e);
            e.into_response()
        }
    }
}

/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, AppJson(request): AppJson<LoginRequest>) -> impl IntoResponse {
    info!("POST /api/auth/login - email: {}", request.email);

    let command = LoginCommand {
        email: request.email,
        password: request.password,
    };
    match state.auth_service.login(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: result.token,
                user_id: result.user_id,
                name: result.name,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Login failed: {}", e);
            e.into_response()
        }
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("POST /api/auth/logout - user: {}", user.user_id);

    match state.auth_service.logout(&user.token).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Logged out".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to log out: {}", e);
            e.into_response()
        }
    }
}

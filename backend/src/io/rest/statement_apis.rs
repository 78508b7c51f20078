//! # REST API for Statements
//!
//! Endpoints for creating, listing, reading, updating and deleting statements.
//! Every endpoint requires a bearer token; read/update/delete are owner-only.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::extract::{AppJson, AppPath};
use super::identity::AuthenticatedUser;
use super::mappers::statement_mapper::StatementMapper;
use crate::domain::commands::statements::DeleteStatementCommand;
use crate::AppState;
use shared::{
    CreateStatementRequest, CreateStatementResponse, DeleteStatementResponse, MessageResponse,
    StatementView, UpdateStatementRequest,
};

/// POST /api/statements
pub async fn create_statement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(request): AppJson<CreateStatementRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/statements - user: {}, store: {}, lines: {}",
        user.user_id,
        request.store_name,
        request.denomination_details.len()
    );

    let command = StatementMapper::to_create_command(user.user_id, request);
    match state.statement_service.create_statement(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(CreateStatementResponse {
                message: "Statement created successfully".to_string(),
                statement_id: result.statement_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create statement: {}", e);
            e.into_response()
        }
    }
}

/// GET /api/statements
pub async fn list_statements(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/statements - user: {}", user.user_id);

    match state.statement_service.list_statements(user.user_id).await {
        Ok(statements) => {
            let views: Vec<StatementView> = statements.into_iter().map(StatementMapper::to_view_dto).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => {
            error!("Failed to list statements: {}", e);
            e.into_response()
        }
    }
}

/// GET /api/statements/:id
pub async fn get_statement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(statement_id): AppPath<i64>,
) -> impl IntoResponse {
    info!("GET /api/statements/{} - user: {}", statement_id, user.user_id);

    match state.statement_service.get_statement(user.user_id, statement_id).await {
        Ok(statement) => (StatusCode::OK, Json(StatementMapper::to_view_dto(statement))).into_response(),
        Err(e) => {
            error!("Failed to get statement {}: {}", statement_id, e);
            e.into_response()
        }
    }
}

/// PUT /api/statements/:id
pub async fn update_statement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(statement_id): AppPath<i64>,
    AppJson(request): AppJson<UpdateStatementRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/statements/{} - user: {}, lines: {}",
        statement_id,
        user.user_id,
        request.denominations.len()
    );

    let command = StatementMapper::to_update_command(user.user_id, statement_id, request);
    match state.statement_service.update_statement(command).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Statement updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update statement {}: {}", statement_id, e);
            e.into_response()
        }
    }
}

/// DELETE /api/statements/:id
pub async fn delete_statement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(statement_id): AppPath<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/statements/{} - user: {}", statement_id, user.user_id);

    let command = DeleteStatementCommand {
        owner_id: user.user_id,
        statement_id,
    };
    match state.statement_service.delete_statement(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteStatementResponse {
                message: result.success_message,
                statement: StatementMapper::to_header_dto(result.statement),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete statement {}: {}", statement_id, e);
            e.into_response()
        }
    }
}

//! # REST API for the Denomination Catalog

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::extract::AppPath;
use super::mappers::denomination_mapper::DenominationMapper;
use crate::AppState;
use shared::Denomination;

/// GET /api/denominations
pub async fn list_denominations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/denominations");

    match state.denomination_service.list_denominations().await {
        Ok(denominations) => {
            let dtos: Vec<Denomination> = denominations.into_iter().map(DenominationMapper::to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list denominations: {}", e);
            e.into_response()
        }
    }
}

/// GET /api/denominations/:id
pub async fn get_denomination(
    State(state): State<AppState>,
    AppPath(denomination_id): AppPath<i64>,
) -> impl IntoResponse {
    info!("GET /api/denominations/{}", denomination_id);

    match state.denomination_service.lookup(denomination_id).await {
        Ok(denomination) => (StatusCode::OK, Json(DenominationMapper::to_dto(denomination))).into_response(),
        Err(e) => {
            error!("Failed to look up denomination {}: {}", denomination_id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_state;

    #[tokio::test]
    async fn test_list_denominations_handler() {
        let (state, db) = setup_test_state().await;
        db.insert_test_denominations(&[(1, 100.0)]).await.unwrap();

        let response = list_denominations(State(state)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_denomination_handler() {
        let (state, db) = setup_test_state().await;
        db.insert_test_denominations(&[(1, 100.0)]).await.unwrap();

        let found = get_denomination(State(state.clone()), AppPath(1)).await;
        assert_eq!(found.into_response().status(), StatusCode::OK);

        let missing = get_denomination(State(state), AppPath(999)).await;
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}

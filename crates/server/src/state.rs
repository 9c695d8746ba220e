//! Whole-dataset snapshot endpoints.

use api_types::state::AppState as AppStateView;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, budgets, categories, server::ServerState, transactions};

pub async fn get(State(state): State<ServerState>) -> Result<Json<AppStateView>, ServerError> {
    let snapshot = state.engine.state().get().await?;
    Ok(Json(AppStateView {
        version: snapshot.version,
        categories: snapshot
            .categories
            .into_iter()
            .map(categories::map_category)
            .collect(),
        budgets: snapshot.budgets.into_iter().map(budgets::map_budget).collect(),
        transactions: snapshot
            .transactions
            .into_iter()
            .map(transactions::map_transaction)
            .collect(),
    }))
}

/// Rows are stored exactly as sent, ids and timestamps included.
pub async fn replace(
    State(state): State<ServerState>,
    payload: Result<Json<AppStateView>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let Json(payload) = payload?;
    let snapshot = engine::AppState {
        version: payload.version,
        categories: payload
            .categories
            .into_iter()
            .map(categories::unmap_category)
            .collect(),
        budgets: payload
            .budgets
            .into_iter()
            .map(budgets::unmap_budget)
            .collect(),
        transactions: payload
            .transactions
            .into_iter()
            .map(transactions::unmap_transaction)
            .collect(),
    };

    state.engine.state().replace(&snapshot).await?;
    Ok(StatusCode::NO_CONTENT)
}

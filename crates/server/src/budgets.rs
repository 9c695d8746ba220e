//! Budgets API endpoints.

use api_types::budget::{Budget as BudgetView, BudgetUpsert};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{CategoryType, UpsertBudgetCmd};

use crate::{ServerError, categories, server::ServerState, validate};

pub(crate) fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        month: budget.month,
        category_id: budget.category_id,
        amount_cents: budget.amount_cents,
        created_at: budget.created_at,
        updated_at: budget.updated_at,
    }
}

pub(crate) fn unmap_budget(budget: BudgetView) -> engine::Budget {
    engine::Budget {
        id: budget.id,
        month: budget.month,
        category_id: budget.category_id,
        amount_cents: budget.amount_cents,
        created_at: budget.created_at,
        updated_at: budget.updated_at,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state
        .engine
        .budgets()
        .list()
        .await?
        .into_iter()
        .map(map_budget)
        .collect();
    Ok(Json(budgets))
}

/// Budgets only exist for expense categories.
pub async fn upsert(
    State(state): State<ServerState>,
    payload: Result<Json<BudgetUpsert>, JsonRejection>,
) -> Result<Json<BudgetView>, ServerError> {
    let Json(payload) = payload?;
    let month = validate::month_key(&payload.month)?;
    let category_id = validate::required("categoryId", &payload.category_id)?;
    let amount_cents = validate::budget_amount(payload.amount_cents)?;

    let category = categories::referenced(&state, &category_id).await?;
    if category.category_type != CategoryType::Expense {
        return Err(ServerError::validation(
            "budgets require an expense category",
        ));
    }

    let budget = state
        .engine
        .budgets()
        .upsert(UpsertBudgetCmd::new(month, category_id, amount_cents))
        .await?;
    Ok(Json(map_budget(budget)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.budgets().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Categories API endpoints.

use api_types::category::{Category as CategoryView, CategoryCreate, CategoryType, CategoryUpdate};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{CreateCategoryCmd, EngineError, UpdateCategoryCmd};

use crate::{ServerError, server::ServerState, validate};

fn map_type(category_type: engine::CategoryType) -> CategoryType {
    match category_type {
        engine::CategoryType::Income => CategoryType::Income,
        engine::CategoryType::Expense => CategoryType::Expense,
    }
}

fn unmap_type(category_type: CategoryType) -> engine::CategoryType {
    match category_type {
        CategoryType::Income => engine::CategoryType::Income,
        CategoryType::Expense => engine::CategoryType::Expense,
    }
}

pub(crate) fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        category_type: map_type(category.category_type),
        name: category.name,
        description: category.description,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub(crate) fn unmap_category(category: CategoryView) -> engine::Category {
    engine::Category {
        id: category.id,
        category_type: unmap_type(category.category_type),
        name: category.name,
        description: category.description,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

/// Look up a category named in a request body. A miss is the caller's bad
/// reference, so it is a validation failure rather than a 404.
pub(crate) async fn referenced(
    state: &ServerState,
    category_id: &str,
) -> Result<engine::Category, ServerError> {
    match state.engine.categories().get(category_id).await {
        Ok(category) => Ok(category),
        Err(EngineError::KeyNotFound(_)) => Err(ServerError::validation(format!(
            "unknown category: {category_id}"
        ))),
        Err(err) => Err(err.into()),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .categories()
        .list()
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(categories))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.categories().get(&id).await?;
    Ok(Json(map_category(category)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CategoryCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let Json(payload) = payload?;
    let name = validate::required("name", &payload.name)?;
    let category_type = validate::category_type(&payload.category_type)?;
    let description = validate::optional(&payload.description);

    let category = state
        .engine
        .categories()
        .create(CreateCategoryCmd::new(category_type, name).description(description))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryUpdate>, JsonRejection>,
) -> Result<Json<CategoryView>, ServerError> {
    let Json(payload) = payload?;
    let cmd = UpdateCategoryCmd {
        name: payload
            .name
            .as_deref()
            .map(|name| validate::required("name", name))
            .transpose()?,
        description: payload.description.as_deref().map(validate::optional),
    };

    let category = state.engine.categories().update(&id, cmd).await?;
    Ok(Json(map_category(category)))
}

/// Refused with 409 while any budget or transaction still points at the
/// category.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let budgets = state.engine.budgets().list().await?;
    if budgets.iter().any(|budget| budget.category_id == id) {
        return Err(EngineError::Conflict(format!("category {id} has budgets")).into());
    }
    if state.engine.transactions().count_by_category(&id).await? > 0 {
        return Err(EngineError::Conflict(format!("category {id} has transactions")).into());
    }

    state.engine.categories().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

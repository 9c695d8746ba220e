//! Transactions API endpoints.

use api_types::transaction::{
    Transaction as TransactionView, TransactionCreate, TransactionKind, TransactionUpdate,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{CreateTransactionCmd, UpdateTransactionCmd};

use crate::{ServerError, categories, server::ServerState, validate};

fn map_kind(kind: engine::TransactionKind) -> TransactionKind {
    match kind {
        engine::TransactionKind::Income => TransactionKind::Income,
        engine::TransactionKind::Expense => TransactionKind::Expense,
    }
}

fn unmap_kind(kind: TransactionKind) -> engine::TransactionKind {
    match kind {
        TransactionKind::Income => engine::TransactionKind::Income,
        TransactionKind::Expense => engine::TransactionKind::Expense,
    }
}

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        date: tx.date,
        category_id: tx.category_id,
        amount_cents: tx.amount_cents,
        note: tx.note,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

pub(crate) fn unmap_transaction(tx: TransactionView) -> engine::Transaction {
    engine::Transaction {
        id: tx.id,
        kind: unmap_kind(tx.kind),
        date: tx.date,
        category_id: tx.category_id,
        amount_cents: tx.amount_cents,
        note: tx.note,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

/// The category must exist and its type must equal `kind`.
async fn check_category(
    state: &ServerState,
    kind: engine::TransactionKind,
    category_id: &str,
) -> Result<(), ServerError> {
    let category = categories::referenced(state, category_id).await?;
    if category.category_type != kind.category_type() {
        return Err(ServerError::validation(format!(
            "{} transaction cannot use a {} category",
            kind.as_str(),
            category.category_type.as_str()
        )));
    }
    Ok(())
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .transactions()
        .list()
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();
    Ok(Json(transactions))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transactions().get(&id).await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;
    let kind = validate::transaction_kind(&payload.kind)?;
    let date = validate::date_key(&payload.date)?;
    let category_id = validate::required("categoryId", &payload.category_id)?;
    let amount_cents = validate::transaction_amount(payload.amount_cents)?;
    let note = validate::optional(&payload.note);

    check_category(&state, kind, &category_id).await?;

    let tx = state
        .engine
        .transactions()
        .create(CreateTransactionCmd::new(kind, date, category_id, amount_cents).note(note))
        .await?;
    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

/// Only fields present in the body change. The kind/category pair that
/// results from the patch must still agree.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Json(payload) = payload?;
    let existing = state.engine.transactions().get(&id).await?;

    let cmd = UpdateTransactionCmd {
        kind: payload
            .kind
            .as_deref()
            .map(validate::transaction_kind)
            .transpose()?,
        date: payload.date.as_deref().map(validate::date_key).transpose()?,
        category_id: payload
            .category_id
            .as_deref()
            .map(|raw| validate::required("categoryId", raw))
            .transpose()?,
        amount_cents: payload
            .amount_cents
            .map(validate::transaction_amount)
            .transpose()?,
        note: payload.note.as_deref().map(validate::optional),
    };

    let kind = cmd.kind.unwrap_or(existing.kind);
    let category_id = cmd.category_id.as_deref().unwrap_or(&existing.category_id);
    check_category(&state, kind, category_id).await?;

    let tx = state.engine.transactions().update(&id, cmd).await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.transactions().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

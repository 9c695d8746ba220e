use chrono::{TimeZone, Utc};
use engine::{
    APP_STATE_VERSION, AppState, Budget, Category, CategoryType, CreateCategoryCmd, EngineError,
    Transaction, TransactionKind,
};

mod common;

use common::engine_with_db;

fn snapshot() -> AppState {
    let at = Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap();
    let category = |id: &str, category_type, name: &str| Category {
        id: id.to_string(),
        category_type,
        name: name.to_string(),
        description: String::new(),
        created_at: at,
        updated_at: at,
    };
    AppState {
        version: APP_STATE_VERSION,
        categories: vec![
            category("c-food", CategoryType::Expense, "Food"),
            category("c-pay", CategoryType::Income, "Pay"),
        ],
        budgets: vec![Budget {
            id: "b-1".to_string(),
            month: "2025-12".to_string(),
            category_id: "c-food".to_string(),
            amount_cents: 30_000,
            created_at: at,
            updated_at: at,
        }],
        transactions: vec![Transaction {
            id: "t-1".to_string(),
            kind: TransactionKind::Income,
            date: "2025-12-01".to_string(),
            category_id: "c-pay".to_string(),
            amount_cents: 250_000,
            note: "december".to_string(),
            created_at: at,
            updated_at: at,
        }],
    }
}

#[tokio::test]
async fn replace_then_get_round_trips() {
    let (engine, _db) = engine_with_db().await;
    engine
        .categories()
        .create(CreateCategoryCmd::new(CategoryType::Expense, "Old"))
        .await
        .unwrap();

    let state = snapshot();
    engine.state().replace(&state).await.unwrap();

    assert_eq!(engine.state().get().await.unwrap(), state);
}

#[tokio::test]
async fn replace_clears_tables_that_reference_each_other() {
    let (engine, _db) = engine_with_db().await;
    engine.state().replace(&snapshot()).await.unwrap();

    let empty = AppState {
        version: APP_STATE_VERSION,
        categories: Vec::new(),
        budgets: Vec::new(),
        transactions: Vec::new(),
    };
    engine.state().replace(&empty).await.unwrap();

    assert_eq!(engine.state().get().await.unwrap(), empty);
}

#[tokio::test]
async fn bad_row_rolls_back_everything() {
    let (engine, _db) = engine_with_db().await;
    let kept = engine
        .categories()
        .create(CreateCategoryCmd::new(CategoryType::Expense, "Kept"))
        .await
        .unwrap();

    let mut state = snapshot();
    state.transactions[0].category_id = "ghost".to_string();

    let err = engine.state().replace(&state).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let current = engine.state().get().await.unwrap();
    assert_eq!(current.categories, vec![kept]);
    assert!(current.budgets.is_empty());
    assert!(current.transactions.is_empty());
}

#[tokio::test]
async fn duplicate_ids_conflict() {
    let (engine, _db) = engine_with_db().await;

    let mut state = snapshot();
    let twin = state.categories[0].clone();
    state.categories.push(twin);

    assert!(matches!(
        engine.state().replace(&state).await,
        Err(EngineError::Conflict(_))
    ));
}

#[tokio::test]
async fn unsupported_version() {
    let (engine, _db) = engine_with_db().await;
    let mut state = snapshot();
    state.version = 2;

    assert!(matches!(
        engine.state().replace(&state).await,
        Err(EngineError::Validation(_))
    ));
}

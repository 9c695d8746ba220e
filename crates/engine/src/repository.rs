//! Repository contracts.
//!
//! Services depend only on these traits. [`crate::store`] provides the
//! sea-orm implementations and [`crate::memory`] an in-memory double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseTransaction;

use crate::{Budget, Category, ResultEngine, Transaction, TransactionKind};

/// Fields to change on a category. `updated_at` is always written.
#[derive(Clone, Debug)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to change on a transaction. `updated_at` is always written.
#[derive(Clone, Debug)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub date: Option<String>,
    pub category_id: Option<String>,
    pub amount_cents: Option<i64>,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Whole-table reset and reload, run inside a caller-owned database
/// transaction so several tables can be replaced atomically.
#[async_trait]
pub trait BulkLoadable<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Remove every row. Returns the number of rows removed.
    async fn reset(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64>;

    /// Insert `items` as given, keeping their ids and timestamps.
    async fn load(&self, db_tx: &DatabaseTransaction, items: &[T]) -> ResultEngine<()>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, oldest first.
    async fn list(&self) -> ResultEngine<Vec<Category>>;

    async fn get(&self, id: &str) -> ResultEngine<Category>;

    async fn create(&self, category: &Category) -> ResultEngine<Category>;

    async fn update(&self, id: &str, patch: CategoryPatch) -> ResultEngine<Category>;

    /// Fails with `Conflict` when the store still has rows referencing `id`.
    async fn delete(&self, id: &str) -> ResultEngine<()>;

    /// Bulk reset/load support, if this store has it.
    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Category>> {
        None
    }
}

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// All budgets, oldest first.
    async fn list(&self) -> ResultEngine<Vec<Budget>>;

    async fn get(&self, id: &str) -> ResultEngine<Budget>;

    async fn find_by_month_category(
        &self,
        month: &str,
        category_id: &str,
    ) -> ResultEngine<Option<Budget>>;

    /// Insert, or on a `(month, category_id)` clash overwrite `amount_cents`
    /// and `updated_at` of the stored row. Returns the committed row.
    async fn upsert(&self, budget: &Budget) -> ResultEngine<Budget>;

    async fn delete(&self, id: &str) -> ResultEngine<()>;

    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Budget>> {
        None
    }
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// All transactions, oldest first.
    async fn list(&self) -> ResultEngine<Vec<Transaction>>;

    async fn get(&self, id: &str) -> ResultEngine<Transaction>;

    async fn create(&self, tx: &Transaction) -> ResultEngine<Transaction>;

    async fn update(&self, id: &str, patch: TransactionPatch) -> ResultEngine<Transaction>;

    async fn delete(&self, id: &str) -> ResultEngine<()>;

    async fn count_by_category(&self, category_id: &str) -> ResultEngine<u64>;

    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Transaction>> {
        None
    }
}

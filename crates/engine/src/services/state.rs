//! Whole-dataset snapshot and replace.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::{
    Budget, BudgetRepository, BulkLoadable, Category, CategoryRepository, EngineError,
    ResultEngine, Transaction, TransactionRepository,
};

use super::with_tx;

/// The only snapshot format this engine reads and writes.
pub const APP_STATE_VERSION: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub version: i64,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
}

pub struct StateService {
    database: DatabaseConnection,
    categories: Arc<dyn CategoryRepository>,
    budgets: Arc<dyn BudgetRepository>,
    transactions: Arc<dyn TransactionRepository>,
}

struct Loaders<'a> {
    categories: &'a dyn BulkLoadable<Category>,
    budgets: &'a dyn BulkLoadable<Budget>,
    transactions: &'a dyn BulkLoadable<Transaction>,
}

impl StateService {
    pub fn new(
        database: DatabaseConnection,
        categories: Arc<dyn CategoryRepository>,
        budgets: Arc<dyn BudgetRepository>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            database,
            categories,
            budgets,
            transactions,
        }
    }

    /// Reads the three lists one after the other. Concurrent writers may
    /// land between the reads.
    pub async fn get(&self) -> ResultEngine<AppState> {
        Ok(AppState {
            version: APP_STATE_VERSION,
            categories: self.categories.list().await?,
            budgets: self.budgets.list().await?,
            transactions: self.transactions.list().await?,
        })
    }

    /// Replaces every row of the three tables with `state`, all or nothing.
    ///
    /// Rows are cleared children first and loaded parents first inside one
    /// database transaction. The first failing row aborts and rolls back the
    /// whole replace.
    pub async fn replace(&self, state: &AppState) -> ResultEngine<()> {
        if state.version != APP_STATE_VERSION {
            return Err(EngineError::Validation(format!(
                "unsupported state version: {}",
                state.version
            )));
        }
        let loaders = self.loaders()?;

        with_tx!(self, |db_tx| {
            let removed = Self::reset_all(&loaders, &db_tx).await?;
            loaders.categories.load(&db_tx, &state.categories).await?;
            loaders.budgets.load(&db_tx, &state.budgets).await?;
            loaders
                .transactions
                .load(&db_tx, &state.transactions)
                .await?;
            tracing::info!(
                removed,
                categories = state.categories.len(),
                budgets = state.budgets.len(),
                transactions = state.transactions.len(),
                "state replaced"
            );
            Ok::<(), EngineError>(())
        })
    }

    fn loaders(&self) -> ResultEngine<Loaders<'_>> {
        match (
            self.categories.bulk_loader(),
            self.budgets.bulk_loader(),
            self.transactions.bulk_loader(),
        ) {
            (Some(categories), Some(budgets), Some(transactions)) => Ok(Loaders {
                categories,
                budgets,
                transactions,
            }),
            _ => Err(EngineError::Conflict(
                "state replace is not supported by this store".to_string(),
            )),
        }
    }

    async fn reset_all(loaders: &Loaders<'_>, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let mut removed = loaders.transactions.reset(db_tx).await?;
        removed += loaders.budgets.reset(db_tx).await?;
        removed += loaders.categories.reset(db_tx).await?;
        Ok(removed)
    }
}

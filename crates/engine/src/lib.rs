//! Budgeting engine: categories, monthly budgets and transactions on top of
//! a sea-orm store, plus whole-dataset snapshot/replace.
//!
//! Use [`Engine::builder`] to wire the services to a database.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use budgets::Budget;
pub use categories::{Category, CategoryType};
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{
    CreateCategoryCmd, CreateTransactionCmd, UpdateCategoryCmd, UpdateTransactionCmd,
    UpsertBudgetCmd,
};
pub use error::EngineError;
pub use ids::{IdGenerator, RandomHexIds, SequentialIds};
pub use repository::{
    BudgetRepository, BulkLoadable, CategoryPatch, CategoryRepository, TransactionPatch,
    TransactionRepository,
};
pub use services::{
    APP_STATE_VERSION, AppState, BudgetService, CategoryService, StateService, TransactionService,
};
pub use transactions::{Transaction, TransactionKind};

mod budgets;
mod categories;
mod clock;
mod commands;
mod error;
mod ids;
pub mod memory;
mod repository;
mod services;
pub mod store;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Entry point bundling the entity services and the state service over one
/// set of repositories.
pub struct Engine {
    categories: CategoryService,
    budgets: BudgetService,
    transactions: TransactionService,
    state: StateService,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn budgets(&self) -> &BudgetService {
        &self.budgets
    }

    pub fn transactions(&self) -> &TransactionService {
        &self.transactions
    }

    pub fn state(&self) -> &StateService {
        &self.state
    }
}

/// Repositories the engine runs on. Defaults to the sea-orm store.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub budgets: Arc<dyn BudgetRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
}

impl Repositories {
    pub fn sea_orm(database: &DatabaseConnection) -> Self {
        Self {
            categories: Arc::new(store::SeaOrmCategoryRepository::new(database.clone())),
            budgets: Arc::new(store::SeaOrmBudgetRepository::new(database.clone())),
            transactions: Arc::new(store::SeaOrmTransactionRepository::new(database.clone())),
        }
    }

    /// In-memory repositories. State replace is unavailable on these.
    pub fn memory() -> Self {
        Self {
            categories: Arc::new(memory::MemoryCategoryRepository::default()),
            budgets: Arc::new(memory::MemoryBudgetRepository::default()),
            transactions: Arc::new(memory::MemoryTransactionRepository::default()),
        }
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    repositories: Option<Repositories>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the wall clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> EngineBuilder {
        self.clock = Some(clock);
        self
    }

    /// Override the id source.
    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> EngineBuilder {
        self.ids = Some(ids);
        self
    }

    /// Run on custom repositories instead of the sea-orm store.
    pub fn repositories(mut self, repositories: Repositories) -> EngineBuilder {
        self.repositories = Some(repositories);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self.ids.unwrap_or_else(|| Arc::new(RandomHexIds));
        let repos = self
            .repositories
            .unwrap_or_else(|| Repositories::sea_orm(&self.database));

        Engine {
            categories: CategoryService::new(clock.clone(), ids.clone(), repos.categories.clone()),
            budgets: BudgetService::new(clock.clone(), ids.clone(), repos.budgets.clone()),
            transactions: TransactionService::new(clock, ids, repos.transactions.clone()),
            state: StateService::new(
                self.database,
                repos.categories,
                repos.budgets,
                repos.transactions,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_engine_serves_crud_but_not_replace() {
        let engine = Engine::builder()
            .repositories(Repositories::memory())
            .ids(Arc::new(SequentialIds::default()))
            .build();

        let category = engine
            .categories()
            .create(CreateCategoryCmd::new(CategoryType::Expense, "Rent"))
            .await
            .unwrap();
        assert_eq!(category.id, "id-1");

        let snapshot = engine.state().get().await.unwrap();
        assert_eq!(snapshot.categories, vec![category]);
        assert!(matches!(
            engine.state().replace(&snapshot).await,
            Err(EngineError::Conflict(_))
        ));
    }
}

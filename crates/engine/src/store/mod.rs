//! Relational store backed by sea-orm.
//!
//! Each repository owns a clone of the pooled [`DatabaseConnection`] and
//! translates `DbErr` into [`crate::EngineError`].

use sea_orm::DatabaseConnection;

mod budgets;
mod categories;
mod transactions;

#[derive(Clone, Debug)]
pub struct SeaOrmCategoryRepository {
    database: DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct SeaOrmBudgetRepository {
    database: DatabaseConnection,
}

#[derive(Clone, Debug)]
pub struct SeaOrmTransactionRepository {
    database: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

impl SeaOrmBudgetRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

impl SeaOrmTransactionRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

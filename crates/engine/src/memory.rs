//! In-memory repositories.
//!
//! Used to exercise services without a database. They keep rows in insertion
//! order, enforce primary-key and `(month, category_id)` uniqueness, and do
//! not offer a bulk loader, so a state replace against them is rejected.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    Budget, BudgetRepository, Category, CategoryPatch, CategoryRepository, EngineError,
    ResultEngine, Transaction, TransactionPatch, TransactionRepository,
};

fn lock<T>(rows: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    rows.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct MemoryCategoryRepository {
    rows: Mutex<Vec<Category>>,
}

#[derive(Debug, Default)]
pub struct MemoryBudgetRepository {
    rows: Mutex<Vec<Budget>>,
}

#[derive(Debug, Default)]
pub struct MemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn list(&self) -> ResultEngine<Vec<Category>> {
        Ok(lock(&self.rows).clone())
    }

    async fn get(&self, id: &str) -> ResultEngine<Category> {
        lock(&self.rows)
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }

    async fn create(&self, category: &Category) -> ResultEngine<Category> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|c| c.id == category.id) {
            return Err(EngineError::Conflict("category already exists".to_string()));
        }
        rows.push(category.clone());
        Ok(category.clone())
    }

    async fn update(&self, id: &str, patch: CategoryPatch) -> ResultEngine<Category> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        row.updated_at = patch.updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetRepository for MemoryBudgetRepository {
    async fn list(&self) -> ResultEngine<Vec<Budget>> {
        Ok(lock(&self.rows).clone())
    }

    async fn get(&self, id: &str) -> ResultEngine<Budget> {
        lock(&self.rows)
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }

    async fn find_by_month_category(
        &self,
        month: &str,
        category_id: &str,
    ) -> ResultEngine<Option<Budget>> {
        Ok(lock(&self.rows)
            .iter()
            .find(|b| b.month == month && b.category_id == category_id)
            .cloned())
    }

    async fn upsert(&self, budget: &Budget) -> ResultEngine<Budget> {
        let mut rows = lock(&self.rows);
        if let Some(row) = rows
            .iter_mut()
            .find(|b| b.month == budget.month && b.category_id == budget.category_id)
        {
            row.amount_cents = budget.amount_cents;
            row.updated_at = budget.updated_at;
            return Ok(row.clone());
        }
        if rows.iter().any(|b| b.id == budget.id) {
            return Err(EngineError::Conflict("budget already exists".to_string()));
        }
        rows.push(budget.clone());
        Ok(budget.clone())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|b| b.id != id);
        if rows.len() == before {
            return Err(EngineError::KeyNotFound("budget not exists".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for MemoryTransactionRepository {
    async fn list(&self) -> ResultEngine<Vec<Transaction>> {
        Ok(lock(&self.rows).clone())
    }

    async fn get(&self, id: &str) -> ResultEngine<Transaction> {
        lock(&self.rows)
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }

    async fn create(&self, tx: &Transaction) -> ResultEngine<Transaction> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|t| t.id == tx.id) {
            return Err(EngineError::Conflict(
                "transaction already exists".to_string(),
            ));
        }
        rows.push(tx.clone());
        Ok(tx.clone())
    }

    async fn update(&self, id: &str, patch: TransactionPatch) -> ResultEngine<Transaction> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        if let Some(kind) = patch.kind {
            row.kind = kind;
        }
        if let Some(date) = patch.date {
            row.date = date;
        }
        if let Some(category_id) = patch.category_id {
            row.category_id = category_id;
        }
        if let Some(amount_cents) = patch.amount_cents {
            row.amount_cents = amount_cents;
        }
        if let Some(note) = patch.note {
            row.note = note;
        }
        row.updated_at = patch.updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(())
    }

    async fn count_by_category(&self, category_id: &str) -> ResultEngine<u64> {
        Ok(lock(&self.rows)
            .iter()
            .filter(|t| t.category_id == category_id)
            .count() as u64)
    }
}

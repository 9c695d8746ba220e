use std::sync::Arc;

use crate::{Budget, BudgetRepository, Clock, IdGenerator, ResultEngine, UpsertBudgetCmd};

use super::trimmed;

pub struct BudgetService {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    budgets: Arc<dyn BudgetRepository>,
}

impl BudgetService {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        budgets: Arc<dyn BudgetRepository>,
    ) -> Self {
        Self {
            clock,
            ids,
            budgets,
        }
    }

    /// All budgets, oldest first.
    pub async fn list(&self) -> ResultEngine<Vec<Budget>> {
        self.budgets.list().await
    }

    /// Creates the budget for `(month, category_id)` or overwrites the amount
    /// of the existing one, keeping its id and `created_at`.
    ///
    /// Lookup and write are two round-trips; a racing writer is settled by
    /// the store's unique key, not by locking here.
    pub async fn upsert(&self, cmd: UpsertBudgetCmd) -> ResultEngine<Budget> {
        let month = trimmed(&cmd.month);
        let category_id = trimmed(&cmd.category_id);
        let now = self.clock.now();

        let budget = match self
            .budgets
            .find_by_month_category(&month, &category_id)
            .await?
        {
            Some(existing) => Budget {
                amount_cents: cmd.amount_cents,
                updated_at: now,
                ..existing
            },
            None => Budget {
                id: self.ids.new_id(),
                month,
                category_id,
                amount_cents: cmd.amount_cents,
                created_at: now,
                updated_at: now,
            },
        };

        let stored = self.budgets.upsert(&budget).await?;
        tracing::debug!(id = %stored.id, month = %stored.month, "budget upserted");
        Ok(stored)
    }

    pub async fn delete(&self, id: &str) -> ResultEngine<()> {
        self.budgets.delete(id).await?;
        tracing::debug!(id, "budget deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{EngineError, FixedClock, SequentialIds, memory::MemoryBudgetRepository};

    #[tokio::test]
    async fn second_upsert_keeps_id_and_created_at() {
        let first_at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let repo: Arc<dyn BudgetRepository> = Arc::new(MemoryBudgetRepository::default());
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIds::default());

        let service = BudgetService::new(Arc::new(FixedClock(first_at)), ids.clone(), repo.clone());
        let first = service
            .upsert(UpsertBudgetCmd::new("2026-01", "cat-expense", 40_000))
            .await
            .unwrap();

        let later = first_at + Duration::days(1);
        let service = BudgetService::new(Arc::new(FixedClock(later)), ids, repo);
        let second = service
            .upsert(UpsertBudgetCmd::new("2026-01", "cat-expense", 50_000))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.amount_cents, 50_000);
        assert_eq!(second.created_at, first_at);
        assert_eq!(second.updated_at, later);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn different_months_get_different_rows() {
        let service = BudgetService::new(
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialIds::default()),
            Arc::new(MemoryBudgetRepository::default()),
        );

        let jan = service
            .upsert(UpsertBudgetCmd::new("2026-01", "c", 0))
            .await
            .unwrap();
        let feb = service
            .upsert(UpsertBudgetCmd::new("2026-02", "c", 0))
            .await
            .unwrap();

        assert_ne!(jan.id, feb.id);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let service = BudgetService::new(
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialIds::default()),
            Arc::new(MemoryBudgetRepository::default()),
        );

        assert!(matches!(
            service.delete("unknown-id").await,
            Err(EngineError::KeyNotFound(_))
        ));
    }
}

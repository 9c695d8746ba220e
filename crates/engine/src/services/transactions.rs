use std::sync::Arc;

use crate::{
    Clock, CreateTransactionCmd, IdGenerator, ResultEngine, Transaction, TransactionPatch,
    TransactionRepository, UpdateTransactionCmd,
};

use super::trimmed;

pub struct TransactionService {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    transactions: Arc<dyn TransactionRepository>,
}

impl TransactionService {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            clock,
            ids,
            transactions,
        }
    }

    /// All transactions, oldest first.
    pub async fn list(&self) -> ResultEngine<Vec<Transaction>> {
        self.transactions.list().await
    }

    pub async fn get(&self, id: &str) -> ResultEngine<Transaction> {
        self.transactions.get(id).await
    }

    /// Number of transactions booked against `category_id`.
    pub async fn count_by_category(&self, category_id: &str) -> ResultEngine<u64> {
        self.transactions.count_by_category(category_id).await
    }

    pub async fn create(&self, cmd: CreateTransactionCmd) -> ResultEngine<Transaction> {
        let now = self.clock.now();
        let tx = Transaction {
            id: self.ids.new_id(),
            kind: cmd.kind,
            date: trimmed(&cmd.date),
            category_id: trimmed(&cmd.category_id),
            amount_cents: cmd.amount_cents,
            note: trimmed(&cmd.note),
            created_at: now,
            updated_at: now,
        };
        let created = self.transactions.create(&tx).await?;
        tracing::debug!(id = %created.id, kind = created.kind.as_str(), "transaction created");
        Ok(created)
    }

    /// Patch semantics: only supplied fields change, `updated_at` always does.
    pub async fn update(
        &self,
        id: &str,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        let patch = TransactionPatch {
            kind: cmd.kind,
            date: cmd.date.as_deref().map(trimmed),
            category_id: cmd.category_id.as_deref().map(trimmed),
            amount_cents: cmd.amount_cents,
            note: cmd.note.as_deref().map(trimmed),
            updated_at: self.clock.now(),
        };
        let updated = self.transactions.update(id, patch).await?;
        tracing::debug!(id, "transaction updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ResultEngine<()> {
        self.transactions.delete(id).await?;
        tracing::debug!(id, "transaction deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        FixedClock, SequentialIds, TransactionKind, memory::MemoryTransactionRepository,
    };

    #[tokio::test]
    async fn update_patches_only_present_fields() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let repo: Arc<dyn TransactionRepository> =
            Arc::new(MemoryTransactionRepository::default());
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIds::default());

        let service =
            TransactionService::new(Arc::new(FixedClock(created_at)), ids.clone(), repo.clone());
        let tx = service
            .create(
                CreateTransactionCmd::new(TransactionKind::Expense, "2026-01-05", "groceries", 1500)
                    .note(" weekly shop "),
            )
            .await
            .unwrap();
        assert_eq!(tx.note, "weekly shop");

        let later = created_at + Duration::hours(1);
        let service = TransactionService::new(Arc::new(FixedClock(later)), ids, repo);
        let updated = service
            .update(
                &tx.id,
                UpdateTransactionCmd {
                    amount_cents: Some(1800),
                    note: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount_cents, 1800);
        assert_eq!(updated.note, "");
        assert_eq!(updated.date, "2026-01-05");
        assert_eq!(updated.kind, TransactionKind::Expense);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[tokio::test]
    async fn counts_by_category() {
        let service = TransactionService::new(
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialIds::default()),
            Arc::new(MemoryTransactionRepository::default()),
        );
        for category in ["a", "a", "b"] {
            service
                .create(CreateTransactionCmd::new(
                    TransactionKind::Income,
                    "2026-01-01",
                    category,
                    100,
                ))
                .await
                .unwrap();
        }

        assert_eq!(service.count_by_category("a").await.unwrap(), 2);
        assert_eq!(service.count_by_category("c").await.unwrap(), 0);
    }
}

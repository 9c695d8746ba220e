use async_trait::async_trait;
use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, prelude::*,
};

use crate::{
    BulkLoadable, EngineError, ResultEngine, Transaction, TransactionPatch,
    TransactionRepository, transactions,
};

use super::SeaOrmTransactionRepository;

#[async_trait]
impl TransactionRepository for SeaOrmTransactionRepository {
    async fn list(&self) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn get(&self, id: &str) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        Transaction::try_from(model)
    }

    async fn create(&self, tx: &Transaction) -> ResultEngine<Transaction> {
        transactions::Entity::insert(transactions::ActiveModel::from(tx))
            .exec_without_returning(&self.database)
            .await
            .map_err(|err| EngineError::on_write(err, "transaction"))?;
        self.get(&tx.id).await
    }

    async fn update(&self, id: &str, patch: TransactionPatch) -> ResultEngine<Transaction> {
        let active = transactions::ActiveModel {
            kind: patch
                .kind
                .map_or(ActiveValue::NotSet, |kind| {
                    ActiveValue::Set(kind.as_str().to_string())
                }),
            date: patch.date.map_or(ActiveValue::NotSet, ActiveValue::Set),
            category_id: patch
                .category_id
                .map_or(ActiveValue::NotSet, ActiveValue::Set),
            amount_cents: patch
                .amount_cents
                .map_or(ActiveValue::NotSet, ActiveValue::Set),
            note: patch.note.map_or(ActiveValue::NotSet, ActiveValue::Set),
            updated_at: ActiveValue::Set(patch.updated_at),
            ..Default::default()
        };
        let res = transactions::Entity::update_many()
            .set(active)
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.database)
            .await
            .map_err(|err| EngineError::on_write(err, "transaction"))?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let res = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await
            .map_err(|err| EngineError::on_delete(err, "transaction"))?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(())
    }

    async fn count_by_category(&self, category_id: &str) -> ResultEngine<u64> {
        Ok(transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(category_id))
            .count(&self.database)
            .await?)
    }

    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Transaction>> {
        Some(self)
    }
}

#[async_trait]
impl BulkLoadable<Transaction> for SeaOrmTransactionRepository {
    async fn reset(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let res = transactions::Entity::delete_many().exec(db_tx).await?;
        Ok(res.rows_affected)
    }

    async fn load(
        &self,
        db_tx: &DatabaseTransaction,
        items: &[Transaction],
    ) -> ResultEngine<()> {
        for tx in items {
            transactions::Entity::insert(transactions::ActiveModel::from(tx))
                .exec_without_returning(db_tx)
                .await
                .map_err(|err| EngineError::on_write(err, "transaction"))?;
        }
        Ok(())
    }
}

use async_trait::async_trait;
use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, prelude::*, sea_query::OnConflict,
};

use crate::{Budget, BudgetRepository, BulkLoadable, EngineError, ResultEngine, budgets};

use super::SeaOrmBudgetRepository;

fn on_month_category_conflict() -> OnConflict {
    OnConflict::columns([budgets::Column::Month, budgets::Column::CategoryId])
        .update_columns([budgets::Column::AmountCents, budgets::Column::UpdatedAt])
        .to_owned()
}

#[async_trait]
impl BudgetRepository for SeaOrmBudgetRepository {
    async fn list(&self) -> ResultEngine<Vec<Budget>> {
        Ok(budgets::Entity::find()
            .order_by_asc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Budget::from)
            .collect())
    }

    async fn get(&self, id: &str) -> ResultEngine<Budget> {
        budgets::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Budget::from)
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }

    async fn find_by_month_category(
        &self,
        month: &str,
        category_id: &str,
    ) -> ResultEngine<Option<Budget>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::Month.eq(month))
            .filter(budgets::Column::CategoryId.eq(category_id))
            .one(&self.database)
            .await?
            .map(Budget::from))
    }

    async fn upsert(&self, budget: &Budget) -> ResultEngine<Budget> {
        // The unique (month, category_id) index arbitrates concurrent
        // upserts: the losing insert turns into an update of the winner.
        budgets::Entity::insert(budgets::ActiveModel::from(budget))
            .on_conflict(on_month_category_conflict())
            .exec_without_returning(&self.database)
            .await
            .map_err(|err| EngineError::on_write(err, "budget"))?;

        self.find_by_month_category(&budget.month, &budget.category_id)
            .await?
            .ok_or_else(|| {
                EngineError::Conflict(format!(
                    "budget for {} / {} vanished after upsert",
                    budget.month, budget.category_id
                ))
            })
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let res = budgets::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await
            .map_err(|err| EngineError::on_delete(err, "budget"))?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("budget not exists".to_string()));
        }
        Ok(())
    }

    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Budget>> {
        Some(self)
    }
}

#[async_trait]
impl BulkLoadable<Budget> for SeaOrmBudgetRepository {
    async fn reset(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let res = budgets::Entity::delete_many().exec(db_tx).await?;
        Ok(res.rows_affected)
    }

    async fn load(&self, db_tx: &DatabaseTransaction, items: &[Budget]) -> ResultEngine<()> {
        for budget in items {
            budgets::Entity::insert(budgets::ActiveModel::from(budget))
                .exec_without_returning(db_tx)
                .await
                .map_err(|err| EngineError::on_write(err, "budget"))?;
        }
        Ok(())
    }
}

use async_trait::async_trait;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{
    BulkLoadable, Category, CategoryPatch, CategoryRepository, EngineError, ResultEngine,
    categories,
};

use super::SeaOrmCategoryRepository;

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn list(&self) -> ResultEngine<Vec<Category>> {
        categories::Entity::find()
            .order_by_asc(categories::Column::CreatedAt)
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    async fn get(&self, id: &str) -> ResultEngine<Category> {
        let model = categories::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        Category::try_from(model)
    }

    async fn create(&self, category: &Category) -> ResultEngine<Category> {
        categories::Entity::insert(categories::ActiveModel::from(category))
            .exec_without_returning(&self.database)
            .await
            .map_err(|err| EngineError::on_write(err, "category"))?;
        self.get(&category.id).await
    }

    async fn update(&self, id: &str, patch: CategoryPatch) -> ResultEngine<Category> {
        let active = categories::ActiveModel {
            name: patch.name.map_or(ActiveValue::NotSet, ActiveValue::Set),
            description: patch
                .description
                .map_or(ActiveValue::NotSet, ActiveValue::Set),
            updated_at: ActiveValue::Set(patch.updated_at),
            ..Default::default()
        };
        let res = categories::Entity::update_many()
            .set(active)
            .filter(categories::Column::Id.eq(id))
            .exec(&self.database)
            .await
            .map_err(|err| EngineError::on_write(err, "category"))?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let res = categories::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await
            .map_err(|err| EngineError::on_delete(err, "category"))?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }
        Ok(())
    }

    fn bulk_loader(&self) -> Option<&dyn BulkLoadable<Category>> {
        Some(self)
    }
}

#[async_trait]
impl BulkLoadable<Category> for SeaOrmCategoryRepository {
    async fn reset(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let res = categories::Entity::delete_many()
            .exec(db_tx)
            .await
            .map_err(|err| EngineError::on_delete(err, "category"))?;
        Ok(res.rows_affected)
    }

    async fn load(&self, db_tx: &DatabaseTransaction, items: &[Category]) -> ResultEngine<()> {
        for category in items {
            categories::Entity::insert(categories::ActiveModel::from(category))
                .exec_without_returning(db_tx)
                .await
                .map_err(|err| EngineError::on_write(err, "category"))?;
        }
        Ok(())
    }
}

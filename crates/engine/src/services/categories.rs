use std::sync::Arc;

use crate::{
    Category, CategoryPatch, CategoryRepository, Clock, CreateCategoryCmd, IdGenerator,
    ResultEngine, UpdateCategoryCmd,
};

use super::trimmed;

pub struct CategoryService {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            clock,
            ids,
            categories,
        }
    }

    /// All categories, oldest first.
    pub async fn list(&self) -> ResultEngine<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get(&self, id: &str) -> ResultEngine<Category> {
        self.categories.get(id).await
    }

    /// Creates a category with a fresh id; both timestamps are set to now.
    pub async fn create(&self, cmd: CreateCategoryCmd) -> ResultEngine<Category> {
        let now = self.clock.now();
        let category = Category {
            id: self.ids.new_id(),
            category_type: cmd.category_type,
            name: trimmed(&cmd.name),
            description: trimmed(&cmd.description),
            created_at: now,
            updated_at: now,
        };
        let created = self.categories.create(&category).await?;
        tracing::debug!(id = %created.id, "category created");
        Ok(created)
    }

    /// Applies the supplied fields and refreshes `updated_at`.
    pub async fn update(&self, id: &str, cmd: UpdateCategoryCmd) -> ResultEngine<Category> {
        let patch = CategoryPatch {
            name: cmd.name.as_deref().map(trimmed),
            description: cmd.description.as_deref().map(trimmed),
            updated_at: self.clock.now(),
        };
        let updated = self.categories.update(id, patch).await?;
        tracing::debug!(id, "category updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ResultEngine<()> {
        self.categories.delete(id).await?;
        tracing::debug!(id, "category deleted");
        Ok(())
    }
}

use std::sync::Arc;

use crate::{
    dto::category::CategoryRequest,
    error::{AppError, AppResult},
    models::Category,
    repository::CategoryStorage,
};

pub struct CategoryService {
    repo: Arc<dyn CategoryStorage>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryStorage>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: &CategoryRequest) -> AppResult<i32> {
        validate(input)?;
        self.repo.insert(input).await
    }

    pub async fn update(&self, id: i32, input: &CategoryRequest) -> AppResult<i32> {
        validate(input)?;
        validate_id(id)?;
        self.ensure_exists(id).await?;
        self.repo.update(id, input).await?;
        Ok(id)
    }

    pub async fn delete(&self, id: i32) -> AppResult<i32> {
        validate_id(id)?;
        self.ensure_exists(id).await?;
        self.repo.delete(id).await?;
        Ok(id)
    }

    pub async fn get(&self, id: i32) -> AppResult<Category> {
        validate_id(id)?;
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("category {id} not found")))
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repo.list().await
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Vec<Category>> {
        self.repo.find_by_slug(slug).await
    }

    async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        if !self.repo.exists(id).await? {
            return Err(AppError::not_found(format!("category {id} not found")));
        }
        Ok(())
    }
}

pub fn validate(input: &CategoryRequest) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("invalid category: name is required"));
    }
    if input.path.trim().is_empty() {
        return Err(AppError::validation("invalid category: path is required"));
    }
    Ok(())
}

fn validate_id(id: i32) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::validation("invalid category Id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryStore::new()))
    }

    fn shoes() -> CategoryRequest {
        CategoryRequest {
            name: "Shoes".into(),
            path: "shoes".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let service = service();
        let id = service.create(&shoes()).await.unwrap();
        assert!(id > 0);

        let category = service.get(id).await.unwrap();
        assert_eq!(category.name, "Shoes");
        assert_eq!(category.path, "shoes");
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_storage() {
        let service = service();
        let err = service
            .create(&CategoryRequest {
                name: String::new(),
                path: "shoes".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid category: name is required");

        let err = service
            .create(&CategoryRequest {
                name: "Shoes".into(),
                path: " ".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid category: path is required");
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_missing_category_is_not_found() {
        let service = service();
        assert!(matches!(
            service.update(42, &shoes()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(0).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn slug_lookup_matches_substrings() {
        let service = service();
        service.create(&shoes()).await.unwrap();
        service
            .create(&CategoryRequest {
                name: "Running shoes".into(),
                path: "running-shoes".into(),
            })
            .await
            .unwrap();
        service
            .create(&CategoryRequest {
                name: "Hats".into(),
                path: "hats".into(),
            })
            .await
            .unwrap();

        let found = service.find_by_slug("shoes").await.unwrap();
        assert_eq!(found.len(), 2);
    }
}

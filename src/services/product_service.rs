use std::sync::Arc;

use crate::{
    dto::product::ProductRequest,
    error::{AppError, AppResult},
    models::Product,
    repository::ProductStorage,
    routes::params::{ListParams, ProductSortBy},
};

pub struct ProductService {
    repo: Arc<dyn ProductStorage>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductStorage>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: &ProductRequest) -> AppResult<i32> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("invalid product: title is required"));
        }
        self.repo.insert(input).await
    }

    /// Partial update: only the fields set in `input` are written.
    pub async fn update(&self, id: i32, input: &ProductRequest) -> AppResult<i32> {
        validate_id(id)?;
        if input.is_empty() {
            return Err(AppError::validation(
                "invalid product: at least one field must be provided",
            ));
        }
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

    pub async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        validate_id(id)?;
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {id} not found")))
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Product> {
        validate_slug(slug)?;
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product '{slug}' not found")))
    }

    pub async fn list_by_category_id(&self, category_id: i32) -> AppResult<Vec<Product>> {
        if category_id < 1 {
            return Err(AppError::validation("invalid category Id"));
        }
        self.repo.list_by_category_id(category_id).await
    }

    pub async fn list_by_category_slug(&self, slug: &str) -> AppResult<Vec<Product>> {
        validate_slug(slug)?;
        self.repo.list_by_category_slug(slug).await
    }

    pub async fn search(
        &self,
        text: &str,
        params: &ListParams<ProductSortBy>,
    ) -> AppResult<Vec<Product>> {
        self.repo.search(text, params).await
    }

    pub async fn list(&self, params: &ListParams<ProductSortBy>) -> AppResult<Vec<Product>> {
        self.repo.list(params).await
    }

    async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        if !self.repo.exists(id).await? {
            return Err(AppError::not_found(format!("product {id} not found")));
        }
        Ok(())
    }
}

fn validate_id(id: i32) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::validation("invalid product Id"));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> AppResult<()> {
    if slug.trim().is_empty() {
        return Err(AppError::validation("invalid product slug: empty slug"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        dto::category::CategoryRequest,
        repository::{CategoryStorage, MemoryStore},
        routes::params::SortOrder,
    };

    fn product(title: &str, price: i64, path: &str) -> ProductRequest {
        ProductRequest {
            title: title.into(),
            description: format!("{title} description"),
            price: Decimal::new(price, 2),
            stock: 5,
            path: path.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn title_is_required_on_create() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let err = service
            .create(&ProductRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid product: title is required");
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let id = service.create(&product("Boot", 4999, "boot")).await.unwrap();

        service
            .update(
                id,
                &ProductRequest {
                    stock: 12,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_by_id(id).await.unwrap();
        assert_eq!(stored.title, "Boot");
        assert_eq!(stored.price, Decimal::new(4999, 2));
        assert_eq!(stored.stock, 12);
        assert!(stored.updated.is_some());

        assert!(matches!(
            service.update(id, &ProductRequest::default()).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.update(id + 100, &product("x", 1, "x")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn blank_text_fields_do_not_count_as_an_update() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let id = service.create(&product("Boot", 4999, "boot")).await.unwrap();

        let blank = ProductRequest {
            title: "  ".into(),
            description: "\t".into(),
            path: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            service.update(id, &blank).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(service.get_by_id(id).await.unwrap().title, "Boot");
    }

    #[tokio::test]
    async fn unknown_category_is_refused() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let err = service
            .create(&ProductRequest {
                category_id: 42,
                ..product("Boot", 4999, "boot")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(service.list(&ListParams::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_slug_lookup_uses_joined_path() {
        let store = Arc::new(MemoryStore::new());
        let categories: Arc<dyn CategoryStorage> = store.clone();
        let categ_id = categories
            .insert(&CategoryRequest {
                name: "Shoes".into(),
                path: "shoes".into(),
            })
            .await
            .unwrap();

        let service = ProductService::new(store);
        service
            .create(&ProductRequest {
                category_id: categ_id,
                ..product("Boot", 4999, "boot")
            })
            .await
            .unwrap();
        service.create(&product("Hat", 999, "hat")).await.unwrap();

        let found = service.list_by_category_slug("shoes").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category_path.as_deref(), Some("shoes"));
        assert_eq!(service.list_by_category_id(categ_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_paginated() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        for (title, price) in [("Red Boot", 300), ("Blue boot", 100), ("Green hat", 200)] {
            service
                .create(&product(title, price, &title.to_lowercase()))
                .await
                .unwrap();
        }

        let params = ListParams {
            page: 1,
            limit: 10,
            sort_by: ProductSortBy::Price,
            order: SortOrder::Desc,
        };
        let found = service.search("BOOT", &params).await.unwrap();
        let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Red Boot", "Blue boot"]);

        let second_page = ListParams {
            page: 2,
            limit: 2,
            ..ListParams::default()
        };
        assert_eq!(service.list(&second_page).await.unwrap().len(), 1);
    }
}

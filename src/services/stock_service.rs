use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    repository::StockStorage,
};

pub struct StockService {
    repo: Arc<dyn StockStorage>,
}

impl StockService {
    pub fn new(repo: Arc<dyn StockStorage>) -> Self {
        Self { repo }
    }

    /// Applies a relative stock change to one product.
    pub async fn adjust(&self, product_id: i32, delta: i32) -> AppResult<()> {
        if product_id < 1 {
            return Err(AppError::validation("invalid product Id"));
        }
        if delta == 0 {
            return Err(AppError::validation("invalid stock value"));
        }
        if !self.repo.adjust(product_id, delta).await? {
            return Err(AppError::not_found(format!("product {product_id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        dto::product::ProductRequest,
        repository::{MemoryStore, ProductStorage},
    };

    #[tokio::test]
    async fn delta_is_added_to_current_stock() {
        let store = Arc::new(MemoryStore::new());
        let products: Arc<dyn ProductStorage> = store.clone();
        let id = products
            .insert(&ProductRequest {
                title: "Boot".into(),
                price: Decimal::new(100, 0),
                stock: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        let service = StockService::new(store);
        service.adjust(id, -3).await.unwrap();
        service.adjust(id, 5).await.unwrap();

        let stored = products.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 12);
    }

    #[tokio::test]
    async fn zero_delta_and_unknown_product_are_rejected() {
        let service = StockService::new(Arc::new(MemoryStore::new()));
        let err = service.adjust(1, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid stock value");
        assert!(matches!(
            service.adjust(99, 1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn overflowing_stock_is_an_error_and_keeps_the_value() {
        let store = Arc::new(MemoryStore::new());
        let products: Arc<dyn ProductStorage> = store.clone();
        let id = products
            .insert(&ProductRequest {
                title: "Boot".into(),
                price: Decimal::new(100, 0),
                stock: i32::MAX,
                ..Default::default()
            })
            .await
            .unwrap();

        let service = StockService::new(store);
        assert!(matches!(
            service.adjust(id, 1).await,
            Err(AppError::Internal(_))
        ));
        let stored = products.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.stock, i32::MAX);
    }
}

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    dto::order::OrderRequest,
    error::{AppError, AppResult},
    models::Order,
    repository::{AddressStorage, OrderStorage},
    routes::params::OrderListParams,
};

pub struct OrderService {
    repo: Arc<dyn OrderStorage>,
    addresses: Arc<dyn AddressStorage>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderStorage>, addresses: Arc<dyn AddressStorage>) -> Self {
        Self { repo, addresses }
    }

    /// Orders may only ship to one of the caller's own addresses.
    async fn ensure_own_address(&self, owner: Uuid, address_id: i32) -> AppResult<()> {
        if !self.addresses.exists(owner, address_id).await? {
            return Err(AppError::not_found(format!(
                "address {address_id} not found"
            )));
        }
        Ok(())
    }

    pub async fn create(&self, owner: Uuid, input: &OrderRequest) -> AppResult<i32> {
        validate(input)?;
        self.ensure_own_address(owner, input.address_id).await?;
        let id = self.repo.insert(owner, input).await?;
        tracing::info!(order_id = id, user = %owner, lines = input.details.len(), "order created");
        Ok(id)
    }

    /// Replaces the order header and all of its lines.
    pub async fn update(&self, owner: Uuid, id: i32, input: &OrderRequest) -> AppResult<i32> {
        validate(input)?;
        self.ensure_own_address(owner, input.address_id).await?;
        if !self.repo.update(owner, id, input).await? {
            return Err(not_found(id));
        }
        Ok(id)
    }

    pub async fn delete(&self, owner: Uuid, id: i32) -> AppResult<i32> {
        if !self.repo.delete(owner, id).await? {
            return Err(not_found(id));
        }
        Ok(id)
    }

    pub async fn get(&self, owner: Uuid, id: i32) -> AppResult<Order> {
        self.repo.get(owner, id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, owner: Uuid, params: &OrderListParams) -> AppResult<Vec<Order>> {
        self.repo.list(owner, params).await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("order {id} not found"))
}

pub fn validate(input: &OrderRequest) -> AppResult<()> {
    if input.total <= Decimal::ZERO {
        return Err(AppError::validation("order total must be > 0"));
    }
    if input.address_id <= 0 {
        return Err(AppError::validation("address ID must be provided"));
    }
    if input.details.is_empty() {
        return Err(AppError::validation(
            "order must have at least one order detail",
        ));
    }
    for detail in &input.details {
        if detail.product_id <= 0 {
            return Err(AppError::validation("product ID must be provided"));
        }
        if detail.quantity <= 0 {
            return Err(AppError::validation("quantity must be greater than 0"));
        }
        if detail.price <= Decimal::ZERO {
            return Err(AppError::validation("price must be greater than 0"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::{address::AddressRequest, order::OrderDetailRequest, product::ProductRequest},
        repository::{MemoryStore, ProductStorage, UserStorage},
        routes::params::QueryMap,
    };

    struct Fixture {
        service: OrderService,
        store: Arc<MemoryStore>,
        owner: Uuid,
        address_id: i32,
        product_id: i32,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let owner = Uuid::new_v4();

        let users: Arc<dyn UserStorage> = store.clone();
        users.register(owner, "owner@example.com").await.unwrap();

        let addresses: Arc<dyn AddressStorage> = store.clone();
        let address_id = addresses
            .insert(
                owner,
                &AddressRequest {
                    title: "Home".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let products: Arc<dyn ProductStorage> = store.clone();
        let product_id = products
            .insert(&ProductRequest {
                title: "Boot".into(),
                price: Decimal::new(2500, 2),
                stock: 3,
                ..Default::default()
            })
            .await
            .unwrap();

        Fixture {
            service: OrderService::new(store.clone(), store.clone()),
            store,
            owner,
            address_id,
            product_id,
        }
    }

    fn order(address_id: i32, product_id: i32, quantity: i32) -> OrderRequest {
        OrderRequest {
            address_id,
            total: Decimal::new(2500, 2) * Decimal::from(quantity),
            details: vec![OrderDetailRequest {
                product_id,
                quantity,
                price: Decimal::new(2500, 2),
            }],
        }
    }

    #[test]
    fn validation_messages_follow_field_order() {
        let valid = order(1, 1, 1);
        assert!(validate(&valid).is_ok());

        let cases = [
            (
                OrderRequest {
                    total: Decimal::new(-1, 0),
                    ..valid.clone()
                },
                "order total must be > 0",
            ),
            (
                OrderRequest {
                    address_id: 0,
                    ..valid.clone()
                },
                "address ID must be provided",
            ),
            (
                OrderRequest {
                    details: vec![],
                    ..valid.clone()
                },
                "order must have at least one order detail",
            ),
            (order(1, 0, 1), "product ID must be provided"),
            (
                OrderRequest {
                    total: Decimal::ONE,
                    ..order(1, 1, 0)
                },
                "quantity must be greater than 0",
            ),
        ];
        for (input, message) in cases {
            assert_eq!(validate(&input).unwrap_err().to_string(), message);
        }

        let mut free = valid;
        free.details[0].price = Decimal::ZERO;
        assert_eq!(
            validate(&free).unwrap_err().to_string(),
            "price must be greater than 0"
        );
    }

    #[tokio::test]
    async fn create_get_update_delete() {
        let f = fixture().await;
        let id = f
            .service
            .create(f.owner, &order(f.address_id, f.product_id, 2))
            .await
            .unwrap();

        let stored = f.service.get(f.owner, id).await.unwrap();
        assert_eq!(stored.details.len(), 1);
        assert_eq!(stored.total, Decimal::new(5000, 2));

        f.service
            .update(f.owner, id, &order(f.address_id, f.product_id, 3))
            .await
            .unwrap();
        let stored = f.service.get(f.owner, id).await.unwrap();
        assert_eq!(stored.details.len(), 1);
        assert_eq!(stored.details[0].quantity, 3);

        f.service.delete(f.owner, id).await.unwrap();
        assert!(matches!(
            f.service.get(f.owner, id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_product_persists_nothing() {
        let f = fixture().await;
        let mut input = order(f.address_id, f.product_id, 1);
        input.details.push(OrderDetailRequest {
            product_id: 9999,
            quantity: 1,
            price: Decimal::ONE,
        });

        assert!(matches!(
            f.service.create(f.owner, &input).await,
            Err(AppError::Internal(_))
        ));
        let listed = f
            .service
            .list(f.owner, &OrderListParams::from_query(&Default::default()).unwrap())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn other_users_orders_are_invisible() {
        let f = fixture().await;
        let id = f
            .service
            .create(f.owner, &order(f.address_id, f.product_id, 1))
            .await
            .unwrap();
        let intruder = Uuid::new_v4();

        assert!(matches!(
            f.service.get(intruder, id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service
                .update(intruder, id, &order(f.address_id, f.product_id, 5))
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.delete(intruder, id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(
            f.service.get(f.owner, id).await.unwrap().details[0].quantity,
            1
        );
    }

    #[tokio::test]
    async fn history_is_newest_first_and_paged_by_ten() {
        let f = fixture().await;
        let mut ids = Vec::new();
        for _ in 0..12 {
            ids.push(
                f.service
                    .create(f.owner, &order(f.address_id, f.product_id, 1))
                    .await
                    .unwrap(),
            );
        }

        let first = f
            .service
            .list(f.owner, &OrderListParams::from_query(&Default::default()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, *ids.last().unwrap());

        let query: QueryMap = [("page".to_string(), "2".to_string())].into_iter().collect();
        let second = f
            .service
            .list(f.owner, &OrderListParams::from_query(&query).unwrap())
            .await
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].id, ids[0]);
    }

    #[tokio::test]
    async fn failed_update_keeps_the_previous_order() {
        let f = fixture().await;
        let id = f
            .service
            .create(f.owner, &order(f.address_id, f.product_id, 2))
            .await
            .unwrap();

        let mut input = order(f.address_id, f.product_id, 4);
        input.details.push(OrderDetailRequest {
            product_id: 9999,
            quantity: 1,
            price: Decimal::ONE,
        });
        assert!(matches!(
            f.service.update(f.owner, id, &input).await,
            Err(AppError::Internal(_))
        ));

        let stored = f.service.get(f.owner, id).await.unwrap();
        assert_eq!(stored.total, Decimal::new(5000, 2));
        assert_eq!(stored.details.len(), 1);
        assert_eq!(stored.details[0].product_id, f.product_id);
        assert_eq!(stored.details[0].quantity, 2);
    }

    #[tokio::test]
    async fn orders_cannot_use_another_users_address() {
        let f = fixture().await;
        let other = Uuid::new_v4();
        let users: Arc<dyn UserStorage> = f.store.clone();
        users.register(other, "other@example.com").await.unwrap();
        let addresses: Arc<dyn AddressStorage> = f.store.clone();
        let foreign = addresses
            .insert(
                other,
                &AddressRequest {
                    title: "Elsewhere".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = f
            .service
            .create(f.owner, &order(foreign, f.product_id, 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("address {foreign} not found"));

        let id = f
            .service
            .create(f.owner, &order(f.address_id, f.product_id, 1))
            .await
            .unwrap();
        assert!(matches!(
            f.service
                .update(f.owner, id, &order(foreign, f.product_id, 1))
                .await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(f.service.get(f.owner, id).await.unwrap().address_id, f.address_id);

        let listed = f
            .service
            .list(other, &OrderListParams::from_query(&Default::default()).unwrap())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}

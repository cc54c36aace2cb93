//! Process-local storage backing every repository trait, used by tests and
//! by `Services::in_memory`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    dto::{
        address::AddressRequest, category::CategoryRequest, order::OrderRequest,
        product::ProductRequest,
    },
    error::AppResult,
    models::{Address, Category, Order, OrderDetail, Product, User},
    repository::{
        address::AddressStorage,
        category::CategoryStorage,
        order::OrderStorage,
        product::ProductStorage,
        stock::StockStorage,
        user::{AdminUserStorage, UserStorage},
    },
    routes::params::{ListParams, OrderListParams, ProductSortBy, SortOrder, UserSortBy},
};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    addresses: BTreeMap<i32, (Uuid, Address)>,
    orders: BTreeMap<i32, Order>,
    users: BTreeMap<Uuid, User>,
    next_id: i32,
    next_detail_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn next_detail_id(&mut self) -> i32 {
        self.next_detail_id += 1;
        self.next_detail_id
    }

    fn with_category_path(&self, mut product: Product) -> Product {
        product.category_path = product
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(|category| category.path.clone());
        product
    }

    fn products_where(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products
            .values()
            .map(|product| self.with_category_path(product.clone()))
            .filter(|product| keep(product))
            .collect()
    }

    fn require_user(&self, uuid: Uuid) -> AppResult<()> {
        if !self.users.contains_key(&uuid) {
            return Err(anyhow!("user {uuid} does not exist").into());
        }
        Ok(())
    }

    /// Zero means "no category" on product requests.
    fn require_category(&self, id: i32) -> AppResult<()> {
        if id != 0 && !self.categories.contains_key(&id) {
            return Err(anyhow!("category {id} does not exist").into());
        }
        Ok(())
    }

    /// Mirrors the foreign keys the SQL schema enforces on order rows.
    fn check_order_refs(&self, owner: Uuid, input: &OrderRequest) -> AppResult<()> {
        self.require_user(owner)?;
        if !self.addresses.contains_key(&input.address_id) {
            return Err(anyhow!("address {} does not exist", input.address_id).into());
        }
        if let Some(detail) = input
            .details
            .iter()
            .find(|detail| !self.products.contains_key(&detail.product_id))
        {
            return Err(anyhow!("product {} does not exist", detail.product_id).into());
        }
        Ok(())
    }

    fn build_details(&mut self, order_id: i32, input: &OrderRequest) -> Vec<OrderDetail> {
        input
            .details
            .iter()
            .map(|detail| OrderDetail {
                id: self.next_detail_id(),
                order_id,
                product_id: detail.product_id,
                quantity: detail.quantity,
                price: detail.price,
            })
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn paginate<T>(mut rows: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(rows.len());
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.drain(..start);
    rows.truncate(take);
    rows
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_products(a: &Product, b: &Product, sort_by: ProductSortBy) -> Ordering {
    match sort_by {
        ProductSortBy::Id => a.id.cmp(&b.id),
        ProductSortBy::Title => a.title.cmp(&b.title),
        ProductSortBy::Description => a.description.cmp(&b.description),
        ProductSortBy::Price => a.price.cmp(&b.price),
        ProductSortBy::CategoryId => a.category_id.cmp(&b.category_id),
        ProductSortBy::Stock => a.stock.cmp(&b.stock),
        ProductSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_users(a: &User, b: &User, sort_by: UserSortBy) -> Ordering {
    match sort_by {
        UserSortBy::Uuid => a.uuid.cmp(&b.uuid),
        UserSortBy::Email => a.email.cmp(&b.email),
        UserSortBy::FirstName => a.first_name.cmp(&b.first_name),
        UserSortBy::LastName => a.last_name.cmp(&b.last_name),
        UserSortBy::Status => a.status.cmp(&b.status),
        UserSortBy::DateAdd => a.date_add.cmp(&b.date_add),
        UserSortBy::DateUpg => a.date_upg.cmp(&b.date_upg),
    }
}

fn sorted_page(mut rows: Vec<Product>, params: &ListParams<ProductSortBy>) -> Vec<Product> {
    rows.sort_by(|a, b| directed(compare_products(a, b, params.sort_by), params.order));
    paginate(rows, params.limit, params.offset())
}

#[async_trait]
impl CategoryStorage for MemoryStore {
    async fn insert(&self, input: &CategoryRequest) -> AppResult<i32> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        tables.categories.insert(
            id,
            Category {
                id,
                name: input.name.clone(),
                path: input.path.clone(),
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i32, input: &CategoryRequest) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(category) = tables.categories.get_mut(&id) {
            category.name = input.name.clone();
            category.path = input.path.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables.categories.remove(&id);
        for product in tables.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().await.categories.contains_key(&id))
    }

    async fn get(&self, id: i32) -> AppResult<Option<Category>> {
        Ok(self.tables.lock().await.categories.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(self.tables.lock().await.categories.values().cloned().collect())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Vec<Category>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .categories
            .values()
            .filter(|category| category.path.contains(slug))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductStorage for MemoryStore {
    async fn insert(&self, input: &ProductRequest) -> AppResult<i32> {
        let mut tables = self.tables.lock().await;
        tables.require_category(input.category_id)?;
        let id = tables.next_id();
        tables.products.insert(
            id,
            Product {
                id,
                title: input.title.clone(),
                description: non_empty(&input.description),
                created_at: Utc::now(),
                updated: None,
                price: input.price,
                stock: input.stock,
                category_id: (input.category_id != 0).then_some(input.category_id),
                path: non_empty(&input.path),
                category_path: None,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i32, input: &ProductRequest) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables.require_category(input.category_id)?;
        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(());
        };
        if let Some(title) = non_empty(&input.title) {
            product.title = title;
        }
        if let Some(description) = non_empty(&input.description) {
            product.description = Some(description);
        }
        if !input.price.is_zero() {
            product.price = input.price;
        }
        if input.stock != 0 {
            product.stock = input.stock;
        }
        if input.category_id != 0 {
            product.category_id = Some(input.category_id);
        }
        if let Some(path) = non_empty(&input.path) {
            product.path = Some(path);
        }
        product.updated = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if tables
            .orders
            .values()
            .any(|order| order.details.iter().any(|detail| detail.product_id == id))
        {
            return Err(anyhow!("product {id} is still referenced by order details").into());
        }
        tables.products.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().await.products.contains_key(&id))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .products
            .get(&id)
            .cloned()
            .map(|product| tables.with_category_path(product)))
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .products_where(|product| product.path.as_deref() == Some(slug))
            .into_iter()
            .next())
    }

    async fn list_by_category_id(&self, category_id: i32) -> AppResult<Vec<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables.products_where(|product| product.category_id == Some(category_id)))
    }

    async fn list_by_category_slug(&self, slug: &str) -> AppResult<Vec<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables.products_where(|product| product.category_path.as_deref() == Some(slug)))
    }

    async fn search(
        &self,
        text: &str,
        params: &ListParams<ProductSortBy>,
    ) -> AppResult<Vec<Product>> {
        let needle = text.to_lowercase();
        let tables = self.tables.lock().await;
        let rows = tables.products_where(|product| {
            product.title.to_lowercase().contains(&needle)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        });
        Ok(sorted_page(rows, params))
    }

    async fn list(&self, params: &ListParams<ProductSortBy>) -> AppResult<Vec<Product>> {
        let tables = self.tables.lock().await;
        Ok(sorted_page(tables.products_where(|_| true), params))
    }
}

#[async_trait]
impl StockStorage for MemoryStore {
    async fn adjust(&self, product_id: i32, delta: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let Some(product) = tables.products.get_mut(&product_id) else {
            return Ok(false);
        };
        product.stock = product
            .stock
            .checked_add(delta)
            .ok_or_else(|| anyhow!("integer out of range for product {product_id} stock"))?;
        product.updated = Some(Utc::now());
        Ok(true)
    }
}

#[async_trait]
impl AddressStorage for MemoryStore {
    async fn insert(&self, owner: Uuid, input: &AddressRequest) -> AppResult<i32> {
        let mut tables = self.tables.lock().await;
        tables.require_user(owner)?;
        let id = tables.next_id();
        tables.addresses.insert(id, (owner, address_from_request(id, input)));
        Ok(id)
    }

    async fn update(&self, owner: Uuid, id: i32, input: &AddressRequest) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        match tables.addresses.get_mut(&id) {
            Some((address_owner, address)) if *address_owner == owner => {
                *address = address_from_request(id, input);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if !tables
            .addresses
            .get(&id)
            .is_some_and(|(address_owner, _)| *address_owner == owner)
        {
            return Ok(false);
        }
        if tables.orders.values().any(|order| order.address_id == id) {
            return Err(anyhow!("address {id} is still referenced by orders").into());
        }
        tables.addresses.remove(&id);
        Ok(true)
    }

    async fn exists(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables
            .addresses
            .get(&id)
            .is_some_and(|(address_owner, _)| *address_owner == owner))
    }

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Address>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .addresses
            .get(&id)
            .filter(|(address_owner, _)| *address_owner == owner)
            .map(|(_, address)| address.clone()))
    }

    async fn list(&self, owner: Uuid) -> AppResult<Vec<Address>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .addresses
            .values()
            .filter(|(address_owner, _)| *address_owner == owner)
            .map(|(_, address)| address.clone())
            .collect())
    }
}

fn address_from_request(id: i32, input: &AddressRequest) -> Address {
    Address {
        id,
        title: input.title.clone(),
        name: input.name.clone(),
        address: input.address.clone(),
        city: input.city.clone(),
        state: input.state.clone(),
        postal_code: input.postal_code.clone(),
        phone: input.phone.clone(),
    }
}

#[async_trait]
impl OrderStorage for MemoryStore {
    async fn insert(&self, owner: Uuid, input: &OrderRequest) -> AppResult<i32> {
        let mut tables = self.tables.lock().await;
        tables.check_order_refs(owner, input)?;

        let id = tables.next_id();
        let details = tables.build_details(id, input);
        tables.orders.insert(
            id,
            Order {
                id,
                user_uuid: owner,
                address_id: input.address_id,
                date: Utc::now(),
                total: input.total,
                details,
            },
        );
        Ok(id)
    }

    async fn update(&self, owner: Uuid, id: i32, input: &OrderRequest) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if !tables
            .orders
            .get(&id)
            .is_some_and(|order| order.user_uuid == owner)
        {
            return Ok(false);
        }
        tables.check_order_refs(owner, input)?;

        let details = tables.build_details(id, input);
        if let Some(order) = tables.orders.get_mut(&id) {
            order.address_id = input.address_id;
            order.total = input.total;
            order.details = details;
        }
        Ok(true)
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if !tables
            .orders
            .get(&id)
            .is_some_and(|order| order.user_uuid == owner)
        {
            return Ok(false);
        }
        tables.orders.remove(&id);
        Ok(true)
    }

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Order>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .orders
            .get(&id)
            .filter(|order| order.user_uuid == owner)
            .cloned())
    }

    async fn list(&self, owner: Uuid, params: &OrderListParams) -> AppResult<Vec<Order>> {
        let from = params.from_date.and_time(NaiveTime::MIN).and_utc();
        let tables = self.tables.lock().await;
        let rows: Vec<Order> = tables
            .orders
            .values()
            .rev()
            .filter(|order| order.user_uuid == owner)
            .filter(|order| order.date >= from && order.date.date_naive() <= params.to_date)
            .cloned()
            .collect();
        Ok(paginate(rows, params.limit(), params.offset()))
    }
}

#[async_trait]
impl UserStorage for MemoryStore {
    async fn get(&self, uuid: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&uuid).cloned())
    }

    async fn update_names(
        &self,
        uuid: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let Some(user) = tables.users.get_mut(&uuid) else {
            return Ok(false);
        };
        if first_name.is_some() {
            user.first_name = first_name;
        }
        if last_name.is_some() {
            user.last_name = last_name;
        }
        user.date_upg = Some(Utc::now());
        Ok(true)
    }

    async fn register(&self, uuid: Uuid, email: &str) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.users.contains_key(&uuid) {
            return Ok(false);
        }
        tables.users.insert(
            uuid,
            User {
                uuid,
                email: email.to_string(),
                first_name: None,
                last_name: None,
                status: 0,
                date_add: Utc::now(),
                date_upg: None,
            },
        );
        Ok(true)
    }
}

#[async_trait]
impl AdminUserStorage for MemoryStore {
    async fn list(&self, params: &ListParams<UserSortBy>) -> AppResult<Vec<User>> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<User> = tables.users.values().cloned().collect();
        rows.sort_by(|a, b| directed(compare_users(a, b, params.sort_by), params.order));
        Ok(paginate(rows, params.limit, params.offset()))
    }

    async fn delete(&self, uuid: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.users.remove(&uuid).is_none() {
            return Ok(false);
        }
        tables.addresses.retain(|_, (owner, _)| *owner != uuid);
        tables.orders.retain(|_, order| order.user_uuid != uuid);
        Ok(true)
    }
}

use std::sync::Arc;

use crate::{
    db::OrmConn,
    middleware::auth::TokenVerifier,
    repository::{
        MemoryStore, SqlAddressRepository, SqlCategoryRepository, SqlOrderRepository,
        SqlProductRepository, SqlStockRepository, SqlUserRepository,
    },
    services::{
        AddressService, AdminUserService, CategoryService, OrderService, ProductService,
        StockService, UserService,
    },
};

/// One service per entity, each over its own storage trait object.
pub struct Services {
    pub categories: CategoryService,
    pub products: ProductService,
    pub stock: StockService,
    pub addresses: AddressService,
    pub orders: OrderService,
    pub users: UserService,
    pub admin_users: AdminUserService,
}

impl Services {
    pub fn postgres(conn: OrmConn) -> Self {
        let users = Arc::new(SqlUserRepository::new(conn.clone()));
        let addresses = Arc::new(SqlAddressRepository::new(conn.clone()));
        Self {
            categories: CategoryService::new(Arc::new(SqlCategoryRepository::new(conn.clone()))),
            products: ProductService::new(Arc::new(SqlProductRepository::new(conn.clone()))),
            stock: StockService::new(Arc::new(SqlStockRepository::new(conn.clone()))),
            addresses: AddressService::new(addresses.clone()),
            orders: OrderService::new(Arc::new(SqlOrderRepository::new(conn)), addresses),
            users: UserService::new(users.clone()),
            admin_users: AdminUserService::new(users),
        }
    }

    /// All services share a single process-local store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            categories: CategoryService::new(store.clone()),
            products: ProductService::new(store.clone()),
            stock: StockService::new(store.clone()),
            addresses: AddressService::new(store.clone()),
            orders: OrderService::new(store.clone(), store.clone()),
            users: UserService::new(store.clone()),
            admin_users: AdminUserService::new(store),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub auth: Arc<TokenVerifier>,
    /// Leading path removed before routing, e.g. `/gambit`.
    pub url_prefix: Arc<str>,
}

impl AppState {
    pub fn new(services: Services, jwt_secret: &str, url_prefix: &str) -> Self {
        Self {
            services: Arc::new(services),
            auth: Arc::new(TokenVerifier::new(jwt_secret)),
            url_prefix: Arc::from(url_prefix),
        }
    }
}

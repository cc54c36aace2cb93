pub mod address_service;
pub mod admin_user_service;
pub mod category_service;
pub mod order_service;
pub mod product_service;
pub mod stock_service;
pub mod user_service;

pub use address_service::AddressService;
pub use admin_user_service::AdminUserService;
pub use category_service::CategoryService;
pub use order_service::OrderService;
pub use product_service::ProductService;
pub use stock_service::StockService;
pub use user_service::UserService;

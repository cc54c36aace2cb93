pub mod address;
pub mod category;
pub mod memory;
pub mod order;
pub mod product;
pub mod stock;
pub mod user;

pub use address::{AddressStorage, SqlAddressRepository};
pub use category::{CategoryStorage, SqlCategoryRepository};
pub use memory::MemoryStore;
pub use order::{OrderStorage, SqlOrderRepository};
pub use product::{ProductStorage, SqlProductRepository};
pub use stock::{SqlStockRepository, StockStorage};
pub use user::{AdminUserStorage, SqlUserRepository, UserStorage};

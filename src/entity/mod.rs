pub mod addresses;
pub mod category;
pub mod orders;
pub mod orders_details;
pub mod products;
pub mod users;

pub use addresses::Entity as Addresses;
pub use category::Entity as Category;
pub use orders::Entity as Orders;
pub use orders_details::Entity as OrdersDetails;
pub use products::Entity as Products;
pub use users::Entity as Users;

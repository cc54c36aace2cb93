use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        address::AddressRequest,
        category::CategoryRequest,
        order::{OrderDetailRequest, OrderRequest},
        product::{ProductRequest, StockUpdateRequest},
        user::UserUpdateRequest,
    },
    models::{Address, Category, Order, OrderDetail, Product, User},
    response::ErrorData,
    routes::{address, admin_users, category, health, order, product, stock, user},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        category::get,
        category::post,
        category::put,
        category::delete,
        product::get,
        product::post,
        product::put,
        product::delete,
        stock::put,
        address::get,
        address::post,
        address::put,
        address::delete,
        order::get,
        order::post,
        order::put,
        order::delete,
        user::get,
        user::post,
        user::put,
        admin_users::get,
        admin_users::delete
    ),
    components(
        schemas(
            Category,
            Product,
            Address,
            Order,
            OrderDetail,
            User,
            CategoryRequest,
            ProductRequest,
            StockUpdateRequest,
            AddressRequest,
            OrderRequest,
            OrderDetailRequest,
            UserUpdateRequest,
            ErrorData,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Category", description = "Catalogue categories"),
        (name = "Product", description = "Catalogue products"),
        (name = "Stock", description = "Relative stock adjustments"),
        (name = "Address", description = "Shipping addresses of the caller"),
        (name = "Order", description = "Orders of the caller"),
        (name = "User", description = "The caller's own user record"),
        (name = "Admin", description = "User management for administrators"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    db::OrmConn,
    entity::products::{Column as ProdCol, Entity as Products},
    error::AppResult,
};

#[async_trait]
pub trait StockStorage: Send + Sync {
    /// Adds `delta` to the product's stock; returns false when no product matched.
    async fn adjust(&self, product_id: i32, delta: i32) -> AppResult<bool>;
}

pub struct SqlStockRepository {
    conn: OrmConn,
}

impl SqlStockRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StockStorage for SqlStockRepository {
    async fn adjust(&self, product_id: i32, delta: i32) -> AppResult<bool> {
        let result = Products::update_many()
            .col_expr(ProdCol::ProdStock, Expr::col(ProdCol::ProdStock).add(delta))
            .col_expr(ProdCol::ProdUpdated, Expr::current_timestamp().into())
            .filter(ProdCol::ProdId.eq(product_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

use crate::{
    db::OrmConn,
    dto::category::CategoryRequest,
    entity::category::{ActiveModel, Column, Entity as Categories, Model},
    error::AppResult,
    models::Category,
};

#[async_trait]
pub trait CategoryStorage: Send + Sync {
    async fn insert(&self, input: &CategoryRequest) -> AppResult<i32>;
    async fn update(&self, id: i32, input: &CategoryRequest) -> AppResult<()>;
    async fn delete(&self, id: i32) -> AppResult<()>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    async fn get(&self, id: i32) -> AppResult<Option<Category>>;
    async fn list(&self) -> AppResult<Vec<Category>>;
    /// Categories whose path contains `slug`.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Vec<Category>>;
}

pub struct SqlCategoryRepository {
    conn: OrmConn,
}

impl SqlCategoryRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CategoryStorage for SqlCategoryRepository {
    async fn insert(&self, input: &CategoryRequest) -> AppResult<i32> {
        let model = ActiveModel {
            categ_name: Set(input.name.clone()),
            categ_path: Set(input.path.clone()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model.categ_id)
    }

    async fn update(&self, id: i32, input: &CategoryRequest) -> AppResult<()> {
        Categories::update_many()
            .col_expr(Column::CategName, Expr::value(input.name.clone()))
            .col_expr(Column::CategPath, Expr::value(input.path.clone()))
            .filter(Column::CategId.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        Categories::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = Categories::find()
            .filter(Column::CategId.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Category>> {
        let found = Categories::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(category_from_entity))
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = Categories::find()
            .order_by_asc(Column::CategId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(category_from_entity).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Vec<Category>> {
        let rows = Categories::find()
            .filter(Column::CategPath.contains(slug))
            .order_by_asc(Column::CategId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(category_from_entity).collect())
    }
}

fn category_from_entity(model: Model) -> Category {
    Category {
        id: model.categ_id,
        name: model.categ_name,
        path: model.categ_path,
    }
}

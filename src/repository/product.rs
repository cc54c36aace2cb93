use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    db::OrmConn,
    dto::product::ProductRequest,
    entity::{
        category::{Column as CategCol, Entity as Categories, Model as CategoryModel},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::AppResult,
    models::Product,
    routes::params::{ListParams, ProductSortBy},
};

#[async_trait]
pub trait ProductStorage: Send + Sync {
    async fn insert(&self, input: &ProductRequest) -> AppResult<i32>;
    /// Writes only the non-zero, non-empty fields of `input`.
    async fn update(&self, id: i32, input: &ProductRequest) -> AppResult<()>;
    async fn delete(&self, id: i32) -> AppResult<()>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>>;
    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<Product>>;
    async fn list_by_category_id(&self, category_id: i32) -> AppResult<Vec<Product>>;
    async fn list_by_category_slug(&self, slug: &str) -> AppResult<Vec<Product>>;
    /// Case-insensitive substring match on title or description.
    async fn search(
        &self,
        text: &str,
        params: &ListParams<ProductSortBy>,
    ) -> AppResult<Vec<Product>>;
    async fn list(&self, params: &ListParams<ProductSortBy>) -> AppResult<Vec<Product>>;
}

pub struct SqlProductRepository {
    conn: OrmConn,
}

impl SqlProductRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }

    async fn page(
        &self,
        condition: Condition,
        params: &ListParams<ProductSortBy>,
    ) -> AppResult<Vec<Product>> {
        let rows = Products::find()
            .find_also_related(Categories)
            .filter(condition)
            .order_by(sort_column(params.sort_by), params.order.into())
            .limit(params.limit)
            .offset(params.offset())
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(product_from_entity).collect())
    }

    async fn filtered(&self, condition: Condition) -> AppResult<Vec<Product>> {
        let rows = Products::find()
            .find_also_related(Categories)
            .filter(condition)
            .order_by_asc(Column::ProdId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(product_from_entity).collect())
    }
}

#[async_trait]
impl ProductStorage for SqlProductRepository {
    async fn insert(&self, input: &ProductRequest) -> AppResult<i32> {
        let model = ActiveModel {
            prod_id: NotSet,
            prod_title: Set(input.title.clone()),
            prod_description: non_empty(&input.description).map_or(NotSet, |d| Set(Some(d))),
            prod_created_at: NotSet,
            prod_updated: NotSet,
            prod_price: if input.price.is_zero() { NotSet } else { Set(input.price) },
            prod_stock: if input.stock == 0 { NotSet } else { Set(input.stock) },
            prod_categ_id: if input.category_id == 0 {
                NotSet
            } else {
                Set(Some(input.category_id))
            },
            prod_path: non_empty(&input.path).map_or(NotSet, |p| Set(Some(p))),
        }
        .insert(&self.conn)
        .await?;
        Ok(model.prod_id)
    }

    async fn update(&self, id: i32, input: &ProductRequest) -> AppResult<()> {
        let mut active = ActiveModel {
            prod_id: Set(id),
            prod_updated: Set(Some(Utc::now().into())),
            ..Default::default()
        };
        if let Some(title) = non_empty(&input.title) {
            active.prod_title = Set(title);
        }
        if let Some(description) = non_empty(&input.description) {
            active.prod_description = Set(Some(description));
        }
        if !input.price.is_zero() {
            active.prod_price = Set(input.price);
        }
        if input.stock != 0 {
            active.prod_stock = Set(input.stock);
        }
        if input.category_id != 0 {
            active.prod_categ_id = Set(Some(input.category_id));
        }
        if let Some(path) = non_empty(&input.path) {
            active.prod_path = Set(Some(path));
        }
        active.update(&self.conn).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = Products::find()
            .filter(Column::ProdId.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let row = Products::find_by_id(id)
            .find_also_related(Categories)
            .one(&self.conn)
            .await?;
        Ok(row.map(product_from_entity))
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<Product>> {
        let row = Products::find()
            .find_also_related(Categories)
            .filter(Column::ProdPath.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(row.map(product_from_entity))
    }

    async fn list_by_category_id(&self, category_id: i32) -> AppResult<Vec<Product>> {
        self.filtered(Condition::all().add(Column::ProdCategId.eq(category_id)))
            .await
    }

    async fn list_by_category_slug(&self, slug: &str) -> AppResult<Vec<Product>> {
        self.filtered(Condition::all().add(CategCol::CategPath.eq(slug)))
            .await
    }

    async fn search(
        &self,
        text: &str,
        params: &ListParams<ProductSortBy>,
    ) -> AppResult<Vec<Product>> {
        let pattern = format!("%{text}%");
        let condition = Condition::any()
            .add(Expr::col(Column::ProdTitle).ilike(pattern.clone()))
            .add(Expr::col(Column::ProdDescription).ilike(pattern));
        self.page(condition, params).await
    }

    async fn list(&self, params: &ListParams<ProductSortBy>) -> AppResult<Vec<Product>> {
        self.page(Condition::all(), params).await
    }
}

fn sort_column(sort_by: ProductSortBy) -> Column {
    match sort_by {
        ProductSortBy::Id => Column::ProdId,
        ProductSortBy::Title => Column::ProdTitle,
        ProductSortBy::Description => Column::ProdDescription,
        ProductSortBy::Price => Column::ProdPrice,
        ProductSortBy::CategoryId => Column::ProdCategId,
        ProductSortBy::Stock => Column::ProdStock,
        ProductSortBy::CreatedAt => Column::ProdCreatedAt,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn product_from_entity((model, category): (ProductModel, Option<CategoryModel>)) -> Product {
    Product {
        id: model.prod_id,
        title: model.prod_title,
        description: model.prod_description,
        created_at: model.prod_created_at.with_timezone(&Utc),
        updated: model.prod_updated.map(|dt| dt.with_timezone(&Utc)),
        price: model.prod_price,
        stock: model.prod_stock,
        category_id: model.prod_categ_id,
        path: model.prod_path,
        category_path: category.map(|c| c.categ_path),
    }
}

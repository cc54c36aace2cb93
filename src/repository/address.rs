use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::address::AddressRequest,
    entity::addresses::{ActiveModel, Column, Entity as Addresses, Model},
    error::AppResult,
    models::Address,
};

/// Address rows are always addressed through their owner's UUID.
#[async_trait]
pub trait AddressStorage: Send + Sync {
    async fn insert(&self, owner: Uuid, input: &AddressRequest) -> AppResult<i32>;
    /// Returns false when `id` does not belong to `owner`.
    async fn update(&self, owner: Uuid, id: i32, input: &AddressRequest) -> AppResult<bool>;
    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool>;
    async fn exists(&self, owner: Uuid, id: i32) -> AppResult<bool>;
    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Address>>;
    async fn list(&self, owner: Uuid) -> AppResult<Vec<Address>>;
}

pub struct SqlAddressRepository {
    conn: OrmConn,
}

impl SqlAddressRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

fn owned(owner: Uuid, id: i32) -> Condition {
    Condition::all()
        .add(Column::AddId.eq(id))
        .add(Column::AddUserUuid.eq(owner))
}

#[async_trait]
impl AddressStorage for SqlAddressRepository {
    async fn insert(&self, owner: Uuid, input: &AddressRequest) -> AppResult<i32> {
        let model = ActiveModel {
            add_id: NotSet,
            add_user_uuid: Set(owner),
            add_title: Set(input.title.clone()),
            add_name: Set(input.name.clone()),
            add_address: Set(input.address.clone()),
            add_city: Set(input.city.clone()),
            add_state: Set(input.state.clone()),
            add_postal_code: Set(input.postal_code.clone()),
            add_phone: Set(input.phone.clone()),
            add_updated: NotSet,
        }
        .insert(&self.conn)
        .await?;
        Ok(model.add_id)
    }

    async fn update(&self, owner: Uuid, id: i32, input: &AddressRequest) -> AppResult<bool> {
        let result = Addresses::update_many()
            .col_expr(Column::AddTitle, Expr::value(input.title.clone()))
            .col_expr(Column::AddName, Expr::value(input.name.clone()))
            .col_expr(Column::AddAddress, Expr::value(input.address.clone()))
            .col_expr(Column::AddCity, Expr::value(input.city.clone()))
            .col_expr(Column::AddState, Expr::value(input.state.clone()))
            .col_expr(Column::AddPostalCode, Expr::value(input.postal_code.clone()))
            .col_expr(Column::AddPhone, Expr::value(input.phone.clone()))
            .col_expr(Column::AddUpdated, Expr::current_timestamp().into())
            .filter(owned(owner, id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let result = Addresses::delete_many()
            .filter(owned(owner, id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let count = Addresses::find()
            .filter(owned(owner, id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Address>> {
        let found = Addresses::find()
            .filter(owned(owner, id))
            .one(&self.conn)
            .await?;
        Ok(found.map(address_from_entity))
    }

    async fn list(&self, owner: Uuid) -> AppResult<Vec<Address>> {
        let rows = Addresses::find()
            .filter(Column::AddUserUuid.eq(owner))
            .order_by_asc(Column::AddId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(address_from_entity).collect())
    }
}

fn address_from_entity(model: Model) -> Address {
    Address {
        id: model.add_id,
        title: model.add_title,
        name: model.add_name,
        address: model.add_address,
        city: model.add_city,
        state: model.add_state,
        postal_code: model.add_postal_code,
        phone: model.add_phone,
    }
}

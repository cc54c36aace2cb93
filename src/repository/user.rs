use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::users::{ActiveModel, Column, Entity as Users, Model},
    error::AppResult,
    models::User,
    routes::params::{ListParams, UserSortBy},
};

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get(&self, uuid: Uuid) -> AppResult<Option<User>>;
    /// Writes whichever names are given and stamps `user_date_upg`.
    /// Returns false when no user matched.
    async fn update_names(
        &self,
        uuid: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> AppResult<bool>;
    /// Inserts the user unless a row already exists; true when one was created.
    async fn register(&self, uuid: Uuid, email: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait AdminUserStorage: Send + Sync {
    async fn list(&self, params: &ListParams<UserSortBy>) -> AppResult<Vec<User>>;
    async fn delete(&self, uuid: Uuid) -> AppResult<bool>;
}

pub struct SqlUserRepository {
    conn: OrmConn,
}

impl SqlUserRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStorage for SqlUserRepository {
    async fn get(&self, uuid: Uuid) -> AppResult<Option<User>> {
        let found = Users::find_by_id(uuid).one(&self.conn).await?;
        Ok(found.map(user_from_entity))
    }

    async fn update_names(
        &self,
        uuid: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> AppResult<bool> {
        if Users::find_by_id(uuid).count(&self.conn).await? == 0 {
            return Ok(false);
        }

        let mut active = ActiveModel {
            user_uuid: Set(uuid),
            user_date_upg: Set(Some(Utc::now().into())),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            active.user_first_name = Set(Some(first_name));
        }
        if let Some(last_name) = last_name {
            active.user_last_name = Set(Some(last_name));
        }
        active.update(&self.conn).await?;
        Ok(true)
    }

    async fn register(&self, uuid: Uuid, email: &str) -> AppResult<bool> {
        let row = ActiveModel {
            user_uuid: Set(uuid),
            user_email: Set(email.to_string()),
            user_first_name: Set(None),
            user_last_name: Set(None),
            user_status: Set(0),
            user_date_add: Set(Utc::now().into()),
            user_date_upg: Set(None),
        };
        let inserted = Users::insert(row)
            .on_conflict(OnConflict::column(Column::UserUuid).do_nothing().to_owned())
            .exec_without_returning(&self.conn)
            .await?;
        Ok(inserted > 0)
    }
}

#[async_trait]
impl AdminUserStorage for SqlUserRepository {
    async fn list(&self, params: &ListParams<UserSortBy>) -> AppResult<Vec<User>> {
        let rows = Users::find()
            .order_by(sort_column(params.sort_by), params.order.into())
            .limit(params.limit)
            .offset(params.offset())
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(user_from_entity).collect())
    }

    async fn delete(&self, uuid: Uuid) -> AppResult<bool> {
        let result = Users::delete_many()
            .filter(Column::UserUuid.eq(uuid))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn sort_column(sort_by: UserSortBy) -> Column {
    match sort_by {
        UserSortBy::Uuid => Column::UserUuid,
        UserSortBy::Email => Column::UserEmail,
        UserSortBy::FirstName => Column::UserFirstName,
        UserSortBy::LastName => Column::UserLastName,
        UserSortBy::Status => Column::UserStatus,
        UserSortBy::DateAdd => Column::UserDateAdd,
        UserSortBy::DateUpg => Column::UserDateUpg,
    }
}

fn user_from_entity(model: Model) -> User {
    User {
        uuid: model.user_uuid,
        email: model.user_email,
        first_name: model.user_first_name,
        last_name: model.user_last_name,
        status: model.user_status,
        date_add: model.user_date_add.with_timezone(&Utc),
        date_upg: model.user_date_upg.map(|dt| dt.with_timezone(&Utc)),
    }
}

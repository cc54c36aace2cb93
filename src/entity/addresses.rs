use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub add_id: i32,
    pub add_user_uuid: Uuid,
    pub add_title: String,
    pub add_name: String,
    pub add_address: String,
    pub add_city: String,
    pub add_state: String,
    pub add_postal_code: String,
    pub add_phone: String,
    pub add_updated: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AddUserUuid",
        to = "super::users::Column::UserUuid"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

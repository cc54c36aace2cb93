use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub order_id: i32,
    pub order_user_uuid: Uuid,
    pub order_add_id: i32,
    pub order_date: DateTimeWithTimeZone,
    pub order_total: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OrderUserUuid",
        to = "super::users::Column::UserUuid"
    )]
    Users,
    #[sea_orm(has_many = "super::orders_details::Entity")]
    OrdersDetails,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::orders_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdersDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

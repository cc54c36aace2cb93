use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub prod_id: i32,
    pub prod_title: String,
    pub prod_description: Option<String>,
    pub prod_created_at: DateTimeWithTimeZone,
    pub prod_updated: Option<DateTimeWithTimeZone>,
    pub prod_price: Decimal,
    pub prod_stock: i32,
    pub prod_categ_id: Option<i32>,
    pub prod_path: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::ProdCategId",
        to = "super::category::Column::CategId"
    )]
    Category,
    #[sea_orm(has_many = "super::orders_details::Entity")]
    OrdersDetails,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::orders_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdersDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

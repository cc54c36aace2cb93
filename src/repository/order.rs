use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::order::{OrderDetailRequest, OrderRequest},
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        orders_details::{
            ActiveModel as DetailActive, Column as DetailCol, Entity as OrdersDetails,
            Model as DetailModel,
        },
    },
    error::AppResult,
    models::{Order, OrderDetail},
    routes::params::OrderListParams,
};

/// Orders and their detail rows, always written together in one transaction.
#[async_trait]
pub trait OrderStorage: Send + Sync {
    async fn insert(&self, owner: Uuid, input: &OrderRequest) -> AppResult<i32>;
    /// Rewrites the order row and replaces every detail row. Returns false,
    /// leaving storage untouched, when `id` does not belong to `owner`.
    async fn update(&self, owner: Uuid, id: i32, input: &OrderRequest) -> AppResult<bool>;
    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool>;
    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Order>>;
    async fn list(&self, owner: Uuid, params: &OrderListParams) -> AppResult<Vec<Order>>;
}

pub struct SqlOrderRepository {
    conn: OrmConn,
}

impl SqlOrderRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

fn owned(owner: Uuid, id: i32) -> Condition {
    Condition::all()
        .add(OrderCol::OrderId.eq(id))
        .add(OrderCol::OrderUserUuid.eq(owner))
}

async fn insert_details<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    details: &[OrderDetailRequest],
) -> AppResult<()> {
    for detail in details {
        DetailActive {
            od_id: NotSet,
            od_order_id: Set(order_id),
            od_prod_id: Set(detail.product_id),
            od_quantity: Set(detail.quantity),
            od_price: Set(detail.price),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[async_trait]
impl OrderStorage for SqlOrderRepository {
    async fn insert(&self, owner: Uuid, input: &OrderRequest) -> AppResult<i32> {
        let txn = self.conn.begin().await?;

        let order = OrderActive {
            order_id: NotSet,
            order_user_uuid: Set(owner),
            order_add_id: Set(input.address_id),
            order_date: Set(Utc::now().into()),
            order_total: Set(input.total),
        }
        .insert(&txn)
        .await?;

        insert_details(&txn, order.order_id, &input.details).await?;

        txn.commit().await?;
        Ok(order.order_id)
    }

    async fn update(&self, owner: Uuid, id: i32, input: &OrderRequest) -> AppResult<bool> {
        let txn = self.conn.begin().await?;

        let result = Orders::update_many()
            .col_expr(OrderCol::OrderAddId, Expr::value(input.address_id))
            .col_expr(OrderCol::OrderTotal, Expr::value(input.total))
            .filter(owned(owner, id))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        OrdersDetails::delete_many()
            .filter(DetailCol::OdOrderId.eq(id))
            .exec(&txn)
            .await?;
        insert_details(&txn, id, &input.details).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<bool> {
        let txn = self.conn.begin().await?;

        let order = Orders::find()
            .filter(owned(owner, id))
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        if order.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        OrdersDetails::delete_many()
            .filter(DetailCol::OdOrderId.eq(id))
            .exec(&txn)
            .await?;
        Orders::delete_many()
            .filter(owned(owner, id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Option<Order>> {
        let Some(order) = Orders::find()
            .filter(owned(owner, id))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let details = OrdersDetails::find()
            .filter(DetailCol::OdOrderId.eq(order.order_id))
            .order_by_asc(DetailCol::OdId)
            .all(&self.conn)
            .await?;

        Ok(Some(order_from_entity(order, details)))
    }

    async fn list(&self, owner: Uuid, params: &OrderListParams) -> AppResult<Vec<Order>> {
        let until = params
            .to_date
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX);

        let orders = Orders::find()
            .filter(
                Condition::all()
                    .add(OrderCol::OrderUserUuid.eq(owner))
                    .add(OrderCol::OrderDate.gte(start_of_day(params.from_date)))
                    .add(OrderCol::OrderDate.lt(start_of_day(until))),
            )
            .order_by_desc(OrderCol::OrderId)
            .limit(params.limit())
            .offset(params.offset())
            .all(&self.conn)
            .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();
        let mut details_by_order: HashMap<i32, Vec<DetailModel>> = HashMap::new();
        for detail in OrdersDetails::find()
            .filter(DetailCol::OdOrderId.is_in(ids))
            .order_by_asc(DetailCol::OdId)
            .all(&self.conn)
            .await?
        {
            details_by_order
                .entry(detail.od_order_id)
                .or_default()
                .push(detail);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let details = details_by_order.remove(&order.order_id).unwrap_or_default();
                order_from_entity(order, details)
            })
            .collect())
    }
}

fn order_from_entity(model: OrderModel, details: Vec<DetailModel>) -> Order {
    Order {
        id: model.order_id,
        user_uuid: model.order_user_uuid,
        address_id: model.order_add_id,
        date: model.order_date.with_timezone(&Utc),
        total: model.order_total,
        details: details.into_iter().map(detail_from_entity).collect(),
    }
}

fn detail_from_entity(model: DetailModel) -> OrderDetail {
    OrderDetail {
        id: model.od_id,
        order_id: model.od_order_id,
        product_id: model.od_prod_id,
        quantity: model.od_quantity,
        price: model.od_price,
    }
}

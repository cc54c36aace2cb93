use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::Order;

use crate::error::{AppError, AppResult};

pub type QueryMap = HashMap<String, String>;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Orders are always listed ten at a time.
pub const ORDERS_PAGE_SIZE: u64 = 10;

fn query_value<'a>(query: &'a QueryMap, key: &str) -> Option<&'a str> {
    query
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Offset `(page - 1) * limit`, rejected as a bad `page` when it does not
/// fit a Postgres BIGINT.
fn checked_offset(page: u64, limit: u64) -> AppResult<u64> {
    (page - 1)
        .checked_mul(limit)
        .filter(|offset| *offset <= i64::MAX as u64)
        .ok_or_else(|| AppError::BadRequest("invalid 'page' parameter".into()))
}

fn positive(query: &QueryMap, key: &str, default: u64) -> AppResult<u64> {
    match query_value(query, key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(value) if (1..=i64::MAX as u64).contains(&value) => Ok(value),
            _ => Err(AppError::BadRequest(format!("invalid '{key}' parameter"))),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for Order {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// A column name accepted in `sort_by` for one listing.
pub trait SortKey: Copy {
    const DEFAULT: Self;

    fn parse(value: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    Id,
    Title,
    Description,
    Price,
    CategoryId,
    Stock,
    CreatedAt,
}

impl SortKey for ProductSortBy {
    const DEFAULT: Self = ProductSortBy::Id;

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(ProductSortBy::Id),
            "title" => Some(ProductSortBy::Title),
            "description" => Some(ProductSortBy::Description),
            "price" => Some(ProductSortBy::Price),
            "category_id" => Some(ProductSortBy::CategoryId),
            "stock" => Some(ProductSortBy::Stock),
            "created_at" => Some(ProductSortBy::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortBy {
    Uuid,
    Email,
    FirstName,
    LastName,
    Status,
    DateAdd,
    DateUpg,
}

impl SortKey for UserSortBy {
    const DEFAULT: Self = UserSortBy::Uuid;

    fn parse(value: &str) -> Option<Self> {
        match value {
            "uuid" => Some(UserSortBy::Uuid),
            "email" => Some(UserSortBy::Email),
            "first_name" => Some(UserSortBy::FirstName),
            "last_name" => Some(UserSortBy::LastName),
            "status" => Some(UserSortBy::Status),
            "date_add" => Some(UserSortBy::DateAdd),
            "date_upg" => Some(UserSortBy::DateUpg),
            _ => None,
        }
    }
}

/// `page`, `limit`, `sort_by` and `order` from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams<S> {
    pub page: u64,
    pub limit: u64,
    pub sort_by: S,
    pub order: SortOrder,
}

impl<S: SortKey> Default for ListParams<S> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: S::DEFAULT,
            order: SortOrder::Asc,
        }
    }
}

impl<S: SortKey> ListParams<S> {
    pub fn from_query(query: &QueryMap) -> AppResult<Self> {
        let page = positive(query, "page", DEFAULT_PAGE)?;
        let limit = positive(query, "limit", DEFAULT_LIMIT)?;
        checked_offset(page, limit)?;

        let sort_by = match query_value(query, "sort_by") {
            None => S::DEFAULT,
            Some(raw) => S::parse(raw)
                .ok_or_else(|| AppError::BadRequest("invalid 'sort_by' parameter".into()))?,
        };

        let order = match query_value(query, "order").map(str::to_uppercase).as_deref() {
            None => SortOrder::Asc,
            Some("ASC") => SortOrder::Asc,
            Some("DESC") => SortOrder::Desc,
            Some(_) => return Err(AppError::BadRequest("invalid 'order' parameter".into())),
        };

        Ok(Self {
            page,
            limit,
            sort_by,
            order,
        })
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// `page`, `from_date` and `to_date` for the order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderListParams {
    pub page: u64,
    pub from_date: NaiveDate,
    /// Inclusive.
    pub to_date: NaiveDate,
}

impl OrderListParams {
    pub fn from_query(query: &QueryMap) -> AppResult<Self> {
        let page = positive(query, "page", DEFAULT_PAGE)?;
        checked_offset(page, ORDERS_PAGE_SIZE)?;
        let from_date = match query_value(query, "from_date") {
            Some(raw) => parse_date(raw, "from_date")?,
            None => NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
        };
        let to_date = match query_value(query, "to_date") {
            Some(raw) => parse_date(raw, "to_date")?,
            None => Utc::now().date_naive(),
        };
        Ok(Self {
            page,
            from_date,
            to_date,
        })
    }

    pub fn limit(&self) -> u64 {
        ORDERS_PAGE_SIZE
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(ORDERS_PAGE_SIZE)
    }
}

fn parse_date(raw: &str, key: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid '{key}' parameter")))
}

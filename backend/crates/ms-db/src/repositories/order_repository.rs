//! Order records for the order service. Amounts are stored as integer cents.

use crate::repositories::{like_pattern, timestamp};
use crate::{DbError, Result as DbErrorResult};

use error_location::ErrorLocation;
use ms_core::{Money, NewOrder, Order, OrderStatus};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

const TABLE: &str = "orders";
const COLUMNS: &str = "id, member_id, product_name, quantity, unit_price, total_amount, status, order_memo, created_at, updated_at";

/// Size of the "recent orders" listing.
pub const RECENT_ORDER_LIMIT: i64 = 10;

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    member_id: i64,
    product_name: String,
    quantity: i64,
    unit_price: i64,
    total_amount: i64,
    status: String,
    order_memo: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbErrorResult<Self> {
        let status = OrderStatus::from_str(&row.status).map_err(|e| DbError::InvalidRow {
            table: TABLE,
            message: format!("Invalid OrderStatus in orders.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let quantity = i32::try_from(row.quantity).map_err(|_| DbError::InvalidRow {
            table: TABLE,
            message: format!("quantity out of range: {}", row.quantity),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Order {
            id: row.id,
            member_id: row.member_id,
            product_name: row.product_name,
            quantity,
            unit_price: Money::from_cents(row.unit_price),
            total_amount: Money::from_cents(row.total_amount),
            status,
            order_memo: row.order_memo,
            created_at: timestamp(TABLE, "created_at", row.created_at)?,
            updated_at: timestamp(TABLE, "updated_at", row.updated_at)?,
        })
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, order: &NewOrder) -> DbErrorResult<Order> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO orders (
                    member_id, product_name, quantity, unit_price, total_amount, status,
                    order_memo, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.member_id)
        .bind(&order.product_name)
        .bind(order.quantity)
        .bind(order.unit_price.cents())
        .bind(order.total_amount.cents())
        .bind(order.status.as_str())
        .bind(&order.order_memo)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or_else(|| DbError::Initialization {
            message: format!("order {} vanished after insert", id),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// One zero-based page ordered by id.
    pub async fn find_page(&self, page: i64, size: i64) -> DbErrorResult<Vec<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(size)
            .bind(page.saturating_mul(size))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY id");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn find_by_member(&self, member_id: i64) -> DbErrorResult<Vec<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE member_id = ? ORDER BY id");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn find_by_status(&self, status: OrderStatus) -> DbErrorResult<Vec<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE status = ? ORDER BY id");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn search_by_product_name(&self, product_name: &str) -> DbErrorResult<Vec<Order>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders WHERE product_name LIKE ? ESCAPE '\\' ORDER BY id"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(like_pattern(product_name))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Orders created within `[start, end]`, both ends inclusive.
    pub async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbErrorResult<Vec<Order>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM orders WHERE created_at BETWEEN ? AND ? ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(start.timestamp())
            .bind(end.timestamp())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Newest orders first.
    pub async fn find_recent(&self) -> DbErrorResult<Vec<Order>> {
        let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT ?");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(RECENT_ORDER_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Persist every mutable field of `order`; returns false if the row is gone.
    pub async fn update(&self, order: &Order) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE orders
                SET quantity = ?, unit_price = ?, total_amount = ?, status = ?, order_memo = ?,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(order.quantity)
        .bind(order.unit_price.cents())
        .bind(order.total_amount.cents())
        .bind(order.status.as_str())
        .bind(&order.order_memo)
        .bind(Utc::now().timestamp())
        .bind(order.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum of order totals for a member; zero when there are none.
    pub async fn total_amount_by_member(&self, member_id: i64) -> DbErrorResult<Money> {
        let cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE member_id = ?")
                .bind(member_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(Money::from_cents(cents))
    }

    pub async fn count_by_status(&self, status: OrderStatus) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

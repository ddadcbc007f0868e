use ms_core::{Money, Order, OrderStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub member_id: i64,
    /// Display name from member-service, or the placeholder name
    pub member_name: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub status_description: String,
    pub order_memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn new(order: Order, member_name: String) -> Self {
        Self {
            id: order.id,
            member_id: order.member_id,
            member_name,
            product_name: order.product_name,
            quantity: order.quantity,
            unit_price: order.unit_price,
            total_amount: order.total_amount,
            status: order.status,
            status_description: order.status.description().to_string(),
            order_memo: order.order_memo,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// List entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub product_name: String,
    pub quantity: i32,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderSummary {
    pub fn new(order: Order, member_name: String) -> Self {
        Self {
            id: order.id,
            member_id: order.member_id,
            member_name,
            product_name: order.product_name,
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

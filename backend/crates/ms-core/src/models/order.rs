//! Order entity managed by the order service.

use crate::{CoreError, MAX_ORDER_TOTAL, Money, OrderStatus, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Member id owned by the member service; not enforced locally
    pub member_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Money,
    /// Always `unit_price * quantity`
    pub total_amount: Money,
    pub status: OrderStatus,
    pub order_memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Compute and bound-check an order total.
    #[track_caller]
    pub fn total_for(unit_price: Money, quantity: i32) -> CoreErrorResult<Money> {
        if quantity <= 0 {
            return Err(CoreError::Validation {
                message: "quantity must be greater than 0".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !unit_price.is_positive() {
            return Err(CoreError::Validation {
                message: "unitPrice must be greater than 0".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match unit_price.checked_mul(i64::from(quantity)) {
            Some(total) if total <= MAX_ORDER_TOTAL => Ok(total),
            _ => Err(CoreError::InvalidAmount {
                message: format!("order total exceeds {}", MAX_ORDER_TOTAL),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Apply a new quantity and/or unit price, keeping the total consistent.
    #[track_caller]
    pub fn reprice(&mut self, quantity: Option<i32>, unit_price: Option<Money>) -> CoreErrorResult<()> {
        let quantity = quantity.unwrap_or(self.quantity);
        let unit_price = unit_price.unwrap_or(self.unit_price);
        self.total_amount = Self::total_for(unit_price, quantity)?;
        self.quantity = quantity;
        self.unit_price = unit_price;
        Ok(())
    }
}

/// Fields supplied when placing an order; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub member_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub order_memo: Option<String>,
}

impl NewOrder {
    #[track_caller]
    pub fn new(
        member_id: i64,
        product_name: String,
        quantity: i32,
        unit_price: Money,
        order_memo: Option<String>,
    ) -> CoreErrorResult<Self> {
        let total_amount = Order::total_for(unit_price, quantity)?;
        Ok(Self {
            member_id,
            product_name,
            quantity,
            unit_price,
            total_amount,
            status: OrderStatus::Pending,
            order_memo,
        })
    }
}

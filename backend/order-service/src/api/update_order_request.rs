use ms_core::{Money, Order, OrderStatus};
use ms_web::{ApiResult, FieldErrors};

use serde::Deserialize;

/// Partial update. Changing quantity or unit price recomputes the total.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub quantity: Option<i32>,
    pub unit_price: Option<Money>,
    pub status: Option<String>,
    pub order_memo: Option<String>,
}

impl UpdateOrderRequest {
    pub fn apply_to(self, order: &mut Order) -> ApiResult<()> {
        let mut errors = FieldErrors::new();

        if let Some(quantity) = self.quantity {
            errors.check(quantity > 0, "quantity", "quantity must be greater than 0");
        }
        if let Some(price) = self.unit_price {
            errors.check(price.is_positive(), "unitPrice", "unitPrice must be greater than 0");
        }
        if let Some(memo) = &self.order_memo {
            errors.check_max_length("orderMemo", memo, 500);
        }

        let status = match self.status.as_deref().map(str::parse::<OrderStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(_)) => {
                errors.add(
                    "status",
                    "status must be one of PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED, CANCELLED, REFUNDED",
                );
                None
            }
            None => None,
        };

        errors.finish()?;

        if self.quantity.is_some() || self.unit_price.is_some() {
            order.reprice(self.quantity, self.unit_price)?;
        }
        if let Some(status) = status {
            order.status = status;
        }
        if let Some(memo) = self.order_memo {
            order.order_memo = Some(memo);
        }

        Ok(())
    }
}

use ms_core::{MAX_ORDER_TOTAL, Money, NewOrder};
use ms_web::{ApiError, ApiResult, FieldErrors};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub member_id: Option<i64>,
    #[serde(default)]
    pub product_name: String,
    pub quantity: Option<i32>,
    pub unit_price: Option<Money>,
    pub order_memo: Option<String>,
}

impl CreateOrderRequest {
    /// Validate every field and build a pending order.
    pub fn into_new_order(self) -> ApiResult<NewOrder> {
        let mut errors = FieldErrors::new();

        errors.check(self.member_id.is_some(), "memberId", "memberId is required");
        errors.require_not_blank("productName", &self.product_name);
        errors.check_max_length("productName", &self.product_name, 100);

        match self.quantity {
            None => errors.add("quantity", "quantity is required"),
            Some(quantity) => {
                errors.check(quantity > 0, "quantity", "quantity must be greater than 0")
            }
        }
        match self.unit_price {
            None => errors.add("unitPrice", "unitPrice is required"),
            Some(price) => {
                errors.check(price.is_positive(), "unitPrice", "unitPrice must be greater than 0")
            }
        }
        if let Some(memo) = &self.order_memo {
            errors.check_max_length("orderMemo", memo, 500);
        }

        if let (Some(quantity), Some(price)) = (self.quantity, self.unit_price)
            && quantity > 0
            && price.is_positive()
        {
            let within_limit = price
                .checked_mul(i64::from(quantity))
                .is_some_and(|total| total <= MAX_ORDER_TOTAL);
            errors.check(
                within_limit,
                "totalAmount",
                format!("order total must not exceed {}", MAX_ORDER_TOTAL),
            );
        }

        errors.finish()?;

        match (self.member_id, self.quantity, self.unit_price) {
            (Some(member_id), Some(quantity), Some(unit_price)) => Ok(NewOrder::new(
                member_id,
                self.product_name.trim().to_string(),
                quantity,
                unit_price,
                self.order_memo,
            )?),
            _ => Err(ApiError::validation("request", "incomplete order")),
        }
    }
}

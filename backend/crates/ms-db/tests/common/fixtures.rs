use ms_core::{MemberStatus, Money, NewMember, NewOrder};

/// Creates a NewMember with a unique username/email derived from `tag`
pub fn create_test_member(tag: &str) -> NewMember {
    NewMember {
        username: format!("user_{}", tag),
        password_hash: "$2b$10$placeholderhashplaceholderhashplaceholderhash".to_string(),
        email: format!("{}@example.com", tag),
        full_name: format!("Test {}", tag),
        phone_number: Some("010-1234-5678".to_string()),
        status: MemberStatus::Active,
    }
}

/// Creates a pending NewOrder; total is computed from price and quantity
pub fn create_test_order(member_id: i64, product_name: &str, quantity: i32, cents: i64) -> NewOrder {
    NewOrder::new(
        member_id,
        product_name.to_string(),
        quantity,
        Money::from_cents(cents),
        Some("leave at door".to_string()),
    )
    .expect("valid test order")
}

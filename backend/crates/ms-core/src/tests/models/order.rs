use crate::{CoreError, MAX_ORDER_TOTAL, Money, NewOrder, Order, OrderStatus};

#[test]
fn test_order_total_for() {
    let total = Order::total_for(Money::from_cents(1_250), 3).unwrap();
    assert_eq!(total, Money::from_cents(3_750));
}

#[test]
fn test_order_total_rejects_non_positive_inputs() {
    assert!(matches!(
        Order::total_for(Money::from_cents(100), 0),
        Err(CoreError::Validation { .. })
    ));
    assert!(matches!(
        Order::total_for(Money::ZERO, 1),
        Err(CoreError::Validation { .. })
    ));
}

#[test]
fn test_order_total_upper_bound() {
    assert_eq!(Order::total_for(MAX_ORDER_TOTAL, 1).unwrap(), MAX_ORDER_TOTAL);
    assert!(matches!(
        Order::total_for(MAX_ORDER_TOTAL, 2),
        Err(CoreError::InvalidAmount { .. })
    ));
}

#[test]
fn test_new_order_defaults_to_pending() {
    let order = NewOrder::new(1, "Keyboard".into(), 2, Money::from_cents(4_500), None).unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Money::from_cents(9_000));
}

#[test]
fn test_order_reprice_keeps_total_consistent() {
    let now = chrono::Utc::now();
    let mut order = Order {
        id: 1,
        member_id: 1,
        product_name: "Mouse".into(),
        quantity: 1,
        unit_price: Money::from_cents(2_000),
        total_amount: Money::from_cents(2_000),
        status: OrderStatus::Pending,
        order_memo: None,
        created_at: now,
        updated_at: now,
    };

    order.reprice(Some(4), None).unwrap();
    assert_eq!(order.total_amount, Money::from_cents(8_000));

    order.reprice(None, Some(Money::from_cents(1_000))).unwrap();
    assert_eq!(order.total_amount, Money::from_cents(4_000));

    assert!(order.reprice(Some(-1), None).is_err());
    assert_eq!(order.quantity, 4);
}

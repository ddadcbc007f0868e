use crate::{MemberStatus, OrderStatus};

use std::str::FromStr;

#[test]
fn test_member_status_round_trip() {
    for status in [
        MemberStatus::Active,
        MemberStatus::Inactive,
        MemberStatus::Suspended,
    ] {
        assert_eq!(MemberStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert_eq!(MemberStatus::from_str("active").unwrap(), MemberStatus::Active);
    assert!(MemberStatus::from_str("UNKNOWN").is_err());
}

#[test]
fn test_order_status_from_str() {
    assert_eq!(OrderStatus::from_str("SHIPPED").unwrap(), OrderStatus::Shipped);
    assert_eq!(OrderStatus::from_str("refunded").unwrap(), OrderStatus::Refunded);
    assert!(OrderStatus::from_str("LOST").is_err());
}

#[test]
fn test_status_json_uses_uppercase() {
    assert_eq!(
        serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
        "\"CANCELLED\""
    );
    assert_eq!(
        serde_json::from_str::<MemberStatus>("\"SUSPENDED\"").unwrap(),
        MemberStatus::Suspended
    );
}

#[test]
fn test_member_status_descriptions() {
    assert_eq!(MemberStatus::Active.description(), "Active");
    assert_eq!(MemberStatus::Suspended.description(), "Suspended");
}

#[test]
fn test_order_status_descriptions() {
    assert_eq!(OrderStatus::Pending.description(), "Pending");
    assert_eq!(OrderStatus::Refunded.description(), "Refunded");
}

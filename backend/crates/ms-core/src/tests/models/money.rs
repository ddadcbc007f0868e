use crate::Money;

#[test]
fn test_money_from_decimal() {
    assert_eq!(Money::from_decimal(15000.5).unwrap().cents(), 1_500_050);
    assert_eq!(Money::from_decimal(0.1).unwrap().cents(), 10);
    assert!(Money::from_decimal(1.005).is_err());
    assert!(Money::from_decimal(f64::NAN).is_err());
}

#[test]
fn test_money_display() {
    assert_eq!(Money::from_cents(1_500_050).to_string(), "15000.50");
    assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
}

#[test]
fn test_money_json() {
    let money: Money = serde_json::from_str("25000.99").unwrap();
    assert_eq!(money.cents(), 2_500_099);
    assert_eq!(serde_json::to_string(&money).unwrap(), "25000.99");
    assert!(serde_json::from_str::<Money>("1.234").is_err());
}

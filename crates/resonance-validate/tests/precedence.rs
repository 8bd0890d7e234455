//! Rule precedence and purity properties of `validate_field`.

mod common;

use proptest::prelude::*;
use resonance_validate::{validate_field, ValidationRule};
use serde_json::{json, Value};

use common::every_constraint;

fn check(value: Value) -> Option<String> {
    validate_field("f", &value, &every_constraint())
}

#[test]
fn test_each_step_reports_in_order() {
    assert_eq!(check(json!("")).as_deref(), Some("required"));
    assert_eq!(check(Value::Null).as_deref(), Some("required"));
    assert_eq!(check(json!("a")).as_deref(), Some("min_length"));
    assert_eq!(check(json!("abcdefg")).as_deref(), Some("max_length"));
    assert_eq!(check(json!("AB")).as_deref(), Some("pattern"));
    assert_eq!(check(json!("09")).as_deref(), Some("min"));
    assert_eq!(check(json!("9999")).as_deref(), Some("max"));
    assert_eq!(check(json!("666")).as_deref(), Some("f is invalid"));
    assert_eq!(check(json!("123")), None);
}

#[test]
fn test_first_failure_hides_later_ones() {
    // too long, wrong pattern and out of range at once
    assert_eq!(check(json!("ABCDEFGH")).as_deref(), Some("max_length"));
    // wrong pattern and below min
    assert_eq!(check(json!("0-1")).as_deref(), Some("pattern"));
}

#[test]
fn test_optional_empty_string_short_circuits() {
    let rule = ValidationRule::new().min_length(5);
    assert_eq!(validate_field("bio", &json!(""), &rule), None);
}

#[test]
fn test_required_message_beats_min_length() {
    let rule = ValidationRule::new().required().min_length_msg(5, "short");
    assert_eq!(
        validate_field("name", &json!(""), &rule).as_deref(),
        Some("name is required")
    );
}

fn satisfies_every_constraint(s: &str) -> bool {
    let len = s.chars().count();
    let pattern_ok = !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase());
    let number = s.trim().parse::<f64>().unwrap_or(f64::NAN);
    (2..=6).contains(&len)
        && pattern_ok
        && !(number < 10.0)
        && !(number > 5000.0)
        && s != "666"
}

proptest! {
    #[test]
    fn prop_validate_field_is_pure(s in "[0-9a-zA-Z ]{0,8}") {
        let rule = every_constraint();
        let first = validate_field("f", &json!(s), &rule);
        let second = validate_field("f", &json!(s), &rule);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_valid_iff_every_constraint_holds(s in "[0-9a-z]{0,8}") {
        let result = check(json!(s.clone()));
        if s.is_empty() {
            prop_assert_eq!(result.as_deref(), Some("required"));
        } else {
            prop_assert_eq!(result.is_none(), satisfies_every_constraint(&s));
        }
    }

    #[test]
    fn prop_optional_falsy_values_pass(n in 1usize..50) {
        let rule = ValidationRule::new()
            .min_length(n)
            .min(1.0)
            .custom(|_: &Value| false);
        for falsy in [json!(""), Value::Null, json!(0), json!(false), json!([])] {
            prop_assert_eq!(validate_field("opt", &falsy, &rule), None);
        }
    }
}

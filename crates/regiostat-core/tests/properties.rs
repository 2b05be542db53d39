use std::cmp::Ordering;

use proptest::prelude::*;
use regiostat_core::collate::sort_unique;
use regiostat_core::{collate, color_for, colors_for, compare_periods, safe_parse_int};
use serde_json::json;

proptest! {
    #[test]
    fn integers_and_their_strings_agree(n in any::<i64>()) {
        prop_assert_eq!(safe_parse_int(&json!(n)), n);
        if n != i64::MIN {
            prop_assert_eq!(safe_parse_int(&json!(n.to_string())), n);
        }
    }

    #[test]
    fn non_numeric_strings_are_zero(s in "[а-яА-Я /]{0,12}") {
        prop_assert_eq!(safe_parse_int(&json!(s)), 0);
    }

    #[test]
    fn color_is_stable_and_in_range(topic in ".{0,40}") {
        let a = color_for(&topic);
        let b = color_for(&topic);
        prop_assert_eq!(a, b);
        prop_assert!(a.hue < 360);
        prop_assert!((60..=80).contains(&a.saturation));
        prop_assert!((50..=65).contains(&a.lightness));
    }

    #[test]
    fn superset_keeps_assigned_colors(
        subset in proptest::collection::vec(".{1,12}", 1..5),
        extra in proptest::collection::vec(".{1,12}", 0..5),
    ) {
        let small = colors_for(&subset);
        let mut all = subset.clone();
        all.extend(extra);
        let large = colors_for(&all);
        for (topic, color) in &small {
            prop_assert_eq!(&large[topic], color);
        }
    }

    #[test]
    fn collate_is_antisymmetric(a in "[а-яёА-ЯЁa-z0-9 -]{0,10}", b in "[а-яёА-ЯЁa-z0-9 -]{0,10}") {
        prop_assert_eq!(collate(&a, &b), collate(&b, &a).reverse());
        prop_assert_eq!(collate(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn sort_unique_is_idempotent(mut values in proptest::collection::vec("[а-яёА-ЯЁ]{1,6}", 0..20)) {
        sort_unique(&mut values);
        let once = values.clone();
        sort_unique(&mut values);
        prop_assert_eq!(once, values);
    }

    #[test]
    fn period_order_follows_calendar(
        d1 in 1u32..=28, m1 in 1u32..=12, y1 in 2000i32..2040,
        d2 in 1u32..=28, m2 in 1u32..=12, y2 in 2000i32..2040,
    ) {
        let a = format!("{d1:02}.{m1:02}.{y1}");
        let b = format!("{d2:02}.{m2:02}.{y2}");
        prop_assert_eq!(compare_periods(&a, &b), (y1, m1, d1).cmp(&(y2, m2, d2)));
    }
}

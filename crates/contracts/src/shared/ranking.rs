//! Ranking by a numeric field ("top rated", "most popular").

use std::cmp::Ordering;

use serde_json::Value;

use super::numeric::coerce_value;

/// Types whose fields can be read as numbers by name.
/// Unknown, missing or non-numeric fields read as `0`.
pub trait NumericFields {
    fn numeric_field(&self, field: &str) -> f64;
}

impl NumericFields for Value {
    fn numeric_field(&self, field: &str) -> f64 {
        self.get(field).map(coerce_value).unwrap_or(0.0)
    }
}

/// Stable descending sort by `field`.
pub fn sort_desc_by<T: NumericFields>(items: &mut [T], field: &str) {
    items.sort_by(|a, b| compare_desc(a.numeric_field(field), b.numeric_field(field)));
}

/// First `n` items by `field`, highest first. Equal values keep their input
/// order. The input is left untouched.
pub fn top_n<T: NumericFields + Clone>(items: &[T], field: &str, n: usize) -> Vec<T> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(f64, &T)> = items
        .iter()
        .map(|item| (item.numeric_field(field), item))
        .collect();
    ranked.sort_by(|a, b| compare_desc(a.0, b.0));

    ranked
        .into_iter()
        .take(n)
        .map(|(_, item)| item.clone())
        .collect()
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(items: &[Value]) -> Vec<i64> {
        items.iter().filter_map(|v| v["id"].as_i64()).collect()
    }

    #[test]
    fn test_top_n_coerces_and_sorts() {
        let items = vec![
            json!({"id": 1, "rating": "3"}),
            json!({"id": 2, "rating": 5}),
            json!({"id": 3, "rating": null}),
        ];
        assert_eq!(ids(&top_n(&items, "rating", 2)), vec![2, 1]);
    }

    #[test]
    fn test_top_n_bounds() {
        let items = vec![
            json!({"id": 1, "rating": "1"}),
            json!({"id": 2, "rating": "4.5"}),
        ];
        assert!(top_n(&items, "rating", 0).is_empty());
        assert_eq!(ids(&top_n(&items, "rating", 10)), vec![2, 1]);
        assert!(top_n::<Value>(&[], "rating", 3).is_empty());
    }

    #[test]
    fn test_top_n_is_stable_for_ties() {
        let items = vec![
            json!({"id": 1, "rating": "4"}),
            json!({"id": 2}),
            json!({"id": 3, "rating": 4}),
            json!({"id": 4, "rating": "bad"}),
            json!({"id": 5, "rating": "4.0"}),
        ];
        assert_eq!(ids(&top_n(&items, "rating", 5)), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_top_n_leaves_input_alone() {
        let items = vec![json!({"id": 1, "rating": 1}), json!({"id": 2, "rating": 2})];
        let before = items.clone();
        let _ = top_n(&items, "rating", 1);
        assert_eq!(items, before);
    }

    #[test]
    fn test_sort_desc_by() {
        let mut items = vec![
            json!({"id": 1, "price": "10"}),
            json!({"id": 2, "price": "25.5"}),
            json!({"id": 3}),
        ];
        sort_desc_by(&mut items, "price");
        assert_eq!(ids(&items), vec![2, 1, 3]);
    }
}

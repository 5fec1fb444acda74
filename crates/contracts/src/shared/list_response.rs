//! Canonical handling of list endpoints.
//!
//! Some endpoints answer with a paginated envelope (`{"count", "next",
//! "previous", "results"}`), others with a bare array. Pages never look at the
//! envelope; they get one `Vec<T>` out of [`ListResponse::into_items`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Why a list response could not be read. Never fatal: the list degrades to
/// empty and the condition is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("unexpected list response shape: {0}")]
    UnexpectedShape(&'static str),
    #[error("list items could not be decoded: {0}")]
    InvalidItems(String),
}

/// Paginated envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse<T> {
    /// `null` or no body at all.
    Absent,
    Paginated(Paginated<T>),
    Direct(Vec<T>),
    Malformed(MalformedResponse),
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Classify a raw JSON body. Never fails.
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            return ListResponse::Absent;
        }

        let mut value = value;
        if let Some(fields) = value.as_object_mut() {
            if let Some(results) = fields.get_mut("results").filter(|r| r.is_array()).map(Value::take) {
                return match serde_json::from_value::<Vec<T>>(results) {
                    Ok(results) => ListResponse::Paginated(Paginated {
                        count: fields.get("count").and_then(lenient_count),
                        next: fields.get("next").and_then(page_link),
                        previous: fields.get("previous").and_then(page_link),
                        results,
                    }),
                    Err(e) => ListResponse::Malformed(MalformedResponse::InvalidItems(e.to_string())),
                };
            }
        }

        if value.is_array() {
            return match serde_json::from_value::<Vec<T>>(value) {
                Ok(items) => ListResponse::Direct(items),
                Err(e) => ListResponse::Malformed(MalformedResponse::InvalidItems(e.to_string())),
            };
        }

        ListResponse::Malformed(MalformedResponse::UnexpectedShape(shape_name(&value)))
    }
}

impl<T> ListResponse<T> {
    /// Items in server order. A malformed response is handed to `on_malformed`
    /// and yields an empty list.
    pub fn into_items_with(self, on_malformed: impl FnOnce(&MalformedResponse)) -> Vec<T> {
        match self {
            ListResponse::Absent => Vec::new(),
            ListResponse::Paginated(page) => page.results,
            ListResponse::Direct(items) => items,
            ListResponse::Malformed(reason) => {
                on_malformed(&reason);
                Vec::new()
            }
        }
    }

    /// Items in server order, reporting malformed responses through `log`.
    pub fn into_items(self) -> Vec<T> {
        self.into_items_with(|reason| log::warn!("{}", reason))
    }

    /// Total count announced by a paginated envelope.
    pub fn total_count(&self) -> Option<u64> {
        match self {
            ListResponse::Paginated(page) => page.count,
            ListResponse::Direct(items) => Some(items.len() as u64),
            ListResponse::Absent | ListResponse::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ListResponse::Malformed(_))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ListResponse::from_value(value))
    }
}

/// Shorthand for `ListResponse::from_value(value).into_items()`.
pub fn normalize<T: DeserializeOwned>(value: Value) -> Vec<T> {
    ListResponse::from_value(value).into_items()
}

/// Envelope metadata is advisory: a count sent as a string is accepted, anything
/// else unreadable becomes `None`.
fn lenient_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn page_link(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without results array",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paginated_and_direct_give_same_items() {
        let paginated: Vec<Value> = normalize(json!({"count": 1, "results": [{"id": 1}]}));
        let direct: Vec<Value> = normalize(json!([{"id": 1}]));
        assert_eq!(paginated, vec![json!({"id": 1})]);
        assert_eq!(paginated, direct);
    }

    #[test]
    fn test_loose_envelope_metadata_keeps_items() {
        let string_count: Vec<Value> = normalize(json!({"count": "1", "results": [{"id": 1}]}));
        assert_eq!(string_count, vec![json!({"id": 1})]);

        let numeric_next: Vec<Value> = normalize(json!({"next": 2, "results": [{"id": 1}]}));
        assert_eq!(numeric_next, vec![json!({"id": 1})]);

        let response: ListResponse<Value> =
            ListResponse::from_value(json!({"count": "7", "previous": {}, "results": []}));
        assert_eq!(response.total_count(), Some(7));
        match response {
            ListResponse::Paginated(page) => assert_eq!(page.previous, None),
            other => panic!("expected paginated, got {:?}", other),
        }

        let garbage_count: ListResponse<Value> =
            ListResponse::from_value(json!({"count": "many", "results": [1]}));
        assert_eq!(garbage_count.total_count(), None);
    }

    #[test]
    fn test_malformed_inputs_degrade_to_empty() {
        for input in [json!(null), json!({}), json!("string"), json!(42), json!({"results": "x"})] {
            let items: Vec<Value> = normalize(input);
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_null_is_not_reported() {
        let mut reported = false;
        let items: Vec<Value> =
            ListResponse::from_value(json!(null)).into_items_with(|_| reported = true);
        assert!(items.is_empty());
        assert!(!reported);
    }

    #[test]
    fn test_unexpected_shape_is_reported() {
        let mut reported = None;
        let items: Vec<Value> = ListResponse::from_value(json!({"detail": "oops"}))
            .into_items_with(|reason| reported = Some(reason.clone()));
        assert!(items.is_empty());
        assert_eq!(
            reported,
            Some(MalformedResponse::UnexpectedShape("object without results array"))
        );
    }

    #[test]
    fn test_typed_items_that_do_not_decode_are_malformed() {
        #[derive(Debug, Deserialize)]
        struct Item {
            #[allow(dead_code)]
            id: i64,
        }
        let response: ListResponse<Item> = ListResponse::from_value(json!([{"id": "x"}]));
        assert!(response.is_malformed());
    }

    #[test]
    fn test_deserialize_from_body() {
        let body = r#"{"count": 2, "next": null, "previous": null, "results": [{"id": 1}, {"id": 2}]}"#;
        let response: ListResponse<Value> = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_count(), Some(2));
        assert_eq!(response.into_items().len(), 2);
    }
}

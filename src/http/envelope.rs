//! Decoding of list and entity responses.
//!
//! The backend wraps payloads inconsistently. Rather than searching the body
//! for any array, decoding accepts a closed set of shapes and reports
//! anything else as [`ApiError::Decode`]:
//!
//! * a bare array;
//! * an object with `items`, `data`, `results` or the resource's collection
//!   key (e.g. `orders`) holding the array;
//! * `data` holding an object that itself has one of those keys.
//!
//! Pagination is read from a sibling `pagination` object when present.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::PaginationPatch;
use crate::error::ApiError;

/// One page of a decoded list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<PaginationPatch>,
}

const LIST_KEYS: [&str; 3] = ["items", "data", "results"];

pub fn decode_list<T: DeserializeOwned>(body: Value, collection_key: &str) -> Result<ListPage<T>, ApiError> {
    match body {
        Value::Array(items) => Ok(ListPage { items: decode_items(items)?, pagination: None }),
        Value::Object(object) => decode_list_object(object, collection_key, true),
        other => Err(ApiError::Decode(format!("expected a list response, got {}", kind(&other)))),
    }
}

fn decode_list_object<T: DeserializeOwned>(
    mut object: Map<String, Value>,
    collection_key: &str,
    allow_nested: bool,
) -> Result<ListPage<T>, ApiError> {
    let pagination = match object.remove("pagination") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<PaginationPatch>(value)
                .map_err(|e| ApiError::Decode(format!("invalid pagination: {e}")))?,
        ),
    };

    let key = LIST_KEYS
        .iter()
        .copied()
        .chain(std::iter::once(collection_key))
        .find(|key| object.contains_key(*key))
        .ok_or_else(|| {
            ApiError::Decode(format!(
                "expected one of items, data, results or {collection_key} in list response"
            ))
        })?;

    match object.remove(key) {
        Some(Value::Array(items)) => Ok(ListPage { items: decode_items(items)?, pagination }),
        Some(Value::Object(inner)) if key == "data" && allow_nested => {
            let mut page = decode_list_object(inner, collection_key, false)?;
            if page.pagination.is_none() {
                page.pagination = pagination;
            }
            Ok(page)
        }
        Some(other) => Err(ApiError::Decode(format!("`{key}` is {}, expected a list", kind(&other)))),
        None => Err(ApiError::Decode(format!("`{key}` is missing"))),
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ApiError::Decode(format!("item {index}: {e}")))
        })
        .collect()
}

/// Decodes a single entity from `{<entity_key>: ..}`, `{data: {<entity_key>: ..}}`,
/// `{data: ..}` or the bare object, chosen by which keys are present.
pub fn decode_entity<T: DeserializeOwned>(body: Value, entity_key: &str) -> Result<T, ApiError> {
    decode_optional_entity(body, entity_key)?
        .ok_or_else(|| ApiError::Decode(format!("response does not contain a {entity_key}")))
}

/// Like [`decode_entity`], but a body that carries no entity at all (for
/// example a bare `{"message": "Fee deleted"}`) yields `None`.
pub fn decode_optional_entity<T: DeserializeOwned>(body: Value, entity_key: &str) -> Result<Option<T>, ApiError> {
    let mut object = match body {
        Value::Object(object) => object,
        Value::Null => return Ok(None),
        other => return Err(ApiError::Decode(format!("expected an object, got {}", kind(&other)))),
    };

    let candidate = if let Some(value) = object.remove(entity_key) {
        value
    } else if let Some(data) = object.remove("data") {
        match data {
            Value::Object(mut inner) => match inner.remove(entity_key) {
                Some(value) => value,
                None => Value::Object(inner),
            },
            other => other,
        }
    } else if object.contains_key("id") || object.contains_key("_id") {
        Value::Object(object)
    } else {
        return Ok(None);
    };

    if candidate.is_null() {
        return Ok(None);
    }
    serde_json::from_value(candidate)
        .map(Some)
        .map_err(|e| ApiError::Decode(format!("invalid {entity_key}: {e}")))
}

/// Human-readable `message` carried by a body, if any.
pub fn extract_message(body: &Value) -> Option<String> {
    let message = body
        .get("message")
        .or_else(|| body.get("error").and_then(|e| e.get("message")))
        .or_else(|| body.get("error"))?;
    message.as_str().map(str::trim).filter(|m| !m.is_empty()).map(str::to_string)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: String,
    }

    fn ids(page: &ListPage<Row>) -> Vec<&str> {
        page.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn known_shapes_yield_the_same_items() {
        let rows = json!([{"id": "a"}, {"id": "b"}]);
        let shapes = [
            json!({"data": rows.clone(), "pagination": {"currentPage": 1, "totalPages": 2}}),
            json!({"results": rows.clone()}),
            rows.clone(),
            json!({"items": rows.clone()}),
            json!({"success": true, "orders": rows.clone()}),
            json!({"success": true, "data": {"orders": rows.clone(), "pagination": {"page": 1}}}),
        ];
        for shape in shapes {
            let page = decode_list::<Row>(shape.clone(), "orders").unwrap();
            assert_eq!(ids(&page), ["a", "b"], "shape {shape}");
        }
    }

    #[test]
    fn pagination_is_read_when_present() {
        let page = decode_list::<Row>(
            json!({"data": [], "pagination": {"currentPage": 2, "hasNextPage": true}}),
            "fees",
        )
        .unwrap();
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.current_page, Some(2));
        assert_eq!(pagination.has_next_page, Some(true));
        assert_eq!(pagination.total_pages, None);

        let bare = decode_list::<Row>(json!({"results": []}), "fees").unwrap();
        assert_eq!(bare.pagination, None);
    }

    #[test]
    fn outer_pagination_applies_to_nested_data() {
        let page = decode_list::<Row>(
            json!({"data": {"fees": [{"id": "f"}]}, "pagination": {"totalPages": 9}}),
            "fees",
        )
        .unwrap();
        assert_eq!(page.pagination.unwrap().total_pages, Some(9));
    }

    #[test]
    fn unknown_shapes_are_decode_errors() {
        let err = decode_list::<Row>(json!({"success": true, "stuff": [{"id": "a"}]}), "orders").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = decode_list::<Row>(json!({"data": "nope"}), "orders").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = decode_list::<Row>(json!([{"name": "missing id"}]), "orders").unwrap_err();
        assert!(err.to_string().contains("item 0"));
    }

    #[test]
    fn entity_is_found_under_known_keys() {
        let wrapped = decode_entity::<Row>(json!({"success": true, "fee": {"id": "f1"}}), "fee").unwrap();
        let nested = decode_entity::<Row>(json!({"data": {"fee": {"id": "f2"}}}), "fee").unwrap();
        let data = decode_entity::<Row>(json!({"data": {"id": "f3"}}), "fee").unwrap();
        let bare = decode_entity::<Row>(json!({"_id": "ignored", "id": "f4"}), "fee").unwrap();
        assert_eq!([wrapped.id, nested.id, data.id, bare.id], ["f1", "f2", "f3", "f4"]);
    }

    #[test]
    fn message_only_body_has_no_entity() {
        let none = decode_optional_entity::<Row>(json!({"message": "Fee deleted"}), "fee").unwrap();
        assert_eq!(none, None);
        assert!(decode_entity::<Row>(json!({"message": "ok"}), "fee").is_err());
    }

    #[test]
    fn extracts_message_from_common_fields() {
        assert_eq!(extract_message(&json!({"message": "not found"})).as_deref(), Some("not found"));
        assert_eq!(extract_message(&json!({"error": "bad token"})).as_deref(), Some("bad token"));
        assert_eq!(extract_message(&json!({"error": {"message": "nested"}})).as_deref(), Some("nested"));
        assert_eq!(extract_message(&json!({"message": "  "})), None);
        assert_eq!(extract_message(&json!([1, 2])), None);
    }
}

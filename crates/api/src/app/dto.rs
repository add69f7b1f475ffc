use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use stockroom_core::ValidationErrors;
use stockroom_inventory::{Item, ItemDraft, ItemFilter, ItemPatch};

// -------------------------
// Request DTOs
// -------------------------

/// Order in which item body violations are reported.
const ITEM_FIELDS: [&str; 4] = ["name", "description", "price", "is_available"];

/// Query string of `GET /items/search/`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl SearchParams {
    /// Non-finite bounds (`NaN`, `inf`) are rejected rather than silently
    /// matching everything or nothing.
    pub fn into_filter(self) -> Result<ItemFilter, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut filter = ItemFilter::new();
        if let Some(q) = self.q {
            filter = filter.name_contains(q);
        }
        if let Some(min) = self.min_price {
            if min.is_finite() {
                filter = filter.min_price(min);
            } else {
                errors.push("min_price", "must be a finite number");
            }
        }
        if let Some(max) = self.max_price {
            if max.is_finite() {
                filter = filter.max_price(max);
            } else {
                errors.push("max_price", "must be a finite number");
            }
        }
        errors.into_result().map(|()| filter)
    }
}

/// Body of `POST /items` and `PUT /items/:item_id`.
///
/// Fields are read one by one so that a value of the wrong type is reported
/// against its own field, next to every other violation in the body.
pub fn draft_from_json(body: &Value) -> Result<ItemDraft, ValidationErrors> {
    let obj = as_object(body)?;
    let mut errors = ValidationErrors::new();
    let draft = ItemDraft {
        name: take_field(obj, "name", &mut errors),
        description: take_field(obj, "description", &mut errors),
        price: take_field(obj, "price", &mut errors),
        is_available: take_field(obj, "is_available", &mut errors),
    };
    if errors.is_empty() {
        return Ok(draft);
    }
    draft.collect_violations(&mut errors);
    errors.sort_by_field_order(&ITEM_FIELDS);
    Err(errors)
}

/// Body of `PATCH /items/:item_id`. An explicit `"description": null` clears
/// the description; an absent key leaves it alone.
pub fn patch_from_json(body: &Value) -> Result<ItemPatch, ValidationErrors> {
    let obj = as_object(body)?;
    let mut errors = ValidationErrors::new();
    let description = match obj.get("description") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(_) => take_field::<String>(obj, "description", &mut errors).map(Some),
    };
    let patch = ItemPatch {
        name: take_field(obj, "name", &mut errors),
        description,
        price: take_field(obj, "price", &mut errors),
        is_available: take_field(obj, "is_available", &mut errors),
    };
    if errors.is_empty() {
        return Ok(patch);
    }
    patch.collect_violations(&mut errors);
    errors.sort_by_field_order(&ITEM_FIELDS);
    Err(errors)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.push("body", "expected a JSON object");
        errors
    })
}

// Missing and `null` both read as absent.
fn take_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(field, e.to_string());
                None
            }
        },
    }
}

// -------------------------
// Response bodies
// -------------------------

pub fn welcome_json() -> serde_json::Value {
    serde_json::json!({
        "message": "Welcome to the Stockroom API!",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

pub fn health_json() -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now(),
    })
}

pub fn deleted_json(item: Item) -> serde_json::Value {
    serde_json::json!({
        "message": "Item deleted successfully",
        "deleted_item": item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_finite_bounds_are_rejected() {
        let params = SearchParams {
            min_price: Some(f64::NAN),
            max_price: Some(f64::INFINITY),
            ..SearchParams::default()
        };
        let err = params.into_filter().unwrap_err();
        assert_eq!(err.fields(), vec!["min_price", "max_price"]);
    }

    #[test]
    fn finite_bounds_build_a_filter() {
        let params = SearchParams {
            q: Some("lap".into()),
            min_price: Some(10.0),
            max_price: None,
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter, ItemFilter::new().name_contains("lap").min_price(10.0));
    }

    #[test]
    fn type_error_is_reported_with_the_other_violations() {
        let err = draft_from_json(&json!({ "price": "abc" })).unwrap_err();
        assert_eq!(err.fields(), vec!["name", "price"]);
        assert_eq!(err.violations()[0].message, "field required");
        assert!(err.violations()[1].message.contains("invalid type"));
    }

    #[test]
    fn well_typed_body_becomes_a_draft() {
        let draft = draft_from_json(&json!({ "name": "Lamp", "price": 5, "extra": true })).unwrap();
        assert_eq!(draft, ItemDraft::new("Lamp", 5.0));
    }

    #[test]
    fn non_object_body_is_rejected_as_body() {
        let err = draft_from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(err.fields(), vec!["body"]);
        assert_eq!(patch_from_json(&json!("x")).unwrap_err().fields(), vec!["body"]);
    }

    #[test]
    fn patch_keeps_null_description_distinct_from_absent() {
        assert_eq!(patch_from_json(&json!({})).unwrap().description, None);
        assert_eq!(
            patch_from_json(&json!({ "description": null })).unwrap().description,
            Some(None)
        );

        let err = patch_from_json(&json!({ "description": 3, "price": -1 })).unwrap_err();
        assert_eq!(err.fields(), vec!["description", "price"]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{Entity, ItemId, ValidationErrors};

const FIELD_REQUIRED: &str = "field required";

/// Entity: Item.
///
/// `id` and `created_at` are assigned by the store and never change; the
/// remaining fields are replaced wholesale by `replace` or selectively by
/// `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: Option<String>,
    price: f64,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Build a stored record from validated fields.
    pub fn new(id: ItemId, fields: ItemFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            is_available: fields.is_available,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Overwrite every mutable field.
    pub(crate) fn overwrite(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.is_available = fields.is_available;
    }

    /// Overwrite only the fields present in an already validated patch.
    pub(crate) fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(is_available) = patch.is_available {
            self.is_available = is_available;
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Unvalidated input for create and replace.
///
/// Every field is optional at the type level so that a missing field becomes
/// a validation error listed next to the others instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    /// Check every constraint and collect all violations before failing.
    pub fn validate(self) -> Result<ItemFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.collect_violations(&mut errors);

        match (self.name, self.price) {
            (Some(name), Some(price)) if errors.is_empty() => Ok(ItemFields {
                name,
                description: self.description,
                price,
                is_available: self.is_available.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }

    /// Record every violated constraint, skipping fields that already carry a
    /// violation in `errors` (e.g. a value of the wrong JSON type).
    pub fn collect_violations(&self, errors: &mut ValidationErrors) {
        if !errors.contains("name") {
            match self.name.as_deref() {
                None => errors.push("name", FIELD_REQUIRED),
                Some(name) => check_name(name, errors),
            }
        }
        if !errors.contains("price") {
            match self.price {
                None => errors.push("price", FIELD_REQUIRED),
                Some(price) => check_price(price, errors),
            }
        }
    }
}

/// Validated values for every mutable field of an [`Item`].
///
/// Only obtainable through [`ItemDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    name: String,
    description: Option<String>,
    price: f64,
    is_available: bool,
}

impl ItemFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }
}

/// Unvalidated input for a partial update: absent fields are left untouched.
///
/// `description` distinguishes "not sent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}

impl ItemPatch {
    /// Check the fields that are present; absent fields impose nothing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.collect_violations(&mut errors);
        errors.into_result()
    }

    /// Same as [`ItemDraft::collect_violations`] for the fields that are present.
    pub fn collect_violations(&self, errors: &mut ValidationErrors) {
        if let Some(name) = self.name.as_deref() {
            if !errors.contains("name") {
                check_name(name, errors);
            }
        }
        if let Some(price) = self.price {
            if !errors.contains("price") {
                check_price(price, errors);
            }
        }
    }
}

// A key that is present always yields `Some`, even when its value is `null`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.push("name", "must not be empty");
    }
}

fn check_price(price: f64, errors: &mut ValidationErrors) {
    if !price.is_finite() {
        errors.push("price", "must be a finite number");
    } else if price < 0.0 {
        errors.push("price", "must be greater than or equal to 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_draft_defaults_to_available_without_description() {
        let fields = ItemDraft::new("Minimal Item", 10.0).validate().unwrap();
        assert_eq!(fields.name(), "Minimal Item");
        assert_eq!(fields.price(), 10.0);
        assert!(fields.is_available());
        assert_eq!(fields.description(), None);
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(ItemDraft::new("Freebie", 0.0).validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = ItemDraft::new("Test", -10.0).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["price"]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = ItemDraft::new("   ", 1.0).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
        assert_eq!(err.violations()[0].message, "must not be empty");
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let err = ItemDraft::new("Test", f64::INFINITY).validate().unwrap_err();
        assert_eq!(err.violations()[0].message, "must be a finite number");
    }

    #[test]
    fn every_violation_is_reported() {
        let err = ItemDraft::default().validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "price"]);
        assert!(err.violations().iter().all(|v| v.message == FIELD_REQUIRED));

        let err = ItemDraft::new("", -1.0).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "price"]);
    }

    #[test]
    fn draft_deserializes_with_missing_fields() {
        let draft: ItemDraft = serde_json::from_value(serde_json::json!({ "price": 3.5 })).unwrap();
        assert_eq!(draft.name, None);
        assert_eq!(draft.price, Some(3.5));
    }

    #[test]
    fn patch_validates_only_present_fields() {
        assert!(ItemPatch::default().validate().is_ok());

        let patch = ItemPatch {
            price: Some(-0.01),
            ..ItemPatch::default()
        };
        assert_eq!(patch.validate().unwrap_err().fields(), vec!["price"]);
    }

    #[test]
    fn apply_patch_leaves_absent_fields_untouched() {
        let fields = ItemDraft::new("Original Name", 10.0)
            .with_description("Original description")
            .validate()
            .unwrap();
        let mut item = Item::new(ItemId::new(), fields, Utc::now());

        item.apply_patch(ItemPatch {
            name: Some("Updated Name".to_string()),
            ..ItemPatch::default()
        });

        assert_eq!(item.name(), "Updated Name");
        assert_eq!(item.price(), 10.0);
        assert_eq!(item.description(), Some("Original description"));
    }

    #[test]
    fn patch_tells_explicit_null_from_absent_description() {
        let absent: ItemPatch = serde_json::from_value(serde_json::json!({ "name": "x" })).unwrap();
        assert_eq!(absent.description, None);

        let cleared: ItemPatch = serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: ItemPatch = serde_json::from_value(serde_json::json!({ "description": "new" })).unwrap();
        assert_eq!(set.description, Some(Some("new".to_string())));
    }

    #[test]
    fn apply_patch_clears_description_on_explicit_null() {
        let fields = ItemDraft::new("Item", 1.0).with_description("old").validate().unwrap();
        let mut item = Item::new(ItemId::new(), fields, Utc::now());

        item.apply_patch(ItemPatch {
            description: Some(None),
            ..ItemPatch::default()
        });

        assert_eq!(item.description(), None);
        assert_eq!(item.name(), "Item");
    }

    #[test]
    fn collect_skips_fields_already_reported() {
        let mut errors = ValidationErrors::new();
        errors.push("price", "invalid type: string \"abc\", expected f64");

        ItemDraft::default().collect_violations(&mut errors);

        assert_eq!(errors.fields(), vec!["price", "name"]);
        assert_eq!(errors.violations()[1].message, FIELD_REQUIRED);
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let fields = ItemDraft::new("Laptop", 1299.99).validate().unwrap();
        let item = Item::new(ItemId::new(), fields, Utc::now());
        let json = serde_json::to_value(&item).unwrap();

        for key in ["id", "name", "description", "price", "is_available", "created_at"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["id"], serde_json::json!(item.id().to_string()));
        assert!(json["description"].is_null());
    }
}

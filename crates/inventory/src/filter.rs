//! Search filter: a conjunction of optional predicates over items.

use crate::item::Item;

/// Conjunctive search filter. An absent predicate imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    // Stored lowercased.
    name_contains: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl ItemFilter {
    /// A filter that matches every item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on `name`. An empty needle is ignored.
    pub fn name_contains(mut self, needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref();
        self.name_contains = if needle.is_empty() {
            None
        } else {
            Some(needle.to_lowercase())
        };
        self
    }

    /// Keep items with `price >= min`.
    pub fn min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Keep items with `price <= max`.
    pub fn max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = &self.name_contains {
            if !item.name().to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price() > max {
                return false;
            }
        }
        true
    }
}

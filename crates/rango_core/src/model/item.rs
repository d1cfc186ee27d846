//! Food item model.

use crate::model::validation::{normalize_name, ValidationError, MAX_ITEM_QUANTITY};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a food item.
pub type FoodItemId = Uuid;

/// One food requirement of an event, e.g. "Soda" x 2.
///
/// Items are immutable once created; edits go through full replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodItemId,
    pub name: String,
    /// Number of units to be brought, within `1..=MAX_ITEM_QUANTITY`.
    pub quantity: u32,
}

/// Caller input for creating or replacing a food item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFoodItem {
    pub name: String,
    pub quantity: u32,
}

impl NewFoodItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl FoodItem {
    /// Creates a normalized item with a generated ID.
    pub fn new(name: &str, quantity: u32) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, quantity)
    }

    /// Creates a normalized item keeping a caller-provided ID.
    ///
    /// Used when an existing item is replaced in place.
    pub fn with_id(id: FoodItemId, name: &str, quantity: u32) -> Result<Self, ValidationError> {
        let item = Self {
            id,
            name: normalize_name(name).ok_or(ValidationError::EmptyName)?,
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        if self.quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::QuantityTooLarge(self.quantity));
        }
        Ok(())
    }
}

impl TryFrom<&NewFoodItem> for FoodItem {
    type Error = ValidationError;

    fn try_from(value: &NewFoodItem) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.quantity)
    }
}

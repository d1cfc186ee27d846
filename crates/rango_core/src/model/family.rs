//! Participating family model.

use crate::model::validation::{normalize_contact, normalize_name, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered family.
pub type FamilyId = Uuid;

/// A participant that can receive assignment units in a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    /// Free-form phone/e-mail. Never written to logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Caller input for family registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFamily {
    pub name: String,
    pub contact: Option<String>,
}

impl NewFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: None,
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

impl Family {
    /// Creates a normalized family with a generated ID.
    pub fn new(name: &str, contact: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_name(name).ok_or(ValidationError::EmptyName)?,
            contact: normalize_contact(contact),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

impl TryFrom<&NewFamily> for Family {
    type Error = ValidationError;

    fn try_from(value: &NewFamily) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.contact.as_deref())
    }
}

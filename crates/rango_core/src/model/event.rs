//! Event aggregate model.
//!
//! # Responsibility
//! - Aggregate items, families and draw results of one potluck.
//! - Define the externally managed status lifecycle.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - Status only moves forward: `draft -> ready -> completed`.
//! - `assignments` is `Some` exactly when `status == Completed`.

use crate::model::assignment::Assignment;
use crate::model::family::Family;
use crate::model::item::FoodItem;
use crate::model::validation::{normalize_event_date, normalize_name, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an event.
pub type EventId = Uuid;

/// Event lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Still collecting items and families.
    Draft,
    /// The organizer judged the event ready for a draw.
    Ready,
    /// A draw was performed and assignments are stored.
    Completed,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "ready" => Some(Self::Ready),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether moving from `self` to `next` is allowed.
    ///
    /// Staying in the same state counts as allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, _) | (Self::Ready, Self::Ready | Self::Completed)
        ) || self == next
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One potluck event with its requirements, participants and draw result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Insertion order is preserved.
    pub items: Vec<FoodItem>,
    /// Insertion order is preserved.
    pub families: Vec<Family>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<Assignment>>,
    pub status: EventStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Event {
    /// Creates a draft event with a generated ID and no items or families.
    ///
    /// `created_at` is left at `0`; the store stamps it on insert.
    pub fn new(title: &str, date: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: normalize_name(title).ok_or(ValidationError::EmptyTitle)?,
            date: normalize_event_date(date)?,
            items: Vec::new(),
            families: Vec::new(),
            assignments: None,
            status: EventStatus::Draft,
            created_at: 0,
        })
    }

    /// Sum of all item quantities, i.e. the number of assignment units.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }

    /// Validates title, date and every nested item/family.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        normalize_event_date(&self.date)?;
        for item in &self.items {
            item.validate()?;
        }
        for family in &self.families {
            family.validate()?;
        }
        Ok(())
    }
}

/// Caller input for event creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
        }
    }
}

/// Partial update of event details. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::EventStatus;

    #[test]
    fn status_only_moves_forward() {
        use EventStatus::{Completed, Draft, Ready};

        assert!(Draft.can_transition_to(Ready));
        assert!(Draft.can_transition_to(Completed));
        assert!(Ready.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Ready.can_transition_to(Draft));
        assert!(!Completed.can_transition_to(Ready));
        assert!(!Completed.can_transition_to(Draft));
    }

    #[test]
    fn status_text_roundtrips() {
        for status in [EventStatus::Draft, EventStatus::Ready, EventStatus::Completed] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("archived"), None);
    }
}

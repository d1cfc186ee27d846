//! Read-only projections for organizer screens.

use crate::model::event::{Event, EventStatus};
use serde::Serialize;

/// Draw preconditions of one event.
///
/// `can_draw` mirrors the organizer policy: at least one item and one family
/// per required unit. The draw itself only needs one item and one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawReadiness {
    pub item_count: usize,
    pub family_count: usize,
    pub total_units: u64,
    pub families_sufficient: bool,
    pub can_draw: bool,
}

impl DrawReadiness {
    pub fn for_event(event: &Event) -> Self {
        let item_count = event.items.len();
        let family_count = event.families.len();
        let total_units = event.total_units();
        let families_sufficient = family_count as u64 >= total_units;

        Self {
            item_count,
            family_count,
            total_units,
            families_sufficient,
            can_draw: item_count > 0 && families_sufficient,
        }
    }
}

/// Dashboard counters across all events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub completed: usize,
    pub total_families: usize,
    /// Counts item entries, not units.
    pub total_items: usize,
}

impl EventStats {
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            stats.total += 1;
            if event.status == EventStatus::Completed {
                stats.completed += 1;
            }
            stats.total_families += event.families.len();
            stats.total_items += event.items.len();
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawReadiness, EventStats};
    use crate::model::event::{Event, EventStatus};
    use crate::model::family::Family;
    use crate::model::item::FoodItem;

    fn event_with(units: &[u32], families: usize) -> Event {
        let mut event = Event::new("Festa junina", "2026-06-24").unwrap();
        for (index, quantity) in units.iter().enumerate() {
            event
                .items
                .push(FoodItem::new(&format!("Item {index}"), *quantity).unwrap());
        }
        for index in 0..families {
            event
                .families
                .push(Family::new(&format!("Family {index}"), None).unwrap());
        }
        event
    }

    #[test]
    fn readiness_requires_one_family_per_unit() {
        let short = DrawReadiness::for_event(&event_with(&[2, 1], 2));
        assert_eq!(short.total_units, 3);
        assert!(!short.families_sufficient);
        assert!(!short.can_draw);

        let enough = DrawReadiness::for_event(&event_with(&[2, 1], 3));
        assert!(enough.families_sufficient);
        assert!(enough.can_draw);
    }

    #[test]
    fn readiness_without_items_cannot_draw() {
        let readiness = DrawReadiness::for_event(&event_with(&[], 4));
        assert!(readiness.families_sufficient);
        assert!(!readiness.can_draw);
    }

    #[test]
    fn stats_count_entries_across_events() {
        let mut done = event_with(&[5], 2);
        done.status = EventStatus::Completed;
        let events = vec![event_with(&[1, 1, 1], 1), done, event_with(&[], 0)];

        let stats = EventStats::from_events(&events);
        assert_eq!(
            stats,
            EventStats {
                total: 3,
                completed: 1,
                total_families: 3,
                total_items: 4,
            }
        );
    }
}

//! Draw engine: random assignment of food units to families.
//!
//! # Responsibility
//! - Expand items into one assignment unit per required quantity.
//! - Shuffle families and units, then hand out contiguous slices.
//!
//! # Invariants
//! - Every unit lands in exactly one family's slice.
//! - No family receives more than `ceil(units / families)` units.
//! - Every family gets an `Assignment`, possibly with no items.
//! - Inputs are never mutated; the engine performs no I/O.
//!
//! Distribution is front-loaded: earlier families in shuffled order get full
//! slices and trailing ones may get fewer or none. Because family order is
//! itself random this evens out in expectation.

mod shuffle;

pub use shuffle::{IdentityShuffler, RandomShuffler, Shuffler};

use crate::model::assignment::Assignment;
use crate::model::family::Family;
use crate::model::item::FoodItem;
use std::fmt::{Display, Formatter};

/// One indivisible unit of an item, e.g. the 2nd of 3 sodas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentUnit<'a> {
    pub item_name: &'a str,
    /// 1-based position within its item.
    pub sequence: u32,
}

impl AssignmentUnit<'_> {
    /// Label stored in assignments, `"<name> (<n>)"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Display for AssignmentUnit<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.item_name, self.sequence)
    }
}

/// Expands items into a flat unit pool, in item order.
///
/// The pool holds one entry per unit. Validated items keep each quantity at or
/// below [`MAX_ITEM_QUANTITY`](crate::model::validation::MAX_ITEM_QUANTITY).
pub fn expand_units(items: &[FoodItem]) -> Vec<AssignmentUnit<'_>> {
    items
        .iter()
        .flat_map(|item| {
            (1..=item.quantity).map(move |sequence| AssignmentUnit {
                item_name: item.name.as_str(),
                sequence,
            })
        })
        .collect()
}

/// `ceil(total_units / total_families)`; `0` when there are no families.
pub fn units_per_family(total_units: usize, total_families: usize) -> usize {
    if total_families == 0 {
        return 0;
    }
    total_units.div_ceil(total_families)
}

/// Runs one draw.
///
/// Callers must check that at least one item and one family exist. The engine
/// still stays total: with no families or no units it returns an empty list.
pub fn draw_assignments<S: Shuffler>(
    items: &[FoodItem],
    families: &[Family],
    shuffler: &mut S,
) -> Vec<Assignment> {
    let mut pool = expand_units(items);
    if pool.is_empty() || families.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&Family> = families.iter().collect();
    shuffler.shuffle(&mut order);
    shuffler.shuffle(&mut pool);

    let slice_len = units_per_family(pool.len(), order.len());
    let mut cursor = 0;

    order
        .into_iter()
        .map(|family| {
            let end = (cursor + slice_len).min(pool.len());
            let items = pool[cursor..end].iter().map(AssignmentUnit::label).collect();
            cursor = end;
            Assignment {
                family_id: family.id,
                family_name: family.name.clone(),
                items,
            }
        })
        .collect()
}

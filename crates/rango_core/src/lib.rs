//! Core domain logic for Divide o Rango.
//! This crate owns the draw engine and the in-process event store.

pub mod db;
pub mod draw;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use draw::{
    draw_assignments, expand_units, units_per_family, AssignmentUnit, IdentityShuffler,
    RandomShuffler, Shuffler,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::assignment::Assignment;
pub use model::event::{Event, EventId, EventPatch, EventStatus, NewEvent};
pub use model::family::{Family, FamilyId, NewFamily};
pub use model::item::{FoodItem, FoodItemId, NewFoodItem};
pub use model::validation::{ValidationError, MAX_ITEM_QUANTITY};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::event_service::{EventService, EventServiceError, ServiceResult};
pub use service::summary::{DrawReadiness, EventStats};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

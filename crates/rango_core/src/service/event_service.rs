//! Event store use-case service.
//!
//! # Responsibility
//! - Act as the explicit store the host application owns and passes around.
//! - Drive the event lifecycle: `draft -> ready -> completed`.
//! - Run draws and persist their output together with the status change.
//!
//! # Invariants
//! - A draw needs at least one item and one family; the service checks this
//!   before the engine runs.
//! - Completed events accept no new items, replacements or families.
//! - Mutating APIs take `&mut self`, so one store has one writer at a time.
//! - Logs carry ids and counts only, never names or contacts.

use crate::draw::{draw_assignments, units_per_family, Shuffler};
use crate::model::assignment::Assignment;
use crate::model::event::{Event, EventId, EventPatch, EventStatus, NewEvent};
use crate::model::family::{Family, NewFamily};
use crate::model::item::{FoodItem, FoodItemId, NewFoodItem};
use crate::model::validation::{normalize_event_date, normalize_name, ValidationError};
use crate::repo::event_repo::{EventRepository, RepoError};
use crate::service::summary::{DrawReadiness, EventStats};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for event store use-cases.
#[derive(Debug)]
pub enum EventServiceError {
    /// Caller input failed normalization/validation.
    Validation(ValidationError),
    EventNotFound(EventId),
    ItemNotFound(FoodItemId),
    /// Draw requested for an event without items.
    NoItems(EventId),
    /// Draw requested for an event without families.
    NoFamilies(EventId),
    /// Event already has a draw result and is frozen.
    EventCompleted(EventId),
    InvalidTransition {
        from: EventStatus,
        to: EventStatus,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "food item not found: {id}"),
            Self::NoItems(id) => {
                write!(f, "event {id} needs at least one item before the draw")
            }
            Self::NoFamilies(id) => {
                write!(f, "event {id} needs at least one family before the draw")
            }
            Self::EventCompleted(id) => write!(f, "event {id} is already completed"),
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid status transition `{from}` -> `{to}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent event state: {details}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for EventServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::EventNotFound(id) => Self::EventNotFound(id),
            RepoError::ItemNotFound(id) => Self::ItemNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, EventServiceError>;

/// Event store facade over repository implementations.
pub struct EventService<R: EventRepository> {
    repo: R,
    selected: Option<EventId>,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            selected: None,
        }
    }

    /// Creates a draft event with no items or families.
    pub fn create_event(&mut self, input: &NewEvent) -> ServiceResult<Event> {
        let event = Event::new(&input.title, &input.date)?;
        let event_id = self.repo.create_event(&event)?;
        info!("event=event_create module=service status=ok event_id={event_id}");

        self.repo
            .get_event(event_id)?
            .ok_or(EventServiceError::InconsistentState(
                "created event not found in read-back",
            ))
    }

    /// Applies a partial update of title/date.
    pub fn update_event(&mut self, id: EventId, patch: &EventPatch) -> ServiceResult<Event> {
        let current = self.require_event(id)?;
        if patch.is_empty() {
            return Ok(current);
        }

        let title = match patch.title.as_deref() {
            Some(value) => normalize_name(value).ok_or(ValidationError::EmptyTitle)?,
            None => current.title,
        };
        let date = match patch.date.as_deref() {
            Some(value) => normalize_event_date(value)?,
            None => current.date,
        };

        self.repo.update_event_details(id, &title, &date)?;
        debug!("event=event_update module=service status=ok event_id={id}");

        self.repo
            .get_event(id)?
            .ok_or(EventServiceError::InconsistentState(
                "updated event not found in read-back",
            ))
    }

    pub fn get_event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        Ok(self.repo.get_event(id)?)
    }

    /// Lists all events, oldest first.
    pub fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.repo.list_events()?)
    }

    /// Makes `id` the current event.
    ///
    /// An unknown id clears the selection and returns `EventNotFound`.
    pub fn select_event(&mut self, id: EventId) -> ServiceResult<Event> {
        match self.repo.get_event(id)? {
            Some(event) => {
                self.selected = Some(id);
                Ok(event)
            }
            None => {
                self.selected = None;
                Err(EventServiceError::EventNotFound(id))
            }
        }
    }

    /// Returns a fresh copy of the current event, if one is selected.
    pub fn current_event(&self) -> ServiceResult<Option<Event>> {
        match self.selected {
            Some(id) => self.get_event(id),
            None => Ok(None),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Appends a food item to a non-completed event.
    pub fn add_item(&mut self, event_id: EventId, input: &NewFoodItem) -> ServiceResult<FoodItem> {
        self.require_open_event(event_id)?;
        let item = FoodItem::try_from(input)?;
        self.repo.add_item(event_id, &item)?;
        info!(
            "event=item_add module=service status=ok event_id={event_id} item_id={} quantity={}",
            item.id, item.quantity
        );
        Ok(item)
    }

    /// Replaces name and quantity of an existing item, keeping its id.
    pub fn replace_item(
        &mut self,
        event_id: EventId,
        item_id: FoodItemId,
        input: &NewFoodItem,
    ) -> ServiceResult<FoodItem> {
        let event = self.require_open_event(event_id)?;
        if !event.items.iter().any(|item| item.id == item_id) {
            return Err(EventServiceError::ItemNotFound(item_id));
        }

        let item = FoodItem::with_id(item_id, &input.name, input.quantity)?;
        self.repo.replace_item(event_id, &item)?;
        info!(
            "event=item_replace module=service status=ok event_id={event_id} item_id={item_id} quantity={}",
            item.quantity
        );
        Ok(item)
    }

    /// Registers a family on a non-completed event.
    pub fn add_family(&mut self, event_id: EventId, input: &NewFamily) -> ServiceResult<Family> {
        self.require_open_event(event_id)?;
        let family = Family::try_from(input)?;
        self.repo.add_family(event_id, &family)?;
        info!(
            "event=family_add module=service status=ok event_id={event_id} family_id={}",
            family.id
        );
        Ok(family)
    }

    /// Moves a draft event to `ready`. Already-ready events are returned as is.
    ///
    /// Whether the event is actually ready is the caller's judgement; see
    /// [`Self::readiness`] for the usual policy.
    pub fn mark_ready(&mut self, event_id: EventId) -> ServiceResult<Event> {
        let mut event = self.require_event(event_id)?;
        if !event.status.can_transition_to(EventStatus::Ready) {
            return Err(EventServiceError::InvalidTransition {
                from: event.status,
                to: EventStatus::Ready,
            });
        }
        if event.status == EventStatus::Ready {
            return Ok(event);
        }

        self.repo.set_event_status(event_id, EventStatus::Ready)?;
        info!("event=event_ready module=service status=ok event_id={event_id}");
        event.status = EventStatus::Ready;
        Ok(event)
    }

    /// Runs the draw and stores its result, completing the event.
    ///
    /// Works from `draft` or `ready`. The assignments and the `completed`
    /// status are written together; on error nothing is stored.
    pub fn perform_draw<S: Shuffler>(
        &mut self,
        event_id: EventId,
        shuffler: &mut S,
    ) -> ServiceResult<Vec<Assignment>> {
        let event = self.require_event(event_id)?;
        let rejection = if event.is_completed() {
            Some(("event_completed", EventServiceError::EventCompleted(event_id)))
        } else if event.items.is_empty() {
            Some(("no_items", EventServiceError::NoItems(event_id)))
        } else if event.families.is_empty() {
            Some(("no_families", EventServiceError::NoFamilies(event_id)))
        } else {
            None
        };
        if let Some((error_code, err)) = rejection {
            warn!(
                "event=draw module=service status=error event_id={event_id} error_code={error_code}"
            );
            return Err(err);
        }

        let started_at = Instant::now();
        let assignments = draw_assignments(&event.items, &event.families, shuffler);
        self.repo.save_draw(event_id, &assignments)?;

        let total_units: usize = assignments.iter().map(|a| a.items.len()).sum();
        info!(
            "event=draw module=service status=ok event_id={event_id} families={} units={} units_per_family={} duration_ms={}",
            event.families.len(),
            total_units,
            units_per_family(total_units, event.families.len()),
            started_at.elapsed().as_millis()
        );
        Ok(assignments)
    }

    /// Reports draw preconditions for one event.
    pub fn readiness(&self, event_id: EventId) -> ServiceResult<DrawReadiness> {
        let event = self.require_event(event_id)?;
        Ok(DrawReadiness::for_event(&event))
    }

    /// Dashboard counters over every event in the store.
    pub fn stats(&self) -> ServiceResult<EventStats> {
        let events = self.repo.list_events()?;
        Ok(EventStats::from_events(&events))
    }

    fn require_event(&self, id: EventId) -> ServiceResult<Event> {
        self.repo
            .get_event(id)?
            .ok_or(EventServiceError::EventNotFound(id))
    }

    fn require_open_event(&self, id: EventId) -> ServiceResult<Event> {
        let event = self.require_event(id)?;
        if event.is_completed() {
            return Err(EventServiceError::EventCompleted(id));
        }
        Ok(event)
    }
}

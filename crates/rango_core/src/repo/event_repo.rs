//! Event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over events with their items, families and draw results.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Write paths validate model values before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Items, families and assignments keep insertion order via `position`.
//! - A draw result and the `completed` status are written in one transaction.

use crate::db::DbError;
use crate::model::assignment::Assignment;
use crate::model::event::{Event, EventId, EventStatus};
use crate::model::family::Family;
use crate::model::item::{FoodItem, FoodItemId};
use crate::model::validation::ValidationError;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    event_date,
    status,
    created_at
FROM events";

const REQUIRED_TABLES: &[&str] = &[
    "events",
    "food_items",
    "families",
    "assignments",
    "assignment_items",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    EventNotFound(EventId),
    ItemNotFound(FoodItemId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "food item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::EventNotFound(_)
            | Self::ItemNotFound(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the event store.
pub trait EventRepository {
    /// Inserts event details. Nested items/families are not written here.
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    /// Replaces title and date of an existing event.
    fn update_event_details(&self, id: EventId, title: &str, date: &str) -> RepoResult<()>;
    fn set_event_status(&self, id: EventId, status: EventStatus) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// Lists all events, oldest first.
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    /// Appends an item after the event's existing items.
    fn add_item(&self, event_id: EventId, item: &FoodItem) -> RepoResult<()>;
    /// Overwrites name/quantity of an item, keeping its id and position.
    fn replace_item(&self, event_id: EventId, item: &FoodItem) -> RepoResult<()>;
    /// Appends a family after the event's existing families.
    fn add_family(&self, event_id: EventId, family: &Family) -> RepoResult<()>;
    /// Stores draw output and marks the event `completed` atomically.
    fn save_draw(&mut self, event_id: EventId, assignments: &[Assignment]) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for &table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (uuid, title, event_date, status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                event.id.to_string(),
                event.title.as_str(),
                event.date.as_str(),
                event.status.as_str(),
            ],
        )?;

        Ok(event.id)
    }

    fn update_event_details(&self, id: EventId, title: &str, date: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE events
             SET title = ?2, event_date = ?3
             WHERE uuid = ?1;",
            params![id.to_string(), title, date],
        )?;

        if changed == 0 {
            return Err(RepoError::EventNotFound(id));
        }
        Ok(())
    }

    fn set_event_status(&self, id: EventId, status: EventStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE events SET status = ?2 WHERE uuid = ?1;",
            params![id.to_string(), status.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::EventNotFound(id));
        }
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            let event = parse_event_row(row)?;
            return Ok(Some(hydrate_event(self.conn, event)?));
        }

        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;

        let mut headers = Vec::new();
        while let Some(row) = rows.next()? {
            headers.push(parse_event_row(row)?);
        }

        headers
            .into_iter()
            .map(|event| hydrate_event(self.conn, event))
            .collect()
    }

    fn add_item(&self, event_id: EventId, item: &FoodItem) -> RepoResult<()> {
        item.validate()?;
        ensure_event_exists(self.conn, event_id)?;

        self.conn.execute(
            "INSERT INTO food_items (uuid, event_uuid, position, name, quantity)
             VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM food_items WHERE event_uuid = ?2),
                ?3,
                ?4
             );",
            params![
                item.id.to_string(),
                event_id.to_string(),
                item.name.as_str(),
                item.quantity,
            ],
        )?;
        Ok(())
    }

    fn replace_item(&self, event_id: EventId, item: &FoodItem) -> RepoResult<()> {
        item.validate()?;
        ensure_event_exists(self.conn, event_id)?;

        let changed = self.conn.execute(
            "UPDATE food_items
             SET name = ?3, quantity = ?4
             WHERE uuid = ?1 AND event_uuid = ?2;",
            params![
                item.id.to_string(),
                event_id.to_string(),
                item.name.as_str(),
                item.quantity,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ItemNotFound(item.id));
        }
        Ok(())
    }

    fn add_family(&self, event_id: EventId, family: &Family) -> RepoResult<()> {
        family.validate()?;
        ensure_event_exists(self.conn, event_id)?;

        self.conn.execute(
            "INSERT INTO families (uuid, event_uuid, position, name, contact)
             VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM families WHERE event_uuid = ?2),
                ?3,
                ?4
             );",
            params![
                family.id.to_string(),
                event_id.to_string(),
                family.name.as_str(),
                family.contact.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn save_draw(&mut self, event_id: EventId, assignments: &[Assignment]) -> RepoResult<()> {
        let event_uuid = event_id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_event_exists(&tx, event_id)?;

        tx.execute(
            "DELETE FROM assignment_items WHERE event_uuid = ?1;",
            [event_uuid.as_str()],
        )?;
        tx.execute(
            "DELETE FROM assignments WHERE event_uuid = ?1;",
            [event_uuid.as_str()],
        )?;

        for (position, assignment) in assignments.iter().enumerate() {
            let position = position_to_db(position)?;
            tx.execute(
                "INSERT INTO assignments (event_uuid, position, family_uuid, family_name)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    event_uuid.as_str(),
                    position,
                    assignment.family_id.to_string(),
                    assignment.family_name.as_str(),
                ],
            )?;

            for (item_position, label) in assignment.items.iter().enumerate() {
                tx.execute(
                    "INSERT INTO assignment_items
                        (event_uuid, assignment_position, item_position, label)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        event_uuid.as_str(),
                        position,
                        position_to_db(item_position)?,
                        label.as_str(),
                    ],
                )?;
            }
        }

        tx.execute(
            "UPDATE events SET status = ?2 WHERE uuid = ?1;",
            params![event_uuid.as_str(), EventStatus::Completed.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let status_text: String = row.get("status")?;
    let status = EventStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in events.status"))
    })?;

    Ok(Event {
        id: parse_uuid(&uuid_text, "events.uuid")?,
        title: row.get("title")?,
        date: row.get("event_date")?,
        items: Vec::new(),
        families: Vec::new(),
        assignments: None,
        status,
        created_at: row.get("created_at")?,
    })
}

fn hydrate_event(conn: &Connection, mut event: Event) -> RepoResult<Event> {
    let event_uuid = event.id.to_string();
    event.items = load_items(conn, &event_uuid)?;
    event.families = load_families(conn, &event_uuid)?;
    if event.is_completed() {
        event.assignments = Some(load_assignments(conn, &event_uuid)?);
    }
    event.validate()?;
    Ok(event)
}

fn load_items(conn: &Connection, event_uuid: &str) -> RepoResult<Vec<FoodItem>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name, quantity
         FROM food_items
         WHERE event_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([event_uuid])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        items.push(FoodItem {
            id: parse_uuid(&uuid_text, "food_items.uuid")?,
            name: row.get("name")?,
            quantity: row.get("quantity")?,
        });
    }
    Ok(items)
}

fn load_families(conn: &Connection, event_uuid: &str) -> RepoResult<Vec<Family>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name, contact
         FROM families
         WHERE event_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([event_uuid])?;
    let mut families = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        families.push(Family {
            id: parse_uuid(&uuid_text, "families.uuid")?,
            name: row.get("name")?,
            contact: row.get("contact")?,
        });
    }
    Ok(families)
}

fn load_assignments(conn: &Connection, event_uuid: &str) -> RepoResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(
        "SELECT position, family_uuid, family_name
         FROM assignments
         WHERE event_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut label_stmt = conn.prepare(
        "SELECT label
         FROM assignment_items
         WHERE event_uuid = ?1 AND assignment_position = ?2
         ORDER BY item_position ASC;",
    )?;

    let mut rows = stmt.query([event_uuid])?;
    let mut assignments = Vec::new();
    while let Some(row) = rows.next()? {
        let position: i64 = row.get("position")?;
        let family_text: String = row.get("family_uuid")?;

        let mut label_rows = label_stmt.query(params![event_uuid, position])?;
        let mut items = Vec::new();
        while let Some(label_row) = label_rows.next()? {
            items.push(label_row.get::<_, String>(0)?);
        }

        assignments.push(Assignment {
            family_id: parse_uuid(&family_text, "assignments.family_uuid")?,
            family_name: row.get("family_name")?,
            items,
        });
    }
    Ok(assignments)
}

fn ensure_event_exists(conn: &Connection, id: EventId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM events WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::EventNotFound(id))
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn position_to_db(index: usize) -> RepoResult<i64> {
    i64::try_from(index)
        .map_err(|_| RepoError::InvalidData(format!("position {index} out of range")))
}

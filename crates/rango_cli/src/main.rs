//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `rango_core` linkage and wiring end to end.
//! - Run one sample draw on a throwaway in-memory store.
//! - Route core logs to `$TMPDIR/rango-logs` so store events are recorded.

use rango_core::db::open_db_in_memory;
use rango_core::{
    default_log_level, init_logging, EventService, LoggingError, NewEvent, NewFamily,
    NewFoodItem, RandomShuffler, SqliteEventRepository,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "rango-logs";

fn main() -> ExitCode {
    println!("rango_core ping={}", rango_core::ping());
    println!("rango_core version={}", rango_core::core_version());

    let log_dir = std::env::temp_dir().join(LOG_DIR_NAME);
    match start_logging(&log_dir) {
        Ok(dir) => println!("rango_core log_dir={}", dir.display()),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    match sample_draw() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sample draw failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    init_logging(default_log_level().as_str(), log_dir)?;
    Ok(log_dir.to_path_buf())
}

fn sample_draw() -> Result<(), Box<dyn Error>> {
    let mut conn = open_db_in_memory()?;
    let mut store = EventService::new(SqliteEventRepository::try_new(&mut conn)?);

    let event = store.create_event(&NewEvent::new("Sample potluck", "2026-12-24"))?;
    store.add_item(event.id, &NewFoodItem::new("Soda", 2))?;
    store.add_item(event.id, &NewFoodItem::new("Chips", 1))?;
    for name in ["Silva", "Souza", "Oliveira"] {
        store.add_family(event.id, &NewFamily::new(name))?;
    }
    store.mark_ready(event.id)?;

    let assignments = store.perform_draw(event.id, &mut RandomShuffler::new())?;
    for assignment in &assignments {
        println!(
            "{}: {}",
            assignment.family_name,
            if assignment.is_empty() {
                "-".to_string()
            } else {
                assignment.items.join(", ")
            }
        );
    }
    Ok(())
}

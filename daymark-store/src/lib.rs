//! SQLite persistence layer for Daymark.
//!
//! Provides the on-disk store behind the calendar core:
//! - custom per-day overrides and their comments
//! - the base-rule configuration row
//! - user-authored holiday plans and their day-sets
//! - small app configuration values (selected plan)
//!
//! # Architecture
//!
//! One [`DayStore`] owns a single SQLite connection behind a mutex; reads
//! are synchronous, writes run in small transactions. After every
//! successful mutation the store emits one [`DataChange`] through the
//! notifier handed in at construction — observers live entirely outside
//! this crate.

mod change;
mod comment;
mod config;
mod custom_day;
mod error;
mod plan_rows;

pub use change::{ChangeNotifier, DataChange};
pub use comment::DayComment;
pub use config::SELECTED_PLAN_KEY;
pub use custom_day::CustomDay;
pub use error::{StoreError, StoreResult};
pub use plan_rows::{PlanDayRow, PlanRecord};

use change::ChangeSignal;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// The persistent store for day overrides, comments, plans and config.
#[derive(Clone)]
pub struct DayStore {
    conn: Arc<Mutex<Connection>>,
    signal: ChangeSignal,
}

impl DayStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Attaches the change notifier invoked after successful mutations.
    #[must_use]
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.signal = ChangeSignal::new(Some(notifier));
        self
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            signal: ChangeSignal::default(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS custom_days (
                day_index INTEGER PRIMARY KEY,
                day_type INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                modified_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS day_comments (
                day_index INTEGER PRIMARY KEY,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                modified_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS plans (
                plan_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                start_day INTEGER NOT NULL,
                end_day INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS plan_days (
                plan_id TEXT NOT NULL,
                day_index INTEGER NOT NULL,
                name TEXT NOT NULL,
                day_type INTEGER NOT NULL,
                UNIQUE(plan_id, day_index)
            );
            ",
        )?;
        debug!("day store schema ready");
        Ok(())
    }

    fn emit(&self, change: DataChange) {
        self.signal.emit(change);
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

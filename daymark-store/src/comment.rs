//! Per-day comment rows.
//!
//! Comments are independent of day-type overrides: a day can carry a note
//! without an override and vice versa.

use crate::{now_millis, DataChange, DayStore, StoreResult};
use daymark_types::CalendarDay;
use rusqlite::{params, OptionalExtension};

/// A stored per-day note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayComment {
    pub day: CalendarDay,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

impl DayStore {
    /// Fetches the comment for one day, if any.
    pub fn comment(&self, day: CalendarDay) -> StoreResult<Option<DayComment>> {
        let conn = self.conn.lock().unwrap();
        Ok(conn
            .query_row(
                "SELECT day_index, content, created_at, modified_at
                 FROM day_comments WHERE day_index = ?1",
                params![day.day_number()],
                |row| {
                    Ok(DayComment {
                        day: CalendarDay::from_day_number(row.get(0)?),
                        content: row.get(1)?,
                        created_at: row.get(2)?,
                        modified_at: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    /// Inserts or replaces the comment for a day, preserving `created_at`
    /// on update.
    pub fn set_comment(&self, day: CalendarDay, content: &str) -> StoreResult<()> {
        {
            let conn = self.conn.lock().unwrap();
            let now = now_millis();
            conn.execute(
                "INSERT INTO day_comments (day_index, content, created_at, modified_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(day_index)
                 DO UPDATE SET content = excluded.content, modified_at = excluded.modified_at",
                params![day.day_number(), content, now],
            )?;
        }
        self.emit(DataChange::Comments);
        Ok(())
    }

    /// Removes the comment for a day; emits a change only if one existed.
    pub fn delete_comment(&self, day: CalendarDay) -> StoreResult<()> {
        let deleted = {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "DELETE FROM day_comments WHERE day_index = ?1",
                params![day.day_number()],
            )? > 0
        };
        if deleted {
            self.emit(DataChange::Comments);
        }
        Ok(())
    }
}

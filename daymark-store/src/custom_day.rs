//! Per-day custom override rows.
//!
//! A custom day is the highest-precedence classification signal: one row
//! per day number, holding the user's explicit off/work choice.

use crate::{now_millis, DataChange, DayStore, StoreResult};
use daymark_types::{CalendarDay, DayType};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// A stored per-day override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomDay {
    pub day: CalendarDay,
    pub day_type: DayType,
    pub created_at: i64,
    pub modified_at: i64,
}

impl DayStore {
    /// Fetches the override for one day, if any.
    pub fn custom_day(&self, day: CalendarDay) -> StoreResult<Option<CustomDay>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT day_index, day_type, created_at, modified_at
                 FROM custom_days WHERE day_index = ?1",
                params![day.day_number()],
                decode_row,
            )
            .optional()?;
        row.map(check_day_type).transpose()
    }

    /// Fetches all overrides with day numbers in `[from, to]`, ordered.
    pub fn custom_days_in(
        &self,
        from: CalendarDay,
        to: CalendarDay,
    ) -> StoreResult<Vec<CustomDay>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT day_index, day_type, created_at, modified_at
             FROM custom_days WHERE day_index BETWEEN ?1 AND ?2
             ORDER BY day_index",
        )?;
        let rows = stmt.query_map(params![from.day_number(), to.day_number()], decode_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(check_day_type(row?)?);
        }
        Ok(out)
    }

    /// The single mutation primitive: upsert-or-delete.
    ///
    /// `Some(t)` inserts a row (or updates one whose type differs);
    /// `None` deletes the row if present. Emits a change only when a row
    /// was actually written or removed.
    pub fn set_custom_day(&self, day: CalendarDay, day_type: Option<DayType>) -> StoreResult<()> {
        let changed = {
            let conn = self.conn.lock().unwrap();
            match day_type {
                Some(t) => {
                    let existing: Option<u8> = conn
                        .query_row(
                            "SELECT day_type FROM custom_days WHERE day_index = ?1",
                            params![day.day_number()],
                            |row| row.get(0),
                        )
                        .optional()?;
                    match existing {
                        None => {
                            let now = now_millis();
                            conn.execute(
                                "INSERT INTO custom_days
                                 (day_index, day_type, created_at, modified_at)
                                 VALUES (?1, ?2, ?3, ?3)",
                                params![day.day_number(), u8::from(t), now],
                            )?;
                            true
                        }
                        Some(stored) if stored != u8::from(t) => {
                            conn.execute(
                                "UPDATE custom_days
                                 SET day_type = ?2, modified_at = ?3
                                 WHERE day_index = ?1",
                                params![day.day_number(), u8::from(t), now_millis()],
                            )?;
                            true
                        }
                        Some(_) => false,
                    }
                }
                None => {
                    conn.execute(
                        "DELETE FROM custom_days WHERE day_index = ?1",
                        params![day.day_number()],
                    )? > 0
                }
            }
        };
        if changed {
            debug!(day = %day, "custom day updated");
            self.emit(DataChange::CustomDays);
        }
        Ok(())
    }

    /// Bulk edit over an inclusive day range.
    ///
    /// Deletes every override in the range, then (when `day_type` is
    /// `Some`) inserts one row per day — both steps inside a single
    /// transaction so a partial write can never be observed.
    pub fn set_custom_day_range(
        &self,
        day_type: Option<DayType>,
        from: CalendarDay,
        to: CalendarDay,
    ) -> StoreResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM custom_days WHERE day_index BETWEEN ?1 AND ?2",
            params![from.day_number(), to.day_number()],
        )?;
        if let Some(t) = day_type {
            let now = now_millis();
            let mut insert = tx.prepare(
                "INSERT INTO custom_days (day_index, day_type, created_at, modified_at)
                 VALUES (?1, ?2, ?3, ?3)",
            )?;
            let mut n = from.day_number();
            while n <= to.day_number() {
                insert.execute(params![n, u8::from(t), now])?;
                n += 1;
            }
            drop(insert);
        }
        tx.commit()?;
        drop(conn);
        debug!(%from, %to, "custom day range updated");
        self.emit(DataChange::CustomDays);
        Ok(())
    }
}

fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, u8, i64, i64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn check_day_type((day, day_type, created_at, modified_at): (i64, u8, i64, i64)) -> StoreResult<CustomDay> {
    let day_type = DayType::try_from(day_type)
        .map_err(|e| crate::StoreError::InvalidData(e.to_string()))?;
    Ok(CustomDay {
        day: CalendarDay::from_day_number(day),
        day_type,
        created_at,
        modified_at,
    })
}

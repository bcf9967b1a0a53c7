//! User-authored holiday-plan rows.
//!
//! A plan is a metadata record plus a day-set. Saving replaces the whole
//! day-set (delete-all then re-insert) in one transaction, which keeps day
//! numbers unique within a plan and makes edits atomic.

use crate::{DataChange, DayStore, StoreError, StoreResult};
use daymark_types::{CalendarDay, DayType, PlanId};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// Metadata for a user-authored plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecord {
    pub id: PlanId,
    pub name: String,
    /// First day of the plan's validity window (inclusive).
    pub start: CalendarDay,
    /// Last day of the plan's validity window (inclusive).
    pub end: CalendarDay,
}

/// One dated entry of a user-authored plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDayRow {
    pub day: CalendarDay,
    pub name: String,
    pub day_type: DayType,
}

impl DayStore {
    /// Fetches a plan's metadata, if the plan exists.
    pub fn plan_record(&self, id: PlanId) -> StoreResult<Option<PlanRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT plan_id, name, start_day, end_day FROM plans WHERE plan_id = ?1",
            params![id.to_string()],
            decode_record,
        )
        .optional()?
        .transpose()
    }

    /// Lists all stored plans, newest id first.
    pub fn plan_records(&self) -> StoreResult<Vec<PlanRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT plan_id, name, start_day, end_day FROM plans ORDER BY plan_id DESC",
        )?;
        let rows = stmt.query_map([], decode_record)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row??);
        }
        Ok(out)
    }

    /// Fetches a plan's day-set ordered by day number.
    pub fn plan_days(&self, id: PlanId) -> StoreResult<Vec<PlanDayRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT day_index, name, day_type FROM plan_days
             WHERE plan_id = ?1 ORDER BY day_index",
        )?;
        let rows = stmt.query_map(params![id.to_string()], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, u8>(2)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (day, name, day_type) = row?;
            out.push(PlanDayRow {
                day: CalendarDay::from_day_number(day),
                name,
                day_type: DayType::try_from(day_type)
                    .map_err(|e| StoreError::InvalidData(e.to_string()))?,
            });
        }
        Ok(out)
    }

    /// Creates or replaces a plan and its entire day-set.
    ///
    /// The metadata upsert, the day-set delete and the re-insert run in one
    /// transaction.
    pub fn save_plan(&self, record: &PlanRecord, days: &[PlanDayRow]) -> StoreResult<()> {
        {
            let mut conn = self.conn.lock().unwrap();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR REPLACE INTO plans (plan_id, name, start_day, end_day)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id.to_string(),
                    record.name,
                    record.start.day_number(),
                    record.end.day_number()
                ],
            )?;
            tx.execute(
                "DELETE FROM plan_days WHERE plan_id = ?1",
                params![record.id.to_string()],
            )?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO plan_days (plan_id, day_index, name, day_type)
                     VALUES (?1, ?2, ?3, ?4)",
                )?;
                for day in days {
                    insert.execute(params![
                        record.id.to_string(),
                        day.day.day_number(),
                        day.name,
                        u8::from(day.day_type)
                    ])?;
                }
            }
            tx.commit()?;
        }
        debug!(plan = %record.id, days = days.len(), "plan saved");
        self.emit(DataChange::HolidayPlans);
        Ok(())
    }

    /// Deletes a plan and its day-set; emits a change only if it existed.
    pub fn delete_plan(&self, id: PlanId) -> StoreResult<()> {
        let deleted = {
            let mut conn = self.conn.lock().unwrap();
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM plan_days WHERE plan_id = ?1",
                params![id.to_string()],
            )?;
            let n = tx.execute("DELETE FROM plans WHERE plan_id = ?1", params![id.to_string()])?;
            tx.commit()?;
            n > 0
        };
        if deleted {
            self.emit(DataChange::HolidayPlans);
        }
        Ok(())
    }
}

type RecordParts = Result<PlanRecord, StoreError>;

fn decode_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordParts> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let start: i64 = row.get(2)?;
    let end: i64 = row.get(3)?;
    Ok(match PlanId::parse(&id) {
        Ok(id) => Ok(PlanRecord {
            id,
            name,
            start: CalendarDay::from_day_number(start),
            end: CalendarDay::from_day_number(end),
        }),
        Err(e) => Err(StoreError::InvalidData(format!("bad plan id {id:?}: {e}"))),
    })
}

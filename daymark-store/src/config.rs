//! Configuration rows: the base rule and small app settings.
//!
//! The base rule is persisted as the JSON encoding of its wire row
//! ([`BaseRuleRow`]) under a fixed config key; other settings are plain
//! strings keyed by name.

use crate::{DataChange, DayStore, StoreResult};
use daymark_rules::{BaseRuleRow, RecurringRule};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// Config key holding the base-rule row.
const BASE_RULE_KEY: &str = "base_rule";

/// Config key holding the selected holiday-plan identifier.
pub const SELECTED_PLAN_KEY: &str = "holiday_plan";

impl DayStore {
    /// Reads a raw config value.
    pub fn config_value(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        Ok(conn
            .query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Writes (or clears) a raw config value.
    pub fn set_config_value(&self, key: &str, value: Option<&str>) -> StoreResult<()> {
        {
            let conn = self.conn.lock().unwrap();
            match value {
                Some(v) => {
                    conn.execute(
                        "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
                        params![key, v],
                    )?;
                }
                None => {
                    conn.execute("DELETE FROM config WHERE key = ?1", params![key])?;
                }
            }
        }
        self.emit(DataChange::AppConfig);
        Ok(())
    }

    /// Reads the persisted base rule, if one has been written.
    pub fn base_rule(&self) -> StoreResult<Option<RecurringRule>> {
        let Some(json) = self.config_value(BASE_RULE_KEY)? else {
            return Ok(None);
        };
        let row: BaseRuleRow = serde_json::from_str(&json)?;
        Ok(Some(row.decode()?))
    }

    /// Replaces the base rule wholesale.
    pub fn set_base_rule(&self, rule: &RecurringRule) -> StoreResult<()> {
        let json = serde_json::to_string(&BaseRuleRow::encode(rule))?;
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
                params![BASE_RULE_KEY, json],
            )?;
        }
        debug!("base rule replaced");
        self.emit(DataChange::BaseRule);
        Ok(())
    }

    /// Returns the stored base rule, writing the first-run default
    /// (Saturday/Sunday off) if none exists yet.
    pub fn ensure_base_rule(&self) -> StoreResult<RecurringRule> {
        if let Some(rule) = self.base_rule()? {
            return Ok(rule);
        }
        let rule = RecurringRule::default_weekend();
        self.set_base_rule(&rule)?;
        Ok(rule)
    }
}

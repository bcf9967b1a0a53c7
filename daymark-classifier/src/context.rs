//! Explicit service wiring.
//!
//! One context owns the store, the plan manager and the solar-term cache,
//! and builds classifiers from current state. This replaces the shared
//! singleton managers of older designs: everything a caller needs is
//! constructed here and passed down.

use crate::{ClassifierResult, DayClassifier};
use daymark_holiday::PlanManager;
use daymark_lunisolar::SolarTermCalculator;
use daymark_store::{ChangeNotifier, DayStore};
use std::path::Path;
use std::sync::Arc;

/// Owns the core services for one calendar database.
#[derive(Clone)]
pub struct CalendarContext {
    store: DayStore,
    plans: PlanManager,
    solar_terms: Arc<SolarTermCalculator>,
}

impl CalendarContext {
    /// Opens (or creates) the calendar database at `path`.
    pub fn open(path: impl AsRef<Path>) -> ClassifierResult<Self> {
        Ok(Self::from_store(DayStore::open(path)?))
    }

    /// Opens an in-memory context (for testing).
    pub fn open_in_memory() -> ClassifierResult<Self> {
        Ok(Self::from_store(DayStore::open_in_memory()?))
    }

    /// Attaches the change notifier to the underlying store.
    #[must_use]
    pub fn with_notifier(self, notifier: ChangeNotifier) -> Self {
        Self::from_store(self.store.with_notifier(notifier))
    }

    fn from_store(store: DayStore) -> Self {
        let plans = PlanManager::new(store.clone());
        Self {
            store,
            plans,
            solar_terms: Arc::new(SolarTermCalculator::new()),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &DayStore {
        &self.store
    }

    /// The plan manager.
    #[must_use]
    pub fn plans(&self) -> &PlanManager {
        &self.plans
    }

    /// The shared solar-term cache.
    #[must_use]
    pub fn solar_terms(&self) -> &SolarTermCalculator {
        &self.solar_terms
    }

    /// Builds a classifier from current state: the stored base rule
    /// (written with its first-run default if absent), the selected plan
    /// if one loads, and the override store.
    pub fn classifier(&self) -> ClassifierResult<DayClassifier> {
        let base_rule = self.store.ensure_base_rule()?;
        let plan = self.plans.load_selected()?;
        tracing::debug!(
            plan = plan.as_ref().map(|p| p.name().to_string()),
            "classifier built"
        );
        Ok(DayClassifier::new(
            base_rule,
            plan,
            Some(self.store.clone()),
        ))
    }
}

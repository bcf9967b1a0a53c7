//! The "data changed" signal.
//!
//! The store's only obligation is to emit one [`DataChange`] after every
//! successful mutation. Subscriber management belongs to the caller: the
//! store holds a single notifier callback handed in at construction and
//! never inspects it again.

use std::sync::Arc;

/// Which area of the store a successful mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataChange {
    /// A custom day-type override row changed.
    CustomDays,
    /// A per-day comment row changed.
    Comments,
    /// The base-rule configuration row changed.
    BaseRule,
    /// A user-authored holiday plan (or its day-set) changed.
    HolidayPlans,
    /// An app configuration value (e.g. the selected plan) changed.
    AppConfig,
}

/// Callback invoked after every successful mutation.
pub type ChangeNotifier = Arc<dyn Fn(DataChange) + Send + Sync>;

/// Holds the optional notifier; absent means mutations are silent.
#[derive(Clone, Default)]
pub(crate) struct ChangeSignal {
    notifier: Option<ChangeNotifier>,
}

impl ChangeSignal {
    pub(crate) fn new(notifier: Option<ChangeNotifier>) -> Self {
        Self { notifier }
    }

    pub(crate) fn emit(&self, change: DataChange) {
        if let Some(notifier) = &self.notifier {
            notifier(change);
        }
    }
}

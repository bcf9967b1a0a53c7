//! Bundled region plans.
//!
//! Region resources are compiled into the binary and immutable. Loading
//! parses the JSON on every call; a malformed resource makes the plan
//! unavailable rather than surfacing an error (logged, see the design
//! notes on fail-closed resources).

use crate::{PlanFile, PublicHolidayPlan};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

const CN_RESOURCE: &str = include_str!("../resources/cn.json");
const US_RESOURCE: &str = include_str!("../resources/us.json");

/// A bundled holiday region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Mainland China, including compensatory workdays.
    China,
    /// United States federal holidays.
    UnitedStates,
}

impl Region {
    /// All bundled regions.
    pub const ALL: [Region; 2] = [Region::China, Region::UnitedStates];

    /// Stable key used in config values and plan-key strings.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Region::China => "cn",
            Region::UnitedStates => "us",
        }
    }

    fn resource(&self) -> &'static str {
        match self {
            Region::China => CN_RESOURCE,
            Region::UnitedStates => US_RESOURCE,
        }
    }

    /// Loads the bundled plan for this region.
    ///
    /// Fails closed: a malformed resource yields `None` (the plan is
    /// simply unavailable), with a warning in the log.
    #[must_use]
    pub fn load(&self) -> Option<PublicHolidayPlan> {
        let parsed = PlanFile::from_json(self.resource())
            .and_then(PlanFile::into_plan);
        match parsed {
            Ok(plan) => Some(plan),
            Err(e) => {
                warn!(region = self.key(), error = %e, "bundled plan unavailable");
                None
            }
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = crate::HolidayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| crate::HolidayError::UnknownPlanKey(s.to_string()))
    }
}

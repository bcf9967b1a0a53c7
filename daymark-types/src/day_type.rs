use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a day counts as rest or work.
///
/// Serialized in resource and exchange files as `0` (off) / `1` (work),
/// which is also how override rows store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum DayType {
    Off = 0,
    Work = 1,
}

impl DayType {
    /// Returns true for [`DayType::Off`].
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, DayType::Off)
    }

    /// The day type matching an `is_off` boolean.
    #[must_use]
    pub const fn from_is_off(off: bool) -> Self {
        if off { DayType::Off } else { DayType::Work }
    }
}

impl From<DayType> for u8 {
    fn from(t: DayType) -> u8 {
        t as u8
    }
}

impl TryFrom<u8> for DayType {
    type Error = Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        match value {
            0 => Ok(DayType::Off),
            1 => Ok(DayType::Work),
            other => Err(Error::InvalidDayType(other)),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayType::Off => "off",
            DayType::Work => "work",
        })
    }
}

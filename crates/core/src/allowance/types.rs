//! Entry type definitions.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an employee did on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// 6AM shift.
    #[serde(rename = "6am")]
    SixAm,
    /// 9AM shift (regular hours).
    #[serde(rename = "9am")]
    NineAm,
    /// 1PM shift.
    #[serde(rename = "1pm")]
    OnePm,
    /// 5PM shift.
    #[serde(rename = "5pm")]
    FivePm,
    /// 9PM shift.
    #[serde(rename = "9pm")]
    NinePm,
    /// On call.
    #[serde(rename = "oncall")]
    OnCall,
    /// Patching, full day.
    #[serde(rename = "patch_full")]
    PatchFull,
    /// Patching, half day.
    #[serde(rename = "patch_half")]
    PatchHalf,
    /// Planned activity, full day.
    #[serde(rename = "activity_full")]
    ActivityFull,
    /// Planned activity, half day.
    #[serde(rename = "activity_half")]
    ActivityHalf,
    /// Leave.
    #[serde(rename = "leave")]
    Leave,
    /// Weekend.
    #[serde(rename = "weekend")]
    Weekend,
    /// Public holiday.
    #[serde(rename = "holiday")]
    Holiday,
}

/// Grouping used when presenting entry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryGroup {
    /// Timed shifts.
    Shift,
    /// On-call, patching and activities.
    Special,
    /// Days off.
    Other,
}

/// The code did not name a known entry type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entry type: {0}")]
pub struct UnknownEntryType(pub String);

impl EntryType {
    /// Every entry type, in presentation order.
    pub const ALL: [Self; 13] = [
        Self::SixAm,
        Self::NineAm,
        Self::OnePm,
        Self::FivePm,
        Self::NinePm,
        Self::OnCall,
        Self::PatchFull,
        Self::PatchHalf,
        Self::ActivityFull,
        Self::ActivityHalf,
        Self::Leave,
        Self::Weekend,
        Self::Holiday,
    ];

    /// Returns the wire code (e.g. `5pm`, `patch_full`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SixAm => "6am",
            Self::NineAm => "9am",
            Self::OnePm => "1pm",
            Self::FivePm => "5pm",
            Self::NinePm => "9pm",
            Self::OnCall => "oncall",
            Self::PatchFull => "patch_full",
            Self::PatchHalf => "patch_half",
            Self::ActivityFull => "activity_full",
            Self::ActivityHalf => "activity_half",
            Self::Leave => "leave",
            Self::Weekend => "weekend",
            Self::Holiday => "holiday",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SixAm => "6AM Shift",
            Self::NineAm => "9AM Shift",
            Self::OnePm => "1PM Shift",
            Self::FivePm => "5PM Shift",
            Self::NinePm => "9PM Shift",
            Self::OnCall => "On Call",
            Self::PatchFull => "Patch (Full Day)",
            Self::PatchHalf => "Patch (Half Day)",
            Self::ActivityFull => "Activity (Full Day)",
            Self::ActivityHalf => "Activity (Half Day)",
            Self::Leave => "Leave",
            Self::Weekend => "Weekend",
            Self::Holiday => "Public Holiday",
        }
    }

    /// Returns the presentation group.
    #[must_use]
    pub const fn group(self) -> EntryGroup {
        match self {
            Self::SixAm | Self::NineAm | Self::OnePm | Self::FivePm | Self::NinePm => {
                EntryGroup::Shift
            }
            Self::OnCall
            | Self::PatchFull
            | Self::PatchHalf
            | Self::ActivityFull
            | Self::ActivityHalf => EntryGroup::Special,
            Self::Leave | Self::Weekend | Self::Holiday => EntryGroup::Other,
        }
    }

    /// Returns the fixed allowance paid for a day of this type.
    #[must_use]
    pub fn allowance(self) -> Decimal {
        let amount = match self {
            Self::SixAm | Self::OnePm => 400,
            Self::FivePm => 1200,
            Self::NinePm => 1400,
            Self::OnCall | Self::PatchFull | Self::ActivityFull => 2000,
            Self::PatchHalf | Self::ActivityHalf => 1000,
            Self::NineAm | Self::Leave | Self::Weekend | Self::Holiday => 0,
        };
        Decimal::from(amount)
    }

    /// Returns true if the work-from-home flag may accompany this type.
    ///
    /// Days off cannot be worked from home.
    #[must_use]
    pub const fn allows_wfh(self) -> bool {
        !matches!(self.group(), EntryGroup::Other)
    }

    /// Returns the catalogue row for this type.
    #[must_use]
    pub fn info(self) -> EntryTypeInfo {
        EntryTypeInfo {
            code: self.code(),
            label: self.label(),
            group: self.group(),
            allowance: self.allowance(),
            wfh_allowed: self.allows_wfh(),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| UnknownEntryType(s.to_string()))
    }
}

/// One row of the entry type catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryTypeInfo {
    /// Wire code.
    pub code: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Presentation group.
    pub group: EntryGroup,
    /// Fixed allowance.
    pub allowance: Decimal,
    /// Whether WFH may be selected with this type.
    pub wfh_allowed: bool,
}

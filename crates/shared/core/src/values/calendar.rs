use chrono::{Days, Months};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timestamp;

/// Calendar-aware shift expressed in years, months and days
///
/// Applied in the proleptic Gregorian calendar: years and months first, then
/// days. When the day of month does not exist in the resulting month
/// (e.g. Jan 31 + 1 month) it is clamped to the last valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarOffset {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl CalendarOffset {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    pub fn years(years: i32) -> Self {
        Self::new(years, 0, 0)
    }

    pub fn months(months: i32) -> Self {
        Self::new(0, months, 0)
    }

    pub fn days(days: i32) -> Self {
        Self::new(0, 0, days)
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Shift `from` by this offset
    ///
    /// Returns `None` when the result leaves chrono's representable range.
    pub fn apply(&self, from: Timestamp) -> Option<Timestamp> {
        let total_months = i64::from(self.years) * 12 + i64::from(self.months);
        let months = Months::new(u32::try_from(total_months.unsigned_abs()).ok()?);
        let shifted = if total_months >= 0 {
            from.checked_add_months(months)?
        } else {
            from.checked_sub_months(months)?
        };

        let days = Days::new(u64::from(self.days.unsigned_abs()));
        if self.days >= 0 {
            shifted.checked_add_days(days)
        } else {
            shifted.checked_sub_days(days)
        }
    }
}

impl fmt::Display for CalendarOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}y{:+}m{:+}d", self.years, self.months, self.days)
    }
}

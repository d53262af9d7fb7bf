use chrono::{DateTime, Utc};

mod calendar;
mod moment_id;

pub use calendar::CalendarOffset;
pub use moment_id::MomentId;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Signed span of simulated time. Negative values travel to the past.
pub use chrono::Duration;

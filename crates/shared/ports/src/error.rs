use thiserror::Error;
use timewarp_core::{CalendarOffset, Timestamp};

/// Errors raised by clock mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Calendar offset {offset} applied to {from} leaves the representable range")]
    CalendarOutOfRange {
        from: Timestamp,
        offset: CalendarOffset,
    },
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_error_message_names_offset_and_origin() {
        let err = ClockError::CalendarOutOfRange {
            from: Utc.with_ymd_and_hms(2049, 5, 6, 0, 0, 0).unwrap(),
            offset: CalendarOffset::years(i32::MAX),
        };
        let msg = err.to_string();
        assert!(msg.contains("+2147483647y+0m+0d"), "{msg}");
        assert!(msg.contains("2049-05-06"), "{msg}");
    }
}

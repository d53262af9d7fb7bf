//! Timewarp Clock
//!
//! Deterministic virtual time for testing time-dependent concurrent code.
//! Instead of waiting on the wall clock, a test moves a [`VirtualClock`] and
//! every timeout, tick and sleep due by then fires before the move returns.
//!
//! ## Pieces
//!
//! ```text
//! VirtualClock (current time + pending moments, one lock)
//!     │
//!     ├── after / sleep   one value when the deadline is reached
//!     ├── Timer           one-shot, stop / reset
//!     ├── Ticker          re-arms itself on every fire, stop / reset
//!     └── Observer        one-shot signal on the next scheduling event
//! ```
//!
//! ## Usage
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use timewarp_clock::VirtualClock;
//!
//! let start = Utc.with_ymd_and_hms(2049, 5, 6, 0, 0, 0).unwrap();
//! let clock = VirtualClock::new(start);
//!
//! let ticker = clock.ticker(Duration::seconds(2));
//! let timeout = clock.after(Duration::seconds(3));
//!
//! clock.travel(Duration::seconds(2));
//! assert_eq!(ticker.channel().try_recv(), Ok(start + Duration::seconds(2)));
//! assert!(timeout.try_recv().is_err());
//!
//! clock.travel(Duration::seconds(2));
//! assert_eq!(ticker.channel().try_recv(), Ok(start + Duration::seconds(4)));
//! assert_eq!(timeout.try_recv(), Ok(start + Duration::seconds(3)));
//! ```

mod config;
mod moment;
mod moment_set;
mod observer;
mod schedule;
mod system;
mod ticker;
mod timer;
mod virtual_clock;

pub use config::ClockConfig;
pub use observer::Observer;
pub use system::SystemClock;
pub use ticker::Ticker;
pub use timer::Timer;
pub use virtual_clock::VirtualClock;

// Re-export the port and value types for convenience
pub use timewarp_core::{CalendarOffset, Duration, MomentId, Timestamp};
pub use timewarp_ports::{Clock, ClockError, ClockResult};

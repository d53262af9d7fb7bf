use serde::{Deserialize, Serialize};
use timewarp_core::Timestamp;

/// Virtual clock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Identifier reported through the `Clock` port and in logs
    pub name: String,
    /// Initial simulated time; `None` starts at the wall time of construction
    pub start: Option<Timestamp>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            name: "VirtualClock".to_string(),
            start: None,
        }
    }
}

impl ClockConfig {
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

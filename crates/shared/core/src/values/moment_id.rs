use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a scheduled moment
///
/// Issued by a clock in strictly increasing order, so comparing two ids
/// tells which moment was registered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MomentId(u64);

impl MomentId {
    /// The first id a fresh clock hands out
    pub const FIRST: MomentId = MomentId(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The id issued right after this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moment#{}", self.0)
    }
}

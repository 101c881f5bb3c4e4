use serde::{Deserialize, Serialize};

/// External identifier of a toll location, as found in the segment data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    pub const fn new(id: i64) -> Self {
        LocationId(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LocationId {
    fn from(id: i64) -> Self {
        LocationId::new(id)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

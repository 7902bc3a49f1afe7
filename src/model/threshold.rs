use std::fmt;

use serde::{Serialize, Serializer};

/// Confidence a prediction must strictly exceed to count as a detection.
pub const THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grade {
    #[default]
    Clear,
    Detected,
}

impl Grade {
    pub fn from_hit(hit: bool) -> Self {
        if hit { Grade::Detected } else { Grade::Clear }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Grade::Clear => 0,
            Grade::Detected => 1,
        }
    }

    pub fn as_u16(self) -> u16 {
        u16::from(self.as_u8())
    }
}

pub fn qualifies(score: f64) -> bool {
    score > THRESHOLD
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/threshold.rs"]
mod tests;

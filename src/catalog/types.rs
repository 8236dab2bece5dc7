use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed score interval `[low, high]` a posting accepts.
///
/// Serialized as a two-element array (`[6, 8]`) to match the backend's
/// `score_range` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i32; 2]", into = "[i32; 2]")]
pub struct ScoreRange {
    low: i32,
    high: i32,
}

impl ScoreRange {
    pub fn new(low: i32, high: i32) -> Result<Self, String> {
        if low > high {
            return Err(format!("low bound {} exceeds high bound {}", low, high));
        }
        Ok(Self { low, high })
    }

    /// The whole 0-10 rating scale
    pub fn full() -> Self {
        Self { low: 0, high: 10 }
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, score: f64) -> bool {
        f64::from(self.low) <= score && score <= f64::from(self.high)
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    pub fn midpoint(&self) -> f64 {
        (f64::from(self.low) + f64::from(self.high)) / 2.0
    }
}

impl TryFrom<[i32; 2]> for ScoreRange {
    type Error = String;

    fn try_from(value: [i32; 2]) -> Result<Self, Self::Error> {
        ScoreRange::new(value[0], value[1])
    }
}

impl From<ScoreRange> for [i32; 2] {
    fn from(range: ScoreRange) -> Self {
        [range.low, range.high]
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipPosting {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub description: String,
    pub skills_required: Vec<String>, // display order
    pub score_range: ScoreRange,
}

impl InternshipPosting {
    /// Return a short reference in the format "Title @ Company"
    pub fn short_ref(&self) -> String {
        format!("{} @ {}", self.title, self.company)
    }

    pub fn is_remote(&self) -> bool {
        self.location.eq_ignore_ascii_case("remote")
    }
}

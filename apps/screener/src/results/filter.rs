use std::collections::HashSet;
use std::str::FromStr;

use crate::results::normalize::{CandidateRecord, ResultId};

/// Minimum match score a result needs to be shown. Always within 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: u8 = 100;

    /// Clamps into 0–100.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Any whole number, clamped.
impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self::new)
            .map_err(|_| "expected a whole number between 0 and 100".to_string())
    }
}

/// Ids of the results whose match score reaches the threshold.
pub fn visible(records: &[CandidateRecord], threshold: Threshold) -> HashSet<ResultId> {
    records
        .iter()
        .filter(|r| r.match_score >= f64::from(threshold.value()))
        .map(|r| r.id)
        .collect()
}

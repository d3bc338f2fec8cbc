//! Percentage value object (0-100 scale) used for all signal scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Fifty percent, the neutral midpoint for absent signals.
    pub const NEUTRAL: Self = Self(50);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Creates a Percentage from a numerator/denominator pair, rounding
    /// to the nearest integer and clamping to 100.
    ///
    /// A zero denominator yields zero.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        let pct = (numerator as f64 / denominator as f64 * 100.0).round();
        Self::new(pct.clamp(0.0, 100.0) as u8)
    }

    /// Creates a Percentage from a float score, rounding and clamping.
    pub fn from_f64(value: f64) -> Self {
        Self::new(value.clamp(0.0, 100.0).round() as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Returns the value as f64 (0.0 to 100.0).
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

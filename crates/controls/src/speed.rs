use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a proposed speed was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeedError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("speed {0} outside [{min}, {max}]", min = Speed::MIN, max = Speed::MAX)]
    OutOfRange(f32),
}

/// Rotation speed in radians per tick, constrained to `[0, 0.1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Speed(f32);

impl Speed {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 0.1;
    /// Granularity of the slider and numeric inputs.
    pub const STEP: f32 = 0.001;
    pub const DEFAULT: Speed = Speed(0.01);

    pub fn new(value: f32) -> Result<Self, SpeedError> {
        if value.is_nan() {
            return Err(SpeedError::NotANumber(value.to_string()));
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(SpeedError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Speed {
    type Error = SpeedError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for f32 {
    fn from(speed: Speed) -> f32 {
        speed.0
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f32 = trimmed
            .parse()
            .map_err(|_| SpeedError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

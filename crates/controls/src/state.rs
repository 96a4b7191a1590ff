use crate::speed::{Speed, SpeedError};
use meshspin_common::MeshKind;
use serde::{Deserialize, Serialize};

/// Per-mesh rotation speeds.
///
/// This is the single source of truth: slider, numeric field and animation
/// loop all read the same cell, so there is nothing to keep in sync.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlState {
    speeds: [Speed; 3],
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(&self, kind: MeshKind) -> Speed {
        self.speeds[kind.index()]
    }

    /// Store `value` if it is a valid speed. On error the previous value is kept.
    pub fn set_speed(&mut self, kind: MeshKind, value: f32) -> Result<Speed, SpeedError> {
        let speed = Speed::new(value)?;
        self.speeds[kind.index()] = speed;
        Ok(speed)
    }

    /// Parse and store a speed typed into a numeric field.
    pub fn set_speed_text(&mut self, kind: MeshKind, text: &str) -> Result<Speed, SpeedError> {
        let speed: Speed = text.parse()?;
        self.speeds[kind.index()] = speed;
        Ok(speed)
    }
}

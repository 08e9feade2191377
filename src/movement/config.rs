//! Movement domain: per-character locomotion and rope tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable per-character tuning for the locomotion controller and rope.
///
/// Units are world units (1 unit ~ one tile) and seconds.
#[derive(Component, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Vertical velocity applied on jump start and while the jump is sustained
    pub jump_force: f32,
    /// Longest time the jump button keeps re-applying `jump_force`
    pub max_jump_time: f32,
    /// Longest time a character can hold onto a wall before sliding off
    pub max_cling_time: f32,
    /// Fraction of normal horizontal speed while crouched (0..=1)
    pub crouch_speed: f32,
    pub dash_speed: f32,
    /// Dashes per second cap
    pub dash_rate: f32,
    /// Never longer than `1 / dash_rate`, so a dash always ends before the next may start
    pub dash_duration: f32,
    /// Forced descent speed once the cling timer runs out
    pub fall_speed: f32,
    /// Time constant of the horizontal velocity smoothing
    pub movement_smoothing: f32,
    pub air_control: bool,
    pub swing_force: f32,
    pub pull_force: f32,
    pub max_rope_length: f32,
    pub climb_speed: f32,
    pub probes: ProbeLayout,
    pub capabilities: Capabilities,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            jump_force: 7.0,
            max_jump_time: 0.3,
            max_cling_time: 1.0,
            crouch_speed: 0.36,
            dash_speed: 50.0,
            dash_rate: 2.0,
            dash_duration: 0.3,
            fall_speed: 1.0,
            movement_smoothing: 0.05,
            air_control: false,
            swing_force: 10.0,
            pull_force: 5.0,
            max_rope_length: 10.0,
            climb_speed: 3.0,
            probes: ProbeLayout::default(),
            capabilities: Capabilities::default(),
        }
    }
}

/// Where the ground, ceiling and wall probes sit relative to the body, and how big they are.
///
/// The wall offset is given for a right-facing character and mirrored when facing left.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeLayout {
    pub ground_offset: Vec2,
    pub ceiling_offset: Vec2,
    pub wall_offset: Vec2,
    pub ground_radius: f32,
    pub ceiling_radius: f32,
    pub wall_radius: f32,
}

impl Default for ProbeLayout {
    fn default() -> Self {
        Self {
            ground_offset: Vec2::new(0.0, -0.9),
            ceiling_offset: Vec2::new(0.0, 0.95),
            wall_offset: Vec2::new(0.45, 0.0),
            ground_radius: 0.2,
            ceiling_radius: 0.2,
            wall_radius: 0.2,
        }
    }
}

/// Optional rope abilities. A character with both disabled never attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Capabilities {
    pub swing: bool,
    pub tether: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            swing: true,
            tether: true,
        }
    }
}

impl Capabilities {
    pub fn any_rope(&self) -> bool {
        self.swing || self.tether
    }
}

/// A tuning value outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid '{}': {}", self.field, self.message)
    }
}

impl MovementConfig {
    /// Check every field is in range. Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError {
                    field,
                    message: format!("expected a finite value >= 0, got {}", value),
                })
            }
        }

        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError {
                    field,
                    message: format!("expected a finite value > 0, got {}", value),
                })
            }
        }

        non_negative("jump_force", self.jump_force)?;
        non_negative("max_jump_time", self.max_jump_time)?;
        non_negative("max_cling_time", self.max_cling_time)?;
        if !(0.0..=1.0).contains(&self.crouch_speed) {
            return Err(ConfigError {
                field: "crouch_speed",
                message: format!("expected a fraction in [0, 1], got {}", self.crouch_speed),
            });
        }
        non_negative("dash_speed", self.dash_speed)?;
        positive("dash_rate", self.dash_rate)?;
        non_negative("dash_duration", self.dash_duration)?;
        if self.dash_duration > self.dash_interval() {
            return Err(ConfigError {
                field: "dash_duration",
                message: format!(
                    "expected at most 1 / dash_rate ({}), got {}",
                    self.dash_interval(),
                    self.dash_duration
                ),
            });
        }
        non_negative("fall_speed", self.fall_speed)?;
        non_negative("movement_smoothing", self.movement_smoothing)?;
        non_negative("swing_force", self.swing_force)?;
        non_negative("pull_force", self.pull_force)?;
        positive("max_rope_length", self.max_rope_length)?;
        non_negative("climb_speed", self.climb_speed)?;
        positive("probes.ground_radius", self.probes.ground_radius)?;
        positive("probes.ceiling_radius", self.probes.ceiling_radius)?;
        positive("probes.wall_radius", self.probes.wall_radius)?;
        Ok(())
    }

    /// Seconds between two dash starts.
    pub fn dash_interval(&self) -> f32 {
        1.0 / self.dash_rate
    }
}

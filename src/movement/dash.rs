//! Movement domain: the rate-limited, self-expiring dash.
//!
//! The dash is an explicit timer rather than a suspended task: starting it records the
//! override velocity and when it ends, and [`DashTask::resume`] is polled once per tick
//! before any movement logic reads `can_dash`.

use bevy::prelude::*;

use crate::movement::{Facing, MovementConfig};

/// Fraction of dash speed used on each axis for an aimed (diagonal) dash
pub const DIAGONAL_DASH_SCALE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDash {
    velocity: Vec2,
    ends_at: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashTask {
    /// Earliest time the next dash may start
    next_allowed: f32,
    active: Option<ActiveDash>,
}

impl DashTask {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn next_allowed(&self) -> f32 {
        self.next_allowed
    }

    /// Velocity the dash is holding the body at, if one is running.
    pub fn override_velocity(&self) -> Option<Vec2> {
        self.active.map(|dash| dash.velocity)
    }

    /// Start a dash at `now`. Returns the dash velocity, or `None` when still on cooldown
    /// or when a dash is already running. Validated tuning keeps the duration within the
    /// cooldown, so the running check only matters for hand-built configs.
    pub fn try_start(
        &mut self,
        facing: Facing,
        vertical: f32,
        config: &MovementConfig,
        now: f32,
    ) -> Option<Vec2> {
        if self.active.is_some() || now < self.next_allowed {
            return None;
        }

        let velocity = dash_velocity(facing, vertical, config.dash_speed);
        self.next_allowed = now + config.dash_interval();
        self.active = Some(ActiveDash {
            velocity,
            ends_at: now + config.dash_duration,
        });
        Some(velocity)
    }

    /// Expire the running dash once its duration has elapsed. Returns `true` on the tick it ends.
    pub fn resume(&mut self, now: f32) -> bool {
        match self.active {
            Some(dash) if now >= dash.ends_at => {
                self.active = None;
                true
            }
            _ => false,
        }
    }
}

/// Dash velocity for a facing and the vertical aim input at trigger time.
pub fn dash_velocity(facing: Facing, vertical: f32, dash_speed: f32) -> Vec2 {
    if vertical != 0.0 {
        Vec2::new(
            facing.sign() * dash_speed * DIAGONAL_DASH_SCALE,
            vertical.signum() * dash_speed * DIAGONAL_DASH_SCALE,
        )
    } else {
        Vec2::new(facing.sign() * dash_speed, 0.0)
    }
}

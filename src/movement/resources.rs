//! Movement domain: input resource shared by the locomotion, rope and combat ticks.

use bevy::prelude::*;

/// Logical actions sampled from the keyboard.
///
/// Held actions and axes are overwritten every frame. Edges (`*_pressed`, `*_released`) are
/// latched until the next fixed tick has consumed them, so a press is never lost when no
/// fixed step runs in the frame it happened.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    /// Horizontal axis in x, vertical axis in y, each in [-1, 1]
    pub axis: Vec2,
    pub crouch_held: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    pub attack_pressed: bool,
    pub rope_fire_pressed: bool,
    pub rope_fire_released: bool,
}

impl MovementInput {
    pub fn horizontal(&self) -> f32 {
        self.axis.x
    }

    pub fn vertical(&self) -> f32 {
        self.axis.y
    }

    /// Drop the latched edges once a fixed tick has seen them.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.dash_pressed = false;
        self.attack_pressed = false;
        self.rope_fire_pressed = false;
        self.rope_fire_released = false;
    }
}

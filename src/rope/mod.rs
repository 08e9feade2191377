//! Rope domain: grappling rope attachment, swing joint and tether pull.

use bevy::prelude::*;

use crate::movement::TickSet;

mod state;
mod systems;


pub use state::{
    AttachOutcome, RopeKind, RopeState, SWING_ATTACH_IMPULSE, TETHER_RELEASE_DISTANCE,
    aim_direction, pull_impulse, swing_force,
};

/// Sprite that sits on the active rope anchor of `owner`
#[derive(Component, Debug)]
pub struct RopeHookMarker {
    pub owner: Entity,
}

/// Distance joint holding `owner` to its hook marker at `anchor`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RopeJoint {
    pub owner: Entity,
    pub anchor: Vec2,
    pub max_length: f32,
}

/// Child collider whose contacts stop the owner from climbing the rope
#[derive(Component, Debug)]
pub struct RopeObstructionSensor;

pub struct RopePlugin;

impl Plugin for RopePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            systems::handle_rope_fire.in_set(TickSet::RopeInput),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::update_rope_obstruction,
                systems::adjust_rope_length,
                systems::update_rope_path,
                systems::sync_rope_joint,
            )
                .chain()
                .in_set(TickSet::Constraints),
        )
        .add_systems(Update, (systems::draw_rope, systems::sync_hook_marker));
    }
}

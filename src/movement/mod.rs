//! Movement domain: ground, wall, jump, crouch and dash locomotion for rope-capable characters.

use bevy::prelude::*;

mod bootstrap;
mod components;
mod config;
pub mod controller;
mod dash;
mod dev;
mod events;
pub mod query;
mod resources;
mod smoothing;
pub(crate) mod systems;

#[cfg(test)]
pub(crate) mod fake_world;

pub use components::{
    CharacterState, CharacterVisual, Contacts, CrouchCollider, Facing, GameLayer, Ground,
    JumpPhase, Player, Posture, RopeMode, VerticalMode, Wall,
};
pub use config::{Capabilities, ConfigError, MovementConfig, ProbeLayout};
pub use dash::{DIAGONAL_DASH_SCALE, DashTask, dash_velocity};
pub use events::{CrouchChangedEvent, LandedEvent, WallClingStartedEvent};
pub use resources::MovementInput;
pub use smoothing::SmoothDamp;

/// Simulation tick rate
pub const FIXED_HZ: f64 = 50.0;

/// Ordered phases of one fixed simulation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Timers started in earlier ticks (dash, invincibility)
    Continuations,
    /// Ground and wall probes
    Contacts,
    /// Rope fire and release
    RopeInput,
    /// Locomotion and melee
    Drive,
    /// Rope length, path and distance constraint
    Constraints,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .init_resource::<MovementInput>()
            .add_message::<LandedEvent>()
            .add_message::<WallClingStartedEvent>()
            .add_message::<CrouchChangedEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Continuations,
                    TickSet::Contacts,
                    TickSet::RopeInput,
                    TickSet::Drive,
                    TickSet::Constraints,
                )
                    .chain(),
            )
            .add_systems(Startup, (dev::spawn_test_room, bootstrap::spawn_player))
            .add_systems(
                PreUpdate,
                systems::read_input.after(bevy::input::InputSystems),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::resume_dash.in_set(TickSet::Continuations),
                    systems::refresh_contacts.in_set(TickSet::Contacts),
                    systems::drive_locomotion.in_set(TickSet::Drive),
                ),
            )
            .add_systems(FixedPostUpdate, systems::clear_input_edges)
            .add_systems(
                Update,
                (systems::sync_facing_visual, systems::sync_crouch_collider),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::draw_probes);
    }
}

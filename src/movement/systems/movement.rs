//! Movement domain: per-tick locomotion systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::controller::{self, BodyFrame, Locomotion, TickClock};
use crate::movement::query::AvianQueries;
use crate::movement::{CharacterState, CrouchChangedEvent, MovementConfig, MovementInput, Player};
use crate::rope::RopeState;

/// Mass used to turn forces and impulses into velocity changes.
pub(crate) fn body_mass(mass: Option<&ComputedMass>) -> f32 {
    mass.map(|mass| mass.value()).unwrap_or(1.0)
}

/// Expire finished dashes before contacts and movement read `can_dash`.
pub(crate) fn resume_dash(
    time: Res<Time>,
    mut query: Query<(&Position, &mut LinearVelocity, &mut CharacterState), With<Player>>,
) {
    let now = time.elapsed_secs();

    for (position, mut velocity, mut state) in &mut query {
        let mut frame = BodyFrame::new(position.0, velocity.0);
        if controller::resume_dash(&mut state, &mut frame, now) {
            velocity.0 = frame.velocity;
        }
    }
}

pub(crate) fn drive_locomotion(
    time: Res<Time>,
    input: Res<MovementInput>,
    queries: AvianQueries,
    mut crouch_events: MessageWriter<CrouchChangedEvent>,
    mut query: Query<
        (
            Entity,
            &Position,
            &mut LinearVelocity,
            Option<&ComputedMass>,
            &MovementConfig,
            &mut CharacterState,
            &mut RopeState,
        ),
        With<Player>,
    >,
) {
    let clock = TickClock {
        now: time.elapsed_secs(),
        dt: time.delta_secs(),
    };

    for (entity, position, mut velocity, mass, config, mut state, mut rope) in &mut query {
        let locomotion = Locomotion::new(config, &queries, entity);
        let mut frame = BodyFrame::new(position.0, velocity.0);

        let report = locomotion.step(&mut state, &mut frame, &input, clock);

        if let Some(crouching) = report.crouch_changed {
            debug!("Crouch changed: entity={:?}, crouching={}", entity, crouching);
            crouch_events.write(CrouchChangedEvent { entity, crouching });
        }

        if report.detach_rope {
            rope.detach(&mut state);
            debug!("Rope detached by dash: entity={:?}", entity);
        }

        velocity.0 = frame.resolve(body_mass(mass), clock.dt);
    }
}

//! Rope domain: per-tick rope systems and rope visuals.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::controller::BodyFrame;
use crate::movement::query::AvianQueries;
use crate::movement::systems::body_mass;
use crate::movement::{CharacterState, MovementConfig, MovementInput, Player};
use crate::rope::{
    AttachOutcome, RopeHookMarker, RopeJoint, RopeKind, RopeObstructionSensor, RopeState,
};

const SWING_COLOR: Color = Color::srgb(0.85, 0.75, 0.55);
const TETHER_COLOR: Color = Color::srgb(0.9, 0.45, 0.35);
/// Length change below which an existing joint is kept
const JOINT_LENGTH_TOLERANCE: f32 = 1e-4;

/// Fire the rope on press and let go on release.
pub(crate) fn handle_rope_fire(
    input: Res<MovementInput>,
    queries: AvianQueries,
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
    for (entity, position, mut velocity, mass, config, mut state, mut rope) in &mut query {
        if input.rope_fire_pressed && config.capabilities.any_rope() {
            let mut frame = BodyFrame::new(position.0, velocity.0);
            let outcome =
                rope.try_attach(&mut state, config, &mut frame, input.vertical(), &queries);

            match outcome {
                AttachOutcome::Swinging { anchor, distance } => {
                    debug!(
                        "Rope attached (swing): entity={:?}, anchor=({:.2}, {:.2}), distance={:.2}",
                        entity, anchor.x, anchor.y, distance
                    );
                    // Impulses are instantaneous, no tick length applies
                    velocity.0 = frame.resolve(body_mass(mass), 0.0);
                }
                AttachOutcome::Tethered { anchor } => {
                    debug!(
                        "Rope attached (tether): entity={:?}, anchor=({:.2}, {:.2})",
                        entity, anchor.x, anchor.y
                    );
                }
                AttachOutcome::Ignored(target) => {
                    debug!("Rope hit {:?}, nothing to hold", target);
                }
                AttachOutcome::Missed | AttachOutcome::AlreadyAttached => {}
            }
        }

        if input.rope_fire_released && (rope.is_attached() || rope.visible()) {
            rope.detach(&mut state);
            debug!("Rope detached: entity={:?}", entity);
        }
    }
}

/// Climbing is blocked while the sensor child touches anything.
pub(crate) fn update_rope_obstruction(
    sensors: Query<(&ChildOf, &CollidingEntities), With<RopeObstructionSensor>>,
    mut ropes: Query<&mut RopeState>,
) {
    for (child_of, colliding) in &sensors {
        let Ok(mut rope) = ropes.get_mut(child_of.parent()) else {
            continue;
        };
        let blocked = !colliding.is_empty();
        if rope.blocked != blocked {
            rope.blocked = blocked;
        }
    }
}

pub(crate) fn adjust_rope_length(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<(&MovementConfig, &mut RopeState), With<Player>>,
) {
    for (config, mut rope) in &mut query {
        if rope.is_attached() {
            rope.adjust_length(input.vertical(), config.climb_speed, time.delta_secs());
        }
    }
}

pub(crate) fn update_rope_path(mut query: Query<(&Position, &mut RopeState)>) {
    for (position, mut rope) in &mut query {
        if rope.is_attached() {
            rope.update_anchor(position.0);
        }
    }
}

/// Keep one avian distance joint per swinging character, between its hook marker body and
/// the character, limited to the current rope length.
///
/// The joint is respawned whenever the hook or the length changes and despawned once the
/// constraint is released, so the solver always sees the rope the state describes.
pub(crate) fn sync_rope_joint(
    mut commands: Commands,
    ropes: Query<&RopeState>,
    mut markers: Query<(Entity, &RopeHookMarker, &mut Position, &mut Transform)>,
    joints: Query<(Entity, &RopeJoint)>,
) {
    for (marker_entity, marker, mut position, mut transform) in &mut markers {
        let wanted = ropes
            .get(marker.owner)
            .ok()
            .and_then(RopeState::joint_limit);
        let current = joints.iter().find(|(_, joint)| joint.owner == marker.owner);

        match (wanted, current) {
            (None, None) => {}
            (None, Some((joint_entity, _))) => {
                commands.entity(joint_entity).despawn();
                debug!("Rope joint released: owner={:?}", marker.owner);
            }
            (Some((anchor, max_length)), Some((_, joint)))
                if joint.anchor == anchor
                    && (joint.max_length - max_length).abs() <= JOINT_LENGTH_TOLERANCE => {}
            (Some((anchor, max_length)), current) => {
                if let Some((joint_entity, _)) = current {
                    commands.entity(joint_entity).despawn();
                }

                position.0 = anchor;
                transform.translation.x = anchor.x;
                transform.translation.y = anchor.y;

                commands.spawn((
                    RopeJoint {
                        owner: marker.owner,
                        anchor,
                        max_length,
                    },
                    DistanceJoint::new(marker_entity, marker.owner).with_limits(0.0, max_length),
                ));
                debug!(
                    "Rope joint: owner={:?}, hook=({:.2}, {:.2}), length={:.2}",
                    marker.owner, anchor.x, anchor.y, max_length
                );
            }
        }
    }
}

pub(crate) fn draw_rope(mut gizmos: Gizmos, query: Query<(&Position, &RopeState)>) {
    for (position, rope) in &query {
        if !rope.visible() {
            continue;
        }
        let color = match rope.kind() {
            Some(RopeKind::Swing) => SWING_COLOR,
            Some(RopeKind::Tether) => TETHER_COLOR,
            None => continue,
        };
        gizmos.linestrip_2d(rope.path(position.0), color);
    }
}

pub(crate) fn sync_hook_marker(
    ropes: Query<&RopeState>,
    mut markers: Query<(&RopeHookMarker, &mut Transform, &mut Visibility)>,
) {
    for (marker, mut transform, mut visibility) in &mut markers {
        let anchor = ropes
            .get(marker.owner)
            .ok()
            .filter(|rope| rope.visible())
            .and_then(RopeState::active_anchor);

        match anchor {
            Some(anchor) => {
                transform.translation.x = anchor.x;
                transform.translation.y = anchor.y;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

//! Movement domain: keep the sprite and crouch collider in step with the character state.

use std::f32::consts::PI;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CharacterState, CharacterVisual, CrouchCollider, Facing};

/// Mirror the character's sprite around the vertical axis to match its facing.
pub(crate) fn sync_facing_visual(
    states: Query<&CharacterState>,
    mut visuals: Query<(&ChildOf, &mut Transform), With<CharacterVisual>>,
) {
    for (child_of, mut transform) in &mut visuals {
        let Ok(state) = states.get(child_of.parent()) else {
            continue;
        };

        let rotation = match state.facing {
            Facing::Right => Quat::IDENTITY,
            Facing::Left => Quat::from_rotation_y(PI),
        };
        if transform.rotation != rotation {
            transform.rotation = rotation;
        }
    }
}

/// Disable the crouch collider while crouched. Characters without one are skipped.
pub(crate) fn sync_crouch_collider(
    mut commands: Commands,
    states: Query<&CharacterState>,
    colliders: Query<(Entity, &ChildOf, Has<ColliderDisabled>), With<CrouchCollider>>,
) {
    for (entity, child_of, disabled) in &colliders {
        let Ok(state) = states.get(child_of.parent()) else {
            continue;
        };

        if state.crouch_collider_enabled && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !state.crouch_collider_enabled && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

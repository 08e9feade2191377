//! Movement domain: player bootstrap from character data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Health, Invincibility, Mana, MeleeAttack};
use crate::content::{CharacterDef, CharacterRegistry};
use crate::core::SelectedCharacter;
use crate::movement::{CharacterState, CharacterVisual, CrouchCollider, Facing, GameLayer, Player};
use crate::rope::{RopeHookMarker, RopeObstructionSensor, RopeState};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(-2.0, -2.0);
/// Width of the body; the height is two halves of `PLAYER_HALF_HEIGHT`
const PLAYER_WIDTH: f32 = 0.8;
const PLAYER_HALF_HEIGHT: f32 = 0.9;
const HOOK_MARKER_COLOR: Color = Color::srgb(0.95, 0.8, 0.3);

/// Spawn the selected character: body, colliders, sprite and rope hook marker.
pub(crate) fn spawn_player(
    mut commands: Commands,
    selected: Res<SelectedCharacter>,
    registry: Option<Res<CharacterRegistry>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let def = match &registry {
        Some(registry) => registry.resolve(selected.character_id.as_deref()),
        None => {
            warn!("CharacterRegistry not available, using default character");
            CharacterDef::fallback()
        }
    };

    let player = spawn_character(&mut commands, &def, PLAYER_SPAWN);

    // Static body the swing joint hangs from; moved onto the hook on every attach
    commands.spawn((
        RopeHookMarker { owner: player },
        RigidBody::Static,
        Sprite {
            color: HOOK_MARKER_COLOR,
            custom_size: Some(Vec2::splat(0.3)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
        Visibility::Hidden,
    ));

    info!(
        "Spawning player: char={}, swing={}, tether={}, health={}, mana={}",
        def.id,
        def.movement.capabilities.swing,
        def.movement.capabilities.tether,
        def.health.max_health,
        def.mana.max_mana
    );
}

fn spawn_character(commands: &mut Commands, def: &CharacterDef, at: Vec2) -> Entity {
    let (r, g, b) = def.color;
    let melee = &def.melee;
    let layers = CollisionLayers::new(
        GameLayer::Player,
        [GameLayer::Ground, GameLayer::Wall, GameLayer::Enemy],
    );

    let player = commands
        .spawn((
            // Identity & Movement
            (
                Player,
                Name::new(def.name.clone()),
                CharacterState::new(Facing::Right),
                RopeState::new(def.movement.max_rope_length),
                def.movement.clone(),
            ),
            // Combat
            (
                Health::new(def.health.max_health),
                Mana::new(def.mana.max_mana),
                MeleeAttack::new(
                    melee.range,
                    melee.width,
                    melee.reach,
                    melee.damage,
                    melee.mana_recovery,
                    melee.rate,
                ),
            ),
            Transform::from_xyz(at.x, at.y, 1.0),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                Mass(1.0),
                NoAutoMass,
                Friction::new(0.0),
                LinearVelocity::default(),
            ),
        ))
        .id();

    if let Some(invincibility) = &def.health.invincibility {
        commands.entity(player).insert(Invincibility::new(
            invincibility.duration,
            invincibility.flicker_interval,
        ));
    }

    commands.entity(player).with_children(|parent| {
        // Lower half: always solid, and its contacts block rope climbing
        parent.spawn((
            RopeObstructionSensor,
            Collider::rectangle(PLAYER_WIDTH, PLAYER_HALF_HEIGHT),
            Transform::from_xyz(0.0, -PLAYER_HALF_HEIGHT / 2.0, 0.0),
            layers,
            CollidingEntities::default(),
        ));
        // Upper half: disabled while crouching
        parent.spawn((
            CrouchCollider,
            Collider::rectangle(PLAYER_WIDTH, PLAYER_HALF_HEIGHT),
            Transform::from_xyz(0.0, PLAYER_HALF_HEIGHT / 2.0, 0.0),
            layers,
        ));
        parent.spawn((
            CharacterVisual,
            Sprite {
                color: Color::srgb(r, g, b),
                custom_size: Some(Vec2::new(PLAYER_WIDTH, PLAYER_HALF_HEIGHT * 2.0)),
                ..default()
            },
            Transform::default(),
        ));
    });

    player
}

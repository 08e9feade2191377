//! Movement domain: demo room and dev-only probe gizmos.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{ContactDamage, Enemy, Health};
use crate::movement::query::RopeTarget;
use crate::movement::{GameLayer, Ground, Wall};

const ENEMY_DUMMY_HEALTH: f32 = 100.0;
const ENEMY_CONTACT_DAMAGE: f32 = 10.0;

fn solid(size: Vec2, at: Vec2, color: Color) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(at.x, at.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    )
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let hinge_color = Color::srgb(0.8, 0.7, 0.3);
    let enemy_color = Color::srgb(0.8, 0.3, 0.3);

    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]);

    // Floor
    commands.spawn((
        Ground,
        solid(Vec2::new(40.0, 1.0), Vec2::new(0.0, -4.0), ground_color),
        ground_layers,
    ));

    // Side walls, tall enough to cling to
    for x in [-20.0, 20.0] {
        commands.spawn((
            Wall,
            solid(Vec2::new(1.0, 16.0), Vec2::new(x, 3.5), wall_color),
            wall_layers,
        ));
    }

    // Platform - left side
    commands.spawn((
        Ground,
        solid(Vec2::new(4.0, 0.5), Vec2::new(-6.0, 0.0), platform_color),
        ground_layers,
    ));

    // Low ceiling: standing does not fit under it, crouching does
    commands.spawn((
        Ground,
        solid(Vec2::new(4.0, 0.5), Vec2::new(8.0, -2.05), platform_color),
        ground_layers,
    ));

    // Pillar for wall cling practice
    commands.spawn((
        Wall,
        solid(Vec2::new(1.0, 6.0), Vec2::new(14.0, -0.5), wall_color),
        wall_layers,
    ));

    // Swing hinges; only the rope ray sees them
    for at in [Vec2::new(-6.0, 5.0), Vec2::new(0.0, 6.0), Vec2::new(8.0, 4.0)] {
        commands.spawn((
            RopeTarget::Hinge,
            Sprite {
                color: hinge_color,
                custom_size: Some(Vec2::splat(0.6)),
                ..default()
            },
            Transform::from_xyz(at.x, at.y, 0.0),
            RigidBody::Static,
            Collider::circle(0.3),
            CollisionLayers::new(GameLayer::Anchor, LayerMask::NONE),
        ));
    }

    // Enemy dummy: tether target, melee target, hurts on touch
    commands.spawn((
        Enemy,
        RopeTarget::Enemy,
        Health::new(ENEMY_DUMMY_HEALTH),
        ContactDamage(ENEMY_CONTACT_DAMAGE),
        solid(Vec2::new(1.0, 2.0), Vec2::new(-12.0, -2.5), enemy_color),
        CollisionLayers::new(GameLayer::Enemy, [GameLayer::Player, GameLayer::Ground]),
    ));

    info!("Spawned test room");
}

#[cfg(feature = "dev-tools")]
pub(crate) use gizmos::draw_probes;

#[cfg(feature = "dev-tools")]
mod gizmos {
    use avian2d::prelude::*;
    use bevy::prelude::*;

    use crate::combat::MeleeAttack;
    use crate::movement::{CharacterState, MovementConfig};

    const PROBE_IDLE: Color = Color::srgb(0.4, 0.8, 1.0);
    const PROBE_HIT: Color = Color::srgb(1.0, 0.4, 0.3);
    const MELEE_BOX: Color = Color::srgb(1.0, 0.9, 0.2);

    /// Ground, ceiling and wall probes plus the melee box.
    pub(crate) fn draw_probes(
        mut gizmos: Gizmos,
        query: Query<(
            &Position,
            &CharacterState,
            Option<&MovementConfig>,
            Option<&MeleeAttack>,
        )>,
    ) {
        for (position, state, config, melee) in &query {
            if let Some(config) = config {
                let probes = &config.probes;
                let color = |hit: bool| if hit { PROBE_HIT } else { PROBE_IDLE };
                let wall = Vec2::new(
                    probes.wall_offset.x * state.facing.sign(),
                    probes.wall_offset.y,
                );

                gizmos.circle_2d(
                    position.0 + probes.ground_offset,
                    probes.ground_radius,
                    color(state.grounded()),
                );
                gizmos.circle_2d(
                    position.0 + probes.ceiling_offset,
                    probes.ceiling_radius,
                    color(state.is_crouching()),
                );
                gizmos.circle_2d(position.0 + wall, probes.wall_radius, color(state.walled()));
            }

            if let Some(melee) = melee {
                gizmos.rect_2d(
                    melee.attack_point(position.0, state.facing),
                    melee.hitbox_size(),
                    MELEE_BOX,
                );
            }
        }
    }
}

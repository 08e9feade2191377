//! Combat domain: melee, damage, invincibility and death systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    ContactDamage, Enemy, Health, Invincibility, InvincibilityTick, Mana, MeleeAttack,
};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::movement::query::{AvianQueries, PhysicsQueries};
use crate::movement::{CharacterState, CharacterVisual, GameLayer, MovementInput, Player};

pub(crate) fn advance_invincibility(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Invincibility)>,
) {
    let dt = time.delta_secs();
    for (entity, mut invincibility) in &mut query {
        if invincibility.advance(dt) == InvincibilityTick::Ended {
            debug!("Invincibility ended: entity={:?}", entity);
        }
    }
}

/// Hide the sprite child while an invincibility flicker is in its off phase.
pub(crate) fn sync_invincibility_visual(
    owners: Query<&Invincibility, Changed<Invincibility>>,
    mut visuals: Query<(&ChildOf, &mut Visibility), With<CharacterVisual>>,
) {
    for (child_of, mut visibility) in &mut visuals {
        let Ok(invincibility) = owners.get(child_of.parent()) else {
            continue;
        };
        let wanted = if invincibility.visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// Swing at everything health-bearing in the box in front of the player.
pub(crate) fn perform_melee(
    time: Res<Time>,
    input: Res<MovementInput>,
    queries: AvianQueries,
    mut damage_events: MessageWriter<DamageEvent>,
    mut attackers: Query<
        (Entity, &Position, &CharacterState, &mut MeleeAttack, Option<&mut Mana>),
        With<Player>,
    >,
    targets: Query<(), With<Health>>,
) {
    if !input.attack_pressed {
        return;
    }

    let now = time.elapsed_secs();
    for (entity, position, state, mut melee, mut mana) in &mut attackers {
        if !melee.try_attack(now) {
            continue;
        }

        let center = melee.attack_point(position.0, state.facing);
        let hits = queries.box_overlap(center, melee.hitbox_size(), GameLayer::Enemy.into());
        debug!(
            "Melee: entity={:?}, center=({:.2}, {:.2}), hits={}",
            entity,
            center.x,
            center.y,
            hits.len()
        );

        for target in hits {
            if target == entity || !targets.contains(target) {
                continue;
            }
            damage_events.write(DamageEvent {
                source: entity,
                target,
                amount: melee.damage,
            });
            if let Some(mana) = mana.as_mut() {
                mana.add(melee.mana_recovery);
            }
        }
    }
}

/// Hurt the player while it touches a contact-damage entity.
pub(crate) fn apply_contact_damage(
    colliders: Query<(&ColliderOf, &CollidingEntities)>,
    players: Query<(), (With<Player>, With<Health>)>,
    hazards: Query<&ContactDamage>,
    collider_of: Query<&ColliderOf>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    for (owner, colliding) in &colliders {
        if !players.contains(owner.body) {
            continue;
        }
        for &other in colliding.iter() {
            let source = collider_of.get(other).map(|c| c.body).unwrap_or(other);
            if let Ok(ContactDamage(amount)) = hazards.get(source) {
                damage_events.write(DamageEvent {
                    source,
                    target: owner.body,
                    amount: *amount,
                });
            }
        }
    }
}

/// Sole writer of [`Health`].
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<(&mut Health, Option<&mut Invincibility>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, invincibility)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        if invincibility.as_ref().is_some_and(|i| i.is_active()) {
            continue;
        }

        let taken = health.take_damage(event.amount);
        debug!(
            "Damage: target={:?}, source={:?}, amount={:.1}, health={:.1}/{:.1}",
            event.target, event.source, taken, health.current, health.max
        );

        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        } else if let Some(mut invincibility) = invincibility {
            invincibility.start();
            debug!("Invincible: entity={:?}", event.target);
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    query: Query<(Has<Player>, Has<Enemy>)>,
) {
    for event in death_events.read() {
        let Ok((is_player, is_enemy)) = query.get(event.entity) else {
            continue;
        };
        if is_player {
            info!("Game over");
        } else if is_enemy {
            info!("Enemy died: entity={:?}", event.entity);
            commands.entity(event.entity).despawn();
        }
    }
}

//! Combat domain: unit tests for health, mana, invincibility and damage handling.

use bevy::prelude::*;

use super::systems::{apply_damage, process_deaths};
use super::{
    DamageEvent, DeathEvent, Enemy, Health, Invincibility, InvincibilityTick, Mana, MeleeAttack,
};
use crate::movement::{Facing, Player};

fn damage_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<DamageEvent>()
        .add_message::<DeathEvent>()
        .add_systems(Update, (apply_damage, process_deaths).chain());
    app
}

fn hit(app: &mut App, target: Entity, amount: f32) {
    app.world_mut().write_message(DamageEvent {
        source: target,
        target,
        amount,
    });
    app.update();
}

// ---- health & mana ----

#[test]
fn test_health_damage() {
    let mut health = Health::new(100.0);
    assert_eq!(health.take_damage(40.0), 40.0);
    assert_eq!(health.current, 60.0);
    assert!(!health.is_dead());

    // Negative damage is ignored
    assert_eq!(health.take_damage(-10.0), 0.0);
    assert_eq!(health.current, 60.0);

    health.take_damage(120.0);
    assert!(health.is_dead());
    assert_eq!(health.current, -60.0);
}

#[test]
fn test_mana_is_clamped_to_max() {
    let mut mana = Mana::new(100.0);
    assert_eq!(mana.add(20.0), 0.0);

    mana.current = 70.0;
    assert_eq!(mana.add(20.0), 20.0);
    assert_eq!(mana.add(20.0), 10.0);
    assert_eq!(mana.current, 100.0);
    assert_eq!(mana.add(-5.0), 0.0);
}

// ---- invincibility ----

#[test]
fn test_invincibility_flickers_then_restores() {
    let mut invincibility = Invincibility::new(1.5, 0.1);
    assert_eq!(invincibility.advance(0.02), InvincibilityTick::Inactive);

    invincibility.start();
    assert!(invincibility.is_active());
    assert!(!invincibility.visible());

    let mut toggles = 0;
    let mut last = invincibility.visible();
    let mut ended = false;
    for _ in 0..100 {
        match invincibility.advance(0.05) {
            InvincibilityTick::Running { visible } => {
                if visible != last {
                    toggles += 1;
                    last = visible;
                }
            }
            InvincibilityTick::Ended => {
                ended = true;
                break;
            }
            InvincibilityTick::Inactive => panic!("window ended without reporting it"),
        }
    }

    assert!(ended);
    assert!(toggles >= 10);
    assert!(invincibility.visible());
    assert!(!invincibility.is_active());
}

#[test]
fn test_zero_duration_never_starts() {
    let mut invincibility = Invincibility::new(0.0, 0.1);
    invincibility.start();
    assert!(!invincibility.is_active());
    assert!(invincibility.visible());
}

// ---- melee ----

#[test]
fn test_melee_rate_limit() {
    let mut melee = MeleeAttack::new(1.5, 0.5, 0.9, 40.0, 20.0, 2.0);
    assert!(melee.try_attack(0.0));
    assert!(!melee.try_attack(0.2));
    assert!(!melee.try_attack(0.49));
    assert!(melee.try_attack(0.5));
    assert!(!melee.try_attack(0.99));
    assert!(melee.try_attack(1.0));
}

#[test]
fn test_melee_box_sits_in_front() {
    let melee = MeleeAttack::new(1.5, 0.5, 0.5, 40.0, 20.0, 2.0);
    assert_eq!(melee.hitbox_size(), Vec2::new(1.5, 0.5));
    assert_eq!(
        melee.attack_point(Vec2::new(2.0, 2.0), Facing::Right),
        Vec2::new(2.5, 2.0)
    );
    assert_eq!(
        melee.attack_point(Vec2::new(2.0, 2.0), Facing::Left),
        Vec2::new(1.5, 2.0)
    );
}

// ---- damage messages ----

#[test]
fn test_hit_starts_invincibility_window() {
    let mut app = damage_app();
    let player = app
        .world_mut()
        .spawn((Player, Health::new(100.0), Invincibility::new(1.5, 0.1)))
        .id();

    hit(&mut app, player, 30.0);
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(70.0));
    assert!(
        app.world()
            .get::<Invincibility>(player)
            .is_some_and(Invincibility::is_active)
    );

    // Ignored while invincible
    hit(&mut app, player, 30.0);
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(70.0));
}

#[test]
fn test_every_hit_lands_without_invincibility() {
    let mut app = damage_app();
    let target = app.world_mut().spawn(Health::new(100.0)).id();

    hit(&mut app, target, 30.0);
    hit(&mut app, target, 30.0);
    assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(40.0));
}

#[test]
fn test_enemy_despawns_on_death() {
    let mut app = damage_app();
    let enemy = app.world_mut().spawn((Enemy, Health::new(100.0))).id();

    hit(&mut app, enemy, 40.0);
    hit(&mut app, enemy, 40.0);
    assert!(app.world().get_entity(enemy).is_ok());

    hit(&mut app, enemy, 40.0);
    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn test_player_death_keeps_entity() {
    let mut app = damage_app();
    let player = app
        .world_mut()
        .spawn((Player, Health::new(50.0), Invincibility::new(1.5, 0.1)))
        .id();

    hit(&mut app, player, 80.0);
    assert!(app.world().get_entity(player).is_ok());
    assert!(app.world().get::<Health>(player).is_some_and(Health::is_dead));
    // Death does not open an invincibility window
    assert!(
        !app.world()
            .get::<Invincibility>(player)
            .is_some_and(Invincibility::is_active)
    );
}

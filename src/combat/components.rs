//! Combat domain: health, mana, invincibility and melee components.

use bevy::prelude::*;

use crate::movement::Facing;

/// Marker for hostile bodies the melee attack looks for
#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Returns the damage actually taken. Health may go negative; death is `<= 0`.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        self.current -= amount;
        amount
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
}

impl Mana {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Add mana up to the maximum. Returns the amount gained.
    pub fn add(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }
}

/// Result of advancing an [`Invincibility`] window by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvincibilityTick {
    Inactive,
    Running { visible: bool },
    Ended,
}

/// Temporary damage immunity after a hit, with a visibility flicker while it lasts.
///
/// The window is an explicit timer advanced once per fixed tick. Visibility toggles as
/// soon as the window starts and every `flicker_interval` after that; it is restored
/// when the window ends.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Invincibility {
    pub duration: f32,
    pub flicker_interval: f32,
    remaining: f32,
    since_flicker: f32,
    hidden: bool,
}

impl Invincibility {
    pub fn new(duration: f32, flicker_interval: f32) -> Self {
        Self {
            duration,
            flicker_interval,
            remaining: 0.0,
            since_flicker: 0.0,
            hidden: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Whether the owner's sprite should currently be drawn.
    pub fn visible(&self) -> bool {
        !self.hidden
    }

    pub fn start(&mut self) {
        if self.duration <= 0.0 {
            return;
        }
        self.remaining = self.duration;
        self.since_flicker = 0.0;
        self.hidden = self.flicker_interval > 0.0;
    }

    pub fn advance(&mut self, dt: f32) -> InvincibilityTick {
        if !self.is_active() {
            return InvincibilityTick::Inactive;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.since_flicker = 0.0;
            self.hidden = false;
            return InvincibilityTick::Ended;
        }

        if self.flicker_interval > 0.0 {
            self.since_flicker += dt;
            while self.since_flicker >= self.flicker_interval {
                self.since_flicker -= self.flicker_interval;
                self.hidden = !self.hidden;
            }
        }

        InvincibilityTick::Running {
            visible: self.visible(),
        }
    }
}

/// Facing-relative box attack, rate limited.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MeleeAttack {
    /// Box length along the facing direction
    pub range: f32,
    /// Box height
    pub width: f32,
    /// Distance from the body center to the box center, along the facing direction
    pub reach: f32,
    pub damage: f32,
    /// Mana restored to the attacker per enemy hit
    pub mana_recovery: f32,
    /// Attacks per second
    pub rate: f32,
    next_attack_at: f32,
}

impl MeleeAttack {
    pub fn new(
        range: f32,
        width: f32,
        reach: f32,
        damage: f32,
        mana_recovery: f32,
        rate: f32,
    ) -> Self {
        Self {
            range,
            width,
            reach,
            damage,
            mana_recovery,
            rate,
            next_attack_at: 0.0,
        }
    }

    pub fn hitbox_size(&self) -> Vec2 {
        Vec2::new(self.range, self.width)
    }

    pub fn attack_point(&self, position: Vec2, facing: Facing) -> Vec2 {
        position + Vec2::new(self.reach * facing.sign(), 0.0)
    }

    /// Consume an attack if the cooldown has elapsed.
    pub fn try_attack(&mut self, now: f32) -> bool {
        if now < self.next_attack_at {
            return false;
        }
        let interval = if self.rate > 0.0 { 1.0 / self.rate } else { 0.0 };
        self.next_attack_at = now + interval;
        true
    }
}

/// Damage dealt every tick to a player body touching this entity
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactDamage(pub f32);

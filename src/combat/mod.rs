//! Combat domain: melee attacks, health, mana and post-hit invincibility.

use bevy::prelude::*;

use crate::movement::TickSet;

mod components;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    ContactDamage, Enemy, Health, Invincibility, InvincibilityTick, Mana, MeleeAttack,
};
pub use events::{DamageEvent, DeathEvent};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::advance_invincibility.in_set(TickSet::Continuations),
                    (
                        systems::perform_melee,
                        systems::apply_contact_damage,
                        systems::apply_damage,
                        systems::process_deaths,
                    )
                        .chain()
                        .in_set(TickSet::Drive)
                        .after(crate::movement::systems::drive_locomotion),
                ),
            )
            .add_systems(Update, systems::sync_invincibility_visual);
    }
}

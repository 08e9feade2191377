//! Movement domain: ground and wall contact refresh.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::controller::Locomotion;
use crate::movement::query::AvianQueries;
use crate::movement::{
    CharacterState, LandedEvent, MovementConfig, Player, WallClingStartedEvent,
};

pub(crate) fn refresh_contacts(
    queries: AvianQueries,
    mut landed_events: MessageWriter<LandedEvent>,
    mut wall_events: MessageWriter<WallClingStartedEvent>,
    mut query: Query<
        (
            Entity,
            &Position,
            &LinearVelocity,
            &MovementConfig,
            &mut CharacterState,
        ),
        With<Player>,
    >,
) {
    for (entity, position, velocity, config, mut state) in &mut query {
        let locomotion = Locomotion::new(config, &queries, entity);
        let edges = locomotion.refresh_contacts(&mut state, position.0, velocity.0);

        if edges.landed {
            debug!("Landed: entity={:?}, mode={:?}", entity, state.vertical_mode());
            landed_events.write(LandedEvent { entity });
        } else if edges.left_ground {
            debug!("Left ground: entity={:?}, mode={:?}", entity, state.vertical_mode());
        }

        if edges.wall_contact_started {
            debug!(
                "Wall contact: entity={:?}, facing={:?}, mode={:?}",
                entity,
                state.facing,
                state.vertical_mode()
            );
            wall_events.write(WallClingStartedEvent { entity });
        }
    }
}

//! Movement domain: locomotion notifications, fired once per edge.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A character touched ground after being airborne
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}

/// A character's wall probe found a wall it was not touching last tick
#[derive(Debug)]
pub struct WallClingStartedEvent {
    pub entity: Entity,
}

impl Message for WallClingStartedEvent {}

#[derive(Debug)]
pub struct CrouchChangedEvent {
    pub entity: Entity,
    pub crouching: bool,
}

impl Message for CrouchChangedEvent {}

//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod visuals;

pub(crate) use collisions::refresh_contacts;
pub(crate) use input::{clear_input_edges, read_input};
pub(crate) use movement::{body_mass, drive_locomotion, resume_dash};
pub(crate) use visuals::{sync_crouch_collider, sync_facing_visual};

//! Core domain: camera setup.

use bevy::prelude::*;

/// World units per screen pixel; one unit is roughly one 32px tile
pub const CAMERA_SCALE: f32 = 1.0 / 32.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

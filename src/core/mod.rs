//! Core domain: selection of the played character and the camera.

use bevy::prelude::*;

mod resources;
mod systems;


pub use resources::SelectedCharacter;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let selected = SelectedCharacter::from_args(std::env::args());
        if let Some(id) = &selected.character_id {
            info!("Character selected on the command line: {}", id);
        }
        app.insert_resource(selected)
            .add_systems(Startup, systems::setup_camera);
    }
}

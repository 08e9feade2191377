//! Content domain: data-driven character definitions loaded from RON.

use bevy::prelude::*;
use std::path::Path;

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{CharacterDef, DataFile, HealthDef, InvincibilityDef, ManaDef, MeleeDef};
pub use loader::{
    CHARACTERS_FILE, ContentLoadError, build_registry, load_characters, parse_data_file,
};
pub use registry::CharacterRegistry;
pub use validation::{ValidationError, validate_characters};

/// Directory holding the RON data files
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Load character content into a registry. Failures are logged and leave an empty
/// registry, so spawning falls back to built-in defaults.
fn load_content(mut commands: Commands) {
    let registry = match load_characters(Path::new(DATA_DIR)) {
        Ok(registry) if registry.is_empty() => {
            warn!("No characters defined in {}, falling back to defaults", CHARACTERS_FILE);
            registry
        }
        Ok(registry) => {
            info!(
                "Loaded {} character(s): {}",
                registry.len(),
                registry.ids().collect::<Vec<_>>().join(", ")
            );
            registry
        }
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!("Character content unavailable, falling back to defaults");
            CharacterRegistry::default()
        }
    };
    commands.insert_resource(registry);
}

//! Core domain: app-wide resources.

use bevy::prelude::*;

/// Resource tracking the currently selected character
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectedCharacter {
    pub character_id: Option<String>,
}

impl SelectedCharacter {
    /// Selection from the first command-line argument, if any.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        Self {
            character_id: args.nth(1).filter(|id| !id.trim().is_empty()),
        }
    }
}

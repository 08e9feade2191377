//! CharacterRegistry resource providing lookups for loaded character content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::CharacterDef;

/// Loaded character definitions, keyed by id, remembering file order.
#[derive(Resource, Debug, Default)]
pub struct CharacterRegistry {
    characters: HashMap<String, CharacterDef>,
    order: Vec<String>,
}

impl CharacterRegistry {
    /// Insert a definition. Returns the replaced one if the id was already present.
    pub fn insert(&mut self, def: CharacterDef) -> Option<CharacterDef> {
        let id = def.id.clone();
        let previous = self.characters.insert(id.clone(), def);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    /// First definition in file order.
    pub fn first(&self) -> Option<&CharacterDef> {
        self.order.first().and_then(|id| self.characters.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Definition to spawn for `selected`: the named one, else the first loaded one, else
    /// the built-in fallback.
    pub fn resolve(&self, selected: Option<&str>) -> CharacterDef {
        if let Some(id) = selected {
            if let Some(def) = self.get(id) {
                return def.clone();
            }
            warn!("Unknown character '{}', using the first available", id);
        }

        match self.first() {
            Some(def) => def.clone(),
            None => {
                warn!("No characters loaded, using built-in defaults");
                CharacterDef::fallback()
            }
        }
    }
}

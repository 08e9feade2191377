//! Data definitions for RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The CharacterRegistry provides lookup by id.

use serde::{Deserialize, Serialize};

use crate::movement::MovementConfig;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    /// Sprite tint, linear RGB
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub health: HealthDef,
    #[serde(default)]
    pub mana: ManaDef,
    #[serde(default)]
    pub melee: MeleeDef,
}

fn default_color() -> (f32, f32, f32) {
    (0.9, 0.9, 0.9)
}

impl CharacterDef {
    /// Built-in character used when no content could be loaded.
    pub fn fallback() -> Self {
        Self {
            id: "character_default".to_string(),
            name: "Default".to_string(),
            color: default_color(),
            movement: MovementConfig::default(),
            health: HealthDef::default(),
            mana: ManaDef::default(),
            melee: MeleeDef::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthDef {
    pub max_health: f32,
    /// Post-hit immunity window; `None` means every hit lands
    pub invincibility: Option<InvincibilityDef>,
}

impl Default for HealthDef {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            invincibility: Some(InvincibilityDef::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InvincibilityDef {
    pub duration: f32,
    pub flicker_interval: f32,
}

impl Default for InvincibilityDef {
    fn default() -> Self {
        Self {
            duration: 1.5,
            flicker_interval: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManaDef {
    pub max_mana: f32,
}

impl Default for ManaDef {
    fn default() -> Self {
        Self { max_mana: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeleeDef {
    pub range: f32,
    pub width: f32,
    /// Distance from the body center to the hitbox center
    pub reach: f32,
    pub damage: f32,
    pub mana_recovery: f32,
    /// Attacks per second
    pub rate: f32,
}

impl Default for MeleeDef {
    fn default() -> Self {
        Self {
            range: 1.5,
            width: 0.5,
            reach: 0.9,
            damage: 40.0,
            mana_recovery: 20.0,
            rate: 2.0,
        }
    }
}

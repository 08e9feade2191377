//! Validation for loaded character definitions.

use super::data::CharacterDef;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub character_id: String,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Character '{}' has invalid '{}': {}",
            self.character_id, self.field, self.message
        )
    }
}

/// Validate every definition.
/// Returns a list of validation errors, empty if all definitions are valid.
pub fn validate_characters(characters: &[CharacterDef]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, def) in characters.iter().enumerate() {
        let mut push = |field: &str, message: String| {
            errors.push(ValidationError {
                character_id: def.id.clone(),
                field: field.to_string(),
                message,
            });
        };

        if def.id.trim().is_empty() {
            push("id", "must not be empty".to_string());
        }
        if characters[..index].iter().any(|other| other.id == def.id) {
            push("id", "duplicate id".to_string());
        }

        if let Err(e) = def.movement.validate() {
            push(&format!("movement.{}", e.field), e.message);
        }

        if def.health.max_health.is_nan() || def.health.max_health <= 0.0 {
            push(
                "health.max_health",
                format!("expected a value > 0, got {}", def.health.max_health),
            );
        }
        if let Some(invincibility) = &def.health.invincibility {
            if invincibility.duration < 0.0 || invincibility.flicker_interval < 0.0 {
                push(
                    "health.invincibility",
                    "duration and flicker_interval must be >= 0".to_string(),
                );
            }
        }
        if def.mana.max_mana < 0.0 {
            push(
                "mana.max_mana",
                format!("expected a value >= 0, got {}", def.mana.max_mana),
            );
        }
        if def.melee.rate.is_nan() || def.melee.rate <= 0.0 {
            push(
                "melee.rate",
                format!("expected a value > 0, got {}", def.melee.rate),
            );
        }
        if def.melee.range <= 0.0 || def.melee.width <= 0.0 {
            push("melee", "range and width must be > 0".to_string());
        }
    }

    errors
}

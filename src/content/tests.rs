//! Content domain: unit tests for character data parsing, validation and lookup.

use super::{
    CharacterDef, CharacterRegistry, InvincibilityDef, build_registry, parse_data_file,
    validate_characters,
};
use crate::movement::MovementConfig;

const SHIPPED_CHARACTERS: &str = include_str!("../../assets/data/characters.ron");

fn parse(contents: &str) -> Vec<CharacterDef> {
    parse_data_file::<CharacterDef>("inline.ron", contents).expect("inline RON parses")
}

#[test]
fn test_shipped_characters_load() {
    let characters = parse(SHIPPED_CHARACTERS);
    let registry = build_registry("characters.ron", characters).expect("shipped data is valid");

    assert_eq!(registry.len(), 2);
    let roper = registry.get("character_roper").expect("roper exists");
    assert!(roper.movement.capabilities.swing);
    assert!(roper.movement.capabilities.tether);
    assert_eq!(roper.movement, MovementConfig::default());

    let basic = registry.get("character_basic").expect("basic exists");
    assert!(!basic.movement.capabilities.any_rope());
    assert_eq!(basic.movement.jump_force, 5.0);
    assert!(basic.health.invincibility.is_none());
}

#[test]
fn test_missing_sections_use_defaults() {
    let characters = parse(
        r#"(
            schema_version: 1,
            items: [
                (id: "minimal", name: "Minimal"),
            ],
        )"#,
    );

    let def = &characters[0];
    assert_eq!(def.movement, MovementConfig::default());
    assert_eq!(def.health.max_health, 100.0);
    assert_eq!(def.melee.damage, 40.0);
    assert_eq!(def.melee.rate, 2.0);
}

#[test]
fn test_implicit_some_for_invincibility() {
    let characters = parse(
        r#"(
            schema_version: 1,
            items: [
                (
                    id: "tank",
                    name: "Tank",
                    health: (
                        max_health: 250.0,
                        invincibility: (duration: 2.0, flicker_interval: 0.25),
                    ),
                    movement: (dash_speed: 30.0, probes: (ground_radius: 0.3)),
                ),
            ],
        )"#,
    );

    let def = &characters[0];
    assert_eq!(
        def.health.invincibility,
        Some(InvincibilityDef {
            duration: 2.0,
            flicker_interval: 0.25,
        })
    );
    assert_eq!(def.movement.dash_speed, 30.0);
    assert_eq!(def.movement.probes.ground_radius, 0.3);
    // Untouched probe fields keep their defaults
    assert_eq!(def.movement.probes.wall_radius, 0.2);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_data_file::<CharacterDef>("broken.ron", "(schema_version: 1, items: [")
        .unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_validation_reports_bad_tuning_and_duplicates() {
    let mut bad = CharacterDef::fallback();
    bad.movement.dash_rate = 0.0;
    bad.melee.rate = -1.0;
    let duplicate = CharacterDef::fallback();

    let errors = validate_characters(&[bad, duplicate]);
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

    assert!(fields.contains(&"movement.dash_rate"));
    assert!(fields.contains(&"melee.rate"));
    assert!(fields.contains(&"id"));
    assert!(
        errors
            .iter()
            .all(|e| e.to_string().contains("character_default"))
    );
}

#[test]
fn test_invalid_file_yields_no_registry() {
    let mut bad = CharacterDef::fallback();
    bad.movement.crouch_speed = 2.0;

    let errors = build_registry("characters.ron", vec![bad]).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file, "characters.ron");
    assert!(errors[0].message.contains("crouch_speed"));
}

#[test]
fn test_registry_resolution_falls_back() {
    let mut registry = CharacterRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.resolve(None).id, "character_default");

    let mut first = CharacterDef::fallback();
    first.id = "first".to_string();
    let mut second = CharacterDef::fallback();
    second.id = "second".to_string();
    registry.insert(first);
    registry.insert(second);

    assert_eq!(registry.resolve(Some("second")).id, "second");
    assert_eq!(registry.resolve(Some("unknown")).id, "first");
    assert_eq!(registry.resolve(None).id, "first");
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["first", "second"]);
}

//! Movement domain: input sampling for locomotion, rope and combat.

use bevy::prelude::*;

use crate::movement::MovementInput;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<MovementInput>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (dash aim, rope aim, rope climbing)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.crouch_held =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::KeyC);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);

    // Edges stay latched until a fixed tick consumes them
    input.jump_pressed |=
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_released |=
        keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK);
    input.dash_pressed |=
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
    input.attack_pressed |=
        keyboard.just_pressed(KeyCode::KeyL) || mouse.just_pressed(MouseButton::Left);
    input.rope_fire_pressed |=
        keyboard.just_pressed(KeyCode::KeyE) || mouse.just_pressed(MouseButton::Right);
    input.rope_fire_released |=
        keyboard.just_released(KeyCode::KeyE) || mouse.just_released(MouseButton::Right);
}

pub(crate) fn clear_input_edges(mut input: ResMut<MovementInput>) {
    input.clear_edges();
}

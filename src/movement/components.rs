//! Movement domain: components, physics layers and the character state record.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::dash::DashTask;
use crate::movement::smoothing::SmoothDamp;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, ceilings)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Rope hinges
    Anchor,
}

impl GameLayer {
    /// Everything a rope can hit: all layers except the player's own.
    pub fn rope_mask() -> LayerMask {
        LayerMask::from([
            GameLayer::Default,
            GameLayer::Ground,
            GameLayer::Wall,
            GameLayer::Enemy,
            GameLayer::Anchor,
        ])
    }
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Child collider that is switched off while the character crouches
#[derive(Component, Debug)]
pub struct CrouchCollider;

/// Child entity carrying the character's sprite; mirrored on facing flips
#[derive(Component, Debug)]
pub struct CharacterVisual;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Whether a non-zero horizontal input points the other way.
    pub fn disagrees_with(self, horizontal: f32) -> bool {
        (horizontal > 0.0 && self == Facing::Left) || (horizontal < 0.0 && self == Facing::Right)
    }

    /// Whether a non-zero horizontal input points the same way.
    pub fn agrees_with(self, horizontal: f32) -> bool {
        (horizontal > 0.0 && self == Facing::Right) || (horizontal < 0.0 && self == Facing::Left)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Posture {
    #[default]
    Standing,
    Crouched,
}

/// Jump phase. `held_for` is the time the jump force has been sustained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JumpPhase {
    #[default]
    Idle,
    Rising { held_for: f32 },
}

impl JumpPhase {
    pub fn is_rising(&self) -> bool {
        matches!(self, JumpPhase::Rising { .. })
    }
}

/// External constraint the rope puts on the character.
///
/// Swinging and tethered are exclusive; the hook only exists while attached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RopeMode {
    #[default]
    Free,
    Swinging { hook: Vec2 },
    Tethered { hook: Vec2 },
}

impl RopeMode {
    pub fn is_free(&self) -> bool {
        matches!(self, RopeMode::Free)
    }
}

/// Probe results from the latest contact refresh. Both can hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub grounded: bool,
    pub walled: bool,
}

/// Summary of the vertical situation, derived from contacts, jump and rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMode {
    Grounded,
    Airborne,
    WallCling,
    Swinging,
    Tethered,
}

/// Mutable per-character locomotion state.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterState {
    pub facing: Facing,
    pub contacts: Contacts,
    pub posture: Posture,
    pub jump: JumpPhase,
    pub can_jump: bool,
    pub can_dash: bool,
    /// Time spent pressing into a wall while airborne
    pub cling_timer: f32,
    pub rope: RopeMode,
    pub dash: DashTask,
    pub smoothing: SmoothDamp,
    /// Whether the crouch collider should currently be enabled
    pub crouch_collider_enabled: bool,
}

impl CharacterState {
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            crouch_collider_enabled: true,
            ..default()
        }
    }

    pub fn grounded(&self) -> bool {
        self.contacts.grounded
    }

    pub fn walled(&self) -> bool {
        self.contacts.walled
    }

    pub fn is_crouching(&self) -> bool {
        self.posture == Posture::Crouched
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_active()
    }

    pub fn vertical_mode(&self) -> VerticalMode {
        match self.rope {
            RopeMode::Swinging { .. } => VerticalMode::Swinging,
            RopeMode::Tethered { .. } => VerticalMode::Tethered,
            RopeMode::Free if self.contacts.grounded => VerticalMode::Grounded,
            RopeMode::Free if self.contacts.walled => VerticalMode::WallCling,
            RopeMode::Free => VerticalMode::Airborne,
        }
    }

    /// Switch posture. Returns the new crouch flag only when it changed.
    pub fn set_posture(&mut self, posture: Posture) -> Option<bool> {
        if self.posture == posture {
            return None;
        }
        self.posture = posture;
        Some(posture == Posture::Crouched)
    }
}

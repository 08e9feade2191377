//! Rope domain: attachment state, length control and the swing/tether force laws.

use bevy::prelude::*;

use crate::movement::controller::BodyFrame;
use crate::movement::query::{AnchorKind, PhysicsQueries};
use crate::movement::{CharacterState, Facing, GameLayer, MovementConfig, RopeMode};

/// Tether releases once the character is this close to the hook
pub const TETHER_RELEASE_DISTANCE: f32 = 1.5;
/// Upward impulse applied when latching onto a hinge, to break ground friction
pub const SWING_ATTACH_IMPULSE: f32 = 10.0;

/// Which way the rope is holding the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopeKind {
    /// Distance-constrained to a hinge
    Swing,
    /// Dragged toward a target, no distance constraint
    Tether,
}

/// Result of a fire-rope press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachOutcome {
    /// Already attached; the press does nothing
    AlreadyAttached,
    /// Nothing within reach
    Missed,
    /// Hit something the rope cannot hold
    Ignored(Entity),
    Swinging { anchor: Vec2, distance: f32 },
    Tethered { anchor: Vec2 },
}

/// Rope held by one character.
///
/// `anchors` is empty exactly when `kind` is `None`. The anchor adjacent to the character
/// (the one the constraint measures from) is the last one.
#[derive(Component, Debug, Clone)]
pub struct RopeState {
    kind: Option<RopeKind>,
    anchors: Vec<Vec2>,
    distance: f32,
    constraint_enabled: bool,
    distance_set: bool,
    max_length: f32,
    visible: bool,
    /// Set while the character is pressed against something; blocks climbing
    pub blocked: bool,
}

impl RopeState {
    pub fn new(max_length: f32) -> Self {
        Self {
            kind: None,
            anchors: Vec::new(),
            distance: 0.0,
            constraint_enabled: false,
            distance_set: false,
            max_length,
            visible: false,
            blocked: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<RopeKind> {
        self.kind
    }

    /// Anchor the character hangs from.
    pub fn active_anchor(&self) -> Option<Vec2> {
        self.anchors.last().copied()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Set the constraint distance, clamped to `[0, max_length]`.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(0.0, self.max_length);
    }

    /// Fire the rope from the character's position along the aim direction and attach to
    /// whatever it classifies as holdable.
    pub fn try_attach<Q: PhysicsQueries>(
        &mut self,
        character: &mut CharacterState,
        config: &MovementConfig,
        frame: &mut BodyFrame,
        vertical: f32,
        queries: &Q,
    ) -> AttachOutcome {
        if self.is_attached() {
            return AttachOutcome::AlreadyAttached;
        }

        self.visible = true;
        let direction = aim_direction(character.facing, vertical);
        let Some(hit) = queries.ray_cast(
            frame.position,
            direction,
            self.max_length,
            GameLayer::rope_mask(),
        ) else {
            self.detach(character);
            return AttachOutcome::Missed;
        };

        match hit.kind {
            AnchorKind::Tether if config.capabilities.tether => {
                self.kind = Some(RopeKind::Tether);
                self.anchors.push(hit.point);
                character.rope = RopeMode::Tethered { hook: hit.point };
                AttachOutcome::Tethered { anchor: hit.point }
            }
            AnchorKind::Swing if config.capabilities.swing => {
                frame.add_impulse(Vec2::Y * SWING_ATTACH_IMPULSE);
                self.kind = Some(RopeKind::Swing);
                self.anchors.push(hit.point);
                self.set_distance(frame.position.distance(hit.point));
                self.distance_set = true;
                self.constraint_enabled = true;
                character.rope = RopeMode::Swinging { hook: hit.point };
                AttachOutcome::Swinging {
                    anchor: hit.point,
                    distance: self.distance,
                }
            }
            _ => {
                self.visible = false;
                AttachOutcome::Ignored(hit.entity)
            }
        }
    }

    /// Fully release the rope. Safe to call in any state.
    pub fn detach(&mut self, character: &mut CharacterState) {
        self.kind = None;
        self.anchors.clear();
        self.constraint_enabled = false;
        self.distance_set = false;
        self.visible = false;
        character.rope = RopeMode::Free;
    }

    /// Reel the swing rope in (positive `climb`) or out (negative), then clamp.
    pub fn adjust_length(&mut self, climb: f32, climb_speed: f32, dt: f32) {
        if self.kind == Some(RopeKind::Swing) && !self.blocked {
            if climb >= 1.0 {
                self.distance -= dt * climb_speed;
            } else if climb < 0.0 {
                self.distance += dt * climb_speed;
            }
        }
        self.set_distance(self.distance);
    }

    /// Latch the constraint distance to the active anchor if it has not been set since
    /// attaching. Returns the active anchor.
    pub fn update_anchor(&mut self, position: Vec2) -> Option<Vec2> {
        let anchor = self.active_anchor()?;
        if !self.distance_set {
            self.set_distance(position.distance(anchor));
            self.distance_set = true;
        }
        Some(anchor)
    }

    /// Polyline to render: every anchor in order, then the character.
    pub fn path(&self, position: Vec2) -> Vec<Vec2> {
        let mut points = vec![position; self.anchors.len() + 1];
        for (i, anchor) in self.anchors.iter().enumerate().rev() {
            points[i] = *anchor;
        }
        points
    }

    /// Hook and maximum length the swing joint should hold the character to, while the
    /// distance constraint is enabled. The rope may go slack but never stretches.
    pub fn joint_limit(&self) -> Option<(Vec2, f32)> {
        if !self.constraint_enabled {
            return None;
        }
        self.active_anchor().map(|anchor| (anchor, self.distance))
    }
}

/// 8-way rope aim: level, up or down, on the facing side.
pub fn aim_direction(facing: Facing, vertical: f32) -> Dir2 {
    let y = if vertical > 0.0 {
        1.0
    } else if vertical < 0.0 {
        -1.0
    } else {
        0.0
    };
    Dir2::new(Vec2::new(facing.sign(), y)).unwrap_or(Dir2::X)
}

/// Tangential force that pumps a swing. Zero without horizontal input.
pub fn swing_force(position: Vec2, hook: Vec2, horizontal: f32, strength: f32) -> Vec2 {
    if horizontal == 0.0 {
        return Vec2::ZERO;
    }
    let to_hook = (hook - position).normalize_or_zero();
    let perpendicular = if horizontal < 0.0 {
        Vec2::new(-to_hook.y, to_hook.x)
    } else {
        Vec2::new(to_hook.y, -to_hook.x)
    };
    perpendicular * strength
}

/// Impulse dragging a tethered character toward the hook, or `None` once it is within
/// [`TETHER_RELEASE_DISTANCE`].
pub fn pull_impulse(position: Vec2, hook: Vec2, strength: f32) -> Option<Vec2> {
    if position.distance(hook) > TETHER_RELEASE_DISTANCE {
        Some((hook - position).normalize_or_zero() * strength)
    } else {
        None
    }
}

//! Movement domain: the locomotion controller.
//!
//! Each fixed tick runs, in order:
//! 1. [`resume_dash`] (expire a finished dash before anything reads `can_dash`)
//! 2. [`Locomotion::refresh_contacts`] (ground and wall probes)
//! 3. [`Locomotion::step`] (crouch, horizontal control, jump, cling, swing, tether, dash)
//!
//! Everything here is engine-agnostic: the world is reached through [`PhysicsQueries`] and
//! the body through a [`BodyFrame`] the caller writes back.

use bevy::prelude::*;

use crate::movement::query::PhysicsQueries;
use crate::movement::{
    CharacterState, GameLayer, JumpPhase, MovementConfig, MovementInput, Posture, RopeMode,
};
use crate::rope;

/// Horizontal input is scaled by this to get a target speed in units per second
pub const MOVE_SCALE: f32 = 10.0;

/// Kinematic snapshot of the body for one tick, plus the force and impulse to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyFrame {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Continuous force, integrated over the tick
    pub force: Vec2,
    /// Instantaneous momentum change
    pub impulse: Vec2,
}

impl BodyFrame {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            ..default()
        }
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
    }

    /// Final velocity once the accumulated force and impulse are applied to a body of
    /// `mass`. A non-positive mass treats the body as unit mass.
    pub fn resolve(&self, mass: f32, dt: f32) -> Vec2 {
        let mass = if mass > 0.0 && mass.is_finite() {
            mass
        } else {
            1.0
        };
        self.velocity + self.impulse / mass + self.force / mass * dt
    }
}

/// Simulation clock for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    /// Elapsed simulation time at the start of the tick
    pub now: f32,
    pub dt: f32,
}

/// Contact transitions seen by a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactEdges {
    pub landed: bool,
    pub left_ground: bool,
    pub wall_contact_started: bool,
}

/// What happened during [`Locomotion::step`] that the caller must act on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// New crouch flag, set only on the tick it changed
    pub crouch_changed: Option<bool>,
    pub facing_flipped: bool,
    pub jump_started: bool,
    pub jump_ended: bool,
    pub cling_released: bool,
    /// A dash was pressed while swinging; the rope must detach
    pub detach_rope: bool,
    pub tether_consumed: bool,
    pub dash_started: Option<Vec2>,
}

/// Expire a dash whose duration has elapsed: zero the velocity and consume the dash until
/// the next ground or wall contact re-arms it.
pub fn resume_dash(state: &mut CharacterState, frame: &mut BodyFrame, now: f32) -> bool {
    if !state.dash.resume(now) {
        return false;
    }
    frame.velocity = Vec2::ZERO;
    state.smoothing.reset();
    state.can_dash = false;
    debug!("Dash finished");
    true
}

/// The controller for one character: tuning, the world it queries, and its own body.
pub struct Locomotion<'a, Q: PhysicsQueries> {
    pub config: &'a MovementConfig,
    pub queries: &'a Q,
    /// The character's rigid body, excluded from its own probes
    pub body: Entity,
}

impl<'a, Q: PhysicsQueries> Locomotion<'a, Q> {
    pub fn new(config: &'a MovementConfig, queries: &'a Q, body: Entity) -> Self {
        Self {
            config,
            queries,
            body,
        }
    }

    fn ground_probe(&self, position: Vec2) -> Vec2 {
        position + self.config.probes.ground_offset
    }

    fn ceiling_probe(&self, position: Vec2) -> Vec2 {
        position + self.config.probes.ceiling_offset
    }

    fn wall_probe(&self, state: &CharacterState, position: Vec2) -> Vec2 {
        let offset = self.config.probes.wall_offset;
        position + Vec2::new(offset.x * state.facing.sign(), offset.y)
    }

    /// Re-run the ground and wall probes. Either contact re-arms jump and dash.
    ///
    /// A jump that is still rising never counts as grounded, so the probe grazing the floor
    /// on the ticks right after take-off does not land the character again.
    pub fn refresh_contacts(
        &self,
        state: &mut CharacterState,
        position: Vec2,
        velocity: Vec2,
    ) -> ContactEdges {
        let probes = &self.config.probes;
        let was_grounded = state.contacts.grounded;
        let was_walled = state.contacts.walled;
        let taking_off = state.jump.is_rising() && velocity.y > 0.0;

        state.contacts.grounded = !taking_off
            && !self
                .queries
                .circle_overlap(
                    self.ground_probe(position),
                    probes.ground_radius,
                    GameLayer::Ground.into(),
                    self.body,
                )
                .is_empty();

        state.contacts.walled = !self
            .queries
            .circle_overlap(
                self.wall_probe(state, position),
                probes.wall_radius,
                GameLayer::Wall.into(),
                self.body,
            )
            .is_empty();

        if state.contacts.grounded || state.contacts.walled {
            state.can_jump = true;
            state.can_dash = true;
        }

        ContactEdges {
            landed: state.contacts.grounded && !was_grounded,
            left_ground: !state.contacts.grounded && was_grounded,
            wall_contact_started: state.contacts.walled && !was_walled,
        }
    }

    /// Whether something solid sits where the head would be when standing.
    pub fn ceiling_blocked(&self, position: Vec2) -> bool {
        !self
            .queries
            .circle_overlap(
                self.ceiling_probe(position),
                self.config.probes.ceiling_radius,
                GameLayer::Ground.into(),
                self.body,
            )
            .is_empty()
    }

    /// Horizontal control applies on the ground (or always with air control), never while
    /// the rope is holding the character.
    pub fn has_horizontal_control(&self, state: &CharacterState) -> bool {
        (state.contacts.grounded || self.config.air_control) && state.rope.is_free()
    }

    /// Advance the character by one tick of input.
    pub fn step(
        &self,
        state: &mut CharacterState,
        frame: &mut BodyFrame,
        input: &MovementInput,
        clock: TickClock,
    ) -> StepReport {
        let config = self.config;
        let mut report = StepReport::default();
        let horizontal = input.horizontal();

        let crouch = input.crouch_held || self.ceiling_blocked(frame.position);
        let posture = if crouch {
            Posture::Crouched
        } else {
            Posture::Standing
        };
        report.crouch_changed = state.set_posture(posture);

        if self.has_horizontal_control(state) {
            let mut movement = horizontal;
            if state.is_crouching() {
                movement *= config.crouch_speed;
                state.crouch_collider_enabled = false;
            } else {
                state.crouch_collider_enabled = true;
            }

            if !state.is_dashing() {
                let target = Vec2::new(movement * MOVE_SCALE, frame.velocity.y);
                frame.velocity = state.smoothing.step(
                    frame.velocity,
                    target,
                    config.movement_smoothing,
                    clock.dt,
                );
            }

            if state.facing.disagrees_with(horizontal) {
                state.facing = state.facing.flipped();
                report.facing_flipped = true;
            }
        }

        self.jump(state, frame, input, clock.dt, &mut report);
        self.cling(state, frame, horizontal, clock.dt, &mut report);

        match state.rope {
            RopeMode::Swinging { hook } => {
                state.can_dash = true;
                frame.add_force(rope::swing_force(
                    frame.position,
                    hook,
                    horizontal,
                    config.swing_force,
                ));
                if input.dash_pressed {
                    report.detach_rope = true;
                }
            }
            RopeMode::Tethered { hook } => {
                match rope::pull_impulse(frame.position, hook, config.pull_force) {
                    Some(impulse) => frame.add_impulse(impulse),
                    None => {
                        state.rope = RopeMode::Free;
                        frame.velocity = Vec2::ZERO;
                        state.smoothing.reset();
                        report.tether_consumed = true;
                        debug!("Tether consumed at {:?}", hook);
                    }
                }
            }
            RopeMode::Free => {}
        }

        if input.dash_pressed && state.can_dash {
            let facing = state.facing;
            if let Some(velocity) = state
                .dash
                .try_start(facing, input.vertical(), config, clock.now)
            {
                report.dash_started = Some(velocity);
                debug!(
                    "Dash: velocity=({:.1}, {:.1}), next allowed at {:.2}",
                    velocity.x,
                    velocity.y,
                    state.dash.next_allowed()
                );
            }
        }

        if let Some(velocity) = state.dash.override_velocity() {
            frame.velocity = velocity;
        }

        report
    }

    fn jump(
        &self,
        state: &mut CharacterState,
        frame: &mut BodyFrame,
        input: &MovementInput,
        dt: f32,
        report: &mut StepReport,
    ) {
        let config = self.config;

        if (state.contacts.walled || state.contacts.grounded) && state.can_jump && input.jump_pressed
        {
            state.can_jump = false;
            state.contacts.grounded = false;
            state.jump = JumpPhase::Rising { held_for: 0.0 };
            state.cling_timer = 0.0;
            frame.velocity.y = config.jump_force;
            report.jump_started = true;
            debug!("Jump: walled={}", state.contacts.walled);
        }

        if input.jump_held {
            if let JumpPhase::Rising { held_for } = state.jump {
                if held_for + dt <= config.max_jump_time {
                    frame.velocity.y = config.jump_force;
                    state.jump = JumpPhase::Rising {
                        held_for: held_for + dt,
                    };
                } else {
                    state.jump = JumpPhase::Idle;
                    report.jump_ended = true;
                    debug!("Jump ended: hold cap reached after {:.3}s", held_for);
                }
            }
        }

        if input.jump_released && state.jump.is_rising() {
            state.jump = JumpPhase::Idle;
            report.jump_ended = true;
            debug!("Jump ended: released");
        }
    }

    fn cling(
        &self,
        state: &mut CharacterState,
        frame: &mut BodyFrame,
        horizontal: f32,
        dt: f32,
        report: &mut StepReport,
    ) {
        if !state.contacts.walled || state.contacts.grounded {
            state.cling_timer = 0.0;
            return;
        }

        state.can_jump = true;

        if state.facing.agrees_with(horizontal) {
            let before = state.cling_timer;
            frame.velocity = Vec2::ZERO;
            state.cling_timer += dt;

            if state.cling_timer >= self.config.max_cling_time {
                frame.velocity = Vec2::new(0.0, -self.config.fall_speed);
                if before < self.config.max_cling_time {
                    report.cling_released = true;
                    debug!("Cling released after {:.2}s", state.cling_timer);
                }
            }
        } else {
            state.cling_timer = 0.0;
        }
    }
}

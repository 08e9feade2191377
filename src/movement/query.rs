//! Movement domain: the physics query adapter.
//!
//! Locomotion and rope logic only see [`PhysicsQueries`]; in the game it is backed by
//! avian's spatial query pipeline, in tests by an in-memory fake. Tagged rope targets are
//! classified here, once, so the core never inspects tags.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Marks a collider the rope can attach to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopeTarget {
    /// A fixed hinge the character swings from
    Hinge,
    /// An enemy the character is pulled toward
    Enemy,
}

/// What a rope hit means for the rope subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Swing,
    Tether,
    /// Solid, but nothing the rope can hold
    Inert,
}

impl From<Option<RopeTarget>> for AnchorKind {
    fn from(target: Option<RopeTarget>) -> Self {
        match target {
            Some(RopeTarget::Hinge) => AnchorKind::Swing,
            Some(RopeTarget::Enemy) => AnchorKind::Tether,
            None => AnchorKind::Inert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec2,
    pub distance: f32,
    pub kind: AnchorKind,
}

/// Read-only questions the character asks about the world around it.
pub trait PhysicsQueries {
    /// Bodies overlapping a circle, excluding every collider of `exclude`.
    fn circle_overlap(&self, center: Vec2, radius: f32, mask: LayerMask, exclude: Entity)
    -> Vec<Entity>;

    /// Bodies overlapping an axis-aligned box of full extents `size`, each listed once.
    fn box_overlap(&self, center: Vec2, size: Vec2, mask: LayerMask) -> Vec<Entity>;

    /// Nearest hit along a ray, classified as a rope anchor.
    fn ray_cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// [`PhysicsQueries`] over avian's spatial query pipeline.
#[derive(SystemParam)]
pub struct AvianQueries<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    collider_of: Query<'w, 's, &'static ColliderOf>,
    targets: Query<'w, 's, &'static RopeTarget>,
}

impl AvianQueries<'_, '_> {
    /// Rigid body a collider belongs to, or the collider itself when it has no body.
    fn body_of(&self, collider: Entity) -> Entity {
        self.collider_of
            .get(collider)
            .map(|collider_of| collider_of.body)
            .unwrap_or(collider)
    }

    fn classify(&self, collider: Entity) -> AnchorKind {
        let target = self
            .targets
            .get(collider)
            .or_else(|_| self.targets.get(self.body_of(collider)))
            .ok()
            .copied();
        AnchorKind::from(target)
    }
}

impl PhysicsQueries for AvianQueries<'_, '_> {
    fn circle_overlap(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        exclude: Entity,
    ) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities([exclude]);
        self.spatial
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .into_iter()
            .filter(|&collider| self.body_of(collider) != exclude)
            .collect()
    }

    fn box_overlap(&self, center: Vec2, size: Vec2, mask: LayerMask) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_mask(mask);
        let mut bodies: Vec<Entity> = self
            .spatial
            .shape_intersections(&Collider::rectangle(size.x, size.y), center, 0.0, &filter)
            .into_iter()
            .map(|collider| self.body_of(collider))
            .collect();
        bodies.sort_unstable();
        bodies.dedup();
        bodies
    }

    fn ray_cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let filter = SpatialQueryFilter::from_mask(mask);
        self.spatial
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayHit {
                entity: hit.entity,
                point: origin + *direction * hit.distance,
                distance: hit.distance,
                kind: self.classify(hit.entity),
            })
    }
}

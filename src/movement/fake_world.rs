//! Movement domain: in-memory physics world for tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;
use crate::movement::query::{AnchorKind, PhysicsQueries, RayHit, RopeTarget};

/// Axis-aligned box standing in for a collider
struct Solid {
    entity: Entity,
    layer: GameLayer,
    center: Vec2,
    half: Vec2,
    target: Option<RopeTarget>,
}

impl Solid {
    fn min(&self) -> Vec2 {
        self.center - self.half
    }

    fn max(&self) -> Vec2 {
        self.center + self.half
    }
}

/// [`PhysicsQueries`] over a list of boxes. Entities come from a private bevy `World` so
/// they are real ids.
pub(crate) struct FakeWorld {
    world: World,
    solids: Vec<Solid>,
}

impl FakeWorld {
    pub(crate) fn new() -> Self {
        Self {
            world: World::new(),
            solids: Vec::new(),
        }
    }

    /// An entity with no collider, e.g. the character's own body.
    pub(crate) fn spawn_entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }

    pub(crate) fn add_box(&mut self, layer: GameLayer, center: Vec2, size: Vec2) -> Entity {
        let entity = self.spawn_entity();
        self.attach_box(entity, layer, center, size, None);
        entity
    }

    pub(crate) fn add_target(
        &mut self,
        target: RopeTarget,
        layer: GameLayer,
        center: Vec2,
        size: Vec2,
    ) -> Entity {
        let entity = self.spawn_entity();
        self.attach_box(entity, layer, center, size, Some(target));
        entity
    }

    /// Give an existing entity a box collider.
    pub(crate) fn attach_box(
        &mut self,
        entity: Entity,
        layer: GameLayer,
        center: Vec2,
        size: Vec2,
        target: Option<RopeTarget>,
    ) {
        self.solids.push(Solid {
            entity,
            layer,
            center,
            half: size / 2.0,
            target,
        });
    }

    pub(crate) fn remove(&mut self, entity: Entity) {
        self.solids.retain(|solid| solid.entity != entity);
    }
}

fn in_mask(mask: LayerMask, layer: GameLayer) -> bool {
    mask.0 & layer.to_bits() != 0
}

/// Entry distance of a ray into a box, zero when starting inside.
fn ray_box(origin: Vec2, direction: Vec2, min: Vec2, max: Vec2) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-6 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let (mut t1, mut t2) = ((min[axis] - o) / d, (max[axis] - o) / d);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

impl PhysicsQueries for FakeWorld {
    fn circle_overlap(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        exclude: Entity,
    ) -> Vec<Entity> {
        self.solids
            .iter()
            .filter(|solid| solid.entity != exclude && in_mask(mask, solid.layer))
            .filter(|solid| center.clamp(solid.min(), solid.max()).distance(center) <= radius)
            .map(|solid| solid.entity)
            .collect()
    }

    fn box_overlap(&self, center: Vec2, size: Vec2, mask: LayerMask) -> Vec<Entity> {
        let half = size / 2.0;
        self.solids
            .iter()
            .filter(|solid| in_mask(mask, solid.layer))
            .filter(|solid| {
                let gap = (solid.center - center).abs();
                gap.x <= solid.half.x + half.x && gap.y <= solid.half.y + half.y
            })
            .map(|solid| solid.entity)
            .collect()
    }

    fn ray_cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.solids
            .iter()
            .filter(|solid| in_mask(mask, solid.layer))
            .filter_map(|solid| {
                ray_box(origin, *direction, solid.min(), solid.max())
                    .filter(|&distance| distance <= max_distance)
                    .map(|distance| (solid, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(solid, distance)| RayHit {
                entity: solid.entity,
                point: origin + *direction * distance,
                distance,
                kind: AnchorKind::from(solid.target),
            })
    }
}

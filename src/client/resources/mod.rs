use bevy::prelude::*;
use bimap::BiMap;
use kinematics::{ColliderShape, CollisionQuery, LayerMask};

/// Local entity ↔ server entity
#[derive(Debug, Default, Deref, DerefMut, Resource)]
pub struct EntityMap(pub BiMap<Entity, Entity>);

/// Axis aligned box of static world geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub min: Vec3,
    pub max: Vec3,
    pub layer: LayerMask,
    /// Overlap volumes that never block anything
    pub trigger: bool,
}

impl Block {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            min: center - size / 2.,
            max: center + size / 2.,
            layer: LayerMask::layer(0),
            trigger: false,
        }
    }

    pub fn as_trigger(self) -> Self {
        Self { trigger: true, ..self }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    fn distance_squared(&self, point: Vec3) -> f32 {
        point.distance_squared(point.clamp(self.min, self.max))
    }

    /// Squared distance from the segment `a`-`b` to this box
    fn segment_distance_squared(&self, a: Vec3, b: Vec3) -> f32 {
        // distance to a convex set along a line is convex in t
        let at = |t: f32| self.distance_squared(a.lerp(b, t));
        let (mut lo, mut hi) = (0_f32, 1_f32);
        for _ in 0..32 {
            let m1 = lo + (hi - lo) / 3.;
            let m2 = hi - (hi - lo) / 3.;
            if at(m1) <= at(m2) { hi = m2; } else { lo = m1; }
        }
        at((lo + hi) / 2.).min(at(0.)).min(at(1.))
    }

    fn overlaps(&self, min: Vec3, max: Vec3) -> bool {
        min.cmplt(self.max).all() && max.cmpgt(self.min).all()
    }
}

/// Static level geometry, the collision world for the local actor
#[derive(Clone, Debug, Default, Resource)]
pub struct Geometry {
    pub blocks: Vec<Block>,
}

impl Geometry {
    /// Flat ground with a crawlspace, a ledge to jump onto and a trigger volume
    pub fn sandbox() -> Self {
        Self { blocks: vec![
            Block::new(Vec3::new(0., -0.5, 0.), Vec3::new(60., 1., 60.)),
            // 1.3m clearance: room to crouch, not to stand
            Block::new(Vec3::new(6., 1.45, 0.), Vec3::new(4., 0.3, 4.)),
            Block::new(Vec3::new(-6., 0.25, 4.), Vec3::new(3., 0.5, 3.)),
            Block::new(Vec3::new(-6., 0.75, -4.), Vec3::new(3., 1.5, 3.)),
            Block::new(Vec3::new(0., 1., 6.), Vec3::new(2., 2., 2.)).as_trigger(),
        ]}
    }

    fn solids(&self, mask: LayerMask) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |block| !block.trigger && mask.contains(block.layer))
    }

    /// Move a collider standing at `position` by `displacement`, one axis at a
    /// time, stopping flush against any solid block in `mask`.
    pub fn move_and_collide(
        &self,
        position: Vec3,
        displacement: Vec3,
        collider: &ColliderShape,
        mask: LayerMask,
    ) -> Vec3 {
        let lower = Vec3::new(-collider.radius, 0., -collider.radius);
        let upper = Vec3::new(collider.radius, collider.height, collider.radius);
        let mut position = position;
        for axis in [1, 0, 2] {
            let delta = displacement[axis];
            if delta == 0. { continue; }
            position[axis] += delta;
            for block in self.solids(mask) {
                if !block.overlaps(position + lower, position + upper) { continue; }
                position[axis] = if delta > 0. { block.min[axis] - upper[axis] } else { block.max[axis] - lower[axis] };
            }
        }
        position
    }
}

impl CollisionQuery for Geometry {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.solids(mask).any(|block| block.distance_squared(center) <= radius * radius)
    }

    fn check_capsule(&self, a: Vec3, b: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.solids(mask).any(|block| block.segment_distance_squared(a, b) <= radius * radius)
    }
}

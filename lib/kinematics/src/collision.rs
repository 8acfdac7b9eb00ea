use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bit set of collision layers a query considers
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn layer(index: u8) -> Self {
        LayerMask(1 << index)
    }

    pub fn contains(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;
    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

/// Overlap queries against world geometry.
///
/// Both queries ignore trigger volumes and consider only geometry whose layer
/// is in `mask`.
pub trait CollisionQuery {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
    fn check_capsule(&self, a: Vec3, b: Vec3, radius: f32, mask: LayerMask) -> bool;
}

/// Vertical capsule collider, measured from the actor's feet
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ColliderShape {
    pub height: f32,
    pub center: Vec3,
    pub radius: f32,
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self {
            height: 1.8,
            center: Vec3::new(0., 0.93, 0.),
            radius: 0.28,
        }
    }
}

/// Ground contact check.
///
/// Tests a sphere of `radius` centred `offset` below `position`. A negative
/// offset raises the sphere, which is what keeps rough ground from flickering.
pub fn is_grounded(
    world: &impl CollisionQuery,
    position: Vec3,
    radius: f32,
    offset: f32,
    mask: LayerMask,
) -> bool {
    world.check_sphere(position - Vec3::Y * offset, radius, mask)
}

/// Whether a standing-height capsule fits at `position`.
pub fn can_stand_up(
    world: &impl CollisionQuery,
    position: Vec3,
    standing: ColliderShape,
    contact_offset: f32,
    mask: LayerMask,
) -> bool {
    let bottom = position + Vec3::Y * (standing.radius + contact_offset);
    let top = position + Vec3::Y * (standing.height - standing.radius);
    !world.check_capsule(bottom, top, standing.radius - contact_offset, mask)
}

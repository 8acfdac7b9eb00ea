use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Component, Copy, Default)]
pub struct Actor;

/// Translation and facing of an actor, as relayed by its owning client
#[derive(Clone, Component, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pose {
    pub translation: Vec3,
    /// Degrees about +Y, 0 = +Z
    pub yaw: f32,
}

impl Pose {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Whether `other` differs enough to be worth relaying
    pub fn moved(&self, other: &Pose) -> bool {
        self.translation.distance_squared(other.translation) > 1e-6
            || (self.yaw - other.yaw).abs() > 0.1
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        Self { translation: transform.translation, yaw: yaw.to_degrees().rem_euclid(360.) }
    }
}

pub mod blend;
pub mod camera;
pub mod collision;
pub mod config;
pub mod crouch;
pub mod effect;
pub mod intent;
pub mod locomotion;
pub mod replicated;
pub mod smooth;
pub mod state;
pub mod vertical;

pub use camera::CameraAim;
pub use collision::{ColliderShape, CollisionQuery, LayerMask};
pub use config::{CameraConfig, ConfigError, LocomotionConfig};
pub use crouch::{CrouchOutcome, RejectReason};
pub use effect::TransientEffect;
pub use intent::ActorIntent;
pub use locomotion::{AnimationParams, Locomotion, TickContext, TickOutput};
pub use replicated::{FieldId, Replicated, ReplicationChannel};
pub use smooth::SmoothDamped;
pub use state::KinematicState;
pub use vertical::VerticalTransition;

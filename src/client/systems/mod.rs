pub mod actor;
pub mod animator;
pub mod camera;
pub mod input;
pub mod label;
pub mod locomotion;
pub mod renet;
pub mod world;

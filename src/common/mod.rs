pub mod components;
pub mod message;
pub mod resources;

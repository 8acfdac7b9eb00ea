pub mod actor;
pub mod renet;

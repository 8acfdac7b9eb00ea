use bevy::prelude::*;
use kinematics::FieldId;
use serde::{Deserialize, Serialize};

use crate::common::components::Pose;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Event {
    Despawn { ent: Entity },
    /// Server → owning client: `ent` is the actor this client controls
    Init { ent: Entity },
    Incremental { ent: Entity, component: Component },
    Spawn { ent: Entity, pose: Pose },
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Component {
    Crouched(bool),
    Name(String),
    Pose(Pose),
}

impl Component {
    /// Replicated field this component carries, if any
    pub fn field(&self) -> Option<FieldId> {
        match self {
            Component::Crouched(_) => Some(FieldId::Crouched),
            Component::Name(_) => Some(FieldId::Name),
            Component::Pose(_) => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Event, PartialEq, Serialize)]
pub struct Do {
    pub event: Event
}

#[derive(Clone, Debug, Deserialize, Event, PartialEq, Serialize)]
pub struct Try {
    pub event: Event
}

pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, bincode::error::EncodeError> {
    bincode::serde::encode_to_vec(message, bincode::config::legacy())
}

pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, bincode::error::DecodeError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::legacy()).map(|(message, _)| message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_message_fails_to_decode() {
        let ent = Entity::from_raw(7);
        let bytes = encode(&Do { event: Event::Incremental { ent, component: Component::Name("Player123".into()) } }).unwrap();
        assert!(decode::<Do>(&bytes[..bytes.len() - 3]).is_err(), "Truncated payload must not decode");
        assert_eq!(
            decode::<Do>(&bytes).unwrap(),
            Do { event: Event::Incremental { ent, component: Component::Name("Player123".into()) } });
    }

    #[test]
    fn test_component_fields() {
        assert_eq!(Component::Crouched(true).field(), Some(FieldId::Crouched));
        assert_eq!(Component::Name(String::new()).field(), Some(FieldId::Name));
        assert_eq!(Component::Pose(Pose::default()).field(), None);
    }
}

use bevy::prelude::*;
use renet::ClientId;
use bimap::BiMap;

#[derive(Default, Deref, DerefMut, Resource)]
pub struct Lobby(BiMap<ClientId, Entity>);

use bevy::prelude::*;
use bevy_renet::netcode::ClientAuthentication;
use ::renet::{DefaultChannel, RenetClient};

use crate::{
    client::{components::*, resources::*},
    common::{
        components::Actor,
        message::{Component, Event, *},
    }, *
};

pub fn setup(
    mut commands: Commands,
) {
    let server_addr = SERVER_ADDR.parse().unwrap();
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap();
    let client_id = current_time.as_millis() as u64;
    let authentication = ClientAuthentication::Unsecure {
        client_id,
        protocol_id: PROTOCOL_ID,
        server_addr,
        user_data: None,
    };

    let transport = NetcodeClientTransport::new(current_time, authentication, socket).unwrap();
    let client = RenetClient::new(ConnectionConfig::default());

    commands.insert_resource(client);
    commands.insert_resource(transport);
}

/// Receive from the server, translating server entities into local ones
pub fn write_do(
    mut commands: Commands,
    mut writer: EventWriter<Do>,
    mut conn: ResMut<RenetClient>,
    mut l2r: ResMut<EntityMap>,
) {
    for channel in [DefaultChannel::ReliableOrdered, DefaultChannel::Unreliable] {
        let channel = u8::from(channel);
        while let Some(serialized) = conn.receive_message(channel) {
            let message = match decode::<Do>(&serialized) {
                Ok(message) => message,
                Err(err) => { warn!("dropping undecodable message: {err}"); continue; }
            };
            receive(message, &mut commands, &mut writer, &mut l2r);
        }
    }
}

fn receive(message: Do, commands: &mut Commands, writer: &mut EventWriter<Do>, l2r: &mut EntityMap) {
    match message.event {
        Event::Init { ent } => {
            let loc = commands.spawn(Actor).id();
            debug!("controlling {ent} as {loc}");
            l2r.insert(loc, ent);
            writer.write(Do { event: Event::Init { ent: loc }});
        }
        Event::Spawn { ent, pose } => {
            let loc = match l2r.get_by_right(&ent) {
                Some(&loc) => loc,
                None => {
                    let loc = commands.spawn(Actor).id();
                    l2r.insert(loc, ent);
                    loc
                }
            };
            writer.write(Do { event: Event::Spawn { ent: loc, pose }});
        }
        Event::Incremental { ent, component } => {
            let Some(&loc) = l2r.get_by_right(&ent) else {
                warn!("incremental for unknown {ent}: {component:?}");
                return;
            };
            writer.write(Do { event: Event::Incremental { ent: loc, component }});
        }
        Event::Despawn { ent } => {
            let Some((loc, _)) = l2r.remove_by_right(&ent) else { return };
            debug!("despawn {loc}");
            writer.write(Do { event: Event::Despawn { ent: loc }});
        }
    }
}

/// Send this frame's `Try` messages, mapped to server entities
pub fn send_try(
    mut conn: ResMut<RenetClient>,
    mut reader: EventReader<Try>,
    l2r: Res<EntityMap>,
) {
    for message in reader.read() {
        let Try { event: Event::Incremental { ent, component } } = message else { continue };
        let Some(&ent) = l2r.get_by_left(ent) else { continue };
        let channel = match component {
            Component::Pose(_) => DefaultChannel::Unreliable,
            _ => DefaultChannel::ReliableOrdered,
        };
        let message = Try { event: Event::Incremental { ent, component: component.clone() } };
        match encode(&message) {
            Ok(bytes) => conn.send_message(channel, bytes),
            Err(err) => error!("failed to encode {message:?}: {err}"),
        }
    }
}

/// Proposals queued once the connection is gone are never sent
pub fn discard_on_disconnect(
    conn: Res<RenetClient>,
    mut query: Query<(&mut Crouch, &mut PlayerName), With<Controlled>>,
) {
    if !conn.is_disconnected() { return; }
    for (mut crouch, mut name) in &mut query {
        crouch.discard_pending();
        name.discard_pending();
    }
}

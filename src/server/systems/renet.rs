use bevy::prelude::*;
use bevy_renet::netcode::{ServerAuthentication, ServerConfig};
use ::renet::{ClientId, ServerEvent};

use crate::{
    common::{
        components::{Actor, Pose},
        message::{Component, Event, *},
    },
    server::{components::*, resources::*},
    *
};

pub fn new_renet_server() -> (RenetServer, NetcodeServerTransport) {
    let public_addr = "0.0.0.0:5000".parse().unwrap();
    let socket = UdpSocket::bind(public_addr).unwrap();
    let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap();
    let server_config = ServerConfig {
        current_time,
        max_clients: 64,
        protocol_id: PROTOCOL_ID,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    };

    let transport = NetcodeServerTransport::new(server_config, socket).unwrap();
    let server = RenetServer::new(ConnectionConfig::default());

    (server, transport)
}

fn send(conn: &mut RenetServer, client_id: ClientId, channel: DefaultChannel, message: &Do) {
    match encode(message) {
        Ok(bytes) => conn.send_message(client_id, channel, bytes),
        Err(err) => error!("failed to encode {message:?}: {err}"),
    }
}

pub fn do_manage_connections(
    mut commands: Commands,
    mut conn: ResMut<RenetServer>,
    mut reader: EventReader<ServerEvent>,
    mut writer: EventWriter<Do>,
    mut lobby: ResMut<Lobby>,
    query: Query<(&Pose, &Crouched, &DisplayName)>,
) {
    for event in reader.read() {
        match event {
            ServerEvent::ClientConnected { client_id } => {
                info!("Player {client_id} connected");
                let pose = Pose::default();
                let ent = commands.spawn((Actor, pose, Crouched::default(), DisplayName::default())).id();
                send(&mut conn, *client_id, DefaultChannel::ReliableOrdered, &Do { event: Event::Init { ent }});

                // bring the newcomer up to date with everyone already here
                for (_, &other) in lobby.iter() {
                    let Ok((&pose, &crouched, name)) = query.get(other) else { continue };
                    let mut events = vec![
                        Event::Spawn { ent: other, pose },
                        Event::Incremental { ent: other, component: Component::Crouched(*crouched) },
                    ];
                    if !name.is_empty() {
                        events.push(Event::Incremental { ent: other, component: Component::Name(name.0.clone()) });
                    }
                    for event in events {
                        send(&mut conn, *client_id, DefaultChannel::ReliableOrdered, &Do { event });
                    }
                }

                writer.write(Do { event: Event::Spawn { ent, pose }});
                lobby.insert(*client_id, ent);
            }
            ServerEvent::ClientDisconnected { client_id, reason } => {
                info!("Player {client_id} disconnected: {reason}");
                let Some((_, ent)) = lobby.remove_by_left(client_id) else { continue };
                commands.entity(ent).despawn();
                writer.write(Do { event: Event::Despawn { ent }});
            }
        }
    }
}

/// Receive proposals, trusting only the lobby for which actor they concern
pub fn write_try(
    mut writer: EventWriter<Try>,
    mut conn: ResMut<RenetServer>,
    lobby: Res<Lobby>,
) {
    for client_id in conn.clients_id() {
        for channel in [DefaultChannel::ReliableOrdered, DefaultChannel::Unreliable] {
            let channel = u8::from(channel);
            while let Some(serialized) = conn.receive_message(client_id, channel) {
                let message = match decode::<Try>(&serialized) {
                    Ok(message) => message,
                    Err(err) => { warn!("dropping undecodable message from {client_id}: {err}"); continue; }
                };
                let Some(&ent) = lobby.get_by_left(&client_id) else {
                    warn!("no {client_id} in lobby");
                    continue;
                };
                match message {
                    Try { event: Event::Incremental { component, .. } } =>
                        writer.write(Try { event: Event::Incremental { ent, component }}),
                    Try { event } => { warn!("unexpected {event:?} from {client_id}"); continue; }
                };
            }
        }
    }
}

/// Channel for a confirmed event and the one client it skips, if any.
///
/// Replicated fields reach every client, the proposer included; poses and
/// spawns skip the actor's own client. `Init` is never broadcast.
fn route(event: &Event, lobby: &Lobby) -> Option<(DefaultChannel, Option<ClientId>)> {
    match event {
        Event::Incremental { ent, component: Component::Pose(_) } =>
            Some((DefaultChannel::Unreliable, lobby.get_by_right(ent).copied())),
        Event::Spawn { ent, .. } =>
            Some((DefaultChannel::ReliableOrdered, lobby.get_by_right(ent).copied())),
        Event::Incremental { .. } | Event::Despawn { .. } => Some((DefaultChannel::ReliableOrdered, None)),
        Event::Init { .. } => None,
    }
}

pub fn send_do(
    mut conn: ResMut<RenetServer>,
    mut reader: EventReader<Do>,
    lobby: Res<Lobby>,
) {
    for message in reader.read() {
        let Some((channel, except)) = route(&message.event, &lobby) else { continue };
        let bytes = match encode(message) {
            Ok(bytes) => bytes,
            Err(err) => { error!("failed to encode {message:?}: {err}"); continue; }
        };
        match except {
            Some(client_id) => conn.broadcast_message_except(client_id, channel, bytes),
            None => conn.broadcast_message(channel, bytes),
        }
    }
}

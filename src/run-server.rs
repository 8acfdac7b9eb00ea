mod common;
mod server;

use std::time::SystemTime;
use std::net::UdpSocket;

use bevy::{
    log::LogPlugin,
    prelude::*,
};
use bevy_renet::{
    renet::*,
    netcode::*,
    *,
};

use common::message::*;
use server::{
    resources::*,
    systems::{actor, renet},
};

const PROTOCOL_ID: u64 = 7;

fn panic_on_error_system(
    mut renet_error: EventReader<NetcodeTransportError>
) {
    if let Some(e) = renet_error.read().next() {
        panic!("{:?}", e);
    }
}

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        LogPlugin {
            level: bevy::log::Level::TRACE,
            filter: "bevy=warn,renetcode=warn,renet=warn,server=info".to_owned(),
            ..default()
        },
        RenetServerPlugin,
        NetcodeServerPlugin,
    ));

    app.add_event::<Do>();
    app.add_event::<Try>();

    let (server, transport) = renet::new_renet_server();
    app.insert_resource(server);
    app.insert_resource(transport);
    app.init_resource::<Lobby>();

    app.add_systems(PreUpdate, renet::write_try);

    app.add_systems(Update, (
        panic_on_error_system,
        renet::do_manage_connections,
        actor::try_incremental,
    ));

    app.add_systems(PostUpdate, renet::send_do);

    app.run();
}

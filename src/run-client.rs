mod common;
mod client;

use std::time::SystemTime;
use std::net::UdpSocket;

use bevy::{
    log::LogPlugin,
    prelude::*,
    transform::TransformSystem,
};
use bevy_renet::{
    renet::*,
    netcode::*,
    *,
};

use common::{
    message::*,
    resources::*,
};
use client::{
    plugins::vignette::VignettePlugin,
    resources::*,
    systems::{actor, animator, camera, input, label, locomotion, renet, world},
};

const PROTOCOL_ID: u64 = 7;
const SERVER_ADDR: &str = "127.0.0.1:5000";

fn panic_on_error_system(
    mut renet_error: EventReader<NetcodeTransportError>
) {
    if let Some(e) = renet_error.read().next() {
        panic!("{:?}", e);
    }
}

fn main() {
    let mut app = App::new();
    app.add_plugins((DefaultPlugins
        .set(LogPlugin {
            level: bevy::log::Level::TRACE,
            filter:  "wgpu=error,naga=warn,polling=warn,winit=warn,offset_allocator=warn,gilrs=warn,".to_owned()
                    +"bevy=warn,cosmic_text=warn,kinematics=debug,client=debug,"
                    ,
            ..default()
        }),
        RenetClientPlugin,
        NetcodeClientPlugin,
        VignettePlugin,
    ));

    app.add_event::<Do>();
    app.add_event::<Try>();

    app.add_systems(Startup, (
        actor::setup,
        camera::setup,
        renet::setup,
        world::setup,
    ));

    app.add_systems(PreUpdate, (
        input::update,
        renet::write_do,
    ));

    app.add_systems(Update, (
        panic_on_error_system,
        (
            actor::do_init,
            actor::do_spawn,
            actor::do_incremental,
            actor::do_despawn,
            locomotion::tick,
            actor::update_remote,
            actor::apply_collider,
            animator::update_remote,
        ).chain(),
    ));

    app.add_systems(PostUpdate, (
        renet::discard_on_disconnect,
        locomotion::flush,
        locomotion::try_pose,
        renet::send_try,
        camera::update,
    ).chain().before(TransformSystem::TransformPropagate));

    app.add_systems(PostUpdate, label::update.after(TransformSystem::TransformPropagate));

    app.insert_resource(Settings::load_or_default(SETTINGS_PATH));
    app.insert_resource(Geometry::sandbox());
    app.init_resource::<EntityMap>();

    app.run();
}

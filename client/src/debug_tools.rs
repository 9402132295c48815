//! Debug/performance tooling for native dev builds.
//!
//! Compiled only behind `dev_native` (see `main.rs`). Adds the perf overlay and draws every
//! collider as a wireframe; `F1` toggles the wireframes.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::input::common_conditions::input_just_pressed;
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::{
    config::Session,
    simulation::SimulationStep,
    transform::{pose_to_transform, to_quat, to_vec3},
};

const COLLIDER_COLOR: Color = Color::srgb(0.1, 1.0, 0.3);
const CHARACTER_COLLIDER_COLOR: Color = Color::srgb(1.0, 0.3, 1.0);

#[derive(Resource, Debug)]
struct ShowColliders(bool);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.insert_resource(ShowColliders(true));
    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(
        Update,
        (
            toggle_colliders.run_if(input_just_pressed(KeyCode::F1)),
            draw_colliders.after(SimulationStep),
        ),
    );
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn toggle_colliders(mut show: ResMut<ShowColliders>) {
    show.0 = !show.0;
}

fn draw_colliders(show: Res<ShowColliders>, session: Res<Session>, mut gizmos: Gizmos) {
    if !show.0 {
        return;
    }
    let session = &session.0;

    for obstacle in session.obstacles() {
        let spec = &obstacle.spec;
        let transform =
            pose_to_transform(&spec.pose()).with_scale(to_vec3(spec.half_extents) * 2.0);
        gizmos.cuboid(transform, COLLIDER_COLOR);
    }

    let pose = session.character_pose();
    gizmos.sphere(
        Isometry3d::new(to_vec3(pose.translation), to_quat(pose.rotation)),
        session.character_radius(),
        CHARACTER_COLLIDER_COLOR,
    );
}

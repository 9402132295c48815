use bevy::prelude::*;

use crate::{character::CharacterVisual, simulation::SimulationStep};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, follow_character.after(SimulationStep));
}

const CAMERA_OFFSET_GLOBAL: Vec3 = Vec3::new(0.0, 5.0, 10.0);
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_DECAY_RATE: f32 = 4.0;

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_OFFSET_GLOBAL).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Trail the character at a fixed offset, keeping the camera's orientation.
fn follow_character(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    character: Single<&Transform, (With<CharacterVisual>, Without<Camera3d>)>,
    time: Res<Time>,
) {
    let Ok(mut cam_tf) = camera_query.single_mut() else {
        return;
    };

    let target = character.translation + CAMERA_OFFSET_GLOBAL;
    cam_tf
        .translation
        .smooth_nudge(&target, CAMERA_DECAY_RATE, time.delta_secs());
}

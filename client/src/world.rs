use bevy::prelude::*;

use crate::{
    config::Session,
    transform::{color_from_hex, pose_to_transform, to_vec3},
};

/// Render primitive for one loaded obstacle.
#[derive(Component, Debug)]
pub struct ObstacleVisual;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
    app.add_systems(Startup, (spawn_lights, spawn_obstacles));
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_obstacles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<Session>,
) {
    let obstacles = session.0.obstacles();
    for obstacle in obstacles {
        let spec = &obstacle.spec;
        commands.spawn((
            ObstacleVisual,
            Mesh3d(meshes.add(Cuboid::from_size(to_vec3(spec.half_extents) * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color_from_hex(spec.color),
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            })),
            pose_to_transform(&spec.pose()),
        ));
    }
    info!("Spawned {} obstacle visuals", obstacles.len());
}

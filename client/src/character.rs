//! The character's render representation: a squashed body with a backpack.
//!
//! Only the root entity carries [`CharacterVisual`]; the simulation writes its `Transform` every
//! frame and the parts follow as children.

use bevy::prelude::*;

use crate::{config::Session, transform::{color_from_hex, pose_to_transform}};

#[derive(Component, Debug)]
pub struct CharacterVisual;

const BODY_COLOR: u32 = 0xff_cc_99;
const BODY_SCALE: Vec3 = Vec3::new(1.0, 0.9, 0.85);
const BACKPACK_COLOR: u32 = 0xcc_00_00;
const BACKPACK_SIZE: Vec3 = Vec3::new(0.5, 0.5, 0.3);
const BACKPACK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.45);
const STRIPE_COLOR: u32 = 0x00_44_cc;
const STRIPE_SIZE: Vec3 = Vec3::new(0.08, 0.5, 0.32);
const STRIPE_X: f32 = 0.15;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_character);
}

fn spawn_character(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<Session>,
) {
    let session = &session.0;
    let radius = session.character_radius();

    let body = (
        Mesh3d(meshes.add(Sphere::new(radius))),
        MeshMaterial3d(materials.add(color_from_hex(BODY_COLOR))),
        Transform::from_scale(BODY_SCALE),
    );
    let backpack = (
        Mesh3d(meshes.add(Cuboid::from_size(BACKPACK_SIZE))),
        MeshMaterial3d(materials.add(color_from_hex(BACKPACK_COLOR))),
        Transform::from_translation(BACKPACK_OFFSET),
    );

    let stripe_mesh = meshes.add(Cuboid::from_size(STRIPE_SIZE));
    let stripe_material = materials.add(color_from_hex(STRIPE_COLOR));
    let stripe = |x: f32| {
        (
            Mesh3d(stripe_mesh.clone()),
            MeshMaterial3d(stripe_material.clone()),
            Transform::from_xyz(x, 0.0, 0.0),
        )
    };

    commands.spawn((
        Name::new("Character"),
        CharacterVisual,
        pose_to_transform(&session.character_pose()),
        Visibility::default(),
        children![
            body,
            (backpack, children![stripe(-STRIPE_X), stripe(STRIPE_X)]),
        ],
    ));
}

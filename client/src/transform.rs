//! Conversions between the physics side (nalgebra) and bevy's math types.

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector2, Vector3};
use shared::Pose;

pub fn to_vec3(v: Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_quat(q: UnitQuaternion<f32>) -> Quat {
    let q = q.into_inner();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// Window cursor position to the pointer coordinate the aim controller expects.
pub fn to_screen_point(v: Vec2) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

/// Copy a physics pose onto a render transform. Scale is left untouched.
pub fn apply_pose(transform: &mut Transform, pose: &Pose) {
    transform.translation = to_vec3(pose.translation);
    transform.rotation = to_quat(pose.rotation);
}

pub fn pose_to_transform(pose: &Pose) -> Transform {
    let mut transform = Transform::IDENTITY;
    apply_pose(&mut transform, pose);
    transform
}

/// `0xRRGGBB` to an sRGB color.
pub fn color_from_hex(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_copies_translation_and_rotation() {
        let pose = Pose {
            translation: Vector3::new(1.0, 2.0, -3.0),
            rotation: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.5),
        };
        let mut transform = Transform::from_scale(Vec3::splat(2.0));
        apply_pose(&mut transform, &pose);

        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, -3.0));
        assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_y(0.5), 1.0e-6));
        assert_eq!(transform.scale, Vec3::splat(2.0));
    }

    #[test]
    fn identity_rotation_maps_to_identity_quat() {
        let pose = Pose::from_translation(Vector3::new(0.0, 0.6, 0.0));
        let transform = pose_to_transform(&pose);
        assert!(transform.rotation.abs_diff_eq(Quat::IDENTITY, 1.0e-6));
        assert_eq!(transform.translation, Vec3::new(0.0, 0.6, 0.0));
    }

    #[test]
    fn hex_colors_split_into_channels() {
        assert_eq!(color_from_hex(0x87ceeb), Color::srgb_u8(0x87, 0xce, 0xeb));
        assert_eq!(color_from_hex(0x000000), Color::srgb_u8(0, 0, 0));
        assert_eq!(color_from_hex(0xffffff), Color::srgb_u8(255, 255, 255));
    }

    #[test]
    fn cursor_position_keeps_window_axes() {
        assert_eq!(
            to_screen_point(Vec2::new(500.0, 400.0)),
            Vector2::new(500.0, 400.0)
        );
    }
}

use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;

use crate::constants::{
    BOUNCY_FRICTION, BOUNCY_RESTITUTION, GROUND_SIZE, GROUND_THICKNESS, SOLID_FRICTION,
    SOLID_RESTITUTION,
};
use crate::physics::{ColliderShape, Pose, SurfaceMaterial};

/// Surface used for bouncy obstacles.
pub const BOUNCY_SURFACE: SurfaceMaterial = SurfaceMaterial {
    friction: BOUNCY_FRICTION,
    restitution: BOUNCY_RESTITUTION,
};

/// Surface used for everything else.
pub const SOLID_SURFACE: SurfaceMaterial = SurfaceMaterial {
    friction: SOLID_FRICTION,
    restitution: SOLID_RESTITUTION,
};

/// Supported obstacle shapes.
///
/// Only axis-aligned boxes for now; orientation comes from [`ObstacleSpec::rotation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleShape {
    #[default]
    Box,
}

/// Definition of one immutable level obstacle.
///
/// Each spec becomes exactly one fixed collider and one render primitive.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleSpec {
    #[serde(default)]
    pub shape: ObstacleShape,
    /// Half-extents (meters).
    pub half_extents: Vector3<f32>,
    /// World-space center (meters).
    pub position: Vector3<f32>,
    /// Per-axis rotation in radians, applied in X, then Y, then Z order (intrinsic).
    #[serde(default)]
    pub rotation: Option<Vector3<f32>>,
    /// Display color as `0xRRGGBB`.
    pub color: u32,
    #[serde(default)]
    pub bouncy: bool,
}

impl ObstacleSpec {
    /// Plain box with no rotation.
    pub fn cuboid(half_extents: Vector3<f32>, position: Vector3<f32>, color: u32) -> Self {
        Self {
            shape: ObstacleShape::Box,
            half_extents,
            position,
            rotation: None,
            color,
            bouncy: false,
        }
    }

    pub fn rotated(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn bouncy(mut self) -> Self {
        self.bouncy = true;
        self
    }

    /// World-space orientation.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        let Some(r) = self.rotation else {
            return UnitQuaternion::identity();
        };
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), r.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), r.y)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), r.z)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            translation: self.position,
            rotation: self.orientation(),
        }
    }

    pub fn collider_shape(&self) -> ColliderShape {
        match self.shape {
            ObstacleShape::Box => ColliderShape::Cuboid {
                half_extents: self.half_extents,
            },
        }
    }

    pub fn surface(&self) -> SurfaceMaterial {
        if self.bouncy {
            BOUNCY_SURFACE
        } else {
            SOLID_SURFACE
        }
    }

    /// Rejects specs that cannot be turned into a collider.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.half_extents.iter().all(|h| h.is_finite() && *h > 0.0) {
            return Err("Obstacle half-extents must be positive");
        }
        if !self.position.iter().all(|p| p.is_finite()) {
            return Err("Obstacle position must be finite");
        }
        if self
            .rotation
            .is_some_and(|r| !r.iter().all(|a| a.is_finite()))
        {
            return Err("Obstacle rotation must be finite");
        }
        if self.color > 0xFF_FF_FF {
            return Err("Obstacle color must be 0xRRGGBB");
        }
        Ok(())
    }
}

/// The built-in level: a ground slab with a few boxes in the launch direction (-Z).
pub fn default_obstacles() -> Vec<ObstacleSpec> {
    let half_ground = GROUND_SIZE * 0.5;
    let half_thickness = GROUND_THICKNESS * 0.5;

    vec![
        // Ground; top face at y = 0.
        ObstacleSpec::cuboid(
            Vector3::new(half_ground, half_thickness, half_ground),
            Vector3::new(0.0, -half_thickness, 0.0),
            0x7c_ba_3d,
        ),
        // Low wall straight ahead.
        ObstacleSpec::cuboid(
            Vector3::new(3.0, 0.75, 0.4),
            Vector3::new(0.0, 0.75, -12.0),
            0x8b_5a_2b,
        ),
        // Ramp tilted up towards the far end.
        ObstacleSpec::cuboid(
            Vector3::new(1.5, 0.15, 3.0),
            Vector3::new(-5.0, 0.8, -8.0),
            0x99_99_99,
        )
        .rotated(Vector3::new(0.25, 0.0, 0.0)),
        // Trampoline.
        ObstacleSpec::cuboid(
            Vector3::new(1.5, 0.1, 1.5),
            Vector3::new(4.0, 0.1, -6.0),
            0xff_66_cc,
        )
        .bouncy(),
        // Tower to aim over.
        ObstacleSpec::cuboid(
            Vector3::new(1.0, 2.5, 1.0),
            Vector3::new(2.0, 2.5, -18.0),
            0x44_66_aa,
        )
        .rotated(Vector3::new(0.0, 0.6, 0.0)),
    ]
}

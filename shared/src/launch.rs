//! Drag gesture → launch vector mapping.
//!
//! Screen coordinates follow the usual window convention: origin at the top-left, +Y down.
//! The drag is "pulled back" like a slingshot, so the launch direction is `start - current`.
//!
//! Output axes are world axes: +X right, +Y up, -Z away from the camera.

use nalgebra::{Vector2, Vector3};
use serde::Deserialize;

use crate::constants::{IMPULSE_SCALE, K_FORWARD, K_LATERAL, K_LIFT, K_POWER, POWER_CAP};

/// Tunable coefficients for the launch mapping.
///
/// Defaults are the reference values in [`crate::constants`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchTuning {
    /// Drag length (pixels) → power.
    pub k_power: f32,
    /// Saturation point for power.
    pub power_cap: f32,
    /// Raw drag delta → lateral/vertical components.
    pub k_lateral: f32,
    /// Power → lift (+Y).
    pub k_lift: f32,
    /// Power → forward travel (-Z).
    pub k_forward: f32,
    /// Launch vector → applied impulse.
    pub impulse_scale: f32,
}

impl Default for LaunchTuning {
    fn default() -> Self {
        Self {
            k_power: K_POWER,
            power_cap: POWER_CAP,
            k_lateral: K_LATERAL,
            k_lift: K_LIFT,
            k_forward: K_FORWARD,
            impulse_scale: IMPULSE_SCALE,
        }
    }
}

impl LaunchTuning {
    /// Checks that every coefficient is finite and the cap is non-negative.
    pub fn validate(&self) -> Result<(), &'static str> {
        let all = [
            self.k_power,
            self.power_cap,
            self.k_lateral,
            self.k_lift,
            self.k_forward,
            self.impulse_scale,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err("Launch tuning contains a non-finite value");
        }
        if self.power_cap < 0.0 {
            return Err("Launch power cap must be non-negative");
        }
        Ok(())
    }
}

/// Pull-back delta of a drag: `start - current`.
#[inline]
pub fn drag_delta(start: Vector2<f32>, current: Vector2<f32>) -> Vector2<f32> {
    start - current
}

/// Launch power for a drag, saturated at `tuning.power_cap`.
#[inline]
pub fn launch_power(start: Vector2<f32>, current: Vector2<f32>, tuning: &LaunchTuning) -> f32 {
    (drag_delta(start, current).norm() * tuning.k_power).min(tuning.power_cap)
}

/// Map a drag gesture to a 3D launch vector.
///
/// ```text
/// vx = dx * k_lateral
/// vy = dy * k_lateral + power * k_lift
/// vz = -power * k_forward
/// ```
///
/// A zero-length drag yields the zero vector.
pub fn launch_vector(
    start: Vector2<f32>,
    current: Vector2<f32>,
    tuning: &LaunchTuning,
) -> Vector3<f32> {
    let d = drag_delta(start, current);
    let power = launch_power(start, current, tuning);

    Vector3::new(
        d.x * tuning.k_lateral,
        d.y * tuning.k_lateral + power * tuning.k_lift,
        -power * tuning.k_forward,
    )
}

/// The impulse actually applied to the character for a given launch vector.
#[inline]
pub fn launch_impulse(vector: Vector3<f32>, tuning: &LaunchTuning) -> Vector3<f32> {
    vector * tuning.impulse_scale
}

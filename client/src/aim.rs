//! Aim line shown while dragging.

use bevy::prelude::*;

use crate::{config::Session, simulation::SimulationStep, transform::to_vec3};

/// Line color at zero power.
const WEAK: Color = Color::srgb(1.0, 1.0, 0.2);
/// Line color at the power cap.
const STRONG: Color = Color::srgb(1.0, 0.15, 0.1);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, draw_aim_line.after(SimulationStep));
}

fn draw_aim_line(session: Res<Session>, mut gizmos: Gizmos) {
    let Some(feedback) = session.0.aim_feedback() else {
        return;
    };

    let origin = to_vec3(feedback.origin);
    let end = origin + to_vec3(feedback.preview.launch_vector);
    let color = WEAK.mix(&STRONG, feedback.preview.power_fraction);

    gizmos.line(origin, end, color);
    gizmos.sphere(Isometry3d::from_translation(end), 0.1, color);
}

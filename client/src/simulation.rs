//! Drives the shared session once per rendered frame.
//!
//! Queued [`GameInput`]s are dispatched first, then the session runs its frame: step, read the
//! character pose, copy it onto [`CharacterVisual`], request a redraw.

use bevy::{prelude::*, window::RequestRedraw};
use shared::{Pose, RenderSink};

use crate::{
    character::CharacterVisual,
    config::Session,
    input::{CaptureInput, GameInput},
    transform::apply_pose,
};

/// Runs after input capture, before anything that reads the character transform.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationStep;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (dispatch_input, advance_frame)
            .chain()
            .in_set(SimulationStep)
            .after(CaptureInput),
    );
}

/// Bevy side of the render contract.
struct FrameSink<'a, 'w> {
    character: Option<&'a mut Transform>,
    redraw: &'a mut MessageWriter<'w, RequestRedraw>,
}

impl RenderSink for FrameSink<'_, '_> {
    fn present_character(&mut self, pose: Pose) {
        if let Some(transform) = self.character.as_deref_mut() {
            apply_pose(transform, &pose);
        }
    }

    fn request_frame(&mut self) {
        self.redraw.write(RequestRedraw);
    }
}

fn dispatch_input(mut session: ResMut<Session>, mut inputs: MessageReader<GameInput>) {
    for GameInput(event) in inputs.read() {
        session.0.handle_event(*event);
    }
}

fn advance_frame(
    mut session: ResMut<Session>,
    mut character: Query<&mut Transform, With<CharacterVisual>>,
    mut redraw: MessageWriter<RequestRedraw>,
) {
    let mut transform = character.single_mut().ok();
    let mut sink = FrameSink {
        character: transform.as_deref_mut(),
        redraw: &mut redraw,
    };
    session.0.advance_frame(&mut sink);
}

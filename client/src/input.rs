use bevy::{prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::*;
use shared::InputEvent;

use crate::transform::to_screen_point;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Press, drag and release to fling.
    Aim,
    Reset,
}

/// One queued input event for the session, in arrival order.
#[derive(Message, Clone, Copy, Debug)]
pub struct GameInput(pub InputEvent);

/// Runs before the simulation consumes [`GameInput`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureInput;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();
    app.add_message::<GameInput>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Aim, MouseButton::Left);
    input_map.insert(InputAction::Reset, KeyCode::KeyR);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(
        Update,
        (capture_pointer, capture_reset).chain().in_set(CaptureInput),
    );
}

/// Translate the aim button and cursor into pointer down/move/up events.
///
/// Releases outside the window reuse the last known cursor position.
fn capture_pointer(
    actions: Res<ActionState<InputAction>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut writer: MessageWriter<GameInput>,
) {
    let cursor = window.cursor_position().or(*last_cursor);
    let moved = cursor.is_some() && cursor != *last_cursor;
    *last_cursor = cursor;

    let Some(cursor) = cursor else {
        return;
    };
    let point = to_screen_point(cursor);

    if actions.just_pressed(&InputAction::Aim) {
        writer.write(GameInput(InputEvent::PointerDown(point)));
    } else if actions.just_released(&InputAction::Aim) {
        writer.write(GameInput(InputEvent::PointerUp(point)));
    } else if moved && actions.pressed(&InputAction::Aim) {
        writer.write(GameInput(InputEvent::PointerMove(point)));
    }
}

fn capture_reset(actions: Res<ActionState<InputAction>>, mut writer: MessageWriter<GameInput>) {
    if actions.just_pressed(&InputAction::Reset) {
        writer.write(GameInput(InputEvent::Reset));
    }
}

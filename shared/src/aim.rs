//! Pointer drag → aim → launch.
//!
//! The gesture only exists while the character is aiming. Moves produce an [`AimPreview`] for the
//! aim line; releasing launches through the [`CharacterController`].

use nalgebra::{Vector2, Vector3};

use crate::character::CharacterController;
use crate::launch::{LaunchTuning, launch_power, launch_vector};
use crate::physics::PhysicsBackend;

/// Screen-space drag state. Coordinates are window pixels, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragGesture {
    pub active: bool,
    pub start: Vector2<f32>,
    pub current: Vector2<f32>,
}

/// What the aim line should show for the current drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimPreview {
    pub launch_vector: Vector3<f32>,
    pub power: f32,
    /// `power / power_cap`, in `0..=1`.
    pub power_fraction: f32,
}

impl AimPreview {
    pub fn from_gesture(gesture: &DragGesture, tuning: &LaunchTuning) -> Self {
        let power = launch_power(gesture.start, gesture.current, tuning);
        let power_fraction = if tuning.power_cap > 0.0 {
            (power / tuning.power_cap).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            launch_vector: launch_vector(gesture.start, gesture.current, tuning),
            power,
            power_fraction,
        }
    }
}

/// Drives [`DragGesture`] from pointer events.
#[derive(Debug, Default)]
pub struct AimInputController {
    gesture: DragGesture,
}

impl AimInputController {
    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.active
    }

    /// Start a drag at `position` if the character is aiming. Returns whether a drag started.
    pub fn pointer_down<H: Copy>(
        &mut self,
        position: Vector2<f32>,
        character: &CharacterController<H>,
    ) -> bool {
        if !character.begin_aim() {
            self.gesture.active = false;
            return false;
        }

        self.gesture = DragGesture {
            active: true,
            start: position,
            current: position,
        };
        true
    }

    /// Track the pointer during a drag. `None` when no drag is in progress.
    pub fn pointer_move(
        &mut self,
        position: Vector2<f32>,
        tuning: &LaunchTuning,
    ) -> Option<AimPreview> {
        if !self.gesture.active {
            return None;
        }
        self.gesture.current = position;
        Some(AimPreview::from_gesture(&self.gesture, tuning))
    }

    /// Finish a drag at `position` and launch if still aiming.
    ///
    /// Returns the launch vector when a launch was issued. The gesture ends either way.
    pub fn pointer_up<B: PhysicsBackend>(
        &mut self,
        position: Vector2<f32>,
        character: &mut CharacterController<B::Body>,
        backend: &mut B,
        tuning: &LaunchTuning,
    ) -> Option<Vector3<f32>> {
        if !self.gesture.active {
            return None;
        }
        self.gesture.current = position;

        let mut launched = None;
        if character.begin_aim() {
            let vector = launch_vector(self.gesture.start, self.gesture.current, tuning);
            if character.launch(backend, vector, tuning) {
                launched = Some(vector);
            }
        }

        self.gesture.active = false;
        launched
    }

    /// Drop any in-progress drag.
    pub fn cancel(&mut self) {
        self.gesture.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterSpec, CharacterState};
    use crate::testing::RecordingBackend;

    fn setup() -> (RecordingBackend, CharacterController<usize>, AimInputController) {
        let mut backend = RecordingBackend::default();
        let character = CharacterController::initialize(
            &mut backend,
            Vector3::new(0.0, 0.6, 0.0),
            &CharacterSpec::default(),
        );
        (backend, character, AimInputController::default())
    }

    fn p(x: f32, y: f32) -> Vector2<f32> {
        Vector2::new(x, y)
    }

    #[test]
    fn drag_and_release_launches_with_reference_vector() {
        let (mut backend, mut character, mut aim) = setup();
        let tuning = LaunchTuning::default();

        assert!(aim.pointer_down(p(500.0, 500.0), &character));
        assert!(aim.is_dragging());

        let preview = aim
            .pointer_move(p(500.0, 400.0), &tuning)
            .expect("dragging");
        assert!((preview.power - 5.0).abs() < 1.0e-5);
        assert!((preview.power_fraction - 0.25).abs() < 1.0e-5);

        let vector = aim
            .pointer_up(p(500.0, 400.0), &mut character, &mut backend, &tuning)
            .expect("launched");
        assert!((vector - Vector3::new(0.0, 7.5, -1.5)).norm() < 1.0e-5);
        assert!(!aim.is_dragging());
        assert_eq!(character.state(), CharacterState::Launched);

        let body = backend.body(character.body());
        assert!((body.impulses[0] - Vector3::new(0.0, 15.0, -3.0)).norm() < 1.0e-5);
    }

    #[test]
    fn click_without_moving_launches_with_zero_impulse() {
        let (mut backend, mut character, mut aim) = setup();
        let tuning = LaunchTuning::default();

        aim.pointer_down(p(320.0, 240.0), &character);
        let vector = aim.pointer_up(p(320.0, 240.0), &mut character, &mut backend, &tuning);

        assert_eq!(vector, Some(Vector3::zeros()));
        assert_eq!(character.state(), CharacterState::Launched);
        assert_eq!(backend.body(character.body()).impulses, vec![Vector3::zeros()]);
    }

    #[test]
    fn pointer_down_while_launched_is_ignored() {
        let (mut backend, mut character, mut aim) = setup();
        let tuning = LaunchTuning::default();
        character.launch(&mut backend, Vector3::new(0.0, 1.0, 0.0), &tuning);

        assert!(!aim.pointer_down(p(10.0, 10.0), &character));
        assert!(!aim.is_dragging());
        assert_eq!(aim.pointer_move(p(10.0, 50.0), &tuning), None);
        assert_eq!(
            aim.pointer_up(p(10.0, 50.0), &mut character, &mut backend, &tuning),
            None
        );
        assert_eq!(backend.body(character.body()).impulses.len(), 1);
    }

    #[test]
    fn release_after_launch_elsewhere_does_not_launch_again() {
        // A drag that started while aiming, but the character got launched before release.
        let (mut backend, mut character, mut aim) = setup();
        let tuning = LaunchTuning::default();

        aim.pointer_down(p(0.0, 0.0), &character);
        character.launch(&mut backend, Vector3::zeros(), &tuning);

        assert_eq!(
            aim.pointer_up(p(0.0, 100.0), &mut character, &mut backend, &tuning),
            None
        );
        assert!(!aim.is_dragging());
        assert_eq!(backend.body(character.body()).impulses.len(), 1);
    }

    #[test]
    fn moves_without_a_drag_produce_no_preview() {
        let (_backend, _character, mut aim) = setup();
        assert_eq!(aim.pointer_move(p(1.0, 2.0), &LaunchTuning::default()), None);
        assert_eq!(aim.gesture(), &DragGesture::default());
    }

    #[test]
    fn cancel_ends_the_drag() {
        let (_backend, character, mut aim) = setup();
        aim.pointer_down(p(5.0, 5.0), &character);
        aim.cancel();
        assert!(!aim.is_dragging());
    }
}

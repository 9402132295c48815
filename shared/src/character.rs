//! The launchable character and its two-mode body protocol.
//!
//! - `Aiming`: the body is kinematic. Its pose is authoritative and only changed by us.
//! - `Launched`: the body is dynamic and owned by the simulation.
//!
//! `Aiming -> Launched` happens at most once per run (on `launch`); only `reset` goes back.

use nalgebra::Vector3;
use serde::Deserialize;

use crate::constants::CHARACTER_RADIUS;
use crate::launch::{LaunchTuning, launch_impulse};
use crate::level::SOLID_SURFACE;
use crate::physics::{BodyKind, ColliderShape, PhysicsBackend, Pose, SurfaceMaterial};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CharacterState {
    #[default]
    Aiming,
    Launched,
}

/// Physical description of the character.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterSpec {
    /// Ball collider radius (meters).
    pub radius: f32,
    pub surface: SurfaceMaterial,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            radius: CHARACTER_RADIUS,
            surface: SOLID_SURFACE,
        }
    }
}

impl CharacterSpec {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err("Character radius must be positive");
        }
        Ok(())
    }
}

/// Owns the character's single physics handle and its [`CharacterState`].
#[derive(Debug)]
pub struct CharacterController<H> {
    body: H,
    state: CharacterState,
}

impl<H: Copy> CharacterController<H> {
    /// Create the character body at `spawn`: kinematic, at rest, `Aiming`.
    pub fn initialize<B>(backend: &mut B, spawn: Vector3<f32>, spec: &CharacterSpec) -> Self
    where
        B: PhysicsBackend<Body = H>,
    {
        let body = backend.create_body(BodyKind::Kinematic, Pose::from_translation(spawn));
        backend.attach_collider(
            body,
            ColliderShape::Ball {
                radius: spec.radius,
            },
            spec.surface,
        );

        log::debug!("Character initialized at {:?}", spawn);

        Self {
            body,
            state: CharacterState::Aiming,
        }
    }

    pub fn body(&self) -> H {
        self.body
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    /// Whether a new aim gesture may start.
    pub fn begin_aim(&self) -> bool {
        self.state == CharacterState::Aiming
    }

    /// Switch to dynamic and apply `vector * impulse_scale` once.
    ///
    /// Returns `false` (and changes nothing) when already launched.
    pub fn launch<B>(&mut self, backend: &mut B, vector: Vector3<f32>, tuning: &LaunchTuning) -> bool
    where
        B: PhysicsBackend<Body = H>,
    {
        if self.state == CharacterState::Launched {
            log::debug!("Ignoring launch: character already launched");
            return false;
        }

        let impulse = launch_impulse(vector, tuning);
        backend.set_body_kind(self.body, BodyKind::Dynamic);
        backend.apply_impulse(self.body, impulse);
        self.state = CharacterState::Launched;

        log::debug!("Character launched with impulse {:?}", impulse);
        true
    }

    /// Freeze the character at `spawn`, at rest, facing identity. Valid from any state.
    pub fn reset<B>(&mut self, backend: &mut B, spawn: Vector3<f32>)
    where
        B: PhysicsBackend<Body = H>,
    {
        // Velocities first: they can only be written while the body is still dynamic.
        backend.set_linear_velocity(self.body, Vector3::zeros());
        backend.set_angular_velocity(self.body, Vector3::zeros());
        backend.set_body_kind(self.body, BodyKind::Kinematic);
        backend.set_pose(self.body, Pose::from_translation(spawn));

        if self.state != CharacterState::Aiming {
            log::debug!("Character reset to {:?}", spawn);
        }
        self.state = CharacterState::Aiming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::RapierBackend;
    use crate::testing::RecordingBackend;
    use nalgebra::UnitQuaternion;

    fn spawn() -> Vector3<f32> {
        Vector3::new(0.0, 0.6, 0.0)
    }

    fn recording() -> (RecordingBackend, CharacterController<usize>) {
        let mut backend = RecordingBackend::default();
        let character =
            CharacterController::initialize(&mut backend, spawn(), &CharacterSpec::default());
        (backend, character)
    }

    #[test]
    fn initialize_creates_one_kinematic_body_at_spawn() {
        let (backend, character) = recording();

        assert_eq!(backend.bodies.len(), 1);
        let body = backend.body(character.body());
        assert_eq!(body.kind, BodyKind::Kinematic);
        assert_eq!(body.pose.translation, spawn());
        assert_eq!(body.linvel, Vector3::zeros());
        match body.colliders.as_slice() {
            [(ColliderShape::Ball { radius }, _)] => assert!((*radius - 0.6).abs() < 1.0e-6),
            other => panic!("unexpected colliders: {other:?}"),
        }
        assert_eq!(character.state(), CharacterState::Aiming);
        assert!(character.begin_aim());
    }

    #[test]
    fn launch_applies_scaled_impulse_once() {
        let (mut backend, mut character) = recording();
        let tuning = LaunchTuning::default();
        let vector = Vector3::new(0.0, 7.5, -1.5);

        assert!(character.launch(&mut backend, vector, &tuning));
        assert_eq!(character.state(), CharacterState::Launched);
        assert!(!character.begin_aim());

        let velocity_after_first = backend.body(character.body()).linvel;

        // Second launch without reset is a no-op.
        assert!(!character.launch(&mut backend, vector, &tuning));

        let body = backend.body(character.body());
        assert_eq!(body.kind, BodyKind::Dynamic);
        assert_eq!(body.impulses.len(), 1);
        assert!((body.impulses[0] - Vector3::new(0.0, 15.0, -3.0)).norm() < 1.0e-5);
        assert_eq!(body.linvel, velocity_after_first);
        assert_eq!(backend.bodies.len(), 1);
    }

    #[test]
    fn zero_vector_launch_still_transitions() {
        let (mut backend, mut character) = recording();

        assert!(character.launch(&mut backend, Vector3::zeros(), &LaunchTuning::default()));

        let body = backend.body(character.body());
        assert_eq!(character.state(), CharacterState::Launched);
        assert_eq!(body.kind, BodyKind::Dynamic);
        assert_eq!(body.impulses, vec![Vector3::zeros()]);
    }

    #[test]
    fn reset_from_any_state_returns_to_aiming_at_rest() {
        let (mut backend, mut character) = recording();
        let tuning = LaunchTuning::default();

        // From Aiming.
        character.reset(&mut backend, spawn());
        assert_eq!(character.state(), CharacterState::Aiming);

        // From mid-flight, displaced and spinning.
        character.launch(&mut backend, Vector3::new(1.0, 4.0, -2.0), &tuning);
        for _ in 0..10 {
            backend.step();
        }
        backend.set_angular_velocity(character.body(), Vector3::new(3.0, 0.0, 1.0));

        let elsewhere = Vector3::new(2.0, 1.0, -4.0);
        character.reset(&mut backend, elsewhere);

        let body = backend.body(character.body());
        assert_eq!(character.state(), CharacterState::Aiming);
        assert_eq!(body.kind, BodyKind::Kinematic);
        assert_eq!(body.pose.translation, elsewhere);
        assert_eq!(body.pose.rotation, UnitQuaternion::identity());
        assert_eq!(body.linvel, Vector3::zeros());
        assert_eq!(body.angvel, Vector3::zeros());
        assert_eq!(backend.bodies.len(), 1);

        // A fresh run may launch again.
        assert!(character.launch(&mut backend, Vector3::new(0.0, 1.0, 0.0), &tuning));
    }

    #[test]
    fn rapier_launch_then_reset_round_trip() {
        let mut world = RapierBackend::default();
        let tuning = LaunchTuning::default();
        let mut character =
            CharacterController::initialize(&mut world, spawn(), &CharacterSpec::default());

        assert_eq!(world.body_kind(character.body()), Some(BodyKind::Kinematic));

        character.launch(&mut world, Vector3::new(0.0, 7.5, -1.5), &tuning);
        assert_eq!(world.body_kind(character.body()), Some(BodyKind::Dynamic));

        let v = world.linear_velocity(character.body()).expect("body exists");
        assert!(v.y > 0.0 && v.z < 0.0, "velocity after launch: {v:?}");

        for _ in 0..20 {
            world.step();
        }
        let flown = world.pose(character.body()).expect("body exists");
        assert!(flown.translation.z < spawn().z);

        character.reset(&mut world, spawn());
        let pose = world.pose(character.body()).expect("body exists");
        assert_eq!(world.body_kind(character.body()), Some(BodyKind::Kinematic));
        assert!((pose.translation - spawn()).norm() < 1.0e-6);
        assert_eq!(world.linear_velocity(character.body()), Some(Vector3::zeros()));
        assert_eq!(world.angular_velocity(character.body()), Some(Vector3::zeros()));

        // A click relaunch right after reset starts from rest.
        assert!(character.launch(&mut world, Vector3::zeros(), &tuning));
        assert_eq!(world.linear_velocity(character.body()), Some(Vector3::zeros()));
        character.reset(&mut world, spawn());

        // Frozen: stepping leaves it at spawn.
        for _ in 0..10 {
            world.step();
        }
        let pose = world.pose(character.body()).expect("body exists");
        assert!((pose.translation - spawn()).norm() < 1.0e-5);
    }
}

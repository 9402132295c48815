//! Physics collaborator: a narrow backend trait plus the Rapier implementation.
//!
//! Game logic only talks to [`PhysicsBackend`]. It creates bodies, attaches one collider each,
//! flips body kinds, applies impulses and steps. Nothing outside this module touches Rapier
//! types directly, so a different engine can be dropped in by implementing the trait.
//!
//! Conventions
//! - Units are meters, seconds, kilograms.
//! - Rotation is a unit quaternion.
//! - One `step()` advances the world by `PhysicsSettings::dt`.

// Re-export Rapier so downstream crates can reach engine types without depending on
// `rapier3d` directly.
pub use rapier3d;

use std::fmt::Debug;

use rapier3d::na::{Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;
use serde::Deserialize;

use crate::constants::{GRAVITY_MPS2, PHYSICS_DT};

/// How a body participates in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable. Used for level obstacles.
    Fixed,
    /// Moved only by setting its pose. Immune to forces and contacts.
    Kinematic,
    /// Fully simulated: gravity, contacts, impulses.
    Dynamic,
}

/// World-space pose of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::identity(),
        }
    }
}

/// Contact response of a collider.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SurfaceMaterial {
    pub friction: f32,
    pub restitution: f32,
}

/// Collider shapes the game needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    /// Sphere (meters).
    Ball { radius: f32 },
    /// Box with given half-extents (meters).
    Cuboid { half_extents: Vector3<f32> },
}

/// World-wide simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Gravity vector (m/s^2).
    pub gravity: Vector3<f32>,
    /// Fixed timestep per `step()` (seconds).
    pub dt: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -GRAVITY_MPS2, 0.0),
            dt: PHYSICS_DT,
        }
    }
}

impl PhysicsSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err("Gravity must be finite");
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err("Physics timestep must be positive");
        }
        Ok(())
    }
}

/// The physics capabilities the game relies on.
///
/// Handles are only ever produced by [`PhysicsBackend::create_body`]. Getters return `None` for
/// a handle the backend does not know; setters ignore it.
pub trait PhysicsBackend {
    type Body: Copy + Eq + Debug;

    fn create_body(&mut self, kind: BodyKind, pose: Pose) -> Self::Body;
    fn attach_collider(&mut self, body: Self::Body, shape: ColliderShape, surface: SurfaceMaterial);

    fn body_kind(&self, body: Self::Body) -> Option<BodyKind>;
    /// Leaving `Dynamic` brings the body to rest.
    fn set_body_kind(&mut self, body: Self::Body, kind: BodyKind);

    fn pose(&self, body: Self::Body) -> Option<Pose>;
    fn set_pose(&mut self, body: Self::Body, pose: Pose);

    fn linear_velocity(&self, body: Self::Body) -> Option<Vector3<f32>>;
    /// Velocity writes only affect dynamic bodies.
    fn set_linear_velocity(&mut self, body: Self::Body, velocity: Vector3<f32>);
    fn angular_velocity(&self, body: Self::Body) -> Option<Vector3<f32>>;
    fn set_angular_velocity(&mut self, body: Self::Body, velocity: Vector3<f32>);

    /// Surface of the first collider attached to `body`.
    fn surface(&self, body: Self::Body) -> Option<SurfaceMaterial>;

    /// Instantaneous change in momentum. Only affects dynamic bodies.
    fn apply_impulse(&mut self, body: Self::Body, impulse: Vector3<f32>);

    /// Advance the simulation by one timestep.
    fn step(&mut self);
}

/// Full Rapier simulation world.
///
/// This stores every set and solver Rapier needs to run `PhysicsPipeline::step`. It is built
/// once per session and lives until the session is dropped.
pub struct RapierBackend {
    pub gravity: Vector3<f32>,
    pub integration_parameters: IntegrationParameters,
    pub pipeline: PhysicsPipeline,
    pub islands: IslandManager,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl RapierBackend {
    pub fn new(settings: PhysicsSettings) -> Self {
        Self {
            gravity: settings.gravity,
            integration_parameters: IntegrationParameters {
                dt: settings.dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        let body = self.bodies.get_mut(handle);
        if body.is_none() {
            log::warn!("Unknown rigid-body handle {:?}", handle);
        }
        body
    }
}

impl Default for RapierBackend {
    fn default() -> Self {
        Self::new(PhysicsSettings::default())
    }
}

fn to_rapier_type(kind: BodyKind) -> RigidBodyType {
    match kind {
        BodyKind::Fixed => RigidBodyType::Fixed,
        BodyKind::Kinematic => RigidBodyType::KinematicPositionBased,
        BodyKind::Dynamic => RigidBodyType::Dynamic,
    }
}

fn from_rapier_type(ty: RigidBodyType) -> BodyKind {
    match ty {
        RigidBodyType::Fixed => BodyKind::Fixed,
        RigidBodyType::Dynamic => BodyKind::Dynamic,
        RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
            BodyKind::Kinematic
        }
    }
}

impl PhysicsBackend for RapierBackend {
    type Body = RigidBodyHandle;

    fn create_body(&mut self, kind: BodyKind, pose: Pose) -> RigidBodyHandle {
        let iso = Isometry::from_parts(Translation3::from(pose.translation), pose.rotation);
        // CCD keeps a fast launch from tunnelling through thin obstacles.
        let rb = RigidBodyBuilder::new(to_rapier_type(kind))
            .pose(iso)
            .ccd_enabled(kind != BodyKind::Fixed)
            .build();
        self.bodies.insert(rb)
    }

    fn attach_collider(
        &mut self,
        body: RigidBodyHandle,
        shape: ColliderShape,
        surface: SurfaceMaterial,
    ) {
        if self.body(body).is_none() {
            log::warn!("Cannot attach collider to unknown body {:?}", body);
            return;
        }

        // Collider sits at the body origin; the pose lives on the rigid-body.
        let builder = match shape {
            ColliderShape::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        };
        let collider = builder
            .friction(surface.friction)
            .restitution(surface.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        if let Some(rb) = self.bodies.get_mut(body) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
    }

    fn body_kind(&self, body: RigidBodyHandle) -> Option<BodyKind> {
        self.body(body).map(|rb| from_rapier_type(rb.body_type()))
    }

    fn set_body_kind(&mut self, body: RigidBodyHandle, kind: BodyKind) {
        let Some(rb) = self.bodies.get_mut(body) else {
            log::warn!("Cannot change kind of unknown body {:?}", body);
            return;
        };
        // Rapier ignores velocity writes on non-dynamic bodies, so clear them while we still can.
        if rb.is_dynamic() && kind != BodyKind::Dynamic {
            rb.set_linvel(Vector3::zeros(), false);
            rb.set_angvel(Vector3::zeros(), false);
        }
        rb.set_body_type(to_rapier_type(kind), true);
        // Effective mass depends on the body type; refresh it so an impulse applied right after
        // switching to dynamic is not lost.
        rb.recompute_mass_properties_from_colliders(&self.colliders);
    }

    fn pose(&self, body: RigidBodyHandle) -> Option<Pose> {
        self.body(body).map(|rb| Pose {
            translation: *rb.translation(),
            rotation: *rb.rotation(),
        })
    }

    fn set_pose(&mut self, body: RigidBodyHandle, pose: Pose) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_translation(pose.translation, true);
            rb.set_rotation(pose.rotation, true);
        }
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vector3<f32>> {
        self.body(body).map(|rb| *rb.linvel())
    }

    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vector3<f32>) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_linvel(velocity, true);
        }
    }

    fn angular_velocity(&self, body: RigidBodyHandle) -> Option<Vector3<f32>> {
        self.body(body).map(|rb| *rb.angvel())
    }

    fn set_angular_velocity(&mut self, body: RigidBodyHandle, velocity: Vector3<f32>) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_angvel(velocity, true);
        }
    }

    fn surface(&self, body: RigidBodyHandle) -> Option<SurfaceMaterial> {
        let rb = self.body(body)?;
        let collider = self.colliders.get(*rb.colliders().first()?)?;
        Some(SurfaceMaterial {
            friction: collider.friction(),
            restitution: collider.restitution(),
        })
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vector3<f32>) {
        if let Some(rb) = self.body_mut(body) {
            rb.apply_impulse(impulse, true);
        }
    }

    fn step(&mut self) {
        // Using default hooks/events (none).
        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );
    }
}

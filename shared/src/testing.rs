//! In-memory [`PhysicsBackend`] that records every call instead of simulating.
//!
//! Bodies are plain structs; `step()` only integrates dynamic bodies' linear velocity so tests
//! can tell a frame happened. Impulses are stored verbatim (unit mass), which lets tests check
//! the exact impulse the game applied. Velocity writes follow Rapier's rules: ignored unless the
//! body is dynamic, and cleared when a body leaves `Dynamic`.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Vector3;

use crate::physics::{BodyKind, ColliderShape, PhysicsBackend, Pose, SurfaceMaterial};

#[derive(Clone, Debug)]
pub struct RecordedBody {
    pub kind: BodyKind,
    pub pose: Pose,
    pub linvel: Vector3<f32>,
    pub angvel: Vector3<f32>,
    pub colliders: Vec<(ColliderShape, SurfaceMaterial)>,
    pub impulses: Vec<Vector3<f32>>,
}

/// Shared call log, so tests can interleave backend and render-sink calls.
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

#[derive(Default)]
pub struct RecordingBackend {
    pub bodies: Vec<RecordedBody>,
    pub steps: u32,
    pub log: CallLog,
}

impl RecordingBackend {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn body(&self, handle: usize) -> &RecordedBody {
        &self.bodies[handle]
    }

    /// Velocity and impulse writes only land on dynamic bodies, as in Rapier.
    fn dynamic_body_mut(&mut self, handle: usize) -> Option<&mut RecordedBody> {
        self.bodies
            .get_mut(handle)
            .filter(|b| b.kind == BodyKind::Dynamic)
    }

    fn record(&self, call: &'static str) {
        self.log.borrow_mut().push(call);
    }
}

impl PhysicsBackend for RecordingBackend {
    type Body = usize;

    fn create_body(&mut self, kind: BodyKind, pose: Pose) -> usize {
        self.record("create_body");
        self.bodies.push(RecordedBody {
            kind,
            pose,
            linvel: Vector3::zeros(),
            angvel: Vector3::zeros(),
            colliders: Vec::new(),
            impulses: Vec::new(),
        });
        self.bodies.len() - 1
    }

    fn attach_collider(&mut self, body: usize, shape: ColliderShape, surface: SurfaceMaterial) {
        self.record("attach_collider");
        if let Some(b) = self.bodies.get_mut(body) {
            b.colliders.push((shape, surface));
        }
    }

    fn body_kind(&self, body: usize) -> Option<BodyKind> {
        self.bodies.get(body).map(|b| b.kind)
    }

    fn set_body_kind(&mut self, body: usize, kind: BodyKind) {
        self.record("set_body_kind");
        if let Some(b) = self.bodies.get_mut(body) {
            if b.kind == BodyKind::Dynamic && kind != BodyKind::Dynamic {
                b.linvel = Vector3::zeros();
                b.angvel = Vector3::zeros();
            }
            b.kind = kind;
        }
    }

    fn pose(&self, body: usize) -> Option<Pose> {
        self.record("pose");
        self.bodies.get(body).map(|b| b.pose)
    }

    fn set_pose(&mut self, body: usize, pose: Pose) {
        self.record("set_pose");
        if let Some(b) = self.bodies.get_mut(body) {
            b.pose = pose;
        }
    }

    fn linear_velocity(&self, body: usize) -> Option<Vector3<f32>> {
        self.bodies.get(body).map(|b| b.linvel)
    }

    fn set_linear_velocity(&mut self, body: usize, velocity: Vector3<f32>) {
        if let Some(b) = self.dynamic_body_mut(body) {
            b.linvel = velocity;
        }
    }

    fn angular_velocity(&self, body: usize) -> Option<Vector3<f32>> {
        self.bodies.get(body).map(|b| b.angvel)
    }

    fn set_angular_velocity(&mut self, body: usize, velocity: Vector3<f32>) {
        if let Some(b) = self.dynamic_body_mut(body) {
            b.angvel = velocity;
        }
    }

    fn surface(&self, body: usize) -> Option<SurfaceMaterial> {
        self.bodies
            .get(body)
            .and_then(|b| b.colliders.first())
            .map(|(_, surface)| *surface)
    }

    fn apply_impulse(&mut self, body: usize, impulse: Vector3<f32>) {
        self.record("apply_impulse");
        if let Some(b) = self.dynamic_body_mut(body) {
            b.impulses.push(impulse);
            b.linvel += impulse;
        }
    }

    fn step(&mut self) {
        self.record("step");
        self.steps += 1;
        for b in self.bodies.iter_mut().filter(|b| b.kind == BodyKind::Dynamic) {
            b.pose.translation += b.linvel / 60.0;
        }
    }
}

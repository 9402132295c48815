use crate::level::ObstacleSpec;
use crate::physics::{BodyKind, PhysicsBackend};

/// A level obstacle after loading: its immutable spec and the fixed body created for it.
///
/// Renderers spawn exactly one primitive per `LoadedObstacle`.
#[derive(Clone, Debug)]
pub struct LoadedObstacle<H> {
    pub spec: ObstacleSpec,
    pub body: H,
}

/// Create one fixed body + collider per spec.
///
/// Specs are independent; none references another. Callers validate specs beforehand
/// (see [`crate::config::GameConfig::validate`]). Runs once per level activation.
pub fn load_level<B: PhysicsBackend>(
    backend: &mut B,
    specs: &[ObstacleSpec],
) -> Vec<LoadedObstacle<B::Body>> {
    let loaded: Vec<_> = specs
        .iter()
        .map(|spec| {
            let body = backend.create_body(BodyKind::Fixed, spec.pose());
            backend.attach_collider(body, spec.collider_shape(), spec.surface());
            LoadedObstacle {
                spec: spec.clone(),
                body,
            }
        })
        .collect();

    log::info!("Loaded level with {} obstacles", loaded.len());
    loaded
}

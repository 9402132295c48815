pub mod aim;
pub mod character;
pub mod config;
pub mod constants;
pub mod launch;
pub mod level;
pub mod obstacles;
pub mod physics;
pub mod session;

#[cfg(test)]
mod testing;

pub use aim::{AimInputController, AimPreview, DragGesture};
pub use character::{CharacterController, CharacterSpec, CharacterState};
pub use config::GameConfig;
pub use constants::{CHARACTER_RADIUS, DEFAULT_SPAWN, PHYSICS_DT};
pub use launch::{LaunchTuning, drag_delta, launch_impulse, launch_power, launch_vector};
pub use level::{BOUNCY_SURFACE, ObstacleShape, ObstacleSpec, SOLID_SURFACE, default_obstacles};
pub use obstacles::{LoadedObstacle, load_level};
pub use physics::{
    BodyKind, ColliderShape, PhysicsBackend, PhysicsSettings, Pose, RapierBackend,
    SurfaceMaterial,
};
pub use session::{AimFeedback, GameSession, InputEvent, RenderSink};

/// Multiplier from drag length (pixels) to launch power.
pub const K_POWER: f32 = 0.05;

/// Upper bound on launch power. Power saturates here no matter how long the drag is.
pub const POWER_CAP: f32 = 20.0;

/// Multiplier applied to the raw drag delta for the lateral (X) and vertical (Y) components.
pub const K_LATERAL: f32 = 0.05;

/// Share of launch power converted into upward lift (+Y).
pub const K_LIFT: f32 = 0.5;

/// Share of launch power converted into forward travel (-Z, away from the camera).
pub const K_FORWARD: f32 = 0.3;

/// Extra scale applied to the launch vector when it is turned into an impulse.
///
/// Kept separate from the vector constants so the aim preview and the applied impulse can be
/// tuned independently.
pub const IMPULSE_SCALE: f32 = 2.0;

/// Radius of the character's ball collider (meters).
pub const CHARACTER_RADIUS: f32 = 0.6;

/// Default spawn point. The character rests on the ground plane at `y = 0`.
pub const DEFAULT_SPAWN: [f32; 3] = [0.0, CHARACTER_RADIUS, 0.0];

/// Gravity along -Y in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Physics timestep in seconds. One step is taken per rendered frame.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Restitution for obstacles flagged as bouncy. Values above 1 add energy on contact.
pub const BOUNCY_RESTITUTION: f32 = 1.2;
pub const BOUNCY_FRICTION: f32 = 0.1;

/// Restitution/friction for ordinary obstacles (and the character itself).
pub const SOLID_RESTITUTION: f32 = 0.3;
pub const SOLID_FRICTION: f32 = 0.5;

/// Side length of the square ground slab in the built-in level (meters).
pub const GROUND_SIZE: f32 = 50.0;

/// Thickness of the ground slab (meters). Its top face sits at `y = 0`.
pub const GROUND_THICKNESS: f32 = 0.1;

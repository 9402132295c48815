//! One level's worth of game state, and the per-frame simulation loop.
//!
//! A [`GameSession`] is built once when a level starts and dropped when it ends. It owns the
//! physics world, the character, the loaded obstacles and the aim gesture. Input arrives as
//! [`InputEvent`]s, each handled to completion before the next. Once per rendered frame the host
//! calls [`GameSession::advance_frame`], which always runs:
//!
//! 1. one physics step,
//! 2. read the character's post-step pose,
//! 3. hand that pose to the renderer,
//! 4. request a frame.

use nalgebra::{Vector2, Vector3};

use crate::aim::{AimInputController, AimPreview};
use crate::character::{CharacterController, CharacterState};
use crate::config::GameConfig;
use crate::launch::LaunchTuning;
use crate::obstacles::{LoadedObstacle, load_level};
use crate::physics::{PhysicsBackend, Pose, RapierBackend};

/// Input the session understands. Pointer positions are window pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(Vector2<f32>),
    PointerMove(Vector2<f32>),
    PointerUp(Vector2<f32>),
    Reset,
}

/// Render collaborator as seen by the simulation loop.
pub trait RenderSink {
    /// Place the character's render representation at `pose`.
    fn present_character(&mut self, pose: Pose);
    /// Ask for the frame to be drawn.
    fn request_frame(&mut self);
}

/// Aim line data: where the character is and where the current drag would send it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimFeedback {
    pub origin: Vector3<f32>,
    pub preview: AimPreview,
}

pub struct GameSession<B: PhysicsBackend = RapierBackend> {
    backend: B,
    character: CharacterController<B::Body>,
    aim: AimInputController,
    obstacles: Vec<LoadedObstacle<B::Body>>,
    spawn: Vector3<f32>,
    character_radius: f32,
    tuning: LaunchTuning,
    aim_feedback: Option<AimFeedback>,
    frame: u64,
}

impl GameSession<RapierBackend> {
    /// Session backed by a fresh Rapier world configured from `config.physics`.
    pub fn with_rapier(config: &GameConfig) -> Self {
        Self::new(RapierBackend::new(config.physics), config)
    }
}

impl<B: PhysicsBackend> GameSession<B> {
    /// Load the level and place the character at the spawn point.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(mut backend: B, config: &GameConfig) -> Self {
        let obstacles = load_level(&mut backend, &config.obstacles);
        let character = CharacterController::initialize(&mut backend, config.spawn, &config.character);

        log::info!(
            "Session started: spawn {:?}, {} obstacles",
            config.spawn,
            obstacles.len()
        );

        Self {
            backend,
            character,
            aim: AimInputController::default(),
            obstacles,
            spawn: config.spawn,
            character_radius: config.character.radius,
            tuning: config.tuning,
            aim_feedback: None,
            frame: 0,
        }
    }

    /// Apply one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(position) => {
                if self.aim.pointer_down(position, &self.character) {
                    self.refresh_feedback(AimPreview::from_gesture(self.aim.gesture(), &self.tuning));
                }
            }
            InputEvent::PointerMove(position) => {
                if let Some(preview) = self.aim.pointer_move(position, &self.tuning) {
                    self.refresh_feedback(preview);
                }
            }
            InputEvent::PointerUp(position) => {
                self.aim.pointer_up(
                    position,
                    &mut self.character,
                    &mut self.backend,
                    &self.tuning,
                );
                self.aim_feedback = None;
            }
            InputEvent::Reset => self.reset(),
        }
    }

    /// Apply events in order.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Return the character to the spawn point and cancel any drag.
    pub fn reset(&mut self) {
        self.character.reset(&mut self.backend, self.spawn);
        self.aim.cancel();
        self.aim_feedback = None;
    }

    /// Run one frame of the simulation loop. Returns the pose handed to the renderer.
    pub fn advance_frame<R: RenderSink>(&mut self, sink: &mut R) -> Pose {
        self.backend.step();
        self.frame += 1;

        let pose = self.character_pose();
        sink.present_character(pose);
        sink.request_frame();
        pose
    }

    /// Current pose of the character body. Falls back to the spawn point if the body is missing.
    pub fn character_pose(&self) -> Pose {
        self.backend
            .pose(self.character.body())
            .unwrap_or_else(|| Pose::from_translation(self.spawn))
    }

    pub fn character_state(&self) -> CharacterState {
        self.character.state()
    }

    pub fn character_velocity(&self) -> Vector3<f32> {
        self.backend
            .linear_velocity(self.character.body())
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn character_radius(&self) -> f32 {
        self.character_radius
    }

    pub fn character(&self) -> &CharacterController<B::Body> {
        &self.character
    }

    pub fn aim(&self) -> &AimInputController {
        &self.aim
    }

    pub fn aim_feedback(&self) -> Option<&AimFeedback> {
        self.aim_feedback.as_ref()
    }

    pub fn obstacles(&self) -> &[LoadedObstacle<B::Body>] {
        &self.obstacles
    }

    pub fn spawn(&self) -> Vector3<f32> {
        self.spawn
    }

    pub fn tuning(&self) -> &LaunchTuning {
        &self.tuning
    }

    /// Frames advanced since the session started.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn refresh_feedback(&mut self, preview: AimPreview) {
        self.aim_feedback = Some(AimFeedback {
            origin: self.character_pose().translation,
            preview,
        });
    }
}

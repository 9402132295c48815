//! Level loading and the session resource.

use std::path::Path;

use anyhow::{Context, anyhow};
use bevy::prelude::*;
use shared::{GameConfig, GameSession};

/// Environment variable naming an optional JSON level file.
pub const LEVEL_ENV: &str = "FLING_LEVEL";

/// The running game. Built once at startup from the active [`GameConfig`].
#[derive(Resource)]
pub struct Session(pub GameSession);

pub(super) fn plugin(app: &mut App) {
    let config = load_config();
    app.insert_resource(Session(GameSession::with_rapier(&config)));
}

fn load_config() -> GameConfig {
    let Ok(path) = std::env::var(LEVEL_ENV) else {
        info!("{LEVEL_ENV} not set, using the built-in level");
        return GameConfig::default();
    };

    match read_level(Path::new(&path)) {
        Ok(config) => {
            info!("Loaded level from {path}");
            config
        }
        Err(err) => {
            error!("{err:#}; falling back to the built-in level");
            GameConfig::default()
        }
    }
}

fn read_level(path: &Path) -> anyhow::Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading level file {}", path.display()))?;
    parse_level(&text).with_context(|| format!("loading level file {}", path.display()))
}

fn parse_level(text: &str) -> anyhow::Result<GameConfig> {
    let config = GameConfig::from_json(text).context("parsing level JSON")?;
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

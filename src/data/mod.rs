//! Data layer: fills the input resources while the scene mounts.
//!
//! This plugin runs in OnEnter(SceneState::Mounting), reads the garden
//! config (RON), today's productivity snapshot (JSON) and the latest weather
//! report (JSON), publishes them as resources, then transitions the scene
//! into SceneState::Running.
//!
//! Nothing here is fatal. A missing file means "not provided"; a broken one
//! is logged and replaced with its default, so the scene always mounts.

pub mod files;

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use chrono::Local;

use crate::shared::*;
use files::{load_config, load_snapshot, load_weather, LoadError};

pub const DEFAULT_CONFIG_PATH: &str = "assets/garden.ron";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DataPaths>()
            .add_systems(OnEnter(SceneState::Mounting), load_all_data);
    }
}

/// Where the mount phase looks for its config file.
#[derive(Resource, Debug, Clone)]
pub struct DataPaths {
    pub config: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

/// Collapse a load result into a value, logging why a default was used.
fn or_default<T: Default>(what: &str, result: Result<Option<T>, LoadError>) -> T {
    match result {
        Ok(Some(value)) => value,
        Ok(None) => {
            info!("[Data] No {} provided; using defaults", what);
            T::default()
        }
        Err(e) => {
            warn!("[Data] {}; using defaults", e);
            T::default()
        }
    }
}

fn optional_path(path: &Option<String>) -> Option<&Path> {
    path.as_deref().map(Path::new)
}

pub fn load_all_data(
    paths: Res<DataPaths>,
    mut commands: Commands,
    mut overrides: ResMut<EnvironmentOverrides>,
    mut next_state: ResMut<NextState<SceneState>>,
) {
    info!("[Data] Mounting garden…");

    let config: GardenConfig = or_default("garden config", load_config(&paths.config));

    let snapshot = match optional_path(&config.snapshot_path) {
        Some(path) => or_default("productivity snapshot", load_snapshot(path)),
        None => ProductivitySnapshot::default(),
    };
    let today = Local::now().date_naive();
    let snapshot = snapshot.for_day(today, &Local);
    info!(
        "  Today: {} tasks, {} sessions, streak {}",
        snapshot.tasks.len(),
        snapshot.sessions.len(),
        snapshot.streak
    );

    let weather = match optional_path(&config.weather_path) {
        Some(path) => match load_weather(path) {
            Ok(report) => report,
            Err(e) => {
                warn!("[Data] {}; falling back to calendar and clock", e);
                None
            }
        },
        None => None,
    };
    if weather.is_none() {
        info!("  No weather report; environment uses calendar and clock only");
    }

    overrides.dark_theme = config.dark_theme;
    commands.insert_resource(EnvironmentInput {
        weather,
        latitude: config.latitude,
    });
    commands.insert_resource(snapshot);
    commands.insert_resource(config);

    info!("[Data] Mounted. Starting frame loop.");
    next_state.set(SceneState::Running);
}

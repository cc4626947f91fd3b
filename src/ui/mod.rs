//! Host chrome around the garden.
//!
//! Responsible for:
//! - The label strip (season, time of day, temperature) and a key hint line
//! - Keyboard controls for the live overrides, the seed trigger and unmount

pub mod controls;
pub mod hud;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(controls::ControlsPlugin)
            .add_systems(OnEnter(SceneState::Running), hud::spawn_hud)
            .add_systems(OnEnter(SceneState::Unmounted), hud::despawn_hud)
            .add_systems(
                Update,
                hud::update_labels
                    .in_set(GardenSet::Draw)
                    .run_if(in_state(SceneState::Running)),
            );
    }
}

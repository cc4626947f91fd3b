//! Garden domain: the plant population and its per-frame growth.
//!
//! Responsible for:
//! - Regenerating the plant list wholesale when the productivity snapshot
//!   or the resolved season changes (never on time-of-day, weather, theme
//!   or resize)
//! - Advancing growth in place every frame
//! - Clearing the list on teardown

pub mod generator;
pub mod growth;
pub mod seeded;

use bevy::prelude::*;

use crate::shared::*;
use generator::{generate, GeneratorLimits};

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Garden>()
            .init_resource::<ProductivitySnapshot>()
            .add_systems(
                Update,
                regenerate_garden
                    .in_set(GardenSet::Regenerate)
                    .run_if(in_state(SceneState::Running)),
            )
            .add_systems(
                Update,
                grow_plants
                    .in_set(GardenSet::Simulate)
                    .run_if(in_state(SceneState::Running)),
            )
            .add_systems(OnEnter(SceneState::Unmounted), clear_garden);
    }
}

/// Only the snapshot and the season feed the layout. Compared by value, so
/// a write of identical data is not a change.
pub fn needs_regeneration(garden: &Garden, snapshot: &ProductivitySnapshot, season: Season) -> bool {
    garden.source.as_ref() != Some(snapshot) || garden.season != Some(season)
}

/// Swap in a freshly generated list. Growth restarts from the new list's
/// own delays, counted from `frame`.
pub fn replant(
    garden: &mut Garden,
    snapshot: &ProductivitySnapshot,
    season: Season,
    limits: &GeneratorLimits,
    frame: u64,
) {
    garden.plants = generate(snapshot, seeded::root_seed(snapshot.streak), season, limits);
    garden.generation = garden.generation.wrapping_add(1);
    garden.season = Some(season);
    garden.source = Some(snapshot.clone());
    garden.planted_at = frame;
}

/// Advance every plant one frame.
pub fn grow_all(garden: &mut Garden, frame: u64, step: f32) {
    let since = frame.saturating_sub(garden.planted_at);
    for plant in garden.plants.iter_mut() {
        growth::advance_growth(plant, since, step);
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

pub fn regenerate_garden(
    snapshot: Res<ProductivitySnapshot>,
    env: Res<ResolvedEnvironment>,
    config: Res<GardenConfig>,
    render_state: Res<RenderState>,
    mut garden: ResMut<Garden>,
) {
    let season = env.0.season;
    if !needs_regeneration(&garden, &snapshot, season) {
        return;
    }

    replant(
        &mut garden,
        &snapshot,
        season,
        &GeneratorLimits::from(config.as_ref()),
        render_state.frame,
    );
    info!(
        "[Garden] Planted {} plants for {:?} (tasks={}, sessions={}, streak={}, generation {})",
        garden.plants.len(),
        season,
        snapshot.tasks.len(),
        snapshot.sessions.len(),
        snapshot.streak,
        garden.generation
    );
}

pub fn grow_plants(
    config: Res<GardenConfig>,
    render_state: Res<RenderState>,
    mut garden: ResMut<Garden>,
) {
    grow_all(&mut garden, render_state.frame, config.growth_step);
}

fn clear_garden(mut garden: ResMut<Garden>) {
    garden.plants = Vec::new();
    garden.season = None;
    garden.source = None;
    info!("[Garden] Cleared");
}

//! Render domain: the frame loop and the layered scene.
//!
//! Responsible for:
//! - Ordering the per-frame stages (resolve, regenerate, simulate, draw)
//! - The frame counter and drawing-surface tracking
//! - Drawing, back to front: sky gradient, sun or moon, two hills, plants
//!   in depth order, particles
//! - Tearing the scene down on unmount
//!
//! `SceneLoopPlugin` holds everything the simulation needs and runs
//! headless. `RenderPlugin` adds the meshes and sprites on top and needs
//! the full render stack.

pub mod celestial;
pub mod mesh;
pub mod particles;
pub mod plants;
pub mod sky;
pub mod terrain;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

/// Anything spawned for the running scene. Despawned on unmount.
#[derive(Component, Debug, Default)]
pub struct SceneEntity;

// ═══════════════════════════════════════════════════════════════════════
// FRAME LOOP
// ═══════════════════════════════════════════════════════════════════════

pub struct SceneLoopPlugin;

impl Plugin for SceneLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>()
            .init_resource::<DrawingSurface>()
            .configure_sets(
                Update,
                (
                    GardenSet::Resolve,
                    GardenSet::Regenerate,
                    GardenSet::Simulate,
                    GardenSet::Draw,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (advance_frame, track_surface)
                    .in_set(GardenSet::Resolve)
                    .run_if(in_state(SceneState::Running)),
            )
            .add_systems(
                Update,
                handle_unmount_request.run_if(in_state(SceneState::Running)),
            )
            .add_systems(OnEnter(SceneState::Unmounted), reset_render_state);
    }
}

pub fn advance_frame(mut render_state: ResMut<RenderState>) {
    render_state.frame = render_state.frame.wrapping_add(1);
}

/// Mirror the primary window into `DrawingSurface`. Writes only on an
/// actual change, so resizes never look like a content change.
pub fn track_surface(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<DrawingSurface>,
    mut warned: Local<bool>,
) {
    let Ok(window) = windows.get_single() else {
        if !*warned {
            warn!("[Render] No primary window; keeping surface at {}x{}", surface.width, surface.height);
            *warned = true;
        }
        return;
    };

    // Minimised windows report zero; keep the last real size.
    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let next = DrawingSurface {
        width: window.width(),
        height: window.height(),
        scale_factor: window.scale_factor(),
    };
    if surface.set_if_neq(next) {
        let px = next.physical_size();
        info!(
            "[Render] Surface {}x{} ({}x{} physical)",
            next.width, next.height, px.x, px.y
        );
    }
}

fn handle_unmount_request(
    mut events: EventReader<UnmountRequested>,
    mut next_state: ResMut<NextState<SceneState>>,
) {
    if events.read().next().is_some() {
        info!("[Render] Unmount requested");
        next_state.set(SceneState::Unmounted);
    }
}

fn reset_render_state(mut render_state: ResMut<RenderState>) {
    *render_state = RenderState::default();
}

// ═══════════════════════════════════════════════════════════════════════
// DRAWING
// ═══════════════════════════════════════════════════════════════════════

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SceneState::Running),
            (sky::spawn_sky, celestial::spawn_celestial, terrain::spawn_hills),
        )
        .add_systems(
            Update,
            (
                sky::update_sky,
                celestial::update_celestial,
                terrain::update_hills,
                (plants::rebuild_plants, plants::pose_plants).chain(),
                particles::sync_particle_sprites,
            )
                .in_set(GardenSet::Draw)
                .run_if(in_state(SceneState::Running)),
        )
        .add_systems(OnEnter(SceneState::Unmounted), despawn_scene);
    }
}

/// Surface-relative size multiplier; art is authored for the default height.
pub fn art_scale(surface: &DrawingSurface) -> f32 {
    surface.height / SCREEN_HEIGHT
}

fn despawn_scene(mut commands: Commands, query: Query<Entity, With<SceneEntity>>) {
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    info!("[Render] Scene torn down ({} entities)", count);
}

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use focus_garden::shared::*;
use focus_garden::{data, environment, garden, particles, render, sprites, ui};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Focus Garden".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Scene lifecycle
        .init_state::<SceneState>()
        // Shared resources
        .init_resource::<GardenConfig>()
        .init_resource::<ProductivitySnapshot>()
        .init_resource::<EnvironmentOverrides>()
        // Events
        .add_event::<PlantSeedRequested>()
        .add_event::<UnmountRequested>()
        // Domain plugins
        .add_plugins(render::SceneLoopPlugin)
        .add_plugins(environment::EnvironmentPlugin)
        .add_plugins(garden::GardenPlugin)
        .add_plugins(particles::ParticlePlugin)
        .add_plugins(sprites::SpriteCachePlugin)
        .add_plugins(render::RenderPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

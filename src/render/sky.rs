//! Full-surface sky gradient.

use bevy::prelude::*;

use super::mesh::gradient_quad;
use super::SceneEntity;
use crate::environment::palette::{sky_palette, SkyPalette};
use crate::shared::*;

#[derive(Component, Debug)]
pub struct SkyLayer;

fn sky_mesh(palette: SkyPalette, surface: &DrawingSurface) -> Mesh {
    gradient_quad(
        Vec2::new(surface.width, surface.height),
        palette.top.to_color(),
        palette.bottom.to_color(),
    )
}

pub fn spawn_sky(
    mut commands: Commands,
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        SceneEntity,
        SkyLayer,
        Mesh2d(meshes.add(sky_mesh(sky_palette(&env.0), &surface))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::WHITE))),
        Transform::from_xyz(0.0, 0.0, Z_SKY),
    ));
}

/// Rebuild the gradient only when its colours or the surface change.
pub fn update_sky(
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    query: Query<&Mesh2d, With<SkyLayer>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut last: Local<Option<(SkyPalette, DrawingSurface)>>,
) {
    let key = (sky_palette(&env.0), *surface);
    if *last == Some(key) {
        return;
    }
    for handle in &query {
        if let Some(mesh) = meshes.get_mut(&handle.0) {
            *mesh = sky_mesh(key.0, &surface);
        }
    }
    *last = Some(key);
}

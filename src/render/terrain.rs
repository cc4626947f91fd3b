//! Back and front hills, each a filled cubic Bezier ridge.

use bevy::prelude::*;

use super::mesh::ridge_fill;
use super::SceneEntity;
use crate::environment::palette::{hill_palette, HillPalette};
use crate::shared::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HillLayer {
    Back,
    Front,
}

impl HillLayer {
    /// Ridge control points as fractions of the surface (y down).
    fn ridge(self) -> [Vec2; 4] {
        match self {
            HillLayer::Back => [
                Vec2::new(0.0, 0.60),
                Vec2::new(0.28, 0.46),
                Vec2::new(0.62, 0.60),
                Vec2::new(1.0, 0.52),
            ],
            HillLayer::Front => [
                Vec2::new(0.0, 0.74),
                Vec2::new(0.36, 0.60),
                Vec2::new(0.70, 0.72),
                Vec2::new(1.0, 0.66),
            ],
        }
    }

    fn z(self) -> f32 {
        match self {
            HillLayer::Back => Z_HILL_BACK,
            HillLayer::Front => Z_HILL_FRONT,
        }
    }

    fn color(self, palette: HillPalette) -> Color {
        match self {
            HillLayer::Back => palette.back.to_color(),
            HillLayer::Front => palette.front.to_color(),
        }
    }
}

const RIDGE_SAMPLES: usize = 48;

fn hill_mesh(layer: HillLayer, surface: &DrawingSurface) -> Mesh {
    let size = Vec2::new(surface.width, surface.height);
    let curve = layer.ridge().map(|p| surface.to_world(p * size));
    let floor = surface.to_world(Vec2::new(0.0, surface.height)).y;
    // Vertex colour stays white; the material carries the palette colour.
    ridge_fill(curve, floor, Color::WHITE, RIDGE_SAMPLES)
}

pub fn spawn_hills(
    mut commands: Commands,
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let palette = hill_palette(env.0.time_of_day, env.0.season);
    for layer in [HillLayer::Back, HillLayer::Front] {
        commands.spawn((
            SceneEntity,
            layer,
            Mesh2d(meshes.add(hill_mesh(layer, &surface))),
            MeshMaterial2d(materials.add(ColorMaterial::from(layer.color(palette)))),
            Transform::from_xyz(0.0, 0.0, layer.z()),
        ));
    }
}

/// Geometry follows the surface; colour follows season and time of day.
pub fn update_hills(
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    query: Query<(&HillLayer, &Mesh2d, &MeshMaterial2d<ColorMaterial>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut last_surface: Local<Option<DrawingSurface>>,
    mut last_palette: Local<Option<HillPalette>>,
) {
    let palette = hill_palette(env.0.time_of_day, env.0.season);
    let reshape = *last_surface != Some(*surface);
    let recolor = *last_palette != Some(palette);
    if !reshape && !recolor {
        return;
    }

    for (&layer, mesh, material) in &query {
        if reshape {
            if let Some(m) = meshes.get_mut(&mesh.0) {
                *m = hill_mesh(layer, &surface);
            }
        }
        if recolor {
            if let Some(m) = materials.get_mut(&material.0) {
                m.color = layer.color(palette);
            }
        }
    }
    *last_surface = Some(*surface);
    *last_palette = Some(palette);
}

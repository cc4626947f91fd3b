//! Plant entities. One root per plant, rebuilt whenever the garden is
//! replanted or more sprites finish loading; posed in place every frame.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::{art_scale, SceneEntity};
use crate::garden::growth::{depth_order, pose};
use crate::shared::*;
use crate::sprites::{SpriteCache, SpriteStatus};

/// Index into `Garden::plants`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlantSprite {
    pub index: usize,
}

/// Drawn height of a fully grown plant at scale 1, in surface pixels.
const FLOWER_PX: f32 = 48.0;
const TREE_PX: f32 = 140.0;

const STEM: Color = Color::srgb(0.27, 0.5, 0.24);
const TRUNK: Color = Color::srgb(0.42, 0.28, 0.16);
const FLOWER_EYE: Color = Color::srgb(0.98, 0.84, 0.3);

fn plant_height(kind: PlantKind) -> f32 {
    match kind {
        PlantKind::Flower => FLOWER_PX,
        PlantKind::Tree => TREE_PX,
    }
}

/// Replace every plant root when the list or the loaded sprite set changes.
pub fn rebuild_plants(
    mut commands: Commands,
    garden: Res<Garden>,
    cache: Res<SpriteCache>,
    existing: Query<Entity, With<PlantSprite>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut last: Local<Option<(u32, usize)>>,
) {
    let key = (garden.generation, cache.count(SpriteStatus::Loaded));
    if *last == Some(key) {
        return;
    }
    *last = Some(key);

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for (index, plant) in garden.plants.iter().enumerate() {
        let height = plant_height(plant.kind);
        let mut root = commands.spawn((
            SceneEntity,
            PlantSprite { index },
            Transform::default(),
            Visibility::Hidden,
        ));

        if let Some(image) = cache.sprite(&plant.species) {
            let image = image.clone();
            root.with_children(|p| {
                p.spawn(Sprite {
                    image,
                    custom_size: Some(Vec2::splat(height)),
                    anchor: Anchor::BottomCenter,
                    ..default()
                });
            });
            continue;
        }

        // Fallback shapes until (or unless) the species sprite loads.
        let tint = materials.add(ColorMaterial::from(plant.color.to_color()));
        match plant.kind {
            PlantKind::Flower => {
                let stem_h = height * 0.7;
                let bloom = meshes.add(Circle::new(height * 0.18));
                let eye = meshes.add(Circle::new(height * 0.07));
                let eye_material = materials.add(ColorMaterial::from(FLOWER_EYE));
                root.with_children(|p| {
                    p.spawn((
                        Sprite {
                            anchor: Anchor::BottomCenter,
                            ..Sprite::from_color(STEM, Vec2::new(3.0, stem_h))
                        },
                        Transform::from_xyz(0.0, 0.0, 0.0),
                    ));
                    p.spawn((
                        Mesh2d(bloom),
                        MeshMaterial2d(tint),
                        Transform::from_xyz(0.0, stem_h, 0.001),
                    ));
                    p.spawn((
                        Mesh2d(eye),
                        MeshMaterial2d(eye_material),
                        Transform::from_xyz(0.0, stem_h, 0.002),
                    ));
                });
            }
            PlantKind::Tree => {
                let trunk_h = height * 0.45;
                let canopy = meshes.add(Circle::new(height * 0.26));
                let lobe = meshes.add(Circle::new(height * 0.18));
                root.with_children(|p| {
                    p.spawn((
                        Sprite {
                            anchor: Anchor::BottomCenter,
                            ..Sprite::from_color(TRUNK, Vec2::new(height * 0.08, trunk_h))
                        },
                        Transform::from_xyz(0.0, 0.0, 0.0),
                    ));
                    p.spawn((
                        Mesh2d(canopy),
                        MeshMaterial2d(tint.clone()),
                        Transform::from_xyz(0.0, height * 0.62, 0.001),
                    ));
                    for dx in [-0.2, 0.2] {
                        p.spawn((
                            Mesh2d(lobe.clone()),
                            MeshMaterial2d(tint.clone()),
                            Transform::from_xyz(height * dx, height * 0.5, 0.002),
                        ));
                    }
                });
            }
        }
    }

    info!(
        "[Render] Spawned {} plants (generation {}, {} sprites loaded)",
        garden.plants.len(),
        key.0,
        key.1
    );
}

/// Sway, pulse, bob, growth scale and depth order for every plant root.
pub fn pose_plants(
    garden: Res<Garden>,
    render_state: Res<RenderState>,
    surface: Res<DrawingSurface>,
    mut query: Query<(&PlantSprite, &mut Transform, &mut Visibility)>,
) {
    let mut rank = vec![0usize; garden.plants.len()];
    for (r, &i) in depth_order(&garden.plants).iter().enumerate() {
        rank[i] = r;
    }
    let k = art_scale(&surface);

    for (sprite, mut transform, mut visibility) in &mut query {
        let Some(plant) = garden.plants.get(sprite.index) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        if plant.growth <= 0.0 {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        }

        let p = pose(plant, render_state.frame);
        let base = surface.to_world(surface.to_pixels(plant.position)) + Vec2::Y * p.bob * k;
        let z = Z_PLANT_BASE + rank[sprite.index] as f32 * Z_PLANT_STEP;

        transform.translation = base.extend(z);
        transform.rotation = Quat::from_rotation_z(p.angle);
        transform.scale = Vec3::splat(plant.scale * plant.growth * p.pulse * k);
        visibility.set_if_neq(Visibility::Inherited);
    }
}

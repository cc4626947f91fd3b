//! Sun and moon. Both are spawned once and toggled; the root sits at the
//! time-of-day anchor.

use bevy::prelude::*;

use super::mesh::{radial_disc, ray_wedges};
use super::{art_scale, SceneEntity};
use crate::environment::palette::{celestial_anchor, celestial_body, CelestialBody};
use crate::shared::*;

#[derive(Component, Debug)]
pub struct CelestialRoot;

/// Which body a child shape belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelestialPart(pub CelestialBody);

#[derive(Component, Debug)]
pub struct SunRays;

const SUN_RADIUS: f32 = 30.0;
const RAY_COUNT: usize = 12;
/// Radians per frame.
const RAY_SPIN: f32 = 0.004;
const MOON_RADIUS: f32 = 24.0;

pub fn spawn_celestial(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let white = materials.add(ColorMaterial::from(Color::WHITE));
    let rays = materials.add(ColorMaterial::from(Color::srgba(1.0, 0.9, 0.45, 0.45)));
    let glow_outer = materials.add(ColorMaterial::from(Color::srgba(0.86, 0.9, 1.0, 0.07)));
    let glow_inner = materials.add(ColorMaterial::from(Color::srgba(0.86, 0.9, 1.0, 0.12)));
    let moon = materials.add(ColorMaterial::from(Color::srgb_u8(240, 238, 226)));
    let crater = materials.add(ColorMaterial::from(Color::srgb_u8(204, 202, 190)));

    commands
        .spawn((
            SceneEntity,
            CelestialRoot,
            Transform::from_xyz(0.0, 0.0, Z_CELESTIAL),
            Visibility::Hidden,
        ))
        .with_children(|root| {
            // Sun
            root.spawn((
                CelestialPart(CelestialBody::Sun),
                SunRays,
                Mesh2d(meshes.add(ray_wedges(RAY_COUNT, SUN_RADIUS + 4.0, SUN_RADIUS * 1.9, 0.09, Color::WHITE))),
                MeshMaterial2d(rays),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ));
            root.spawn((
                CelestialPart(CelestialBody::Sun),
                Mesh2d(meshes.add(radial_disc(
                    SUN_RADIUS,
                    Color::srgb_u8(255, 250, 206),
                    Color::srgb_u8(255, 188, 64),
                    40,
                ))),
                MeshMaterial2d(white),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));

            // Moon
            for (radius, material) in [(MOON_RADIUS * 2.5, glow_outer), (MOON_RADIUS * 1.8, glow_inner)] {
                root.spawn((
                    CelestialPart(CelestialBody::Moon),
                    Mesh2d(meshes.add(Circle::new(radius))),
                    MeshMaterial2d(material),
                    Transform::from_xyz(0.0, 0.0, 0.0),
                ));
            }
            root.spawn((
                CelestialPart(CelestialBody::Moon),
                Mesh2d(meshes.add(Circle::new(MOON_RADIUS))),
                MeshMaterial2d(moon),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            for (offset, radius) in [(Vec2::new(-7.0, 5.0), 5.0), (Vec2::new(8.0, -6.0), 3.5)] {
                root.spawn((
                    CelestialPart(CelestialBody::Moon),
                    Mesh2d(meshes.add(Circle::new(radius))),
                    MeshMaterial2d(crater.clone()),
                    Transform::from_xyz(offset.x, offset.y, 0.2),
                ));
            }
        });
}

pub fn update_celestial(
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    render_state: Res<RenderState>,
    mut roots: Query<(&mut Transform, &mut Visibility), With<CelestialRoot>>,
    mut parts: Query<(&CelestialPart, &mut Visibility), Without<CelestialRoot>>,
    mut rays: Query<&mut Transform, (With<SunRays>, Without<CelestialRoot>)>,
) {
    let body = celestial_body(&env.0);

    for (mut transform, mut visibility) in &mut roots {
        let anchor = celestial_anchor(env.0.time_of_day) * Vec2::new(surface.width, surface.height);
        transform.translation = surface.to_world(anchor).extend(Z_CELESTIAL);
        transform.scale = Vec3::splat(art_scale(&surface));
        visibility.set_if_neq(if body.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }

    for (part, mut visibility) in &mut parts {
        visibility.set_if_neq(if Some(part.0) == body {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }

    if body == Some(CelestialBody::Sun) {
        let angle = (render_state.frame as f64 * RAY_SPIN as f64 % std::f64::consts::TAU) as f32;
        for mut transform in &mut rays {
            transform.rotation = Quat::from_rotation_z(angle);
        }
    }
}

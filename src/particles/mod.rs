//! Particle domain: decorative leaves, pollen, snow and rain.
//!
//! Each frame runs one probabilistic spawn attempt per particle class, moves
//! every particle by its velocity plus a shared sinusoidal drift, applies the
//! kind's own behaviour, and culls anything past the surface margin (or
//! older than the TTL backstop). Particles outlive plant regeneration; only
//! teardown clears them.

pub mod kinds;

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::*;

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParticleRng>().add_systems(
            Update,
            step_particles
                .in_set(GardenSet::Simulate)
                .run_if(in_state(SceneState::Running)),
        );
    }
}

/// Randomness for spawning. Seedable so tests can replay a run.
#[derive(Resource)]
pub struct ParticleRng(pub StdRng);

impl Default for ParticleRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN PROFILES
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame chance that a grown tree drops a leaf.
const LEAF_CHANCE: f32 = 0.04;
/// Trees must be at least this grown to shed.
const LEAF_MIN_GROWTH: f32 = 0.8;
/// Canopy height above the trunk base, surface pixels at scale 1.
pub const TREE_CANOPY_PX: f32 = 70.0;

/// One independently rolled spawn class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnProfile {
    pub kind: ParticleKind,
    pub chance: f32,
    pub color: Rgb,
}

/// Season-keyed ambient class, independent of any plant.
pub fn ambient_profile(season: Season) -> SpawnProfile {
    match season {
        Season::Spring => SpawnProfile {
            kind: ParticleKind::Leaf,
            chance: 0.05,
            color: Rgb(248, 196, 214),
        },
        Season::Summer => SpawnProfile {
            kind: ParticleKind::Pollen,
            chance: 0.06,
            color: Rgb(255, 236, 140),
        },
        Season::Autumn => SpawnProfile {
            kind: ParticleKind::Leaf,
            chance: 0.03,
            color: Rgb(214, 96, 32),
        },
        Season::Winter => SpawnProfile {
            kind: ParticleKind::Snow,
            chance: 0.12,
            color: Rgb(245, 248, 255),
        },
    }
}

/// Weather-keyed class, if the weather has one.
pub fn weather_profile(weather: WeatherCondition) -> Option<SpawnProfile> {
    match weather {
        WeatherCondition::Rain => Some(SpawnProfile {
            kind: ParticleKind::Rain,
            chance: 1.0,
            color: Rgb(150, 176, 230),
        }),
        WeatherCondition::Snow => Some(SpawnProfile {
            kind: ParticleKind::Snow,
            chance: 0.5,
            color: Rgb(255, 255, 255),
        }),
        WeatherCondition::Clear | WeatherCondition::Cloudy => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

fn leaf_at(position: Vec2, color: Rgb, source: Option<String>, rng: &mut impl Rng) -> Particle {
    Particle {
        kind: ParticleKind::Leaf,
        position,
        velocity: Vec2::new(rng.gen_range(-0.4..0.4), rng.gen_range(0.6..1.2)),
        size: rng.gen_range(6.0..10.0),
        rotation: rng.gen_range(0.0..TAU),
        spin: rng.gen_range(-0.05..0.05),
        opacity: 0.9,
        color,
        source,
        tumble_speed: rng.gen_range(0.05..0.12),
        tumble_offset: rng.gen_range(0.0..TAU),
        age: 0,
    }
}

/// Builds a particle of `profile.kind` at a spawn point suited to it.
fn ambient_particle(profile: &SpawnProfile, surface: &DrawingSurface, rng: &mut impl Rng) -> Particle {
    let x = rng.gen_range(0.0..surface.width.max(1.0));
    match profile.kind {
        ParticleKind::Leaf => leaf_at(Vec2::new(x, -10.0), profile.color, None, rng),
        ParticleKind::Pollen => Particle {
            kind: ParticleKind::Pollen,
            position: Vec2::new(x, surface.height * rng.gen_range(0.7..0.9)),
            velocity: Vec2::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.5..-0.2)),
            size: rng.gen_range(2.0..4.0),
            rotation: 0.0,
            spin: 0.0,
            opacity: kinds::POLLEN_OPACITY,
            color: profile.color,
            source: None,
            tumble_speed: 0.0,
            tumble_offset: 0.0,
            age: 0,
        },
        ParticleKind::Snow => Particle {
            kind: ParticleKind::Snow,
            position: Vec2::new(x, -6.0),
            velocity: Vec2::new(rng.gen_range(-0.3..0.3), rng.gen_range(0.5..1.1)),
            size: rng.gen_range(2.0..5.0),
            rotation: 0.0,
            spin: rng.gen_range(-0.02..0.02),
            opacity: 0.85,
            color: profile.color,
            source: None,
            tumble_speed: 0.0,
            tumble_offset: 0.0,
            age: 0,
        },
        ParticleKind::Rain => Particle {
            kind: ParticleKind::Rain,
            position: Vec2::new(x, -12.0),
            velocity: Vec2::new(-0.6, rng.gen_range(7.0..10.0)),
            size: rng.gen_range(8.0..14.0),
            rotation: 0.0,
            spin: 0.0,
            opacity: 0.6,
            color: profile.color,
            source: None,
            tumble_speed: 0.0,
            tumble_offset: 0.0,
            age: 0,
        },
    }
}

/// One spawn attempt per class: a leaf from a random grown tree, the
/// season's ambient class, and the weather's class.
pub fn spawn_particles(
    state: &mut RenderState,
    plants: &[Plant],
    env: &EnvironmentState,
    surface: &DrawingSurface,
    max_particles: usize,
    rng: &mut impl Rng,
) {
    // Leaves from trees.
    if state.particles.len() < max_particles && rng.gen::<f32>() < LEAF_CHANCE {
        let grown: Vec<&Plant> = plants
            .iter()
            .filter(|p| p.kind == PlantKind::Tree && p.growth > LEAF_MIN_GROWTH)
            .collect();
        if !grown.is_empty() {
            let tree = grown[rng.gen_range(0..grown.len())];
            let base = surface.to_pixels(tree.position);
            let canopy = base - Vec2::new(0.0, TREE_CANOPY_PX * tree.scale * 0.7);
            let jitter = Vec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-12.0..12.0));
            let leaf = leaf_at(
                canopy + jitter * tree.scale,
                tree.color,
                Some(tree.species.clone()),
                rng,
            );
            state.particles.push(leaf);
        }
    }

    let classes = [Some(ambient_profile(env.season)), weather_profile(env.weather)];
    for profile in classes.iter().flatten() {
        if state.particles.len() >= max_particles {
            break;
        }
        if rng.gen::<f32>() < profile.chance {
            let particle = ambient_particle(profile, surface, rng);
            state.particles.push(particle);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE + CULL
// ═══════════════════════════════════════════════════════════════════════

/// Shared horizontal drift keyed to the frame and the particle's height.
pub fn drift(frame: u64, y: f32) -> f32 {
    ((frame as f64 * 0.01 + y as f64 * 0.01).sin() * 0.5) as f32
}

/// Inside the surface grown by `margin` on every side.
pub fn in_bounds(position: Vec2, surface: &DrawingSurface, margin: f32) -> bool {
    position.x >= -margin
        && position.x <= surface.width + margin
        && position.y >= -margin
        && position.y <= surface.height + margin
}

/// Move every particle one frame, then drop the ones that left the surface
/// or outlived `max_age`.
pub fn update_particles(state: &mut RenderState, surface: &DrawingSurface, margin: f32, max_age: u32) {
    let frame = state.frame;
    for p in state.particles.iter_mut() {
        p.position += p.velocity;
        p.position.x += drift(frame, p.position.y);
        (kinds::behavior(p.kind).update)(p, frame);
        p.age = p.age.saturating_add(1);
    }
    state
        .particles
        .retain(|p| p.age <= max_age && in_bounds(p.position, surface, margin));
}

// ─── Systems ──────────────────────────────────────────────────────────────────

pub fn step_particles(
    mut render_state: ResMut<RenderState>,
    mut rng: ResMut<ParticleRng>,
    garden: Res<Garden>,
    env: Res<ResolvedEnvironment>,
    surface: Res<DrawingSurface>,
    config: Res<GardenConfig>,
) {
    spawn_particles(
        &mut render_state,
        &garden.plants,
        &env.0,
        &surface,
        config.max_particles,
        &mut rng.0,
    );
    update_particles(
        &mut render_state,
        &surface,
        config.particle_margin,
        config.particle_max_age_frames,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snow_at(position: Vec2) -> Particle {
        Particle {
            kind: ParticleKind::Snow,
            position,
            velocity: Vec2::new(0.0, 1.0),
            size: 3.0,
            rotation: 0.0,
            spin: 0.0,
            opacity: 0.8,
            color: Rgb(255, 255, 255),
            source: None,
            tumble_speed: 0.0,
            tumble_offset: 0.0,
            age: 0,
        }
    }

    #[test]
    fn test_particle_past_bottom_margin_is_culled_in_one_step() {
        let surface = DrawingSurface::default();
        let mut state = RenderState {
            frame: 0,
            particles: vec![
                snow_at(Vec2::new(100.0, surface.height + 49.5)),
                snow_at(Vec2::new(100.0, 200.0)),
            ],
        };
        update_particles(&mut state, &surface, 50.0, 1_000);
        assert_eq!(state.particles.len(), 1);
        assert!(state.particles[0].position.y < 300.0);
    }

    #[test]
    fn test_culling_in_every_direction() {
        let surface = DrawingSurface::default();
        let margin = 50.0;
        assert!(in_bounds(Vec2::new(-49.0, -49.0), &surface, margin));
        assert!(!in_bounds(Vec2::new(-51.0, 10.0), &surface, margin));
        assert!(!in_bounds(Vec2::new(surface.width + 51.0, 10.0), &surface, margin));
        assert!(!in_bounds(Vec2::new(10.0, -51.0), &surface, margin));
        assert!(!in_bounds(Vec2::new(10.0, surface.height + 51.0), &surface, margin));
    }

    #[test]
    fn test_ttl_backstop() {
        let surface = DrawingSurface::default();
        let mut p = snow_at(Vec2::new(100.0, 100.0));
        p.velocity = Vec2::ZERO;
        p.age = 10;
        let mut state = RenderState {
            frame: 0,
            particles: vec![p],
        };
        update_particles(&mut state, &surface, 50.0, 10);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_at_most_one_spawn_per_class_per_frame() {
        let mut rng = StdRng::seed_from_u64(7);
        let surface = DrawingSurface::default();
        let env = EnvironmentState {
            season: Season::Winter,
            weather: WeatherCondition::Rain,
            ..Default::default()
        };
        let mut tree = crate::garden::generator::generate(
            &ProductivitySnapshot::default(),
            1,
            Season::Winter,
            &Default::default(),
        );
        tree.truncate(1);
        for _ in 0..200 {
            let mut state = RenderState::default();
            spawn_particles(&mut state, &tree, &env, &surface, 300, &mut rng);
            assert!(state.particles.len() <= 3);
        }
    }

    #[test]
    fn test_leaves_come_only_from_grown_trees() {
        let mut rng = StdRng::seed_from_u64(11);
        let surface = DrawingSurface::default();
        let env = EnvironmentState {
            season: Season::Summer,
            ..Default::default()
        };
        let mut plants = crate::garden::generator::generate(
            &ProductivitySnapshot::default(),
            1,
            Season::Summer,
            &Default::default(),
        );
        for p in plants.iter_mut() {
            p.growth = 0.5;
        }
        let mut state = RenderState::default();
        for _ in 0..500 {
            spawn_particles(&mut state, &plants, &env, &surface, 10_000, &mut rng);
        }
        assert!(state.particles.iter().all(|p| p.kind != ParticleKind::Leaf));
        assert!(state.particles.iter().any(|p| p.kind == ParticleKind::Pollen));
    }

    #[test]
    fn test_shed_leaves_carry_their_tree() {
        let mut rng = StdRng::seed_from_u64(13);
        let surface = DrawingSurface::default();
        let env = EnvironmentState {
            season: Season::Summer,
            ..Default::default()
        };
        let snapshot = ProductivitySnapshot {
            sessions: (0..3)
                .map(|i| FocusSession {
                    id: format!("s{}", i),
                    started_at: chrono::Utc::now(),
                    completed: true,
                })
                .collect(),
            ..Default::default()
        };
        let mut plants = crate::garden::generator::generate(&snapshot, 1, Season::Summer, &Default::default());
        plants.retain(|p| p.kind == PlantKind::Tree);
        for p in plants.iter_mut() {
            p.growth = 1.0;
        }

        let mut state = RenderState::default();
        for _ in 0..500 {
            spawn_particles(&mut state, &plants, &env, &surface, 10_000, &mut rng);
        }
        let leaves: Vec<&Particle> = state.particles.iter().filter(|p| p.kind == ParticleKind::Leaf).collect();
        assert!(!leaves.is_empty());
        for leaf in leaves {
            let species = leaf.source.as_deref().unwrap();
            assert!(plants.iter().any(|t| t.species == species && t.color == leaf.color));
        }
        assert!(state
            .particles
            .iter()
            .filter(|p| p.kind != ParticleKind::Leaf)
            .all(|p| p.source.is_none()));
    }

    #[test]
    fn test_population_cap_is_respected() {
        let mut rng = StdRng::seed_from_u64(3);
        let surface = DrawingSurface::default();
        let env = EnvironmentState {
            season: Season::Winter,
            weather: WeatherCondition::Rain,
            ..Default::default()
        };
        let mut state = RenderState::default();
        for _ in 0..100 {
            spawn_particles(&mut state, &[], &env, &surface, 20, &mut rng);
        }
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn test_steady_state_population_is_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let surface = DrawingSurface::default();
        let env = EnvironmentState {
            season: Season::Autumn,
            weather: WeatherCondition::Snow,
            ..Default::default()
        };
        let plants = crate::garden::generator::generate(
            &ProductivitySnapshot::default(),
            1,
            Season::Autumn,
            &Default::default(),
        );
        let mut state = RenderState::default();
        for frame in 0..5_000 {
            state.frame = frame;
            spawn_particles(&mut state, &plants, &env, &surface, 10_000, &mut rng);
            update_particles(&mut state, &surface, 50.0, 1_800);
        }
        // Culling alone keeps the population in the hundreds, far from the cap.
        assert!(state.particles.len() < 1_000);
    }
}

//! Per-kind particle behaviour. The update loop stays kind-agnostic and
//! dispatches through `behavior(kind)`.

use bevy::prelude::*;

use crate::shared::*;

/// How a particle should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleLook {
    /// Drawn width and height in surface pixels.
    pub size: Vec2,
    /// Rotation in radians, counter-clockwise on screen.
    pub rotation: f32,
    pub opacity: f32,
}

pub struct ParticleBehavior {
    /// Kind-specific motion on top of the shared velocity + drift step.
    pub update: fn(&mut Particle, u64),
    pub look: fn(&Particle, u64) -> ParticleLook,
}

pub fn behavior(kind: ParticleKind) -> &'static ParticleBehavior {
    match kind {
        ParticleKind::Leaf => &LEAF,
        ParticleKind::Pollen => &POLLEN,
        ParticleKind::Snow => &SNOW,
        ParticleKind::Rain => &RAIN,
    }
}

static LEAF: ParticleBehavior = ParticleBehavior {
    update: leaf_update,
    look: leaf_look,
};

static POLLEN: ParticleBehavior = ParticleBehavior {
    update: pollen_update,
    look: round_look,
};

static SNOW: ParticleBehavior = ParticleBehavior {
    update: snow_update,
    look: round_look,
};

static RAIN: ParticleBehavior = ParticleBehavior {
    update: no_update,
    look: rain_look,
};

// ─── Leaf ─────────────────────────────────────────────────────────────────────

fn leaf_update(p: &mut Particle, _frame: u64) {
    p.rotation += p.spin;
}

/// Vertical squash from the tumble wave fakes a leaf turning over in 3D.
pub fn tumble_squash(p: &Particle, frame: u64) -> f32 {
    ((frame as f64 * p.tumble_speed as f64 + p.tumble_offset as f64).sin() as f32)
        .abs()
        .max(0.15)
}

fn leaf_look(p: &Particle, frame: u64) -> ParticleLook {
    ParticleLook {
        size: Vec2::new(p.size, p.size * 0.6 * tumble_squash(p, frame)),
        rotation: p.rotation,
        opacity: p.opacity,
    }
}

// ─── Pollen ───────────────────────────────────────────────────────────────────

/// Pollen keeps rising slowly and holds a constant low opacity.
fn pollen_update(p: &mut Particle, _frame: u64) {
    p.velocity.y = p.velocity.y.min(-0.1);
    p.opacity = POLLEN_OPACITY;
}

pub const POLLEN_OPACITY: f32 = 0.5;

// ─── Snow ─────────────────────────────────────────────────────────────────────

fn snow_update(p: &mut Particle, _frame: u64) {
    p.rotation += p.spin;
}

fn round_look(p: &Particle, _frame: u64) -> ParticleLook {
    ParticleLook {
        size: Vec2::splat(p.size),
        rotation: p.rotation,
        opacity: p.opacity,
    }
}

// ─── Rain ─────────────────────────────────────────────────────────────────────

fn no_update(_p: &mut Particle, _frame: u64) {}

/// Thin streak aligned with the direction of travel.
fn rain_look(p: &Particle, _frame: u64) -> ParticleLook {
    // Surface y points down; screen rotation is counter-clockwise.
    let lean = (-p.velocity.x).atan2(p.velocity.y.max(0.01));
    ParticleLook {
        size: Vec2::new(1.5, p.size),
        rotation: lean,
        opacity: p.opacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(kind: ParticleKind) -> Particle {
        Particle {
            kind,
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(0.0, 1.0),
            size: 8.0,
            rotation: 0.0,
            spin: 0.05,
            opacity: 0.9,
            color: Rgb(200, 100, 40),
            source: None,
            tumble_speed: 0.1,
            tumble_offset: 0.0,
            age: 0,
        }
    }

    #[test]
    fn test_leaf_squash_oscillates() {
        let p = particle(ParticleKind::Leaf);
        let heights: Vec<f32> = (0..64).map(|f| (behavior(p.kind).look)(&p, f).size.y).collect();
        let min = heights.iter().cloned().fold(f32::MAX, f32::min);
        let max = heights.iter().cloned().fold(0.0, f32::max);
        assert!(max > min * 2.0, "leaf height should visibly squash");
        assert!(min > 0.0);
    }

    #[test]
    fn test_pollen_rises_at_low_opacity() {
        let mut p = particle(ParticleKind::Pollen);
        (behavior(p.kind).update)(&mut p, 0);
        assert!(p.velocity.y < 0.0);
        assert_eq!(p.opacity, POLLEN_OPACITY);
    }

    #[test]
    fn test_leaf_spins() {
        let mut p = particle(ParticleKind::Leaf);
        (behavior(p.kind).update)(&mut p, 0);
        (behavior(p.kind).update)(&mut p, 1);
        assert!((p.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rain_is_a_vertical_streak_when_falling_straight() {
        let p = particle(ParticleKind::Rain);
        let look = (behavior(p.kind).look)(&p, 0);
        assert!(look.size.y > look.size.x);
        assert!(look.rotation.abs() < 1e-6);
    }
}

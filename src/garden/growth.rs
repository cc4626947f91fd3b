//! Growth and motion model. Pure per-frame functions, no ECS access.

use crate::shared::*;

/// Peak sway angle in radians. Trees rotate the whole canopy gently,
/// flowers swing further.
const TREE_SWAY: f32 = 0.025;
const FLOWER_SWAY: f32 = 0.09;
/// Flower bloom pulse amplitude (scale fraction) and bob height (pixels).
const FLOWER_PULSE: f32 = 0.04;
const FLOWER_BOB_PX: f32 = 1.5;
const PULSE_FREQ: f64 = 1.7;
const BOB_FREQ: f64 = 0.05;

/// Linear growth step once the plant's delay has elapsed. Growth only ever
/// moves up and stops at 1.
pub fn advance_growth(plant: &mut Plant, frames_since_planted: u64, step: f32) {
    if frames_since_planted > plant.growth_delay as u64 && plant.growth < 1.0 {
        plant.growth = (plant.growth + step).min(1.0);
    }
}

/// Per-frame animated offsets for one plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantPose {
    /// Rotation about the plant's base, radians.
    pub angle: f32,
    /// Multiplier on the drawn size.
    pub pulse: f32,
    /// Vertical offset in surface pixels (positive = up).
    pub bob: f32,
}

pub fn pose(plant: &Plant, frame: u64) -> PlantPose {
    let t = frame as f64 * plant.sway_speed as f64 + plant.sway_phase as f64;
    match plant.kind {
        PlantKind::Tree => PlantPose {
            angle: t.sin() as f32 * TREE_SWAY,
            pulse: 1.0,
            bob: 0.0,
        },
        PlantKind::Flower => PlantPose {
            angle: t.sin() as f32 * FLOWER_SWAY,
            pulse: 1.0 + (t * PULSE_FREQ).sin() as f32 * FLOWER_PULSE,
            bob: (frame as f64 * BOB_FREQ + plant.sway_phase as f64).sin() as f32 * FLOWER_BOB_PX,
        },
    }
}

/// Painter's order: indices sorted by depth (normalized y) ascending, so
/// farther plants are drawn first and nearer ones cover them.
pub fn depth_order(plants: &[Plant]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..plants.len()).collect();
    order.sort_by(|&a, &b| plants[a].position.y.total_cmp(&plants[b].position.y));
    order
}

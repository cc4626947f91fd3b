//! Plant population generator.
//!
//! Turns a day's completion snapshot into an ordered plant list:
//! one guardian tree, one flower per completed task (capped), ambient
//! fillers up to the floor, and a tree per completed focus session (capped).
//! All layout randomness derives from the root seed, so the same snapshot,
//! streak and season always produce the same garden.

use std::f32::consts::TAU;

use crate::shared::*;

use super::seeded::{seeded_index, seeded_range};

// ═══════════════════════════════════════════════════════════════════════
// SPECIES TABLES
// ═══════════════════════════════════════════════════════════════════════

/// Guardian species per season.
pub fn guardian_species(season: Season) -> (&'static str, Rgb) {
    match season {
        Season::Spring => ("cherry", Rgb(244, 170, 200)),
        Season::Summer => ("oak", Rgb(62, 140, 62)),
        Season::Autumn => ("maple", Rgb(222, 102, 40)),
        Season::Winter => ("pine", Rgb(40, 92, 64)),
    }
}

/// Flower species by (season, priority).
pub fn flower_species(season: Season, priority: Priority) -> (&'static str, Rgb) {
    match (season, priority) {
        (Season::Spring, Priority::High) => ("tulip", Rgb(220, 40, 60)),
        (Season::Spring, Priority::Medium) => ("daisy", Rgb(250, 236, 120)),
        (Season::Spring, Priority::Low) => ("crocus", Rgb(152, 102, 212)),
        (Season::Summer, Priority::High) => ("sunflower", Rgb(250, 200, 30)),
        (Season::Summer, Priority::Medium) => ("rose", Rgb(236, 92, 140)),
        (Season::Summer, Priority::Low) => ("lavender", Rgb(162, 132, 222)),
        (Season::Autumn, Priority::High) => ("marigold", Rgb(240, 130, 30)),
        (Season::Autumn, Priority::Medium) => ("chrysanthemum", Rgb(170, 40, 72)),
        (Season::Autumn, Priority::Low) => ("aster", Rgb(132, 92, 202)),
        (Season::Winter, Priority::High) => ("camellia", Rgb(200, 30, 52)),
        (Season::Winter, Priority::Medium) => ("snowdrop", Rgb(240, 244, 250)),
        (Season::Winter, Priority::Low) => ("hellebore", Rgb(182, 142, 172)),
    }
}

/// Trees grown from completed focus sessions.
fn session_tree_species(season: Season) -> &'static [(&'static str, Rgb)] {
    match season {
        Season::Spring => &[("cherry", Rgb(244, 170, 200)), ("birch", Rgb(140, 200, 96))],
        Season::Summer => &[("oak", Rgb(62, 140, 62)), ("willow", Rgb(110, 170, 80))],
        Season::Autumn => &[("maple", Rgb(222, 102, 40)), ("birch", Rgb(232, 186, 60))],
        Season::Winter => &[("pine", Rgb(40, 92, 64)), ("fir", Rgb(52, 110, 84))],
    }
}

const ALL_SEASONS: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

/// Every species key any season can emit, deduplicated. The sprite cache
/// preloads exactly this list.
pub fn all_species() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for season in ALL_SEASONS {
        let mut push = |s: &'static str| {
            if !out.contains(&s) {
                out.push(s);
            }
        };
        push(guardian_species(season).0);
        for priority in Priority::ALL {
            push(flower_species(season, priority).0);
        }
        for &(species, _) in session_tree_species(season) {
            push(species);
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════
// LAYOUT
// ═══════════════════════════════════════════════════════════════════════

/// Guardian tree anchor.
pub const GUARDIAN_POS: NormalizedPos = NormalizedPos { x: 0.16, y: 0.64 };
const GUARDIAN_SCALE: f32 = 1.6;

/// Vertical ground band for flowers.
const FLOWER_BAND_TOP: f32 = 0.74;
const FLOWER_BAND_DEPTH: f32 = 0.12;
/// Horizontal jitter around the even spacing, total width.
const FLOWER_JITTER: f32 = 0.06;

const TREE_BAND_TOP: f32 = 0.60;
const TREE_BAND_DEPTH: f32 = 0.06;

/// Limits the generator honours. Mirrors the relevant `GardenConfig` fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorLimits {
    pub max_event_flowers: usize,
    pub min_flowers: usize,
    pub max_session_trees: usize,
    pub growth_stagger_frames: u32,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        GeneratorLimits::from(&GardenConfig::default())
    }
}

impl From<&GardenConfig> for GeneratorLimits {
    fn from(config: &GardenConfig) -> Self {
        Self {
            max_event_flowers: config.max_event_flowers,
            min_flowers: config.min_flowers,
            max_session_trees: config.max_session_trees,
            growth_stagger_frames: config.growth_stagger_frames,
        }
    }
}

/// Per-plant seed: unique per emission slot under one root.
fn plant_seed(root: i64, emission: usize) -> i64 {
    root.wrapping_mul(1_000).wrapping_add(emission as i64)
}

/// Sub-value `k` of a plant seed.
fn sub(seed: i64, k: i64) -> i64 {
    seed.wrapping_mul(7).wrapping_add(k)
}

/// Accumulates plants in emission order and hands out the stagger.
struct Emitter {
    root: i64,
    stagger: u32,
    plants: Vec<Plant>,
}

impl Emitter {
    fn next_seed(&self) -> i64 {
        plant_seed(self.root, self.plants.len())
    }

    fn next_delay(&self) -> u32 {
        (self.plants.len() as u32).saturating_mul(self.stagger)
    }

    fn emit(
        &mut self,
        origin: PlantOrigin,
        (species, color): (&str, Rgb),
        position: NormalizedPos,
        scale: f32,
        seed: i64,
    ) {
        let kind = match origin {
            PlantOrigin::Guardian | PlantOrigin::Session => PlantKind::Tree,
            PlantOrigin::Task | PlantOrigin::Ambient => PlantKind::Flower,
        };
        let growth_delay = self.next_delay();
        self.plants.push(Plant {
            position,
            kind,
            origin,
            species: species.to_string(),
            color,
            scale,
            growth: 0.0,
            growth_delay,
            sway_phase: seeded_range(sub(seed, 10), 0.0, TAU),
            sway_speed: seeded_range(sub(seed, 11), 0.02, 0.04),
            seed,
        });
    }
}

/// Builds the full plant list for one snapshot.
///
/// The `count` most recently completed tasks, in completion order. Ties on
/// the timestamp fall back to the id so the pick never depends on input order.
fn newest_tasks(tasks: &[TaskCompletion], count: usize) -> Vec<&TaskCompletion> {
    let mut ordered: Vec<&TaskCompletion> = tasks.iter().collect();
    ordered.sort_by(|a, b| a.completed_at.cmp(&b.completed_at).then_with(|| a.id.cmp(&b.id)));
    let skip = ordered.len().saturating_sub(count);
    ordered.split_off(skip)
}

/// `root` is normally `seeded::root_seed(snapshot.streak)`.
pub fn generate(
    snapshot: &ProductivitySnapshot,
    root: i64,
    season: Season,
    limits: &GeneratorLimits,
) -> Vec<Plant> {
    let mut emitter = Emitter {
        root,
        stagger: limits.growth_stagger_frames,
        plants: Vec::new(),
    };

    // Guardian: fixed, fully grown, independent of any data.
    let seed = emitter.next_seed();
    emitter.emit(
        PlantOrigin::Guardian,
        guardian_species(season),
        GUARDIAN_POS,
        GUARDIAN_SCALE,
        seed,
    );
    if let Some(guardian) = emitter.plants.last_mut() {
        guardian.growth = 1.0;
        guardian.growth_delay = 0;
    }

    // One flower per completed task, evenly spread oldest to newest. The
    // cap keeps the newest, whatever order the source list arrives in.
    let count = snapshot.tasks.len().min(limits.max_event_flowers);
    let spacing = 1.0 / (count as f32 + 1.0);
    for (i, task) in newest_tasks(&snapshot.tasks, count).into_iter().enumerate() {
        let seed = emitter.next_seed();
        let x = spacing * (i as f32 + 1.0) + seeded_range(sub(seed, 1), -0.5, 0.5) * FLOWER_JITTER;
        let y = FLOWER_BAND_TOP + seeded_range(sub(seed, 2), 0.0, FLOWER_BAND_DEPTH);
        let scale = seeded_range(sub(seed, 3), 0.8, 1.2);
        emitter.emit(
            PlantOrigin::Task,
            flower_species(season, task.priority),
            NormalizedPos::new(x, y),
            scale,
            seed,
        );
    }

    // Ambient fillers so a quiet day never looks barren.
    for _ in count..limits.min_flowers {
        let seed = emitter.next_seed();
        let priority = Priority::ALL[seeded_index(sub(seed, 4), Priority::ALL.len())];
        let x = seeded_range(sub(seed, 1), 0.05, 0.95);
        let y = FLOWER_BAND_TOP + 0.02 + seeded_range(sub(seed, 2), 0.0, FLOWER_BAND_DEPTH);
        let scale = seeded_range(sub(seed, 3), 0.5, 0.7);
        emitter.emit(
            PlantOrigin::Ambient,
            flower_species(season, priority),
            NormalizedPos::new(x, y),
            scale,
            seed,
        );
    }

    // Trees for completed focus sessions.
    let trees = session_tree_species(season);
    for _ in snapshot.completed_sessions().take(limits.max_session_trees) {
        let seed = emitter.next_seed();
        let species = trees[seeded_index(sub(seed, 4), trees.len())];
        let x = seeded_range(sub(seed, 1), 0.1, 0.9);
        let y = TREE_BAND_TOP + seeded_range(sub(seed, 2), 0.0, TREE_BAND_DEPTH);
        let scale = seeded_range(sub(seed, 3), 1.1, 1.5);
        emitter.emit(
            PlantOrigin::Session,
            species,
            NormalizedPos::new(x, y),
            scale,
            seed,
        );
    }

    emitter.plants
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

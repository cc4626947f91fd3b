//! Shared components, resources, events, and states for the focus garden.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains share state through these types; the few cross-domain calls
//! go to pure helper functions (species tables, palettes, growth poses).

use bevy::prelude::*;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// SCENE STATE: mount / run / teardown
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum SceneState {
    /// Config, snapshots and sprite requests are being prepared.
    #[default]
    Mounting,
    /// The frame loop is live.
    Running,
    /// Torn down. No per-frame system runs in this state.
    Unmounted,
}

/// Per-frame ordering inside `Update`. Each stage sees the previous stage's
/// writes, so the draw stage always reads one consistent snapshot.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GardenSet {
    /// Surface size and environment resolution.
    Resolve,
    /// Wholesale plant-list replacement when its inputs changed.
    Regenerate,
    /// Growth, sway and particle physics.
    Simulate,
    /// Sync of sprites and meshes from current state.
    Draw,
}

// ═══════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }

    /// Quarter mapping from a calendar month (1-12). The southern hemisphere
    /// sits two seasons away from the northern one.
    pub fn from_month(month: u32, southern: bool) -> Self {
        let northern = match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        };
        if southern {
            northern.next().next()
        } else {
            northern
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Hour bands: [6,12) morning, [12,17) afternoon, [17,20) evening, else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=19 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeOfDay::Morning => TimeOfDay::Afternoon,
            TimeOfDay::Afternoon => TimeOfDay::Evening,
            TimeOfDay::Evening => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Morning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Rain,
    Snow,
    Cloudy,
}

/// The resolved, render-ready environment. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentState {
    pub season: Season,
    pub time_of_day: TimeOfDay,
    pub weather: WeatherCondition,
    pub is_dark: bool,
    /// Live daylight signal from the weather source, or the clock fallback.
    pub is_daytime: bool,
    pub temperature_c: Option<f32>,
}

/// Cached environment, re-resolved only when an input changes.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedEnvironment(pub EnvironmentState);

/// Report delivered by the external weather collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: WeatherCondition,
    pub is_daytime: bool,
    pub temperature_c: f32,
}

/// Latest external environment inputs. Everything here may be absent.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentInput {
    pub weather: Option<WeatherReport>,
    /// Negative latitudes flip the season quarter mapping.
    pub latitude: Option<f64>,
}

/// User-selected overrides. This is a live cell: the frame loop reads it by
/// reference every frame and never restarts when it changes.
/// `None` means "auto" (defer to the computed value).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentOverrides {
    pub season: Option<Season>,
    pub time_of_day: Option<TimeOfDay>,
    pub dark_theme: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// PRODUCTIVITY INPUT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn index(self) -> usize {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub id: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub completed: bool,
}

/// The completion events the garden grows from. Replaced wholesale by the
/// host; a change in value regenerates the plant list.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductivitySnapshot {
    #[serde(default)]
    pub tasks: Vec<TaskCompletion>,
    #[serde(default)]
    pub sessions: Vec<FocusSession>,
    #[serde(default)]
    pub streak: u32,
}

impl ProductivitySnapshot {
    /// Keep only the tasks completed and sessions started on `date`, as seen
    /// in the time zone `tz`.
    pub fn for_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Self {
        let on_day = |ts: &DateTime<Utc>| ts.with_timezone(tz).date_naive() == date;
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|t| on_day(&t.completed_at))
                .cloned()
                .collect(),
            sessions: self
                .sessions
                .iter()
                .filter(|s| on_day(&s.started_at))
                .cloned()
                .collect(),
            streak: self.streak,
        }
    }

    pub fn completed_sessions(&self) -> impl Iterator<Item = &FocusSession> {
        self.sessions.iter().filter(|s| s.completed)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GARDEN MODEL
// ═══════════════════════════════════════════════════════════════════════

/// sRGB colour stored as bytes so plants and particles stay serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.0, self.1, self.2)
    }

    pub fn with_opacity(self, opacity: f32) -> Color {
        Color::srgba_u8(self.0, self.1, self.2, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
    }
}

/// Position relative to the drawing surface, both axes in [0,1].
/// `y` grows downward, so a larger `y` is nearer the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPos {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    Flower,
    Tree,
}

/// Why a plant exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantOrigin {
    Guardian,
    Task,
    Ambient,
    Session,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub position: NormalizedPos,
    pub kind: PlantKind,
    pub origin: PlantOrigin,
    /// Key into the sprite cache.
    pub species: String,
    pub color: Rgb,
    pub scale: f32,
    /// 0 = not sprouted, 1 = fully grown.
    pub growth: f32,
    /// Frames to wait before growth begins.
    pub growth_delay: u32,
    pub sway_phase: f32,
    pub sway_speed: f32,
    pub seed: i64,
}

/// The stable plant list. Growth mutates it in place each frame; it is only
/// ever replaced as a whole.
#[derive(Resource, Debug, Clone, Default)]
pub struct Garden {
    pub plants: Vec<Plant>,
    /// Bumped on every wholesale replacement.
    pub generation: u32,
    /// Season the current list was generated for.
    pub season: Option<Season>,
    /// Snapshot the current list was generated from. Re-publishing an equal
    /// snapshot leaves the list alone.
    pub source: Option<ProductivitySnapshot>,
    /// Frame at which the current list was planted; growth delays count
    /// from here.
    pub planted_at: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// PARTICLES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Leaf,
    Pollen,
    Snow,
    Rain,
}

/// One decorative particle in surface pixel space (y grows downward).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub opacity: f32,
    pub color: Rgb,
    /// Species of the tree a leaf was shed from; `None` for sky-borne
    /// particles.
    pub source: Option<String>,
    pub tumble_speed: f32,
    pub tumble_offset: f32,
    /// Frames alive; a TTL backstop on top of bounds culling.
    pub age: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// RENDER STATE
// ═══════════════════════════════════════════════════════════════════════

/// Mutable animation state owned by the renderer and threaded explicitly
/// through the per-frame update functions.
#[derive(Resource, Debug, Clone, Default)]
pub struct RenderState {
    pub frame: u64,
    pub particles: Vec<Particle>,
}

/// Logical size of the host surface plus its device pixel ratio.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DrawingSurface {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            scale_factor: 1.0,
        }
    }
}

impl DrawingSurface {
    pub fn physical_size(&self) -> UVec2 {
        UVec2::new(
            (self.width * self.scale_factor).round() as u32,
            (self.height * self.scale_factor).round() as u32,
        )
    }

    /// Surface pixel coordinates (origin top-left, y down) to world space
    /// (origin centre, y up).
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.width * 0.5, self.height * 0.5 - point.y)
    }

    pub fn to_pixels(&self, pos: NormalizedPos) -> Vec2 {
        Vec2::new(pos.x * self.width, pos.y * self.height)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════

/// Tunables read once while mounting. Every field has a default so a
/// partial RON file is enough.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Event-derived flowers beyond this are not drawn.
    pub max_event_flowers: usize,
    /// Ambient fillers top the flower count up to this floor.
    pub min_flowers: usize,
    pub max_session_trees: usize,
    /// Growth added per frame once a plant's delay has elapsed.
    pub growth_step: f32,
    /// Delay between consecutive plants' bloom starts, in frames.
    pub growth_stagger_frames: u32,
    /// Particles further than this outside the surface are culled.
    pub particle_margin: f32,
    pub max_particles: usize,
    pub particle_max_age_frames: u32,
    pub latitude: Option<f64>,
    pub dark_theme: bool,
    pub snapshot_path: Option<String>,
    pub weather_path: Option<String>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            max_event_flowers: 12,
            min_flowers: 5,
            max_session_trees: 3,
            growth_step: 0.01,
            growth_stagger_frames: 12,
            particle_margin: 50.0,
            max_particles: 300,
            particle_max_age_frames: 1800,
            latitude: None,
            dark_theme: false,
            snapshot_path: Some(String::from("assets/today.json")),
            weather_path: Some(String::from("assets/weather.json")),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Fired by the "plant a seed" trigger. The host decides what it means;
/// the garden never creates tasks itself.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlantSeedRequested;

/// Asks the scene to tear itself down.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct UnmountRequested;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

pub const Z_SKY: f32 = 0.0;
pub const Z_CELESTIAL: f32 = 1.0;
pub const Z_HILL_BACK: f32 = 2.0;
pub const Z_HILL_FRONT: f32 = 3.0;
pub const Z_PLANT_BASE: f32 = 10.0;
pub const Z_PLANT_STEP: f32 = 0.05;
pub const Z_PARTICLES: f32 = 60.0;

//! Environment domain: turns clock, calendar, weather and overrides into
//! one cached `EnvironmentState`.
//!
//! Responsible for:
//! - Reading the wall clock (hour + month) once it actually changes
//! - Resolving season / time-of-day / weather / darkness
//! - Keeping `ResolvedEnvironment` stable between frames
//! - Producing the read-only display labels for host chrome
//!
//! The resolver never fails. With no weather report it falls back to the
//! calendar for season and the clock for time of day.

pub mod palette;

use bevy::prelude::*;
use chrono::{Datelike, Local, Timelike};

use crate::shared::*;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WallClock>()
            .init_resource::<EnvironmentInput>()
            .init_resource::<EnvironmentOverrides>()
            .init_resource::<ResolvedEnvironment>()
            .add_systems(
                Update,
                (tick_wall_clock, resolve_environment)
                    .chain()
                    .in_set(GardenSet::Resolve)
                    .run_if(in_state(SceneState::Running)),
            );
    }
}

// ─── Clock ────────────────────────────────────────────────────────────────────

/// The two clock fields the resolver depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// 0-23, local time.
    pub hour: u32,
    /// 1-12.
    pub month: u32,
}

impl ClockReading {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            hour: now.hour(),
            month: now.month(),
        }
    }

    /// Clock-only daylight guess used when no weather report exists.
    pub fn is_daytime(self) -> bool {
        (6..20).contains(&self.hour)
    }
}

/// Last observed wall-clock reading. Only marked changed when the hour or
/// month rolls over, so the resolver does not rerun every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock(pub ClockReading);

impl Default for WallClock {
    fn default() -> Self {
        Self(ClockReading::now())
    }
}

// ─── Resolution ───────────────────────────────────────────────────────────────

/// Darkness blends clock, live daylight, weather and theme preference.
///
/// Night is always dark. Evening, or any time the daylight signal says it is
/// not day, turns dark under non-clear weather or a dark theme.
pub fn compute_is_dark(
    time_of_day: TimeOfDay,
    is_daytime: bool,
    weather: WeatherCondition,
    dark_theme: bool,
) -> bool {
    let dimmed = weather != WeatherCondition::Clear || dark_theme;
    match time_of_day {
        TimeOfDay::Night => true,
        TimeOfDay::Evening => dimmed,
        TimeOfDay::Morning | TimeOfDay::Afternoon => !is_daytime && dimmed,
    }
}

/// Pure resolver. Concrete overrides win over computed values; `None`
/// overrides defer to the clock and calendar.
pub fn resolve(
    clock: ClockReading,
    input: &EnvironmentInput,
    overrides: &EnvironmentOverrides,
) -> EnvironmentState {
    let southern = input.latitude.is_some_and(|lat| lat < 0.0);
    let season = overrides
        .season
        .unwrap_or_else(|| Season::from_month(clock.month, southern));
    let time_of_day = overrides
        .time_of_day
        .unwrap_or_else(|| TimeOfDay::from_hour(clock.hour));

    let (weather, reported_daytime, temperature_c) = match input.weather {
        Some(report) => (report.condition, report.is_daytime, Some(report.temperature_c)),
        None => (WeatherCondition::Clear, clock.is_daytime(), None),
    };

    // A pinned time of day carries its own daylight; the live signal only
    // applies to the computed one.
    let is_daytime = match overrides.time_of_day {
        Some(pinned) => pinned != TimeOfDay::Night,
        None => reported_daytime,
    };

    EnvironmentState {
        season,
        time_of_day,
        weather,
        is_dark: compute_is_dark(time_of_day, is_daytime, weather, overrides.dark_theme),
        is_daytime,
        temperature_c,
    }
}

// ─── Labels ───────────────────────────────────────────────────────────────────

/// Read-only text for host-rendered chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabels {
    pub season: String,
    pub time_of_day: String,
    pub temperature: String,
}

impl DisplayLabels {
    pub fn from_state(env: &EnvironmentState) -> Self {
        Self {
            season: env.season.label().to_string(),
            time_of_day: env.time_of_day.label().to_string(),
            temperature: match env.temperature_c {
                Some(t) => format!("{:.0}°C", t),
                None => String::from("--"),
            },
        }
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn tick_wall_clock(mut clock: ResMut<WallClock>) {
    clock.set_if_neq(WallClock(ClockReading::now()));
}

/// Re-resolve only when an input moved. Identical results leave the cached
/// value untouched so downstream change detection stays quiet.
pub fn resolve_environment(
    clock: Res<WallClock>,
    input: Res<EnvironmentInput>,
    overrides: Res<EnvironmentOverrides>,
    mut resolved: ResMut<ResolvedEnvironment>,
) {
    if !(clock.is_changed() || input.is_changed() || overrides.is_changed()) {
        return;
    }

    let state = resolve(clock.0, &input, &overrides);
    if resolved.set_if_neq(ResolvedEnvironment(state)) {
        info!(
            "[Env] {:?} {:?} weather={:?} dark={}",
            state.season, state.time_of_day, state.weather, state.is_dark
        );
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(hour: u32, month: u32) -> ClockReading {
        ClockReading { hour, month }
    }

    #[test]
    fn test_time_of_day_bands() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(19), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_season_from_month_hemispheres() {
        assert_eq!(Season::from_month(4, false), Season::Spring);
        assert_eq!(Season::from_month(7, false), Season::Summer);
        assert_eq!(Season::from_month(10, false), Season::Autumn);
        assert_eq!(Season::from_month(1, false), Season::Winter);
        assert_eq!(Season::from_month(12, false), Season::Winter);

        assert_eq!(Season::from_month(4, true), Season::Autumn);
        assert_eq!(Season::from_month(7, true), Season::Winter);
        assert_eq!(Season::from_month(1, true), Season::Summer);
    }

    #[test]
    fn test_resolve_without_weather_falls_back_to_clock() {
        let env = resolve(clock(9, 4), &EnvironmentInput::default(), &EnvironmentOverrides::default());
        assert_eq!(env.season, Season::Spring);
        assert_eq!(env.time_of_day, TimeOfDay::Morning);
        assert_eq!(env.weather, WeatherCondition::Clear);
        assert!(env.is_daytime);
        assert!(!env.is_dark);
        assert_eq!(env.temperature_c, None);

        let night = resolve(clock(23, 4), &EnvironmentInput::default(), &EnvironmentOverrides::default());
        assert!(night.is_dark);
    }

    #[test]
    fn test_southern_latitude_inverts_season() {
        let input = EnvironmentInput {
            weather: None,
            latitude: Some(-33.9),
        };
        let env = resolve(clock(12, 7), &input, &EnvironmentOverrides::default());
        assert_eq!(env.season, Season::Winter);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = EnvironmentOverrides {
            season: Some(Season::Winter),
            time_of_day: Some(TimeOfDay::Night),
            dark_theme: false,
        };
        let env = resolve(clock(10, 7), &EnvironmentInput::default(), &overrides);
        assert_eq!(env.season, Season::Winter);
        assert_eq!(env.time_of_day, TimeOfDay::Night);
        assert!(env.is_dark);
        assert!(!env.is_daytime);
    }

    #[test]
    fn test_is_dark_blends_weather_and_theme() {
        use TimeOfDay::*;
        use WeatherCondition::*;
        assert!(!compute_is_dark(Evening, true, Clear, false));
        assert!(compute_is_dark(Evening, true, Rain, false));
        assert!(compute_is_dark(Evening, true, Clear, true));
        assert!(!compute_is_dark(Afternoon, true, Cloudy, false));
        assert!(compute_is_dark(Afternoon, false, Cloudy, false));
        assert!(!compute_is_dark(Morning, false, Clear, false));
        assert!(compute_is_dark(Night, true, Clear, false));
    }

    #[test]
    fn test_weather_report_drives_condition_and_daylight() {
        let input = EnvironmentInput {
            weather: Some(WeatherReport {
                condition: WeatherCondition::Rain,
                is_daytime: false,
                temperature_c: 11.4,
            }),
            latitude: Some(51.5),
        };
        let env = resolve(clock(8, 11), &input, &EnvironmentOverrides::default());
        assert_eq!(env.weather, WeatherCondition::Rain);
        assert!(env.is_dark, "rainy morning without daylight should be dark");
        assert_eq!(DisplayLabels::from_state(&env).temperature, "11°C");
    }

    #[test]
    fn test_labels_without_temperature() {
        let labels = DisplayLabels::from_state(&EnvironmentState::default());
        assert_eq!(labels.season, "Spring");
        assert_eq!(labels.time_of_day, "Morning");
        assert_eq!(labels.temperature, "--");
    }
}

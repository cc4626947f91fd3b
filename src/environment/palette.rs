//! Colour lookup tables for the sky and terrain layers, plus the fixed
//! celestial anchors.
//!
//! The sky table is keyed by (time of day, weather, season) with season
//! overriding daytime palettes. Terrain uses its own (time of day, season)
//! table and does not look at weather.

use bevy::prelude::*;

use crate::shared::*;

/// Two-stop vertical gradient, top of the surface to the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyPalette {
    pub top: Rgb,
    pub bottom: Rgb,
}

const fn sky(top: Rgb, bottom: Rgb) -> SkyPalette {
    SkyPalette { top, bottom }
}

pub fn sky_palette(env: &EnvironmentState) -> SkyPalette {
    use WeatherCondition::*;

    if env.is_dark {
        return match env.weather {
            Clear => sky(Rgb(8, 12, 38), Rgb(38, 46, 92)),
            Snow => sky(Rgb(28, 32, 48), Rgb(72, 78, 100)),
            Rain | Cloudy => sky(Rgb(18, 20, 28), Rgb(52, 56, 68)),
        };
    }

    let daytime = matches!(env.time_of_day, TimeOfDay::Morning | TimeOfDay::Afternoon);

    // Season overrides for daytime skies.
    if daytime {
        match (env.season, env.weather) {
            (Season::Winter, Clear | Cloudy) => return sky(Rgb(196, 212, 228), Rgb(236, 242, 248)),
            (Season::Autumn, Clear) => return sky(Rgb(110, 160, 214), Rgb(246, 206, 158)),
            (Season::Summer, Clear) if env.time_of_day == TimeOfDay::Afternoon => {
                return sky(Rgb(40, 128, 226), Rgb(160, 214, 250))
            }
            _ => {}
        }
    }

    match (env.time_of_day, env.weather) {
        (_, Rain) => sky(Rgb(94, 106, 122), Rgb(150, 158, 170)),
        (_, Snow) => sky(Rgb(176, 186, 200), Rgb(226, 232, 240)),
        (TimeOfDay::Evening, Cloudy) => sky(Rgb(118, 100, 124), Rgb(210, 152, 124)),
        (_, Cloudy) => sky(Rgb(140, 160, 186), Rgb(200, 210, 222)),
        (TimeOfDay::Morning, Clear) => sky(Rgb(122, 182, 236), Rgb(255, 214, 170)),
        (TimeOfDay::Afternoon, Clear) => sky(Rgb(72, 150, 230), Rgb(182, 222, 250)),
        (TimeOfDay::Evening, Clear) => sky(Rgb(62, 62, 132), Rgb(250, 140, 90)),
        (TimeOfDay::Night, Clear) => sky(Rgb(8, 12, 38), Rgb(38, 46, 92)),
    }
}

/// Back hill and front hill fill colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HillPalette {
    pub back: Rgb,
    pub front: Rgb,
}

pub fn hill_palette(time_of_day: TimeOfDay, season: Season) -> HillPalette {
    let (back, front) = match season {
        Season::Spring => (Rgb(122, 190, 102), Rgb(92, 170, 80)),
        Season::Summer => (Rgb(100, 170, 72), Rgb(68, 148, 52)),
        Season::Autumn => (Rgb(190, 150, 82), Rgb(168, 120, 60)),
        Season::Winter => (Rgb(222, 230, 240), Rgb(244, 248, 252)),
    };
    let (factor, tint) = match time_of_day {
        TimeOfDay::Morning => (1.0, Rgb(255, 244, 230)),
        TimeOfDay::Afternoon => (1.0, Rgb(255, 255, 255)),
        TimeOfDay::Evening => (0.75, Rgb(255, 210, 180)),
        TimeOfDay::Night => (0.35, Rgb(150, 160, 220)),
    };
    HillPalette {
        back: shade(back, factor, tint),
        front: shade(front, factor, tint),
    }
}

/// Darken by `factor` and multiply by a tint colour.
fn shade(c: Rgb, factor: f32, tint: Rgb) -> Rgb {
    let ch = |v: u8, t: u8| (v as f32 * factor * (t as f32 / 255.0)).round().clamp(0.0, 255.0) as u8;
    Rgb(ch(c.0, tint.0), ch(c.1, tint.1), ch(c.2, tint.2))
}

// ─── Celestial body ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialBody {
    Sun,
    Moon,
}

/// Which body to draw, if any. Rain always hides both.
pub fn celestial_body(env: &EnvironmentState) -> Option<CelestialBody> {
    if env.weather == WeatherCondition::Rain {
        return None;
    }
    Some(if env.is_dark {
        CelestialBody::Moon
    } else {
        CelestialBody::Sun
    })
}

/// Fixed anchor per time of day, as a fraction of the surface size.
pub fn celestial_anchor(time_of_day: TimeOfDay) -> Vec2 {
    match time_of_day {
        TimeOfDay::Morning => Vec2::new(0.2, 0.3),
        TimeOfDay::Afternoon => Vec2::new(0.5, 0.14),
        TimeOfDay::Evening => Vec2::new(0.82, 0.32),
        TimeOfDay::Night => Vec2::new(0.76, 0.18),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(time_of_day: TimeOfDay, weather: WeatherCondition, season: Season, is_dark: bool) -> EnvironmentState {
        EnvironmentState {
            season,
            time_of_day,
            weather,
            is_dark,
            is_daytime: !is_dark,
            temperature_c: None,
        }
    }

    #[test]
    fn test_winter_daytime_forces_pale_palette() {
        let clear = sky_palette(&env(TimeOfDay::Morning, WeatherCondition::Clear, Season::Winter, false));
        let cloudy = sky_palette(&env(TimeOfDay::Afternoon, WeatherCondition::Cloudy, Season::Winter, false));
        assert_eq!(clear, cloudy);
        assert_ne!(
            clear,
            sky_palette(&env(TimeOfDay::Morning, WeatherCondition::Clear, Season::Spring, false))
        );
    }

    #[test]
    fn test_dark_sky_ignores_season() {
        let a = sky_palette(&env(TimeOfDay::Night, WeatherCondition::Clear, Season::Winter, true));
        let b = sky_palette(&env(TimeOfDay::Night, WeatherCondition::Clear, Season::Summer, true));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rain_hides_celestial_body() {
        for time in [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening, TimeOfDay::Night] {
            let e = env(time, WeatherCondition::Rain, Season::Spring, time == TimeOfDay::Night);
            assert_eq!(celestial_body(&e), None);
        }
    }

    #[test]
    fn test_moon_follows_darkness() {
        let night = env(TimeOfDay::Night, WeatherCondition::Clear, Season::Summer, true);
        assert_eq!(celestial_body(&night), Some(CelestialBody::Moon));
        let noon = env(TimeOfDay::Afternoon, WeatherCondition::Cloudy, Season::Summer, false);
        assert_eq!(celestial_body(&noon), Some(CelestialBody::Sun));
    }

    #[test]
    fn test_hills_darken_at_night() {
        let day = hill_palette(TimeOfDay::Afternoon, Season::Summer);
        let night = hill_palette(TimeOfDay::Night, Season::Summer);
        assert!(night.front.1 < day.front.1);
        assert!(night.back.1 < day.back.1);
    }

    #[test]
    fn test_anchors_stay_on_surface() {
        for time in [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening, TimeOfDay::Night] {
            let a = celestial_anchor(time);
            assert!((0.0..=1.0).contains(&a.x) && (0.0..=1.0).contains(&a.y));
        }
    }
}

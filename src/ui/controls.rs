//! Keyboard controls. Overrides are written into the live
//! `EnvironmentOverrides` cell; the frame loop picks them up on its next
//! frame without restarting.

use bevy::prelude::*;

use crate::shared::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_controls, log_seed_requests)
                .chain()
                .before(GardenSet::Resolve)
                .run_if(in_state(SceneState::Running)),
        );
    }
}

/// Step an override through auto, then every concrete value, then back to
/// auto.
pub fn cycle_override<T: Copy + PartialEq>(current: Option<T>, order: &[T]) -> Option<T> {
    match current {
        None => order.first().copied(),
        Some(value) => order
            .iter()
            .position(|v| *v == value)
            .and_then(|i| order.get(i + 1))
            .copied(),
    }
}

pub const SEASON_ORDER: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];
pub const TIME_ORDER: [TimeOfDay; 4] = [
    TimeOfDay::Morning,
    TimeOfDay::Afternoon,
    TimeOfDay::Evening,
    TimeOfDay::Night,
];

pub fn keyboard_controls(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut overrides: ResMut<EnvironmentOverrides>,
    mut seed_events: EventWriter<PlantSeedRequested>,
    mut unmount_events: EventWriter<UnmountRequested>,
) {
    let Some(keys) = keys else {
        return;
    };

    if keys.just_pressed(KeyCode::Space) {
        seed_events.send(PlantSeedRequested);
    }
    if keys.just_pressed(KeyCode::KeyS) {
        overrides.season = cycle_override(overrides.season, &SEASON_ORDER);
        info!("[Controls] Season override: {:?}", overrides.season);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        overrides.time_of_day = cycle_override(overrides.time_of_day, &TIME_ORDER);
        info!("[Controls] Time override: {:?}", overrides.time_of_day);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        overrides.dark_theme = !overrides.dark_theme;
        info!("[Controls] Dark theme: {}", overrides.dark_theme);
    }
    if keys.just_pressed(KeyCode::Escape) {
        unmount_events.send(UnmountRequested);
    }
}

/// The garden never creates tasks; it only reports the request.
fn log_seed_requests(mut events: EventReader<PlantSeedRequested>) {
    for _ in events.read() {
        info!("[Controls] Plant-a-seed requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_value_then_auto() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = cycle_override(current, &SEASON_ORDER);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Season::Spring),
                Some(Season::Summer),
                Some(Season::Autumn),
                Some(Season::Winter),
                None
            ]
        );
    }

    #[test]
    fn test_cycle_time_from_pinned_night_returns_to_auto() {
        assert_eq!(cycle_override(Some(TimeOfDay::Night), &TIME_ORDER), None);
        assert_eq!(
            cycle_override(Some(TimeOfDay::Morning), &TIME_ORDER),
            Some(TimeOfDay::Afternoon)
        );
    }
}

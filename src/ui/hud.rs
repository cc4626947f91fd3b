use bevy::prelude::*;

use crate::environment::DisplayLabels;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

/// Which label a text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLabel {
    Season,
    TimeOfDay,
    Temperature,
}

const LABEL_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.92);
const HINT_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);

pub const KEY_HINT: &str = "Space: plant a seed   S: season   T: time   D: theme   Esc: close";

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

fn label(text: String, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub fn spawn_hud(mut commands: Commands, env: Res<ResolvedEnvironment>) {
    let labels = DisplayLabels::from_state(&env.0);

    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(16.0),
                ..default()
            })
            .with_children(|row| {
                row.spawn((HudLabel::Season, label(labels.season, 18.0, LABEL_COLOR)));
                row.spawn((HudLabel::TimeOfDay, label(labels.time_of_day, 18.0, LABEL_COLOR)));
                row.spawn((HudLabel::Temperature, label(labels.temperature, 16.0, LABEL_COLOR)));
            });

            root.spawn(label(KEY_HINT.to_string(), 13.0, HINT_COLOR));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_labels(
    env: Res<ResolvedEnvironment>,
    overrides: Res<EnvironmentOverrides>,
    mut query: Query<(&HudLabel, &mut Text)>,
) {
    if !env.is_changed() && !overrides.is_changed() {
        return;
    }
    let labels = DisplayLabels::from_state(&env.0);
    // Pinned values are marked so the user can tell an override from auto.
    let pin = |pinned: bool| if pinned { " *" } else { "" };

    for (which, mut text) in &mut query {
        text.0 = match which {
            HudLabel::Season => format!("{}{}", labels.season, pin(overrides.season.is_some())),
            HudLabel::TimeOfDay => {
                format!("{}{}", labels.time_of_day, pin(overrides.time_of_day.is_some()))
            }
            HudLabel::Temperature => labels.temperature.clone(),
        };
    }
}

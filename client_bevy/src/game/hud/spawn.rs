use bevy::prelude::*;
use polybounce_shared::hud::{default_labels, PLACEHOLDER_TEXT};

use crate::constants::color_from_hex;
use crate::game::core::Settings;

use super::types::{
    fitted_font_size, label_node, HudLabelBox, HudLabelCaption, HudLabelValue, HudStatsText,
    STATS_BOTTOM, STATS_FONT_SIZE, STATS_LEFT, STATS_ROW_GAP,
};

pub(super) fn spawn_hud(mut commands: Commands, settings: Res<Settings>) {
    let cfg = &settings.config;
    let panel = color_from_hex(settings.palette.panel());
    let text = color_from_hex(settings.palette.text());

    for (index, spec) in default_labels().iter().enumerate() {
        let rect = spec.rect(cfg.canvas_width, cfg.canvas_height);
        let font = TextFont::from_font_size(fitted_font_size(spec, &rect));

        commands
            .spawn((
                label_node(spec, &rect),
                BackgroundColor(panel),
                BorderColor::all(text),
                BorderRadius::all(Val::Px(spec.border_radius)),
                HudLabelBox { index },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(spec.caption),
                    font.clone(),
                    TextColor(text),
                    HudLabelCaption,
                ));
                parent.spawn((
                    Text::new(PLACEHOLDER_TEXT),
                    font.clone(),
                    TextColor(text),
                    HudLabelValue {
                        source: spec.source,
                    },
                ));
            });
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(STATS_LEFT),
                bottom: Val::Px(STATS_BOTTOM),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(STATS_ROW_GAP),
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(panel.with_alpha(0.8)),
            BorderRadius::all(Val::Px(6.0)),
        ))
        .with_children(|parent| {
            for line in 0..2 {
                parent.spawn((
                    Text::new(""),
                    TextFont::from_font_size(STATS_FONT_SIZE),
                    TextColor(text),
                    HudStatsText { line },
                ));
            }
        });
}

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::Velocity;
use polybounce_shared::hud::{default_labels, label_text, stats_lines};

use crate::coord::from_world;
use crate::game::ball::Ball;
use crate::game::core::GameSession;

use super::types::{
    fitted_font_size, label_node, HudLabelBox, HudLabelCaption, HudLabelValue, HudStatsText,
};

type ResizedWindowQuery<'w, 's> =
    Query<'w, 's, &'static Window, (With<PrimaryWindow>, Changed<Window>)>;
type LabelTextFontQuery<'w, 's> = Query<
    'w,
    's,
    (&'static ChildOf, &'static mut TextFont),
    Or<(With<HudLabelCaption>, With<HudLabelValue>)>,
>;

/// Re-lays the label grid whenever the window size changes.
pub(super) fn layout_hud(
    q_window: ResizedWindowQuery,
    mut q_boxes: Query<(&HudLabelBox, &mut Node)>,
    mut q_fonts: LabelTextFontQuery,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let (w, h) = (window.width(), window.height());
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    let labels = default_labels();
    for (label, mut node) in &mut q_boxes {
        let Some(spec) = labels.get(label.index) else {
            continue;
        };
        *node = label_node(spec, &spec.rect(w, h));
    }

    for (child_of, mut font) in &mut q_fonts {
        let Ok((label, _)) = q_boxes.get(child_of.parent()) else {
            continue;
        };
        let Some(spec) = labels.get(label.index) else {
            continue;
        };
        font.font_size = fitted_font_size(spec, &spec.rect(w, h));
    }
}

pub(super) fn update_label_values(
    session: Res<GameSession>,
    mut q_values: Query<(&HudLabelValue, &mut Text)>,
) {
    let snapshot = session.snapshot();
    for (value, mut text) in &mut q_values {
        let next = label_text(value.source, &snapshot);
        if text.0 != next {
            text.0 = next;
        }
    }
}

pub(super) fn update_stats(
    q_ball: Query<(&Transform, &Velocity), With<Ball>>,
    mut q_lines: Query<(&HudStatsText, &mut Text)>,
) {
    let Ok((transform, velocity)) = q_ball.single() else {
        return;
    };
    let lines = stats_lines(
        from_world(transform.translation.truncate()),
        from_world(velocity.linvel),
    );
    for (stats, mut text) in &mut q_lines {
        if let Some(line) = lines.get(stats.line) {
            if text.0 != *line {
                text.0 = line.clone();
            }
        }
    }
}

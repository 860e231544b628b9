use bevy::prelude::*;
use polybounce_shared::hud::{HudRect, LabelSource, LabelSpec};

pub(super) const STATS_LEFT: f32 = 12.0;
pub(super) const STATS_BOTTOM: f32 = 12.0;
pub(super) const STATS_FONT_SIZE: f32 = 16.0;
pub(super) const STATS_ROW_GAP: f32 = 4.0;

/// Fraction of the box height a label's text may occupy.
const TEXT_HEIGHT_FRACTION: f32 = 0.7;

/// Outer box of one HUD label; `index` points into `default_labels()`.
#[derive(Component)]
pub(super) struct HudLabelBox {
    pub(super) index: usize,
}

#[derive(Component)]
pub(super) struct HudLabelCaption;

#[derive(Component)]
pub(super) struct HudLabelValue {
    pub(super) source: LabelSource,
}

#[derive(Component)]
pub(super) struct HudStatsText {
    pub(super) line: usize,
}

/// Font size that keeps the label's text inside its box.
pub(super) fn fitted_font_size(spec: &LabelSpec, rect: &HudRect) -> f32 {
    spec.font_size
        .min(rect.height * TEXT_HEIGHT_FRACTION)
        .max(1.0)
}

/// Absolute-positioned node for a label box.
pub(super) fn label_node(spec: &LabelSpec, rect: &HudRect) -> Node {
    let inset = spec.text_inset();
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.left),
        top: Val::Px(rect.top),
        width: Val::Px(rect.width),
        height: Val::Px(rect.height),
        border: UiRect::all(Val::Px(spec.border_width)),
        padding: UiRect::horizontal(Val::Px(inset)),
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        overflow: Overflow::clip(),
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use polybounce_shared::hud::default_labels;

    use super::*;

    #[test]
    fn font_shrinks_to_fit_box() {
        let level = default_labels()[0];
        let rect = level.rect(1200.0, 900.0);
        assert_eq!(rect.height, 45.0);
        assert!((fitted_font_size(&level, &rect) - 31.5).abs() < 1e-4);

        let tall = level.rect(1200.0, 3600.0);
        assert_eq!(fitted_font_size(&level, &tall), level.font_size);
    }

    #[test]
    fn label_node_matches_rect() {
        let score = default_labels()[5];
        let rect = score.rect(1200.0, 900.0);
        let node = label_node(&score, &rect);
        assert_eq!(node.left, Val::Px(302.5));
        assert_eq!(node.top, Val::Px(2.5));
        assert_eq!(node.width, Val::Px(595.0));
        assert_eq!(node.padding.left, Val::Px(15.0));
    }
}

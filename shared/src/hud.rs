use crate::session::HudSnapshot;
use crate::vec2::Vec2;

/// The screen is split into an 8 x 18 grid of layout units.
pub const GRID_COLUMNS: f32 = 8.0;
pub const GRID_ROWS: f32 = 18.0;

/// Pixels trimmed from each box so neighbours don't touch.
pub const BOX_GAP: f32 = 5.0;

pub const PLACEHOLDER_TEXT: &str = "--";

/// Where a label's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Level,
    LevelClock,
    Score,
    /// No live value yet; shows [`PLACEHOLDER_TEXT`].
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpec {
    pub caption: &'static str,
    pub width_units: f32,
    pub height_units: f32,
    pub border_width: f32,
    pub border_radius: f32,
    /// Box center in grid units (column, row).
    pub center_units: (f32, f32),
    pub font_size: f32,
    pub source: LabelSource,
}

/// Screen-space box in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl HudRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

impl LabelSpec {
    const fn clock(caption: &'static str, row: f32, source: LabelSource) -> Self {
        Self {
            caption,
            width_units: 2.0,
            height_units: 1.0,
            border_width: 5.0,
            border_radius: 15.0,
            center_units: (7.0, row),
            font_size: 40.0,
            source,
        }
    }

    pub fn rect(&self, screen_width: f32, screen_height: f32) -> HudRect {
        let unit_column = screen_width / GRID_COLUMNS;
        let unit_row = screen_height / GRID_ROWS;

        let width = (self.width_units * unit_column - BOX_GAP).max(0.0);
        let height = (self.height_units * unit_row - BOX_GAP).max(0.0);
        let cx = self.center_units.0 * unit_column;
        let cy = self.center_units.1 * unit_row;

        HudRect {
            left: cx - width * 0.5,
            top: cy - height * 0.5,
            width,
            height,
        }
    }

    /// Horizontal distance between the box edge and its text.
    pub fn text_inset(&self) -> f32 {
        self.border_width * 3.0
    }
}

pub fn default_labels() -> [LabelSpec; 6] {
    [
        LabelSpec {
            caption: "Level",
            width_units: 2.0,
            height_units: 1.0,
            border_width: 5.0,
            border_radius: 15.0,
            center_units: (1.0, 0.5),
            font_size: 60.0,
            source: LabelSource::Level,
        },
        LabelSpec::clock("Level Clock", 0.5, LabelSource::LevelClock),
        LabelSpec::clock("Inner Clock", 1.5, LabelSource::Placeholder),
        LabelSpec::clock("Middle Clock", 2.5, LabelSource::Placeholder),
        LabelSpec::clock("Outer Clock", 3.5, LabelSource::Placeholder),
        LabelSpec {
            caption: "Score",
            width_units: 4.0,
            height_units: 1.0,
            border_width: 5.0,
            border_radius: 8.0,
            center_units: (4.0, 0.5),
            font_size: 40.0,
            source: LabelSource::Score,
        },
    ]
}

pub fn label_text(source: LabelSource, snapshot: &HudSnapshot) -> String {
    match source {
        LabelSource::Level => snapshot.level.to_string(),
        LabelSource::LevelClock => format!("{:.1}s", snapshot.level_clock),
        LabelSource::Score => snapshot.score.to_string(),
        LabelSource::Placeholder => PLACEHOLDER_TEXT.to_string(),
    }
}

/// Position and velocity readout for the stats panel.
pub fn stats_lines(position: Vec2, velocity: Vec2) -> [String; 2] {
    [
        format!("{:<15} {:>8.2} {:>8.2}", "Position", position.x, position.y),
        format!("{:<15} {:>8.2} {:>8.2}", "Velocity", velocity.x, velocity.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 1200.0;
    const H: f32 = 900.0;

    #[test]
    fn score_box_is_centered_on_top_row() {
        let score = default_labels()[5];
        let r = score.rect(W, H);
        assert_eq!(r.width, 595.0);
        assert_eq!(r.height, 45.0);
        assert_eq!(r.center(), (600.0, 25.0));
        assert_eq!(r.left, 302.5);
        assert_eq!(r.top, 2.5);
    }

    #[test]
    fn all_labels_fit_on_screen() {
        for spec in default_labels() {
            let r = spec.rect(W, H);
            assert!(r.left >= 0.0, "{} starts off-screen", spec.caption);
            assert!(r.top >= 0.0, "{} starts off-screen", spec.caption);
            assert!(r.right() <= W, "{} ends off-screen", spec.caption);
            assert!(r.bottom() <= H, "{} ends off-screen", spec.caption);
        }
    }

    #[test]
    fn labels_do_not_overlap() {
        let rects: Vec<HudRect> = default_labels().iter().map(|s| s.rect(W, H)).collect();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let overlap = a.left < b.right()
                    && b.left < a.right()
                    && a.top < b.bottom()
                    && b.top < a.bottom();
                assert!(!overlap, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn tiny_screen_never_yields_negative_size() {
        let r = default_labels()[0].rect(8.0, 18.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn label_text_per_source() {
        let snap = HudSnapshot {
            level: 4,
            level_clock: 12.345,
            score: 13,
        };
        assert_eq!(label_text(LabelSource::Level, &snap), "4");
        assert_eq!(label_text(LabelSource::LevelClock, &snap), "12.3s");
        assert_eq!(label_text(LabelSource::Score, &snap), "13");
        assert_eq!(label_text(LabelSource::Placeholder, &snap), PLACEHOLDER_TEXT);
    }

    #[test]
    fn stats_lines_are_column_aligned() {
        let [pos, vel] = stats_lines(Vec2::new(12.5, -3.0), Vec2::new(-100.125, 0.0));
        assert_eq!(pos, "Position           12.50    -3.00");
        assert_eq!(vel.len(), pos.len());
        assert!(vel.starts_with("Velocity"));
    }
}

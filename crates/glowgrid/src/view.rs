//! Terminal projection of chart world space.
//!
//! Cells live in a small world space: columns along positive x in units of
//! `1 + interval.x`, rows growing downward with `position.y` stored
//! negated. The projection maps that space linearly onto a terminal area
//! and paints each cell as a filled rectangle whose RGB is scaled by its
//! current alpha.

use glowgrid_chart::CursorFollower;
use glowgrid_core::{Cell, Vec2};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType},
};

/// World-space extents of the generated chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartBounds {
    /// Horizontal extent, from the left edge of the first column to the
    /// right edge of the last.
    pub width: f32,
    /// Vertical extent of a full column.
    pub height: f32,
}

impl ChartBounds {
    /// Extents covering `columns` columns of `row_count` rows.
    pub fn of_grid(columns: usize, row_count: usize, cell_height: f32, interval: Vec2) -> Self {
        Self {
            width: columns as f32 * (1.0 + interval.x) - interval.x,
            height: row_count as f32 * cell_height,
        }
    }

    /// Project a world rectangle (center plus size) into `area`.
    ///
    /// The result is at least one terminal cell and clipped to `area`;
    /// `None` means the rectangle lies entirely outside it.
    pub fn project(&self, area: Rect, center: Vec2, size: Vec2) -> Option<Rect> {
        if self.width <= 0.0 || self.height <= 0.0 || area.area() == 0 {
            return None;
        }

        let sx = area.width as f32 / self.width;
        let sy = area.height as f32 / self.height;

        // Column 0 is centered at x = 0 with width 1, so the world's left
        // edge sits at -0.5.
        let left = (center.x - 0.5 * size.x + 0.5) * sx;
        let top = (-center.y - 0.5 * size.y) * sy;
        let width = (size.x * sx).round().max(1.0);
        let height = (size.y * sy).round().max(1.0);

        let rect = Rect {
            x: area.x.saturating_add(left.round().max(0.0) as u16),
            y: area.y.saturating_add(top.round().max(0.0) as u16),
            width: width as u16,
            height: height as u16,
        };

        let clipped = rect.intersection(area);
        if clipped.area() == 0 { None } else { Some(clipped) }
    }
}

/// Paint every cell into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, cells: &[Cell], bounds: ChartBounds) {
    for cell in cells {
        if let Some(rect) = bounds.project(area, cell.position, cell.scale) {
            let color = cell.base_color.to_terminal(cell.alpha);
            frame.render_widget(Block::new().style(Style::new().bg(color)), rect);
        }
    }
}

/// Paint the cursor follower as a hollow rectangle over the chart.
pub fn render_cursor(frame: &mut Frame, area: Rect, cursor: &CursorFollower, bounds: ChartBounds) {
    if let Some(rect) = bounds.project(area, cursor.position, cursor.scale) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Color::White));
        frame.render_widget(block, rect);
    }
}

#[cfg(test)]
mod tests {
    use glowgrid_chart::{LayoutParams, generate, seeded_rng};
    use glowgrid_core::{LayoutMode, Rgba};

    use super::*;

    fn bounds() -> ChartBounds {
        ChartBounds::of_grid(1, 10, 0.2, Vec2::new(1.0, 0.02))
    }

    #[test]
    fn test_grid_bounds() {
        let b = ChartBounds::of_grid(3, 10, 0.2, Vec2::new(1.0, 0.02));
        assert!((b.width - 5.0).abs() < 1e-6);
        assert!((b.height - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_first_cell_lands_top_left() {
        let area = Rect::new(0, 0, 40, 30);
        // The first sequential cell: center (0, -0.11), size (1, 0.18).
        let rect = bounds()
            .project(area, Vec2::new(0.0, -0.11), Vec2::new(1.0, 0.18))
            .unwrap();
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn test_projection_stays_inside_area() {
        let area = Rect::new(2, 1, 60, 24);
        let params = LayoutParams {
            palette: vec![
                Rgba::new(1.0, 0.0, 0.0, 1.0),
                Rgba::new(0.0, 1.0, 0.0, 1.0),
                Rgba::new(0.0, 0.0, 1.0, 1.0),
            ],
            low_alpha: 0.5,
            gap_probability: 0.3,
            column_count: 4,
            row_count: 10,
            cell_height: 0.2,
            interval: Vec2::new(1.0, 0.02),
            shuffle: false,
        };
        let b = ChartBounds::of_grid(4, 10, 0.2, Vec2::new(1.0, 0.02));

        for seed in 0..20 {
            let cells = generate(&params, LayoutMode::Randomized, &mut seeded_rng(seed));
            for cell in &cells {
                let rect = b.project(area, cell.position, cell.scale).unwrap();
                assert_eq!(rect, rect.intersection(area));
            }
        }
    }

    #[test]
    fn test_degenerate_area_projects_nothing() {
        let area = Rect::new(0, 0, 0, 0);
        assert!(
            bounds()
                .project(area, Vec2::new(0.0, -0.11), Vec2::new(1.0, 0.18))
                .is_none()
        );
    }
}

//! Cell layout generation.
//!
//! Both layout policies pack cells into vertical columns of `row_count`
//! row units. Sequential packing gives each palette entry its own column
//! with a fixed height class; randomized packing walks down every column
//! drawing height classes at random, occasionally suppressing a cell to
//! leave a gap.

use glowgrid_core::{Cell, LayoutMode, Rgba, Vec2};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::rng::{range_int, value};

/// Parameters controlling cell placement.
///
/// Callers validate their configuration before building this; the
/// generator assumes a non-empty palette and positive grid dimensions.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Base colors; a cell's height class indexes this palette.
    pub palette: Vec<Rgba>,
    /// Alpha assigned to every cell at rest.
    pub low_alpha: f32,
    /// Chance of suppressing a planned cell in randomized mode.
    pub gap_probability: f32,
    /// Number of columns in randomized mode. Sequential mode uses one
    /// column per palette entry instead.
    pub column_count: usize,
    /// Vertical extent of a column, in row units.
    pub row_count: usize,
    /// World height of one row unit.
    pub cell_height: f32,
    /// Horizontal and vertical spacing between cells.
    pub interval: Vec2,
    /// Shuffle the finished list so animation order decorrelates from
    /// position. Only randomized mode shuffles.
    pub shuffle: bool,
}

/// One planned placement in a column, before gap suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Row offset of the top of the cell.
    row: usize,
    /// 1-indexed vertical span in row units.
    height_class: usize,
    /// Planned but not emitted.
    gap: bool,
}

/// Generate the ordered cell list for one chart.
pub fn generate(params: &LayoutParams, mode: LayoutMode, rng: &mut impl Rng) -> Vec<Cell> {
    match mode {
        LayoutMode::Sequential => build_sequential(params, rng),
        LayoutMode::Randomized => build_randomized(params, rng),
    }
}

/// One column per palette entry: column `c` holds cells of height class
/// `c + 1` laid out back to back, up to a randomized row bound.
fn build_sequential(params: &LayoutParams, rng: &mut impl Rng) -> Vec<Cell> {
    let mut cells = Vec::new();

    for col in 0..params.palette.len() {
        let lo = params.row_count as i32 / 2;
        let hi = params.row_count as i32 - col as i32 - 1;
        // An over-tall column collapses the range onto `hi`, so once `hi`
        // goes negative the column generates no cells at all.
        let bound = range_int(rng, lo.min(hi), hi).max(0) as usize;

        let h = col + 1;
        cells.extend(
            (0..bound)
                .step_by(h)
                .map(|row| make_cell(params, col, row, h)),
        );
    }

    cells
}

/// Random height classes walked down each column, with gaps.
fn build_randomized(params: &LayoutParams, rng: &mut impl Rng) -> Vec<Cell> {
    let mut cells = Vec::new();

    for col in 0..params.column_count {
        for slot in plan_column(params, rng) {
            if !slot.gap {
                cells.push(make_cell(params, col, slot.row, slot.height_class));
            }
        }
    }

    if params.shuffle {
        cells.shuffle(rng);
    }

    cells
}

/// Walk one column from top to bottom, choosing a height class per step
/// and marking which placements the gap rule suppresses.
///
/// The drawn class is clamped so the cell never overflows the column,
/// which also keeps the walk advancing by at least one row per step. A
/// gap is never followed by another gap, and the gap roll is skipped
/// entirely on the step after a gap.
fn plan_column(params: &LayoutParams, rng: &mut impl Rng) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut row = 0;
    let mut prev_is_gap = false;

    while row < params.row_count {
        let idx = range_int(rng, 0, params.palette.len() as i32) as usize;
        let idx = idx.min(params.row_count - row - 1);
        let height_class = idx + 1;

        let top = row;
        row += height_class;

        let gap = if prev_is_gap {
            false
        } else {
            value(rng) < params.gap_probability
        };
        prev_is_gap = gap;

        slots.push(Slot {
            row: top,
            height_class,
            gap,
        });
    }

    slots
}

fn make_cell(params: &LayoutParams, col: usize, row: usize, height_class: usize) -> Cell {
    let h = height_class as f32;
    let x = col as f32 * (1.0 + params.interval.x);
    let y = params.cell_height * (row as f32 + 0.5 * h) + 0.5 * params.interval.y;

    Cell {
        position: Vec2::new(x, -y),
        scale: Vec2::new(1.0, params.cell_height * h - params.interval.y),
        height_class,
        base_color: params.palette[height_class - 1],
        alpha: params.low_alpha,
    }
}

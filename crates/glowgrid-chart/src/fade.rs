//! Frame-driven alpha fade sequencing.
//!
//! The sequencer animates one cell at a time: an optional lead delay, a
//! linear ramp from the resting alpha up to full brightness, a hold, and a
//! ramp back down. The caller owns the clock and advances the sequencer
//! with `tick`, once per rendered frame.

use glowgrid_core::{Cell, FadeOrder};

/// Timing parameters for a fade pass.
#[derive(Debug, Clone, Copy)]
pub struct FadeParams {
    /// Resting alpha; ramps start and end here.
    pub low_alpha: f32,
    /// Seconds a cell holds full brightness. Also sets the ramp rate: a
    /// ramp lasts one fifth of the hold.
    pub hold_delay: f32,
    /// Seconds to wait before each ramp-up. Flat order only; grouped runs
    /// start ramping immediately.
    pub lead_delay: f32,
    /// Visit order over the cell list.
    pub order: FadeOrder,
    /// Restart from the first cell after the last one finishes.
    pub looping: bool,
}

/// Animation phase of the active cell.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Lead { remaining: f32 },
    RampUp,
    Hold { remaining: f32 },
    RampDown,
}

/// Result of advancing the sequencer by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStatus {
    Running,
    Finished,
    Stopped,
}

/// Drives cell alphas through lead/ramp/hold cycles, one cell at a time.
///
/// The sequencer borrows the cell list on every tick and only ever writes
/// the `alpha` field; positions, sizes, and the list length are fixed.
#[derive(Debug)]
pub struct FadeSequencer {
    /// Cell indices in visit order.
    order: Vec<usize>,
    /// Position within `order` of the active cell.
    cursor: usize,
    phase: Phase,
    /// Alpha change per second during ramps.
    rate: f32,
    params: FadeParams,
    stopped: bool,
    finished: bool,
}

impl FadeSequencer {
    /// Plan a fade pass over `cells`.
    pub fn new(cells: &[Cell], params: FadeParams) -> Self {
        let mut order: Vec<usize> = (0..cells.len()).collect();
        if params.order == FadeOrder::Grouped {
            // Stable sort keeps insertion order within a height class.
            order.sort_by_key(|&i| cells[i].height_class);
        }

        Self {
            cursor: 0,
            phase: entry_phase(&params),
            rate: (1.0 - params.low_alpha) / (params.hold_delay * 0.2),
            stopped: false,
            finished: order.is_empty(),
            order,
            params,
        }
    }

    /// Advance the animation by `dt` seconds of frame time.
    ///
    /// Alpha moves by at most `rate * dt` and is clamped into
    /// `[low_alpha, 1]`; phase boundaries land on frame boundaries, the
    /// leftover slice of `dt` is not carried over.
    pub fn tick(&mut self, cells: &mut [Cell], dt: f32) -> FadeStatus {
        if self.stopped {
            return FadeStatus::Stopped;
        }
        if self.finished {
            return FadeStatus::Finished;
        }

        let idx = self.order[self.cursor];
        match self.phase {
            Phase::Lead { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    Phase::RampUp
                } else {
                    Phase::Lead { remaining }
                };
            }
            Phase::RampUp => {
                let cell = &mut cells[idx];
                cell.alpha = (cell.alpha + self.rate * dt).min(1.0);
                if cell.alpha >= 1.0 {
                    self.phase = Phase::Hold {
                        remaining: self.params.hold_delay,
                    };
                }
            }
            Phase::Hold { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    Phase::RampDown
                } else {
                    Phase::Hold { remaining }
                };
            }
            Phase::RampDown => {
                let cell = &mut cells[idx];
                cell.alpha = (cell.alpha - self.rate * dt).max(self.params.low_alpha);
                if cell.alpha <= self.params.low_alpha {
                    self.advance();
                }
            }
        }

        if self.finished {
            FadeStatus::Finished
        } else {
            FadeStatus::Running
        }
    }

    /// Index of the cell currently being animated.
    ///
    /// Valid from the moment the cell becomes current, so a follower can
    /// re-target during the lead delay, before the ramp starts.
    pub fn active(&self) -> Option<usize> {
        if self.finished || self.stopped {
            None
        } else {
            Some(self.order[self.cursor])
        }
    }

    /// Raise the stop flag; every later `tick` is a no-op.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            if !self.params.looping {
                self.finished = true;
                return;
            }
            self.cursor = 0;
        }
        self.phase = entry_phase(&self.params);
    }
}

fn entry_phase(params: &FadeParams) -> Phase {
    match params.order {
        FadeOrder::Flat => Phase::Lead {
            remaining: params.lead_delay,
        },
        FadeOrder::Grouped => Phase::RampUp,
    }
}

#[cfg(test)]
mod tests {
    use glowgrid_core::{Rgba, Vec2};

    use super::*;

    fn cell(height_class: usize) -> Cell {
        Cell {
            position: Vec2::default(),
            scale: Vec2::new(1.0, 0.18),
            height_class,
            base_color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            alpha: 0.5,
        }
    }

    fn flat_params() -> FadeParams {
        FadeParams {
            low_alpha: 0.5,
            hold_delay: 0.5,
            lead_delay: 0.0,
            order: FadeOrder::Flat,
            looping: false,
        }
    }

    #[test]
    fn test_ramp_rate_and_midpoint() {
        let mut cells = vec![cell(1)];
        let mut seq = FadeSequencer::new(&cells, flat_params());

        // hold_delay 0.5 => ramp lasts 0.1 s at 5.0 alpha/s.
        assert!((seq.rate - 5.0).abs() < 1e-6);

        // First tick consumes the zero-length lead.
        seq.tick(&mut cells, 0.016);
        assert!((cells[0].alpha - 0.5).abs() < 1e-6);

        // Halfway through the ramp.
        seq.tick(&mut cells, 0.05);
        assert!((cells[0].alpha - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_alpha_stays_bounded() {
        let mut cells: Vec<Cell> = (1..=3).map(cell).collect();
        let mut params = flat_params();
        params.looping = true;
        params.lead_delay = 0.1;
        let mut seq = FadeSequencer::new(&cells, params);

        for step in 0..5000 {
            // Uneven frame times, including a long stall.
            let dt = match step % 7 {
                0 => 0.002,
                3 => 0.2,
                _ => 0.016,
            };
            assert_eq!(seq.tick(&mut cells, dt), FadeStatus::Running);
            for c in &cells {
                assert!(c.alpha >= 0.5 - 1e-6 && c.alpha <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_one_shot_finishes_and_restores_alpha() {
        let mut cells: Vec<Cell> = (1..=2).map(cell).collect();
        let mut seq = FadeSequencer::new(&cells, flat_params());

        let mut status = FadeStatus::Running;
        for _ in 0..10_000 {
            status = seq.tick(&mut cells, 0.016);
            if status == FadeStatus::Finished {
                break;
            }
        }
        assert_eq!(status, FadeStatus::Finished);
        assert!(seq.is_finished());
        assert_eq!(seq.active(), None);
        for c in &cells {
            assert!((c.alpha - 0.5).abs() < 1e-6);
        }
        // Finished stays finished.
        assert_eq!(seq.tick(&mut cells, 0.016), FadeStatus::Finished);
    }

    #[test]
    fn test_looping_wraps_to_first_cell() {
        let mut cells: Vec<Cell> = (1..=2).map(cell).collect();
        let mut params = flat_params();
        params.looping = true;
        let mut seq = FadeSequencer::new(&cells, params);

        let mut visited = Vec::new();
        let mut last_active = None;
        for _ in 0..10_000 {
            seq.tick(&mut cells, 0.016);
            let active = seq.active();
            if active != last_active {
                visited.push(active.unwrap());
                last_active = active;
            }
            if visited.len() >= 4 {
                break;
            }
        }
        assert_eq!(visited, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_stop_halts_mid_cycle() {
        let mut cells = vec![cell(1)];
        let mut seq = FadeSequencer::new(&cells, flat_params());

        seq.tick(&mut cells, 0.016);
        seq.tick(&mut cells, 0.05);
        let frozen = cells[0].alpha;

        seq.stop();
        assert_eq!(seq.tick(&mut cells, 1.0), FadeStatus::Stopped);
        assert!((cells[0].alpha - frozen).abs() < 1e-6);
        assert_eq!(seq.active(), None);
    }

    #[test]
    fn test_grouped_order_visits_classes_ascending() {
        let cells: Vec<Cell> = [3, 1, 2, 1, 3, 2].map(cell).to_vec();
        let mut params = flat_params();
        params.order = FadeOrder::Grouped;
        let seq = FadeSequencer::new(&cells, params);

        let classes: Vec<usize> = seq.order.iter().map(|&i| cells[i].height_class).collect();
        assert_eq!(classes, vec![1, 1, 2, 2, 3, 3]);
        // Stable within a class: original indices keep their relative order.
        assert_eq!(seq.order, vec![1, 3, 2, 5, 0, 4]);
    }

    #[test]
    fn test_grouped_skips_lead_delay() {
        let mut cells = vec![cell(1)];
        let mut params = flat_params();
        params.order = FadeOrder::Grouped;
        params.lead_delay = 10.0;
        let mut seq = FadeSequencer::new(&cells, params);

        // Ramping starts on the first tick, the lead delay is ignored.
        seq.tick(&mut cells, 0.05);
        assert!(cells[0].alpha > 0.5);
    }

    #[test]
    fn test_empty_cell_list_is_finished() {
        let mut cells: Vec<Cell> = Vec::new();
        let mut seq = FadeSequencer::new(&cells, flat_params());
        assert!(seq.is_finished());
        assert_eq!(seq.tick(&mut cells, 0.016), FadeStatus::Finished);
        assert_eq!(seq.active(), None);
    }

    #[test]
    fn test_full_low_alpha_skips_ramps() {
        let mut cells = vec![cell(1)];
        cells[0].alpha = 1.0;
        let mut params = flat_params();
        params.low_alpha = 1.0;
        let mut seq = FadeSequencer::new(&cells, params);

        // rate is 0 but alpha already sits at both bounds; the sequencer
        // must still progress through the cycle.
        let mut status = FadeStatus::Running;
        for _ in 0..1000 {
            status = seq.tick(&mut cells, 0.016);
            if status == FadeStatus::Finished {
                break;
            }
        }
        assert_eq!(status, FadeStatus::Finished);
    }
}

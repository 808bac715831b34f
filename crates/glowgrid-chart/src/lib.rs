//! Chart layout generation and fade animation.
//!
//! This crate holds the generative half of glowgrid: packing colored cells
//! into columns (sequentially or at random, with gap suppression), driving
//! each cell's alpha through a timed ramp-hold-ramp cycle, and easing a
//! cursor toward whichever cell is currently animating.
//!
//! Nothing here owns a thread or a clock. The caller advances the
//! animation by calling `tick` with the elapsed frame time and stops it by
//! raising the sequencer's stop flag.

mod cursor;
mod fade;
mod layout;
mod rng;

pub use cursor::CursorFollower;
pub use fade::{FadeParams, FadeSequencer, FadeStatus};
pub use layout::{LayoutParams, generate};
pub use rng::{ChartRng, seeded_rng};

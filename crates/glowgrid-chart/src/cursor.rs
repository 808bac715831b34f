//! Exponential-easing follower for the active cell.

use glowgrid_core::Vec2;

/// Secondary transform that chases a target with exponential easing.
///
/// The follower is independent of the fade cadence: it is re-targeted
/// whenever a new cell becomes active and eased every frame, so it glides
/// between cells instead of snapping.
#[derive(Debug, Clone, Copy)]
pub struct CursorFollower {
    pub position: Vec2,
    pub scale: Vec2,
    /// Easing speed; higher values snap harder.
    pub speed: f32,
}

impl CursorFollower {
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec2::default(),
            scale: Vec2::new(1.0, 1.0),
            speed,
        }
    }

    /// Move toward the target transform for one frame of `dt` seconds.
    pub fn ease_toward(&mut self, position: Vec2, scale: Vec2, dt: f32) {
        let k = (-self.speed * dt).exp();
        self.position = Vec2::new(
            exp_step(self.position.x, position.x, k),
            exp_step(self.position.y, position.y, k),
        );
        self.scale = Vec2::new(
            exp_step(self.scale.x, scale.x, k),
            exp_step(self.scale.y, scale.y, k),
        );
    }
}

/// Framerate-independent exponential step from `current` toward `target`,
/// where `k = e^(-speed * dt)` is the per-frame retention factor.
fn exp_step(current: f32, target: f32, k: f32) -> f32 {
    target + (current - target) * k
}

//! Core types shared across the glowgrid crates.
//!
//! The chart lives in a small world space of its own: columns advance along
//! positive x, rows grow downward, and a cell's `position.y` is stored
//! negated so that "down" reads as increasing row offsets. Everything here
//! is a plain value type; the layout and animation logic lives in
//! `glowgrid-chart`.

use ratatui::style::Color;

/// 2D vector in chart world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Floating-point RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }

        let channel = |i: usize| {
            u8::from_str_radix(digits.get(i..i + 2)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };

        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { channel(6)? } else { 1.0 },
        })
    }

    /// Terminal color with the base RGB scaled by `alpha`.
    ///
    /// Terminals have no alpha channel, so brightness stands in for
    /// opacity: a cell resting at its low alpha renders dimmer than one at
    /// full brightness.
    pub fn to_terminal(self, alpha: f32) -> Color {
        let a = alpha.clamp(0.0, 1.0) * self.a;
        Color::Rgb(
            (self.r * a * 255.0) as u8,
            (self.g * a * 255.0) as u8,
            (self.b * a * 255.0) as u8,
        )
    }
}

/// One chart rectangle.
///
/// Position and size are fixed at generation time; only `alpha` changes
/// afterwards, driven by the fade sequencer.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Center of the cell; `y` is negated (rows grow downward).
    pub position: Vec2,
    /// Width is one column unit; height spans `height_class` row units
    /// minus the vertical interval.
    pub scale: Vec2,
    /// 1-indexed vertical span in row units. `height_class - 1` indexes
    /// the palette.
    pub height_class: usize,
    /// Palette color this cell was generated with.
    pub base_color: Rgba,
    /// Current opacity, kept within `[low_alpha, 1]`.
    pub alpha: f32,
}

/// Cell placement policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// One column per palette entry, fixed height class per column, no gaps.
    Sequential,
    /// Random height classes walked down each column with gap suppression.
    #[default]
    Randomized,
}

impl LayoutMode {
    /// Switch to the other placement policy.
    pub fn toggle(self) -> Self {
        match self {
            Self::Sequential => Self::Randomized,
            Self::Randomized => Self::Sequential,
        }
    }
}

/// Order in which the fade sequencer visits cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FadeOrder {
    /// Visit cells in list order, one continuous pass.
    #[default]
    Flat,
    /// Visit all cells of height class 1 first, then class 2, and so on.
    Grouped,
}

impl FadeOrder {
    /// Switch to the other visit order.
    pub fn toggle(self) -> Self {
        match self {
            Self::Flat => Self::Grouped,
            Self::Grouped => Self::Flat,
        }
    }

    /// Parse a configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "flat" => Some(Self::Flat),
            "grouped" => Some(Self::Grouped),
            _ => None,
        }
    }

    /// Configuration name of this order.
    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped => "grouped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        let c = Rgba::from_hex("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 0.0).abs() < 1e-6);
        assert!((c.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_rgba() {
        let c = Rgba::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Rgba::from_hex("ff8000").is_none());
        assert!(Rgba::from_hex("#ff80").is_none());
        assert!(Rgba::from_hex("#gghhii").is_none());
    }

    #[test]
    fn test_to_terminal_scales_by_alpha() {
        let c = Rgba::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(c.to_terminal(1.0), Color::Rgb(255, 255, 255));
        assert_eq!(c.to_terminal(0.5), Color::Rgb(127, 127, 127));
        // Out-of-range alphas clamp instead of wrapping.
        assert_eq!(c.to_terminal(2.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_mode_and_order_toggles() {
        assert_eq!(LayoutMode::Sequential.toggle(), LayoutMode::Randomized);
        assert_eq!(LayoutMode::Randomized.toggle(), LayoutMode::Sequential);
        assert_eq!(FadeOrder::Flat.toggle(), FadeOrder::Grouped);
        assert_eq!(FadeOrder::from_name("grouped"), Some(FadeOrder::Grouped));
        assert_eq!(FadeOrder::from_name("spiral"), None);
        assert_eq!(FadeOrder::Grouped.name(), "grouped");
    }
}

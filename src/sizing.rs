//! Responsive canvas sizing.
//!
//! The card is always square: it takes 95% of the smaller viewport
//! dimension, and the scale factor (pixels per abstract unit) is derived
//! from the resulting side length. Recomputed from scratch on every resize
//! notification — nothing is queued or debounced.

use crate::shaping::Float;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Side length of the square canvas, in pixels.
    pub side: Float,
    /// Pixels per abstract unit: `side * 0.01`.
    pub unit: Float,
    /// Cosmetic border thickness, 1 abstract unit.
    pub border_width: Float,
    /// Cosmetic border corner radius, 15 abstract units.
    pub border_radius: Float,
}

impl Viewport {
    /// Fits the card into a viewport of `width` x `height` pixels.
    pub fn fit(width: Float, height: Float) -> Self {
        let side = width.min(height) * 0.95;
        let unit = side * 0.01;

        Self {
            side,
            unit,
            border_width: unit,
            border_radius: 15.0 * unit,
        }
    }

    /// Converts abstract units to device pixels.
    pub fn px(&self, units: Float) -> Float {
        units * self.unit
    }

    /// Whole-pixel side length, for buffer allocation.
    pub fn pixel_side(&self) -> usize {
        self.side as usize
    }
}

//! Heart-curve generation and scene composition.
//!
//! Geometry lives in the abstract 0–100 unit space, y pointing down. The
//! curve and the per-frame placement formulas are closed-form and total, so
//! nothing in this module can fail.

use rgb::RGBA8;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::f32::consts::{PI, SQRT_2, TAU};

pub type Float = f32;
pub type Couple = vek::vec::repr_c::vec2::Vec2<Float>;
pub const C_ZERO: Couple = Couple::new(0.0, 0.0);

/// Sample count used for every heart polygon.
pub const HEART_SAMPLES: usize = 150;

/// Number of hearts in a default scene.
pub const DEFAULT_HEART_COUNT: usize = 7;

const MIN_RADIUS: Float = 15.0;
const MAX_RADIUS: Float = 45.0;
const RADIUS_SHRINK: Float = 0.8;
const BASE_LIGHTNESS: Float = 25.0;
const LIGHTNESS_SPREAD: Float = 25.0;

/// Samples the heart curve (https://mathworld.wolfram.com/HeartCurve.html)
/// at `samples` evenly spaced angles over a full turn.
///
/// Every coordinate scales linearly with `radius`, including the vertical
/// centering offset of `0.75 * radius`.
pub fn heart_points(samples: usize, radius: Float) -> Vec<Couple> {
    let step = TAU / samples as Float;
    (0..samples)
        .map(|i| {
            let a = i as Float * step;
            let (sin_a, cos_a) = a.sin_cos();
            let x = SQRT_2 * sin_a * sin_a * sin_a;
            let y = cos_a * cos_a * cos_a + cos_a * cos_a - 2.0 * cos_a;
            Couple::new(x * radius, y * radius - radius * 0.75)
        })
        .collect()
}

/// HSL color with CSS-style ranges: hue in degrees, saturation and
/// lightness in percent. Always opaque.
pub fn hsl(hue: Float, saturation: Float, lightness: Float) -> RGBA8 {
    let s = saturation / 100.0;
    let l = lightness / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: Float| ((v + m) * 255.0).round() as u8;
    RGBA8::new(channel(r), channel(g), channel(b), 255)
}

/// One heart polygon: a fixed point sequence generated at construction,
/// plus its fill color and relative size. Immutable afterwards.
pub struct Heart {
    radius: Float,
    color: RGBA8,
    points: Box<[Couple]>,
}

impl Heart {
    pub fn new(samples: usize, radius: Float, color: RGBA8) -> Self {
        Self {
            radius,
            color,
            points: heart_points(samples, radius).into_boxed_slice(),
        }
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn color(&self) -> RGBA8 {
        self.color
    }

    pub fn points(&self) -> &[Couple] {
        &self.points
    }
}

/// Where a heart sits during the current frame: a translation in abstract
/// units and a rotation in radians, both applied about the curve origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub translation: Couple,
    pub rotation: Float,
}

/// Animated transform for the heart at `index`, as a pure function of
/// accumulated time. Orbit amplitude grows with the index, so the front
/// (smallest) hearts wander farthest while the back one stays centered.
pub fn placement(elapsed: Float, index: usize) -> Placement {
    let i = index as Float;
    let tl = -elapsed * 2.5;
    let ts = tl - i;

    let x = 50.0 + (ts * 0.31 + (ts * 0.66).cos() - (ts * 0.25).sin()).cos() * i;
    let y = 50.0 + (ts * 0.27 - (ts * 0.34).cos() + (ts * 0.13).sin()).sin() * i;

    // bounded wobble, at most ±0.05 turns of PI
    let rs = tl * 0.27 - i * 0.25;
    let rotation = (rs + (rs * 0.25).cos() + (rs * 0.5).sin()).sin() * PI * 0.05;

    Placement {
        translation: Couple::new(x, y),
        rotation,
    }
}

/// The scene: hearts in back-to-front draw order (fixed at construction)
/// and the elapsed-time accumulator, the only mutable state.
pub struct Scene {
    hearts: Box<[Heart]>,
    elapsed: Float,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_heart_count(DEFAULT_HEART_COUNT)
    }

    /// Composes `count` hearts ordered from largest/darkest to
    /// smallest/lightest, so back shapes are drawn first.
    pub fn with_heart_count(count: usize) -> Self {
        let n = count as Float;
        let hearts = (0..count)
            .map(|slot| {
                let rank = (count - 1 - slot) as Float;
                let radius = (MIN_RADIUS + rank * (MAX_RADIUS - MIN_RADIUS) / n) * RADIUS_SHRINK;
                let lightness = BASE_LIGHTNESS + LIGHTNESS_SPREAD * slot as Float / n;
                Heart::new(HEART_SAMPLES, radius, hsl(0.0, 100.0, lightness))
            })
            .collect();

        Self {
            hearts,
            elapsed: 0.0,
        }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn elapsed(&self) -> Float {
        self.elapsed
    }

    /// Advances the scene clock. The accumulator never resets or wraps
    /// within a session.
    pub fn advance(&mut self, dt: Float) {
        self.elapsed += dt;
    }

    pub fn placement(&self, index: usize) -> Placement {
        placement(self.elapsed, index)
    }

    pub fn log_hearts(&self) {
        log::info!("| INDEX | RADIUS |  COLOR  |");

        for (i, heart) in self.hearts.iter().enumerate() {
            let c = heart.color();
            log::info!(
                "| {:^5} | {:^6.1} | #{:02x}{:02x}{:02x} |",
                i,
                heart.radius(),
                c.r,
                c.g,
                c.b
            );
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

//! Renders the classic animated valentine card — a pile of pulsing heart
//! polygons orbiting the center of a square canvas, plus a stylized rotated
//! label — into a caller-supplied RGBA8 buffer, one frame at a time.
//!
//! All geometry is authored in an abstract 0–100 unit space and converted to
//! device pixels through a single scale factor ([`sizing::Viewport`]). Every
//! frame is a pure function of accumulated elapsed time; the caller owns the
//! frame loop and the clock.

pub mod shaping;
pub mod sizing;
pub mod lettering;
pub mod rendering;

#[doc(inline)]
pub use {
    shaping::Heart,
    shaping::Scene,
    shaping::Placement,
    sizing::Viewport,
    lettering::Typeface,
    rendering::CardRenderer,
};

#[cfg(test)]
mod tests;

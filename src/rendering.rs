//! Per-frame rasterization of the card into an RGBA8 buffer.
//!
//! [`CardRenderer`] is the explicit render context: it owns the scene, the
//! typeface, the current viewport and the label raster, and the caller hands
//! it the destination buffer plus a coverage scratch mask every frame. The
//! supersampling level is picked by the caller through the same const
//! generics wizdraw uses.

use crate::shaping::{hsl, Couple, Float, Placement, Scene};
use crate::sizing::Viewport;
use crate::lettering;
use crate::lettering::{LabelMask, Typeface};

use wizdraw::fill;

use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGBA8;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderError {
    /// `dst` or `mask` is too small for the current viewport, or the row
    /// stride is narrower than the canvas.
    BadBufferSize,
}

pub type RenderResult<T> = Result<T, RenderError>;

pub fn background_color() -> RGBA8 {
    hsl(350.0, 90.0, 80.0)
}

pub struct CardRenderer {
    scene: Scene,
    typeface: Typeface,
    viewport: Viewport,
    label: LabelMask,
    // scratch for the transformed polygon of the heart being drawn
    flat: Vec<Couple>,
}

impl CardRenderer {
    pub fn new(scene: Scene, typeface: Typeface, width: Float, height: Float) -> Self {
        let mut renderer = Self {
            scene,
            typeface,
            viewport: Viewport::fit(width, height),
            label: LabelMask::empty(),
            flat: Vec::new(),
        };
        renderer.raster_label();
        renderer
    }

    /// Reacts to a viewport resize: recomputes the scale factor and
    /// re-rasterizes the label at the new pixel size.
    pub fn resize(&mut self, width: Float, height: Float) {
        self.viewport = Viewport::fit(width, height);
        self.raster_label();
    }

    fn raster_label(&mut self) {
        self.label = self.typeface.raster_label(
            lettering::LABEL_TEXT,
            self.viewport.px(lettering::LABEL_FONT_SIZE),
            self.viewport.px(lettering::LABEL_STROKE_WIDTH),
        );
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn advance(&mut self, dt: Float) {
        self.scene.advance(dt);
    }

    /// Paints one frame at the scene's current elapsed time.
    ///
    /// `dst` must hold at least `(side - 1) * stride + side` pixels and
    /// `mask` at least `side * side` bytes, where `side` is
    /// [`Viewport::pixel_side`]. With `alpha_blend` off, translucent
    /// coverage replaces the destination instead of blending over it.
    pub fn render<const SSAA: usize, const SSAA_SQ: usize>(
        &mut self,
        dst: &mut [RGBA8],
        mask: &mut [u8],
        stride: usize,
        alpha_blend: bool,
    ) -> RenderResult<()> {
        let side = self.viewport.pixel_side();
        let (w, h) = (side, side);

        if w == 0 || h == 0 {
            return Ok(());
        }
        if stride < w || mask.len() < w * h || dst.len() < (h - 1) * stride + w {
            return Err(RenderError::BadBufferSize);
        }

        // background
        let background = background_color();
        let mut i = 0;
        for _ in 0..h {
            dst[i..][..w].fill(background);
            i += stride;
        }

        // hearts, back to front
        let mask_size = Vec2::new(w, h);
        let unit = self.viewport.unit;
        for (index, heart) in self.scene.hearts().iter().enumerate() {
            let Placement {
                translation,
                rotation,
            } = self.scene.placement(index);
            let (sin_r, cos_r) = rotation.sin_cos();

            self.flat.clear();
            for p in heart.points() {
                let q = Couple::new(
                    p.x * cos_r - p.y * sin_r + translation.x,
                    p.x * sin_r + p.y * cos_r + translation.y,
                );
                self.flat.push(q * unit);
            }
            if let Some(&first) = self.flat.first() {
                self.flat.push(first);
            }

            mask.fill(0);
            fill::<SSAA, SSAA_SQ>(&self.flat, mask, mask_size);

            let color = heart.color();
            let mut line = 0;
            let mut q_i = 0;
            for _ in 0..h {
                for x in 0..w {
                    let q = mask[q_i];
                    if q != 0 {
                        blend_pixel(&mut dst[line + x], color, q, alpha_blend);
                    }
                    q_i += 1;
                }
                line += stride;
            }
        }

        // label, stroked then filled
        if !self.label.is_empty() {
            composite_label(
                dst,
                w,
                h,
                stride,
                &self.label,
                lettering::LABEL_ANCHOR * unit,
                lettering::LABEL_ROTATION,
                lettering::label_stroke_color(),
                lettering::label_fill_color(),
                alpha_blend,
            );
        }

        Ok(())
    }
}

/// Blends the upright label mask into `dst`, rotated by `angle` and
/// centered on `anchor`, by inverse-transform sampling over the rotated
/// bounding box.
#[allow(clippy::too_many_arguments)]
fn composite_label(
    dst: &mut [RGBA8],
    w: usize,
    h: usize,
    stride: usize,
    label: &LabelMask,
    anchor: Couple,
    angle: Float,
    stroke_color: RGBA8,
    fill_color: RGBA8,
    alpha_blend: bool,
) {
    let (sin_a, cos_a) = angle.sin_cos();
    let half = Couple::new(label.width as Float, label.height as Float) * 0.5;

    let reach_x = half.x * cos_a.abs() + half.y * sin_a.abs();
    let reach_y = half.x * sin_a.abs() + half.y * cos_a.abs();
    let x0 = (anchor.x - reach_x).floor().max(0.0) as usize;
    let y0 = (anchor.y - reach_y).floor().max(0.0) as usize;
    let x1 = (((anchor.x + reach_x).ceil() as usize) + 1).min(w);
    let y1 = (((anchor.y + reach_y).ceil() as usize) + 1).min(h);

    for y in y0..y1 {
        let line = y * stride;
        for x in x0..x1 {
            let v = Couple::new(
                x as Float + 0.5 - anchor.x,
                y as Float + 0.5 - anchor.y,
            );
            // inverse rotation back into mask space
            let m = Couple::new(
                v.x * cos_a + v.y * sin_a,
                v.y * cos_a - v.x * sin_a,
            ) + half;
            if m.x < 0.0 || m.y < 0.0 {
                continue;
            }
            let (mx, my) = (m.x as usize, m.y as usize);
            if mx >= label.width || my >= label.height {
                continue;
            }

            let idx = my * label.width + mx;
            let q = label.outline[idx];
            if q != 0 {
                blend_pixel(&mut dst[line + x], stroke_color, q, alpha_blend);
            }
            let q = label.coverage[idx];
            if q != 0 {
                blend_pixel(&mut dst[line + x], fill_color, q, alpha_blend);
            }
        }
    }
}

/// Coverage-weighted source-over blend of a single pixel.
#[inline(always)]
pub fn blend_pixel(dst: &mut RGBA8, src: RGBA8, coverage: u8, alpha_blend_dst: bool) {
    if src.a == 255 && coverage == 255 {
        *dst = src;
        return;
    }

    let src_alpha = (src.a as u32 * coverage as u32) / 255;
    let dst_alpha = u8::MAX as u32 - src_alpha;
    let mut mix = |s: u8, d: &mut u8| {
        let kept = match alpha_blend_dst {
            true => *d as u32 * dst_alpha,
            false => 0,
        };
        *d = ((s as u32 * src_alpha + kept) / u8::MAX as u32) as u8;
    };

    mix(src.r, &mut dst.r);
    mix(src.g, &mut dst.g);
    mix(src.b, &mut dst.b);
    mix(src.a, &mut dst.a);
}

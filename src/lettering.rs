//! The stylized label: font loading and text rasterization.
//!
//! The label is rasterized upright into a [`LabelMask`] — one coverage mask
//! for the fill pass and one dilated mask for the stroke pass — and the
//! renderer composites it rotated about its anchor. Stroking first and
//! filling on top reproduces the stroke-then-fill text look of the original
//! card.
//!
//! Font loading is one-shot and best-effort: a decorative font that fails to
//! parse is replaced by a builtin vector stroke font covering the label's
//! character set, and rendering proceeds.

use crate::shaping::{hsl, Couple, Float};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use wizdraw::stroke;

use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGBA8;

pub const LABEL_TEXT: &str = "St.Valentine's Day";

/// Label anchor in abstract units.
pub const LABEL_ANCHOR: Couple = Couple::new(50.0, 80.0);
/// −15 degrees.
pub const LABEL_ROTATION: Float = -15.0 * core::f32::consts::PI / 180.0;
pub const LABEL_FONT_SIZE: Float = 13.0;
pub const LABEL_STROKE_WIDTH: Float = 1.5;

pub fn label_fill_color() -> RGBA8 {
    hsl(0.0, 100.0, 40.0)
}

pub fn label_stroke_color() -> RGBA8 {
    // #ffc
    RGBA8::new(255, 255, 204, 255)
}

#[derive(Debug, Copy, Clone)]
pub struct FontError(pub &'static str);

pub type FontResult<T> = Result<T, FontError>;

enum Backend {
    Parsed(fontdue::Font),
    Builtin,
}

/// A typeface the label can be rasterized with: either a parsed
/// TrueType/OpenType font or the builtin stroke font.
pub struct Typeface {
    backend: Backend,
}

impl Typeface {
    pub fn from_bytes(bytes: &[u8]) -> FontResult<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(FontError)?;
        Ok(Self {
            backend: Backend::Parsed(font),
        })
    }

    pub fn builtin() -> Self {
        Self {
            backend: Backend::Builtin,
        }
    }

    /// Best-effort load: `None` or unparsable bytes fall back to the
    /// builtin font, with a warning rather than an error.
    pub fn load_or_builtin(bytes: Option<&[u8]>) -> Self {
        match bytes {
            None => Self::builtin(),
            Some(bytes) => match Self::from_bytes(bytes) {
                Ok(typeface) => typeface,
                Err(FontError(reason)) => {
                    log::warn!("typeface rejected ({reason}), using builtin glyphs");
                    Self::builtin()
                }
            },
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.backend, Backend::Builtin)
    }

    /// Rasterizes `text` at `px_size` pixels into an upright mask pair.
    /// `stroke_px` is the full stroke width in pixels.
    pub fn raster_label(&self, text: &str, px_size: Float, stroke_px: Float) -> LabelMask {
        let mask = match &self.backend {
            Backend::Parsed(font) => raster_parsed(font, text, px_size, stroke_px),
            Backend::Builtin => raster_builtin(text, px_size, stroke_px),
        };

        match mask {
            Some(mut mask) => {
                mask.outline = dilate(
                    &mask.coverage,
                    mask.width,
                    mask.height,
                    (stroke_px * 0.5).round() as usize,
                );
                mask
            }
            None => LabelMask::empty(),
        }
    }
}

/// Upright coverage masks for one rasterized label. `outline` dominates
/// `coverage` pointwise; both share the same dimensions.
pub struct LabelMask {
    pub coverage: Vec<u8>,
    pub outline: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl LabelMask {
    pub fn empty() -> Self {
        Self {
            coverage: Vec::new(),
            outline: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn raster_parsed(
    font: &fontdue::Font,
    text: &str,
    px_size: Float,
    stroke_px: Float,
) -> Option<LabelMask> {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px_size, 0));

    let glyphs: Vec<_> = layout
        .glyphs()
        .iter()
        .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
        .map(|g| (g.key, g.x, g.y))
        .collect();

    if glyphs.is_empty() {
        return None;
    }

    let mut min = Couple::new(Float::MAX, Float::MAX);
    let mut max = Couple::new(Float::MIN, Float::MIN);
    let mut rastered = Vec::with_capacity(glyphs.len());

    for (key, x, y) in glyphs {
        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }
        min.x = min.x.min(x);
        min.y = min.y.min(y);
        max.x = max.x.max(x + metrics.width as Float);
        max.y = max.y.max(y + metrics.height as Float);
        rastered.push((metrics, bitmap, x, y));
    }

    if rastered.is_empty() {
        return None;
    }

    let pad = stroke_px.ceil() as usize + 1;
    let width = (max.x - min.x).ceil() as usize + 2 * pad;
    let height = (max.y - min.y).ceil() as usize + 2 * pad;
    let mut coverage = vec![0u8; width * height];

    for (metrics, bitmap, x, y) in rastered {
        let ox = (x - min.x) as usize + pad;
        let oy = (y - min.y) as usize + pad;
        for row in 0..metrics.height {
            let src = &bitmap[row * metrics.width..][..metrics.width];
            let dst = &mut coverage[(oy + row) * width + ox..][..metrics.width];
            for (d, s) in dst.iter_mut().zip(src) {
                *d = (*d).max(*s);
            }
        }
    }

    Some(LabelMask {
        coverage,
        outline: Vec::new(),
        width,
        height,
    })
}

// Builtin glyphs are polylines in a 14-unit em box: y = 0 at the top of
// capitals, y = 10 at the baseline, descenders below.
const GLYPH_EM: Float = 14.0;

type Strokes = &'static [&'static [(Float, Float)]];

fn builtin_glyph(c: char) -> (Strokes, Float) {
    match c {
        ' ' => (&[], 4.0),
        '\'' => (&[&[(1.0, 0.0), (1.0, 3.0)]], 3.0),
        '.' => (&[&[(1.0, 9.0), (2.0, 10.0)]], 4.0),
        'D' => (
            &[&[
                (0.0, 0.0),
                (0.0, 10.0),
                (3.0, 10.0),
                (5.0, 8.0),
                (5.0, 2.0),
                (3.0, 0.0),
                (0.0, 0.0),
            ]],
            7.0,
        ),
        'S' => (
            &[&[
                (5.0, 0.0),
                (0.0, 0.0),
                (0.0, 5.0),
                (5.0, 5.0),
                (5.0, 10.0),
                (0.0, 10.0),
            ]],
            7.0,
        ),
        'V' => (&[&[(0.0, 0.0), (3.0, 10.0), (6.0, 0.0)]], 7.0),
        'a' => (
            &[
                &[(4.0, 5.0), (0.0, 5.0), (0.0, 10.0), (4.0, 10.0)],
                &[(4.0, 5.0), (4.0, 10.0)],
            ],
            6.0,
        ),
        'e' => (
            &[&[
                (0.0, 7.0),
                (4.0, 7.0),
                (4.0, 5.0),
                (0.0, 5.0),
                (0.0, 10.0),
                (4.0, 10.0),
            ]],
            6.0,
        ),
        'i' => (
            &[&[(2.0, 5.0), (2.0, 10.0)], &[(2.0, 2.0), (2.0, 3.0)]],
            3.0,
        ),
        'l' => (&[&[(2.0, 0.0), (2.0, 10.0)]], 3.0),
        'n' => (
            &[&[(0.0, 10.0), (0.0, 5.0), (3.0, 5.0), (4.0, 6.0), (4.0, 10.0)]],
            6.0,
        ),
        's' => (
            &[&[
                (4.0, 5.0),
                (0.0, 5.0),
                (0.0, 7.0),
                (4.0, 7.0),
                (4.0, 10.0),
                (0.0, 10.0),
            ]],
            6.0,
        ),
        't' => (
            &[&[(2.0, 1.0), (2.0, 10.0)], &[(0.0, 4.0), (4.0, 4.0)]],
            5.0,
        ),
        'y' => (
            &[
                &[(0.0, 5.0), (0.0, 8.0), (4.0, 8.0)],
                &[(4.0, 5.0), (4.0, 13.0), (0.0, 13.0)],
            ],
            6.0,
        ),
        // tofu box for anything the builtin set doesn't know
        _ => (
            &[&[
                (0.0, 2.0),
                (4.0, 2.0),
                (4.0, 10.0),
                (0.0, 10.0),
                (0.0, 2.0),
            ]],
            6.0,
        ),
    }
}

fn raster_builtin(text: &str, px_size: Float, stroke_px: Float) -> Option<LabelMask> {
    let scale = px_size / GLYPH_EM;
    let line_width = (px_size * 0.12).max(1.0);

    // lay out every stroke at its pen position
    let mut pen_x = 0.0;
    let mut paths: Vec<Vec<Couple>> = Vec::new();
    let mut min = Couple::new(Float::MAX, Float::MAX);
    let mut max = Couple::new(Float::MIN, Float::MIN);

    for c in text.chars() {
        let (strokes, advance) = builtin_glyph(c);
        for polyline in strokes {
            let mut path = Vec::with_capacity(polyline.len());
            for &(x, y) in *polyline {
                let p = Couple::new(pen_x + x * scale, y * scale);
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
                path.push(p);
            }
            paths.push(path);
        }
        pen_x += (advance + 1.0) * scale;
    }

    if paths.is_empty() {
        return None;
    }

    let pad = (stroke_px + line_width).ceil() as usize + 1;
    let width = (max.x - min.x).ceil() as usize + 2 * pad;
    let height = (max.y - min.y).ceil() as usize + 2 * pad;
    let offset = Couple::new(pad as Float - min.x, pad as Float - min.y);

    let mask_size = Vec2::new(width, height);
    let mut coverage = vec![0u8; width * height];
    let mut scratch = vec![0u8; width * height];

    for path in &mut paths {
        for p in path.iter_mut() {
            *p += offset;
        }
        scratch.fill(0);
        stroke::<4>(path, &mut scratch, mask_size, line_width);
        for (d, s) in coverage.iter_mut().zip(&scratch) {
            *d = (*d).max(*s);
        }
    }

    Some(LabelMask {
        coverage,
        outline: Vec::new(),
        width,
        height,
    })
}

/// Separable max filter with a square kernel of the given radius. The
/// result dominates the input pointwise, which is all the stroke pass
/// needs — the fill covers the interior anyway.
fn dilate(mask: &[u8], width: usize, height: usize, radius: usize) -> Vec<u8> {
    if radius == 0 || mask.is_empty() {
        return mask.to_vec();
    }

    let mut rows = vec![0u8; mask.len()];
    for y in 0..height {
        let src = &mask[y * width..][..width];
        let dst = &mut rows[y * width..][..width];
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius + 1).min(width);
            dst[x] = src[lo..hi].iter().copied().max().unwrap_or(0);
        }
    }

    let mut out = vec![0u8; mask.len()];
    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius + 1).min(height);
            let mut best = 0;
            for row in lo..hi {
                best = best.max(rows[row * width + x]);
            }
            out[y * width + x] = best;
        }
    }

    out
}

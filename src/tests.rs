use crate::*;

use crate::lettering::LabelMask;
use crate::rendering::{background_color, RenderError};
use crate::shaping::{heart_points, hsl, placement, Couple, Float};

use rgb::RGBA8;

fn close(a: Float, b: Float) -> bool {
    (a - b).abs() < 1e-3
}

fn lightness(c: RGBA8) -> Float {
    let max = c.r.max(c.g).max(c.b) as Float;
    let min = c.r.min(c.g).min(c.b) as Float;
    (max + min) / 2.0 / 255.0
}

#[test]
fn curve_point_count() {
    for n in [3, 4, 7, 150] {
        let points = heart_points(n, 20.0);
        assert_eq!(points.len(), n);
        for p in points {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }
}

#[test]
fn curve_vertical_symmetry() {
    let n = 150;
    let points = heart_points(n, 20.0);
    for i in 0..n {
        let mirror = points[(n - i) % n];
        assert!(close(points[i].x, -mirror.x));
        assert!(close(points[i].y, mirror.y));
    }
}

#[test]
fn curve_scales_linearly() {
    let base = heart_points(64, 10.0);
    let scaled = heart_points(64, 25.0);
    for (b, s) in base.iter().zip(&scaled) {
        assert!(close(s.x, b.x * 2.5));
        assert!(close(s.y, b.y * 2.5));
    }
}

#[test]
fn viewport_fit() {
    let v = Viewport::fit(800.0, 600.0);
    assert!(close(v.side, 570.0));
    assert!(close(v.unit, 5.7));
    assert!(close(v.border_width, 5.7));
    assert!(close(v.border_radius, 85.5));
    assert!(close(v.px(13.0), 13.0 * 5.7));

    // the smaller dimension wins
    let v = Viewport::fit(300.0, 1000.0);
    assert!(close(v.side, 285.0));
}

#[test]
fn placement_is_deterministic() {
    assert_eq!(placement(1.234, 3), placement(1.234, 3));

    let mut a = Scene::new();
    let mut b = Scene::new();
    for dt in [0.016, 0.033, 0.007, 0.016] {
        a.advance(dt);
        b.advance(dt);
    }
    for index in 0..a.hearts().len() {
        assert_eq!(a.placement(index), b.placement(index));
    }
}

#[test]
fn placement_orbits_by_index() {
    // the back heart never leaves the center
    for t in [0.0, 0.7, 12.5] {
        assert_eq!(placement(t, 0).translation, Couple::new(50.0, 50.0));
    }

    // outer hearts move as time advances
    assert_ne!(placement(0.0, 3), placement(0.5, 3));
}

#[test]
fn scene_orders_back_to_front() {
    let scene = Scene::new();
    let hearts = scene.hearts();
    assert_eq!(hearts.len(), shaping::DEFAULT_HEART_COUNT);

    for pair in hearts.windows(2) {
        assert!(pair[0].radius() > pair[1].radius());
        assert!(lightness(pair[0].color()) < lightness(pair[1].color()));
    }

    for heart in hearts {
        assert_eq!(heart.points().len(), shaping::HEART_SAMPLES);
    }
}

#[test]
fn hsl_conversion() {
    assert_eq!(hsl(0.0, 100.0, 50.0), RGBA8::new(255, 0, 0, 255));
    assert_eq!(hsl(120.0, 100.0, 50.0), RGBA8::new(0, 255, 0, 255));
    assert_eq!(hsl(0.0, 0.0, 100.0), RGBA8::new(255, 255, 255, 255));
    assert_eq!(hsl(0.0, 0.0, 0.0), RGBA8::new(0, 0, 0, 255));
}

#[test]
fn builtin_label_raster() {
    let label = Typeface::builtin().raster_label(lettering::LABEL_TEXT, 40.0, 4.0);
    assert!(!label.is_empty());
    assert_eq!(label.coverage.len(), label.width * label.height);
    assert_eq!(label.outline.len(), label.coverage.len());
    assert!(label.coverage.iter().any(|q| *q != 0));

    // the stroke mask dominates the fill mask pointwise
    for (outline, coverage) in label.outline.iter().zip(&label.coverage) {
        assert!(outline >= coverage);
    }
}

#[test]
fn empty_label_raster() {
    let label = Typeface::builtin().raster_label("", 40.0, 4.0);
    assert!(label.is_empty());
    assert!(LabelMask::empty().is_empty());
}

#[test]
fn garbage_font_falls_back() {
    assert!(Typeface::from_bytes(&[0xde, 0xad, 0xbe, 0xef]).is_err());
    assert!(Typeface::load_or_builtin(Some(&[0xde, 0xad, 0xbe, 0xef])).is_builtin());
    assert!(Typeface::load_or_builtin(None).is_builtin());
}

#[test]
fn rendered_frame() {
    let scene = Scene::with_heart_count(3);
    let mut renderer = CardRenderer::new(scene, Typeface::builtin(), 128.0, 128.0);
    let side = renderer.viewport().pixel_side();

    let mut frame = vec![RGBA8::default(); side * side];
    let mut mask = vec![0u8; side * side];
    renderer
        .render::<2, 4>(&mut frame, &mut mask, side, true)
        .unwrap();

    // corners show the background, the center is covered by a heart
    assert_eq!(frame[0], background_color());
    assert_eq!(frame[side - 1], background_color());
    assert_ne!(frame[(side / 2) * side + side / 2], background_color());

    // advancing the clock moves the orbiting hearts
    let mut next = vec![RGBA8::default(); side * side];
    renderer.advance(0.5);
    renderer
        .render::<2, 4>(&mut next, &mut mask, side, true)
        .unwrap();
    assert_ne!(frame, next);
}

#[test]
fn undersized_buffers() {
    let mut renderer = CardRenderer::new(Scene::new(), Typeface::builtin(), 64.0, 64.0);
    let side = renderer.viewport().pixel_side();

    let mut frame = vec![RGBA8::default(); side * side];
    let mut mask = vec![0u8; side];
    assert_eq!(
        renderer.render::<2, 4>(&mut frame, &mut mask, side, true),
        Err(RenderError::BadBufferSize),
    );

    let mut frame = vec![RGBA8::default(); side];
    let mut mask = vec![0u8; side * side];
    assert_eq!(
        renderer.render::<2, 4>(&mut frame, &mut mask, side, true),
        Err(RenderError::BadBufferSize),
    );
}

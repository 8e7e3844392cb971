use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use valentine::*;
use rgb::FromSlice;

const FRAMES: usize = 90;
const DT: f32 = 1.0 / 30.0;

// Writes a fixed-timestep frame sequence (frame_000.png ...). Usage:
//   animate [decorative-font.ttf]
fn main() {
    env_logger::init();

    let font_bytes = args().nth(1).and_then(|path| std::fs::read(path).ok());
    let typeface = Typeface::load_or_builtin(font_bytes.as_deref());

    let mut renderer = CardRenderer::new(Scene::new(), typeface, 480.0, 480.0);
    let side = renderer.viewport().pixel_side();
    let mut canvas: Vec<u8> = vec![0; side * side * 4];
    let mut mask = vec![0; side * side];

    for frame in 0..FRAMES {
        renderer.render::<4, 16>(canvas.as_rgba_mut(), &mut mask, side, true).unwrap();

        let mut png_buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut png_buf, side as u32, side as u32);
            encoder.set_color(Rgba);
            encoder.set_depth(Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&canvas).unwrap();
        }
        write(format!("frame_{:03}.png", frame), &png_buf).unwrap();

        renderer.advance(DT);
    }
}

use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use valentine::*;
use std::time::Instant;
use rgb::FromSlice;

// Renders one frame of the card to a PNG. Usage:
//   to_png [output.png] [decorative-font.ttf]
fn main() {
    env_logger::init();

    let mut args = args().skip(1);
    let png_name = args.next().unwrap_or_else(|| "card.png".into());
    let font_bytes = args.next().and_then(|path| std::fs::read(path).ok());
    let typeface = Typeface::load_or_builtin(font_bytes.as_deref());

    let mut renderer = CardRenderer::new(Scene::new(), typeface, 640.0, 640.0);
    renderer.scene().log_hearts();
    renderer.advance(2.0);

    let side = renderer.viewport().pixel_side();
    let mut canvas: Vec<u8> = vec![0; side * side * 4];
    let mut mask = vec![0; side * side];

    let runs = 10;
    let now = Instant::now();
    for _ in 0..runs {
        renderer.render::<4, 16>(canvas.as_rgba_mut(), &mut mask, side, true).unwrap();
    }
    println!("rendered {} times in {}ms.", runs, now.elapsed().as_millis());

    let mut png_buf = Vec::new();
    {
        let mut encoder = Encoder::new(&mut png_buf, side as u32, side as u32);
        encoder.set_color(Rgba);
        encoder.set_depth(Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&canvas).unwrap();
    }
    write(&png_name, &png_buf).unwrap();
}

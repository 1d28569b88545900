//! Integration tests for bitmap composition and file output.

use horizon_fluent_render::{Bitmap, Color, Rect, ScaleFilter, SvgImage};

const CIRCLE_SVG: &[u8] = br#"
    <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
        <circle cx="12" cy="12" r="10" fill="red"/>
    </svg>
"#;

#[test]
fn test_svg_over_raster_composition() {
    let mut surface = Bitmap::from_color(24, 24, Color::BLUE).unwrap();
    let svg = SvgImage::from_data(CIRCLE_SVG).unwrap();

    let rect = surface.rect();
    svg.render_into(&mut surface, rect);

    // Circle center covered, corners keep the background
    assert_eq!(surface.pixel(12, 12), Some(Color::RED));
    assert_eq!(surface.pixel(0, 0), Some(Color::BLUE));
}

#[test]
fn test_raster_upscale_fills_rect_exactly() {
    let source = Bitmap::from_color(1, 1, Color::GREEN).unwrap();
    let mut surface = Bitmap::new(16, 16).unwrap();

    surface.draw_bitmap(&source, Rect::new(4.0, 0.0, 8.0, 16.0), ScaleFilter::Nearest);

    for y in 0..16 {
        assert_eq!(surface.pixel(3, y), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(4, y), Some(Color::GREEN));
        assert_eq!(surface.pixel(11, y), Some(Color::GREEN));
        assert_eq!(surface.pixel(12, y), Some(Color::TRANSPARENT));
    }
}

#[test]
fn test_save_png_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circle.png");

    let svg = SvgImage::from_data(CIRCLE_SVG).unwrap();
    svg.render_to_bitmap(48, 48).unwrap().save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let decoded = Bitmap::decode(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (48, 48));
    assert_eq!(decoded.pixel(24, 24), Some(Color::RED));
    assert_eq!(decoded.pixel(0, 0), Some(Color::TRANSPARENT));
}

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as DrawRect;

use crate::models::{NestedObject, Rect};

/// Annotation colours, cycled by detection index
pub const PALETTE: [Rgb<u8>; 8] = [
    Rgb([0, 0, 255]),
    Rgb([0, 128, 255]),
    Rgb([0, 255, 255]),
    Rgb([0, 255, 0]),
    Rgb([255, 128, 0]),
    Rgb([255, 255, 0]),
    Rgb([255, 0, 0]),
    Rgb([255, 0, 255]),
];

/// Stroke width of boxes and circles, centred on the outline
pub const LINE_THICKNESS: i32 = 3;

pub fn palette_index(index: usize) -> usize {
    index % PALETTE.len()
}

pub fn palette_color(index: usize) -> Rgb<u8> {
    PALETTE[palette_index(index)]
}

fn stroke_offsets() -> std::ops::RangeInclusive<i32> {
    let half = LINE_THICKNESS / 2;
    -half..=half
}

/// Draw a box whose outline passes through the rectangle's corner pixels
pub fn draw_box(canvas: &mut RgbImage, rect: &Rect, color: Rgb<u8>) {
    for offset in stroke_offsets() {
        let width = rect.width + 2 * offset;
        let height = rect.height + 2 * offset;
        if width <= 0 || height <= 0 {
            continue;
        }
        let outline = DrawRect::at(rect.x - offset, rect.y - offset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, outline, color);
    }
}

pub fn draw_circle(canvas: &mut RgbImage, object: &NestedObject, color: Rgb<u8>) {
    for offset in stroke_offsets() {
        let radius = object.radius + offset;
        if radius <= 0 {
            continue;
        }
        draw_hollow_circle_mut(canvas, (object.center_x, object.center_y), radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_every_eight() {
        assert_eq!(palette_index(0), 0);
        assert_eq!(palette_index(7), 7);
        assert_eq!(palette_index(8), 0);
        assert_eq!(palette_color(13), PALETTE[5]);
    }

    #[test]
    fn box_covers_its_corners_with_a_thick_stroke() {
        let mut canvas = RgbImage::new(50, 50);
        let color = palette_color(3);
        draw_box(&mut canvas, &Rect::new(10, 10, 20, 20), color);

        assert_eq!(*canvas.get_pixel(10, 10), color);
        assert_eq!(*canvas.get_pixel(29, 29), color);
        assert_eq!(*canvas.get_pixel(9, 9), color);
        assert_eq!(*canvas.get_pixel(11, 11), color);
        assert_eq!(*canvas.get_pixel(20, 20), Rgb([0, 0, 0]));
    }

    #[test]
    fn drawing_outside_the_canvas_is_clipped() {
        let mut canvas = RgbImage::new(10, 10);
        draw_box(&mut canvas, &Rect::new(-5, -5, 30, 30), palette_color(0));
        draw_circle(
            &mut canvas,
            &NestedObject { center_x: 40, center_y: 40, radius: 5 },
            palette_color(1),
        );
        assert_eq!(*canvas.get_pixel(5, 5), Rgb([0, 0, 0]));
    }
}

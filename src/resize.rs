//! Fitting arbitrary source rasters into square icon canvases.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

/// Edge lengths an encoded icon family can hold, largest first.
pub const ICON_SIZES: [u32; 7] = [1024, 512, 256, 128, 48, 32, 16];

/// Returns the largest supported icon edge that does not exceed `size`,
/// clamped to the smallest supported edge.
pub fn nearest_icon_size(size: u32) -> u32 {
    ICON_SIZES.iter()
        .cloned()
        .find(|&edge| edge <= size)
        .unwrap_or(ICON_SIZES[ICON_SIZES.len() - 1])
}

/// Scales `image` to fit within `width` x `height` preserving its aspect
/// ratio, then centers it on a fully transparent canvas of exactly that size.
pub fn fit_to_canvas(image: &DynamicImage, width: u32, height: u32)
                     -> RgbaImage {
    let scaled = if image.width() == width && image.height() == height {
        image.to_rgba8()
    } else {
        image.resize(width, height, FilterType::Lanczos3).to_rgba8()
    };
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let x = (width - scaled.width().min(width)) / 2;
    let y = (height - scaled.height().min(height)) / 2;
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

/// Square form of [`fit_to_canvas`].
pub fn fit_to_square(image: &DynamicImage, size: u32) -> RgbaImage {
    fit_to_canvas(image, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(pixel: &Rgba<u8>, expected: [u8; 4]) {
        for (&actual, &wanted) in pixel.0.iter().zip(expected.iter()) {
            assert!((actual as i32 - wanted as i32).abs() <= 2,
                    "{:?} != {:?}",
                    pixel.0,
                    expected);
        }
    }

    #[test]
    fn sizes_round_down() {
        assert_eq!(nearest_icon_size(16), 16);
        assert_eq!(nearest_icon_size(31), 16);
        assert_eq!(nearest_icon_size(64), 48);
        assert_eq!(nearest_icon_size(200), 128);
        assert_eq!(nearest_icon_size(300), 256);
        assert_eq!(nearest_icon_size(1024), 1024);
    }

    #[test]
    fn sizes_clamp_at_both_ends() {
        assert_eq!(nearest_icon_size(0), 16);
        assert_eq!(nearest_icon_size(5), 16);
        assert_eq!(nearest_icon_size(5000), 1024);
    }

    #[test]
    fn wide_image_is_centered_vertically() {
        let source = RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255]));
        let canvas = fit_to_square(&DynamicImage::ImageRgba8(source), 32);
        assert_eq!(canvas.dimensions(), (32, 32));
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
        assert_eq!(canvas.get_pixel(31, 31)[3], 0);
        assert_close(canvas.get_pixel(16, 16), [255, 0, 0, 255]);
    }

    #[test]
    fn small_image_is_upscaled() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
        let canvas = fit_to_square(&DynamicImage::ImageRgba8(source), 16);
        assert_close(canvas.get_pixel(0, 0), [0, 0, 255, 255]);
        assert_close(canvas.get_pixel(15, 15), [0, 0, 255, 255]);
    }

    #[test]
    fn non_square_target() {
        let source = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        let canvas = fit_to_canvas(&DynamicImage::ImageRgba8(source), 20, 10);
        assert_eq!(canvas.dimensions(), (20, 10));
        assert_eq!(canvas.get_pixel(0, 5)[3], 0);
        assert_close(canvas.get_pixel(10, 5), [1, 2, 3, 255]);
    }
}

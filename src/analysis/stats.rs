//! Grayscale reduction and the scalar statistics behind the metrics.

use image::{GrayImage, Luma, RgbImage};

/// Reduce RGB to single-channel gray with ITU-R BT.601 luma weights
/// (0.299 R + 0.587 G + 0.114 B), rounded to the nearest integer.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = (rgb.width(), rgb.height());
    let mut gray = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let p = rgb.get_pixel(x, y);
            let luma = (0.299 * p.0[0] as f64
                + 0.587 * p.0[1] as f64
                + 0.114 * p.0[2] as f64)
                .round() as u8;
            gray.put_pixel(x, y, Luma([luma]));
        }
    }
    gray
}

/// Population variance of the 3×3 discrete Laplacian response
/// `[0,1,0; 1,-4,1; 0,1,0]`, accumulated in f64.
///
/// The operator is evaluated over interior pixels only; images narrower
/// or shorter than 3 pixels have no interior and score 0.0.
pub fn laplacian_variance(img: &GrayImage) -> f64 {
    let (w, h) = (img.width() as i32, img.height() as i32);
    if w < 3 || h < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = img.get_pixel(x as u32, y as u32).0[0] as f64;
            let top = img.get_pixel(x as u32, (y - 1) as u32).0[0] as f64;
            let bottom = img.get_pixel(x as u32, (y + 1) as u32).0[0] as f64;
            let left = img.get_pixel((x - 1) as u32, y as u32).0[0] as f64;
            let right = img.get_pixel((x + 1) as u32, y as u32).0[0] as f64;

            let response = top + bottom + left + right - 4.0 * center;
            sum += response;
            sum_sq += response * response;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }

    let mean = sum / count as f64;
    let variance = (sum_sq / count as f64) - (mean * mean);
    variance.max(0.0)
}

/// Global (min, max) intensity. `None` for an empty pixel grid.
pub fn intensity_extrema(img: &GrayImage) -> Option<(u8, u8)> {
    let mut pixels = img.pixels();
    let first = pixels.next()?.0[0];
    let mut min = first;
    let mut max = first;
    for p in pixels {
        let v = p.0[0];
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Some((min, max))
}

/// Round half away from zero at two decimal places.
pub fn round_to_2dp(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_weights_match_bt601() {
        let red = RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]));
        let green = RgbImage::from_pixel(2, 2, image::Rgb([0, 255, 0]));
        let blue = RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 255]));

        assert_eq!(rgb_to_gray(&red).get_pixel(0, 0).0[0], 76); // 0.299 * 255
        assert_eq!(rgb_to_gray(&green).get_pixel(0, 0).0[0], 150); // 0.587 * 255
        assert_eq!(rgb_to_gray(&blue).get_pixel(0, 0).0[0], 29); // 0.114 * 255
    }

    #[test]
    fn gray_of_neutral_input_is_identity() {
        // Weights sum to 1, so r == g == b must map to itself.
        for v in [0u8, 1, 127, 128, 254, 255] {
            let img = RgbImage::from_pixel(1, 1, image::Rgb([v, v, v]));
            assert_eq!(rgb_to_gray(&img).get_pixel(0, 0).0[0], v);
        }
    }

    #[test]
    fn flat_image_has_zero_variance() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        assert_eq!(laplacian_variance(&img), 0.0);
    }

    #[test]
    fn checkerboard_has_high_variance() {
        let img = GrayImage::from_fn(16, 16, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        assert!(laplacian_variance(&img) > 1000.0);
    }

    #[test]
    fn linear_gradient_has_zero_variance() {
        // Second derivative of a linear ramp is zero everywhere.
        let img = GrayImage::from_fn(64, 64, |x, _| Luma([(x * 4) as u8]));
        assert_eq!(laplacian_variance(&img), 0.0);
    }

    #[test]
    fn images_without_interior_score_zero() {
        let tiny = GrayImage::from_pixel(2, 2, Luma([9]));
        assert_eq!(laplacian_variance(&tiny), 0.0);
        let strip = GrayImage::from_fn(10, 2, |x, _| Luma([(x * 25) as u8]));
        assert_eq!(laplacian_variance(&strip), 0.0);
    }

    #[test]
    fn variance_is_never_negative() {
        let img = GrayImage::from_fn(8, 8, |x, y| Luma([((x * 31 + y * 17) % 256) as u8]));
        assert!(laplacian_variance(&img) >= 0.0);
    }

    #[test]
    fn extrema_of_flat_image_collapse() {
        let img = GrayImage::from_pixel(4, 4, Luma([77]));
        assert_eq!(intensity_extrema(&img), Some((77, 77)));
    }

    #[test]
    fn extrema_span_checkerboard_range() {
        let img = GrayImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        assert_eq!(intensity_extrema(&img), Some((0, 255)));
    }

    #[test]
    fn extrema_of_empty_grid_is_none() {
        let img = GrayImage::new(0, 0);
        assert_eq!(intensity_extrema(&img), None);
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_to_2dp(1.234), 1.23);
        assert_eq!(round_to_2dp(1.236), 1.24);
        assert_eq!(round_to_2dp(0.0), 0.0);
        assert_eq!(round_to_2dp(5.0), 5.0);
        assert_eq!(round_to_2dp(1040400.005), 1040400.01);
    }
}

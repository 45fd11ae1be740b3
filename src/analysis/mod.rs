//! Image quality analysis pipeline.
//!
//! Turns the raw bytes of an encoded raster image into three scalar
//! quality metrics: the variance of the Laplacian response (a sharpness
//! proxy) plus the global min/max intensity, both measured on a
//! Gaussian-smoothed grayscale rendition of the upload.
//!
//! Pipeline order is fixed: decode → 19×19 Gaussian blur on the RGB
//! image → BT.601 grayscale → statistics. Both metrics are computed on
//! the same blurred-gray grid.

pub mod filter;
pub mod stats;

pub use filter::gaussian_blur;
pub use stats::{intensity_extrema, laplacian_variance, rgb_to_gray};

use crate::config;

/// Upper bound for an uploaded image payload.
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;
/// Shorter than any supported container header; rejected before decode.
pub const MIN_IMAGE_BYTES: usize = 16;

/// Failures while turning upload bytes into metrics. All of these are
/// request-local; none should take the service down.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("image data is empty")]
    EmptyUpload,
    #[error("image data too small to be a valid image: {0} bytes")]
    TooSmall(usize),
    #[error("image data too large: {0} bytes")]
    TooLarge(usize),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("decoded image has zero width or height")]
    EmptyImage,
}

/// The computed metric triple for one upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    /// Variance of the Laplacian response, rounded to 2 decimals.
    pub laplacian: f64,
    /// Minimum intensity of the blurred grayscale grid.
    pub min_val: u8,
    /// Maximum intensity of the blurred grayscale grid.
    pub max_val: u8,
}

/// Seam between the HTTP layer and the pixel pipeline. Handlers hold a
/// `dyn ImageAnalyzer` so tests can substitute a scripted one.
pub trait ImageAnalyzer: Send + Sync {
    fn analyze(&self, bytes: &[u8]) -> Result<ImageMetrics, AnalysisError>;
}

/// Production analyzer: Gaussian blur then grayscale then statistics.
pub struct LaplacianAnalyzer {
    kernel_size: u32,
}

impl LaplacianAnalyzer {
    pub fn new() -> Self {
        Self {
            kernel_size: config::BLUR_KERNEL_SIZE,
        }
    }
}

impl Default for LaplacianAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageAnalyzer for LaplacianAnalyzer {
    fn analyze(&self, bytes: &[u8]) -> Result<ImageMetrics, AnalysisError> {
        validate_image_bytes(bytes)?;

        let decoded = image::load_from_memory(bytes)?;
        // Normalize to RGB: alpha is dropped, grayscale inputs expand to
        // three equal channels.
        let rgb = decoded.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(AnalysisError::EmptyImage);
        }

        if let Ok(format) = image::guess_format(bytes) {
            tracing::debug!(
                ?format,
                width = rgb.width(),
                height = rgb.height(),
                "image decoded"
            );
        }

        let blurred = filter::gaussian_blur(&rgb, self.kernel_size);
        let gray = stats::rgb_to_gray(&blurred);

        let (min_val, max_val) =
            stats::intensity_extrema(&gray).ok_or(AnalysisError::EmptyImage)?;
        let laplacian = stats::round_to_2dp(stats::laplacian_variance(&gray));

        Ok(ImageMetrics {
            laplacian,
            min_val,
            max_val,
        })
    }
}

/// Size sanity checks that run before the decoder sees the bytes.
pub fn validate_image_bytes(bytes: &[u8]) -> Result<(), AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::EmptyUpload);
    }
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(AnalysisError::TooSmall(bytes.len()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AnalysisError::TooLarge(bytes.len()));
    }
    Ok(())
}

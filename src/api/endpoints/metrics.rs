//! Image metrics endpoint.
//!
//! `POST /metrics` accepts a multipart upload with a single field named
//! `data` holding the raw bytes of an encoded image, runs the analysis
//! pipeline on a blocking worker thread, and returns the metric triple.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::analysis::ImageMetrics;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Multipart field that carries the image bytes.
pub const UPLOAD_FIELD: &str = "data";

/// Response body for `POST /metrics`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub laplacian: f64,
    pub min_val: u8,
    pub max_val: u8,
}

impl From<ImageMetrics> for MetricsResponse {
    fn from(m: ImageMetrics) -> Self {
        Self {
            laplacian: m.laplacian,
            min_val: m.min_val,
            max_val: m.max_val,
        }
    }
}

/// Handler for `POST /metrics`: computes sharpness and intensity
/// extrema for a single uploaded image.
///
/// The first field named `data` wins; fields with other names are skipped.
pub async fn compute(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<MetricsResponse>, ApiError> {
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == UPLOAD_FIELD {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?;
            data = Some(bytes);
            break;
        }
        tracing::debug!(field = %name, "ignoring unexpected multipart field");
    }

    let data = data.ok_or(ApiError::MissingField(UPLOAD_FIELD))?;
    let size = data.len();

    // Pixel loops are CPU-bound; keep them off the async workers.
    let analyzer = ctx.analyzer.clone();
    let metrics = tokio::task::spawn_blocking(move || analyzer.analyze(&data))
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))??;

    tracing::info!(
        bytes = size,
        laplacian = metrics.laplacian,
        min = metrics.min_val,
        max = metrics.max_val,
        "image metrics computed"
    );

    Ok(Json(metrics.into()))
}

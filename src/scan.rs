//! Per-frame scan pipeline
//!
//! validate sizes → derive crop window → recognize → normalize. Any failure
//! aborts the whole frame; no partial tree is returned.

use crate::error::ScanError;
use crate::geometry::{CropWindow, Size};
use crate::normalize::normalize;
use crate::recognizer::TextRecognizer;
use crate::tree::{OcrFrame, RawRecognitionResult};
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Viewport the result will be drawn over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// On-screen preview size
    pub preview_size: Size,
    /// Presentation size; the preview size when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_size: Option<Size>,
}

impl Viewport {
    pub fn new(preview_size: Size) -> Self {
        Self {
            preview_size,
            target_size: None,
        }
    }

    pub fn with_target(mut self, target_size: Size) -> Self {
        self.target_size = Some(target_size);
        self
    }

    /// Crop window for a capture frame of the given size
    pub fn crop_window(&self, capture: Size) -> Result<CropWindow, ScanError> {
        let target = self.target_size.unwrap_or(self.preview_size);
        let crop = CropWindow::compute_for_target(capture, self.preview_size, target)?;

        if !crop.fits_within(capture) {
            tracing::debug!(
                "Crop window {:?} extends past {}x{} capture frame",
                crop,
                capture.width,
                capture.height
            );
        }

        Ok(crop)
    }
}

/// Normalize an already-recognized result for display in `viewport`
pub fn map_result(
    raw: &RawRecognitionResult,
    capture: Size,
    viewport: &Viewport,
) -> Result<OcrFrame, ScanError> {
    let crop = viewport.crop_window(capture)?;
    Ok(normalize(raw, &crop, capture).into())
}

/// Recognize text in an upright capture frame and map it into `viewport`
///
/// Sizes are validated before the recognizer runs, so a bad viewport never
/// costs a recognition pass.
pub fn scan_frame(
    recognizer: &dyn TextRecognizer,
    image: &DynamicImage,
    viewport: &Viewport,
) -> Result<OcrFrame, ScanError> {
    let (width, height) = image.dimensions();
    let capture = Size::new(f64::from(width), f64::from(height));
    let crop = viewport.crop_window(capture)?;

    let start = Instant::now();
    let raw = recognizer.recognize(image)?;

    tracing::info!(
        "{} recognized {} blocks in {}ms ({}x{} frame)",
        recognizer.name(),
        raw.blocks.len(),
        start.elapsed().as_millis(),
        width,
        height
    );

    Ok(normalize(&raw, &crop, capture).into())
}

/// Decode encoded frame bytes (PNG, JPEG, ...) into an image
pub fn decode_frame(bytes: &[u8]) -> Result<DynamicImage, ScanError> {
    image::load_from_memory(bytes).map_err(|e| ScanError::DecodeError(e.to_string()))
}

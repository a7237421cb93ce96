//! Capture-frame geometry and crop window derivation
//!
//! All coordinates are pixels with the origin at the top-left corner of the
//! capture frame.

use crate::error::ScanError;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a capture frame, preview viewport or target size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject zero, negative and non-finite dimensions.
    ///
    /// `input` names the offending size in the error ("capture", "preview", ...).
    pub fn validate(self, input: &'static str) -> Result<Self, ScanError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(self)
        } else {
            Err(ScanError::InvalidDimension {
                input,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Axis-aligned box, `x`/`y` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Smallest rect enclosing all points, `None` for an empty slice
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Corner point of a detected box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Centered window in capture-frame coordinates, aspect-matched to the target
///
/// The window is not clamped: when the target aspect ratio asks for more
/// frame than exists on one axis the origin goes negative and the window
/// extends past the frame edges. `CropWindow::default()` is the identity
/// (no translation).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropWindow {
    /// Crop window for a preview that is also the presentation target
    pub fn compute(capture: Size, preview: Size) -> Result<Self, ScanError> {
        Self::compute_for_target(capture, preview, preview)
    }

    /// Crop window for a capture frame shown in `preview` and presented at `target`
    pub fn compute_for_target(
        capture: Size,
        preview: Size,
        target: Size,
    ) -> Result<Self, ScanError> {
        let capture = capture.validate("capture")?;
        let preview = preview.validate("preview")?;
        let target = target.validate("target")?;

        let scale_width = target.width / preview.width;
        let width = capture.width * scale_width;
        let aspect_ratio = target.height / target.width;
        let height = width * aspect_ratio;

        let crop = Self {
            x: (capture.width - width) / 2.0,
            y: (capture.height - height) / 2.0,
            width,
            height,
        };

        // Extreme but valid inputs can still overflow the scaled window
        if [crop.x, crop.y, crop.width, crop.height].iter().all(|v| v.is_finite()) {
            Ok(crop)
        } else {
            Err(ScanError::InvalidDimension {
                input: "crop window",
                width: crop.width,
                height: crop.height,
            })
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether the window lies entirely inside a frame of the given size
    pub fn fits_within(&self, frame: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= frame.width
            && self.y + self.height <= frame.height
    }
}

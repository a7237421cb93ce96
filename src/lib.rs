//! Maps on-device OCR results from capture-frame pixels into the coordinate
//! space of a live camera preview, so overlay boxes line up with the text.

pub mod engines;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod recognizer;
pub mod scan;
pub mod tree;

pub use error::ScanError;
pub use geometry::{CropWindow, Point, Rect, Size};
pub use normalize::{normalize, restore};
pub use recognizer::TextRecognizer;
pub use scan::{decode_frame, map_result, scan_frame, Viewport};
pub use tree::{OcrFrame, RawRecognitionResult, Text};

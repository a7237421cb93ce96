//! Recognition result trees
//!
//! `Raw*` types are what a recognizer produces, in capture-frame coordinates,
//! with every field optional on the wire. The remaining types are the
//! normalized output handed to overlay renderers; their camelCase field names
//! are the public JSON contract.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Leaf of the raw hierarchy, usually a word
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextElement {
    pub text: String,
    pub frame: Option<Rect>,
    pub corner_points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextLine {
    pub text: String,
    pub frame: Option<Rect>,
    pub corner_points: Vec<Point>,
    /// Language codes in engine order; engines may report a language without a code
    pub recognized_languages: Vec<Option<String>>,
    pub elements: Vec<RawTextElement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextBlock {
    pub text: String,
    pub frame: Option<Rect>,
    pub corner_points: Vec<Point>,
    pub recognized_languages: Vec<Option<String>>,
    pub lines: Vec<RawTextLine>,
}

/// Recognizer output for one frame, in capture-frame coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecognitionResult {
    pub text: String,
    pub blocks: Vec<RawTextBlock>,
}

/// Crop-relative box plus the capture-space center it came from
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub bounding_center_x: f64,
    pub bounding_center_y: f64,
}

impl BoundingFrame {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub text: String,
    pub corner_points: Vec<Point>,
    pub frame: BoundingFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub text: String,
    pub recognized_languages: Vec<String>,
    pub corner_points: Vec<Point>,
    pub frame: BoundingFrame,
    pub elements: Vec<TextElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub recognized_languages: Vec<String>,
    pub corner_points: Vec<Point>,
    pub frame: BoundingFrame,
    pub lines: Vec<TextLine>,
}

/// Normalized result for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    pub blocks: Vec<TextBlock>,
    /// Crop window origin in capture coordinates
    pub x_axis: f64,
    pub y_axis: f64,
    /// Capture frame dimensions
    pub frame_width: f64,
    pub frame_height: f64,
}

/// Top-level response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrFrame {
    pub result: Text,
}

impl From<Text> for OcrFrame {
    fn from(result: Text) -> Self {
        Self { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_tree_tolerates_missing_fields() {
        let raw: RawRecognitionResult = serde_json::from_value(json!({
            "blocks": [{ "lines": [{ "elements": [{}] }] }]
        }))
        .unwrap();

        assert_eq!(raw.text, "");
        let line = &raw.blocks[0].lines[0];
        assert!(line.frame.is_none());
        assert!(line.recognized_languages.is_empty());
        assert_eq!(line.elements[0], RawTextElement::default());
    }

    #[test]
    fn test_null_language_codes_deserialize() {
        let line: RawTextLine = serde_json::from_value(json!({
            "recognizedLanguages": ["en", null, "de"]
        }))
        .unwrap();
        assert_eq!(
            line.recognized_languages,
            vec![Some("en".to_string()), None, Some("de".to_string())]
        );
    }

    #[test]
    fn test_output_field_names() {
        let frame = OcrFrame::from(Text {
            text: "Hi".to_string(),
            blocks: vec![TextBlock {
                text: "Hi".to_string(),
                recognized_languages: vec!["en".to_string()],
                corner_points: vec![Point::new(1.0, 2.0)],
                frame: BoundingFrame::default(),
                lines: vec![],
            }],
            x_axis: 0.0,
            y_axis: -500.0,
            frame_width: 1000.0,
            frame_height: 1000.0,
        });

        let value = serde_json::to_value(&frame).unwrap();
        let result = &value["result"];
        assert_eq!(result["xAxis"], json!(0.0));
        assert_eq!(result["yAxis"], json!(-500.0));
        assert_eq!(result["frameWidth"], json!(1000.0));
        assert_eq!(result["frameHeight"], json!(1000.0));

        let block = &result["blocks"][0];
        assert_eq!(block["recognizedLanguages"], json!(["en"]));
        assert_eq!(block["cornerPoints"], json!([{ "x": 1.0, "y": 2.0 }]));
        assert_eq!(block["lines"], json!([]));
        for key in ["x", "y", "width", "height", "boundingCenterX", "boundingCenterY"] {
            assert!(block["frame"].get(key).is_some(), "missing frame.{}", key);
        }
    }
}

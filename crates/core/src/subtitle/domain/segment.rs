use serde::Serialize;

use crate::shared::caption_error::CaptionError;

/// One timed caption unit as emitted by the speech engine.
///
/// Text is trimmed once at construction. A segment whose trimmed text is
/// empty (engine silence marker) is still valid; callers decide whether to
/// keep it. Overlapping, out-of-order and zero-length segments are allowed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    start: f64,
    end: f64,
    text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, raw_text: &str) -> Result<Self, CaptionError> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
            return Err(CaptionError::InvalidSegment { start, end });
        }
        Ok(Self {
            start,
            end,
            text: raw_text.trim().to_string(),
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

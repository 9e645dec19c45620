use super::segment::Segment;
use super::timestamp;

/// What to do with segments whose text trimmed to nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptySegments {
    /// Emit a block with an empty text line (byte-for-byte engine output).
    #[default]
    Keep,
    /// Skip the block; remaining blocks are still numbered 1..N.
    Drop,
}

/// Ordered caption segments in engine emission order.
///
/// The document never re-sorts: engines emit chronologically, and any
/// other input order is reproduced as-is. Text is not escaped, so a caption
/// containing a blank line splits its SRT block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubtitleDocument {
    segments: Vec<Segment>,
}

impl SubtitleDocument {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// SubRip body keeping every segment.
    pub fn to_srt(&self) -> String {
        self.to_srt_with(EmptySegments::Keep)
    }

    /// SubRip body: per block an index, a `start --> end` line, the text and
    /// a blank line.
    pub fn to_srt_with(&self, empty: EmptySegments) -> String {
        let mut out = String::new();
        let kept = self
            .segments
            .iter()
            .filter(|seg| empty == EmptySegments::Keep || !seg.is_empty());

        for (index, seg) in kept.enumerate() {
            // Segment bounds are validated at construction
            let start = timestamp::to_millis(seg.start()).unwrap_or_default();
            let end = timestamp::to_millis(seg.end()).unwrap_or_default();
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                index + 1,
                timestamp::format_millis(start),
                timestamp::format_millis(end),
                seg.text()
            ));
        }
        out
    }
}

impl From<Vec<Segment>> for SubtitleDocument {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

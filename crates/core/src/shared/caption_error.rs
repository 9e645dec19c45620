use std::path::PathBuf;

use thiserror::Error;

use crate::shared::model_resolver::ModelResolveError;

/// Every way a caption request can fail.
///
/// No stage retries: the first error is terminal for the request, and the
/// pipeline only guarantees that transient files are cleaned up.
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid segment: end {end}s is before start {start}s")]
    InvalidSegment { start: f64, end: f64 },

    #[error("{tool} error: {stderr}")]
    ExternalTool { tool: String, stderr: String },

    #[error("transcription engine error: {0}")]
    Engine(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("{context} ({}): {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ModelResolve(#[from] ModelResolveError),
}

impl CaptionError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaptionError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// True when the caller caused the failure (bad upload, unknown file),
    /// false for tool, engine and filesystem failures on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CaptionError::InvalidInput(_)
                | CaptionError::InvalidSegment { .. }
                | CaptionError::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_input(CaptionError::InvalidInput("no file".into()), true)]
    #[case::invalid_segment(CaptionError::InvalidSegment { start: 2.0, end: 1.0 }, true)]
    #[case::not_found(CaptionError::NotFound("a.mkv".into()), true)]
    #[case::external_tool(
        CaptionError::ExternalTool { tool: "ffmpeg".into(), stderr: "boom".into() },
        false
    )]
    #[case::engine(CaptionError::Engine("oom".into()), false)]
    fn test_client_error_classification(#[case] err: CaptionError, #[case] expected: bool) {
        assert_eq!(err.is_client_error(), expected);
    }

    #[test]
    fn test_external_tool_message_keeps_stderr_verbatim() {
        let err = CaptionError::ExternalTool {
            tool: "ffmpeg".into(),
            stderr: "moov atom not found\nInvalid data".into(),
        };
        assert_eq!(
            err.to_string(),
            "ffmpeg error: moov atom not found\nInvalid data"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CaptionError::io(
            "failed to write subtitle file",
            "/tmp/x/captions.srt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x/captions.srt"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}

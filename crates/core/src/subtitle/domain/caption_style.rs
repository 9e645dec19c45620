use std::fmt;

/// Cosmetic decoration applied to a finished SRT body.
///
/// Decorated styles replace every `.` in the whole document, caption text
/// included. Timestamps use `,` and are never touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptionStyle {
    #[default]
    Formal,
    Meme,
    Aesthetic,
}

impl CaptionStyle {
    pub const ALL: &[CaptionStyle] = &[
        CaptionStyle::Formal,
        CaptionStyle::Meme,
        CaptionStyle::Aesthetic,
    ];

    /// Unknown values fall back to `Formal`; style is never a reason to
    /// reject a request.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "meme" => CaptionStyle::Meme,
            "aesthetic" => CaptionStyle::Aesthetic,
            _ => CaptionStyle::Formal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionStyle::Formal => "formal",
            CaptionStyle::Meme => "meme",
            CaptionStyle::Aesthetic => "aesthetic",
        }
    }

    /// Replacement for each `.`, or `None` for the identity style.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            CaptionStyle::Formal => None,
            CaptionStyle::Meme => Some(" 😄"),
            CaptionStyle::Aesthetic => Some(" ✨"),
        }
    }

    pub fn apply(&self, srt: &str) -> String {
        match self.token() {
            Some(token) => srt.replace('.', token),
            None => srt.to_string(),
        }
    }
}

impl fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering mode selected by the letter after `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderMode {
    /// `?`
    Smart,
    /// `?i`
    Int,
    /// `?s`
    Str,
    /// `?f`
    Float,
    /// `?e`
    Escaped,
    /// `?p`
    Part,
    /// `?a`
    Array,
    /// `?u`
    Assign,
}

impl PlaceholderMode {
    fn from_marker(b: u8) -> Option<Self> {
        match b {
            b'i' => Some(Self::Int),
            b's' => Some(Self::Str),
            b'f' => Some(Self::Float),
            b'e' => Some(Self::Escaped),
            b'p' => Some(Self::Part),
            b'a' => Some(Self::Array),
            b'u' => Some(Self::Assign),
            _ => None,
        }
    }

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Smart => "?",
            Self::Int => "?i",
            Self::Str => "?s",
            Self::Float => "?f",
            Self::Escaped => "?e",
            Self::Part => "?p",
            Self::Array => "?a",
            Self::Assign => "?u",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token {
    pub(super) start: usize,
    pub(super) end: usize,
    pub(super) mode: PlaceholderMode,
}

/// Find the next token at or after `from`. Every `?` is a token; an unknown letter after it
/// is left in the template.
pub(super) fn next_token(bytes: &[u8], from: usize) -> Option<Token> {
    let offset = bytes.get(from..)?.iter().position(|&b| b == b'?')?;
    let start = from + offset;
    match bytes.get(start + 1).copied().and_then(PlaceholderMode::from_marker) {
        Some(mode) => Some(Token {
            start,
            end: start + 2,
            mode,
        }),
        None => Some(Token {
            start,
            end: start + 1,
            mode: PlaceholderMode::Smart,
        }),
    }
}

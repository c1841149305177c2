/// Maximum length (in characters) of the sanitized topic used as a file stem.
const MAX_STEM_CHARS: usize = 50;
const FALLBACK_STEM: &str = "untitled";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("Please enter a topic first.")]
    Empty,
}

/// A user-supplied topic. Holds the input verbatim; only validity is checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        if raw.trim().is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe stem: alphanumerics, spaces, `_` and `-` only, at most 50 characters.
    pub fn file_stem(&self) -> String {
        let kept: String = self
            .0
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
            .take(MAX_STEM_CHARS)
            .collect();
        let trimmed = kept.trim();
        if trimmed.is_empty() {
            FALLBACK_STEM.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Speech synthesis through the Google Translate TTS endpoint.

pub mod chunk;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use chunk::{MAX_CHUNK_CHARS, split_text};

const API_BASE: &str = "https://translate.google.com";

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("nothing to synthesize: text is empty")]
    EmptyText,

    #[error("speech service error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("speech service returned no audio for chunk {0}")]
    EmptyAudio(usize),

    #[error("invalid speech service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Converts text to MP3 audio bytes.
/// Implemented by `GoogleTts` for production; fakes used in narrator and pipeline tests.
pub trait SpeechSynthesizer {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError>;
}

#[derive(Clone, Debug)]
pub struct GoogleTts {
    http: Client,
    base_url: String,
}

impl GoogleTts {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    async fn fetch_chunk(
        &self,
        text: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, TtsError> {
        let total = total.to_string();
        let idx_param = idx.to_string();
        let textlen = text.chars().count().to_string();
        let url = Url::parse_with_params(
            &format!("{}/translate_tts", self.base_url),
            &[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", lang),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx_param.as_str()),
                ("textlen", textlen.as_str()),
            ],
        )?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let end = body.floor_char_boundary(200);
            warn!(status = %status, idx, "speech service error");
            return Err(TtsError::Status {
                status: status.as_u16(),
                body: body[..end].to_string(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio(idx));
        }
        Ok(audio.to_vec())
    }
}

impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        // MP3 frames are self-delimiting, so per-chunk responses concatenate into one stream.
        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, lang, idx, total).await?);
        }

        debug!(chunks = total, bytes = audio.len(), "speech synthesis complete");
        Ok(audio)
    }
}

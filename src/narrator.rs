use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::topic::Topic;
use crate::tts::{SpeechSynthesizer, TtsError};

pub const DEFAULT_OUTPUT_DIR: &str = "output_audio";
const AUDIO_EXTENSION: &str = "mp3";
const NARRATION_LANG: &str = "en";

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A synthesized narration written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Spoken text: a fixed preamble naming the raw topic, then the summary.
pub fn narration_script(topic: &Topic, summary: &str) -> String {
    format!("Topic is: {topic}. Let's start. {summary}")
}

/// Output file for a topic. Identical topics map to the same path.
pub fn audio_path(output_dir: &Path, topic: &Topic) -> PathBuf {
    output_dir.join(format!("{}.{AUDIO_EXTENSION}", topic.file_stem()))
}

/// Synthesize the narration for `summary` and write it under `output_dir`, replacing any previous file.
pub async fn narrate(
    synth: &impl SpeechSynthesizer,
    output_dir: &Path,
    topic: &Topic,
    summary: &str,
) -> Result<AudioArtifact, NarrationError> {
    let script = narration_script(topic, summary);
    debug!(chars = script.chars().count(), "narration script ready");

    let audio = synth.synthesize(&script, NARRATION_LANG).await?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| NarrationError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let path = audio_path(output_dir, topic);
    tokio::fs::write(&path, &audio)
        .await
        .map_err(|source| NarrationError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), bytes = audio.len(), "audio written");
    Ok(AudioArtifact {
        path,
        bytes: audio.len(),
    })
}

//! Terminal rendering of pipeline progress and results.

use crate::narrator::AudioArtifact;
use crate::news::HeadlineBatch;
use crate::pipeline::Stage;

/// Replaces newlines (which would break heading structure) with spaces.
pub(crate) fn sanitize_heading(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

pub fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Fetching => "Fetching latest news...",
        Stage::Summarizing => "Summarizing with Gemini...",
        Stage::Narrating => "Converting summary to speech...",
    }
}

pub fn format_title(topic: &str) -> String {
    format!("# News: {}\n\n", sanitize_heading(topic.trim()))
}

/// Main Topic and Top Headlines sections, shown as soon as the search returns.
pub fn format_headlines(batch: &HeadlineBatch) -> String {
    let mut output = String::from("## Main Topic\n\n");
    output.push_str(&batch.main_topic);
    output.push_str("\n\n## Top Headlines\n\n");
    if batch.headline_text.is_empty() {
        output.push_str("(no article in the first batch had a description)\n");
    } else {
        for line in batch.headline_text.lines() {
            output.push_str(&format!("- {line}\n"));
        }
    }
    output.push('\n');
    output
}

pub fn format_summary(summary: &str) -> String {
    format!("## Summary\n\n{}\n\n", summary.trim_end())
}

pub fn format_audio(audio: &AudioArtifact) -> String {
    format!(
        "## Audio\n\n{} ({} bytes)\n",
        audio.path.display(),
        audio.bytes
    )
}

//! Retrieve → summarize → narrate, strictly in sequence.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::gemini::{GeminiError, Summarize};
use crate::narrator::{self, AudioArtifact, NarrationError};
use crate::news::{HeadlineBatch, NewsError, NewsSource};
use crate::topic::{Topic, TopicError};
use crate::tts::SpeechSynthesizer;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    InvalidTopic(#[from] TopicError),

    #[error("{0}")]
    Fetch(#[from] NewsError),

    #[error("summarization failed: {0}")]
    Generation(#[from] GeminiError),

    #[error("narration failed: {0}")]
    Synthesis(#[from] NarrationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl PipelineError {
    /// Validation problems and empty searches are warnings; everything else is a failed run.
    pub fn severity(&self) -> Severity {
        match self {
            PipelineError::InvalidTopic(_) | PipelineError::Fetch(NewsError::NoArticles) => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Summarizing,
    Narrating,
}

/// Progress events emitted while a run advances.
#[derive(Debug)]
pub enum Progress<'a> {
    Started(Stage),
    HeadlinesReady(&'a HeadlineBatch),
    SummaryReady(&'a str),
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub topic: String,
    pub headlines: HeadlineBatch,
    pub summary: String,
    pub audio: AudioArtifact,
}

pub struct Pipeline<N, S, T> {
    news: N,
    summarizer: S,
    synthesizer: T,
    output_dir: PathBuf,
}

impl<N, S, T> Pipeline<N, S, T>
where
    N: NewsSource,
    S: Summarize,
    T: SpeechSynthesizer,
{
    pub fn new(news: N, summarizer: S, synthesizer: T, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            news,
            summarizer,
            synthesizer,
            output_dir: output_dir.into(),
        }
    }

    /// Run all three stages for `raw_topic`. An invalid topic fails before any network call.
    pub async fn run(
        &self,
        raw_topic: &str,
        mut observer: impl FnMut(Progress<'_>),
    ) -> Result<Report, PipelineError> {
        let topic = Topic::parse(raw_topic)?;
        info!(%topic, "pipeline started");

        observer(Progress::Started(Stage::Fetching));
        let headlines = self.news.headlines(&topic).await?;
        info!(
            articles = headlines.article_count,
            main_topic = %headlines.main_topic,
            "headlines fetched"
        );
        observer(Progress::HeadlinesReady(&headlines));

        observer(Progress::Started(Stage::Summarizing));
        let summary = self.summarizer.summarize(&headlines.headline_text).await?;
        info!(chars = summary.chars().count(), "summary generated");
        observer(Progress::SummaryReady(&summary));

        observer(Progress::Started(Stage::Narrating));
        let audio = narrator::narrate(&self.synthesizer, &self.output_dir, &topic, &summary).await?;

        Ok(Report {
            topic: topic.as_str().to_string(),
            headlines,
            summary,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::TtsError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Calls {
        news: AtomicUsize,
        summarize: Mutex<Vec<String>>,
        synthesize: Mutex<Vec<String>>,
    }

    struct FakeNews<'a> {
        calls: &'a Calls,
        result: fn() -> Result<HeadlineBatch, NewsError>,
    }

    impl NewsSource for FakeNews<'_> {
        async fn headlines(&self, _topic: &Topic) -> Result<HeadlineBatch, NewsError> {
            self.calls.news.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    struct FakeSummarizer<'a> {
        calls: &'a Calls,
        fail: bool,
    }

    impl Summarize for FakeSummarizer<'_> {
        async fn summarize(&self, headlines: &str) -> Result<String, GeminiError> {
            self.calls.summarize.lock().unwrap().push(headlines.to_string());
            if self.fail {
                return Err(GeminiError::RateLimited);
            }
            Ok("Three stories about space.".to_string())
        }
    }

    struct FakeSynth<'a> {
        calls: &'a Calls,
    }

    impl SpeechSynthesizer for FakeSynth<'_> {
        async fn synthesize(&self, text: &str, _lang: &str) -> Result<Vec<u8>, TtsError> {
            self.calls.synthesize.lock().unwrap().push(text.to_string());
            Ok(b"audio".to_vec())
        }
    }

    fn three_space_articles() -> Result<HeadlineBatch, NewsError> {
        crate::news::build_batch(&[
            article("Rocket launch", "A rocket lifted off."),
            article("Mars rover", "The rover found ice."),
            article("New telescope", "First images released."),
        ])
    }

    fn article(title: &str, description: &str) -> crate::news::Article {
        crate::news::Article {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        }
    }

    fn pipeline<'a>(
        calls: &'a Calls,
        news: fn() -> Result<HeadlineBatch, NewsError>,
        fail_summary: bool,
        out: &std::path::Path,
    ) -> Pipeline<FakeNews<'a>, FakeSummarizer<'a>, FakeSynth<'a>> {
        Pipeline::new(
            FakeNews {
                calls,
                result: news,
            },
            FakeSummarizer {
                calls,
                fail: fail_summary,
            },
            FakeSynth { calls },
            out,
        )
    }

    #[tokio::test]
    async fn end_to_end_space() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output_audio");
        let calls = Calls::default();
        let mut events = Vec::new();

        let report = pipeline(&calls, three_space_articles, false, &out)
            .run("Space", |p| {
                events.push(match p {
                    Progress::Started(stage) => format!("{stage:?}"),
                    Progress::HeadlinesReady(_) => "headlines".to_string(),
                    Progress::SummaryReady(_) => "summary".to_string(),
                })
            })
            .await
            .unwrap();

        let expected_text =
            "Rocket launch. A rocket lifted off.\nMars rover. The rover found ice.\nNew telescope. First images released.";
        assert_eq!(report.headlines.headline_text, expected_text);
        assert_eq!(report.headlines.main_topic, "Rocket launch");
        assert_eq!(*calls.summarize.lock().unwrap(), vec![expected_text.to_string()]);
        assert_eq!(
            *calls.synthesize.lock().unwrap(),
            vec!["Topic is: Space. Let's start. Three stories about space.".to_string()]
        );
        assert_eq!(report.audio.path, out.join("Space.mp3"));
        assert!(report.audio.path.exists());
        assert_eq!(
            events,
            vec!["Fetching", "headlines", "Summarizing", "summary", "Narrating"]
        );
    }

    #[tokio::test]
    async fn blank_topic_makes_no_calls() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Calls::default();

        let err = pipeline(&calls, three_space_articles, false, dir.path())
            .run("   ", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::InvalidTopic(TopicError::Empty)));
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(calls.news.load(Ordering::SeqCst), 0);
        assert!(calls.summarize.lock().unwrap().is_empty());
        assert!(calls.synthesize.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_stops_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Calls::default();

        let err = pipeline(
            &calls,
            || {
                Err(NewsError::Fetch {
                    status: 401,
                    body: "apiKeyInvalid".into(),
                })
            },
            false,
            dir.path(),
        )
        .run("Space", |_| {})
        .await
        .unwrap_err();

        assert!(err.to_string().contains("apiKeyInvalid"));
        assert_eq!(err.severity(), Severity::Error);
        assert!(calls.summarize.lock().unwrap().is_empty());
        assert!(calls.synthesize.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_articles_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Calls::default();

        let err = pipeline(&calls, || Err(NewsError::NoArticles), false, dir.path())
            .run("obscure", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(NewsError::NoArticles)));
        assert_eq!(err.severity(), Severity::Warning);
        assert!(calls.summarize.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generation_error_skips_narration() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output_audio");
        let calls = Calls::default();

        let err = pipeline(&calls, three_space_articles, true, &out)
            .run("Space", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Generation(_)));
        assert!(calls.synthesize.lock().unwrap().is_empty());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn headlines_reach_observer_before_generation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let mut seen = None;

        let err = pipeline(&calls, three_space_articles, true, dir.path())
            .run("Space", |p| {
                if let Progress::HeadlinesReady(batch) = p {
                    seen = Some(batch.clone());
                }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Generation(_)));
        let batch = seen.expect("headlines were not reported");
        assert_eq!(batch.main_topic, "Rocket launch");
        assert_eq!(batch.headline_text.lines().count(), 3);
    }

    #[tokio::test]
    async fn repeated_runs_reuse_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let p = pipeline(&calls, three_space_articles, false, dir.path());

        let first = p.run("Space", |_| {}).await.unwrap();
        let second = p.run("Space", |_| {}).await.unwrap();

        assert_eq!(first.audio.path, second.audio.path);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

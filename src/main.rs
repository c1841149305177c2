mod config;
mod gemini;
mod narrator;
mod news;
mod pipeline;
mod render;
mod topic;
mod tts;

pub const USER_AGENT: &str = concat!("news-reader/", env!("CARGO_PKG_VERSION"));

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::{debug, info};

use config::Config;
use gemini::GeminiClient;
use news::NewsClient;
use pipeline::{Pipeline, Progress, Severity, Stage};
use tts::GoogleTts;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the latest news on a topic, summarize it, and narrate the summary to an MP3.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Topic to search for (e.g. "Artificial Intelligence", "Space")
    #[arg(required = true, num_args = 1..)]
    topic: Vec<String>,

    /// Directory for synthesized audio
    #[arg(long, env = "NEWS_READER_OUTPUT_DIR", default_value = narrator::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Gemini model (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Print the final report as JSON instead of streaming Markdown sections
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("error: invalid log filter: {e}");
        return ExitCode::from(2);
    }
    match &dotenv {
        Some(path) => debug!(path = %path.display(), "loaded .env"),
        None => debug!("no .env file loaded"),
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let http = match Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
    {
        Ok(http) => http,
        Err(e) => {
            eprintln!("error: failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let model = cli.model.as_deref().unwrap_or(&config.model);
    let gemini = GeminiClient::new(http.clone(), config.google_api_key.clone(), model);
    info!(model = gemini.model(), output_dir = %cli.output_dir.display(), "news-reader ready");

    let pipeline = Pipeline::new(
        NewsClient::new(http.clone(), config.news_api_key.clone()),
        gemini,
        GoogleTts::new(http),
        cli.output_dir,
    );

    let topic = cli.topic.join(" ");
    let markdown = !cli.json;
    let result = pipeline
        .run(&topic, |progress| match progress {
            Progress::Started(stage) => {
                eprintln!("{}", render::stage_message(stage));
                if stage == Stage::Fetching && markdown {
                    print!("{}", render::format_title(&topic));
                }
            }
            Progress::HeadlinesReady(batch) => {
                eprintln!("News fetched successfully ({} articles).", batch.article_count);
                if markdown {
                    print!("{}", render::format_headlines(batch));
                }
            }
            Progress::SummaryReady(summary) => {
                if markdown {
                    print!("{}", render::format_summary(summary));
                }
            }
        })
        .await;

    match result {
        Ok(report) => {
            if markdown {
                print!("{}", render::format_audio(&report.audio));
            } else {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: failed to serialize report: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            eprintln!("Audio generated successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => match e.severity() {
            Severity::Warning => {
                eprintln!("warning: {e}");
                ExitCode::from(2)
            }
            Severity::Error => {
                debug!(error = ?e, "pipeline failed");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing() -> Result<(), tracing_subscriber::filter::ParseError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("news_reader=info".parse()?),
        )
        .init();
    Ok(())
}

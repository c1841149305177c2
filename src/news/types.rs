use serde::Deserialize;

/// Response from `GET /v2/everything`. Fields the pipeline does not use are ignored.
#[derive(Deserialize, Debug, Default)]
pub struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A single article. NewsAPI sends `null` for missing titles and descriptions.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Articles selected for narration, plus the label shown as the main topic.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HeadlineBatch {
    /// Title of the first article returned, whether or not it made it into `headline_text`.
    pub main_topic: String,
    pub headline_text: String,
    pub article_count: usize,
}

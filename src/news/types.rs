// src/news/types.rs
use anyhow::Result;

/// A candidate news item shown on the dashboard.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(alias = "link")]
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    /// Publisher name, e.g. "Reuters". Empty when the feed omits it.
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Result of the news pipeline: the candidates the assistant saw and its
/// ordered picks (indices into `articles`, most relevant first).
/// Both are `None` when no ranking could be obtained.
#[derive(Debug, Clone, Default, serde::Serialize, PartialEq, Eq)]
pub struct NewsRanking {
    pub articles: Option<Vec<Article>>,
    pub indices: Option<Vec<usize>>,
}

impl NewsRanking {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn ranked(articles: Vec<Article>, indices: Vec<usize>) -> Self {
        Self {
            articles: Some(articles),
            indices: Some(indices),
        }
    }

    pub fn is_available(&self) -> bool {
        self.articles.is_some() && self.indices.is_some()
    }

    /// Picked articles in ranking order.
    pub fn picks(&self) -> Vec<&Article> {
        match (&self.articles, &self.indices) {
            (Some(a), Some(ix)) => ix.iter().filter_map(|&i| a.get(i)).collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}

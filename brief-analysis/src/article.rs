//! Article records as produced by the upstream sentiment/topic extractor.
//!
//! The extractor is a black box: anything that yields a title, a sentiment
//! label with a score, and a topic list can feed the analyzer. Raw records
//! arrive as JSON with a free-form label string and are validated into
//! [`ArticleRecord`]s before analysis.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AnalysisError;

// ============================================================================
// Sentiment
// ============================================================================

/// Neutral band half-width: averages within ±0.1 read as neutral.
pub const NEUTRAL_BAND: f64 = 0.1;

/// Tolerance applied at the neutral band edges so that float noise
/// (0.8 + -0.6 averaging to 0.10000000000000003) does not flip the band.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Tone of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels in reporting order.
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Canonical name as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }

    /// Lowercase form for use inside sentences.
    pub fn adjective(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Band an average score: strictly above 0.1 is positive, strictly
    /// below -0.1 is negative, anything else (including exactly ±0.1) is neutral.
    pub fn from_average(score: f64) -> Self {
        if score - NEUTRAL_BAND > SCORE_EPSILON {
            Self::Positive
        } else if -NEUTRAL_BAND - score > SCORE_EPSILON {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    /// Case-insensitive match on the three canonical names; surrounding
    /// whitespace is ignored. Anything else is rejected, never coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(s.to_string()),
        }
    }
}

/// Validated sentiment of one article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Conventionally in [-1.0, 1.0]; not clamped.
    pub score: f64,
}

// ============================================================================
// Article records
// ============================================================================

/// Presentation metadata carried alongside an article. None of it takes part
/// in the comparative analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A scored article ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub sentiment: Sentiment,
    /// Topic tags, treated as a set. Repeats are ignored by the analyzer.
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(flatten)]
    pub meta: ArticleMeta,
}

impl ArticleRecord {
    /// Build a record, dropping repeated topics (first occurrence wins).
    pub fn new(
        title: impl Into<String>,
        label: SentimentLabel,
        score: f64,
        topics: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut deduped: Vec<String> = Vec::new();
        for topic in topics {
            let topic = topic.into();
            if !deduped.contains(&topic) {
                deduped.push(topic);
            }
        }

        Self {
            title: title.into(),
            sentiment: Sentiment { label, score },
            topics: deduped,
            meta: ArticleMeta::default(),
        }
    }

    /// Attach presentation metadata.
    pub fn with_meta(mut self, meta: ArticleMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// Sentiment as emitted by the extractor, label not yet checked.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSentiment {
    pub label: String,
    pub score: f64,
}

/// Article as emitted by the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: String,
    pub sentiment: RawSentiment,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(flatten)]
    pub meta: ArticleMeta,
}

impl RawArticle {
    /// Validate structural shape. `index` is the article's position in its batch.
    pub fn validate(self, index: usize) -> Result<ArticleRecord, AnalysisError> {
        if self.title.trim().is_empty() {
            return Err(AnalysisError::EmptyTitle { index });
        }

        let label = self
            .sentiment
            .label
            .parse::<SentimentLabel>()
            .map_err(|label| AnalysisError::InvalidLabel { index, label })?;

        if !self.sentiment.score.is_finite() {
            return Err(AnalysisError::NonFiniteScore { index });
        }

        Ok(ArticleRecord::new(self.title, label, self.sentiment.score, self.topics).with_meta(self.meta))
    }
}

/// Validate a whole batch, failing on the first bad record.
pub fn validate_articles(raw: Vec<RawArticle>) -> Result<Vec<ArticleRecord>, AnalysisError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, article)| article.validate(index))
        .collect()
}

/// Parse and validate a JSON array of raw article records.
pub fn parse_articles(json: &str) -> Result<Vec<ArticleRecord>, AnalysisError> {
    let raw: Vec<RawArticle> = serde_json::from_str(json)?;
    let articles = validate_articles(raw)?;
    tracing::debug!(count = articles.len(), "Validated article batch");
    Ok(articles)
}

//! Sentiment aggregation across a batch.

use serde::{Deserialize, Serialize};

use crate::article::{ArticleRecord, SentimentLabel};

/// Number of articles per sentiment label. All three buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentCounts {
    /// Count for one label.
    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Add one article with the given label.
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Fraction of articles carrying `label`, 0.0 for an empty batch.
    pub fn ratio(&self, label: SentimentLabel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(label) as f64 / total as f64,
        }
    }

    /// Share of articles carrying `label`, in percent.
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        self.ratio(label) * 100.0
    }

    /// The label with strictly the most articles, or `None` on a tie for
    /// first place or an empty batch.
    pub fn dominant(&self) -> Option<SentimentLabel> {
        let max = SentimentLabel::ALL.iter().map(|l| self.get(*l)).max()?;
        if max == 0 {
            return None;
        }
        let mut leaders = SentimentLabel::ALL.iter().filter(|l| self.get(**l) == max);
        match (leaders.next(), leaders.next()) {
            (Some(label), None) => Some(*label),
            _ => None,
        }
    }
}

/// Count articles per sentiment label.
pub fn compute_sentiment_counts(articles: &[ArticleRecord]) -> SentimentCounts {
    articles
        .iter()
        .fold(SentimentCounts::default(), |mut counts, article| {
            counts.record(article.sentiment.label);
            counts
        })
}

/// Arithmetic mean of the sentiment scores, 0.0 for an empty batch.
pub fn average_sentiment_score(articles: &[ArticleRecord]) -> f64 {
    if articles.is_empty() {
        return 0.0;
    }
    let sum: f64 = articles.iter().map(|a| a.sentiment.score).sum();
    sum / articles.len() as f64
}

//! Comparative analysis engine.
//!
//! Takes a batch of independently scored articles and derives the
//! cross-article view of the coverage.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  [ArticleRecord] (ordered, validated)                            │
//! │    ├─ sentiment   → counts per label, average score              │
//! │    ├─ topics      → frequency ranking, intersection, uniqueness  │
//! │    ├─ coverage    → adjacent-pair narratives (N-1)               │
//! │    └─ verdict     → band + dominant bucket + market trend        │
//! │  ComparativeReport                                               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is a pure function of the input slice. Calling the analyzer
//! twice on equal input produces equal reports.

pub mod coverage;
pub mod sentiment;
pub mod topics;
pub mod verdict;

pub use coverage::{
    coverage_differences, ArticlePair, CoverageDifference, CoverageNarrator, TemplateNarrator,
};
pub use sentiment::{average_sentiment_score, compute_sentiment_counts, SentimentCounts};
pub use topics::{
    common_topics_across_all, topic_frequency, unique_topics_per_article, UniqueTopics,
};
pub use verdict::{final_sentiment_verdict, market_trend, MarketTrend, SentimentVerdict, NO_DATA_VERDICT};

use tracing::debug;

use crate::article::ArticleRecord;
use crate::report::{ComparativeReport, TopicOverlap};

/// Builds comparative reports with a pluggable coverage narrator.
pub struct ComparativeAnalyzer<N: CoverageNarrator = TemplateNarrator> {
    narrator: N,
}

impl ComparativeAnalyzer<TemplateNarrator> {
    /// Analyzer with the default template narrator.
    pub fn new() -> Self {
        Self {
            narrator: TemplateNarrator,
        }
    }
}

impl Default for ComparativeAnalyzer<TemplateNarrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: CoverageNarrator> ComparativeAnalyzer<N> {
    /// Analyzer with a custom coverage narrator.
    pub fn with_narrator(narrator: N) -> Self {
        Self { narrator }
    }

    /// Run every aggregation over the batch and assemble the report.
    pub fn analyze(&self, articles: &[ArticleRecord]) -> ComparativeReport {
        let sentiment_counts = compute_sentiment_counts(articles);
        let average = average_sentiment_score(articles);
        let common_topics = topic_frequency(articles);
        let overlap = common_topics_across_all(articles);
        let unique = unique_topics_per_article(articles);
        let differences = coverage_differences(articles, &self.narrator);
        let verdict = final_sentiment_verdict(&sentiment_counts, average);

        debug!(
            articles = articles.len(),
            average_score = average,
            distinct_topics = common_topics.len(),
            shared_topics = overlap.len(),
            comparisons = differences.len(),
            "Comparative analysis complete"
        );

        ComparativeReport {
            sentiment_counts,
            average_sentiment_score: average,
            common_topics,
            topic_overlap: TopicOverlap {
                common_topics: overlap,
            },
            unique_topics_by_article: unique,
            coverage_differences: differences,
            final_sentiment_analysis: verdict,
        }
    }
}

/// Build a comparative report with the default narrator.
pub fn generate_comparative_analysis(articles: &[ArticleRecord]) -> ComparativeReport {
    ComparativeAnalyzer::new().analyze(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::SentimentLabel;

    #[test]
    fn test_custom_narrator_flows_into_report() {
        struct Fixed;
        impl CoverageNarrator for Fixed {
            fn narrate(&self, _pair: &ArticlePair<'_>) -> CoverageDifference {
                CoverageDifference {
                    comparison: "same".into(),
                    impact: "none".into(),
                }
            }
        }

        let articles = vec![
            ArticleRecord::new("A", SentimentLabel::Positive, 0.4, ["AI"]),
            ArticleRecord::new("B", SentimentLabel::Positive, 0.6, ["AI"]),
        ];
        let report = ComparativeAnalyzer::with_narrator(Fixed).analyze(&articles);
        assert_eq!(report.coverage_differences.len(), 1);
        assert_eq!(report.coverage_differences[0].comparison, "same");
        assert_eq!(report.sentiment_counts.positive, 2);
    }

    #[test]
    fn test_default_matches_free_function() {
        let articles = vec![
            ArticleRecord::new("A", SentimentLabel::Negative, -0.4, ["Recall"]),
            ArticleRecord::new("B", SentimentLabel::Neutral, 0.0, ["Recall", "EV"]),
        ];
        assert_eq!(
            ComparativeAnalyzer::default().analyze(&articles),
            generate_comparative_analysis(&articles)
        );
    }
}

//! Comparative report produced by the analyzer, plus its renderings.

use serde::{Deserialize, Serialize};

use crate::article::SentimentLabel;
use crate::compare::{market_trend, CoverageDifference, MarketTrend, SentimentCounts, UniqueTopics};

/// Topics shared by every article in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common_topics: Vec<String>,
}

/// Cross-article analysis of one batch.
///
/// Built in one pass by [`crate::compare::ComparativeAnalyzer`] and not
/// modified afterwards. Serialized key names are stable and consumed by the
/// export layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeReport {
    pub sentiment_counts: SentimentCounts,
    pub average_sentiment_score: f64,
    /// Every topic with the number of articles mentioning it, most frequent first.
    pub common_topics: Vec<(String, usize)>,
    pub topic_overlap: TopicOverlap,
    pub unique_topics_by_article: Vec<UniqueTopics>,
    pub coverage_differences: Vec<CoverageDifference>,
    pub final_sentiment_analysis: String,
}

impl ComparativeReport {
    /// Number of articles the report covers.
    pub fn article_count(&self) -> usize {
        self.sentiment_counts.total()
    }

    /// Sentiment band of the average score.
    pub fn overall_sentiment(&self) -> SentimentLabel {
        SentimentLabel::from_average(self.average_sentiment_score)
    }

    pub fn market_trend(&self) -> MarketTrend {
        market_trend(&self.sentiment_counts)
    }

    /// The `n` most frequent topics.
    pub fn top_topics(&self, n: usize) -> &[(String, usize)] {
        &self.common_topics[..n.min(self.common_topics.len())]
    }

    /// Generate a markdown report. `top_n` limits the frequent-topics list.
    pub fn to_markdown(&self, top_n: usize) -> String {
        let mut md = String::new();
        let total = self.article_count();

        md.push_str("# Comparative News Analysis\n\n");

        // Sentiment distribution
        md.push_str("## Sentiment Distribution\n\n");
        md.push_str("| Sentiment | Articles | Share |\n");
        md.push_str("|-----------|----------|-------|\n");
        for label in SentimentLabel::ALL {
            md.push_str(&format!(
                "| {} | {} | {:.0}% |\n",
                label,
                self.sentiment_counts.get(label),
                self.sentiment_counts.percentage(label)
            ));
        }
        md.push_str(&format!(
            "\n**Average sentiment**: {} ({:.2}) across {} articles\n\n",
            self.overall_sentiment(),
            self.average_sentiment_score,
            total
        ));

        // Topics
        md.push_str("## Topic Analysis\n\n");
        md.push_str("### Common Topics Across Articles\n\n");
        if self.topic_overlap.common_topics.is_empty() {
            md.push_str("No common topics found across all articles.\n\n");
        } else {
            for topic in &self.topic_overlap.common_topics {
                md.push_str(&format!("- {}\n", topic));
            }
            md.push('\n');
        }

        md.push_str("### Most Frequent Topics\n\n");
        if self.common_topics.is_empty() {
            md.push_str("No topics identified.\n\n");
        } else {
            for (topic, count) in self.top_topics(top_n) {
                md.push_str(&format!("- {} ({})\n", topic, count));
            }
            md.push('\n');
        }

        md.push_str("### Unique Topics by Article\n\n");
        if self.unique_topics_by_article.is_empty() {
            md.push_str("No unique topics identified.\n\n");
        } else {
            for unique in &self.unique_topics_by_article {
                md.push_str(&format!("- **{}**: {}\n", unique.title, unique.topics.join(", ")));
            }
            md.push('\n');
        }

        // Coverage differences
        md.push_str("## Coverage Differences\n\n");
        if self.coverage_differences.is_empty() {
            md.push_str("No significant coverage differences identified.\n\n");
        } else {
            for (i, diff) in self.coverage_differences.iter().enumerate() {
                md.push_str(&format!("{}. **Comparison**: {}\n", i + 1, diff.comparison));
                md.push_str(&format!("   **Impact**: {}\n", diff.impact));
            }
            md.push('\n');
        }

        md.push_str("## Final Sentiment Analysis\n\n");
        md.push_str(&format!("{}\n", self.final_sentiment_analysis));

        md
    }

    /// Short plain-text digest for terminals and notifications.
    pub fn to_text(&self) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "Sentiment: {} positive / {} negative / {} neutral (average {:.2}, {})\n",
            self.sentiment_counts.positive,
            self.sentiment_counts.negative,
            self.sentiment_counts.neutral,
            self.average_sentiment_score,
            self.overall_sentiment()
        ));

        if !self.topic_overlap.common_topics.is_empty() {
            text.push_str(&format!(
                "Common topics: {}\n",
                self.topic_overlap.common_topics.join(", ")
            ));
        }

        let top: Vec<String> = self
            .top_topics(5)
            .iter()
            .map(|(topic, count)| format!("{topic} ({count})"))
            .collect();
        if !top.is_empty() {
            text.push_str(&format!("Top topics: {}\n", top.join(", ")));
        }

        text.push_str(&format!("\n{}\n", self.final_sentiment_analysis));

        text
    }
}

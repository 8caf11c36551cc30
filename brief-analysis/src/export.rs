//! Export layer: the downloadable JSON document, the overall summary that
//! speech/translation services consume, and per-article markdown.

use brief_common::util::{clean_text, format_date, reading_time, truncate_text};
use serde::{Deserialize, Serialize};

use crate::article::{ArticleRecord, SentimentLabel};
use crate::compare::{CoverageDifference, SentimentCounts};
use crate::report::ComparativeReport;

/// Summaries longer than this are shortened in markdown article cards.
pub const SUMMARY_PREVIEW_CHARS: usize = 300;

/// One article as listed in the export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportArticle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
    #[serde(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common_topics: Vec<String>,
    #[serde(rename = "Most Frequent Topics")]
    pub most_frequent_topics: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeScore {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentCounts,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: ExportTopicOverlap,
}

/// Complete analysis document for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<ExportArticle>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative_sentiment_score: ComparativeScore,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_sentiment_analysis: String,
    #[serde(rename = "Overall Summary")]
    pub overall_summary: String,
}

impl ExportDocument {
    pub fn new(company: &str, articles: &[ArticleRecord], report: &ComparativeReport) -> Self {
        Self {
            company: company.to_string(),
            articles: articles
                .iter()
                .map(|a| ExportArticle {
                    title: a.title.clone(),
                    summary: a.meta.summary.clone(),
                    sentiment: a.sentiment.label,
                    topics: a.topics.clone(),
                })
                .collect(),
            comparative_sentiment_score: ComparativeScore {
                sentiment_distribution: report.sentiment_counts,
                coverage_differences: report.coverage_differences.clone(),
                topic_overlap: ExportTopicOverlap {
                    common_topics: report.topic_overlap.common_topics.clone(),
                    most_frequent_topics: report.common_topics.clone(),
                },
            },
            final_sentiment_analysis: report.final_sentiment_analysis.clone(),
            overall_summary: overall_summary(company, report),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Plain-language summary of the whole batch, suitable for narration.
pub fn overall_summary(company: &str, report: &ComparativeReport) -> String {
    let total = report.article_count();
    if total == 0 {
        return format!("No recent news articles were found for {company}.");
    }

    let counts = &report.sentiment_counts;
    let mut summary = format!(
        "{company}: {total} news {} analyzed, {} positive, {} negative and {} neutral. \
         Overall sentiment is {} with an average score of {:.2}.",
        if total == 1 { "article" } else { "articles" },
        counts.positive,
        counts.negative,
        counts.neutral,
        report.overall_sentiment().adjective(),
        report.average_sentiment_score,
    );

    let top: Vec<&str> = report
        .top_topics(3)
        .iter()
        .map(|(topic, _)| topic.as_str())
        .collect();
    if !top.is_empty() {
        summary.push_str(&format!(" The most discussed topics are {}.", top.join(", ")));
    }

    if total > 1 && !report.topic_overlap.common_topics.is_empty() {
        summary.push_str(&format!(
            " Every article covers {}.",
            report.topic_overlap.common_topics.join(", ")
        ));
    }

    summary.push_str(&format!(" {}.", report.market_trend()));
    summary
}

/// Markdown cards for the individual articles.
pub fn articles_markdown(articles: &[ArticleRecord]) -> String {
    let mut md = String::from("## Individual Articles\n\n");

    for (i, article) in articles.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n\n", i + 1, article.title));

        let mut details = Vec::new();
        if let Some(source) = &article.meta.source {
            details.push(format!("Source: {source}"));
        }
        if let Some(date) = &article.meta.date {
            details.push(format!("Date: {}", format_date(date)));
        }
        let body = article
            .meta
            .content
            .as_deref()
            .or(article.meta.summary.as_deref());
        if let Some(body) = body {
            details.push(format!("Reading time: {}", reading_time(body)));
        }
        if !details.is_empty() {
            md.push_str(&format!("_{}_\n\n", details.join(" | ")));
        }

        md.push_str(&format!(
            "**Sentiment**: {} ({:.2})\n\n",
            article.sentiment.label, article.sentiment.score
        ));

        if !article.topics.is_empty() {
            md.push_str(&format!("**Topics**: {}\n\n", article.topics.join(", ")));
        }

        if let Some(summary) = &article.meta.summary {
            md.push_str(&format!(
                "{}\n\n",
                truncate_text(&clean_text(summary), SUMMARY_PREVIEW_CHARS)
            ));
        }

        if let Some(url) = &article.meta.url {
            md.push_str(&format!("[Read original article]({url})\n\n"));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleMeta;
    use crate::compare::generate_comparative_analysis;

    fn articles() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new("Earnings beat", SentimentLabel::Positive, 0.7, ["Earnings", "EV"])
                .with_meta(ArticleMeta {
                    summary: Some("Quarterly   profit rose (sharply).".into()),
                    source: Some("Reuters".into()),
                    date: Some("2024-01-15T09:30:00Z".into()),
                    url: Some("https://example.com/1".into()),
                    content: None,
                }),
            ArticleRecord::new("Recall widens", SentimentLabel::Negative, -0.5, ["Earnings", "Recall"]),
        ]
    }

    #[test]
    fn test_export_document_keys() {
        let articles = articles();
        let report = generate_comparative_analysis(&articles);
        let doc = ExportDocument::new("Tesla", &articles, &report);
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json["Company"], "Tesla");
        assert_eq!(json["Articles"][0]["Sentiment"], "Positive");
        assert_eq!(json["Articles"][1]["Summary"], serde_json::Value::Null);
        let score = &json["Comparative Sentiment Score"];
        assert_eq!(score["Sentiment Distribution"]["Negative"], 1);
        assert_eq!(score["Topic Overlap"]["Common Topics"], serde_json::json!(["Earnings"]));
        assert_eq!(score["Topic Overlap"]["Most Frequent Topics"][0], serde_json::json!(["Earnings", 2]));
        assert_eq!(score["Coverage Differences"].as_array().unwrap().len(), 1);
        assert_eq!(json["Final Sentiment Analysis"], report.final_sentiment_analysis);
    }

    #[test]
    fn test_overall_summary() {
        let report = generate_comparative_analysis(&articles());
        let summary = overall_summary("Tesla", &report);
        assert_eq!(
            summary,
            "Tesla: 2 news articles analyzed, 1 positive, 1 negative and 0 neutral. \
             Overall sentiment is neutral with an average score of 0.10. \
             The most discussed topics are Earnings, EV, Recall. \
             Every article covers Earnings. \
             Slight positive market reaction possible."
        );
    }

    #[test]
    fn test_overall_summary_empty() {
        let report = generate_comparative_analysis(&[]);
        assert_eq!(
            overall_summary("Acme", &report),
            "No recent news articles were found for Acme."
        );
    }

    #[test]
    fn test_articles_markdown() {
        let md = articles_markdown(&articles());
        assert!(md.contains("### 1. Earnings beat"));
        assert!(md.contains("_Source: Reuters | Date: 2024-01-15 | Reading time: Less than a minute_"));
        assert!(md.contains("**Sentiment**: Negative (-0.50)"));
        assert!(md.contains("Quarterly profit rose sharply.\n"));
        assert!(md.contains("[Read original article](https://example.com/1)"));
    }
}

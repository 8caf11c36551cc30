//! Scenario tests for the analysis pipeline.
//!
//! Covers the degenerate batches, the neutral-band boundary, and a realistic
//! batch read from `tests/fixtures`.

use std::time::Duration;

use brief_analysis::compare::{MarketTrend, NO_DATA_VERDICT};
use brief_analysis::export::articles_markdown;
use brief_analysis::{
    generate_comparative_analysis, parse_articles, AnalysisError, ArticleCache, ArticleRecord,
    ExportDocument, SentimentLabel,
};

const FIXTURE: &str = include_str!("fixtures/tesla_articles.json");

// ============================================================================
// Degenerate batches
// ============================================================================

#[test]
fn test_empty_batch_yields_degenerate_report() {
    let report = generate_comparative_analysis(&[]);

    assert_eq!(report.sentiment_counts.total(), 0);
    assert_eq!(report.average_sentiment_score, 0.0);
    assert!(report.common_topics.is_empty());
    assert!(report.topic_overlap.common_topics.is_empty());
    assert!(report.unique_topics_by_article.is_empty());
    assert!(report.coverage_differences.is_empty());
    assert_eq!(report.final_sentiment_analysis, NO_DATA_VERDICT);
    assert_eq!(report.market_trend(), MarketTrend::Unclear);
}

#[test]
fn test_single_article_batch() {
    let articles = [ArticleRecord::new(
        "Solo",
        SentimentLabel::Negative,
        -0.4,
        ["Recall", "EV"],
    )];
    let report = generate_comparative_analysis(&articles);

    assert_eq!(report.sentiment_counts.negative, 1);
    assert_eq!(report.topic_overlap.common_topics, vec!["Recall", "EV"]);
    assert!(report.unique_topics_by_article.is_empty());
    assert!(report.coverage_differences.is_empty());
    assert_eq!(report.overall_sentiment(), SentimentLabel::Negative);
}

// ============================================================================
// Two-article batches and the neutral band
// ============================================================================

#[test]
fn test_two_article_scenario() {
    let articles = [
        ArticleRecord::new("A", SentimentLabel::Positive, 0.8, ["AI", "Stock"]),
        ArticleRecord::new("B", SentimentLabel::Negative, -0.6, ["AI", "Layoffs"]),
    ];
    let report = generate_comparative_analysis(&articles);

    assert_eq!(report.sentiment_counts.positive, 1);
    assert_eq!(report.sentiment_counts.negative, 1);
    assert_eq!(report.sentiment_counts.neutral, 0);
    assert!((report.average_sentiment_score - 0.1).abs() < 1e-12);
    assert_eq!(report.topic_overlap.common_topics, vec!["AI"]);
    assert_eq!(report.common_topics[0], ("AI".to_string(), 2));

    let unique: Vec<(&str, Vec<&str>)> = report
        .unique_topics_by_article
        .iter()
        .map(|u| (u.title.as_str(), u.topics.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(unique, vec![("A", vec!["Stock"]), ("B", vec!["Layoffs"])]);

    assert_eq!(report.coverage_differences.len(), 1);
    assert!(report
        .final_sentiment_analysis
        .starts_with("Overall news coverage is Neutral (average sentiment score 0.10)."));
    assert!(report
        .final_sentiment_analysis
        .contains("Coverage is evenly split (1 positive, 1 negative, 0 neutral)."));
}

#[test]
fn test_average_inside_band_is_neutral() {
    let articles = [
        ArticleRecord::new("A", SentimentLabel::Positive, 0.15, ["AI"]),
        ArticleRecord::new("B", SentimentLabel::Neutral, -0.05, ["AI"]),
    ];
    let report = generate_comparative_analysis(&articles);

    assert!((report.average_sentiment_score - 0.05).abs() < 1e-12);
    assert_eq!(report.overall_sentiment(), SentimentLabel::Neutral);
    assert!(report
        .final_sentiment_analysis
        .starts_with("Overall news coverage is Neutral"));
}

#[test]
fn test_shared_topic_ranks_first() {
    let articles = [
        ArticleRecord::new("A", SentimentLabel::Neutral, 0.0, ["Chips", "AI"]),
        ArticleRecord::new("B", SentimentLabel::Neutral, 0.0, ["EV", "AI"]),
        ArticleRecord::new("C", SentimentLabel::Neutral, 0.0, ["AI", "Grid"]),
    ];
    let report = generate_comparative_analysis(&articles);

    assert_eq!(report.common_topics[0], ("AI".to_string(), 3));
    let rest: Vec<&str> = report.common_topics[1..]
        .iter()
        .map(|(topic, _)| topic.as_str())
        .collect();
    assert_eq!(rest, vec!["Chips", "EV", "Grid"]);
}

// ============================================================================
// Realistic batch from JSON
// ============================================================================

#[test]
fn test_fixture_end_to_end() {
    let articles = parse_articles(FIXTURE).unwrap();
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[1].sentiment.label, SentimentLabel::Negative);
    // repeated tag in the third article is collapsed on parse
    assert_eq!(articles[2].topics, vec!["Electric Vehicles", "Infrastructure"]);

    let report = generate_comparative_analysis(&articles);
    assert_eq!(report.topic_overlap.common_topics, vec!["Electric Vehicles"]);
    assert_eq!(report.common_topics[0], ("Electric Vehicles".to_string(), 3));
    assert_eq!(report.unique_topics_by_article.len(), 3);
    assert_eq!(report.coverage_differences.len(), 2);
    assert_eq!(report.market_trend(), MarketTrend::Stable);
    assert!(report
        .final_sentiment_analysis
        .contains("Coverage is evenly split (1 positive, 1 negative, 1 neutral)."));

    let doc = ExportDocument::new("Tesla", &articles, &report);
    assert!(doc.articles[0].summary.is_some());
    assert!(doc.articles[2].summary.is_none());
    assert!(doc.overall_summary.starts_with("Tesla: 3 news articles analyzed"));

    let md = articles_markdown(&articles);
    assert!(md.contains("_Source: Reuters | Date: 2024-01-02 | Reading time: Less than a minute_"));
    assert!(md.contains("_Source: Bloomberg | Date: 2024-01-03"));
}

#[test]
fn test_invalid_label_rejects_batch() {
    let json = r#"[
        {"title": "Fine", "sentiment": {"label": "Positive", "score": 0.3}, "topics": []},
        {"title": "Odd", "sentiment": {"label": "Bullish", "score": 0.9}, "topics": []}
    ]"#;

    match parse_articles(json) {
        Err(AnalysisError::InvalidLabel { index, label }) => {
            assert_eq!(index, 1);
            assert_eq!(label, "Bullish");
        }
        other => panic!("expected InvalidLabel, got {other:?}"),
    }
}

#[test]
fn test_blank_title_rejected() {
    let json = r#"[{"title": "  ", "sentiment": {"label": "Neutral", "score": 0.0}}]"#;
    assert!(matches!(
        parse_articles(json),
        Err(AnalysisError::EmptyTitle { index: 0 })
    ));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        parse_articles("{\"title\": \"not an array\"}"),
        Err(AnalysisError::Parse(_))
    ));
}

// ============================================================================
// Cache round trip
// ============================================================================

#[test]
fn test_cached_batch_analyzes_identically() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ArticleCache::new(dir.path());
    let articles = parse_articles(FIXTURE).unwrap();

    cache.store("Tesla", &articles).unwrap();
    let entry = cache
        .load_fresh("Tesla", Duration::from_secs(3600))
        .unwrap()
        .expect("entry just written");

    assert_eq!(entry.articles, articles);
    assert_eq!(
        generate_comparative_analysis(&entry.articles),
        generate_comparative_analysis(&articles)
    );
}

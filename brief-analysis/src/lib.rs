//! Brief Analysis Library
//!
//! Comparative analysis of news coverage about a company. Each article has
//! already been scored upstream (sentiment label + score, topic tags); this
//! crate combines a batch of them into one cross-article report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         brief-analysis                              │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐      │
//! │  │  article        │  │  compare        │  │  report/export  │      │
//! │  │  (validation)   │→ │  (pure engine)  │→ │  (md/json/text) │      │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘      │
//! │           ↑                                                          │
//! │  ┌─────────────────┐                                                 │
//! │  │  cache (disk)   │                                                 │
//! │  └─────────────────┘                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use brief_analysis::{generate_comparative_analysis, ArticleRecord, SentimentLabel};
//!
//! let articles = vec![
//!     ArticleRecord::new("Profits soar", SentimentLabel::Positive, 0.8, ["AI", "Stock"]),
//!     ArticleRecord::new("Layoffs loom", SentimentLabel::Negative, -0.6, ["AI", "Layoffs"]),
//! ];
//! let report = generate_comparative_analysis(&articles);
//! assert_eq!(report.topic_overlap.common_topics, vec!["AI"]);
//! assert_eq!(report.coverage_differences.len(), 1);
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod article;
pub mod cache;
pub mod compare;
pub mod error;
pub mod export;
pub mod report;

pub use article::{parse_articles, validate_articles, ArticleMeta, ArticleRecord, RawArticle, Sentiment, SentimentLabel};
pub use cache::{ArticleCache, CacheEntry};
pub use compare::{generate_comparative_analysis, ComparativeAnalyzer, CoverageNarrator, MarketTrend};
pub use error::AnalysisError;
pub use export::{overall_summary, ExportDocument};
pub use report::{ComparativeReport, TopicOverlap};

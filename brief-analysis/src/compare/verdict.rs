//! Final sentiment verdict and the market-trend heuristic.

use serde::{Deserialize, Serialize};

use crate::article::SentimentLabel;
use crate::compare::sentiment::SentimentCounts;

/// Verdict used when there is nothing to analyze.
pub const NO_DATA_VERDICT: &str = "No articles available for sentiment analysis.";

/// Five-way market reaction heuristic over label proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketTrend {
    /// More than 60% positive
    StrongGrowth,
    /// More than 40% positive
    SlightPositive,
    /// More than 60% negative
    StrongDecline,
    /// More than 40% negative
    SlightNegative,
    Stable,
    /// Empty batch
    Unclear,
}

impl MarketTrend {
    /// Bucket the positive/negative shares. Positive thresholds are checked first.
    pub fn from_ratios(positive_ratio: f64, negative_ratio: f64) -> Self {
        if positive_ratio > 0.6 {
            Self::StrongGrowth
        } else if positive_ratio > 0.4 {
            Self::SlightPositive
        } else if negative_ratio > 0.6 {
            Self::StrongDecline
        } else if negative_ratio > 0.4 {
            Self::SlightNegative
        } else {
            Self::Stable
        }
    }
}

impl std::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongGrowth => write!(f, "Potential stock growth expected"),
            Self::SlightPositive => write!(f, "Slight positive market reaction possible"),
            Self::StrongDecline => write!(f, "Potential stock decline expected"),
            Self::SlightNegative => write!(f, "Slight negative market reaction possible"),
            Self::Stable => write!(f, "Stable market performance expected"),
            Self::Unclear => write!(f, "Unclear market impact"),
        }
    }
}

/// Market trend for a set of counts.
pub fn market_trend(counts: &SentimentCounts) -> MarketTrend {
    if counts.total() == 0 {
        return MarketTrend::Unclear;
    }
    MarketTrend::from_ratios(
        counts.ratio(SentimentLabel::Positive),
        counts.ratio(SentimentLabel::Negative),
    )
}

/// Structured form of the final verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentVerdict {
    pub overall: SentimentLabel,
    pub average: f64,
    pub counts: SentimentCounts,
    pub trend: MarketTrend,
}

impl SentimentVerdict {
    pub fn new(counts: SentimentCounts, average: f64) -> Self {
        Self {
            overall: SentimentLabel::from_average(average),
            average,
            counts,
            trend: market_trend(&counts),
        }
    }
}

impl std::fmt::Display for SentimentVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.counts.total();
        if total == 0 {
            return f.write_str(NO_DATA_VERDICT);
        }

        write!(
            f,
            "Overall news coverage is {} (average sentiment score {:.2}). ",
            self.overall, self.average
        )?;

        match self.counts.dominant() {
            Some(label) => write!(
                f,
                "{} articles dominate with {} of {}. ",
                label,
                self.counts.get(label),
                total
            )?,
            None => write!(
                f,
                "Coverage is evenly split ({} positive, {} negative, {} neutral). ",
                self.counts.positive, self.counts.negative, self.counts.neutral
            )?,
        }

        write!(f, "Market outlook: {}.", self.trend)
    }
}

/// Qualitative verdict text for a batch.
pub fn final_sentiment_verdict(counts: &SentimentCounts, average_score: f64) -> String {
    SentimentVerdict::new(*counts, average_score).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn counts(positive: usize, negative: usize, neutral: usize) -> SentimentCounts {
        SentimentCounts {
            positive,
            negative,
            neutral,
        }
    }

    #[test_case(4, 1, 0, MarketTrend::StrongGrowth ; "80 percent positive")]
    #[test_case(3, 2, 0, MarketTrend::SlightPositive ; "exactly 60 percent positive")]
    #[test_case(2, 0, 3, MarketTrend::Stable ; "exactly 40 percent positive")]
    #[test_case(1, 4, 0, MarketTrend::StrongDecline ; "80 percent negative")]
    #[test_case(1, 3, 1, MarketTrend::SlightNegative ; "60 percent negative")]
    #[test_case(1, 1, 1, MarketTrend::Stable ; "even thirds")]
    #[test_case(0, 0, 0, MarketTrend::Unclear ; "no articles")]
    fn test_market_trend(p: usize, n: usize, u: usize, expected: MarketTrend) {
        assert_eq!(market_trend(&counts(p, n, u)), expected);
    }

    #[test]
    fn test_positive_checked_before_negative() {
        // Impossible from real counts, but the bucketing order is fixed.
        assert_eq!(MarketTrend::from_ratios(0.5, 0.7), MarketTrend::SlightPositive);
    }

    #[test]
    fn test_no_data_verdict() {
        assert_eq!(final_sentiment_verdict(&counts(0, 0, 0), 0.0), NO_DATA_VERDICT);
    }

    #[test]
    fn test_verdict_text() {
        let verdict = final_sentiment_verdict(&counts(3, 1, 1), 0.42);
        assert_eq!(
            verdict,
            "Overall news coverage is Positive (average sentiment score 0.42). \
             Positive articles dominate with 3 of 5. \
             Market outlook: Slight positive market reaction possible."
        );
    }

    #[test]
    fn test_verdict_boundary_is_neutral() {
        let average = (0.8 + -0.6) / 2.0;
        let verdict = SentimentVerdict::new(counts(1, 1, 0), average);
        assert_eq!(verdict.overall, SentimentLabel::Neutral);
        let text = verdict.to_string();
        assert!(text.starts_with("Overall news coverage is Neutral (average sentiment score 0.10)."));
        assert!(text.contains("Coverage is evenly split (1 positive, 1 negative, 0 neutral)."));
        assert!(text.ends_with("Market outlook: Slight positive market reaction possible."));
    }

    #[test]
    fn test_verdict_negative_band() {
        let verdict = SentimentVerdict::new(counts(0, 2, 1), -0.35);
        assert_eq!(verdict.overall, SentimentLabel::Negative);
        assert_eq!(verdict.trend, MarketTrend::StrongDecline);
    }
}

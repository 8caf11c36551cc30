//! Coverage differences between neighbouring articles.
//!
//! The set arithmetic lives in [`ArticlePair`]; wording lives behind
//! [`CoverageNarrator`] so phrasing can change without touching the math.

use serde::{Deserialize, Serialize};

use crate::article::{ArticleRecord, SentimentLabel};
use crate::compare::topics::distinct_topics;

/// Narrative contrast between two articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// Two adjacent articles and how their topic sets relate.
#[derive(Debug, Clone)]
pub struct ArticlePair<'a> {
    /// Zero-based position of `first`; `second` sits at `index + 1`.
    pub index: usize,
    pub first: &'a ArticleRecord,
    pub second: &'a ArticleRecord,
    pub shared_topics: Vec<&'a str>,
    pub first_only: Vec<&'a str>,
    pub second_only: Vec<&'a str>,
}

impl<'a> ArticlePair<'a> {
    pub fn new(index: usize, first: &'a ArticleRecord, second: &'a ArticleRecord) -> Self {
        let first_topics = distinct_topics(first);
        let second_topics = distinct_topics(second);

        let shared_topics = first_topics
            .iter()
            .filter(|t| second_topics.contains(*t))
            .copied()
            .collect();
        let first_only = first_topics
            .iter()
            .filter(|t| !second_topics.contains(*t))
            .copied()
            .collect();
        let second_only = second_topics
            .iter()
            .filter(|t| !first_topics.contains(*t))
            .copied()
            .collect();

        Self {
            index,
            first,
            second,
            shared_topics,
            first_only,
            second_only,
        }
    }

    /// One-based article numbers as shown to readers.
    pub fn numbers(&self) -> (usize, usize) {
        (self.index + 1, self.index + 2)
    }

    pub fn labels(&self) -> (SentimentLabel, SentimentLabel) {
        (self.first.sentiment.label, self.second.sentiment.label)
    }
}

/// Turns a pair of articles into a comparison/impact narrative.
pub trait CoverageNarrator {
    fn narrate(&self, pair: &ArticlePair<'_>) -> CoverageDifference;
}

/// Default template-based narrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    fn comparison(pair: &ArticlePair<'_>) -> String {
        let (a, b) = pair.numbers();
        let (la, lb) = pair.labels();

        let mut text = if la == lb {
            format!(
                "Article {a} (\"{}\") and Article {b} (\"{}\") share a {} tone.",
                pair.first.title,
                pair.second.title,
                la.adjective()
            )
        } else {
            format!(
                "Article {a} (\"{}\") is {} while Article {b} (\"{}\") is {}.",
                pair.first.title,
                la.adjective(),
                pair.second.title,
                lb.adjective()
            )
        };

        match (pair.first_only.is_empty(), pair.second_only.is_empty()) {
            (false, false) => text.push_str(&format!(
                " Article {a} emphasizes {} whereas Article {b} emphasizes {}.",
                join_topics(&pair.first_only),
                join_topics(&pair.second_only)
            )),
            (false, true) => text.push_str(&format!(
                " Article {a} additionally covers {}.",
                join_topics(&pair.first_only)
            )),
            (true, false) => text.push_str(&format!(
                " Article {b} additionally covers {}.",
                join_topics(&pair.second_only)
            )),
            (true, true) => {}
        }

        if !pair.shared_topics.is_empty() {
            text.push_str(&format!(" Both discuss {}.", join_topics(&pair.shared_topics)));
        }

        text
    }

    fn impact(pair: &ArticlePair<'_>) -> String {
        use SentimentLabel::{Negative, Neutral, Positive};

        let mut text = match pair.labels() {
            (Positive, Positive) => {
                "Both articles reinforce a favourable narrative, which may strengthen investor confidence."
            }
            (Negative, Negative) => {
                "Both articles reinforce concerns about the company, which may weigh on investor sentiment."
            }
            (Neutral, Neutral) => {
                "Balanced coverage from both articles is unlikely to shift perception on its own."
            }
            (Positive, Negative) | (Negative, Positive) => {
                "The conflicting coverage paints a mixed picture and may increase uncertainty among investors."
            }
            (Positive, Neutral) | (Neutral, Positive) => {
                "The positive article tilts the narrative favourably while the other provides neutral context."
            }
            (Negative, Neutral) | (Neutral, Negative) => {
                "The negative article raises concerns that the neutral coverage does little to offset."
            }
        }
        .to_string();

        let both_tagged = !pair.first.topics.is_empty() && !pair.second.topics.is_empty();
        let (la, lb) = pair.labels();

        if both_tagged && pair.shared_topics.is_empty() {
            text.push_str(
                " The articles address different aspects of the company, \
                 broadening the overall picture.",
            );
        } else if !pair.shared_topics.is_empty() && la != lb {
            text.push_str(&format!(
                " Readers get opposing takes on {}.",
                join_topics(&pair.shared_topics)
            ));
        }

        text
    }
}

impl CoverageNarrator for TemplateNarrator {
    fn narrate(&self, pair: &ArticlePair<'_>) -> CoverageDifference {
        CoverageDifference {
            comparison: Self::comparison(pair),
            impact: Self::impact(pair),
        }
    }
}

/// "A", "A and B", "A, B and C".
fn join_topics(topics: &[&str]) -> String {
    match topics {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// One narrative per adjacent pair `(i, i + 1)`: N articles give N-1 entries.
pub fn coverage_differences(
    articles: &[ArticleRecord],
    narrator: &dyn CoverageNarrator,
) -> Vec<CoverageDifference> {
    articles
        .windows(2)
        .enumerate()
        .map(|(index, pair)| narrator.narrate(&ArticlePair::new(index, &pair[0], &pair[1])))
        .collect()
}

//! Topic set operations: frequency ranking, intersection, per-article uniqueness.
//!
//! Every article's topic list is read as a set in first-seen order, so a tag
//! repeated inside one article counts once for that article.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::article::ArticleRecord;

/// Topics only one article in the batch covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueTopics {
    #[serde(rename = "Title")]
    pub title: String,
    /// In the article's own first-seen order.
    #[serde(rename = "Unique Topics")]
    pub topics: Vec<String>,
}

/// Distinct topics of one article, first occurrence wins.
pub(crate) fn distinct_topics(article: &ArticleRecord) -> Vec<&str> {
    let mut seen = HashSet::new();
    article
        .topics
        .iter()
        .map(String::as_str)
        .filter(|topic| seen.insert(*topic))
        .collect()
}

/// Number of articles mentioning each topic, plus the order topics were first met.
fn article_frequencies(articles: &[ArticleRecord]) -> (Vec<&str>, HashMap<&str, usize>) {
    let mut first_seen = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        for topic in distinct_topics(article) {
            let count = counts.entry(topic).or_insert_with(|| {
                first_seen.push(topic);
                0
            });
            *count += 1;
        }
    }

    (first_seen, counts)
}

/// Rank all topics by how many articles mention them.
///
/// Ties keep the order in which topics were first met while scanning the
/// articles in input order. The full ranking is returned; callers take a prefix.
pub fn topic_frequency(articles: &[ArticleRecord]) -> Vec<(String, usize)> {
    let (first_seen, counts) = article_frequencies(articles);

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|topic| (topic.to_string(), counts[topic]))
        .collect();
    // sort_by is stable, which preserves first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Topics present in every article, in the first article's order.
///
/// Empty for an empty batch or when any article has no topics.
pub fn common_topics_across_all(articles: &[ArticleRecord]) -> Vec<String> {
    let Some((first, rest)) = articles.split_first() else {
        return Vec::new();
    };

    let rest_sets: Vec<HashSet<&str>> = rest
        .iter()
        .map(|article| article.topics.iter().map(String::as_str).collect())
        .collect();

    distinct_topics(first)
        .into_iter()
        .filter(|topic| rest_sets.iter().all(|set| set.contains(topic)))
        .map(str::to_string)
        .collect()
}

/// For each article, the topics no other article mentions.
///
/// Articles without such topics are left out. A single article has no peers
/// to differ from, so a one-article batch yields an empty result.
pub fn unique_topics_per_article(articles: &[ArticleRecord]) -> Vec<UniqueTopics> {
    if articles.len() < 2 {
        return Vec::new();
    }

    let (_, counts) = article_frequencies(articles);

    articles
        .iter()
        .filter_map(|article| {
            let topics: Vec<String> = distinct_topics(article)
                .into_iter()
                .filter(|topic| counts.get(topic) == Some(&1))
                .map(str::to_string)
                .collect();

            (!topics.is_empty()).then(|| UniqueTopics {
                title: article.title.clone(),
                topics,
            })
        })
        .collect()
}

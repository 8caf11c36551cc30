//! Errors raised while validating an article batch.

use thiserror::Error;

/// A batch of articles could not be turned into validated records.
///
/// Any error rejects the whole batch: sentiment counts must add up to the
/// number of input articles, so skipping a bad record is not an option.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input was not a JSON array of article records.
    #[error("Malformed article batch: {0}")]
    Parse(#[from] serde_json::Error),

    /// Sentiment label outside {Positive, Negative, Neutral}.
    #[error("Article at index {index}: unknown sentiment label '{label}'")]
    InvalidLabel { index: usize, label: String },

    /// NaN or infinite sentiment score.
    #[error("Article at index {index}: sentiment score must be a finite number")]
    NonFiniteScore { index: usize },

    /// Title missing or blank.
    #[error("Article at index {index}: title must not be empty")]
    EmptyTitle { index: usize },
}

impl From<AnalysisError> for brief_common::Error {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Parse(e) => brief_common::Error::Json(e),
            other => brief_common::Error::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_error_names_label() {
        let err = AnalysisError::InvalidLabel {
            index: 3,
            label: "Mixed".into(),
        };
        assert_eq!(err.to_string(), "Article at index 3: unknown sentiment label 'Mixed'");
    }

    #[test]
    fn test_converts_to_invalid_input() {
        let err: brief_common::Error = AnalysisError::EmptyTitle { index: 0 }.into();
        assert!(err.is_invalid_input());
    }
}

//! Analysis data model shared by the classifier, the session and the exporters
//!
//! Field names serialize in camelCase so JSON exports keep the shape the
//! dashboard front end reads (`totalTexts`, `averageConfidence`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment class of a single text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Upper-case label used in exports and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass per sentiment class (sums to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentScores {
    /// Score assigned to the given class
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

/// Classification of one input text
///
/// Created once per classified text and never mutated afterwards; history
/// snapshots and exports hold copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Unique identifier (`analysis-<uuid>`)
    pub id: String,
    /// Original input, unmodified
    pub text: String,
    pub sentiment: Sentiment,
    /// Mass of the winning class, in [0, 1]
    pub confidence: f64,
    pub scores: SentimentScores,
    /// Up to 8 distinct words, sentiment-bearing words first
    pub keywords: Vec<String>,
    /// Creation time of the result
    pub timestamp: DateTime<Utc>,
    pub explanation: String,
}

/// Per-class result counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Aggregate over one analysis batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_texts: usize,
    pub average_confidence: f64,
    pub sentiment_distribution: SentimentDistribution,
}

impl AnalysisSummary {
    /// Build the summary for a batch of results
    ///
    /// An empty batch yields zero counts and zero average confidence.
    pub fn from_results(results: &[SentimentResult]) -> Self {
        let mut distribution = SentimentDistribution::default();
        for result in results {
            match result.sentiment {
                Sentiment::Positive => distribution.positive += 1,
                Sentiment::Negative => distribution.negative += 1,
                Sentiment::Neutral => distribution.neutral += 1,
            }
        }

        let average_confidence = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64
        };

        Self {
            total_texts: results.len(),
            average_confidence,
            sentiment_distribution: distribution,
        }
    }

    /// Share of the batch in the given class, as a percentage
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        if self.total_texts == 0 {
            return 0.0;
        }
        self.sentiment_distribution.count(sentiment) as f64 / self.total_texts as f64 * 100.0
    }
}

/// Results of one batch together with their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub results: Vec<SentimentResult>,
    pub summary: AnalysisSummary,
}

impl SentimentAnalysis {
    pub fn new(results: Vec<SentimentResult>) -> Self {
        let summary = AnalysisSummary::from_results(&results);
        Self { results, summary }
    }
}

/// Snapshot of a past analysis kept in the session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistory {
    pub id: String,
    /// Display name, `Analysis <local date and time>`
    pub name: String,
    pub date: DateTime<Utc>,
    pub analysis: SentimentAnalysis,
}

impl AnalysisHistory {
    pub fn new(analysis: SentimentAnalysis) -> Self {
        let date = crate::time::now();
        Self {
            id: crate::uuid_utils::history_id(),
            name: format!("Analysis {}", crate::time::to_local_display(&date)),
            date,
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(sentiment: Sentiment, confidence: f64) -> SentimentResult {
        SentimentResult {
            id: crate::uuid_utils::result_id(),
            text: "sample".to_string(),
            sentiment,
            confidence,
            scores: SentimentScores {
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
            },
            keywords: Vec::new(),
            timestamp: crate::time::now(),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_summary_counts_sum_to_total() {
        let results = vec![
            result(Sentiment::Positive, 0.9),
            result(Sentiment::Negative, 0.8),
            result(Sentiment::Positive, 0.7),
            result(Sentiment::Neutral, 0.6),
        ];
        let summary = AnalysisSummary::from_results(&results);

        assert_eq!(summary.total_texts, 4);
        assert_eq!(summary.sentiment_distribution.positive, 2);
        assert_eq!(summary.sentiment_distribution.negative, 1);
        assert_eq!(summary.sentiment_distribution.neutral, 1);
        assert_eq!(summary.sentiment_distribution.total(), summary.total_texts);
        assert!((summary.average_confidence - 0.75).abs() < 1e-12);
        assert!((summary.percentage(Sentiment::Positive) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_batch() {
        let summary = AnalysisSummary::from_results(&[]);
        assert_eq!(summary.total_texts, 0);
        assert_eq!(summary.average_confidence, 0.0);
        assert_eq!(summary.percentage(Sentiment::Neutral), 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let analysis = SentimentAnalysis::new(vec![result(Sentiment::Negative, 0.9)]);
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["summary"]["totalTexts"], 1);
        assert!(json["summary"]["averageConfidence"].is_number());
        assert_eq!(json["summary"]["sentimentDistribution"]["negative"], 1);
        assert_eq!(json["results"][0]["sentiment"], "NEGATIVE");
    }

    #[test]
    fn test_scores_lookup_by_class() {
        let scores = SentimentScores {
            positive: 0.8,
            negative: 0.04,
            neutral: 0.16,
        };
        assert_eq!(scores.get(Sentiment::Positive), 0.8);
        assert_eq!(scores.get(Sentiment::Neutral), 0.16);
        assert!((scores.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_history_entry_name() {
        let entry = AnalysisHistory::new(SentimentAnalysis::new(Vec::new()));
        assert!(entry.id.starts_with("history-"));
        assert!(entry.name.starts_with("Analysis "));
    }
}

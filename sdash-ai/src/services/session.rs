//! Analysis session
//!
//! Owns the single logical dashboard session: the analysis currently on
//! display, the recent history and the in-flight flag that keeps batches
//! strictly one at a time.
//!
//! A batch is split into three steps so callers can classify without holding
//! a lock on the session: [`AnalysisSession::begin_batch`] claims the session,
//! classification runs elsewhere, then [`AnalysisSession::complete_batch`] or
//! [`AnalysisSession::abort_batch`] releases it.

use crate::classifier::LexiconClassifier;
use crate::extractor::{ExtractError, FileExtractor};
use sdash_common::config::LimitsConfig;
use sdash_common::{AnalysisHistory, SentimentAnalysis, SentimentResult};
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{info, warn};

/// Session-level failures
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No texts to analyze")]
    NoTexts,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("History entry not found: {0}")]
    HistoryNotFound(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Texts accepted for a batch that has not finished yet
#[derive(Debug)]
#[must_use = "a claimed batch must be completed or aborted"]
pub struct PendingBatch {
    texts: Vec<String>,
    save_to_history: bool,
}

impl PendingBatch {
    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}

/// Fragments pulled from one uploaded file, after the per-file cap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestedFile {
    pub fragments: Vec<String>,
    /// Fragment count before the cap was applied
    pub total_found: usize,
    pub warning: Option<String>,
}

/// Single-user analysis session
#[derive(Debug)]
pub struct AnalysisSession {
    current: Option<SentimentAnalysis>,
    /// Most recent first
    history: VecDeque<AnalysisHistory>,
    history_limit: usize,
    in_flight: bool,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl AnalysisSession {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            current: None,
            history: VecDeque::with_capacity(limits.history_limit),
            history_limit: limits.history_limit,
            in_flight: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Claim the session for a new batch
    ///
    /// Blank and whitespace-only texts are dropped; the rest are kept as-is.
    pub fn begin_batch(
        &mut self,
        texts: Vec<String>,
        save_to_history: bool,
    ) -> Result<PendingBatch, SessionError> {
        if self.in_flight {
            return Err(SessionError::Busy);
        }

        let texts: Vec<String> = texts.into_iter().filter(|t| !t.trim().is_empty()).collect();
        if texts.is_empty() {
            return Err(SessionError::NoTexts);
        }

        self.in_flight = true;
        Ok(PendingBatch {
            texts,
            save_to_history,
        })
    }

    /// Publish the results of a claimed batch and release the session
    pub fn complete_batch(
        &mut self,
        batch: PendingBatch,
        results: Vec<SentimentResult>,
    ) -> SentimentAnalysis {
        self.in_flight = false;
        let analysis = SentimentAnalysis::new(results);
        info!(
            "Analyzed {} texts (positive: {}, negative: {}, neutral: {})",
            analysis.summary.total_texts,
            analysis.summary.sentiment_distribution.positive,
            analysis.summary.sentiment_distribution.negative,
            analysis.summary.sentiment_distribution.neutral
        );

        if batch.save_to_history {
            self.history.push_front(AnalysisHistory::new(analysis.clone()));
            self.history.truncate(self.history_limit);
        }
        self.current = Some(analysis.clone());
        analysis
    }

    /// Release the session without touching the current analysis
    pub fn abort_batch(&mut self, _batch: PendingBatch) {
        warn!("Analysis batch aborted");
        self.in_flight = false;
    }

    /// Classify a batch in place
    pub fn analyze_texts(
        &mut self,
        classifier: &LexiconClassifier,
        texts: Vec<String>,
        save_to_history: bool,
    ) -> Result<SentimentAnalysis, SessionError> {
        let batch = self.begin_batch(texts, save_to_history)?;
        let results = classifier.classify_batch(batch.texts());
        Ok(self.complete_batch(batch, results))
    }

    pub fn current(&self) -> Option<&SentimentAnalysis> {
        self.current.as_ref()
    }

    /// Drop the current analysis; history is kept
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn history(&self) -> impl Iterator<Item = &AnalysisHistory> {
        self.history.iter()
    }

    /// Make a history entry the current analysis again
    pub fn load_from_history(&mut self, id: &str) -> Result<&SentimentAnalysis, SessionError> {
        let entry = self
            .history
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| SessionError::HistoryNotFound(id.to_string()))?;

        info!("Loaded {} from history", entry.name);
        Ok(self.current.insert(entry.analysis.clone()))
    }
}

/// Extract fragments from an uploaded file and apply the per-file cap
///
/// Does not touch any session, so a slow parse never blocks readers of the
/// current analysis.
pub fn ingest_file(
    extractor: &FileExtractor,
    max_fragments: usize,
    file_name: &str,
    bytes: &[u8],
) -> Result<IngestedFile, SessionError> {
    let mut fragments = extractor.extract_named(file_name, bytes)?;
    let total_found = fragments.len();

    let warning = if total_found > max_fragments {
        fragments.truncate(max_fragments);
        let message = format!(
            "File contained {} texts. Showing first {} for performance.",
            total_found, max_fragments
        );
        warn!("{}: {}", file_name, message);
        Some(message)
    } else {
        None
    };

    Ok(IngestedFile {
        fragments,
        total_found,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_common::Sentiment;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn session_with(history_limit: usize) -> AnalysisSession {
        AnalysisSession::new(&LimitsConfig {
            history_limit,
            ..LimitsConfig::default()
        })
    }

    #[test]
    fn test_analyze_replaces_current_and_saves_history() {
        let mut session = AnalysisSession::default();
        let classifier = LexiconClassifier::default();

        let analysis = session
            .analyze_texts(&classifier, texts(&["I love it", "This is bad"]), true)
            .unwrap();

        assert_eq!(analysis.summary.total_texts, 2);
        assert_eq!(analysis.results[0].sentiment, Sentiment::Positive);
        assert_eq!(analysis.results[1].sentiment, Sentiment::Negative);
        assert_eq!(session.current(), Some(&analysis));
        assert_eq!(session.history().count(), 1);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_blank_texts_are_dropped() {
        let mut session = AnalysisSession::default();
        let analysis = session
            .analyze_texts(
                &LexiconClassifier::default(),
                texts(&["", "  ", "fine", "\n"]),
                false,
            )
            .unwrap();
        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.results[0].text, "fine");
        assert_eq!(session.history().count(), 0);
    }

    #[test]
    fn test_no_texts() {
        let mut session = AnalysisSession::default();
        let err = session
            .analyze_texts(&LexiconClassifier::default(), texts(&[" ", ""]), true)
            .unwrap_err();
        assert!(matches!(err, SessionError::NoTexts));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_second_batch_while_in_flight_is_busy() {
        let mut session = AnalysisSession::default();
        let batch = session.begin_batch(texts(&["first"]), true).unwrap();
        assert!(session.is_busy());

        let err = session.begin_batch(texts(&["second"]), true).unwrap_err();
        assert!(matches!(err, SessionError::Busy));

        session.abort_batch(batch);
        assert!(!session.is_busy());
        assert!(session.current().is_none());
        assert!(session.begin_batch(texts(&["third"]), true).is_ok());
    }

    #[test]
    fn test_history_is_capped_most_recent_first() {
        let mut session = session_with(3);
        let classifier = LexiconClassifier::default();
        for i in 0..5 {
            session
                .analyze_texts(&classifier, vec![format!("text number {}", i)], true)
                .unwrap();
        }

        let firsts: Vec<&str> = session
            .history()
            .map(|h| h.analysis.results[0].text.as_str())
            .collect();
        assert_eq!(firsts, vec!["text number 4", "text number 3", "text number 2"]);
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut session = AnalysisSession::default();
        session
            .analyze_texts(&LexiconClassifier::default(), texts(&["great"]), true)
            .unwrap();
        session.clear();
        assert!(session.current().is_none());
        assert_eq!(session.history().count(), 1);
    }

    #[test]
    fn test_load_from_history() {
        let mut session = AnalysisSession::default();
        let classifier = LexiconClassifier::default();
        let first = session
            .analyze_texts(&classifier, texts(&["great"]), true)
            .unwrap();
        session
            .analyze_texts(&classifier, texts(&["awful"]), true)
            .unwrap();

        let id = session.history().last().map(|h| h.id.clone()).unwrap();
        let loaded = session.load_from_history(&id).unwrap().clone();
        assert_eq!(loaded, first);
        assert_eq!(session.current(), Some(&first));

        let err = session.load_from_history("history-missing").unwrap_err();
        assert!(matches!(err, SessionError::HistoryNotFound(ref id) if id == "history-missing"));
    }

    #[test]
    fn test_ingest_applies_fragment_cap() {
        let content: String = (0..150).map(|i| format!("line {}\n", i)).collect();

        let ingested =
            ingest_file(&FileExtractor::default(), 100, "notes.txt", content.as_bytes()).unwrap();

        assert_eq!(ingested.fragments.len(), 100);
        assert_eq!(ingested.total_found, 150);
        assert_eq!(ingested.fragments[99], "line 99");
        assert_eq!(
            ingested.warning.as_deref(),
            Some("File contained 150 texts. Showing first 100 for performance.")
        );
    }

    #[test]
    fn test_ingest_under_cap_has_no_warning() {
        let ingested =
            ingest_file(&FileExtractor::default(), 100, "data.json", br#"["good", "bad", "ok"]"#)
                .unwrap();
        assert_eq!(ingested.fragments, vec!["good", "bad", "ok"]);
        assert_eq!(ingested.warning, None);
    }

    #[test]
    fn test_ingest_propagates_extract_errors() {
        let err = ingest_file(&FileExtractor::default(), 100, "data.xyz", b"irrelevant").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Extract(ExtractError::UnsupportedFormat { .. })
        ));
    }
}

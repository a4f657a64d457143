//! Lexicon-based sentiment classifier
//!
//! Scores a text by scanning its tokens against a fixed vocabulary:
//! - positive/negative words contribute +1/-1
//! - an intensifier directly before a sentiment word scales it by 1.5
//! - a negator in the two tokens before a sentiment word flips its sign
//!
//! The positive/negative totals are turned into a class, a confidence and a
//! score distribution. Classification is a pure function of the text and the
//! vocabulary; it never fails, and text without vocabulary hits is NEUTRAL.

pub mod jitter;
pub mod lexicon;
pub mod tokenizer;

pub use jitter::{JitterPolicy, BALANCED_BAND, NO_SIGNAL_BAND};
pub use lexicon::{Lexicon, Polarity};

use sdash_common::{Sentiment, SentimentResult, SentimentScores};
use std::sync::Arc;
use tracing::debug;

/// Weight applied to a sentiment word preceded by an intensifier
pub const INTENSIFIER_WEIGHT: f64 = 1.5;

/// How many preceding tokens are searched for a negator
pub const NEGATION_WINDOW: usize = 2;

/// Maximum keywords reported per text
pub const MAX_KEYWORDS: usize = 8;

/// Maximum supplementary (non-sentiment) keyword candidates
pub const MAX_SUPPLEMENTARY_KEYWORDS: usize = 5;

/// Ratio above which one polarity wins outright
const DOMINANT_RATIO: f64 = 0.6;

/// Ratio gap below which the text counts as balanced
const BALANCED_GAP: f64 = 0.2;

/// Fixed distribution for text without sentiment words
pub const NO_SIGNAL_SCORES: SentimentScores = SentimentScores {
    positive: 0.33,
    negative: 0.33,
    neutral: 0.34,
};

/// Classifier output before an id and timestamp are attached
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub scores: SentimentScores,
    pub keywords: Vec<String>,
    pub explanation: String,
    /// Accumulated positive weight after negation and intensifiers
    pub positive_score: f64,
    /// Accumulated negative weight after negation and intensifiers
    pub negative_score: f64,
}

/// Running totals from one pass over the tokens
#[derive(Debug, Default)]
struct Tally {
    positive: f64,
    negative: f64,
    /// Every sentiment word occurrence, in text order
    sentiment_words: Vec<String>,
}

/// Lexicon classifier
///
/// Cheap to clone; the vocabulary is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    lexicon: Arc<Lexicon>,
    jitter: JitterPolicy,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::default()), JitterPolicy::default())
    }
}

impl LexiconClassifier {
    pub fn new(lexicon: Arc<Lexicon>, jitter: JitterPolicy) -> Self {
        Self { lexicon, jitter }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn jitter(&self) -> JitterPolicy {
        self.jitter
    }

    /// Classify a single text
    pub fn classify(&self, text: &str) -> Classification {
        let tokens = tokenizer::tokenize(text);
        let tally = self.score(&tokens);
        let keywords = self.keywords(&tokens, &tally.sentiment_words);
        let total = tally.positive + tally.negative;

        if total == 0.0 {
            let confidence = self.jitter.draw(NO_SIGNAL_BAND, text);
            let explanation = explain(
                Sentiment::Neutral,
                &keywords,
                "No strong sentiment indicators found",
            );
            return Classification {
                sentiment: Sentiment::Neutral,
                confidence,
                scores: NO_SIGNAL_SCORES,
                keywords,
                explanation,
                positive_score: 0.0,
                negative_score: 0.0,
            };
        }

        let (sentiment, confidence) = self.decide(tally.positive, tally.negative, text);
        let reason = reason(tally.positive, tally.negative, &tally.sentiment_words);
        let explanation = explain(sentiment, &keywords, &reason);

        Classification {
            sentiment,
            confidence,
            scores: distribute(sentiment, confidence),
            keywords,
            explanation,
            positive_score: tally.positive,
            negative_score: tally.negative,
        }
    }

    /// Classify a text into a complete result with id and timestamp
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let classification = self.classify(text);
        SentimentResult {
            id: sdash_common::uuid_utils::result_id(),
            text: text.to_string(),
            sentiment: classification.sentiment,
            confidence: classification.confidence,
            scores: classification.scores,
            keywords: classification.keywords,
            timestamp: sdash_common::time::now(),
            explanation: classification.explanation,
        }
    }

    /// Classify a batch; one result per input, same order
    pub fn classify_batch(&self, texts: &[String]) -> Vec<SentimentResult> {
        let results: Vec<SentimentResult> = texts.iter().map(|text| self.analyze(text)).collect();
        debug!("Classified batch of {} texts", results.len());
        results
    }

    fn score(&self, tokens: &[String]) -> Tally {
        let mut tally = Tally::default();

        for (i, token) in tokens.iter().enumerate() {
            let Some(polarity) = self.lexicon.polarity(token) else {
                continue;
            };

            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|t| self.lexicon.is_negator(t));

            let mut weight = polarity.sign();
            if i > 0 && self.lexicon.is_intensifier(&tokens[i - 1]) {
                weight *= INTENSIFIER_WEIGHT;
            }
            if negated {
                weight = -weight;
            }

            if weight > 0.0 {
                tally.positive += weight;
            } else {
                tally.negative += weight.abs();
            }
            tally.sentiment_words.push(token.clone());
        }

        tally
    }

    /// Sentiment words first, then up to five other content words
    fn keywords(&self, tokens: &[String], sentiment_words: &[String]) -> Vec<String> {
        let supplementary = tokens
            .iter()
            .filter(|word| {
                word.chars().count() > 3
                    && !self.lexicon.is_stop_word(word)
                    && !sentiment_words.contains(word)
                    && !self.lexicon.is_negator(word)
                    && !self.lexicon.is_intensifier(word)
            })
            .take(MAX_SUPPLEMENTARY_KEYWORDS);

        let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
        for word in sentiment_words.iter().chain(supplementary) {
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
            if !keywords.contains(word) {
                keywords.push(word.clone());
            }
        }
        keywords
    }

    fn decide(&self, positive: f64, negative: f64, text: &str) -> (Sentiment, f64) {
        let positive_ratio = positive / (positive + negative);
        let negative_ratio = 1.0 - positive_ratio;

        if positive_ratio > DOMINANT_RATIO {
            (Sentiment::Positive, (0.70 + positive_ratio * 0.25).min(0.95))
        } else if negative_ratio > DOMINANT_RATIO {
            (Sentiment::Negative, (0.70 + negative_ratio * 0.25).min(0.95))
        } else if (positive_ratio - negative_ratio).abs() < BALANCED_GAP {
            (Sentiment::Neutral, self.jitter.draw(BALANCED_BAND, text))
        } else if positive_ratio > negative_ratio {
            (Sentiment::Positive, 0.60 + (positive_ratio - negative_ratio) * 0.3)
        } else {
            (Sentiment::Negative, 0.60 + (negative_ratio - positive_ratio) * 0.3)
        }
    }
}

/// Spread the remaining mass over the losing classes
///
/// POSITIVE/NEGATIVE: opposite class gets 20% of the remainder, neutral 80%.
/// NEUTRAL: positive and negative split it evenly, so the three scores
/// always sum to one.
pub fn distribute(sentiment: Sentiment, confidence: f64) -> SentimentScores {
    let remainder = 1.0 - confidence;
    match sentiment {
        Sentiment::Positive => SentimentScores {
            positive: confidence,
            negative: remainder * 0.2,
            neutral: remainder * 0.8,
        },
        Sentiment::Negative => SentimentScores {
            positive: remainder * 0.2,
            negative: confidence,
            neutral: remainder * 0.8,
        },
        Sentiment::Neutral => SentimentScores {
            positive: remainder * 0.5,
            negative: remainder * 0.5,
            neutral: confidence,
        },
    }
}

fn reason(positive: f64, negative: f64, sentiment_words: &[String]) -> String {
    if positive > negative {
        format!("Strong positive indicators detected ({})", sentiment_words.join(", "))
    } else if negative > positive {
        format!("Strong negative indicators detected ({})", sentiment_words.join(", "))
    } else {
        "Balanced or minimal sentiment indicators".to_string()
    }
}

fn explain(sentiment: Sentiment, keywords: &[String], reason: &str) -> String {
    let key_terms = if keywords.is_empty() {
        "Limited key terms found".to_string()
    } else {
        let top: Vec<&str> = keywords.iter().take(3).map(String::as_str).collect();
        format!("Key terms: \"{}\"", top.join("\", \""))
    };

    let closing = match sentiment {
        Sentiment::Positive => {
            "The text expresses favorable opinions, satisfaction, or positive emotions."
        }
        Sentiment::Negative => {
            "The text contains criticism, dissatisfaction, or negative emotions."
        }
        Sentiment::Neutral => {
            "The text maintains a neutral tone without strong emotional indicators."
        }
    };

    format!("{}. {}. {}", key_terms, reason, closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LexiconClassifier {
        LexiconClassifier::default()
    }

    #[test]
    fn test_negation_flips_to_negative() {
        let c = classifier().classify("This is not good");
        assert_eq!(c.sentiment, Sentiment::Negative);
        assert_eq!(c.positive_score, 0.0);
        assert_eq!(c.negative_score, 1.0);
        // The keyword is the word itself, not its flipped polarity
        assert_eq!(c.keywords[0], "good");
    }

    #[test]
    fn test_negator_two_tokens_back_still_applies() {
        let c = classifier().classify("never very good");
        assert_eq!(c.sentiment, Sentiment::Negative);
        assert_eq!(c.negative_score, 1.5);
    }

    #[test]
    fn test_negator_three_tokens_back_is_ignored() {
        let c = classifier().classify("not the service good");
        assert_eq!(c.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_intensifier_weights_following_word() {
        let c = classifier().classify("This is absolutely amazing");
        assert_eq!(c.sentiment, Sentiment::Positive);
        assert_eq!(c.positive_score, 1.5);
        assert!((c.confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_intensifier_raises_confidence() {
        let plain = classifier().classify("good but slow and good");
        let boosted = classifier().classify("extremely good but slow and extremely good");
        assert_eq!(plain.positive_score, 2.0);
        assert_eq!(boosted.positive_score, 3.0);
        assert_eq!(plain.sentiment, Sentiment::Positive);
        assert_eq!(boosted.sentiment, Sentiment::Positive);
        assert!(boosted.confidence > plain.confidence);
    }

    #[test]
    fn test_no_vocabulary_is_neutral_with_fixed_scores() {
        let c = classifier().classify("Lorem ipsum dolor sit");
        assert_eq!(c.sentiment, Sentiment::Neutral);
        assert_eq!(c.scores, NO_SIGNAL_SCORES);
        assert!((0.60..=0.80).contains(&c.confidence));
        assert!(c.explanation.contains("No strong sentiment indicators found"));
        assert_eq!(c.keywords, vec!["lorem", "ipsum", "dolor"]);
    }

    #[test]
    fn test_empty_string_is_neutral() {
        let c = classifier().classify("");
        assert_eq!(c.sentiment, Sentiment::Neutral);
        assert!(c.keywords.is_empty());
        assert!(c.explanation.starts_with("Limited key terms found."));
    }

    #[test]
    fn test_balanced_text_is_neutral() {
        let c = classifier().classify("good and bad");
        assert_eq!(c.sentiment, Sentiment::Neutral);
        assert!((c.confidence - 0.725).abs() < 1e-12);
        assert!((c.scores.positive - 0.275 * 0.5).abs() < 1e-12);
        assert_eq!(c.scores.positive, c.scores.negative);
        assert!((c.scores.total() - 1.0).abs() < 1e-9);
        assert!(c.explanation.contains("Balanced or minimal sentiment indicators"));
    }

    #[test]
    fn test_positive_distribution() {
        let c = classifier().classify("great service, excellent staff");
        assert_eq!(c.sentiment, Sentiment::Positive);
        assert!((c.confidence - 0.95).abs() < 1e-12);
        assert!((c.scores.negative - 0.05 * 0.2).abs() < 1e-12);
        assert!((c.scores.neutral - 0.05 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_scores_sum_to_one_and_match_confidence() {
        let texts = [
            "I love this, it is wonderful and easy to use",
            "terrible support and slow, broken delivery",
            "not bad, not great",
            "good but expensive",
            "The meeting is at noon",
            "Really really really good? No. Not good at all!",
        ];
        for text in texts {
            let c = classifier().classify(text);
            assert!((c.scores.total() - 1.0).abs() < 1e-9, "{}", text);
            assert!(c.confidence >= 0.60 && c.confidence <= 0.95, "{}", text);
            if c.positive_score + c.negative_score > 0.0 {
                assert_eq!(c.scores.get(c.sentiment), c.confidence, "{}", text);
            }
        }
    }

    #[test]
    fn test_keywords_sentiment_first_then_content_words() {
        let c = classifier().classify("The delivery was slow but the packaging looked beautiful");
        assert_eq!(&c.keywords[..2], &["slow".to_string(), "beautiful".to_string()]);
        assert!(c.keywords.contains(&"delivery".to_string()));
        assert!(c.keywords.contains(&"packaging".to_string()));
        assert!(!c.keywords.contains(&"the".to_string()));
    }

    #[test]
    fn test_keywords_capped_and_distinct() {
        let text = "good great nice fine best love happy amazing awesome superb wonderful good";
        let c = classifier().classify(text);
        assert_eq!(c.keywords.len(), MAX_KEYWORDS);
        let mut sorted = c.keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_explanation_lists_top_three_keywords() {
        let c = classifier().classify("awful, terrible, horrible and useless");
        assert!(c
            .explanation
            .starts_with("Key terms: \"awful\", \"terrible\", \"horrible\"."));
        assert!(c
            .explanation
            .contains("Strong negative indicators detected (awful, terrible, horrible, useless)"));
        assert!(c.explanation.ends_with("negative emotions."));
    }

    #[test]
    fn test_sixty_forty_split_counts_as_balanced() {
        // 1.5 vs 1.0 gives a 0.6 ratio, which is not dominant
        let c = classifier().classify("very good, bad");
        assert_eq!(c.sentiment, Sentiment::Neutral);
        assert!((0.65..0.80).contains(&c.confidence));
    }

    #[test]
    fn test_unrecognised_tokens_do_not_score() {
        let c = classifier().classify("the quarterly report arrived on tuesday");
        assert_eq!(c.positive_score + c.negative_score, 0.0);
        assert_eq!(c.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_batch_preserves_order_and_length() {
        let texts = vec![
            "great".to_string(),
            "awful".to_string(),
            "table".to_string(),
        ];
        let results = classifier().classify_batch(&texts);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].sentiment, Sentiment::Positive);
        assert_eq!(results[1].sentiment, Sentiment::Negative);
        assert_eq!(results[2].sentiment, Sentiment::Neutral);
        assert_eq!(results[2].text, "table");
        assert_ne!(results[0].id, results[1].id);
    }

    #[test]
    fn test_idempotent_classification() {
        let seeded = LexiconClassifier::new(Arc::new(Lexicon::default()), JitterPolicy::Seeded(3));
        let a = seeded.classify("nothing to see here");
        let b = seeded.classify("nothing to see here");
        assert_eq!(a, b);
    }
}

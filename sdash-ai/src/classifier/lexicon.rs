//! Fixed sentiment vocabulary
//!
//! All lookups are on lower-cased tokens. Entries containing punctuation
//! (`can't`, `budget-friendly`) never match tokenizer output; they are kept so
//! the lists stay identical to the dashboard's published vocabulary.

use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "excellent", "fantastic", "great", "wonderful", "perfect", "outstanding",
    "brilliant", "superb", "magnificent", "marvelous", "incredible", "spectacular", "phenomenal",
    "love", "like", "enjoy", "appreciate", "adore", "cherish", "treasure", "value",
    "happy", "joy", "pleased", "satisfied", "delighted", "thrilled", "excited", "elated",
    "good", "nice", "fine", "well", "better", "best", "superior", "quality",
    "success", "successful", "achieve", "accomplished", "victory", "win", "triumph",
    "beautiful", "attractive", "gorgeous", "stunning", "elegant", "lovely", "pretty",
    "helpful", "useful", "beneficial", "valuable", "worthwhile", "effective", "efficient",
    "recommend", "praise", "compliment", "congratulate", "thank", "grateful", "thankful",
    "smooth", "easy", "simple", "convenient", "comfortable", "pleasant", "enjoyable",
    "fast", "quick", "rapid", "speedy", "prompt", "timely",
    "reliable", "trustworthy", "dependable", "consistent", "stable", "secure",
    "innovative", "creative", "original", "unique", "special", "exceptional",
    "affordable", "reasonable", "fair", "cheap", "economical", "budget-friendly",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "terrible", "horrible", "disgusting", "pathetic", "useless", "worthless",
    "bad", "poor", "worst", "inferior", "subpar", "mediocre", "disappointing",
    "hate", "dislike", "despise", "loathe", "detest", "abhor", "resent",
    "angry", "mad", "furious", "upset", "annoyed", "irritated", "frustrated",
    "sad", "depressed", "miserable", "unhappy", "gloomy", "devastated", "heartbroken",
    "fail", "failure", "failed", "unsuccessful", "defeat", "lose", "loss",
    "problem", "issue", "trouble", "difficulty", "challenge", "obstacle", "barrier",
    "slow", "sluggish", "delayed", "late", "overdue", "behind", "lagging",
    "expensive", "costly", "overpriced", "unaffordable", "pricey", "steep",
    "broken", "damaged", "defective", "faulty", "malfunctioning", "buggy",
    "confusing", "complicated", "difficult", "hard", "complex", "unclear",
    "rude", "impolite", "disrespectful", "unprofessional", "inappropriate",
    "unreliable", "untrustworthy", "inconsistent", "unstable", "insecure",
    "boring", "dull", "tedious", "monotonous", "uninteresting", "bland",
    "wrong", "incorrect", "false", "inaccurate", "mistaken", "error",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "incredibly", "absolutely", "completely", "totally",
    "really", "quite", "rather", "pretty", "fairly", "somewhat",
    "highly", "deeply", "truly", "genuinely", "seriously", "definitely",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "neither",
    "none", "cannot", "can't", "won't", "wouldn't", "shouldn't",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their",
];

/// Base polarity of a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Signed unit weight (+1 / -1)
    pub fn sign(&self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// Word sets used for scoring and keyword selection
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negators: HashSet<String>,
    stop_words: HashSet<String>,
}

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl Lexicon {
    /// Build a lexicon from custom word lists
    pub fn new(
        positive: &[&str],
        negative: &[&str],
        intensifiers: &[&str],
        negators: &[&str],
        stop_words: &[&str],
    ) -> Self {
        Self {
            positive: word_set(positive),
            negative: word_set(negative),
            intensifiers: word_set(intensifiers),
            negators: word_set(negators),
            stop_words: word_set(stop_words),
        }
    }

    /// Polarity of a token, `None` for non-sentiment words
    ///
    /// A word present in both polarity sets counts as positive.
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        if self.positive.contains(token) {
            Some(Polarity::Positive)
        } else if self.negative.contains(token) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.contains(token)
    }

    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// (positive, negative, intensifier, negator, stop word) set sizes
    pub fn sizes(&self) -> (usize, usize, usize, usize, usize) {
        (
            self.positive.len(),
            self.negative.len(),
            self.intensifiers.len(),
            self.negators.len(),
            self.stop_words.len(),
        )
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS, INTENSIFIERS, NEGATORS, STOP_WORDS)
    }
}

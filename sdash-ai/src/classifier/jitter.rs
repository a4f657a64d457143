//! Confidence selection inside the jitter bands
//!
//! Two branches of the classifier pick their confidence from a band rather
//! than a formula: "no sentiment words" ([0.60, 0.80)) and "balanced ratio"
//! ([0.65, 0.80)). The band is the contract; the draw is a policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdash_common::config::{ClassifierConfig, JitterMode};
use sha2::{Digest, Sha256};

/// Confidence band for a branch without a closed-form confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// No recognised sentiment words
pub const NO_SIGNAL_BAND: Band = Band::new(0.60, 0.80);

/// Positive and negative ratios within 0.2 of each other
pub const BALANCED_BAND: Band = Band::new(0.65, 0.80);

/// How a confidence value is chosen within a band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Always the band midpoint
    #[default]
    Midpoint,
    /// Uniform draw seeded from (seed, text); the same text always gets the same value
    Seeded(u64),
}

impl JitterPolicy {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        match config.jitter {
            JitterMode::Midpoint => JitterPolicy::Midpoint,
            JitterMode::Seeded => JitterPolicy::Seeded(config.seed.unwrap_or_default()),
        }
    }

    /// Confidence for `text` inside `band`
    pub fn draw(&self, band: Band, text: &str) -> f64 {
        match self {
            JitterPolicy::Midpoint => band.midpoint(),
            JitterPolicy::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ text_seed(text));
                rng.gen_range(band.low..band.high)
            }
        }
    }
}

fn text_seed(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

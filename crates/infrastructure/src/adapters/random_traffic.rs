//! Simulated traffic - Implements TrafficClassifier with uniform random draws
//!
//! Every span gets its own independent draw. This is not real traffic data.

use application::ports::{RoadSpan, TrafficClassifier};
use domain::CongestionLevel;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Threshold set used to bucket a random draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficProfile {
    /// Heavy above 0.7, medium above 0.4
    #[default]
    Standard,
    /// Heavy above 0.66, medium above 0.33
    Simplified,
}

impl TrafficProfile {
    /// `(heavy, medium)` lower bounds, both exclusive
    pub const fn thresholds(self) -> (f64, f64) {
        match self {
            Self::Standard => (0.7, 0.4),
            Self::Simplified => (0.66, 0.33),
        }
    }

    /// Bucket a draw from `[0, 1)`
    pub fn level_for(self, value: f64) -> CongestionLevel {
        let (heavy, medium) = self.thresholds();
        if value > heavy {
            CongestionLevel::Heavy
        } else if value > medium {
            CongestionLevel::Medium
        } else {
            CongestionLevel::Light
        }
    }
}

/// Random congestion classifier
#[derive(Debug)]
pub struct RandomTrafficClassifier {
    profile: TrafficProfile,
    rng: Mutex<StdRng>,
}

impl RandomTrafficClassifier {
    /// Classifier seeded from the operating system
    pub fn new(profile: TrafficProfile) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible classifier
    pub fn seeded(profile: TrafficProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Threshold profile in use
    pub const fn profile(&self) -> TrafficProfile {
        self.profile
    }
}

impl TrafficClassifier for RandomTrafficClassifier {
    fn classify(&self, _span: &RoadSpan) -> CongestionLevel {
        let value: f64 = self.rng.lock().random();
        self.profile.level_for(value)
    }
}

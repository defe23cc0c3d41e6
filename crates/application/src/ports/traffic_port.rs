//! Traffic classification port
//!
//! Congestion coloring is pluggable. The default adapter is a random simulation;
//! a real traffic feed can replace it without touching the composer.

use domain::{CongestionLevel, Coordinate};

/// One stretch of road between two consecutive route points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSpan {
    /// Start point
    pub from: Coordinate,
    /// End point
    pub to: Coordinate,
}

/// Assigns a congestion level to each road span independently
pub trait TrafficClassifier: Send + Sync {
    /// Classify one span
    fn classify(&self, span: &RoadSpan) -> CongestionLevel;
}

/// Classifier that reports the same level everywhere
#[derive(Debug, Clone, Copy)]
pub struct UniformTrafficClassifier(pub CongestionLevel);

impl Default for UniformTrafficClassifier {
    fn default() -> Self {
        Self(CongestionLevel::Light)
    }
}

impl TrafficClassifier for UniformTrafficClassifier {
    fn classify(&self, _span: &RoadSpan) -> CongestionLevel {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_classifier_is_constant() {
        let span = RoadSpan {
            from: Coordinate::mumbai(),
            to: Coordinate::new_unchecked(19.1, 72.9),
        };
        assert_eq!(
            UniformTrafficClassifier::default().classify(&span),
            CongestionLevel::Light
        );
        assert_eq!(
            UniformTrafficClassifier(CongestionLevel::Heavy).classify(&span),
            CongestionLevel::Heavy
        );
    }
}

//! Confidence Classifier
//!
//! Maps the winning candidate's (final, coverage) pair onto a categorical
//! confidence level. Levels are evaluated top-down, so a strong score with
//! thin coverage degrades to medium or low instead of falling through.

use vmatch_common::models::ConfidenceLevel;

/// Confidence Classifier
pub struct ConfidenceClassifier {
    /// `final` must exceed this for high (default 0.7)
    high_final: f64,

    /// Coverage must exceed this for high (default 0.75)
    high_coverage: f64,

    /// `final` must reach this for medium (default 0.4)
    medium_final: f64,

    /// Coverage must exceed this for medium (default 0.5)
    medium_coverage: f64,

    /// `final` must reach this for low (default 0.2)
    low_final: f64,
}

impl ConfidenceClassifier {
    /// Create classifier with default thresholds
    ///
    /// **Default Thresholds:**
    /// - High: final > 0.7 and coverage > 0.75
    /// - Medium: final ≥ 0.4 and coverage > 0.5
    /// - Low: final ≥ 0.2
    /// - None: otherwise
    pub fn new() -> Self {
        Self {
            high_final: 0.7,
            high_coverage: 0.75,
            medium_final: 0.4,
            medium_coverage: 0.5,
            low_final: 0.2,
        }
    }

    /// Lowest `final` that classifies above none
    pub fn low_threshold(&self) -> f64 {
        self.low_final
    }

    /// Classify an accepted candidate
    ///
    /// # Arguments
    /// * `final_score` - Aggregated score (0.0-1.0)
    /// * `coverage` - Fraction of folded dimensions with data (0.0-1.0)
    pub fn classify(&self, final_score: f64, coverage: f64) -> ConfidenceLevel {
        if coverage <= 0.0 {
            return ConfidenceLevel::None;
        }
        if final_score > self.high_final && coverage > self.high_coverage {
            ConfidenceLevel::High
        } else if final_score >= self.medium_final && coverage > self.medium_coverage {
            ConfidenceLevel::Medium
        } else if final_score >= self.low_final {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::None
        }
    }
}

impl Default for ConfidenceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

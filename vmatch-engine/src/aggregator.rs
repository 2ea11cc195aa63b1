//! Score Aggregator
//!
//! Folds the four scored dimensions into a single `final` score. Missing
//! dimensions are excluded and the remaining weights renormalized, so a
//! dimension without data neither helps nor hurts a candidate.

use vmatch_common::config::DimensionWeights;

/// Aggregated view of one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Weighted mean over present dimensions; `None` when none are present
    pub final_score: Option<f64>,
    /// Present dimensions / 4
    pub coverage: f64,
}

impl Aggregate {
    pub fn uncertainty(&self) -> f64 {
        1.0 - self.coverage
    }
}

/// Weighted-mean aggregator
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    weights: [f64; 4],
}

impl Aggregator {
    pub fn new(weights: &DimensionWeights) -> Self {
        Self {
            weights: weights.as_array(),
        }
    }

    /// Aggregate dimension scores ordered spatial, tectonic, temporal,
    /// petrological
    pub fn aggregate(&self, scores: &[Option<f64>; 4]) -> Aggregate {
        let present: Vec<(f64, f64)> = scores
            .iter()
            .zip(self.weights)
            .filter_map(|(score, weight)| score.map(|s| (s, weight)))
            .collect();

        let coverage = present.len() as f64 / scores.len() as f64;
        if present.is_empty() {
            return Aggregate {
                final_score: None,
                coverage,
            };
        }

        let weight_sum: f64 = present.iter().map(|(_, w)| w).sum();
        let mean = if weight_sum > 0.0 {
            present.iter().map(|(s, w)| s * w).sum::<f64>() / weight_sum
        } else {
            // Every present dimension carries zero weight
            present.iter().map(|(s, _)| s).sum::<f64>() / present.len() as f64
        };

        Aggregate {
            final_score: Some(mean.clamp(0.0, 1.0)),
            coverage,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&DimensionWeights::default())
    }
}

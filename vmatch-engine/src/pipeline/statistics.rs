//! Batch run statistics
//!
//! Gathered after the run from the finished records, so the hot path
//! carries no shared counters.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vmatch_common::models::{ConfidenceLevel, MatchResult, MatchStatus};

/// Counts per outcome for one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub matched: usize,
    pub rejected: usize,
    /// Rejected with nothing inside the search radius
    pub no_candidates: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Records whose `lit:` reason names the volcano explicitly or partially
    pub named_in_reference: usize,
    pub elapsed_ms: u64,
}

impl BatchStatistics {
    pub fn from_results(results: &[MatchResult], elapsed: Duration) -> Self {
        let mut stats = Self {
            total: results.len(),
            elapsed_ms: elapsed.as_millis() as u64,
            ..Default::default()
        };

        for result in results {
            match result.status {
                MatchStatus::Matched => stats.matched += 1,
                MatchStatus::Rejected => stats.rejected += 1,
            }
            match result.quality.confidence {
                ConfidenceLevel::High => stats.high += 1,
                ConfidenceLevel::Medium => stats.medium += 1,
                ConfidenceLevel::Low => stats.low += 1,
                ConfidenceLevel::None => {}
            }
            if result
                .explanation
                .flags
                .iter()
                .any(|f| f == "space:high_uncertainty")
            {
                stats.no_candidates += 1;
            }
            if result.is_matched() && result.evidence.literature.name_in_reference {
                stats.named_in_reference += 1;
            }
        }
        stats
    }

    /// Samples per second, 0 when the run was too fast to time
    pub fn rate(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            self.total as f64 * 1000.0 / self.elapsed_ms as f64
        }
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} samples: {} matched ({} high, {} medium, {} low), {} rejected ({} without candidates) in {:.2}s ({:.0} samples/s)",
            self.total,
            self.matched,
            self.high,
            self.medium,
            self.low,
            self.rejected,
            self.no_candidates,
            self.elapsed_ms as f64 / 1000.0,
            self.rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        let stats = BatchStatistics::from_results(&[], Duration::ZERO);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.rate(), 0.0);
        assert_eq!(
            stats.display_string(),
            "0 samples: 0 matched (0 high, 0 medium, 0 low), 0 rejected (0 without candidates) in 0.00s (0 samples/s)"
        );
    }

    #[test]
    fn test_rate() {
        let stats = BatchStatistics {
            total: 500,
            elapsed_ms: 250,
            ..Default::default()
        };
        assert_eq!(stats.rate(), 2000.0);
    }
}

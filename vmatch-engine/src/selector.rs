//! Candidate Selector
//!
//! Ranks scored candidates and decides whether the best one is accepted.
//! Ordering is total and deterministic: higher `final` first, then smaller
//! distance, then volcano id.

use crate::aggregator::Aggregate;
use crate::locator::LocatedCandidate;
use crate::scorers::ScoreCard;
use std::cmp::Ordering;

/// A located candidate with its scores
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub located: LocatedCandidate<'a>,
    pub card: ScoreCard,
    pub aggregate: Aggregate,
}

impl ScoredCandidate<'_> {
    /// `final`, treating a candidate without data as unrankable
    fn final_score(&self) -> f64 {
        self.aggregate.final_score.unwrap_or(f64::NEG_INFINITY)
    }
}

fn rank(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.final_score()
        .total_cmp(&a.final_score())
        .then_with(|| a.located.distance_km.total_cmp(&b.located.distance_km))
        .then_with(|| a.located.id().cmp(b.located.id()))
}

/// Outcome of selection for one sample
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    /// Nothing inside the search radius
    NoCandidates,
    /// Candidates located, none with any folded dimension
    NoUsableEvidence { best: ScoredCandidate<'a> },
    /// Best candidate scored under the acceptance floor
    BelowFloor {
        best: ScoredCandidate<'a>,
        competing: bool,
    },
    Accepted {
        best: ScoredCandidate<'a>,
        competing: bool,
    },
}

impl<'a> Selection<'a> {
    /// The candidate the explanation describes, if any
    pub fn best(&self) -> Option<&ScoredCandidate<'a>> {
        match self {
            Selection::NoCandidates => None,
            Selection::NoUsableEvidence { best }
            | Selection::BelowFloor { best, .. }
            | Selection::Accepted { best, .. } => Some(best),
        }
    }

    pub fn competing(&self) -> bool {
        matches!(
            self,
            Selection::BelowFloor {
                competing: true,
                ..
            } | Selection::Accepted {
                competing: true,
                ..
            }
        )
    }
}

/// Candidate selector with acceptance thresholds
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector {
    acceptance_floor: f64,
    competing_epsilon: f64,
}

impl CandidateSelector {
    pub fn new(acceptance_floor: f64, competing_epsilon: f64) -> Self {
        Self {
            acceptance_floor,
            competing_epsilon,
        }
    }

    /// Pick the best candidate
    pub fn select<'a>(&self, mut scored: Vec<ScoredCandidate<'a>>) -> Selection<'a> {
        if scored.is_empty() {
            return Selection::NoCandidates;
        }
        scored.sort_by(rank);

        let usable = scored
            .iter()
            .filter(|c| c.aggregate.final_score.is_some())
            .count();
        let mut ranked = scored.into_iter();

        let Some(best) = ranked.next() else {
            return Selection::NoCandidates;
        };
        let Some(best_final) = best.aggregate.final_score else {
            return Selection::NoUsableEvidence { best };
        };

        let competing = usable > 1
            && ranked
                .next()
                .and_then(|runner_up| runner_up.aggregate.final_score)
                .is_some_and(|second| best_final - second <= self.competing_epsilon);

        if best_final < self.acceptance_floor {
            Selection::BelowFloor { best, competing }
        } else {
            Selection::Accepted { best, competing }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::VolcanoIndex;
    use crate::scorers::literature::LiteratureMatch;
    use vmatch_common::models::VolcanoCandidate;
    use vmatch_common::GeoPoint;

    fn index(ids: &[&str]) -> VolcanoIndex {
        VolcanoIndex::build(
            ids.iter()
                .map(|id| VolcanoCandidate::new(*id, *id, GeoPoint { lon: 0.0, lat: 0.0 }))
                .collect(),
        )
        .unwrap()
    }

    fn card() -> ScoreCard {
        ScoreCard {
            spatial: None,
            tectonic: None,
            temporal: None,
            petrological: None,
            literature: LiteratureMatch::no_data(),
            tectonic_unrecognized: false,
            tas_derived: false,
        }
    }

    fn scored<'a>(
        index: &'a VolcanoIndex,
        id: &str,
        distance_km: f64,
        final_score: Option<f64>,
    ) -> ScoredCandidate<'a> {
        let volcano = index
            .iter()
            .find(|v| v.candidate.id == id)
            .unwrap();
        ScoredCandidate {
            located: LocatedCandidate {
                volcano,
                distance_km,
            },
            card: card(),
            aggregate: Aggregate {
                final_score,
                coverage: if final_score.is_some() { 0.25 } else { 0.0 },
            },
        }
    }

    fn best_id(selection: &Selection<'_>) -> String {
        selection.best().unwrap().located.id().to_string()
    }

    #[test]
    fn test_empty_is_no_candidates() {
        let selector = CandidateSelector::new(0.2, 0.05);
        assert!(matches!(selector.select(Vec::new()), Selection::NoCandidates));
    }

    #[test]
    fn test_highest_final_wins() {
        let idx = index(&["a", "b"]);
        let selection = CandidateSelector::new(0.2, 0.05).select(vec![
            scored(&idx, "a", 5.0, Some(0.5)),
            scored(&idx, "b", 30.0, Some(0.8)),
        ]);
        assert!(matches!(selection, Selection::Accepted { competing: false, .. }));
        assert_eq!(best_id(&selection), "b");
    }

    #[test]
    fn test_ties_broken_by_distance_then_id() {
        let idx = index(&["a", "b", "c"]);
        let selector = CandidateSelector::new(0.2, 0.05);

        let selection = selector.select(vec![
            scored(&idx, "a", 10.0, Some(0.6)),
            scored(&idx, "b", 4.0, Some(0.6)),
        ]);
        assert_eq!(best_id(&selection), "b");
        assert!(selection.competing());

        let selection = selector.select(vec![
            scored(&idx, "c", 4.0, Some(0.6)),
            scored(&idx, "b", 4.0, Some(0.6)),
        ]);
        assert_eq!(best_id(&selection), "b");
    }

    #[test]
    fn test_competing_within_epsilon() {
        let idx = index(&["a", "b"]);
        let selector = CandidateSelector::new(0.2, 0.05);
        let selection = selector.select(vec![
            scored(&idx, "a", 5.0, Some(0.70)),
            scored(&idx, "b", 6.0, Some(0.66)),
        ]);
        assert!(selection.competing());

        let selection = selector.select(vec![
            scored(&idx, "a", 5.0, Some(0.70)),
            scored(&idx, "b", 6.0, Some(0.60)),
        ]);
        assert!(!selection.competing());
    }

    #[test]
    fn test_below_floor() {
        let idx = index(&["a"]);
        let selection =
            CandidateSelector::new(0.2, 0.05).select(vec![scored(&idx, "a", 70.0, Some(0.1))]);
        assert!(matches!(selection, Selection::BelowFloor { .. }));
    }

    #[test]
    fn test_no_usable_evidence() {
        let idx = index(&["a", "b"]);
        let selection = CandidateSelector::new(0.2, 0.05).select(vec![
            scored(&idx, "a", 10.0, None),
            scored(&idx, "b", 5.0, None),
        ]);
        assert!(matches!(selection, Selection::NoUsableEvidence { .. }));
        assert_eq!(best_id(&selection), "b");
    }

    #[test]
    fn test_candidate_without_data_ranks_last() {
        let idx = index(&["a", "b"]);
        let selection = CandidateSelector::new(0.2, 0.05).select(vec![
            scored(&idx, "a", 1.0, None),
            scored(&idx, "b", 50.0, Some(0.3)),
        ]);
        assert!(matches!(selection, Selection::Accepted { competing: false, .. }));
        assert_eq!(best_id(&selection), "b");
    }
}

//! Petrological consistency scorer
//!
//! Looks up the sample's rock kind among the candidate's ranked major rock
//! types. Rank 1 is the dominant eruptive product.

use super::rock_type::{self, RockKind};
use super::{RockClass, Score};
use vmatch_common::models::Sample;

/// Score for membership in rank 1, 2, 3
const RANK_SCORES: [f64; 3] = [0.95, 0.75, 0.65];

/// Both sides known, no shared kind
const NO_OVERLAP_SCORE: f64 = 0.2;

/// Classify a sample from its reported name, falling back to TAS
pub fn classify_sample(sample: &Sample) -> Option<RockClass> {
    if let Some(kind) = sample.rock_type.as_deref().and_then(rock_type::parse_rock_name) {
        return Some(RockClass {
            kind,
            tas_derived: false,
        });
    }
    rock_type::classify_tas(&sample.oxides).map(|kind| RockClass {
        kind,
        tas_derived: true,
    })
}

/// Score a sample kind against ranked candidate kinds
pub fn score(sample: Option<RockKind>, ranks: &[Vec<RockKind>]) -> Option<Score> {
    let kind = sample?;
    if ranks.iter().all(|members| members.is_empty()) {
        return None;
    }

    let value = ranks
        .iter()
        .zip(RANK_SCORES)
        .find(|(members, _)| members.contains(&kind))
        .map(|(_, rank_score)| rank_score)
        .unwrap_or(NO_OVERLAP_SCORE);

    Some(Score::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmatch_common::models::{Oxide, OxideComposition, SourceDatabase};
    use vmatch_common::GeoPoint;

    fn ranks(types: &[&str]) -> Vec<Vec<RockKind>> {
        let owned: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        rock_type::parse_ranked_types(&owned)
    }

    #[test]
    fn test_rank_scores() {
        let r = ranks(&["Dacite", "Andesite / Basaltic Andesite", "Rhyolite"]);
        assert_eq!(score(Some(RockKind::Dacite), &r).unwrap().value, 0.95);
        assert_eq!(score(Some(RockKind::BasalticAndesite), &r).unwrap().value, 0.75);
        assert_eq!(score(Some(RockKind::Rhyolite), &r).unwrap().value, 0.65);
        assert_eq!(score(Some(RockKind::Basalt), &r).unwrap().value, 0.2);
    }

    #[test]
    fn test_unrecognized_rank_keeps_position() {
        let r = ranks(&["Unknown", "Basalt"]);
        assert_eq!(score(Some(RockKind::Basalt), &r).unwrap().value, 0.75);

        let r = ranks(&["Unknown"]);
        assert!(score(Some(RockKind::Basalt), &r).is_none());
    }

    #[test]
    fn test_missing_side_has_no_data() {
        let r = ranks(&["Basalt / Picro-Basalt"]);
        assert!(score(None, &r).is_none());
        assert!(score(Some(RockKind::Basalt), &[]).is_none());
    }

    #[test]
    fn test_classify_prefers_reported_name() {
        let mut sample = Sample::new("S", SourceDatabase::Georoc, GeoPoint { lon: 0.0, lat: 0.0 });
        sample.rock_type = Some("BASALT".to_string());
        sample.oxides = OxideComposition::new()
            .with(Oxide::SiO2, 72.0)
            .with(Oxide::Al2O3, 14.0)
            .with(Oxide::FeOT, 2.0)
            .with(Oxide::CaO, 2.0)
            .with(Oxide::Na2O, 4.0)
            .with(Oxide::K2O, 4.0);
        assert_eq!(
            classify_sample(&sample),
            Some(RockClass {
                kind: RockKind::Basalt,
                tas_derived: false
            })
        );

        sample.rock_type = Some("WHOLE ROCK".to_string());
        assert_eq!(
            classify_sample(&sample),
            Some(RockClass {
                kind: RockKind::Rhyolite,
                tas_derived: true
            })
        );
    }
}

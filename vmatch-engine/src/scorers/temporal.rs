//! Temporal overlap scorer
//!
//! Compares the sample's eruption date with the candidate's recorded
//! eruption intervals. The gap Δ (years) is zero inside an interval and
//! otherwise the distance to its nearest end.

use super::Score;
use vmatch_common::models::{DatePrecision, EruptionDate, EruptionRecord};

/// Start of the Holocene, 11,700 years before 2000 CE
pub const HOLOCENE_START_YEAR: i32 = -9700;

/// Qualifier for samples older than the eruption catalog's coverage
pub const PRE_HOLOCENE: &str = "pre_holocene";

fn has_month(date: &EruptionDate) -> bool {
    date.precision() >= DatePrecision::Month
}

/// Gap in years between a date and one eruption interval
fn gap_years(sample: &EruptionDate, eruption: &EruptionRecord) -> f64 {
    let end = eruption.end.unwrap_or(eruption.start);
    let fine = has_month(sample) && has_month(&eruption.start) && has_month(&end);

    let as_years = |date: &EruptionDate| {
        if fine {
            date.fractional_year()
        } else {
            date.year as f64
        }
    };

    let s = as_years(sample);
    let a = as_years(&eruption.start);
    let b = as_years(&end);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    if s < lo {
        lo - s
    } else if s > hi {
        s - hi
    } else {
        0.0
    }
}

/// Map a gap in years onto [0, 1]
pub fn overlap(delta: f64) -> f64 {
    if delta <= 1.0 {
        1.0 - 0.2 * delta
    } else if delta <= 10.0 {
        0.8 - 0.2 * (delta - 1.0) / 9.0
    } else if delta <= 100.0 {
        0.05 + 0.5 * (100.0 - delta) / 90.0
    } else {
        0.0
    }
}

/// Score the sample date against a candidate's eruption history
///
/// No data when the sample is undated or the candidate has no recorded
/// eruptions. A dated pre-Holocene sample is scored 0.0 with the
/// `pre_holocene` qualifier.
pub fn score(sample: Option<&EruptionDate>, eruptions: &[EruptionRecord]) -> Option<Score> {
    let sample = sample?;
    if eruptions.is_empty() {
        return None;
    }
    if sample.year < HOLOCENE_START_YEAR {
        return Some(Score::special(0.0, PRE_HOLOCENE));
    }

    let delta = eruptions
        .iter()
        .map(|eruption| gap_years(sample, eruption))
        .fold(f64::INFINITY, f64::min);

    Some(Score::new(overlap(delta)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, m: u8) -> EruptionDate {
        EruptionDate {
            year,
            month: Some(m),
            day: None,
        }
    }

    #[test]
    fn test_overlap_curve() {
        assert_eq!(overlap(0.0), 1.0);
        assert!((overlap(1.0) - 0.8).abs() < 1e-12);
        assert!((overlap(10.0) - 0.6).abs() < 1e-12);
        assert!((overlap(100.0) - 0.05).abs() < 1e-12);
        assert_eq!(overlap(100.5), 0.0);
    }

    #[test]
    fn test_exact_year_is_strong() {
        let eruptions = [EruptionRecord::starting(EruptionDate::year(1980))];
        let s = score(Some(&EruptionDate::year(1980)), &eruptions).unwrap();
        assert_eq!(s.value, 1.0);
        assert!(s.qualifier.is_none());
    }

    #[test]
    fn test_inside_interval_is_zero_gap() {
        let eruptions = [EruptionRecord {
            start: EruptionDate::year(1995),
            end: Some(EruptionDate::year(2010)),
            vei: Some(3),
        }];
        assert_eq!(score(Some(&EruptionDate::year(2003)), &eruptions).unwrap().value, 1.0);
        let after = score(Some(&EruptionDate::year(2015)), &eruptions).unwrap().value;
        assert!((after - (0.8 - 0.2 * 4.0 / 9.0)).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_eruption_wins() {
        let eruptions = [
            EruptionRecord::starting(EruptionDate::year(1500)),
            EruptionRecord::starting(EruptionDate::year(1902)),
        ];
        let s = score(Some(&EruptionDate::year(1900)), &eruptions).unwrap();
        assert!((s.value - overlap(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_years_need_months_on_both_sides() {
        let eruptions = [EruptionRecord::starting(month(1980, 1))];
        // Month precision on both sides: July 1980 is half a year away
        let fine = score(Some(&month(1980, 7)), &eruptions).unwrap().value;
        assert!((fine - 0.9).abs() < 1e-9);
        // Year-only sample compares whole years
        let coarse = score(Some(&EruptionDate::year(1980)), &eruptions).unwrap().value;
        assert_eq!(coarse, 1.0);
    }

    #[test]
    fn test_pre_holocene_is_data() {
        let eruptions = [EruptionRecord::starting(EruptionDate::year(1980))];
        let s = score(Some(&EruptionDate::year(-15000)), &eruptions).unwrap();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.qualifier, Some(PRE_HOLOCENE));
    }

    #[test]
    fn test_holocene_boundary_year_is_scored_normally() {
        let eruptions = [EruptionRecord::starting(EruptionDate::year(-9700))];
        let s = score(Some(&EruptionDate::year(HOLOCENE_START_YEAR)), &eruptions).unwrap();
        assert_eq!(s.value, 1.0);
        assert!(s.qualifier.is_none());
    }

    #[test]
    fn test_no_data_cases() {
        let eruptions = [EruptionRecord::starting(EruptionDate::year(1980))];
        assert!(score(None, &eruptions).is_none());
        assert!(score(Some(&EruptionDate::year(1980)), &[]).is_none());
        assert!(score(Some(&EruptionDate::year(-20000)), &[]).is_none());
    }
}

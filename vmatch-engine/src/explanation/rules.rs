//! Reason-code rule tables
//!
//! One ordered table per dimension; the first rule whose threshold admits
//! the score supplies the code. Each table ends with a catch-all.

use crate::scorers::{Dimension, Score};

/// Code emitted for an absent dimension
pub const NO_DATA: &str = "no_data";

/// Lower bound a rule applies to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Strictly greater than
    Above(f64),
    /// Greater than or equal
    AtLeast(f64),
    Any,
}

impl Threshold {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Threshold::Above(t) => value > t,
            Threshold::AtLeast(t) => value >= t,
            Threshold::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub threshold: Threshold,
    pub code: &'static str,
}

const fn rule(threshold: Threshold, code: &'static str) -> Rule {
    Rule { threshold, code }
}

pub const SPATIAL_RULES: &[Rule] = &[
    rule(Threshold::Above(0.90), "very_close"),
    rule(Threshold::Above(0.60), "near"),
    rule(Threshold::AtLeast(0.30), "moderate"),
    rule(Threshold::Any, "far"),
];

pub const TECTONIC_RULES: &[Rule] = &[
    rule(Threshold::AtLeast(1.0), "match"),
    rule(Threshold::AtLeast(0.8), "likely"),
    rule(Threshold::AtLeast(0.5), "partial"),
    rule(Threshold::Any, "mismatch"),
];

pub const TEMPORAL_RULES: &[Rule] = &[
    rule(Threshold::AtLeast(0.8), "strong"),
    rule(Threshold::AtLeast(0.6), "partial"),
    rule(Threshold::Above(0.0), "marginal"),
    rule(Threshold::Any, "mismatch"),
];

pub const PETROLOGICAL_RULES: &[Rule] = &[
    rule(Threshold::AtLeast(0.9), "match"),
    rule(Threshold::AtLeast(0.6), "compatible"),
    rule(Threshold::Any, "weak"),
];

pub const LITERATURE_RULES: &[Rule] = &[
    rule(Threshold::AtLeast(0.95), "explicit"),
    rule(Threshold::AtLeast(0.75), "partial"),
    rule(Threshold::AtLeast(0.3), "regional"),
    rule(Threshold::Any, "none"),
];

pub fn rules_for(dimension: Dimension) -> &'static [Rule] {
    match dimension {
        Dimension::Spatial => SPATIAL_RULES,
        Dimension::Tectonic => TECTONIC_RULES,
        Dimension::Temporal => TEMPORAL_RULES,
        Dimension::Petrological => PETROLOGICAL_RULES,
        Dimension::Literature => LITERATURE_RULES,
    }
}

/// Code for one dimension's score; a qualifier wins over the table
pub fn code_for(dimension: Dimension, score: Option<Score>) -> &'static str {
    let Some(score) = score else {
        return NO_DATA;
    };
    if let Some(qualifier) = score.qualifier {
        return qualifier;
    }
    rules_for(dimension)
        .iter()
        .find(|r| r.threshold.admits(score.value))
        .map(|r| r.code)
        .unwrap_or(NO_DATA)
}

/// Full `prefix:code` reason
pub fn reason(dimension: Dimension, score: Option<Score>) -> String {
    format!("{}:{}", dimension.prefix(), code_for(dimension, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::spatial;

    #[test]
    fn test_tables_end_with_catch_all() {
        for dimension in Dimension::ALL {
            let rules = rules_for(dimension);
            assert_eq!(rules.last().map(|r| r.threshold), Some(Threshold::Any));
        }
    }

    #[test]
    fn test_spatial_bands_follow_distance() {
        let code = |d: f64| code_for(Dimension::Spatial, spatial::score(d));
        assert_eq!(code(2.0), "very_close");
        assert_eq!(code(5.0), "near");
        assert_eq!(code(24.3), "near");
        assert_eq!(code(25.0), "moderate");
        assert_eq!(code(49.0), "moderate");
        assert_eq!(code(50.0), "moderate");
        assert_eq!(code(50.001), "far");
        assert_eq!(code(60.0), "far");
    }

    #[test]
    fn test_dimension_codes() {
        let s = |v: f64| Some(Score::new(v));
        assert_eq!(code_for(Dimension::Tectonic, s(1.0)), "match");
        assert_eq!(code_for(Dimension::Tectonic, s(0.85)), "likely");
        assert_eq!(code_for(Dimension::Tectonic, s(0.6)), "partial");
        assert_eq!(code_for(Dimension::Tectonic, s(0.0)), "mismatch");
        assert_eq!(code_for(Dimension::Temporal, s(1.0)), "strong");
        assert_eq!(code_for(Dimension::Temporal, s(0.6)), "partial");
        assert_eq!(code_for(Dimension::Temporal, s(0.05)), "marginal");
        assert_eq!(code_for(Dimension::Temporal, s(0.0)), "mismatch");
        assert_eq!(code_for(Dimension::Petrological, s(0.95)), "match");
        assert_eq!(code_for(Dimension::Petrological, s(0.65)), "compatible");
        assert_eq!(code_for(Dimension::Petrological, s(0.2)), "weak");
        assert_eq!(code_for(Dimension::Literature, s(0.95)), "explicit");
        assert_eq!(code_for(Dimension::Literature, s(0.3)), "regional");
        assert_eq!(code_for(Dimension::Literature, s(0.0)), "none");
    }

    #[test]
    fn test_qualifier_overrides_table() {
        let score = Some(Score::special(0.0, "pre_holocene"));
        assert_eq!(reason(Dimension::Temporal, score), "time:pre_holocene");
    }

    #[test]
    fn test_absent_is_no_data() {
        assert_eq!(reason(Dimension::Petrological, None), "petro:no_data");
        assert_eq!(reason(Dimension::Literature, None), "lit:no_data");
    }
}

//! Rock Type Normalization
//!
//! Maps free-text rock names from both catalogs onto a fixed set of volcanic
//! rock kinds. Sample names ("BASALTIC ANDESITE SCORIA", "olivine
//! tholeiite") and catalog major rock types ("Andesite / Basaltic Andesite",
//! "Trachybasalt / Tephrite Basanite") go through the same scanner.
//!
//! When a sample has no usable name, its kind can be derived from the
//! total-alkali-silica (TAS) diagram (Le Bas et al. 1986) using the
//! volatile-free normalized analysis.

use vmatch_common::models::{Oxide, OxideComposition};

/// Volcanic rock kinds distinguished by the petrological scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockKind {
    Picrobasalt,
    Basalt,
    BasalticAndesite,
    Andesite,
    Dacite,
    Rhyolite,
    Trachybasalt,
    BasalticTrachyandesite,
    Trachyandesite,
    Trachyte,
    Trachydacite,
    Tephrite,
    Basanite,
    Phonotephrite,
    Tephriphonolite,
    Phonolite,
    Foidite,
}

/// Normalized name → kind. Longer phrases must be listed as full entries;
/// the scanner prefers the longest window that matches.
const ROCK_NAMES: &[(&str, RockKind)] = &[
    ("picrobasalt", RockKind::Picrobasalt),
    ("picrite", RockKind::Picrobasalt),
    ("basalt", RockKind::Basalt),
    ("tholeiite", RockKind::Basalt),
    ("tholeiitic basalt", RockKind::Basalt),
    ("alkali basalt", RockKind::Basalt),
    ("olivine basalt", RockKind::Basalt),
    ("morb", RockKind::Basalt),
    ("basaltic andesite", RockKind::BasalticAndesite),
    ("andesite", RockKind::Andesite),
    ("dacite", RockKind::Dacite),
    ("rhyodacite", RockKind::Dacite),
    ("rhyolite", RockKind::Rhyolite),
    ("obsidian", RockKind::Rhyolite),
    ("trachybasalt", RockKind::Trachybasalt),
    ("hawaiite", RockKind::Trachybasalt),
    ("basaltic trachyandesite", RockKind::BasalticTrachyandesite),
    ("mugearite", RockKind::BasalticTrachyandesite),
    ("shoshonite", RockKind::BasalticTrachyandesite),
    ("trachyandesite", RockKind::Trachyandesite),
    ("benmoreite", RockKind::Trachyandesite),
    ("latite", RockKind::Trachyandesite),
    ("trachyte", RockKind::Trachyte),
    ("trachydacite", RockKind::Trachydacite),
    ("tephrite", RockKind::Tephrite),
    ("basanite", RockKind::Basanite),
    ("phonotephrite", RockKind::Phonotephrite),
    ("tephriphonolite", RockKind::Tephriphonolite),
    ("phonolite", RockKind::Phonolite),
    ("foidite", RockKind::Foidite),
    ("nephelinite", RockKind::Foidite),
    ("leucitite", RockKind::Foidite),
];

/// Word prefixes written both joined and hyphenated ("picro-basalt")
const JOINED_PREFIXES: &[&str] = &["picro", "trachy", "phono", "tephri"];

const MAX_PHRASE_WORDS: usize = 3;

fn lookup(phrase: &str) -> Option<RockKind> {
    ROCK_NAMES
        .iter()
        .find(|(name, _)| *name == phrase)
        .map(|(_, kind)| *kind)
}

/// Lowercase, split on anything non-alphanumeric, rejoin split prefixes
fn normalize_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let raw: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut words = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if JOINED_PREFIXES.contains(&raw[i]) && i + 1 < raw.len() {
            words.push(format!("{}{}", raw[i], raw[i + 1]));
            i += 2;
        } else {
            words.push(raw[i].to_string());
            i += 1;
        }
    }
    words
}

/// Every rock kind named in `text`, left to right, longest phrase first
pub fn scan_kinds(text: &str) -> Vec<RockKind> {
    let words = normalize_words(text);
    let mut kinds = Vec::new();
    let mut i = 0;

    'outer: while i < words.len() {
        let longest = MAX_PHRASE_WORDS.min(words.len() - i);
        for len in (1..=longest).rev() {
            let phrase = words[i..i + len].join(" ");
            if let Some(kind) = lookup(&phrase) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
                i += len;
                continue 'outer;
            }
        }
        i += 1;
    }
    kinds
}

/// Primary kind named by a sample's rock classification
pub fn parse_rock_name(text: &str) -> Option<RockKind> {
    scan_kinds(text).into_iter().next()
}

/// Members of each ranked catalog rock type ("A / B" lists both)
///
/// An unrecognized entry stays as an empty rank so later entries keep
/// their catalog position.
pub fn parse_ranked_types(types: &[String]) -> Vec<Vec<RockKind>> {
    types.iter().map(|t| scan_kinds(t)).collect()
}

// ============================================================================
// TAS classification
// ============================================================================

/// Accepted anhydrous total range (wt%) for TAS classification
const TAS_TOTAL_RANGE: (f64, f64) = (85.0, 105.0);

type Polygon = &'static [(f64, f64)];

/// TAS fields as (SiO2, Na2O+K2O) polygons. The upper alkali fields are
/// closed off at 18 wt% total alkali.
const TAS_FIELDS: &[(RockKind, Polygon)] = &[
    (
        RockKind::Picrobasalt,
        &[(41.0, 0.0), (41.0, 3.0), (45.0, 3.0), (45.0, 0.0)],
    ),
    (
        RockKind::Basalt,
        &[(45.0, 0.0), (45.0, 5.0), (52.0, 5.0), (52.0, 0.0)],
    ),
    (
        RockKind::BasalticAndesite,
        &[(52.0, 0.0), (52.0, 5.0), (57.0, 5.9), (57.0, 0.0)],
    ),
    (
        RockKind::Andesite,
        &[(57.0, 0.0), (57.0, 5.9), (63.0, 7.0), (63.0, 0.0)],
    ),
    (
        RockKind::Dacite,
        &[(63.0, 0.0), (63.0, 7.0), (69.0, 8.0), (77.3, 0.0)],
    ),
    (
        RockKind::Rhyolite,
        &[(69.0, 8.0), (69.0, 18.0), (100.0, 18.0), (100.0, 0.0), (77.3, 0.0)],
    ),
    (
        RockKind::Trachybasalt,
        &[(45.0, 5.0), (49.4, 7.3), (52.0, 5.0)],
    ),
    (
        RockKind::BasalticTrachyandesite,
        &[(52.0, 5.0), (49.4, 7.3), (53.0, 9.3), (57.0, 5.9)],
    ),
    (
        RockKind::Trachyandesite,
        &[(57.0, 5.9), (53.0, 9.3), (57.6, 11.7), (63.0, 7.0)],
    ),
    (
        RockKind::Trachyte,
        &[(63.0, 7.0), (57.6, 11.7), (61.0, 13.5), (69.0, 18.0), (69.0, 8.0)],
    ),
    (
        RockKind::Tephrite,
        &[
            (41.0, 3.0),
            (41.0, 7.0),
            (45.0, 9.4),
            (49.4, 7.3),
            (45.0, 5.0),
            (45.0, 3.0),
        ],
    ),
    (
        RockKind::Phonotephrite,
        &[(49.4, 7.3), (45.0, 9.4), (48.4, 11.5), (53.0, 9.3)],
    ),
    (
        RockKind::Tephriphonolite,
        &[(53.0, 9.3), (48.4, 11.5), (52.5, 14.0), (57.6, 11.7)],
    ),
    (
        RockKind::Phonolite,
        &[(57.6, 11.7), (52.5, 14.0), (52.5, 18.0), (69.0, 18.0), (61.0, 13.5)],
    ),
    (
        RockKind::Foidite,
        &[(35.0, 3.0), (35.0, 18.0), (52.5, 18.0), (52.5, 14.0), (48.4, 11.5), (45.0, 9.4), (41.0, 7.0), (41.0, 3.0)],
    ),
];

/// Ray-casting point-in-polygon test
fn contains(polygon: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Classify a (SiO2, total alkali) point already normalized to 100%
pub fn classify_tas_point(silica: f64, alkali: f64) -> Option<RockKind> {
    TAS_FIELDS
        .iter()
        .find(|(_, polygon)| contains(polygon, silica, alkali))
        .map(|(kind, _)| *kind)
}

/// Derive a rock kind from a major-element analysis
///
/// Requires SiO2, Na2O and K2O. Returns `None` when the anhydrous total is
/// outside the accepted range or the point falls outside every field.
pub fn classify_tas(oxides: &OxideComposition) -> Option<RockKind> {
    let silica = oxides.get(Oxide::SiO2)?;
    let alkali = oxides.total_alkali()?;
    let total = oxides.anhydrous_total();
    if total < TAS_TOTAL_RANGE.0 || total > TAS_TOTAL_RANGE.1 {
        return None;
    }

    let scale = 100.0 / total;
    classify_tas_point(silica * scale, alkali * scale)
}

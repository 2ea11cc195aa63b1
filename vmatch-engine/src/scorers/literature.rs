//! Literature reference scorer
//!
//! Searches a sample's free-text citation for the candidate's names. Text
//! is compared as word tokens after lowercasing, accent folding, and
//! expanding "mt"/"st" abbreviations, so "Volcán Villarrica" and
//! "volcan villarrica" are the same phrase.
//!
//! Literature is advisory: its score is reported as evidence and in the
//! explanation but never enters `final` or `coverage`.

use super::Score;
use vmatch_common::models::{LiteratureEvidence, LiteratureSpecificity, VolcanoCandidate};

const EXPLICIT_SCORE: f64 = 0.95;
const PARTIAL_SCORE: f64 = 0.75;
const REGIONAL_SCORE: f64 = 0.3;

/// Jaro-Winkler similarity needed for a fuzzy token hit
const FUZZY_THRESHOLD: f64 = 0.93;

/// Shortest token eligible for fuzzy comparison
const FUZZY_MIN_CHARS: usize = 5;

/// Shortest core name (generic words removed) searched on its own
const CORE_MIN_CHARS: usize = 4;

/// Words that describe a volcano rather than name it
const GENERIC_WORDS: &[&str] = &[
    "mount", "mountain", "mountains", "volcano", "volcan", "volcanic", "volcanoes", "cerro",
    "cerros", "nevado", "nevados", "monte", "mont", "montagne", "gunung", "sierra", "pico",
    "peak", "caldera", "field", "complex", "group", "island", "islands", "isla", "lake", "the",
    "de", "del", "la", "las", "los", "el", "le", "of",
];

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ē' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Normalize free text into comparable word tokens
pub fn normalize(text: &str) -> Vec<String> {
    let folded: String = text.to_lowercase().chars().map(fold_accent).collect();
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| match w {
            "mt" => "mount".to_string(),
            "st" => "saint".to_string(),
            other => other.to_string(),
        })
        .collect()
}

fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && words.windows(phrase.len()).any(|window| window == phrase)
}

/// Reference text reduced to tokens
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    words: Vec<String>,
}

impl NormalizedText {
    /// `None` for a reference with no word content
    pub fn from_reference(reference: &str) -> Option<Self> {
        let words = normalize(reference);
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }
}

/// Searchable name forms of one volcano, built once per catalog entry
#[derive(Debug, Clone, Default)]
pub struct NameForms {
    canonical: Vec<String>,
    aliases: Vec<Vec<String>>,
    cores: Vec<Vec<String>>,
    /// Joined core names with their word counts
    fuzzy_phrases: Vec<(String, usize)>,
    regional: Vec<Vec<String>>,
}

fn core_name(words: &[String]) -> Option<Vec<String>> {
    let core: Vec<String> = words
        .iter()
        .filter(|w| !GENERIC_WORDS.contains(&w.as_str()))
        .cloned()
        .collect();
    let chars: usize = core.iter().map(|w| w.chars().count()).sum();
    (chars >= CORE_MIN_CHARS).then_some(core)
}

impl NameForms {
    pub fn from_candidate(candidate: &VolcanoCandidate) -> Self {
        let canonical = normalize(&candidate.name);
        let aliases: Vec<Vec<String>> = candidate
            .aliases
            .iter()
            .map(|a| normalize(a))
            .filter(|a| !a.is_empty() && *a != canonical)
            .collect();

        let mut cores: Vec<Vec<String>> = Vec::new();
        for words in std::iter::once(&canonical).chain(aliases.iter()) {
            if let Some(core) = core_name(words) {
                if !cores.contains(&core) {
                    cores.push(core);
                }
            }
        }

        let fuzzy_phrases = cores
            .iter()
            .map(|core| (core.join(" "), core.len()))
            .filter(|(phrase, _)| phrase.chars().count() >= FUZZY_MIN_CHARS)
            .collect();

        let regional = [candidate.region.as_deref(), candidate.country.as_deref()]
            .into_iter()
            .flatten()
            .map(normalize)
            .filter(|r| !r.is_empty())
            .collect();

        Self {
            canonical,
            aliases,
            cores,
            fuzzy_phrases,
            regional,
        }
    }

    /// Compares each core name against every run of as many reference words
    fn fuzzy_hit(&self, words: &[String]) -> bool {
        self.fuzzy_phrases.iter().any(|(phrase, len)| {
            words
                .windows(*len)
                .any(|window| strsim::jaro_winkler(&window.join(" "), phrase) >= FUZZY_THRESHOLD)
        })
    }

    /// How specifically `text` names this volcano
    pub fn specificity_in(&self, text: &NormalizedText) -> LiteratureSpecificity {
        let words = &text.words;
        if contains_phrase(words, &self.canonical) {
            return LiteratureSpecificity::Explicit;
        }
        if self.aliases.iter().any(|a| contains_phrase(words, a))
            || self.cores.iter().any(|c| contains_phrase(words, c))
            || self.fuzzy_hit(words)
        {
            return LiteratureSpecificity::Partial;
        }
        if self.regional.iter().any(|r| contains_phrase(words, r)) {
            return LiteratureSpecificity::Regional;
        }
        LiteratureSpecificity::None
    }
}

/// Literature outcome for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct LiteratureMatch {
    /// `None` when the sample has no usable reference
    pub score: Option<Score>,
    pub specificity: LiteratureSpecificity,
}

impl LiteratureMatch {
    pub fn no_data() -> Self {
        Self {
            score: None,
            specificity: LiteratureSpecificity::None,
        }
    }

    /// Evidence block persisted with the match
    pub fn evidence(&self) -> LiteratureEvidence {
        LiteratureEvidence {
            name_in_reference: matches!(
                self.specificity,
                LiteratureSpecificity::Explicit | LiteratureSpecificity::Partial
            ),
            specificity: self.specificity,
            confidence: self.score.map(|s| s.value).unwrap_or(0.0),
        }
    }
}

/// Score a normalized reference against a volcano's name forms
pub fn score(reference: Option<&NormalizedText>, names: &NameForms) -> LiteratureMatch {
    let Some(text) = reference else {
        return LiteratureMatch::no_data();
    };

    let specificity = names.specificity_in(text);
    let value = match specificity {
        LiteratureSpecificity::Explicit => EXPLICIT_SCORE,
        LiteratureSpecificity::Partial => PARTIAL_SCORE,
        LiteratureSpecificity::Regional => REGIONAL_SCORE,
        LiteratureSpecificity::None => 0.0,
    };

    LiteratureMatch {
        score: Some(Score::new(value)),
        specificity,
    }
}

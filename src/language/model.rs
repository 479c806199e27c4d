//! LanguageModel - compiled, immutable lexicon and gazetteers.
//!
//! The model is described by a YAML document (see `models/english.yaml`) and
//! compiled once into hash indexes. After loading it is never mutated and is
//! shared between requests via `Arc<LanguageModel>`.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// The English model compiled into the binary.
pub const DEFAULT_MODEL_YAML: &str = include_str!("../../models/english.yaml");

/// Errors raised while loading a language model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read language model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid language model: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid language model: {0}")]
    Invalid(String),
}

// =============================================================================
// YAML source format
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelSource {
    name: String,
    #[serde(default)]
    abbreviations: Vec<String>,
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    suffix_rules: Vec<SuffixRule>,
    #[serde(default)]
    gazetteers: GazetteerSource,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconEntry {
    tag: String,
    words: Vec<String>,
}

/// A suffix -> tag fallback rule for words missing from the lexicon.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuffixRule {
    pub suffix: String,
    pub tag: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GazetteerSource {
    #[serde(default)]
    given_names: Vec<String>,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    organizations: Vec<String>,
    #[serde(default)]
    organization_keywords: Vec<String>,
    #[serde(default)]
    facility_keywords: Vec<String>,
    #[serde(default)]
    location_keywords: Vec<String>,
}

// =============================================================================
// Compiled model
// =============================================================================

/// Name lists used by the entity chunker. All keys are lowercased.
#[derive(Debug, Default)]
pub struct Gazetteer {
    given_names: HashSet<String>,
    locations: HashSet<String>,
    organizations: HashSet<String>,
    organization_keywords: HashSet<String>,
    facility_keywords: HashSet<String>,
    location_keywords: HashSet<String>,
    /// Every word that appears in a multi- or single-word gazetteer name.
    name_words: HashSet<String>,
    /// Word count of the longest location or organization name.
    longest_name: usize,
}

impl Gazetteer {
    pub fn is_given_name(&self, word: &str) -> bool {
        self.given_names.contains(&word.to_lowercase())
    }

    /// Whole-span lookup, e.g. "New York".
    pub fn is_location(&self, span: &str) -> bool {
        self.locations.contains(&span.to_lowercase())
    }

    /// Whole-span lookup, e.g. "United Nations".
    pub fn is_organization(&self, span: &str) -> bool {
        self.organizations.contains(&span.to_lowercase())
    }

    pub fn is_organization_keyword(&self, word: &str) -> bool {
        self.organization_keywords.contains(&keyword_key(word))
    }

    pub fn is_facility_keyword(&self, word: &str) -> bool {
        self.facility_keywords.contains(&keyword_key(word))
    }

    pub fn is_location_keyword(&self, word: &str) -> bool {
        self.location_keywords.contains(&keyword_key(word))
    }

    /// True for words that occur inside any gazetteer name.
    pub fn knows_word(&self, word: &str) -> bool {
        self.name_words.contains(&word.to_lowercase())
    }

    /// Length in words of the longest multi-word location or organization
    /// name that `words` starts with, e.g. 2 for `["New", "York", "is"]`.
    pub fn multi_word_name_at<S: AsRef<str>>(&self, words: &[S]) -> Option<usize> {
        let max = self.longest_name.min(words.len());
        (2..=max).rev().find(|&n| {
            let span = words[..n]
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ");
            self.is_location(&span) || self.is_organization(&span)
        })
    }
}

/// Compiled language model shared read-only by the pipeline stages.
#[derive(Debug)]
pub struct LanguageModel {
    name: String,
    abbreviations: HashSet<String>,
    titles: HashSet<String>,
    /// Word form -> tags in priority order. The first tag is the primary one.
    lexicon: HashMap<String, Vec<String>>,
    /// Sorted longest suffix first.
    suffix_rules: Vec<SuffixRule>,
    gazetteer: Gazetteer,
}

impl LanguageModel {
    /// Compile the embedded English model.
    pub fn load_default() -> Result<Self, ModelError> {
        Self::from_yaml_str(DEFAULT_MODEL_YAML)
    }

    /// Read and compile a model file.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Compile a model from its YAML source.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ModelError> {
        let source: ModelSource = serde_yaml::from_str(yaml)?;
        Self::compile(source)
    }

    fn compile(source: ModelSource) -> Result<Self, ModelError> {
        if source.name.trim().is_empty() {
            return Err(ModelError::Invalid("model name must not be empty".into()));
        }

        let mut lexicon: HashMap<String, Vec<String>> = HashMap::new();
        for entry in &source.lexicon {
            if entry.tag.trim().is_empty() {
                return Err(ModelError::Invalid(format!(
                    "lexicon entry with words {:?} has an empty tag",
                    entry.words
                )));
            }
            for word in &entry.words {
                let tags = lexicon.entry(word.clone()).or_default();
                if !tags.contains(&entry.tag) {
                    tags.push(entry.tag.clone());
                }
            }
        }

        let mut suffix_rules = source.suffix_rules;
        if let Some(rule) = suffix_rules.iter().find(|r| r.suffix.is_empty()) {
            return Err(ModelError::Invalid(format!(
                "suffix rule for tag {} has an empty suffix",
                rule.tag
            )));
        }
        // Stable sort keeps file order among equal lengths
        suffix_rules.sort_by(|a, b| b.suffix.len().cmp(&a.suffix.len()));

        let g = source.gazetteers;
        let name_words = g
            .given_names
            .iter()
            .chain(&g.locations)
            .chain(&g.organizations)
            .flat_map(|name| name.split_whitespace())
            .map(str::to_lowercase)
            .collect();

        let longest_name = g
            .locations
            .iter()
            .chain(&g.organizations)
            .map(|name| name.split_whitespace().count())
            .max()
            .unwrap_or(0);

        let gazetteer = Gazetteer {
            given_names: lowercase_set(&g.given_names),
            locations: lowercase_set(&g.locations),
            organizations: lowercase_set(&g.organizations),
            organization_keywords: keyword_set(&g.organization_keywords),
            facility_keywords: keyword_set(&g.facility_keywords),
            location_keywords: keyword_set(&g.location_keywords),
            name_words,
            longest_name,
        };

        Ok(Self {
            name: source.name,
            abbreviations: keyword_set(&source.abbreviations),
            titles: keyword_set(&source.titles),
            lexicon,
            suffix_rules,
            gazetteer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a period after `word` is part of the word rather than a
    /// sentence terminator. `word` is given without its trailing period.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&keyword_key(word))
    }

    /// Honorifics and offices that precede a person's name ("Dr.", "President").
    pub fn is_title(&self, word: &str) -> bool {
        self.titles.contains(&keyword_key(word))
    }

    /// Tags for an exact word form, primary tag first.
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.lexicon.get(word).map(Vec::as_slice)
    }

    /// Exact form first, then the lowercased form.
    pub fn lookup_folded(&self, word: &str) -> Option<&[String]> {
        self.lookup(word).or_else(|| {
            let lower = word.to_lowercase();
            if lower == word {
                None
            } else {
                self.lookup(&lower)
            }
        })
    }

    /// Whether `tag` is among the lexicon tags of `word` (in any case).
    pub fn has_tag(&self, word: &str, tag: &str) -> bool {
        self.lookup_folded(word)
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// Tag from the longest matching suffix rule. The stem left over must be
    /// at least two characters long.
    pub fn suffix_tag(&self, word: &str) -> Option<&str> {
        let lower = word.to_lowercase();
        self.suffix_rules
            .iter()
            .find(|rule| lower.len() >= rule.suffix.len() + 2 && lower.ends_with(&rule.suffix))
            .map(|rule| rule.tag.as_str())
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }
}

/// Lowercase and drop a trailing period, so "Dr." and "dr" share a key.
fn keyword_key(word: &str) -> String {
    word.trim_end_matches('.').to_lowercase()
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn keyword_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| keyword_key(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_MODEL: &str = r#"
name: tiny
abbreviations: [dr]
titles: [dr, president]
lexicon:
  - tag: VB
    words: [run]
  - tag: NN
    words: [run, dog]
suffix_rules:
  - { suffix: s, tag: NNS }
  - { suffix: ness, tag: NN }
gazetteers:
  given_names: [Ada]
  locations: [New York]
  organization_keywords: [Inc.]
"#;

    #[test]
    fn test_default_model_compiles() {
        let model = LanguageModel::load_default().unwrap();
        assert_eq!(model.name(), "english-basic");
        assert_eq!(model.lookup("the").unwrap()[0], "DT");
        assert!(model.gazetteer().is_location("Hawaii"));
        assert!(model.gazetteer().is_given_name("Barack"));
    }

    #[test]
    fn test_first_listing_is_primary_tag() {
        let model = LanguageModel::from_yaml_str(TINY_MODEL).unwrap();
        assert_eq!(model.lookup("run").unwrap(), ["VB", "NN"]);
        assert!(model.has_tag("Run", "NN"));
        assert!(!model.has_tag("dog", "VB"));
    }

    #[test]
    fn test_longest_suffix_wins() {
        let model = LanguageModel::from_yaml_str(TINY_MODEL).unwrap();
        assert_eq!(model.suffix_tag("darkness"), Some("NN"));
        assert_eq!(model.suffix_tag("cats"), Some("NNS"));
        // Stem would be a single character
        assert_eq!(model.suffix_tag("is"), None);
    }

    #[test]
    fn test_keyword_keys_ignore_case_and_period() {
        let model = LanguageModel::from_yaml_str(TINY_MODEL).unwrap();
        assert!(model.is_abbreviation("Dr"));
        assert!(model.is_title("Dr."));
        assert!(model.is_title("PRESIDENT"));
        assert!(model.gazetteer().is_organization_keyword("inc"));
        assert!(model.gazetteer().is_location("new york"));
        assert!(model.gazetteer().knows_word("york"));
    }

    #[test]
    fn test_multi_word_name_prefix() {
        let model = LanguageModel::from_yaml_str(TINY_MODEL).unwrap();
        let g = model.gazetteer();
        assert_eq!(g.multi_word_name_at(&["New", "York", "is"]), Some(2));
        assert_eq!(g.multi_word_name_at(&["New", "cars"]), None);
        assert_eq!(g.multi_word_name_at(&["New"]), None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LanguageModel::from_yaml_str("name: x\nbogus: 1\n").unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = LanguageModel::from_yaml_str("name: \"  \"\n").unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = LanguageModel::from_path(Path::new("/nonexistent/model.yaml")).unwrap_err();
        match err {
            ModelError::Read { path, .. } => assert!(path.ends_with("model.yaml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Part-of-speech tagger
//!
//! Assigns Penn Treebank tags in two passes. The first pass tags each token
//! on its own (punctuation, numbers, lexicon, capitalization, suffix rules);
//! the second pass corrects tags from their left context.

use regex::Regex;
use std::sync::LazyLock;

use super::model::LanguageModel;
use super::{starts_sentence, TaggedToken};

/// Plain and grouped numbers, decimals and decades: 42, 1,000, 3.14, 1990s
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(,\d{3})*(\.\d+)?|\.\d+)s?$").unwrap());

/// Tags of function words that keep their lexicon tag even when capitalized
/// in the middle of a sentence.
const CLOSED_CLASS: &[&str] = &[
    "DT", "PDT", "IN", "TO", "CC", "PRP", "PRP$", "WDT", "WP", "WP$", "WRB", "EX", "MD", "POS",
    "VBZ", "VBP", "VBD", "VBN", "VBG", "RB", "UH",
];

/// Forms of "be" and "have" that turn a following past tense into a
/// participle.
const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re", "has", "have", "had",
    "having", "'ve", "'d",
];

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "--" | "-" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "``" => "``",
        "''" => "''",
        "$" => "$",
        "#" => "#",
        _ => return None,
    };
    Some(tag)
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Rule-based tagger over a language model.
pub struct PosTagger<'m> {
    model: &'m LanguageModel,
}

impl<'m> PosTagger<'m> {
    pub fn new(model: &'m LanguageModel) -> Self {
        Self { model }
    }

    /// Tag a token sequence. The output has exactly one entry per token.
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let mut tags: Vec<String> = (0..tokens.len())
            .map(|i| self.initial_tag(tokens, i))
            .collect();
        self.apply_context_rules(tokens, &mut tags);

        tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken::new(token.clone(), tag))
            .collect()
    }

    fn initial_tag(&self, tokens: &[String], idx: usize) -> String {
        let token = tokens[idx].as_str();

        if let Some(tag) = punctuation_tag(token) {
            return tag.to_string();
        }
        if NUMBER_RE.is_match(token) {
            return "CD".to_string();
        }
        if let Some(tags) = self.model.lookup(token) {
            return tags[0].clone();
        }

        if is_capitalized(token) {
            if let Some(tag) = self.capitalized_tag(tokens, idx) {
                return tag;
            }
        } else if let Some(tags) = self.model.lookup_folded(token) {
            return tags[0].clone();
        }

        self.model
            .suffix_tag(token)
            .unwrap_or("NN")
            .to_string()
    }

    /// Tag for a capitalized word missing from the lexicon in this exact form.
    /// `None` falls through to the suffix rules.
    fn capitalized_tag(&self, tokens: &[String], idx: usize) -> Option<String> {
        let token = tokens[idx].as_str();
        let folded = self.model.lookup_folded(token).map(|tags| tags[0].as_str());

        if starts_sentence(tokens, idx) {
            // "New York", "United States": the first word belongs to the name
            if self.model.gazetteer().multi_word_name_at(&tokens[idx..]).is_some() {
                return Some("NNP".to_string());
            }
            // "The", "Running": trust the lowercase reading when there is one
            if let Some(tag) = folded {
                return Some(tag.to_string());
            }
            if self.model.gazetteer().knows_word(token) {
                return Some("NNP".to_string());
            }
            // An unknown capitalized first word with a clear suffix is
            // probably a common word
            return match self.model.suffix_tag(token) {
                Some(tag) if tag != "NNS" && tag != "NN" => None,
                _ => Some("NNP".to_string()),
            };
        }

        match folded {
            Some(tag) if CLOSED_CLASS.contains(&tag) => Some(tag.to_string()),
            _ if self.is_proper_plural(token) => Some("NNPS".to_string()),
            _ => Some("NNP".to_string()),
        }
    }

    /// "Americans", "Kennedys": a capitalized plural of a known name or of a
    /// demonym.
    fn is_proper_plural(&self, token: &str) -> bool {
        let Some(stem) = token.strip_suffix('s') else {
            return false;
        };
        if stem.ends_with('s') || stem.chars().count() < 2 {
            return false;
        }
        self.model.gazetteer().knows_word(stem) || stem.ends_with("an")
    }

    fn apply_context_rules(&self, tokens: &[String], tags: &mut [String]) {
        for i in 1..tags.len() {
            let word = tokens[i].as_str();
            let prev = tags[i - 1].as_str();

            // had finished, was founded, has not been
            if tags[i] == "VBD" && self.follows_auxiliary(tokens, tags, i) {
                tags[i] = "VBN".to_string();
                continue;
            }

            // to run, will go
            if (prev == "TO" || prev == "MD")
                && matches!(tags[i].as_str(), "NN" | "VBP" | "JJ")
                && self.model.has_tag(word, "VB")
            {
                tags[i] = "VB".to_string();
                continue;
            }

            // the run, his love
            if matches!(prev, "DT" | "PRP$" | "JJ" | "POS")
                && matches!(tags[i].as_str(), "VB" | "VBP")
                && self.model.has_tag(word, "NN")
            {
                tags[i] = "NN".to_string();
                continue;
            }

            // they go, I have
            if tags[i] == "VB" && matches!(prev, "PRP" | "NNS" | "WDT" | "WP") {
                tags[i] = "VBP".to_string();
                continue;
            }

            // it's, that's, there's
            if word == "'s" && matches!(prev, "PRP" | "EX" | "WP" | "WDT" | "DT") {
                tags[i] = "VBZ".to_string();
            }
        }
    }

    /// Whether token `idx` is preceded by an auxiliary, skipping adverbs.
    fn follows_auxiliary(&self, tokens: &[String], tags: &[String], idx: usize) -> bool {
        tokens[..idx]
            .iter()
            .zip(&tags[..idx])
            .rev()
            .find(|(_, tag)| !tag.starts_with("RB"))
            .is_some_and(|(token, _)| AUXILIARIES.contains(&token.to_lowercase().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::tokenizer::WordTokenizer;

    fn tag_text(text: &str) -> Vec<(String, String)> {
        let model = LanguageModel::load_default().unwrap();
        let tokens = WordTokenizer::new(&model).tokenize(text);
        PosTagger::new(&model)
            .tag(&tokens)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    fn tags_of(text: &str) -> Vec<String> {
        tag_text(text).into_iter().map(|(_, tag)| tag).collect()
    }

    #[test]
    fn test_basic_sentence() {
        assert_eq!(
            tags_of("Barack Obama was born in Hawaii."),
            vec!["NNP", "NNP", "VBD", "VBN", "IN", "NNP", "."]
        );
    }

    #[test]
    fn test_one_tag_per_token() {
        let model = LanguageModel::load_default().unwrap();
        let text = "The quick brown fox didn't jump over 2 lazy dogs, did it?";
        let tokens = WordTokenizer::new(&model).tokenize(text);
        let tagged = PosTagger::new(&model).tag(&tokens);
        assert_eq!(tagged.len(), tokens.len());
        for (token, tagged) in tokens.iter().zip(&tagged) {
            assert_eq!(token, &tagged.text);
        }
    }

    #[test]
    fn test_determiners_numbers_and_punctuation() {
        let tagged = tag_text("The 3 dogs ran (quickly).");
        assert_eq!(
            tagged,
            vec![
                ("The".to_string(), "DT".to_string()),
                ("3".to_string(), "CD".to_string()),
                ("dogs".to_string(), "NNS".to_string()),
                ("ran".to_string(), "VBD".to_string()),
                ("(".to_string(), "(".to_string()),
                ("quickly".to_string(), "RB".to_string()),
                (")".to_string(), ")".to_string()),
                (".".to_string(), ".".to_string()),
            ]
        );
    }

    #[test]
    fn test_participle_after_auxiliary() {
        assert_eq!(
            tags_of("The company was founded and has not grown"),
            vec!["DT", "NN", "VBD", "VBN", "CC", "VBZ", "RB", "VBN"]
        );
    }

    #[test]
    fn test_base_verb_after_to_and_modal() {
        let tags = tags_of("I want to visit and they will love it");
        assert_eq!(tags[0], "PRP");
        assert_eq!(tags[1], "VBP");
        assert_eq!(tags[2], "TO");
        assert_eq!(tags[3], "VB");
        assert_eq!(tags[6], "MD");
        assert_eq!(tags[7], "VB");
    }

    #[test]
    fn test_noun_reading_after_determiner() {
        let tags = tags_of("We need the help");
        assert_eq!(tags, vec!["PRP", "VBP", "DT", "NN"]);
    }

    #[test]
    fn test_capitalized_words() {
        let tagged = tag_text("Then Apple hired Americans in The Hague");
        assert_eq!(tagged[0].1, "RB");
        assert_eq!(tagged[1].1, "NNP");
        assert_eq!(tagged[3].1, "NNPS");
        // Mid-sentence function words keep their tag
        assert_eq!(tagged[5].1, "DT");
        assert_eq!(tagged[6].1, "NNP");
    }

    #[test]
    fn test_sentence_initial_place_name() {
        assert_eq!(tags_of("New York is big."), vec!["NNP", "NNP", "VBZ", "JJ", "."]);
        // Without the rest of the name the lowercase reading wins
        assert_eq!(tags_of("New cars are fast.")[0], "JJ");
    }

    #[test]
    fn test_clitic_tags() {
        let tags = tags_of("It's John's book");
        assert_eq!(tags, vec!["PRP", "VBZ", "NNP", "POS", "NN"]);
    }
}

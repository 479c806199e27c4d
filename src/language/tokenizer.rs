//! Word tokenizer
//!
//! Treebank-style tokenization applied per sentence:
//! - sentences are split first, so every sentence-final period becomes a token
//! - quotes are rewritten to `` and ''
//! - punctuation and brackets are split off, commas inside numbers are kept
//! - clitics ('s, n't, 'll ...) and fused forms (cannot, gonna ...) are split

use regex::Regex;
use std::sync::LazyLock;

use super::model::LanguageModel;

type Rule = (Regex, &'static str);

fn rules(specs: &[(&str, &'static str)]) -> Vec<Rule> {
    specs
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

// =============================================================================
// TREEBANK RULES
// =============================================================================

static STARTING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'')"#, "$1 `` "),
    ])
});

static PUNCTUATION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        // Sentence-final period, possibly followed by closing brackets/quotes
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2 $3 "),
        // Commas and colons, except inside numbers
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.{2,}", " $0 "),
        (r"[;@#$%&]", " $0 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
    ])
});

static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\]\[(){}<>]").unwrap());

static DOUBLE_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--").unwrap());

static ENDING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)\s", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

/// Candidate sentence boundary: terminators, closing quotes/brackets, space.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).unwrap());

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |acc, (re, replacement)| {
        re.replace_all(&acc, *replacement).into_owned()
    })
}

// =============================================================================
// TOKENIZER
// =============================================================================

/// Sentence splitter and word tokenizer backed by a language model's
/// abbreviation list.
pub struct WordTokenizer<'m> {
    model: &'m LanguageModel,
}

impl<'m> WordTokenizer<'m> {
    pub fn new(model: &'m LanguageModel) -> Self {
        Self { model }
    }

    /// Tokenize text into words. Empty or blank input yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.sentences(text)
            .into_iter()
            .flat_map(tokenize_sentence)
            .collect()
    }

    /// Split text into trimmed sentences.
    pub fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_BREAK.find_iter(text) {
            if !self.is_boundary(text, m.start(), m.end()) {
                continue;
            }
            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }
        sentences
    }

    /// Decide whether the break candidate at `[start, end)` ends a sentence.
    fn is_boundary(&self, text: &str, start: usize, end: usize) -> bool {
        let next_opens_sentence = text[end..].chars().next().is_some_and(|c| {
            c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '`' | '[')
        });
        if !next_opens_sentence {
            return false;
        }

        let terminator = &text[start..end];
        if !terminator.starts_with('.') || terminator.starts_with("..") {
            return true;
        }

        // A lone period: not a boundary after an abbreviation or an initial
        let word = text[..start]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return true;
        }
        let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        !(is_initial || self.model.is_abbreviation(word))
    }
}

/// Treebank word tokenization of a single sentence.
pub fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let mut text = apply(&STARTING_QUOTES, sentence.to_string());
    text = apply(&PUNCTUATION, text);
    text = BRACKETS.replace_all(&text, " $0 ").into_owned();
    text = DOUBLE_DASHES.replace_all(&text, " -- ").into_owned();

    // Padding lets the clitic rules match at both ends
    text = format!(" {text} ");
    text = apply(&ENDING_QUOTES, text);
    text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}

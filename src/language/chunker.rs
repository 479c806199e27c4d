//! Named-entity chunker
//!
//! Groups runs of proper nouns (NNP/NNPS) into labeled entities.
//! Label resolution, first match wins:
//!
//! ```text
//! organization name or keyword   → ORGANIZATION   (Google, Bank of America)
//! facility keyword               → FACILITY       (Heathrow Airport)
//! geographic keyword             → LOCATION       (Mount Everest, Nile River)
//! location name                  → GPE            (Hawaii, New York)
//! title or known given name      → PERSON         (Dr. Jones, Barack Obama)
//! fallback                       → PERSON / ORGANIZATION / none
//! ```

use super::model::LanguageModel;
use super::{starts_sentence, ChunkNode, TaggedToken};

pub const PERSON: &str = "PERSON";
pub const ORGANIZATION: &str = "ORGANIZATION";
pub const GPE: &str = "GPE";
pub const LOCATION: &str = "LOCATION";
pub const FACILITY: &str = "FACILITY";

/// Words allowed inside a name when both neighbours are proper nouns.
const CONNECTORS: &[&str] = &["of", "&"];

fn is_proper(token: &TaggedToken) -> bool {
    token.tag == "NNP" || token.tag == "NNPS"
}

/// A candidate entity: token range `[start, end)` and whether a title
/// introduced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    titled: bool,
}

/// Gazetteer-driven entity chunker over a language model.
pub struct EntityChunker<'m> {
    model: &'m LanguageModel,
}

impl<'m> EntityChunker<'m> {
    pub fn new(model: &'m LanguageModel) -> Self {
        Self { model }
    }

    /// Chunk a tagged sentence. Every input token appears exactly once in the
    /// output, either bare or inside an entity.
    pub fn chunk(&self, tagged: &[TaggedToken]) -> Vec<ChunkNode> {
        let texts: Vec<&str> = tagged.iter().map(|t| t.text.as_str()).collect();
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < tagged.len() {
            let Some(span) = self.span_at(tagged, i) else {
                nodes.push(ChunkNode::Token(tagged[i].clone()));
                i += 1;
                continue;
            };

            // Title tokens stay outside the entity
            for token in &tagged[i..span.start] {
                nodes.push(ChunkNode::Token(token.clone()));
            }

            let members = &tagged[span.start..span.end];
            match self.label(members, span, &texts) {
                Some(label) => nodes.push(ChunkNode::Entity {
                    label: label.to_string(),
                    tokens: members.to_vec(),
                }),
                None => nodes.extend(members.iter().cloned().map(ChunkNode::Token)),
            }
            i = span.end;
        }

        nodes
    }

    /// Find the entity span beginning at token `i`, if any. Leading title
    /// words are skipped and recorded in `titled`.
    fn span_at(&self, tagged: &[TaggedToken], i: usize) -> Option<Span> {
        let mut start = i;
        while start < tagged.len() && self.model.is_title(&tagged[start].text) {
            start += 1;
        }
        let titled = start > i;

        // A title must be directly followed by a name
        if start >= tagged.len() || !is_proper(&tagged[start]) {
            return None;
        }

        let mut end = start + 1;
        loop {
            if end < tagged.len() && is_proper(&tagged[end]) {
                end += 1;
                continue;
            }
            if self.connector_joins(tagged, end) {
                end += 2;
                continue;
            }
            break;
        }

        Some(Span { start, end, titled })
    }

    /// "Bank of America", "Gulf of Mexico", "Johnson & Johnson": a connector at
    /// `idx` joins two name parts when the left part is a keyword (for "of")
    /// or always (for "&").
    fn connector_joins(&self, tagged: &[TaggedToken], idx: usize) -> bool {
        let Some(connector) = tagged.get(idx) else {
            return false;
        };
        if !CONNECTORS.contains(&connector.text.as_str()) {
            return false;
        }
        if !tagged.get(idx + 1).is_some_and(is_proper) {
            return false;
        }
        if connector.text == "&" {
            return true;
        }
        let left = &tagged[idx - 1].text;
        let g = self.model.gazetteer();
        g.is_organization_keyword(left) || g.is_location_keyword(left) || g.is_facility_keyword(left)
    }

    fn label(&self, members: &[TaggedToken], span: Span, texts: &[&str]) -> Option<&'static str> {
        let g = self.model.gazetteer();
        let surface = members
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if g.is_organization(&surface) || members.iter().any(|t| g.is_organization_keyword(&t.text))
        {
            return Some(ORGANIZATION);
        }
        if members.iter().any(|t| g.is_facility_keyword(&t.text)) {
            return Some(FACILITY);
        }
        if members.iter().any(|t| g.is_location_keyword(&t.text)) {
            return Some(LOCATION);
        }
        if g.is_location(&surface) {
            return Some(GPE);
        }
        if span.titled || g.is_given_name(&members[0].text) {
            return Some(PERSON);
        }

        if members.len() > 1 {
            let all_title_case = members.iter().all(|t| is_title_case(&t.text));
            return Some(if all_title_case { PERSON } else { ORGANIZATION });
        }

        // A lone unknown capitalized first word is usually an ordinary word
        if starts_sentence(texts, span.start) {
            None
        } else {
            Some(ORGANIZATION)
        }
    }
}

/// "Smith" but not "IBM" or "eBay"
fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(|c| !c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::tagger::PosTagger;
    use crate::language::tokenizer::WordTokenizer;

    fn entities(text: &str) -> Vec<(String, String)> {
        let model = LanguageModel::load_default().unwrap();
        let tokens = WordTokenizer::new(&model).tokenize(text);
        let tagged = PosTagger::new(&model).tag(&tokens);
        EntityChunker::new(&model)
            .chunk(&tagged)
            .iter()
            .filter_map(ChunkNode::as_entity)
            .map(|(text, label)| (text, label.to_string()))
            .collect()
    }

    fn pair(text: &str, label: &str) -> (String, String) {
        (text.to_string(), label.to_string())
    }

    #[test]
    fn test_person_and_gpe() {
        assert_eq!(
            entities("Barack Obama was born in Hawaii."),
            vec![pair("Barack Obama", PERSON), pair("Hawaii", GPE)]
        );
    }

    #[test]
    fn test_organizations() {
        assert_eq!(
            entities("She joined Google after leaving the Bank of America."),
            vec![pair("Google", ORGANIZATION), pair("Bank of America", ORGANIZATION)]
        );
    }

    #[test]
    fn test_multi_word_location_names() {
        assert_eq!(
            entities("They flew from New York to Heathrow Airport."),
            vec![pair("New York", GPE), pair("Heathrow Airport", FACILITY)]
        );
    }

    #[test]
    fn test_sentence_initial_multi_word_names() {
        assert_eq!(entities("New York is big."), vec![pair("New York", GPE)]);
        assert_eq!(
            entities("United States troops left. South Africa won."),
            vec![pair("United States", GPE), pair("South Africa", GPE)]
        );
    }

    #[test]
    fn test_geographic_feature() {
        assert_eq!(
            entities("We sailed across the Gulf of Mexico."),
            vec![pair("Gulf of Mexico", LOCATION)]
        );
    }

    #[test]
    fn test_title_forces_person_and_is_excluded() {
        assert_eq!(entities("We met Dr. Zhivago."), vec![pair("Zhivago", PERSON)]);
    }

    #[test]
    fn test_sentence_initial_unknown_word_is_not_an_entity() {
        assert!(entities("Yesterday it rained.").is_empty());
        assert!(entities("Zorblax is here.").is_empty());
        assert_eq!(
            entities("They met Zorblax."),
            vec![pair("Zorblax", ORGANIZATION)]
        );
    }

    #[test]
    fn test_chunk_covers_every_token() {
        let model = LanguageModel::load_default().unwrap();
        let text = "Mr. Smith and Johnson & Johnson visited Paris with President Macron.";
        let tokens = WordTokenizer::new(&model).tokenize(text);
        let tagged = PosTagger::new(&model).tag(&tokens);
        let nodes = EntityChunker::new(&model).chunk(&tagged);
        let covered: usize = nodes.iter().map(ChunkNode::len).sum();
        assert_eq!(covered, tagged.len());

        let found: Vec<_> = nodes.iter().filter_map(ChunkNode::as_entity).collect();
        assert!(found.contains(&("Smith".to_string(), PERSON)));
        assert!(found.contains(&("Johnson & Johnson".to_string(), ORGANIZATION)));
        assert!(found.contains(&("Paris".to_string(), GPE)));
        assert!(found.contains(&("Macron".to_string(), PERSON)));
    }

    #[test]
    fn test_empty_input() {
        let model = LanguageModel::load_default().unwrap();
        assert!(EntityChunker::new(&model).chunk(&[]).is_empty());
    }
}

//! BuiltinPipeline - the rule-based English implementation of
//! [`LanguagePipeline`].

use std::sync::Arc;

use super::chunker::EntityChunker;
use super::model::LanguageModel;
use super::tagger::PosTagger;
use super::tokenizer::WordTokenizer;
use super::{ChunkNode, LanguageError, LanguagePipeline, TaggedToken};

/// Tokenizer, tagger and chunker sharing one immutable model.
#[derive(Debug, Clone)]
pub struct BuiltinPipeline {
    model: Arc<LanguageModel>,
}

impl BuiltinPipeline {
    pub fn new(model: Arc<LanguageModel>) -> Self {
        Self { model }
    }
}

impl LanguagePipeline for BuiltinPipeline {
    fn model_name(&self) -> &str {
        self.model.name()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, LanguageError> {
        Ok(WordTokenizer::new(&self.model).tokenize(text))
    }

    fn pos_tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, LanguageError> {
        if let Some(pos) = tokens.iter().position(|t| t.trim().is_empty()) {
            return Err(LanguageError::Tag(format!("empty token at position {pos}")));
        }

        let tagged = PosTagger::new(&self.model).tag(tokens);
        if tagged.len() != tokens.len() {
            return Err(LanguageError::Tag(format!(
                "tagged {} of {} tokens",
                tagged.len(),
                tokens.len()
            )));
        }
        Ok(tagged)
    }

    fn ne_chunk(&self, tagged: &[TaggedToken]) -> Result<Vec<ChunkNode>, LanguageError> {
        if let Some(pos) = tagged.iter().position(|t| t.tag.is_empty()) {
            return Err(LanguageError::Chunk(format!(
                "token {:?} at position {pos} has no tag",
                tagged[pos].text
            )));
        }

        let nodes = EntityChunker::new(&self.model).chunk(tagged);
        let covered: usize = nodes.iter().map(ChunkNode::len).sum();
        if covered != tagged.len() {
            return Err(LanguageError::Chunk(format!(
                "chunks cover {covered} of {} tokens",
                tagged.len()
            )));
        }
        Ok(nodes)
    }
}

//! TextAnalyzer - the three text operations exposed over HTTP.
//!
//! Each operation runs the pipeline stages it depends on, in order:
//!
//! ```text
//! tokenize(text) = tokenize
//! pos_tag(text)  = tokenize → pos_tag
//! ner(text)      = tokenize → pos_tag → ne_chunk → entity pairs
//! ```

use std::sync::Arc;

use crate::language::{LanguageError, LanguagePipeline};

/// A (token, tag) or (entity text, label) pair.
pub type Pair = (String, String);

#[derive(Clone)]
pub struct TextAnalyzer {
    pipeline: Arc<dyn LanguagePipeline>,
}

impl TextAnalyzer {
    pub fn new(pipeline: Arc<dyn LanguagePipeline>) -> Self {
        Self { pipeline }
    }

    pub fn model_name(&self) -> &str {
        self.pipeline.model_name()
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, LanguageError> {
        self.pipeline.tokenize(text)
    }

    pub fn pos_tag(&self, text: &str) -> Result<Vec<Pair>, LanguageError> {
        let tokens = self.pipeline.tokenize(text)?;
        let tagged = self.pipeline.pos_tag(&tokens)?;
        Ok(tagged.into_iter().map(|t| (t.text, t.tag)).collect())
    }

    /// Entities in order of first occurrence, each as space-joined surface
    /// text and label.
    pub fn ner(&self, text: &str) -> Result<Vec<Pair>, LanguageError> {
        let tokens = self.pipeline.tokenize(text)?;
        let tagged = self.pipeline.pos_tag(&tokens)?;
        let chunks = self.pipeline.ne_chunk(&tagged)?;
        Ok(chunks
            .iter()
            .filter_map(|node| node.as_entity())
            .map(|(text, label)| (text, label.to_string()))
            .collect())
    }
}

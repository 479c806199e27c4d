//! Language stack: tokenizer, POS tagger and named-entity chunker.
//!
//! The HTTP layer only talks to [`LanguagePipeline`]. [`BuiltinPipeline`] is
//! the rule-based English implementation driven by a [`LanguageModel`]:
//!
//! ```text
//! text ──► tokenize ──► pos_tag ──► ne_chunk
//!          Vec<String>  Vec<TaggedToken>  Vec<ChunkNode>
//! ```
//!
//! Each stage consumes the previous stage's output, so a caller that needs
//! entities runs all three in order.

pub mod chunker;
pub mod model;
pub mod pipeline;
pub mod tagger;
pub mod tokenizer;

pub use model::{LanguageModel, ModelError};
pub use pipeline::BuiltinPipeline;

/// A token paired with its Penn Treebank tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// One node of the chunked sentence: either a bare token or a labeled group
/// of consecutive tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkNode {
    Token(TaggedToken),
    Entity {
        label: String,
        tokens: Vec<TaggedToken>,
    },
}

impl ChunkNode {
    /// Label and space-joined surface text of an entity group.
    pub fn as_entity(&self) -> Option<(String, &str)> {
        match self {
            ChunkNode::Entity { label, tokens } => {
                let text = tokens
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                Some((text, label.as_str()))
            }
            ChunkNode::Token(_) => None,
        }
    }

    /// Number of tagged tokens under this node.
    pub fn len(&self) -> usize {
        match self {
            ChunkNode::Token(_) => 1,
            ChunkNode::Entity { tokens, .. } => tokens.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Failure of one pipeline stage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LanguageError {
    #[error("tokenizer failed: {0}")]
    Tokenize(String),

    #[error("tagger failed: {0}")]
    Tag(String),

    #[error("chunker failed: {0}")]
    Chunk(String),
}

/// The language processing seam used by the request handlers.
///
/// Implementations must be safe to share across requests; they hold only
/// read-only state.
pub trait LanguagePipeline: Send + Sync {
    /// Name of the loaded model, reported by the health endpoint.
    fn model_name(&self) -> &str;

    /// Split text into word tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, LanguageError>;

    /// Assign one tag per token, preserving order.
    fn pos_tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, LanguageError>;

    /// Group tagged tokens into named-entity chunks.
    fn ne_chunk(&self, tagged: &[TaggedToken]) -> Result<Vec<ChunkNode>, LanguageError>;
}

/// Sentence-final punctuation as emitted by the tokenizer.
const SENTENCE_END: &[&str] = &[".", "!", "?", "..."];

/// Tokens that may sit between a sentence end and the first word.
const SENTENCE_OPENERS: &[&str] = &["``", "(", "[", "{", "'", "--"];

/// Whether the token at `idx` is the first word of a sentence.
pub(crate) fn starts_sentence<S: AsRef<str>>(tokens: &[S], idx: usize) -> bool {
    let mut i = idx;
    while i > 0 {
        let prev = tokens[i - 1].as_ref();
        if SENTENCE_OPENERS.contains(&prev) {
            i -= 1;
            continue;
        }
        return SENTENCE_END.contains(&prev);
    }
    true
}

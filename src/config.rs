//! Runtime configuration from CLI flags, falling back to `NLP_GATEWAY_*`
//! environment variables (a `.env` file is loaded first by `main`).

use std::path::PathBuf;

use clap::Parser;

use crate::language::{LanguageModel, ModelError};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "nlp-gateway")]
#[command(version)]
#[command(about = "HTTP gateway for tokenization, part-of-speech tagging and named-entity recognition")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "NLP_GATEWAY_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// YAML language model to load instead of the built-in English model
    #[arg(long, env = "NLP_GATEWAY_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "NLP_GATEWAY_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Config {
    pub fn load_model(&self) -> Result<LanguageModel, ModelError> {
        match &self.model_path {
            Some(path) => LanguageModel::from_path(path),
            None => LanguageModel::load_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::model::DEFAULT_MODEL_YAML;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["nlp-gateway"]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.model_path.is_none());
        assert_eq!(config.load_model().unwrap().name(), "english-basic");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "nlp-gateway",
            "--bind-addr",
            "127.0.0.1:9000",
            "--max-body-bytes",
            "64",
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.max_body_bytes, 64);
    }

    #[test]
    fn test_model_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let yaml = DEFAULT_MODEL_YAML.replacen("name: english-basic", "name: custom", 1);
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            model_path: Some(file.path().to_path_buf()),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        };
        assert_eq!(config.load_model().unwrap().name(), "custom");
    }

    #[test]
    fn test_missing_model_file() {
        let config = Config {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            model_path: Some(PathBuf::from("/nonexistent/model.yaml")),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        };
        assert!(matches!(config.load_model(), Err(ModelError::Read { .. })));
    }
}

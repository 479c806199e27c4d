//! nlp-gateway: tokenization, part-of-speech tagging and named-entity
//! recognition over HTTP.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod language;
pub mod router;
pub mod service;

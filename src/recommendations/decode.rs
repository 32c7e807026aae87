//! Recovers the recommendation document from free-form model text

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use tracing::debug;

use super::fallback;
use super::types::AiRecommendation;

/// Outcome of decoding model output. Both arms carry a usable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Parsed(T),
    Fallback(T),
}

impl<T> Decoded<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Decoded::Parsed(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Decoded::Parsed(value) | Decoded::Fallback(value) => value,
        }
    }
}

/// Span from the first `{` to the last `}` of `text`, if any
pub fn extract_json_object(text: &str) -> Option<&str> {
    // Greedy: first `{` through last `}`
    static JSON_OBJECT: OnceLock<Regex> = OnceLock::new();
    let re = JSON_OBJECT
        .get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("json object regex compiles"));
    re.find(text).map(|m| m.as_str())
}

/// Decodes the embedded JSON object into `T`, or yields `fallback()`
pub fn decode_json_object<T: DeserializeOwned>(
    text: &str,
    fallback: impl FnOnce() -> T,
) -> Decoded<T> {
    let Some(candidate) = extract_json_object(text) else {
        debug!("Model output contains no JSON object");
        return Decoded::Fallback(fallback());
    };

    match serde_json::from_str(candidate) {
        Ok(value) => Decoded::Parsed(value),
        Err(e) => {
            debug!("Model output JSON did not decode: {}", e);
            Decoded::Fallback(fallback())
        }
    }
}

/// Decodes model output, substituting the canned set on failure
pub fn decode_recommendation(text: &str) -> Decoded<AiRecommendation> {
    decode_json_object(text, fallback::canned)
}

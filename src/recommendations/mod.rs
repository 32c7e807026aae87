//! AI-generated, plain-language performance recommendations
//!
//! The model is asked for a JSON document; anything it returns that does not
//! decode falls back to a canned set, and a failed call falls back to a set
//! derived from the measured scores.

pub mod decode;
pub mod fallback;
pub mod prompt;
pub mod service;
pub mod types;

pub use decode::{decode_recommendation, extract_json_object, Decoded};
pub use service::RecommendationService;
pub use types::{AiRecommendation, CriticalIssue, Difficulty, Optimization};

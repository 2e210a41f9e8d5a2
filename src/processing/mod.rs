//! Scoring pipeline: skill catalog, matching, bonuses, similarity and blending

pub mod skills;
pub mod phrase;
pub mod role_classifier;
pub mod skill_matcher;
pub mod bonus;
pub mod text_processor;
pub mod tfidf;
pub mod similarity;
pub mod blender;
pub mod recommendations;
pub mod analyzer;

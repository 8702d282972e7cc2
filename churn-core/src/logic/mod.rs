//! Logic Module - Scoring pipeline
//!
//! - `features/` - Schema, profile, encoding and vector assembly
//! - `model/` - Artifact, scorer and decision policy
//! - `pipeline` - End-to-end evaluation and the process-wide evaluator

pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;

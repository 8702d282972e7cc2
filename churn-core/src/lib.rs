//! Employee Churn Risk - Core Scoring Pipeline
//!
//! Encodes an employee profile into the fixed feature layout the trained
//! model expects, scores it through the model artifact and applies the
//! calibrated threshold.
//!
//! ```text
//! raw profile ─► Encoder ─► Assembler ─► Scorer (artifact) ─► Decision
//! ```

pub mod constants;
pub mod logic;

pub use logic::error::{ChurnError, ChurnResult};
pub use logic::features::{
    assemble, AttributeValue, EmployeeProfile, Encoder, FeatureSchema, FeatureVector, LayoutInfo,
    RawProfile,
};
pub use logic::model::{
    decide, score, Artifact, ArtifactError, Decision, RiskModel, RiskScore, Threshold,
};
pub use logic::pipeline::{EngineStatus, Evaluation, Evaluator};

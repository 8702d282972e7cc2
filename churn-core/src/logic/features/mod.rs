//! Features Module - Attribute encoding
//!
//! Raw profile → encoded values → ordered FeatureVector.
//! The schema in `layout.rs` is the single source of truth for ordering and
//! code tables.

pub mod layout;
pub mod profile;
pub mod encoder;
pub mod vector;
pub mod assembler;


// Re-export common types
pub use layout::{FeatureSchema, AttributeDef, AttributeKind, NumericDomain, LayoutInfo, FEATURE_COUNT, FEATURE_VERSION};
pub use profile::{AttributeValue, EmployeeProfile, ProfileBuilder, RawProfile};
pub use encoder::Encoder;
pub use vector::FeatureVector;
pub use assembler::assemble;

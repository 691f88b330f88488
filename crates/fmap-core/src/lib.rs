#![deny(clippy::all)]

//! Reference analysis and feature-map construction for annotated
//! TypeScript/TSX monorepos.
//!
//! This crate provides:
//! - An annotation extractor for custom JSDoc tags (`@screen`, `@component`,
//!   `@serverAction`, `@module`, `@dbTable`, ...).
//! - A reference analyzer that recovers cross-entity usage relationships
//!   from imports, JSX tags, and call expressions using OXC.
//! - A merger that folds inferred references into declared relationships
//!   without ever discarding declared data.
//! - A builder that assembles the final browsable feature map grouped by
//!   business feature.
//!
//! Dangling relationship references are tolerated by design: the builder
//! does not cross-validate names against the item list.

pub mod analyzer;
pub mod annotations;
pub mod builder;
pub mod error;
pub mod merge;
pub mod model;
pub mod patterns;
pub mod pipeline;

pub use analyzer::{AnalyzerOptions, ReferenceAnalyzer};
pub use annotations::{extract_annotations, ExtractedAnnotations};
pub use builder::build_feature_map;
pub use error::{FmapError, Result};
pub use merge::merge_references;
pub use model::{
    ActionEntry, ComponentEntry, EntityKind, FeatureGroup, FeatureMap, FeatureMapItem, FileUsage,
    ModuleEntry, ModuleMetadata, ReferenceAnalysisResult, ReverseReferenceMap, ScreenEntry,
    TableEntry,
};
pub use patterns::{ImportCategory, PathPatterns};
pub use pipeline::generate_feature_map;

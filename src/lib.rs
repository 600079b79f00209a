//! tsreflect - documentation reflection model and converter for
//! TypeScript semantic graphs.
//!
//! A host semantic-analysis engine provides a [`semantic::SemanticGraph`]
//! (symbols, declarations, written type syntax, resolved types); the
//! [`convert::Converter`] turns it into a normalized, serializable
//! [`reflection::ProjectReflection`]. Renderers and validators only ever
//! see the normalized model.

// Shared test fixtures for graph construction
#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
pub mod test_fixtures;

// Centralized limits and thresholds
pub mod limits;

// Diagnostics - error collection and formatting
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity};

// Converter configuration
pub mod options;
pub use options::ConverterOptions;

// Structured documentation comments and the comment-source boundary
pub mod comments;
pub use comments::{Comment, CommentSource, CommentTag, GraphComments};

// Semantic graph - the read-only oracle the converter consumes
pub mod semantic;
pub use semantic::SemanticGraph;

// Type value model
pub mod types;
pub use types::{BigIntValue, LiteralValue, ReferenceTarget, Type};

// Reflection model and the project aggregate
pub mod reflection;
pub use reflection::{
    DeclarationReflection, ProjectReflection, Reflection, ReflectionId, ReflectionKind,
};

// Conversion engine
pub mod convert;
pub use convert::{ConversionResult, Converter, ConverterHooks};

// JSON serialization boundary
pub mod serialization;

// Tracing configuration (text output for debugging)
pub mod tracing_config;

// Test modules
#[cfg(test)]
#[path = "tests/type_conversion_tests.rs"]
mod type_conversion_tests;

#[cfg(test)]
#[path = "tests/symbol_conversion_tests.rs"]
mod symbol_conversion_tests;

#[cfg(test)]
#[path = "tests/resolution_tests.rs"]
mod resolution_tests;

#[cfg(test)]
#[path = "tests/serialization_tests.rs"]
mod serialization_tests;

#[cfg(test)]
#[path = "tests/reflection_tests.rs"]
mod reflection_tests;

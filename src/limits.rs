//! Centralized limits and thresholds for the conversion engine.
//!
//! This module provides shared constants for recursion depths and iteration
//! counts used throughout the converter. Centralizing these values:
//! - Prevents duplicate definitions with inconsistent values
//! - Makes it easy to tune limits in one place
//! - Documents the rationale for each limit
//!
//! Conversion is recursive descent over a caller-supplied semantic graph.
//! A well-formed graph never comes close to these limits; they exist so a
//! malformed or adversarial graph degrades into diagnostics and `Unknown`
//! type values instead of a stack overflow or an endless loop.

/// Maximum recursion depth for type conversion.
///
/// Each nested type expression (union member, tuple element, type argument,
/// object-literal member type, ...) adds one level. Real-world declaration
/// types rarely exceed a few dozen levels; at 100 the converter records a
/// diagnostic and substitutes a textual `Unknown` value.
pub const MAX_TYPE_CONVERSION_DEPTH: u32 = 100;

/// Maximum number of inheritance levels walked when collecting inherited
/// members or building the extends-chain of a class or interface.
///
/// Inheritance graphs are expected to be acyclic, but the graph is input
/// data; the walk bails out rather than looping on a malformed cycle.
pub const MAX_INHERITANCE_WALK: usize = 1_000;

/// Maximum number of ancestor steps taken during by-name reference
/// resolution and alias-chain following.
pub const MAX_ANCESTRY_WALK: usize = 10_000;

/// Initial capacity for the project reflection arena.
pub const INITIAL_REFLECTION_CAPACITY: usize = 256;

//! Type value model.
//!
//! The closed set of immutable type-expression values the documentation
//! model exposes. Values are produced by the type converter, compared
//! structurally via [`Type::same_type`], rendered back to source-like
//! syntax via `Display`, and serialized to a stable camelCase JSON form.
//!
//! Union and intersection equality is order-insensitive; tuple elements
//! and everything else compare in order. Reference values carry a deferred
//! identity that the resolution pass finalizes.

use crate::reflection::ReflectionId;
use crate::semantic::{MappedModifier, SymbolId, TypeOperatorKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Literal values
// =============================================================================

/// An arbitrary-precision integer literal, kept as sign plus decimal
/// digits so any written value round-trips exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigIntValue {
    #[serde(default)]
    pub negative: bool,
    /// Decimal digits without sign or suffix.
    pub value: String,
}

impl BigIntValue {
    /// Parse from source-ish text: optional sign, digits, optional `n`
    /// suffix. Leading zeros are dropped so equal values compare equal.
    pub fn new(text: &str) -> Self {
        let text = text.strip_suffix('n').unwrap_or(text);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let trimmed = digits.trim_start_matches('0');
        let value = if trimmed.is_empty() { "0" } else { trimmed };
        BigIntValue {
            negative: negative && value != "0",
            value: value.to_string(),
        }
    }
}

impl fmt::Display for BigIntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// A literal value usable both in literal types and as an enum-member or
/// default value. Each variant renders back to source syntax.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
    BigInt(BigIntValue),
    Null,
}

impl LiteralValue {
    /// Render the literal the way it is written in source.
    pub fn to_source(&self) -> String {
        match self {
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            LiteralValue::String(s) => format!("\"{}\"", s.escape_default()),
            LiteralValue::BigInt(b) => format!("{b}n"),
            LiteralValue::Null => "null".to_string(),
        }
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralValue::Boolean(a), LiteralValue::Boolean(b)) => a == b,
            // Bit comparison keeps NaN == NaN and -0 != 0, which is what
            // "same written literal" means.
            (LiteralValue::Number(a), LiteralValue::Number(b)) => a.to_bits() == b.to_bits(),
            (LiteralValue::String(a), LiteralValue::String(b)) => a == b,
            (LiteralValue::BigInt(a), LiteralValue::BigInt(b)) => a == b,
            (LiteralValue::Null, LiteralValue::Null) => true,
            _ => false,
        }
    }
}

// =============================================================================
// Reference identity
// =============================================================================

/// The three identity states of a reference value.
///
/// References defer resolution: the converter records the target symbol
/// and the whole-project resolution pass exchanges it for a reflection id.
/// Targets outside the documented surface stay broken and render by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceTarget {
    /// Resolved to a reflection in the project.
    Resolved(ReflectionId),
    /// Awaiting the resolution pass.
    Pending(SymbolId),
    /// Known to have no reflection; the name is all there is.
    Broken,
}

impl ReferenceTarget {
    pub fn is_pending(self) -> bool {
        matches!(self, ReferenceTarget::Pending(_))
    }
}

// =============================================================================
// Type
// =============================================================================

/// A normalized type expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Type {
    /// `string`, `void`, `any`, ...
    Intrinsic { name: String },
    /// `"abc"`, `42`, `true`, `123n`, `null`
    Literal { value: LiteralValue },
    /// A name pointing at another entity rather than embedding structure.
    Reference {
        name: String,
        target: ReferenceTarget,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_arguments: Vec<Type>,
    },
    Union { types: Vec<Type> },
    Intersection { types: Vec<Type> },
    Array { element: Box<Type> },
    Tuple { elements: Vec<Type> },
    /// `[x: string]` inside a tuple.
    NamedTupleMember {
        name: String,
        #[serde(default)]
        is_optional: bool,
        element: Box<Type>,
    },
    /// `T?` inside a tuple.
    Optional { element: Box<Type> },
    /// `...T` inside a tuple.
    Rest { element: Box<Type> },
    Conditional {
        check_type: Box<Type>,
        extends_type: Box<Type>,
        true_type: Box<Type>,
        false_type: Box<Type>,
    },
    IndexedAccess {
        object_type: Box<Type>,
        index_type: Box<Type>,
    },
    /// `infer X`
    Inferred {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        constraint: Option<Box<Type>>,
    },
    Mapped {
        parameter: String,
        parameter_type: Box<Type>,
        template_type: Box<Type>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        optional_modifier: Option<MappedModifier>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        readonly_modifier: Option<MappedModifier>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        name_type: Option<Box<Type>>,
    },
    /// `x is T` / `asserts x`
    Predicate {
        name: String,
        #[serde(default)]
        asserts: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target_type: Option<Box<Type>>,
    },
    /// `typeof X`; the queried entity is a reference value.
    Query { query_type: Box<Type> },
    TemplateLiteral {
        head: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        tail: Vec<(Type, String)>,
    },
    TypeOperator {
        operator: TypeOperatorKind,
        target: Box<Type>,
    },
    TypeParameter { name: String },
    /// An anonymous object/function shape, embedded as a reflection.
    Reflection { declaration: ReflectionId },
    /// Textual fallback for shapes the converter has no category for.
    Unknown { name: String },
}

impl Type {
    pub fn intrinsic(name: impl Into<String>) -> Type {
        Type::Intrinsic { name: name.into() }
    }

    pub fn literal(value: LiteralValue) -> Type {
        Type::Literal { value }
    }

    pub fn array(element: Type) -> Type {
        Type::Array {
            element: Box::new(element),
        }
    }

    pub fn reference(name: impl Into<String>, target: ReferenceTarget) -> Type {
        Type::Reference {
            name: name.into(),
            target,
            type_arguments: Vec::new(),
        }
    }

    /// The defined equality of type values: structural, with
    /// union/intersection members compared as unordered multisets and
    /// everything else in order.
    pub fn same_type(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Union { types: a }, Type::Union { types: b })
            | (Type::Intersection { types: a }, Type::Intersection { types: b }) => {
                same_type_multiset(a, b)
            }
            (
                Type::Reference {
                    name: an,
                    target: at,
                    type_arguments: aa,
                },
                Type::Reference {
                    name: bn,
                    target: bt,
                    type_arguments: ba,
                },
            ) => {
                // Resolved targets compare by identity; everything else by
                // name, so a pending and a broken reference to one name are
                // "similar" before resolution finishes.
                let identity = match (at, bt) {
                    (ReferenceTarget::Resolved(a), ReferenceTarget::Resolved(b)) => a == b,
                    _ => an == bn,
                };
                identity && same_type_list(aa, ba)
            }
            (Type::Array { element: a }, Type::Array { element: b }) => a.same_type(b),
            (Type::Tuple { elements: a }, Type::Tuple { elements: b }) => same_type_list(a, b),
            (
                Type::NamedTupleMember {
                    name: an,
                    is_optional: ao,
                    element: ae,
                },
                Type::NamedTupleMember {
                    name: bn,
                    is_optional: bo,
                    element: be,
                },
            ) => an == bn && ao == bo && ae.same_type(be),
            (Type::Optional { element: a }, Type::Optional { element: b })
            | (Type::Rest { element: a }, Type::Rest { element: b }) => a.same_type(b),
            (
                Type::Conditional {
                    check_type: ac,
                    extends_type: ae,
                    true_type: at,
                    false_type: af,
                },
                Type::Conditional {
                    check_type: bc,
                    extends_type: be,
                    true_type: bt,
                    false_type: bf,
                },
            ) => {
                ac.same_type(bc) && ae.same_type(be) && at.same_type(bt) && af.same_type(bf)
            }
            (
                Type::IndexedAccess {
                    object_type: ao,
                    index_type: ai,
                },
                Type::IndexedAccess {
                    object_type: bo,
                    index_type: bi,
                },
            ) => ao.same_type(bo) && ai.same_type(bi),
            (Type::Query { query_type: a }, Type::Query { query_type: b }) => a.same_type(b),
            (
                Type::TypeOperator {
                    operator: ao,
                    target: at,
                },
                Type::TypeOperator {
                    operator: bo,
                    target: bt,
                },
            ) => ao == bo && at.same_type(bt),
            (
                Type::TemplateLiteral { head: ah, tail: at },
                Type::TemplateLiteral { head: bh, tail: bt },
            ) => {
                ah == bh
                    && at.len() == bt.len()
                    && at
                        .iter()
                        .zip(bt)
                        .all(|((aty, atext), (bty, btext))| aty.same_type(bty) && atext == btext)
            }
            (
                Type::Mapped {
                    parameter: ap,
                    parameter_type: apt,
                    template_type: att,
                    optional_modifier: aom,
                    readonly_modifier: arm,
                    name_type: ant,
                },
                Type::Mapped {
                    parameter: bp,
                    parameter_type: bpt,
                    template_type: btt,
                    optional_modifier: bom,
                    readonly_modifier: brm,
                    name_type: bnt,
                },
            ) => {
                ap == bp
                    && apt.same_type(bpt)
                    && att.same_type(btt)
                    && aom == bom
                    && arm == brm
                    && same_type_option(ant.as_deref(), bnt.as_deref())
            }
            (
                Type::Inferred {
                    name: an,
                    constraint: ac,
                },
                Type::Inferred {
                    name: bn,
                    constraint: bc,
                },
            ) => an == bn && same_type_option(ac.as_deref(), bc.as_deref()),
            (
                Type::Predicate {
                    name: an,
                    asserts: aa,
                    target_type: at,
                },
                Type::Predicate {
                    name: bn,
                    asserts: ba,
                    target_type: bt,
                },
            ) => an == bn && aa == ba && same_type_option(at.as_deref(), bt.as_deref()),
            // Remaining variants have no nested types with special rules.
            _ => self == other,
        }
    }
}

fn same_type_list(a: &[Type], b: &[Type]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_type(y))
}

fn same_type_option(a: Option<&Type>, b: Option<&Type>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x.same_type(y),
        (None, None) => true,
        _ => false,
    }
}

/// Unordered multiset comparison for union/intersection members.
fn same_type_multiset(a: &[Type], b: &[Type]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    for x in a {
        let mut found = false;
        for (i, y) in b.iter().enumerate() {
            if !used[i] && x.same_type(y) {
                used[i] = true;
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}

// =============================================================================
// Rendering
// =============================================================================

/// Wrap a rendered member in parens where the surrounding syntax binds
/// tighter than the member's own.
fn fmt_wrapped(ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Union { .. } | Type::Intersection { .. } | Type::Conditional { .. } => {
            write!(f, "({ty})")
        }
        _ => write!(f, "{ty}"),
    }
}

fn fmt_list(types: &[Type], separator: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        fmt_wrapped(ty, f)?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Intrinsic { name } => f.write_str(name),
            Type::Literal { value } => f.write_str(&value.to_source()),
            Type::Reference {
                name,
                type_arguments,
                ..
            } => {
                f.write_str(name)?;
                if !type_arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in type_arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Type::Union { types } => fmt_list(types, " | ", f),
            Type::Intersection { types } => fmt_list(types, " & ", f),
            Type::Array { element } => {
                fmt_wrapped(element, f)?;
                f.write_str("[]")
            }
            Type::Tuple { elements } => {
                f.write_str("[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{el}")?;
                }
                f.write_str("]")
            }
            Type::NamedTupleMember {
                name,
                is_optional,
                element,
            } => {
                if *is_optional {
                    write!(f, "{name}?: {element}")
                } else {
                    write!(f, "{name}: {element}")
                }
            }
            Type::Optional { element } => {
                fmt_wrapped(element, f)?;
                f.write_str("?")
            }
            Type::Rest { element } => write!(f, "...{element}"),
            Type::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => write!(
                f,
                "{check_type} extends {extends_type} ? {true_type} : {false_type}"
            ),
            Type::IndexedAccess {
                object_type,
                index_type,
            } => {
                fmt_wrapped(object_type, f)?;
                write!(f, "[{index_type}]")
            }
            Type::Inferred { name, constraint } => match constraint {
                Some(c) => write!(f, "infer {name} extends {c}"),
                None => write!(f, "infer {name}"),
            },
            Type::Mapped {
                parameter,
                parameter_type,
                template_type,
                optional_modifier,
                readonly_modifier,
                name_type,
            } => {
                f.write_str("{ ")?;
                match readonly_modifier {
                    Some(MappedModifier::Add) => f.write_str("readonly ")?,
                    Some(MappedModifier::Remove) => f.write_str("-readonly ")?,
                    None => {}
                }
                write!(f, "[{parameter} in {parameter_type}")?;
                if let Some(name) = name_type {
                    write!(f, " as {name}")?;
                }
                f.write_str("]")?;
                match optional_modifier {
                    Some(MappedModifier::Add) => f.write_str("?")?,
                    Some(MappedModifier::Remove) => f.write_str("-?")?,
                    None => {}
                }
                write!(f, ": {template_type} }}")
            }
            Type::Predicate {
                name,
                asserts,
                target_type,
            } => match (asserts, target_type) {
                (true, Some(target)) => write!(f, "asserts {name} is {target}"),
                (true, None) => write!(f, "asserts {name}"),
                (false, Some(target)) => write!(f, "{name} is {target}"),
                (false, None) => f.write_str(name),
            },
            Type::Query { query_type } => write!(f, "typeof {query_type}"),
            Type::TemplateLiteral { head, tail } => {
                write!(f, "`{head}")?;
                for (ty, text) in tail {
                    write!(f, "${{{ty}}}{text}")?;
                }
                f.write_str("`")
            }
            Type::TypeOperator { operator, target } => {
                write!(f, "{} ", operator.as_str())?;
                fmt_wrapped(target, f)
            }
            Type::TypeParameter { name } => f.write_str(name),
            Type::Reflection { .. } => f.write_str("Object"),
            Type::Unknown { name } => f.write_str(name),
        }
    }
}

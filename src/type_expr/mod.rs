//! Symbolic type expressions.
//!
//! The indexer records what it knows about a symbol's type as a
//! [`TypeExpr`]: either a concrete name (`Foo`, `int`, `Foo[]`, `static`)
//! or an indirection that can only be answered once the whole program has
//! been indexed ("the return type of `Foo::bar()`", "the type of global
//! `$config`").  The resolver in [`crate::resolution`] expands these into
//! concrete names.
//!
//! Every expression has a single canonical text form (see [`encoding`]),
//! which is what index snapshots store and what diagnostics print.

mod encoding;
mod type_set;

pub use encoding::DecodeError;
pub use type_set::{ResolvedTypes, TypeSet};

use serde::{Deserialize, Serialize};

/// The late-static-binding keyword.
pub const STATIC: &str = "static";

/// The "anything" type; indexing it yields `mixed` again.
pub const MIXED: &str = "mixed";

/// The generic array type that `empty_array` degrades to.
pub const ARRAY: &str = "array";

/// Pseudo-member of a [`TypeSet`] meaning "array of unknown element type".
pub const EMPTY_ARRAY: &str = "empty_array";

/// Suffix that turns a type name into an array of that type (`Foo[]`).
pub const ARRAY_SUFFIX: &str = "[]";

/// A possibly-indirect type, as recorded by the indexer.
///
/// The set of kinds is closed: the resolver matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    /// A concrete type name.
    Literal(String),
    /// The type of a global variable.
    GlobalVar(String),
    /// The type of a named (global) constant.
    Constant(String),
    /// An array whose elements have the inner type.
    ArrayOf(Box<TypeExpr>),
    /// The element type of something typed as the inner expression.
    ElemOf(Box<TypeExpr>),
    /// The return type of a free function.
    FunctionCall(String),
    /// The return type of `$receiver->method()`.
    InstanceMethodCall {
        receiver: Box<TypeExpr>,
        method: String,
    },
    /// The type of `$receiver->property`.
    InstancePropertyFetch {
        receiver: Box<TypeExpr>,
        property: String,
    },
    /// The return type of `Class::method()`.
    StaticMethodCall { class: String, method: String },
    /// The type of `Class::$property`.
    StaticPropertyFetch { class: String, property: String },
    /// The declared type of parameter `index` of `method`, as specified by
    /// one of the interfaces `class` implements.
    BaseMethodParam {
        index: usize,
        class: String,
        method: String,
    },
}

impl TypeExpr {
    pub fn literal(name: impl Into<String>) -> Self {
        TypeExpr::Literal(name.into())
    }

    pub fn global_var(name: impl Into<String>) -> Self {
        TypeExpr::GlobalVar(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        TypeExpr::Constant(name.into())
    }

    pub fn array_of(inner: TypeExpr) -> Self {
        TypeExpr::ArrayOf(Box::new(inner))
    }

    pub fn elem_of(inner: TypeExpr) -> Self {
        TypeExpr::ElemOf(Box::new(inner))
    }

    pub fn function_call(name: impl Into<String>) -> Self {
        TypeExpr::FunctionCall(name.into())
    }

    pub fn method_call(receiver: TypeExpr, method: impl Into<String>) -> Self {
        TypeExpr::InstanceMethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
        }
    }

    pub fn property_fetch(receiver: TypeExpr, property: impl Into<String>) -> Self {
        TypeExpr::InstancePropertyFetch {
            receiver: Box::new(receiver),
            property: property.into(),
        }
    }

    pub fn static_call(class: impl Into<String>, method: impl Into<String>) -> Self {
        TypeExpr::StaticMethodCall {
            class: class.into(),
            method: method.into(),
        }
    }

    pub fn static_property(class: impl Into<String>, property: impl Into<String>) -> Self {
        TypeExpr::StaticPropertyFetch {
            class: class.into(),
            property: property.into(),
        }
    }

    pub fn base_method_param(
        index: usize,
        class: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        TypeExpr::BaseMethodParam {
            index,
            class: class.into(),
            method: method.into(),
        }
    }

    /// Whether this expression is already a concrete name.
    pub fn is_literal(&self) -> bool {
        matches!(self, TypeExpr::Literal(_))
    }

    /// Whether the text form of this expression decodes back to it.
    ///
    /// An empty literal or name has no text form, and a literal starting
    /// with `@` would read back as an indirection.
    pub fn is_encodable(&self) -> bool {
        let name_ok = |name: &str| !name.is_empty();
        match self {
            TypeExpr::Literal(name) => !name.is_empty() && !name.starts_with('@'),
            TypeExpr::GlobalVar(name)
            | TypeExpr::Constant(name)
            | TypeExpr::FunctionCall(name) => name_ok(name),
            TypeExpr::ArrayOf(inner) | TypeExpr::ElemOf(inner) => inner.is_encodable(),
            TypeExpr::InstanceMethodCall { receiver, method } => {
                receiver.is_encodable() && name_ok(method)
            }
            TypeExpr::InstancePropertyFetch { receiver, property } => {
                receiver.is_encodable() && name_ok(property)
            }
            TypeExpr::StaticMethodCall { class, method }
            | TypeExpr::BaseMethodParam { class, method, .. } => name_ok(class) && name_ok(method),
            TypeExpr::StaticPropertyFetch { class, property } => {
                name_ok(class) && name_ok(property)
            }
        }
    }

    /// Decode the canonical text form produced by `Display`.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        encoding::decode(text)
    }
}

impl From<TypeExpr> for String {
    fn from(expr: TypeExpr) -> Self {
        expr.to_string()
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = DecodeError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        encoding::decode(&text)
    }
}

impl std::str::FromStr for TypeExpr {
    type Err = DecodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        encoding::decode(text)
    }
}

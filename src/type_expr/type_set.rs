use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::TypeExpr;

/// The declared type of a symbol: a union of symbolic expressions.
///
/// Members are deduplicated by structural equality.  In snapshots a set is
/// written as a JSON array of the members' text forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSet {
    members: BTreeSet<TypeExpr>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set of concrete names, e.g. `TypeSet::from_literals(["int", "null"])`.
    pub fn from_literals<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(TypeExpr::literal).collect()
    }

    /// Add `expr`; returns `false` if it was already present.
    ///
    /// Expressions without a decodable text form (an empty type name, for
    /// instance) carry no type information and are dropped, so every set
    /// survives a snapshot round trip.
    pub fn insert(&mut self, expr: TypeExpr) -> bool {
        if !expr.is_encodable() {
            tracing::debug!(?expr, "dropping type expression without a text form");
            return false;
        }
        self.members.insert(expr)
    }

    pub fn contains(&self, expr: &TypeExpr) -> bool {
        self.members.contains(expr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeExpr> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl From<TypeExpr> for TypeSet {
    fn from(expr: TypeExpr) -> Self {
        std::iter::once(expr).collect()
    }
}

impl FromIterator<TypeExpr> for TypeSet {
    fn from_iter<T: IntoIterator<Item = TypeExpr>>(iter: T) -> Self {
        let mut set = TypeSet::new();
        for expr in iter {
            set.insert(expr);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TypeSet {
    type Item = &'a TypeExpr;
    type IntoIter = std::collections::btree_set::Iter<'a, TypeExpr>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

/// The concrete type names a symbolic type can denote.
///
/// Iteration is in sorted order, so output built from it is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTypes(BTreeSet<String>);

impl ResolvedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the set, returning the names in sorted order.
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl Extend<String> for ResolvedTypes {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<String> for ResolvedTypes {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        ResolvedTypes(iter.into_iter().collect())
    }
}

impl IntoIterator for ResolvedTypes {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

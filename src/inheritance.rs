//! Member lookup across the class hierarchy.
//!
//! PHP classes inherit along three kinds of edges: a single `extends`
//! parent, any number of `use`d traits, and (for interfaces) any number of
//! parent interfaces.  The functions here walk those edges to find where a
//! method, property or constant is declared, and whether a class
//! implements an interface.
//!
//! The graph comes from user code and may be cyclic (`class A extends B`,
//! `class B extends A`).  Every walk records the names it has visited for
//! the duration of the call and treats a revisit as "not found".
use std::collections::HashSet;

use crate::index::SymbolIndex;
use crate::types::{ConstantInfo, FunctionInfo, PropertyInfo};
use crate::util::normalize_name;

/// A member found somewhere in a class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<T> {
    pub member: T,
    /// The class, interface or trait that declares the member.
    pub class_name: String,
}

/// Names already visited during one lookup.
#[derive(Debug, Default)]
struct Visited(HashSet<String>);

impl Visited {
    /// Record `name`; returns `false` if it was already present.
    fn enter(&mut self, name: &str) -> bool {
        self.0.insert(normalize_name(name).to_string())
    }
}

fn parent_of(parent_class: &Option<String>) -> Option<&str> {
    parent_class.as_deref().filter(|p| !p.is_empty())
}

fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

// ─── Methods ────────────────────────────────────────────────────────────────

/// Find a method on `class_name` or anything it inherits from.
///
/// Search order at each level: own methods, then used traits, then parent
/// interfaces, then the parent class.  Names that are not classes are
/// also tried as traits, so a trait can be queried directly.
pub fn find_method<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    method_name: &str,
) -> Option<Found<FunctionInfo>> {
    find_method_in(index, class_name, method_name, &mut Visited::default())
}

fn find_method_in<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    method_name: &str,
    visited: &mut Visited,
) -> Option<Found<FunctionInfo>> {
    let mut current = class_name.to_string();

    loop {
        if !visited.enter(&current) {
            tracing::trace!(class = %current, method_name, "inheritance cycle in method lookup");
            return None;
        }

        let class = index
            .get_class(&current)
            .or_else(|| index.get_trait(&current))?;

        if let Some(method) = class.method(method_name) {
            return Some(Found {
                member: method.clone(),
                class_name: current,
            });
        }

        for trait_name in &class.used_traits {
            if let Some(found) = find_method_in(index, trait_name, method_name, visited) {
                return Some(found);
            }
        }

        for iface in &class.parent_interfaces {
            if let Some(found) = find_method_in(index, iface, method_name, visited) {
                return Some(found);
            }
        }

        current = parent_of(&class.parent_class)?.to_string();
    }
}

// ─── Properties ─────────────────────────────────────────────────────────────

/// Find a property on `class_name` or one of its parent classes.
///
/// Properties are not looked up through traits or interfaces.
pub fn find_property<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    property_name: &str,
) -> Option<Found<PropertyInfo>> {
    let mut visited = Visited::default();
    let mut current = class_name.to_string();

    loop {
        if !visited.enter(&current) {
            tracing::trace!(
                class = %current,
                property_name,
                "inheritance cycle in property lookup"
            );
            return None;
        }

        let class = index.get_class(&current)?;

        if let Some(property) = class.property(property_name) {
            return Some(Found {
                member: property.clone(),
                class_name: current,
            });
        }

        current = parent_of(&class.parent_class)?.to_string();
    }
}

// ─── Constants ──────────────────────────────────────────────────────────────

/// Find a class constant on `class_name` or anything it inherits from.
///
/// At each level the implemented interfaces are searched *before* the
/// class's own constants, then the parent interfaces, then the parent
/// class.  A class that redeclares an interface constant therefore
/// reports the interface's declaration.
pub fn find_constant<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    constant_name: &str,
) -> Option<Found<ConstantInfo>> {
    find_constant_in(index, class_name, constant_name, &mut Visited::default())
}

fn find_constant_in<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    constant_name: &str,
    visited: &mut Visited,
) -> Option<Found<ConstantInfo>> {
    let mut current = class_name.to_string();

    loop {
        if !visited.enter(&current) {
            tracing::trace!(
                class = %current,
                constant_name,
                "inheritance cycle in constant lookup"
            );
            return None;
        }

        let class = index.get_class(&current)?;

        for iface in &class.interfaces {
            if let Some(found) = find_constant_in(index, iface, constant_name, visited) {
                return Some(found);
            }
        }

        if let Some(constant) = class.constant(constant_name) {
            return Some(Found {
                member: constant.clone(),
                class_name: current,
            });
        }

        for iface in &class.parent_interfaces {
            if let Some(found) = find_constant_in(index, iface, constant_name, visited) {
                return Some(found);
            }
        }

        current = parent_of(&class.parent_class)?.to_string();
    }
}

// ─── Interfaces ─────────────────────────────────────────────────────────────

/// Whether `class_name` (or one of its parent classes) implements
/// `interface_name`, directly or through interface inheritance.
pub fn implements<I: SymbolIndex + ?Sized>(
    index: &I,
    class_name: &str,
    interface_name: &str,
) -> bool {
    let mut visited_classes = Visited::default();
    let mut visited_interfaces = Visited::default();
    let mut current = class_name.to_string();

    loop {
        if !visited_classes.enter(&current) {
            return false;
        }

        let Some(class) = index.get_class(&current) else {
            return false;
        };

        if class
            .interfaces
            .iter()
            .any(|iface| same_name(iface, interface_name))
        {
            return true;
        }

        for iface in &class.interfaces {
            if interface_extends(index, iface, interface_name, &mut visited_interfaces) {
                return true;
            }
        }

        match parent_of(&class.parent_class) {
            Some(parent) => current = parent.to_string(),
            None => return false,
        }
    }
}

/// Whether interface `orig` extends interface `parent`, at any depth.
fn interface_extends<I: SymbolIndex + ?Sized>(
    index: &I,
    orig: &str,
    parent: &str,
    visited: &mut Visited,
) -> bool {
    if !visited.enter(orig) {
        return false;
    }

    let Some(iface) = index.get_class(orig) else {
        return false;
    };

    iface
        .parent_interfaces
        .iter()
        .any(|p| same_name(p, parent) || interface_extends(index, p, parent, visited))
}

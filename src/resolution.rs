//! Symbolic type resolution.
//!
//! Expands a [`TypeExpr`] (or a whole [`TypeSet`]) into the concrete type
//! names it can denote, following global variables, constants, function
//! and method return types, property types, array wrapping/unwrapping and
//! interface parameter types through the [`SymbolIndex`].
//!
//! # Late static binding
//!
//! The resolver carries the class that `static` is currently bound to.
//! When a method's declared return type mentions `static`, it is resolved
//! with the *calling* class as context and the result is mapped back to
//! that class, so `Dog::create()` inherited from `Animal` yields `Dog`.
//! `static` wrapped by `@array(...)` becomes `<calling class>[]`.
//!
//! # Termination
//!
//! A [`VisitedTypes`] guard records every non-literal expression, together
//! with the class `static` is bound to, the moment its expansion starts.
//! Meeting the same pair again yields the empty set, so self-referential
//! declarations (a global whose type is "the type of itself") terminate,
//! while one declaration can still be expanded once per calling class.
//! The guard is an explicit value: a fresh one per top-level call, or one
//! the caller threads through several calls.
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use crate::config::ResolverConfig;
use crate::index::SymbolIndex;
use crate::inheritance::{find_method, find_property};
use crate::type_expr::{
    ARRAY, ARRAY_SUFFIX, EMPTY_ARRAY, MIXED, ResolvedTypes, STATIC, TypeExpr, TypeSet,
};
use crate::util::root_namespace_fallback;

/// Expressions whose expansion has already started, keyed by the class
/// `static` was bound to (empty at top level).
#[derive(Debug, Default)]
pub struct VisitedTypes {
    seen: HashSet<(String, TypeExpr)>,
}

impl VisitedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str, expr: &TypeExpr) -> bool {
        self.seen.contains(&(class.to_string(), expr.clone()))
    }

    /// Record `expr` under `class`; returns `false` if it was already
    /// present.
    pub fn insert(&mut self, class: &str, expr: TypeExpr) -> bool {
        self.seen.insert((class.to_string(), expr))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Resolve one expression with the default configuration.
pub fn resolve_type<I: SymbolIndex + ?Sized>(
    index: &I,
    expr: &TypeExpr,
    visited: &mut VisitedTypes,
) -> ResolvedTypes {
    TypeResolver::new(index, visited).resolve_type(expr)
}

/// Resolve every member of a set with the default configuration.
pub fn resolve_types<I: SymbolIndex + ?Sized>(
    index: &I,
    types: &TypeSet,
    visited: &mut VisitedTypes,
) -> ResolvedTypes {
    TypeResolver::new(index, visited).resolve_types(types)
}

/// A resolution session over one index and one visited guard.
pub struct TypeResolver<'a, I: SymbolIndex + ?Sized> {
    index: &'a I,
    visited: &'a mut VisitedTypes,
    config: ResolverConfig,
}

impl<'a, I: SymbolIndex + ?Sized> TypeResolver<'a, I> {
    pub fn new(index: &'a I, visited: &'a mut VisitedTypes) -> Self {
        TypeResolver {
            index,
            visited,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a top-level expression (`static` unbound).
    pub fn resolve_type(&mut self, expr: &TypeExpr) -> ResolvedTypes {
        self.resolve_in("", expr)
    }

    /// Resolve a top-level set (`static` unbound).
    pub fn resolve_types(&mut self, types: &TypeSet) -> ResolvedTypes {
        self.resolve_set_in("", types)
    }

    /// Resolve `expr` with `static` bound to `class`.
    fn resolve_in(&mut self, class: &str, expr: &TypeExpr) -> ResolvedTypes {
        if !expr.is_literal() && !self.visited.insert(class, expr.clone()) {
            tracing::trace!(%expr, class, "type already being expanded");
            return ResolvedTypes::new();
        }

        let index = self.index;

        match expr {
            TypeExpr::Literal(name) => std::iter::once(name.clone()).collect(),

            TypeExpr::GlobalVar(name) => match index.get_global_var_type(name) {
                Some(declared) => self.resolve_set_in(class, &declared),
                None => ResolvedTypes::new(),
            },

            TypeExpr::Constant(name) => match index.get_constant(name) {
                Some(constant) => self.resolve_set_in(class, &constant.type_info),
                None => ResolvedTypes::new(),
            },

            TypeExpr::ArrayOf(inner) => self
                .resolve_in(class, inner)
                .into_iter()
                .map(|t| {
                    if t == STATIC {
                        format!("{class}{ARRAY_SUFFIX}")
                    } else {
                        format!("{t}{ARRAY_SUFFIX}")
                    }
                })
                .collect(),

            TypeExpr::ElemOf(inner) => self
                .resolve_in(class, inner)
                .into_iter()
                .filter_map(|t| {
                    if let Some(elem) = t.strip_suffix(ARRAY_SUFFIX) {
                        Some(elem.to_string())
                    } else if t == MIXED {
                        Some(t)
                    } else {
                        None
                    }
                })
                .collect(),

            TypeExpr::FunctionCall(name) => {
                let function = index.get_function(name).or_else(|| {
                    if !self.config.root_namespace_fallback {
                        return None;
                    }
                    root_namespace_fallback(name).and_then(|root| index.get_function(&root))
                });
                match function {
                    Some(function) => self.resolve_set_in(class, &function.return_type),
                    None => ResolvedTypes::new(),
                }
            }

            TypeExpr::InstanceMethodCall { receiver, method } => {
                let mut res = ResolvedTypes::new();
                for class_name in self.resolve_in(class, receiver) {
                    let Some(found) = find_method(index, &class_name, method) else {
                        continue;
                    };
                    let resolved = self.resolve_set_in(&class_name, &found.member.return_type);
                    bind_static(&mut res, resolved, &class_name);
                }
                res
            }

            TypeExpr::InstancePropertyFetch { receiver, property } => {
                let magic_getter = self.config.magic_getter.clone();
                let mut res = ResolvedTypes::new();
                for class_name in self.resolve_in(class, receiver) {
                    if let Some(found) = find_property(index, &class_name, property) {
                        res.extend(self.resolve_set_in(class, &found.member.type_info));
                        continue;
                    }

                    // No declared property: a `__get` with a declared return
                    // type describes every dynamic property of the class.
                    if !magic_getter.is_empty()
                        && let Some(found) = find_method(index, &class_name, &magic_getter)
                    {
                        return self.resolve_set_in(class, &found.member.return_type);
                    }
                }
                res
            }

            TypeExpr::StaticMethodCall {
                class: host,
                method,
            } => {
                let mut res = ResolvedTypes::new();
                if let Some(found) = find_method(index, host, method) {
                    let resolved = self.resolve_set_in(host, &found.member.return_type);
                    bind_static(&mut res, resolved, host);
                }
                res
            }

            TypeExpr::StaticPropertyFetch {
                class: host,
                property,
            } => match find_property(index, host, property) {
                Some(found) => self.resolve_set_in(class, &found.member.type_info),
                None => ResolvedTypes::new(),
            },

            TypeExpr::BaseMethodParam {
                index: param,
                class: host,
                method,
            } => self.resolve_base_method_param(*param, host, method),
        }
    }

    /// The type of parameter `param` of `method`, taken from the first
    /// interface implemented by `host` that declares the method with
    /// enough parameters.
    ///
    /// This is a new top-level expansion: `static` is unbound, but the
    /// visited guard is kept so mutually referring parameters terminate.
    fn resolve_base_method_param(
        &mut self,
        param: usize,
        host: &str,
        method: &str,
    ) -> ResolvedTypes {
        let Some(host_class) = self.index.get_class(host) else {
            return ResolvedTypes::new();
        };

        for iface_name in &host_class.interfaces {
            let Some(iface) = self.index.get_class(iface_name) else {
                continue;
            };
            let Some(declared) = iface.method(method) else {
                continue;
            };
            if let Some(parameter) = declared.parameters.get(param) {
                return self.resolve_set_in("", &parameter.type_info);
            }
        }

        ResolvedTypes::new()
    }

    /// Resolve every member of `types` with `static` bound to `class`.
    fn resolve_set_in(&mut self, class: &str, types: &TypeSet) -> ResolvedTypes {
        let mut res = ResolvedTypes::new();

        for expr in types {
            let resolved =
                match panic::catch_unwind(AssertUnwindSafe(|| self.resolve_in(class, expr))) {
                    Ok(resolved) => resolved,
                    Err(payload) => {
                        tracing::error!(%expr, "panic while resolving type");
                        panic::resume_unwind(payload);
                    }
                };
            res.extend(resolved);
        }

        // `empty_array` only adds information when nothing more specific
        // than "some array" is known.
        if res.remove(EMPTY_ARRAY) && !res.iter().any(|t| t.ends_with(ARRAY_SUFFIX)) {
            res.insert(ARRAY);
        }

        res
    }
}

/// Add `resolved` to `res`, replacing `static` with the class it is bound to.
fn bind_static(res: &mut ResolvedTypes, resolved: ResolvedTypes, class_name: &str) {
    for t in resolved {
        if t == STATIC {
            res.insert(class_name);
        } else {
            res.insert(t);
        }
    }
}

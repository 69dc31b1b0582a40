//! Symbolic type resolution core for PHP static analysis.
//!
//! The indexer records each symbol's type as a set of [`TypeExpr`]s that
//! may still point elsewhere ("the return type of `Foo::bar()`", "the type
//! of global `$db`").  Once the whole program is indexed, this crate
//! answers what those expressions actually denote:
//!
//! - [`resolution`]: expands a type expression or set into concrete type
//!   names, with late static binding and cycle-safe recursion.
//! - [`inheritance`]: finds methods, properties and constants across
//!   parent classes, traits and interfaces, and answers `implements`
//!   questions, on graphs that may be cyclic.
//! - [`variables`]: classifies the variable occurrences of a syntax
//!   subtree as reads or writes.
//!
//! The symbol data comes from any [`SymbolIndex`]; [`SymbolTable`] is the
//! bundled in-memory implementation.
//!
//! ```
//! use phpantom_solver::{ClassInfo, FunctionInfo, SymbolTable, TypeExpr, TypeSet};
//! use phpantom_solver::resolution::{VisitedTypes, resolve_type};
//!
//! let index = SymbolTable::new();
//! index.insert_class(ClassInfo::new("\\Animal").with_method(FunctionInfo::new(
//!     "create",
//!     TypeSet::from_literals(["static"]),
//! )));
//! index.insert_class(ClassInfo::new("\\Dog").extends("\\Animal"));
//! index.mark_indexing_complete();
//!
//! let expr = TypeExpr::static_call("\\Dog", "create");
//! let resolved = resolve_type(&index, &expr, &mut VisitedTypes::new());
//! assert_eq!(resolved.into_vec(), vec!["\\Dog"]);
//! ```

pub mod config;
pub mod index;
pub mod inheritance;
pub mod logging;
pub mod resolution;
pub mod syntax;
pub mod type_expr;
pub mod types;
pub mod util;
pub mod variables;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use config::Config;
pub use index::{IndexError, IndexSnapshot, SymbolIndex, SymbolTable};
pub use inheritance::{Found, find_constant, find_method, find_property, implements};
pub use resolution::{TypeResolver, VisitedTypes, resolve_type, resolve_types};
pub use type_expr::{DecodeError, ResolvedTypes, TypeExpr, TypeSet};
pub use types::{ClassInfo, ConstantInfo, FunctionInfo, ParameterInfo, PropertyInfo};
pub use variables::{ClassifyError, VariableAccesses, classify_variables};

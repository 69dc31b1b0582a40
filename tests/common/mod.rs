#![allow(dead_code)]

use phpantom_solver::{ClassInfo, FunctionInfo, ResolvedTypes, SymbolTable, TypeExpr, TypeSet};

/// Create an index with indexing already marked complete.
pub fn create_test_index() -> SymbolTable {
    phpantom_solver::logging::init_for_tests();
    let index = SymbolTable::new();
    index.mark_indexing_complete();
    index
}

/// Shorthand for a set of concrete names.
pub fn lits(names: &[&str]) -> TypeSet {
    TypeSet::from_literals(names.iter().copied())
}

/// Shorthand for a one-member set.
pub fn set(expr: TypeExpr) -> TypeSet {
    expr.into()
}

/// A method returning `return_type`.
pub fn method(name: &str, return_type: TypeSet) -> FunctionInfo {
    FunctionInfo::new(name, return_type)
}

/// An empty class, ready for the `ClassInfo` builders.
pub fn class(name: &str) -> ClassInfo {
    ClassInfo::new(name)
}

/// Sorted names of a resolution result.
pub fn names(resolved: ResolvedTypes) -> Vec<String> {
    resolved.into_vec()
}

//! Variable read/write classification.
//!
//! Walks one expression or statement subtree and reports which variables
//! it reads and which it writes.
//!
//! The walker keeps a stack of pending contexts.  A context is pushed when
//! entering a child position that changes whether variables under it are
//! written, and popped when leaving that same (parent, role) pair:
//!
//! - The left-hand side of an assignment is a write; every other position
//!   of the assignment is a read, whatever the outer context says.
//! - A `list()` target passes the write down to every item value.
//! - Array indices, property names, method names, list keys and call
//!   arguments are reads.
//! - A variable with a plain name inherits the current context; the name
//!   expression of a variable variable (`$$x`) is always read.
//! - Array and property writes count as writes of the base variable.
//!
//! An identifier is an occurrence only when it is the name of a variable
//! node; parameter and property declarations are skipped entirely.
use std::collections::BTreeSet;

use crate::config::ClassifierConfig;
use crate::index::SymbolIndex;
use crate::syntax::{ChildKey, Node, Visitor};

/// Variables read and written by a subtree, each sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableAccesses {
    pub reads: Vec<String>,
    pub writes: Vec<String>,
}

/// The tree did not have the shape the classifier relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("unexpected child role '{key}' under a variable node")]
    UnexpectedChild { key: ChildKey },
}

/// Classify the variable occurrences in `node`.
///
/// Nothing is classified (both lists come back empty) until `index`
/// reports that indexing is complete.
pub fn classify_variables<I: SymbolIndex + ?Sized>(
    index: &I,
    node: &Node,
) -> Result<VariableAccesses, ClassifyError> {
    classify_variables_with(index, node, &ClassifierConfig::default())
}

pub fn classify_variables_with<I: SymbolIndex + ?Sized>(
    index: &I,
    node: &Node,
    config: &ClassifierConfig,
) -> Result<VariableAccesses, ClassifyError> {
    if config.require_complete_index && !index.is_indexing_complete() {
        tracing::debug!("indexing incomplete, skipping variable classification");
        return Ok(VariableAccesses::default());
    }

    let mut walker = VariableWalker::default();
    node.walk(&mut walker);
    walker.finish()
}

#[derive(Debug, Clone, Copy)]
struct VariableContext<'a> {
    parent: &'a Node,
    key: ChildKey,
    is_write: bool,
}

#[derive(Debug, Default)]
struct VariableWalker<'a> {
    reads: BTreeSet<String>,
    writes: BTreeSet<String>,
    stack: Vec<VariableContext<'a>>,
    error: Option<ClassifyError>,
}

impl<'a> VariableWalker<'a> {
    fn is_write(&self) -> bool {
        self.stack.last().is_some_and(|ctx| ctx.is_write)
    }

    fn push(&mut self, parent: &'a Node, key: ChildKey, is_write: bool) {
        self.stack.push(VariableContext {
            parent,
            key,
            is_write,
        });
    }

    fn pop_if(&mut self, parent: &'a Node, key: ChildKey) {
        if let Some(ctx) = self.stack.last()
            && std::ptr::eq(ctx.parent, parent)
            && ctx.key == key
        {
            self.stack.pop();
        }
    }

    fn finish(self) -> Result<VariableAccesses, ClassifyError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(VariableAccesses {
            reads: self.reads.into_iter().collect(),
            writes: self.writes.into_iter().collect(),
        })
    }
}

impl<'a> Visitor<'a> for VariableWalker<'a> {
    fn enter_node(&mut self, node: &'a Node) -> bool {
        if self.error.is_some() {
            return false;
        }

        match node {
            Node::Identifier(name) => {
                if let Some(ctx) = self.stack.last()
                    && matches!(ctx.parent, Node::Variable { .. })
                {
                    if ctx.is_write {
                        self.writes.insert(name.clone());
                    } else {
                        self.reads.insert(name.clone());
                    }
                }
                true
            }
            Node::Parameter { .. } | Node::PropertyDecl { .. } => false,
            _ => true,
        }
    }

    fn enter_child_node(&mut self, key: ChildKey, parent: &'a Node) {
        if self.error.is_some() {
            return;
        }

        match parent {
            Node::Assign { .. } => self.push(parent, key, key == ChildKey::Variable),
            Node::PropertyFetch { .. } | Node::StaticPropertyFetch { .. }
                if key == ChildKey::Property =>
            {
                self.push(parent, key, false)
            }
            Node::MethodCall { .. } | Node::StaticCall { .. } if key == ChildKey::Method => {
                self.push(parent, key, false)
            }
            Node::ArrayDimFetch { .. } if key == ChildKey::Dim => self.push(parent, key, false),
            Node::ArrayItem { .. } if key == ChildKey::Key => self.push(parent, key, false),
            Node::Variable { name } => {
                if key != ChildKey::VarName {
                    self.error = Some(ClassifyError::UnexpectedChild { key });
                    return;
                }
                let is_write = match &**name {
                    Node::Identifier(_) => self.is_write(),
                    _ => false,
                };
                self.push(parent, key, is_write);
            }
            _ => {}
        }
    }

    fn leave_child_node(&mut self, key: ChildKey, parent: &'a Node) {
        self.pop_if(parent, key);
    }

    fn enter_child_list(&mut self, key: ChildKey, parent: &'a Node) {
        if key == ChildKey::Arguments && self.error.is_none() {
            self.push(parent, key, false);
        }
    }

    fn leave_child_list(&mut self, key: ChildKey, parent: &'a Node) {
        self.pop_if(parent, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A driver that hands a variable node a child under the wrong role.
    #[test]
    fn test_unexpected_variable_child_is_an_error() {
        let variable = Node::var("a");
        let mut walker = VariableWalker::default();
        walker.enter_child_node(ChildKey::Dim, &variable);

        assert_eq!(
            walker.finish(),
            Err(ClassifyError::UnexpectedChild { key: ChildKey::Dim })
        );
    }

    #[test]
    fn test_classification_stops_after_an_error() {
        let variable = Node::var("a");
        let tree = Node::assign(Node::var("x"), Node::var("y"));
        let mut walker = VariableWalker::default();
        walker.enter_child_node(ChildKey::Expr, &variable);
        tree.walk(&mut walker);

        assert!(walker.reads.is_empty());
        assert!(walker.writes.is_empty());
    }
}

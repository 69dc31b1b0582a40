//! Pre/post-order traversal of a [`Node`] tree.
//!
//! For each node the driver calls [`Visitor::enter_node`]; when that
//! returns `false` the node's children are skipped and `leave_node` is not
//! called.  Single children are bracketed by `enter_child_node` /
//! `leave_child_node`, child lists by `enter_child_list` /
//! `leave_child_list`; both receive the *parent* node and the child's
//! [`ChildKey`].
use super::{ChildKey, Node};

/// Callbacks invoked by [`Node::walk`].  All default to no-ops.
pub trait Visitor<'a> {
    fn enter_node(&mut self, _node: &'a Node) -> bool {
        true
    }

    fn leave_node(&mut self, _node: &'a Node) {}

    fn enter_child_node(&mut self, _key: ChildKey, _parent: &'a Node) {}

    fn leave_child_node(&mut self, _key: ChildKey, _parent: &'a Node) {}

    fn enter_child_list(&mut self, _key: ChildKey, _parent: &'a Node) {}

    fn leave_child_list(&mut self, _key: ChildKey, _parent: &'a Node) {}
}

impl Node {
    /// Walk this subtree, reporting every node and child role to `v`.
    pub fn walk<'a, V: Visitor<'a> + ?Sized>(&'a self, v: &mut V) {
        if !v.enter_node(self) {
            return;
        }

        match self {
            Node::Identifier(_) | Node::Name(_) | Node::Scalar(_) => {}
            Node::Variable { name } => self.walk_child(v, ChildKey::VarName, name),
            Node::Assign { variable, expr, .. } => {
                self.walk_child(v, ChildKey::Variable, variable);
                self.walk_child(v, ChildKey::Expr, expr);
            }
            Node::List { items } | Node::Array { items } => {
                self.walk_list(v, ChildKey::Items, items);
            }
            Node::ArrayItem { key, value } => {
                self.walk_optional(v, ChildKey::Key, key);
                self.walk_optional(v, ChildKey::Value, value);
            }
            Node::ArrayDimFetch { variable, dim } => {
                self.walk_child(v, ChildKey::Variable, variable);
                self.walk_optional(v, ChildKey::Dim, dim);
            }
            Node::PropertyFetch { variable, property } => {
                self.walk_child(v, ChildKey::Variable, variable);
                self.walk_child(v, ChildKey::Property, property);
            }
            Node::StaticPropertyFetch { class, property } => {
                self.walk_child(v, ChildKey::Class, class);
                self.walk_child(v, ChildKey::Property, property);
            }
            Node::FunctionCall {
                function,
                arguments,
            } => {
                self.walk_child(v, ChildKey::Function, function);
                self.walk_list(v, ChildKey::Arguments, arguments);
            }
            Node::MethodCall {
                variable,
                method,
                arguments,
            } => {
                self.walk_child(v, ChildKey::Variable, variable);
                self.walk_child(v, ChildKey::Method, method);
                self.walk_list(v, ChildKey::Arguments, arguments);
            }
            Node::StaticCall {
                class,
                method,
                arguments,
            } => {
                self.walk_child(v, ChildKey::Class, class);
                self.walk_child(v, ChildKey::Method, method);
                self.walk_list(v, ChildKey::Arguments, arguments);
            }
            Node::BinaryOp { left, right, .. } => {
                self.walk_child(v, ChildKey::Left, left);
                self.walk_child(v, ChildKey::Right, right);
            }
            Node::Parameter { variable, default } | Node::PropertyDecl { variable, default } => {
                self.walk_child(v, ChildKey::Variable, variable);
                self.walk_optional(v, ChildKey::Default, default);
            }
            Node::ExpressionStmt { expr } => self.walk_child(v, ChildKey::Expr, expr),
            Node::Return { expr } => self.walk_optional(v, ChildKey::Expr, expr),
            Node::Echo { exprs } => self.walk_list(v, ChildKey::Exprs, exprs),
            Node::StmtList { stmts } => self.walk_list(v, ChildKey::Stmts, stmts),
        }

        v.leave_node(self);
    }

    fn walk_child<'a, V: Visitor<'a> + ?Sized>(
        &'a self,
        v: &mut V,
        key: ChildKey,
        child: &'a Node,
    ) {
        v.enter_child_node(key, self);
        child.walk(v);
        v.leave_child_node(key, self);
    }

    fn walk_optional<'a, V: Visitor<'a> + ?Sized>(
        &'a self,
        v: &mut V,
        key: ChildKey,
        child: &'a Option<Box<Node>>,
    ) {
        if let Some(child) = child {
            self.walk_child(v, key, child);
        }
    }

    fn walk_list<'a, V: Visitor<'a> + ?Sized>(
        &'a self,
        v: &mut V,
        key: ChildKey,
        children: &'a [Node],
    ) {
        v.enter_child_list(key, self);
        for child in children {
            child.walk(v);
        }
        v.leave_child_list(key, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the callbacks as readable strings.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl<'a> Visitor<'a> for Trace {
        fn enter_node(&mut self, node: &'a Node) -> bool {
            let label = match node {
                Node::Identifier(name) => format!("ident {name}"),
                Node::Variable { .. } => "variable".to_string(),
                Node::Assign { .. } => "assign".to_string(),
                Node::Parameter { .. } => return false,
                _ => "other".to_string(),
            };
            self.0.push(label);
            true
        }

        fn enter_child_node(&mut self, key: ChildKey, _parent: &'a Node) {
            self.0.push(format!("> {key}"));
        }

        fn leave_child_node(&mut self, key: ChildKey, _parent: &'a Node) {
            self.0.push(format!("< {key}"));
        }
    }

    #[test]
    fn test_walk_reports_roles_in_order() {
        let tree = Node::assign(Node::var("a"), Node::var("b"));
        let mut trace = Trace::default();
        tree.walk(&mut trace);

        assert_eq!(
            trace.0,
            vec![
                "assign",
                "> Variable",
                "variable",
                "> VarName",
                "ident a",
                "< VarName",
                "< Variable",
                "> Expr",
                "variable",
                "> VarName",
                "ident b",
                "< VarName",
                "< Expr",
            ]
        );
    }

    #[test]
    fn test_enter_node_false_skips_children() {
        let tree = Node::param("x", Some(Node::var("y")));
        let mut trace = Trace::default();
        tree.walk(&mut trace);
        assert!(trace.0.is_empty());
    }
}

//! A minimal PHP expression/statement tree.
//!
//! This is the shape the variable classifier walks: enough of PHP's
//! expression grammar to express assignments, destructuring, variable
//! variables, member and index access, calls, and the declarations whose
//! identifiers are *not* variable occurrences.  Producing it from source
//! text is the parser's job; the builders below exist so callers (and
//! tests) can assemble trees directly.
//!
//! Every child sits under a [`ChildKey`] naming its structural role, and
//! [`Node::walk`] (in [`walk`]) reports those roles to a [`Visitor`].

mod walk;

pub use walk::Visitor;

use std::fmt;

/// The structural role of a child node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKey {
    /// Assignment target, fetched array/object, or call receiver.
    Variable,
    /// Assignment value, statement expression, or returned value.
    Expr,
    /// The name of a variable node (`a` in `$a`, `$a` in `$$a`).
    VarName,
    /// Property name of a property fetch.
    Property,
    /// Index of an array-dimension fetch.
    Dim,
    /// Items of a list or array literal.
    Items,
    /// Key of an array item.
    Key,
    /// Value of an array item.
    Value,
    /// Class of a static access.
    Class,
    /// Callee of a function call.
    Function,
    /// Method name of a method or static call.
    Method,
    /// Call arguments.
    Arguments,
    Left,
    Right,
    /// Default value of a parameter or property declaration.
    Default,
    /// Statements of a statement list.
    Stmts,
    /// Expressions of an `echo`.
    Exprs,
}

impl ChildKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ChildKey::Variable => "Variable",
            ChildKey::Expr => "Expr",
            ChildKey::VarName => "VarName",
            ChildKey::Property => "Property",
            ChildKey::Dim => "Dim",
            ChildKey::Items => "Items",
            ChildKey::Key => "Key",
            ChildKey::Value => "Value",
            ChildKey::Class => "Class",
            ChildKey::Function => "Function",
            ChildKey::Method => "Method",
            ChildKey::Arguments => "Arguments",
            ChildKey::Left => "Left",
            ChildKey::Right => "Right",
            ChildKey::Default => "Default",
            ChildKey::Stmts => "Stmts",
            ChildKey::Exprs => "Exprs",
        }
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment operators.  All of them make their left-hand side a write
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `=&`
    Reference,
    /// `+=`, `.=`, `??=`, ...
    Compound,
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A bare identifier token (a variable's name, a property name, ...).
    Identifier(String),
    /// A class, function or constant name.
    Name(String),
    /// A literal value, kept as source text.
    Scalar(String),
    /// `$name`; `name` is an [`Node::Identifier`] for plain variables and
    /// any other expression for variable variables (`$$x`, `${expr}`).
    Variable { name: Box<Node> },
    /// `variable = expr` and its compound forms.
    Assign {
        op: AssignOp,
        variable: Box<Node>,
        expr: Box<Node>,
    },
    /// `list(...)`, or a short `[...]` used as an assignment target.
    List { items: Vec<Node> },
    /// An array literal.
    Array { items: Vec<Node> },
    /// One entry of a list or array; `value` is `None` for skipped list
    /// slots (`list(, $b)`).
    ArrayItem {
        key: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },
    /// `variable[dim]`, or `variable[]` when `dim` is `None`.
    ArrayDimFetch {
        variable: Box<Node>,
        dim: Option<Box<Node>>,
    },
    /// `variable->property`.
    PropertyFetch {
        variable: Box<Node>,
        property: Box<Node>,
    },
    /// `Class::$property`.
    StaticPropertyFetch {
        class: Box<Node>,
        property: Box<Node>,
    },
    /// `function(arguments)`.
    FunctionCall {
        function: Box<Node>,
        arguments: Vec<Node>,
    },
    /// `variable->method(arguments)`.
    MethodCall {
        variable: Box<Node>,
        method: Box<Node>,
        arguments: Vec<Node>,
    },
    /// `Class::method(arguments)`.
    StaticCall {
        class: Box<Node>,
        method: Box<Node>,
        arguments: Vec<Node>,
    },
    /// `left op right`.
    BinaryOp {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// A function/method parameter declaration.
    Parameter {
        variable: Box<Node>,
        default: Option<Box<Node>>,
    },
    /// A class property declaration.
    PropertyDecl {
        variable: Box<Node>,
        default: Option<Box<Node>>,
    },
    /// `expr;`
    ExpressionStmt { expr: Box<Node> },
    /// `return expr;`
    Return { expr: Option<Box<Node>> },
    /// `echo a, b;`
    Echo { exprs: Vec<Node> },
    /// A sequence of statements.
    StmtList { stmts: Vec<Node> },
}

// ─── Builders ───────────────────────────────────────────────────────────────

impl Node {
    pub fn ident(name: impl Into<String>) -> Node {
        Node::Identifier(name.into())
    }

    pub fn name(name: impl Into<String>) -> Node {
        Node::Name(name.into())
    }

    pub fn scalar(text: impl Into<String>) -> Node {
        Node::Scalar(text.into())
    }

    /// `$name`
    pub fn var(name: impl Into<String>) -> Node {
        Node::Variable {
            name: Box::new(Node::ident(name)),
        }
    }

    /// `$$inner`, `${inner}`
    pub fn var_var(inner: Node) -> Node {
        Node::Variable {
            name: Box::new(inner),
        }
    }

    pub fn assign(variable: Node, expr: Node) -> Node {
        Node::assign_op(AssignOp::Assign, variable, expr)
    }

    pub fn assign_op(op: AssignOp, variable: Node, expr: Node) -> Node {
        Node::Assign {
            op,
            variable: Box::new(variable),
            expr: Box::new(expr),
        }
    }

    pub fn list(items: Vec<Node>) -> Node {
        Node::List { items }
    }

    pub fn array(items: Vec<Node>) -> Node {
        Node::Array { items }
    }

    pub fn item(value: Node) -> Node {
        Node::ArrayItem {
            key: None,
            value: Some(Box::new(value)),
        }
    }

    pub fn keyed_item(key: Node, value: Node) -> Node {
        Node::ArrayItem {
            key: Some(Box::new(key)),
            value: Some(Box::new(value)),
        }
    }

    /// A skipped list slot.
    pub fn empty_item() -> Node {
        Node::ArrayItem {
            key: None,
            value: None,
        }
    }

    pub fn dim(variable: Node, dim: Node) -> Node {
        Node::ArrayDimFetch {
            variable: Box::new(variable),
            dim: Some(Box::new(dim)),
        }
    }

    /// `variable[]`
    pub fn append(variable: Node) -> Node {
        Node::ArrayDimFetch {
            variable: Box::new(variable),
            dim: None,
        }
    }

    /// `variable->property` with a fixed property name.
    pub fn prop(variable: Node, property: impl Into<String>) -> Node {
        Node::PropertyFetch {
            variable: Box::new(variable),
            property: Box::new(Node::ident(property)),
        }
    }

    /// `variable->$property` and other computed property names.
    pub fn dynamic_prop(variable: Node, property: Node) -> Node {
        Node::PropertyFetch {
            variable: Box::new(variable),
            property: Box::new(property),
        }
    }

    pub fn static_prop(class: impl Into<String>, property: impl Into<String>) -> Node {
        Node::StaticPropertyFetch {
            class: Box::new(Node::name(class)),
            property: Box::new(Node::ident(property)),
        }
    }

    pub fn call(function: impl Into<String>, arguments: Vec<Node>) -> Node {
        Node::FunctionCall {
            function: Box::new(Node::name(function)),
            arguments,
        }
    }

    pub fn method_call(variable: Node, method: impl Into<String>, arguments: Vec<Node>) -> Node {
        Node::MethodCall {
            variable: Box::new(variable),
            method: Box::new(Node::ident(method)),
            arguments,
        }
    }

    pub fn static_call(
        class: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Node>,
    ) -> Node {
        Node::StaticCall {
            class: Box::new(Node::name(class)),
            method: Box::new(Node::ident(method)),
            arguments,
        }
    }

    pub fn binary(op: impl Into<String>, left: Node, right: Node) -> Node {
        Node::BinaryOp {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn param(name: impl Into<String>, default: Option<Node>) -> Node {
        Node::Parameter {
            variable: Box::new(Node::var(name)),
            default: default.map(Box::new),
        }
    }

    pub fn property_decl(name: impl Into<String>, default: Option<Node>) -> Node {
        Node::PropertyDecl {
            variable: Box::new(Node::var(name)),
            default: default.map(Box::new),
        }
    }

    /// `expr;`
    pub fn stmt(expr: Node) -> Node {
        Node::ExpressionStmt {
            expr: Box::new(expr),
        }
    }

    pub fn ret(expr: Option<Node>) -> Node {
        Node::Return {
            expr: expr.map(Box::new),
        }
    }

    pub fn echo(exprs: Vec<Node>) -> Node {
        Node::Echo { exprs }
    }

    pub fn stmts(stmts: Vec<Node>) -> Node {
        Node::StmtList { stmts }
    }
}

//! Descriptors stored in the symbol index.
//!
//! This module contains the "model" structs that describe indexed PHP
//! symbols (classes, traits, interfaces, functions, and their members).
//! All data is owned so descriptors can outlive whatever produced them,
//! and every declared type is a symbolic [`TypeSet`] that still needs
//! resolving.
use serde::{Deserialize, Serialize};

use crate::type_expr::TypeSet;

/// A parameter of a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// The parameter name including the `$` prefix (e.g. "$text").
    pub name: String,
    /// Declared (possibly symbolic) type of the parameter.
    #[serde(default, rename = "type")]
    pub type_info: TypeSet,
}

/// A free function or a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// The function name.  Free functions are stored fully-qualified
    /// (e.g. `\App\helper`); methods by their bare name.
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    /// Declared (possibly symbolic) return type.
    #[serde(default)]
    pub return_type: TypeSet,
}

/// A class property (instance or static).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// The property name WITHOUT the `$` prefix (e.g. "name", "age").
    /// This matches PHP access syntax: `$this->name` not `$this->$name`.
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_info: TypeSet,
}

/// A class constant or a global constant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantInfo {
    /// The constant name (e.g. "MAX_SIZE", `\App\VERSION`).
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_info: TypeSet,
}

/// A class, interface, or trait.
///
/// Interfaces are stored alongside classes; traits live in their own
/// table of the index but share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// The fully-qualified name (e.g. `\App\User`).
    pub name: String,
    /// The parent class name from the `extends` clause, if any.
    #[serde(default)]
    pub parent_class: Option<String>,
    /// Traits mixed in with `use`, in declaration order.
    #[serde(default)]
    pub used_traits: Vec<String>,
    /// Interfaces named in this class's `implements` clause.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Interfaces this interface (or class) directly extends.  Interfaces
    /// support multiple inheritance, so this is a list rather than the
    /// single `parent_class`.
    #[serde(default)]
    pub parent_interfaces: Vec<String>,
    /// The methods defined directly in this class.
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    /// The properties defined directly in this class.
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    /// The constants defined directly in this class.
    #[serde(default)]
    pub constants: Vec<ConstantInfo>,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, return_type: TypeSet) -> Self {
        FunctionInfo {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
        }
    }

    /// Append a parameter (builder style).
    pub fn with_parameter(mut self, name: impl Into<String>, type_info: TypeSet) -> Self {
        self.parameters.push(ParameterInfo {
            name: name.into(),
            type_info,
        });
        self
    }
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        ClassInfo {
            name: name.into(),
            ..Default::default()
        }
    }

    // ─── Builders ───────────────────────────────────────────────────────────

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent_class = Some(parent.into());
        self
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn extending_interface(mut self, interface: impl Into<String>) -> Self {
        self.parent_interfaces.push(interface.into());
        self
    }

    pub fn using_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.used_traits.push(trait_name.into());
        self
    }

    pub fn with_method(mut self, method: FunctionInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, type_info: TypeSet) -> Self {
        self.properties.push(PropertyInfo {
            name: name.into(),
            type_info,
        });
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>, type_info: TypeSet) -> Self {
        self.constants.push(ConstantInfo {
            name: name.into(),
            type_info,
        });
        self
    }

    // ─── Own-member lookup ──────────────────────────────────────────────────

    /// Look up a method declared directly on this class.
    pub fn method(&self, name: &str) -> Option<&FunctionInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Look up a property declared directly on this class.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a constant declared directly on this class.
    pub fn constant(&self, name: &str) -> Option<&ConstantInfo> {
        self.constants.iter().find(|c| c.name == name)
    }
}

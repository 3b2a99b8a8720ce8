//! Abstract Syntax Tree definitions for `.rep` interface files
//!
//! The tree is flat: an [`Ast`] owns its classes, PODs, enum-use directives and
//! passthrough lines by value, in source order. Nothing is shared and there are no
//! back-references, so the whole tree is cheap to clone and compare.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Properties
// ============================================================================

/// Access qualifier on a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Modifier {
    #[default]
    ReadWrite,
    ReadOnly,
    Constant,
}

impl Modifier {
    /// Map a trailing flag keyword (`READONLY`, `CONSTANT`) to its modifier.
    ///
    /// Matching is exact and case-sensitive. `ReadWrite` has no keyword and is only
    /// ever produced by omitting the flag.
    pub fn from_flag(flag: &str) -> Option<Modifier> {
        match flag {
            "READONLY" => Some(Modifier::ReadOnly),
            "CONSTANT" => Some(Modifier::Constant),
            _ => None,
        }
    }

    /// The keyword spelling of this modifier, if it has one.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Modifier::ReadWrite => None,
            Modifier::ReadOnly => Some("READONLY"),
            Modifier::Constant => Some("CONSTANT"),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("READWRITE"))
    }
}

/// A `PROP(...)` declaration inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Property {
    /// Raw type expression, e.g. `int` or `QMap<QString, int>`.
    pub type_name: String,
    pub name: String,
    /// Empty when the declaration carries no `= value`.
    pub default_value: String,
    pub modifier: Modifier,
}

impl Property {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        default_value: impl Into<String>,
        modifier: Modifier,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            default_value: default_value.into(),
            modifier,
        }
    }

    pub fn has_default(&self) -> bool {
        !self.default_value.is_empty()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)?;
        if self.has_default() {
            write!(f, " = {}", self.default_value)?;
        }
        if let Some(keyword) = self.modifier.keyword() {
            write!(f, " {}", keyword)?;
        }
        Ok(())
    }
}

// ============================================================================
// Plain-old-data declarations
// ============================================================================

/// One `(type, name)` member of a POD.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PodAttribute {
    pub type_name: String,
    pub name: String,
}

impl PodAttribute {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A `POD Name(type a, type b)` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pod {
    pub name: String,
    pub attributes: Vec<PodAttribute>,
}

impl fmt::Display for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POD {}(", self.name)?;
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", attr.type_name, attr.name)?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// Classes
// ============================================================================

/// A `class Name { ... }` block.
///
/// Signals and slots are kept as the raw signature text found between the
/// parentheses; interpreting them is left to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Class {
    pub name: String,
    pub properties: Vec<Property>,
    pub signals: Vec<String>,
    pub slots: Vec<String>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A class is valid once it has a name. Nameless classes can still reach the
    /// AST when a block end appears without a preceding header.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// True when nothing has been declared inside the class yet.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.signals.is_empty() && self.slots.is_empty()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            writeln!(f, "class {} {{", self.name)?;
        } else {
            writeln!(f, "class <unnamed> {{")?;
        }
        for prop in &self.properties {
            writeln!(f, "    PROP({})", prop)?;
        }
        for signal in &self.signals {
            writeln!(f, "    SIGNAL({})", signal)?;
        }
        for slot in &self.slots {
            writeln!(f, "    SLOT({})", slot)?;
        }
        f.write_str("}")
    }
}

// ============================================================================
// Top-level tree
// ============================================================================

/// Everything recognized in one `.rep` source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ast {
    pub classes: Vec<Class>,
    pub pods: Vec<Pod>,
    /// Names given to `USE_ENUM(...)`.
    pub enum_uses: Vec<String>,
    /// Unrecognized non-empty lines, verbatim (typically `#include` directives).
    pub includes: Vec<String>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.pods.is_empty() && self.enum_uses.is_empty() && self.includes.is_empty()
    }

    /// First class with the given name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// First POD with the given name.
    pub fn pod(&self, name: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.name == name)
    }
}

/// Line-oriented dump: includes, enum uses, PODs, then classes.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for include in &self.includes {
            writeln!(f, "include: {}", include)?;
        }
        for name in &self.enum_uses {
            writeln!(f, "USE_ENUM({})", name)?;
        }
        for pod in &self.pods {
            writeln!(f, "{}", pod)?;
        }
        for class in &self.classes {
            writeln!(f, "{}", class)?;
        }
        Ok(())
    }
}

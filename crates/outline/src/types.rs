use serde::{Deserialize, Serialize};

/// One node of the outline tree
///
/// The wire shape matches what editor integrations expect: camelCase keys,
/// the kind under a `type` key, `receiverType` only on methods, and
/// `children` omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Display name: identifier, quoted import path, or package name
    pub label: String,

    /// Declaration kind, serialized under the `type` key
    #[serde(rename = "type")]
    pub kind: DeclarationKind,

    /// Rendered receiver type for methods, absent otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<String>,

    /// 1-based byte offset of the first byte of the declaration
    pub start: usize,

    /// 1-based byte offset one past the last byte of the declaration
    pub end: usize,

    /// Nested declarations, in source order; non-empty only on the root
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Declaration>,
}

impl Declaration {
    /// Create a leaf declaration with no receiver and no children
    #[must_use]
    pub fn new(label: impl Into<String>, kind: DeclarationKind, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            kind,
            receiver_type: None,
            start,
            end,
            children: Vec::new(),
        }
    }

    /// Builder: set the receiver type
    #[must_use]
    pub fn with_receiver(mut self, receiver_type: impl Into<String>) -> Self {
        self.receiver_type = Some(receiver_type.into());
        self
    }

    /// Builder: set the children
    #[must_use]
    pub fn with_children(mut self, children: Vec<Declaration>) -> Self {
        self.children = children;
        self
    }

    /// Check whether this is a method (a function with a receiver)
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.kind == DeclarationKind::Function && self.receiver_type.is_some()
    }
}

/// The closed set of declaration kinds an outline can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// The file's package clause; always the root node
    Package,
    /// One imported path
    Import,
    /// One declared or aliased type
    Type,
    /// A function or method
    Function,
    /// One declared variable identifier
    Variable,
    /// One declared constant identifier
    Constant,
}

impl DeclarationKind {
    /// Get the wire name of this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Import => "import",
            Self::Type => "type",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Constant => "constant",
        }
    }
}

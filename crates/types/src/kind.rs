//! Type tags shared by the mapping compiler and the transformation engine.

use std::fmt;

/// The declared output type of a mapping rule's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Constant,
    String,
    Integer,
    Float,
    Boolean,
    ListOfString,
    ListOfInteger,
    ListOfFloat,
    ListOfBoolean,
    Dict,
}

impl ValueKind {
    /// Looks up the kind for a mapping-file type tag such as `list:integer`.
    /// Returns `None` for tags that are not part of the vocabulary.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "string" => ValueKind::String,
            "constant" => ValueKind::Constant,
            "integer" => ValueKind::Integer,
            "float" => ValueKind::Float,
            "boolean" => ValueKind::Boolean,
            "list:string" => ValueKind::ListOfString,
            "list:integer" => ValueKind::ListOfInteger,
            "list:float" => ValueKind::ListOfFloat,
            "list:boolean" => ValueKind::ListOfBoolean,
            "dict" => ValueKind::Dict,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            ValueKind::Constant => "constant",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::ListOfString => "list:string",
            ValueKind::ListOfInteger => "list:integer",
            ValueKind::ListOfFloat => "list:float",
            ValueKind::ListOfBoolean => "list:boolean",
            ValueKind::Dict => "dict",
        }
    }

    /// The element type of a list kind, or the kind itself for a single scalar.
    pub fn scalar(self) -> Option<ScalarKind> {
        match self {
            ValueKind::String | ValueKind::ListOfString => Some(ScalarKind::String),
            ValueKind::Integer | ValueKind::ListOfInteger => Some(ScalarKind::Integer),
            ValueKind::Float | ValueKind::ListOfFloat => Some(ScalarKind::Float),
            ValueKind::Boolean | ValueKind::ListOfBoolean => Some(ScalarKind::Boolean),
            ValueKind::Constant | ValueKind::Dict => None,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            ValueKind::ListOfString
                | ValueKind::ListOfInteger
                | ValueKind::ListOfFloat
                | ValueKind::ListOfBoolean
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// How a rule's dictionary key is derived. Keys always end up as strings;
/// every kind other than `Constant` reads the key from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Constant,
    String,
    Integer,
    Float,
}

impl KeyKind {
    /// Narrows a value kind to a key kind. List, boolean and dict kinds cannot name a key.
    pub fn from_value_kind(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::Constant => Some(KeyKind::Constant),
            ValueKind::String => Some(KeyKind::String),
            ValueKind::Integer => Some(KeyKind::Integer),
            ValueKind::Float => Some(KeyKind::Float),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            KeyKind::Constant => "constant",
            KeyKind::String => "string",
            KeyKind::Integer => "integer",
            KeyKind::Float => "float",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// The scalar type a node's text content is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl ScalarKind {
    pub fn value_kind(self) -> ValueKind {
        match self {
            ScalarKind::String => ValueKind::String,
            ScalarKind::Integer => ValueKind::Integer,
            ScalarKind::Float => ValueKind::Float,
            ScalarKind::Boolean => ValueKind::Boolean,
        }
    }

    pub fn list_kind(self) -> ValueKind {
        match self {
            ScalarKind::String => ValueKind::ListOfString,
            ScalarKind::Integer => ValueKind::ListOfInteger,
            ScalarKind::Float => ValueKind::ListOfFloat,
            ScalarKind::Boolean => ValueKind::ListOfBoolean,
        }
    }
}

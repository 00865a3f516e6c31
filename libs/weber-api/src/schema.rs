use std::fmt;

use serde::{Deserialize, Serialize};

/// Dispatch category of a type.
///
/// Resolution looks only at kinds, never at concrete type identity —
/// except `Ptr` (element descriptor is resolved recursively) and `Dynamic`
/// (capability membership is queried on the interface descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Ptr,
    Dynamic,
    Struct,
    List,
    Map,
    /// Absent value. Sources of this kind zero their destination.
    Null,
}

/// Storage width of an integer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

/// Storage width of a floating-point slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatWidth {
    W32,
    W64,
}

impl FloatWidth {
    pub fn bits(self) -> u32 {
        match self {
            FloatWidth::W32 => 32,
            FloatWidth::W64 => 64,
        }
    }
}

/// Type descriptor — the explicit stand-in for runtime type information.
///
/// Config layers declare these textually (serde), the engine consults them
/// at resolution time only. `Struct`, `List` and `Map` are extension
/// points: they can be described and carried in schemas, but no conversion
/// rule targets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDesc {
    Bool,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Str,
    /// Single indirection. The element type is resolved recursively.
    Ptr(Box<TypeDesc>),
    /// Capability-checked passthrough destination.
    Dynamic(InterfaceDesc),
    /// Named nominal type. Never decodable here.
    Struct(String),
    List(Box<TypeDesc>),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    /// The absent-source marker.
    Null,
}

impl TypeDesc {
    pub fn kind(&self) -> Kind {
        match self {
            TypeDesc::Bool => Kind::Bool,
            TypeDesc::Int(_) => Kind::Int,
            TypeDesc::Uint(_) => Kind::Uint,
            TypeDesc::Float(_) => Kind::Float,
            TypeDesc::Str => Kind::Str,
            TypeDesc::Ptr(_) => Kind::Ptr,
            TypeDesc::Dynamic(_) => Kind::Dynamic,
            TypeDesc::Struct(_) => Kind::Struct,
            TypeDesc::List(_) => Kind::List,
            TypeDesc::Map(_, _) => Kind::Map,
            TypeDesc::Null => Kind::Null,
        }
    }

    pub fn ptr(elem: TypeDesc) -> Self {
        TypeDesc::Ptr(Box::new(elem))
    }

    pub fn list(elem: TypeDesc) -> Self {
        TypeDesc::List(Box::new(elem))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Bool => write!(f, "bool"),
            TypeDesc::Int(w) => write!(f, "i{}", w.bits()),
            TypeDesc::Uint(w) => write!(f, "u{}", w.bits()),
            TypeDesc::Float(w) => write!(f, "f{}", w.bits()),
            TypeDesc::Str => write!(f, "string"),
            TypeDesc::Ptr(elem) => write!(f, "*{elem}"),
            TypeDesc::Dynamic(iface) => write!(f, "dyn {}", iface.name),
            TypeDesc::Struct(name) => write!(f, "struct {name}"),
            TypeDesc::List(elem) => write!(f, "list<{elem}>"),
            TypeDesc::Map(k, v) => write!(f, "map<{k}, {v}>"),
            TypeDesc::Null => write!(f, "null"),
        }
    }
}

/// Capability set for a dynamic destination.
///
/// Stands in for an interface-implementation query: the surrounding
/// framework declares which kinds satisfy the destination, and the
/// resolver checks membership instead of reflecting on the source type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceDesc {
    pub name: String,
    /// Kinds this destination accepts. Empty = no constraint (any kind),
    /// mirroring an interface with an empty method set.
    #[serde(default)]
    pub accepts: Vec<Kind>,
}

impl InterfaceDesc {
    pub fn new(name: impl Into<String>, accepts: Vec<Kind>) -> Self {
        Self {
            name: name.into(),
            accepts,
        }
    }

    /// Unconstrained capability set — admits every source kind.
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepts: Vec::new(),
        }
    }

    /// Does a source of this type satisfy the capability set?
    pub fn admits(&self, src: &TypeDesc) -> bool {
        self.accepts.is_empty() || self.accepts.contains(&src.kind())
    }
}

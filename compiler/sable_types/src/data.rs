//! Type representation.

use sable_ir::{SymbolId, TypeId};

use crate::TypeFlags;

/// Implicit-length marker for array types (`[..]T`); the real length is
/// derived from the initial value by a fuller checker.
pub const IMPLICIT_LENGTH: i64 = -1;

/// A type in the universe.
///
/// Immutable once constructed. Width and alignment are in bits. Structural
/// kinds (pointer, slice, array, function) are canonicalized by the
/// universe, so for those a `TypeId` comparison is a structural equality
/// check; struct, union and alias identity is nominal.
#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub width: u32,
    pub align: u32,
    pub flags: TypeFlags,
}

/// Kind tag plus kind-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    Invalid,
    Void,
    Bool,
    Int,
    Float,
    Pointer {
        pointee: TypeId,
    },
    Array {
        /// Element count, or [`IMPLICIT_LENGTH`].
        length: i64,
        element: TypeId,
    },
    Slice {
        element: TypeId,
    },
    Any,
    Struct {
        members: Box<[TypeId]>,
    },
    Union {
        cases: Box<[TypeId]>,
    },
    Metatype {
        instance: TypeId,
    },
    Alias {
        /// The declaring symbol; anchors nominal identity.
        symbol: SymbolId,
        /// The target type. Fixed at construction, so alias chains always
        /// reach a non-alias kind.
        aliased: TypeId,
    },
    Function {
        params: Box<[TypeId]>,
        results: Box<[TypeId]>,
    },
}

impl TypeKind {
    /// Human-readable kind name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            TypeKind::Invalid => "invalid",
            TypeKind::Void => "void",
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Pointer { .. } => "pointer",
            TypeKind::Array { .. } => "array",
            TypeKind::Slice { .. } => "slice",
            TypeKind::Any => "any",
            TypeKind::Struct { .. } => "struct",
            TypeKind::Union { .. } => "union",
            TypeKind::Metatype { .. } => "meta",
            TypeKind::Alias { .. } => "alias",
            TypeKind::Function { .. } => "function",
        }
    }
}

impl Type {
    /// Construct with no payload-derived metrics.
    pub const fn new(kind: TypeKind, width: u32, align: u32, flags: TypeFlags) -> Self {
        Type {
            kind,
            width,
            align,
            flags,
        }
    }
}

//! Top-level declaration statements and expressions.
//!
//! These are produced by the parser collaborator. Every node carries a
//! stable [`NodeId`] assigned at parse time; the checker indexes its
//! annotation table by these ids, so they must be dense and unique within
//! a package.

use std::fmt;

use crate::{Name, Position};

/// Stable per-package syntax node id.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the annotation table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One identifier in a declaration's name list.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclName {
    pub id: NodeId,
    pub pos: Position,
    pub name: Name,
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub pos: Position,
    pub kind: ExprKind,
}

/// Parameter and result type expressions of a function literal or type.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSignature {
    /// Parameter type expressions.
    pub params: Box<[Expr]>,
    /// Result type expressions.
    pub results: Box<[Expr]>,
}

/// A named field of a struct type expression.
#[derive(Clone, Debug, PartialEq)]
pub struct StructField {
    pub name: Name,
    pub ty: Expr,
}

/// A tagged case of a union type expression.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionCase {
    pub name: Name,
    pub ty: Expr,
}

/// Expression kinds understood by the semantic core.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// An identifier reference.
    Ident(Name),
    /// An integer literal.
    LitInt(u64),
    /// A floating-point literal.
    LitFloat(f64),
    /// A function literal. The body is checked by a later pass; this core
    /// only resolves the signature.
    LitFunction { signature: FunctionSignature },
    /// A function type expression.
    TypeFunction(FunctionSignature),
    /// A struct type expression.
    TypeStruct(Box<[StructField]>),
    /// A union type expression.
    TypeUnion(Box<[UnionCase]>),
    /// A pointer type expression (`*T`).
    TypePointer { pointee: Box<Expr> },
    /// A slice type expression (`[]T`).
    TypeSlice { element: Box<Expr> },
    /// An array type expression (`[N]T`, or `[..]T` when `length` is absent).
    TypeArray {
        length: Option<Box<Expr>>,
        element: Box<Expr>,
    },
}

impl Expr {
    /// Short description of the expression kind for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self.kind {
            ExprKind::Ident(_) => "identifier",
            ExprKind::LitInt(_) => "integer literal",
            ExprKind::LitFloat(_) => "float literal",
            ExprKind::LitFunction { .. } => "function literal",
            ExprKind::TypeFunction(_) => "function type",
            ExprKind::TypeStruct(_) => "struct type",
            ExprKind::TypeUnion(_) => "union type",
            ExprKind::TypePointer { .. } => "pointer type",
            ExprKind::TypeSlice { .. } => "slice type",
            ExprKind::TypeArray { .. } => "array type",
        }
    }
}

/// A top-level declaration statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Decl {
    pub id: NodeId,
    pub pos: Position,
    pub kind: DeclKind,
}

/// Declaration kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclKind {
    /// `NAME :: value` or `NAME : type : value`
    Constant {
        names: Box<[DeclName]>,
        ty: Option<Box<Expr>>,
        values: Box<[Expr]>,
    },
    /// `a, b : type = v1, v2` (type and values each optional, not both absent)
    Variable {
        names: Box<[DeclName]>,
        ty: Option<Box<Expr>>,
        values: Box<[Expr]>,
    },
    /// `#import "path"` — resolved by the package-loading collaborator.
    Import { path: Name },
}

impl Decl {
    /// The declared names, empty for imports.
    pub fn names(&self) -> &[DeclName] {
        match &self.kind {
            DeclKind::Constant { names, .. } | DeclKind::Variable { names, .. } => names,
            DeclKind::Import { .. } => &[],
        }
    }

    /// Short description of the declaration kind for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self.kind {
            DeclKind::Constant { .. } => "constant declaration",
            DeclKind::Variable { .. } => "variable declaration",
            DeclKind::Import { .. } => "import declaration",
        }
    }
}

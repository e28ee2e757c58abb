//! Syntax-tree input types and interned handles for the Sable compiler.
//!
//! The parser (an external collaborator) produces the declaration statements
//! defined here; the semantic core consumes them and indexes its annotation
//! table by their stable [`NodeId`]s.
//!
//! Handles live in this crate, storage lives with the owner:
//! - [`TypeId`] indexes the type pool in `sable_types`
//! - [`SymbolId`] indexes a package's symbol arena in `sable_check`

mod ast;
mod interner;
mod name;
mod position;
mod symbol_id;
mod type_id;
mod val;

pub use ast::{
    Decl, DeclKind, DeclName, Expr, ExprKind, FunctionSignature, NodeId, StructField, UnionCase,
};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use position::Position;
pub use symbol_id::SymbolId;
pub use type_id::TypeId;
pub use val::Val;

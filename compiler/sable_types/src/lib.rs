//! Type universe for the Sable compiler.
//!
//! A [`TypeUniverse`] owns every type of a compilation run: the builtin
//! scalars bootstrapped from target metrics, canonicalized structural
//! types (pointers, slices, arrays, functions) and nominal allocations
//! (structs, unions, aliases). Types are referred to by `TypeId` handles
//! from `sable_ir`, so an id comparison is an identity check and, for
//! structural kinds, a structural equality check.

mod data;
mod flags;
mod metrics;
mod universe;

pub use data::{Type, TypeKind, IMPLICIT_LENGTH};
pub use flags::TypeFlags;
pub use metrics::{target_metrics, Arch, Os, TargetInfo, TargetMetrics, UnsupportedTarget};
pub use universe::{BuiltinTypes, SharedTypeUniverse, TypeError, TypeUniverse};

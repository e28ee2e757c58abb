//! Interned type handle.
//!
//! `TypeId` is the canonical type representation. Types are stored in the
//! `sable_types` pool and referenced by their 32-bit index; for structurally
//! interned kinds (pointer, slice, array, function) handle equality implies
//! structural equality.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The invalid type, pre-interned at pool creation.
    ///
    /// Checking continues with this type after an error to stop cascades.
    pub const INVALID: Self = Self(0);

    /// Create a handle from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the pool.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

// Compile-time size assertion: TypeId must be exactly 4 bytes.
const _: () = assert!(std::mem::size_of::<TypeId>() == 4);

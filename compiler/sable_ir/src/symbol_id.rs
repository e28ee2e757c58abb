//! Symbol handle.

use std::fmt;

/// A 32-bit handle to a symbol.
///
/// The top bit selects the symbol space: builtin symbols live in the shared
/// read-only builtin table, everything else lives in the owning package's
/// symbol arena. The remaining 31 bits are the index within that space.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    const BUILTIN_BIT: u32 = 1 << 31;

    /// Maximum index within either space.
    pub const MAX_INDEX: u32 = Self::BUILTIN_BIT - 1;

    /// Create a handle into a package's symbol arena.
    #[inline]
    pub const fn package(index: u32) -> Self {
        debug_assert!(index <= Self::MAX_INDEX);
        SymbolId(index)
    }

    /// Create a handle into the shared builtin symbol table.
    #[inline]
    pub const fn builtin(index: u32) -> Self {
        debug_assert!(index <= Self::MAX_INDEX);
        SymbolId(index | Self::BUILTIN_BIT)
    }

    /// Check if this handle points into the builtin table.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 & Self::BUILTIN_BIT != 0
    }

    /// Index within the symbol space.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 & !Self::BUILTIN_BIT) as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            write!(f, "SymbolId(builtin {})", self.index())
        } else {
            write!(f, "SymbolId({})", self.index())
        }
    }
}

// Compile-time size assertion: SymbolId must be exactly 4 bytes.
const _: () = assert!(std::mem::size_of::<SymbolId>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_do_not_collide() {
        let pkg = SymbolId::package(7);
        let builtin = SymbolId::builtin(7);
        assert_ne!(pkg, builtin);
        assert_eq!(pkg.index(), builtin.index());
        assert!(builtin.is_builtin());
        assert!(!pkg.is_builtin());
    }
}

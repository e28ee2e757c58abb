//! Type property flags.

use bitflags::bitflags;

bitflags! {
    /// Properties attached to a type at construction time.
    ///
    /// Stored on every [`Type`](crate::Type); never recomputed.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// Signed integer.
        const SIGNED = 1 << 0;
        /// Untyped literal sentinel (`<integer>` / `<float>`); the type is
        /// deferred until a context supplies an expected type.
        const UNTYPED = 1 << 1;
        /// Function that never returns.
        const NO_RETURN = 1 << 2;
    }
}

impl TypeFlags {
    /// Check the signed bit.
    #[inline]
    pub const fn is_signed(self) -> bool {
        self.contains(Self::SIGNED)
    }

    /// Check the untyped-sentinel bit.
    #[inline]
    pub const fn is_untyped(self) -> bool {
        self.contains(Self::UNTYPED)
    }
}

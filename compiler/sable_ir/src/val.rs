//! Constant values.

/// An evaluated constant value.
///
/// Carried on symbols and expression annotations when the expression is
/// constant. `Int` holds the raw 64-bit payload; signedness is a property
/// of the value's type, not the value itself.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Val {
    /// No constant value.
    #[default]
    None,
    /// Integer payload (interpretation depends on the value's type).
    Int(u64),
    /// Floating-point payload.
    Float(f64),
    /// Boolean payload.
    Bool(bool),
}

impl Val {
    /// Check whether a value is present.
    #[inline]
    pub const fn is_some(self) -> bool {
        !matches!(self, Val::None)
    }
}

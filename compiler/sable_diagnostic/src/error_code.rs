//! Error codes for compiler diagnostics.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Each code renders as `E<4-digit>` when error codes are enabled in the
/// diagnostic config. The numeric values are stable; tools key off them, so
/// codes are never renumbered (gaps belong to phases outside this core,
/// such as the lexer's escape-sequence errors).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum ErrorCode {
    /// No individual error code exists for this error currently.
    Todo = 0,
    /// Syntax error.
    Syntax = 12,
    /// Fatal error.
    Fatal = 13,
    /// Redefinition of a symbol within one scope.
    Redefinition = 14,
    /// Defined more than one constant item at a time.
    MultipleConstantDecl = 15,
    /// The amount of declarations doesn't match the amount of values.
    ArityMismatch = 16,
    /// A type was expected but something else was given.
    NotAType = 17,
    /// Use of an undefined identifier.
    UndefinedIdent = 18,
    /// Unable to convert type to target type.
    InvalidConversion = 19,
    /// Implicit-length array was provided without an initial value.
    UninitImplicitArray = 20,
    /// A function type wasn't provided a body.
    UninitFunctionType = 21,
    /// A type is not a valid expression in the provided context.
    TypeNotAnExpression = 22,
    /// Type did not match.
    TypeMismatch = 30,
}

impl ErrorCode {
    /// The stable numeric value rendered in `E<4-digit>` form.
    #[inline]
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.value())
    }
}

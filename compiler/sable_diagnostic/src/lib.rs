//! Diagnostic collection and reporting for the Sable compiler.
//!
//! Recoverable user errors never travel through `Result`: the checker
//! records them here and continues with poisoned symbols or the invalid
//! type. An unresolved dependency is *not* an error — it is a requeue
//! signal handled by the checker's driver.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, DiagnosticConfig, Diagnostics, Note};
pub use error_code::ErrorCode;

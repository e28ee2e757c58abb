//! Semantic checker for the Sable compiler.
//!
//! The checker resolves identifiers to symbols, infers and validates
//! types, and writes a per-node annotation table that is the sole handoff
//! to code generation. Forward references are tolerated without a
//! dependency graph: a statement blocked on an unresolved symbol requeues
//! and is retried once other statements have made progress.
//!
//! Typical driver shape:
//!
//! ```
//! use sable_check::{check_package, Package, QueueResult, Session};
//! use sable_diagnostic::DiagnosticConfig;
//! use sable_types::{Arch, Os};
//!
//! let session = Session::new(Os::Linux, Arch::X86_64).unwrap();
//! let path = session.interner.intern("example");
//! let mut package = Package::new(path, DiagnosticConfig::default());
//!
//! let decls = vec![];
//! assert_eq!(
//!     check_package(&session, &mut package, &decls),
//!     QueueResult::Complete { passes: 0 }
//! );
//! ```

mod builtin;
mod checker;
mod info;
mod package;
mod queue;
mod scope;
mod session;
mod symbol;

pub use builtin::{Builtins, SharedBuiltins};
pub use checker::{CheckOutcome, Checker, ExprMode};
pub use info::{AnnotationTable, CheckerInfo, Coercion};
pub use package::Package;
pub use queue::{check_package, QueueResult};
pub use scope::{ScopeId, Scopes};
pub use session::Session;
pub use symbol::{Symbol, SymbolKind, SymbolState};

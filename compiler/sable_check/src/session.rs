//! The per-run checking context.

use sable_ir::SharedInterner;
use sable_types::{Arch, Os, SharedTypeUniverse, TypeError};

use crate::builtin::SharedBuiltins;

/// Everything shared across all packages of one compilation run: the
/// string interner, the type universe and the builtin symbol table.
///
/// Constructed once at startup and passed by reference; all three members
/// are read-mostly and safe to share across concurrently checked packages.
#[derive(Clone)]
pub struct Session {
    pub interner: SharedInterner,
    pub types: SharedTypeUniverse,
    pub builtins: SharedBuiltins,
}

impl Session {
    /// Bootstrap a session for a target.
    pub fn new(os: Os, arch: Arch) -> Result<Self, TypeError> {
        let interner = SharedInterner::new();
        let types = SharedTypeUniverse::new(os, arch, &interner)?;
        let builtins = SharedBuiltins::new(&types, &interner);
        Ok(Session {
            interner,
            types,
            builtins,
        })
    }
}

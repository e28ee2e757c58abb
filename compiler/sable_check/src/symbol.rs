//! Symbols and their lifecycle.

use sable_ir::{Name, NodeId, Position, TypeId, Val};

/// What a symbol names.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SymbolKind {
    /// Poisoned or not yet classified.
    #[default]
    Invalid,
    Type,
    Package,
    Variable,
    Constant,
}

/// Where a symbol is in its lifecycle.
///
/// Transitions are monotonic: `Unresolved` to `Resolving` to `Resolved`.
/// The only other transition is poisoning, which jumps straight to
/// `Resolved` with kind [`SymbolKind::Invalid`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SymbolState {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
}

/// A named binding with a lifecycle.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Name,
    /// Link name, when it differs from `name`.
    pub external_name: Option<Name>,
    pub kind: SymbolKind,
    pub state: SymbolState,
    /// The declaration that introduced this symbol, if any.
    pub decl: Option<NodeId>,
    /// Position of the declaration, for redefinition notes.
    pub decl_pos: Position,
    pub ty: TypeId,
    /// Evaluated value for constants.
    pub val: Val,
    pub used: bool,
    /// Opaque per-symbol slot reserved for the code generator.
    pub backend_slot: u64,
}

impl Symbol {
    /// A fresh symbol awaiting resolution.
    pub fn unresolved(name: Name, decl: Option<NodeId>, decl_pos: Position) -> Self {
        Symbol {
            name,
            external_name: None,
            kind: SymbolKind::Invalid,
            state: SymbolState::Unresolved,
            decl,
            decl_pos,
            ty: TypeId::INVALID,
            val: Val::None,
            used: false,
            backend_slot: 0,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.state == SymbolState::Resolved
    }

    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.state == SymbolState::Resolved && self.kind == SymbolKind::Invalid
    }

    /// Force the terminal invalid state. Idempotent and silent; the caller
    /// reports whatever diagnostic justified it.
    pub fn poison(&mut self) {
        self.kind = SymbolKind::Invalid;
        self.state = SymbolState::Resolved;
    }

    /// Finalize the symbol with its kind, type and value.
    pub fn resolve(&mut self, kind: SymbolKind, ty: TypeId, val: Val) {
        self.kind = kind;
        self.state = SymbolState::Resolved;
        self.ty = ty;
        self.val = val;
    }
}

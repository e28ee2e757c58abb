//! Lexical scopes.
//!
//! Scopes are arena-owned by their package and never destroyed
//! individually; popping a scope just returns the parent handle, so
//! handles taken into earlier scopes stay valid across later passes.

use rustc_hash::FxHashMap;
use sable_ir::{Name, SymbolId};

/// Handle to a scope in a package's scope arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

struct ScopeData {
    parent: Option<ScopeId>,
    members: FxHashMap<Name, SymbolId>,
}

/// The scope arena of one package.
pub struct Scopes {
    scopes: Vec<ScopeData>,
}

impl Scopes {
    /// Create the arena with its root (global) scope.
    pub fn new() -> (Self, ScopeId) {
        let scopes = Scopes {
            scopes: vec![ScopeData {
                parent: None,
                members: FxHashMap::default(),
            }],
        };
        (scopes, ScopeId(0))
    }

    /// Open a child scope.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or_else(|_| {
            panic!("scope arena exceeded u32::MAX entries");
        }));
        self.scopes.push(ScopeData {
            parent: Some(parent),
            members: FxHashMap::default(),
        });
        id
    }

    /// Close a scope, returning the parent handle. The scope itself stays
    /// allocated.
    ///
    /// # Panics
    /// Panics when called on the root scope.
    pub fn pop(&self, scope: ScopeId) -> ScopeId {
        match self.scopes[scope.index()].parent {
            Some(parent) => parent,
            None => panic!("popped the root scope"),
        }
    }

    /// Bind a name in exactly this scope. The caller is responsible for
    /// redefinition checks via [`Scopes::get_local`].
    pub fn insert(&mut self, scope: ScopeId, name: Name, symbol: SymbolId) {
        self.scopes[scope.index()].members.insert(name, symbol);
    }

    /// Remove a binding from exactly this scope.
    pub fn remove(&mut self, scope: ScopeId, name: Name) {
        self.scopes[scope.index()].members.remove(&name);
    }

    /// Look up a name in exactly this scope, no chain walk.
    pub fn get_local(&self, scope: ScopeId, name: Name) -> Option<SymbolId> {
        self.scopes[scope.index()].members.get(&name).copied()
    }

    /// Look up a name walking the chain outward; first match wins.
    ///
    /// The shared builtin scope is not part of any package arena, so the
    /// caller chains to it when this returns `None`.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.index()];
            if let Some(&symbol) = data.members.get(&name) {
                return Some(symbol);
            }
            current = data.parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::StringInterner;

    #[test]
    fn inner_scope_shadows_outer() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let (mut scopes, global) = Scopes::new();
        let outer_sym = SymbolId::package(0);
        scopes.insert(global, x, outer_sym);

        let inner = scopes.push(global);
        assert_eq!(scopes.lookup(inner, x), Some(outer_sym));

        let inner_sym = SymbolId::package(1);
        scopes.insert(inner, x, inner_sym);
        assert_eq!(scopes.lookup(inner, x), Some(inner_sym));

        // The outer scope is unaffected by the shadow.
        assert_eq!(scopes.lookup(global, x), Some(outer_sym));
        assert_eq!(scopes.pop(inner), global);
        assert_eq!(scopes.lookup(global, x), Some(outer_sym));
    }

    #[test]
    fn lookup_walks_the_chain() {
        let interner = StringInterner::new();
        let y = interner.intern("y");

        let (mut scopes, global) = Scopes::new();
        let sym = SymbolId::package(3);
        scopes.insert(global, y, sym);

        let a = scopes.push(global);
        let b = scopes.push(a);
        assert_eq!(scopes.lookup(b, y), Some(sym));
        assert_eq!(scopes.get_local(b, y), None);
    }
}

//! The shared builtin symbol table.
//!
//! Every package's global scope chains to this table. It is populated once
//! at session startup from the type universe's name registry plus the
//! `true`/`false` constants, and is read-only afterward, which is what
//! makes it safe to share across concurrently checked packages.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sable_ir::{Name, Position, StringInterner, SymbolId, Val};
use sable_types::TypeUniverse;

use crate::symbol::{Symbol, SymbolKind, SymbolState};

/// The builtin symbols, indexed by [`SymbolId`]s with the builtin bit set.
pub struct Builtins {
    symbols: Vec<Symbol>,
    members: FxHashMap<Name, SymbolId>,
    true_symbol: SymbolId,
    false_symbol: SymbolId,
}

impl Builtins {
    /// Build the table from a bootstrapped universe.
    pub fn new(universe: &TypeUniverse, interner: &StringInterner) -> Self {
        let mut symbols = Vec::new();
        let mut members = FxHashMap::default();

        let mut declare = |symbols: &mut Vec<Symbol>, sym: Symbol| -> SymbolId {
            let id = SymbolId::builtin(u32::try_from(symbols.len()).unwrap_or_else(|_| {
                panic!("builtin symbol table exceeded u32::MAX entries");
            }));
            members.insert(sym.name, id);
            symbols.push(sym);
            id
        };

        for &(name, metatype) in universe.builtin_type_names() {
            declare(
                &mut symbols,
                Symbol {
                    name,
                    external_name: None,
                    kind: SymbolKind::Type,
                    state: SymbolState::Resolved,
                    decl: None,
                    decl_pos: Position::BUILTIN,
                    ty: metatype,
                    val: Val::None,
                    used: false,
                    backend_slot: 0,
                },
            );
        }

        let bool_ty = universe.builtins().bool_;
        let mut bool_constant = |symbols: &mut Vec<Symbol>, spelling: &str, value: bool| {
            declare(
                symbols,
                Symbol {
                    name: interner.intern(spelling),
                    external_name: None,
                    kind: SymbolKind::Constant,
                    state: SymbolState::Resolved,
                    decl: None,
                    decl_pos: Position::BUILTIN,
                    ty: bool_ty,
                    val: Val::Bool(value),
                    used: false,
                    backend_slot: 0,
                },
            )
        };

        let true_symbol = bool_constant(&mut symbols, "true", true);
        let false_symbol = bool_constant(&mut symbols, "false", false);

        Builtins {
            symbols,
            members,
            true_symbol,
            false_symbol,
        }
    }

    /// Look up a builtin by name.
    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        self.members.get(&name).copied()
    }

    /// The symbol behind a builtin handle.
    ///
    /// # Panics
    /// Panics if the handle is not in the builtin space.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        debug_assert!(id.is_builtin());
        &self.symbols[id.index()]
    }

    /// Check for the `true`/`false` constants; they are the only constants
    /// whose identifier use is a computed value rather than addressable.
    pub fn is_bool_constant(&self, id: SymbolId) -> bool {
        id == self.true_symbol || id == self.false_symbol
    }
}

/// Shared builtin-table handle for passing across packages and phases.
#[derive(Clone)]
pub struct SharedBuiltins(Arc<Builtins>);

impl SharedBuiltins {
    pub fn new(universe: &TypeUniverse, interner: &StringInterner) -> Self {
        SharedBuiltins(Arc::new(Builtins::new(universe, interner)))
    }
}

impl std::ops::Deref for SharedBuiltins {
    type Target = Builtins;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_types::{Arch, Os};

    #[test]
    fn builtin_names_resolve() {
        let interner = StringInterner::new();
        let universe = TypeUniverse::new(Os::Linux, Arch::X86_64, &interner).unwrap();
        let builtins = Builtins::new(&universe, &interner);

        let id = builtins.lookup(interner.intern("i32")).unwrap();
        let sym = builtins.symbol(id);
        assert_eq!(sym.kind, SymbolKind::Type);
        assert_eq!(
            universe.instance_of(sym.ty),
            Some(universe.builtins().i32)
        );
    }

    #[test]
    fn true_and_false_are_bool_constants() {
        let interner = StringInterner::new();
        let universe = TypeUniverse::new(Os::Linux, Arch::X86_64, &interner).unwrap();
        let builtins = Builtins::new(&universe, &interner);

        let t = builtins.lookup(interner.intern("true")).unwrap();
        let f = builtins.lookup(interner.intern("false")).unwrap();
        assert!(builtins.is_bool_constant(t));
        assert!(builtins.is_bool_constant(f));

        let sym = builtins.symbol(t);
        assert_eq!(sym.kind, SymbolKind::Constant);
        assert_eq!(sym.ty, universe.builtins().bool_);
        assert_eq!(sym.val, Val::Bool(true));
        assert_eq!(builtins.symbol(f).val, Val::Bool(false));
    }

    #[test]
    fn unknown_name_is_absent() {
        let interner = StringInterner::new();
        let universe = TypeUniverse::new(Os::Linux, Arch::X86_64, &interner).unwrap();
        let builtins = Builtins::new(&universe, &interner);
        assert_eq!(builtins.lookup(interner.intern("i128")), None);
    }
}

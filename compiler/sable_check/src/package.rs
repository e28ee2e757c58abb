//! Packages: one unit of compilation.

use rustc_hash::FxHashMap;
use sable_diagnostic::{DiagnosticConfig, Diagnostics, ErrorCode};
use sable_ir::{Decl, Name, NodeId, Position, StringLookup, SymbolId};
use tracing::debug;

use crate::info::AnnotationTable;
use crate::scope::{ScopeId, Scopes};
use crate::symbol::Symbol;

/// A unit of compilation: the symbol arena, scope chain, annotation table
/// and diagnostics for one package of declarations.
///
/// Created when first referenced and kept alive for the whole compilation
/// run; code generation reads its annotation table and symbols after
/// checking completes.
pub struct Package {
    /// Import path of the package.
    pub path: Name,
    symbols: Vec<Symbol>,
    /// Top-level declared names, filled by [`Package::collect_symbols`].
    symbol_map: FxHashMap<Name, SymbolId>,
    scopes: Scopes,
    global_scope: ScopeId,
    pub info: AnnotationTable,
    pub diagnostics: Diagnostics,
}

impl Package {
    pub fn new(path: Name, config: DiagnosticConfig) -> Self {
        let (scopes, global_scope) = Scopes::new();
        Package {
            path,
            symbols: Vec::new(),
            symbol_map: FxHashMap::default(),
            scopes,
            global_scope,
            info: AnnotationTable::new(),
            diagnostics: Diagnostics::with_config(config),
        }
    }

    #[inline]
    pub fn global_scope(&self) -> ScopeId {
        self.global_scope
    }

    /// The symbol behind a package-space handle.
    ///
    /// # Panics
    /// Panics if the handle belongs to the builtin space.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        debug_assert!(!id.is_builtin());
        &self.symbols[id.index()]
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        debug_assert!(!id.is_builtin());
        &mut self.symbols[id.index()]
    }

    pub(crate) fn alloc_symbol(&mut self, sym: Symbol) -> SymbolId {
        let id = SymbolId::package(u32::try_from(self.symbols.len()).unwrap_or_else(|_| {
            panic!("symbol arena exceeded the package space");
        }));
        self.symbols.push(sym);
        id
    }

    pub(crate) fn symbols_len(&self) -> usize {
        self.symbols.len()
    }

    pub(crate) fn truncate_symbols(&mut self, len: usize) {
        self.symbols.truncate(len);
    }

    pub(crate) fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub(crate) fn scopes_mut(&mut self) -> &mut Scopes {
        &mut self.scopes
    }

    /// A top-level symbol by name, once collected.
    pub fn global_symbol(&self, name: Name) -> Option<SymbolId> {
        self.symbol_map.get(&name).copied()
    }

    /// Declare a name in a scope.
    ///
    /// On redefinition, reports and returns the pre-existing symbol so the
    /// caller can proceed with it as a placeholder instead of aborting.
    pub fn declare_symbol(
        &mut self,
        scope: ScopeId,
        name: Name,
        decl: Option<NodeId>,
        pos: Position,
        lookup: &impl StringLookup,
    ) -> SymbolId {
        if let Some(existing) = self.scopes.get_local(scope, name) {
            let spelled = lookup.lookup(name).to_owned();
            let previous_pos = self.symbol(existing).decl_pos;
            self.diagnostics.report_error(
                ErrorCode::Redefinition,
                pos,
                format!("Duplicate definition of symbol {spelled}"),
            );
            self.diagnostics
                .report_note(previous_pos, format!("Previous definition of {spelled}"));
            return existing;
        }

        let id = self.alloc_symbol(Symbol::unresolved(name, decl, pos));
        self.scopes.insert(scope, name, id);
        id
    }

    /// Pre-declare every top-level name so later statements can reference
    /// earlier-queued (or later-queued) declarations before they resolve.
    ///
    /// Runs exactly once per package, before the first checking pass.
    pub fn collect_symbols(&mut self, decls: &[Decl], lookup: &impl StringLookup) {
        for decl in decls {
            for name in decl.names() {
                let id = self.declare_symbol(
                    self.global_scope,
                    name.name,
                    Some(decl.id),
                    name.pos,
                    lookup,
                );
                self.symbol_map.entry(name.name).or_insert(id);
            }
        }
        debug!(
            path = lookup.lookup(self.path),
            symbols = self.symbols.len(),
            "collected top-level symbols"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::StringInterner;

    fn pos(line: u32) -> Position {
        Position::new(Name::EMPTY, line, 1)
    }

    #[test]
    fn declare_then_lookup() {
        let interner = StringInterner::new();
        let mut pkg = Package::new(Name::EMPTY, DiagnosticConfig::default());
        let x = interner.intern("x");

        let id = pkg.declare_symbol(pkg.global_scope(), x, None, pos(1), &interner);
        assert_eq!(pkg.scopes().lookup(pkg.global_scope(), x), Some(id));
        assert!(!pkg.diagnostics.has_errors());
    }

    #[test]
    fn redefinition_reports_once_and_returns_the_original() {
        let interner = StringInterner::new();
        let mut pkg = Package::new(Name::EMPTY, DiagnosticConfig::default());
        let x = interner.intern("x");

        let first = pkg.declare_symbol(pkg.global_scope(), x, None, pos(1), &interner);
        let second = pkg.declare_symbol(pkg.global_scope(), x, None, pos(2), &interner);
        assert_eq!(first, second);
        assert_eq!(pkg.diagnostics.error_count(), 1);

        let diag = pkg.diagnostics.iter().next().unwrap();
        assert_eq!(diag.code, ErrorCode::Redefinition);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.notes[0].pos, pos(1));
    }

    #[test]
    fn same_name_in_child_scope_is_not_a_redefinition() {
        let interner = StringInterner::new();
        let mut pkg = Package::new(Name::EMPTY, DiagnosticConfig::default());
        let x = interner.intern("x");

        let global = pkg.global_scope();
        pkg.declare_symbol(global, x, None, pos(1), &interner);
        let inner = pkg.scopes_mut().push(global);
        pkg.declare_symbol(inner, x, None, pos(2), &interner);
        assert!(!pkg.diagnostics.has_errors());
    }
}

//! The annotation table: per-node checking results handed to code
//! generation.
//!
//! One entry per syntax node the checker finishes, written exactly once
//! and read-only thereafter. Code generation reads only this table plus
//! the symbol and type storage; it never re-derives semantic decisions.

use sable_ir::{NodeId, SymbolId, TypeId, Val};

/// A packed coercion code attached to expression annotations.
///
/// The low nibble is the conversion class, the high nibble carries flags.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[repr(transparent)]
pub struct Coercion(u8);

impl Coercion {
    pub const NONE: Coercion = Coercion(0);
    pub const SAME: Coercion = Coercion(1);
    pub const FLOAT_TO_INT: Coercion = Coercion(2);
    pub const INT_TO_FLOAT: Coercion = Coercion(3);
    pub const POINTER_TO_INT: Coercion = Coercion(4);
    pub const INT_TO_POINTER: Coercion = Coercion(5);
    pub const BOOL: Coercion = Coercion(6);
    /// Conversion information lives on the receiver.
    pub const TUPLE: Coercion = Coercion(7);
    pub const ANY: Coercion = Coercion(15);

    const KIND_MASK: u8 = 0x0F;
    /// Widening required.
    pub const FLAG_EXTEND: u8 = 0x10;
    /// Target is signed.
    pub const FLAG_SIGNED: u8 = 0x20;
    /// Source is a float.
    pub const FLAG_FLOAT: u8 = 0x40;

    /// Attach a flag bit.
    #[inline]
    pub const fn with_flag(self, flag: u8) -> Coercion {
        Coercion(self.0 | (flag & !Self::KIND_MASK))
    }

    /// The conversion class, flags stripped.
    #[inline]
    pub const fn kind(self) -> Coercion {
        Coercion(self.0 & Self::KIND_MASK)
    }

    #[inline]
    pub const fn has_flag(self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

/// One checking result, tagged by the node kind it annotates.
///
/// The control-flow variants (`Label` through `Case`) are produced by the
/// statement-level checker of a fuller front end; declaration and
/// expression checking never writes them.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckerInfo {
    /// A single-symbol declaration.
    Decl { symbol: SymbolId, is_global: bool },
    /// A multi-symbol declaration.
    DeclList {
        symbols: Box<[SymbolId]>,
        is_global: bool,
    },
    /// An identifier expression, resolved to its symbol.
    Ident { coerce: Coercion, symbol: SymbolId },
    /// A member or import selector expression.
    Selector {
        coerce: Coercion,
        ty: TypeId,
        is_constant: bool,
        val: Val,
    },
    /// A literal or other leaf expression.
    BasicExpr {
        coerce: Coercion,
        ty: TypeId,
        is_constant: bool,
        val: Val,
    },
    /// A label declaration.
    Label { symbol: SymbolId },
    /// A goto; the target is absent for computed branches.
    Goto { target: Option<SymbolId> },
    /// A for loop's branch targets.
    For {
        continue_target: SymbolId,
        break_target: SymbolId,
    },
    /// A switch statement's break target.
    Switch { break_target: SymbolId },
    /// A switch case's fallthrough target.
    Case { fallthrough_target: SymbolId },
}

/// Write-once result table indexed by [`NodeId`].
#[derive(Default)]
pub struct AnnotationTable {
    entries: Vec<Option<CheckerInfo>>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for a node.
    ///
    /// # Panics
    /// Panics in debug builds when a node is annotated twice; an entry is
    /// never overwritten.
    pub fn insert(&mut self, id: NodeId, info: CheckerInfo) {
        if id.index() >= self.entries.len() {
            self.entries.resize(id.index() + 1, None);
        }
        let slot = &mut self.entries[id.index()];
        debug_assert!(slot.is_none(), "node {id:?} annotated twice");
        if slot.is_none() {
            *slot = Some(info);
        }
    }

    /// The result for a node, if it has been checked.
    pub fn get(&self, id: NodeId) -> Option<&CheckerInfo> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn coercion_packs_kind_and_flags() {
        let c = Coercion::FLOAT_TO_INT.with_flag(Coercion::FLAG_FLOAT | Coercion::FLAG_SIGNED);
        assert_eq!(c.kind(), Coercion::FLOAT_TO_INT);
        assert!(c.has_flag(Coercion::FLAG_FLOAT));
        assert!(c.has_flag(Coercion::FLAG_SIGNED));
        assert!(!c.has_flag(Coercion::FLAG_EXTEND));
    }

    #[test]
    fn insert_and_get() {
        let mut table = AnnotationTable::new();
        let node = NodeId::from_raw(4);
        assert_eq!(table.get(node), None);

        table.insert(
            node,
            CheckerInfo::Decl {
                symbol: SymbolId::package(0),
                is_global: true,
            },
        );
        assert!(matches!(
            table.get(node),
            Some(CheckerInfo::Decl { is_global: true, .. })
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    #[should_panic(expected = "annotated twice")]
    #[cfg(debug_assertions)]
    fn double_write_is_a_bug() {
        let mut table = AnnotationTable::new();
        let node = NodeId::from_raw(0);
        let info = CheckerInfo::Label {
            symbol: SymbolId::package(0),
        };
        table.insert(node, info.clone());
        table.insert(node, info);
    }
}

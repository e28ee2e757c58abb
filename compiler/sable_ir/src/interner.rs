//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup with thread-safe access behind a
//! single `RwLock`. Interned strings are leaked and therefore `'static`;
//! the interner lives for the whole compilation run.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "string interner exceeded capacity: {count} strings")
            }
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        // Pre-intern the empty string at index 0 (Name::EMPTY).
        let empty: &'static str = "";
        table.map.insert(empty, 0);
        table.strings.push(empty);
        table
    }
}

/// String interner shared across the whole compilation run.
///
/// # Thread Safety
/// Uses a `RwLock` for concurrent read/write access. Can be wrapped in
/// [`SharedInterner`] for sharing across phases.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the builtin identifiers pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        };
        interner.pre_intern_builtins();
        interner
    }

    /// Try to intern a string, returning its [`Name`] or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: check if already interned.
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(s) {
                return Ok(Name::from_raw(idx));
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(s) {
            return Ok(Name::from_raw(idx));
        }

        let idx = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;

        // Leak to get 'static lifetime; the interner is never torn down.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);

        Ok(Name::from_raw(idx))
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity. Use [`StringInterner::try_intern`]
    /// for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a [`Name`].
    ///
    /// The returned reference is `'static` because interned strings are leaked.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings[name.index()]
    }

    /// Pre-intern the builtin type and constant identifiers.
    fn pre_intern_builtins(&self) {
        const BUILTINS: &[&str] = &[
            "void", "bool", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64",
            "int", "uint", "intptr", "uintptr", "rawptr", "any", "true", "false",
        ];

        for b in BUILTINS {
            self.intern(b);
        }
    }

    /// Get the number of interned strings.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner holds only the pre-interned strings.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned string names.
///
/// Exists to avoid tight coupling: higher-level crates can accept any
/// `StringLookup` implementor without depending on `StringInterner` directly.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Shared interner handle for passing across compiler phases.
///
/// This newtype enforces that all thread-safe interner sharing goes through
/// this type, preventing accidental direct `Arc<StringInterner>` usage.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_lookup() {
        let interner = StringInterner::new();

        let hello = interner.intern("hello");
        let world = interner.intern("world");
        let hello2 = interner.intern("hello");

        assert_eq!(hello, hello2);
        assert_ne!(hello, world);

        assert_eq!(interner.lookup(hello), "hello");
        assert_eq!(interner.lookup(world), "world");
    }

    #[test]
    fn empty_string_is_name_empty() {
        let interner = StringInterner::new();
        let empty = interner.intern("");
        assert_eq!(empty, Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn builtins_pre_interned() {
        let interner = StringInterner::new();
        let before = interner.len();
        interner.intern("i32");
        interner.intern("rawptr");
        interner.intern("true");
        assert_eq!(interner.len(), before);
    }

    #[test]
    fn shared_interner_clones_share_storage() {
        let interner = SharedInterner::new();
        let interner2 = interner.clone();

        let a = interner.intern("shared");
        let b = interner2.intern("shared");
        assert_eq!(a, b);
    }
}

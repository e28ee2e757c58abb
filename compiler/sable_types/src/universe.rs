//! The type universe: pool, structural interner, builtin bootstrap.
//!
//! One `TypeUniverse` is constructed at startup for the whole compilation
//! run and shared read-mostly across packages via [`SharedTypeUniverse`].
//! Structural kinds (pointer, slice, array, function) are canonicalized
//! through a hash-bucketed cache: the bucket key is a structural hash of
//! the payload, and collisions within a bucket are resolved by full
//! structural comparison, so an unlucky hash can never conflate two shapes.

// Arc is needed here for SharedTypeUniverse - the universe is shared across
// packages and, under a parallelizing driver, across threads.
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};
use sable_ir::{Name, StringInterner, SymbolId, TypeId};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use crate::data::IMPLICIT_LENGTH;
use crate::metrics::{target_metrics, Arch, Os, TargetInfo, UnsupportedTarget};
use crate::{Type, TypeFlags, TypeKind};

/// Maximum object size in bits; array types wider than this are rejected.
const MAX_OBJECT_BITS: u64 = u32::MAX as u64;

/// Error constructing a type.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum TypeError {
    /// Array width exceeds the platform's maximum object size.
    #[error("array of {length} elements ({element_width}-bit each) exceeds the maximum object size")]
    OversizedArray { length: i64, element_width: u32 },
    /// No metrics row for the requested target.
    #[error(transparent)]
    UnsupportedTarget(#[from] UnsupportedTarget),
}

/// Instance `TypeId`s of every builtin type.
///
/// These are the types expressions evaluate *to*; the builtin scope binds
/// the corresponding names to metatypes wrapping them.
#[derive(Copy, Clone, Debug)]
pub struct BuiltinTypes {
    pub invalid: TypeId,
    pub any: TypeId,
    pub void: TypeId,
    pub bool_: TypeId,
    pub i8: TypeId,
    pub i16: TypeId,
    pub i32: TypeId,
    pub i64: TypeId,
    pub u8: TypeId,
    pub u16: TypeId,
    pub u32: TypeId,
    pub u64: TypeId,
    pub f32: TypeId,
    pub f64: TypeId,
    pub int: TypeId,
    pub uint: TypeId,
    pub intptr: TypeId,
    pub uintptr: TypeId,
    pub rawptr: TypeId,
    pub untyped_int: TypeId,
    pub untyped_float: TypeId,
}

/// The process-wide type universe.
///
/// # Thread Safety
/// The pool and intern buckets sit behind `RwLock`s so a parallelizing
/// driver may intern from multiple packages; everything else is immutable
/// after construction.
pub struct TypeUniverse {
    pool: RwLock<Vec<Type>>,
    buckets: RwLock<FxHashMap<u64, SmallVec<[TypeId; 2]>>>,
    metrics: TargetInfo,
    builtins: BuiltinTypes,
    /// Builtin type-name table: (name, metatype) in registration order.
    type_names: Vec<(Name, TypeId)>,
    /// Builtin instance id to spelled name, for diagnostics.
    instance_names: FxHashMap<u32, &'static str>,
}

impl TypeUniverse {
    /// Construct the universe for a target, bootstrapping all builtins.
    pub fn new(os: Os, arch: Arch, interner: &StringInterner) -> Result<Self, TypeError> {
        let metrics = target_metrics(os, arch)?;
        let ptr = metrics.pointer;
        let int = metrics.int;

        let mut pool: Vec<Type> = Vec::with_capacity(64);
        let mut type_names: Vec<(Name, TypeId)> = Vec::with_capacity(24);
        let mut instance_names: FxHashMap<u32, &'static str> = FxHashMap::default();

        let mut alloc = |ty: Type| -> TypeId {
            let id = TypeId::from_raw(u32::try_from(pool.len()).unwrap_or(u32::MAX));
            pool.push(ty);
            id
        };

        // A builtin is an instance type plus a metatype registered by name.
        let mut builtin = |name: &'static str, ty: Type| -> TypeId {
            let instance = alloc(ty);
            let meta = alloc(Type::new(
                TypeKind::Metatype { instance },
                0,
                0,
                TypeFlags::empty(),
            ));
            type_names.push((interner.intern(name), meta));
            instance_names.insert(instance.raw(), name);
            instance
        };

        let signed = TypeFlags::SIGNED;
        let none = TypeFlags::empty();
        let untyped = TypeFlags::UNTYPED;
        let int_ty = |w: u32, a: u32, f: TypeFlags| Type::new(TypeKind::Int, w, a, f);
        let float_ty = |w: u32| Type::new(TypeKind::Float, w, w, none);

        let invalid = builtin("<invalid>", Type::new(TypeKind::Invalid, 0, 0, none));
        debug_assert_eq!(invalid, TypeId::INVALID);

        let builtins = BuiltinTypes {
            invalid,
            any: builtin(
                "any",
                Type::new(TypeKind::Any, ptr.width * 2, ptr.align, none),
            ),
            void: builtin("void", Type::new(TypeKind::Void, 0, 0, none)),
            bool_: builtin("bool", Type::new(TypeKind::Bool, 8, 8, none)),
            i8: builtin("i8", int_ty(8, 8, signed)),
            i16: builtin("i16", int_ty(16, 16, signed)),
            i32: builtin("i32", int_ty(32, 32, signed)),
            i64: builtin("i64", int_ty(64, 64, signed)),
            u8: builtin("u8", int_ty(8, 8, none)),
            u16: builtin("u16", int_ty(16, 16, none)),
            u32: builtin("u32", int_ty(32, 32, none)),
            u64: builtin("u64", int_ty(64, 64, none)),
            f32: builtin("f32", float_ty(32)),
            f64: builtin("f64", float_ty(64)),
            int: builtin("int", int_ty(int.width, int.align, signed)),
            uint: builtin("uint", int_ty(int.width, int.align, none)),
            intptr: builtin("intptr", int_ty(ptr.width, ptr.align, signed)),
            uintptr: builtin("uintptr", int_ty(ptr.width, ptr.align, none)),
            rawptr: builtin(
                "rawptr",
                Type::new(
                    TypeKind::Pointer {
                        pointee: TypeId::INVALID,
                    },
                    ptr.width,
                    ptr.align,
                    none,
                ),
            ),
            untyped_int: builtin("<integer>", int_ty(64, 64, untyped)),
            untyped_float: builtin("<float>", Type::new(TypeKind::Float, 64, 64, untyped)),
        };

        Ok(TypeUniverse {
            pool: RwLock::new(pool),
            buckets: RwLock::new(FxHashMap::default()),
            metrics,
            builtins,
            type_names,
            instance_names,
        })
    }

    /// Instance ids of the builtin types.
    #[inline]
    pub fn builtins(&self) -> &BuiltinTypes {
        &self.builtins
    }

    /// The builtin type-name table: (name, metatype) in registration order.
    ///
    /// The builtin scope is populated from this.
    pub fn builtin_type_names(&self) -> &[(Name, TypeId)] {
        &self.type_names
    }

    /// Target metrics selected at construction.
    #[inline]
    pub fn metrics(&self) -> TargetInfo {
        self.metrics
    }

    /// Number of types in the pool.
    pub fn len(&self) -> usize {
        self.pool.read().len()
    }

    /// Check if the pool holds only the bootstrap types.
    pub fn is_empty(&self) -> bool {
        self.len() <= self.type_names.len() * 2
    }

    /// Look up the type for an id.
    ///
    /// # Panics
    /// Panics if the id was not created by this universe.
    pub fn lookup(&self, id: TypeId) -> Type {
        self.pool.read()[id.index()].clone()
    }

    /// Width in bits.
    pub fn width(&self, id: TypeId) -> u32 {
        self.pool.read()[id.index()].width
    }

    /// Alignment in bits.
    pub fn align(&self, id: TypeId) -> u32 {
        self.pool.read()[id.index()].align
    }

    /// Kind name for diagnostics.
    pub fn kind_name(&self, id: TypeId) -> &'static str {
        self.pool.read()[id.index()].kind.name()
    }

    /// Describe a type for diagnostics.
    ///
    /// Builtins render by their registered name, everything else by kind.
    pub fn describe(&self, id: TypeId) -> &'static str {
        if let Some(name) = self.instance_names.get(&id.raw()) {
            return name;
        }
        self.kind_name(id)
    }

    /// Unwrap a metatype to its instance type.
    pub fn instance_of(&self, id: TypeId) -> Option<TypeId> {
        match self.pool.read()[id.index()].kind {
            TypeKind::Metatype { instance } => Some(instance),
            _ => None,
        }
    }

    // === Structural interning ===

    fn structural_hash(ty: &Type) -> u64 {
        let mut hasher = FxHasher::default();
        ty.flags.bits().hash(&mut hasher);
        match &ty.kind {
            TypeKind::Pointer { pointee } => {
                0u8.hash(&mut hasher);
                pointee.raw().hash(&mut hasher);
            }
            TypeKind::Slice { element } => {
                1u8.hash(&mut hasher);
                element.raw().hash(&mut hasher);
            }
            TypeKind::Array { length, element } => {
                2u8.hash(&mut hasher);
                length.hash(&mut hasher);
                element.raw().hash(&mut hasher);
            }
            TypeKind::Function { params, results } => {
                3u8.hash(&mut hasher);
                params.len().hash(&mut hasher);
                for p in params.iter() {
                    p.raw().hash(&mut hasher);
                }
                for r in results.iter() {
                    r.raw().hash(&mut hasher);
                }
            }
            _ => debug_assert!(false, "non-structural kind reached the interner"),
        }
        hasher.finish()
    }

    /// Return the canonical id for a structural type, constructing on miss.
    fn intern_structural(&self, ty: Type) -> TypeId {
        let key = Self::structural_hash(&ty);

        // Fast path: already interned.
        {
            let buckets = self.buckets.read();
            if let Some(chain) = buckets.get(&key) {
                let pool = self.pool.read();
                for &id in chain {
                    if pool[id.index()] == ty {
                        return id;
                    }
                }
            }
        }

        let mut buckets = self.buckets.write();
        let mut pool = self.pool.write();

        // Double-check after acquiring write locks.
        if let Some(chain) = buckets.get(&key) {
            for &id in chain.iter() {
                if pool[id.index()] == ty {
                    return id;
                }
            }
        }

        let id = TypeId::from_raw(u32::try_from(pool.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX entries");
        }));
        trace!(kind = ty.kind.name(), ?id, "interned structural type");
        pool.push(ty);
        buckets.entry(key).or_default().push(id);
        id
    }

    /// Canonical pointer type to `pointee`.
    pub fn pointer(&self, flags: TypeFlags, pointee: TypeId) -> TypeId {
        let ptr = self.metrics.pointer;
        self.intern_structural(Type::new(
            TypeKind::Pointer { pointee },
            ptr.width,
            ptr.align,
            flags,
        ))
    }

    /// Canonical slice type of `element`.
    pub fn slice(&self, flags: TypeFlags, element: TypeId) -> TypeId {
        let ptr = self.metrics.pointer;
        self.intern_structural(Type::new(
            TypeKind::Slice { element },
            ptr.width,
            ptr.align,
            flags,
        ))
    }

    /// Canonical array type of `length` elements of `element`.
    ///
    /// `length` may be [`IMPLICIT_LENGTH`]; the width is then left at zero
    /// until a fuller checker derives the real count. Oversized arrays are
    /// a construction error.
    pub fn array(&self, flags: TypeFlags, length: i64, element: TypeId) -> Result<TypeId, TypeError> {
        let element_width = self.width(element);
        let element_align = self.align(element);

        let width = if length == IMPLICIT_LENGTH {
            0
        } else {
            let bits = length
                .unsigned_abs()
                .checked_mul(u64::from(element_width))
                .filter(|&bits| bits < MAX_OBJECT_BITS)
                .ok_or(TypeError::OversizedArray {
                    length,
                    element_width,
                })?;
            u32::try_from(bits).unwrap_or_else(|_| unreachable!("bounded by MAX_OBJECT_BITS"))
        };

        Ok(self.intern_structural(Type::new(
            TypeKind::Array { length, element },
            width,
            element_align,
            flags,
        )))
    }

    /// Canonical function type.
    pub fn function(&self, flags: TypeFlags, params: &[TypeId], results: &[TypeId]) -> TypeId {
        let ptr = self.metrics.pointer;
        self.intern_structural(Type::new(
            TypeKind::Function {
                params: params.into(),
                results: results.into(),
            },
            ptr.width,
            ptr.align,
            flags,
        ))
    }

    /// Fresh metatype wrapping `instance`.
    pub fn metatype(&self, instance: TypeId) -> TypeId {
        self.alloc(Type::new(
            TypeKind::Metatype { instance },
            0,
            0,
            TypeFlags::empty(),
        ))
    }

    /// Fresh nominal struct type. Never deduplicated; member layout is left
    /// to a fuller checker.
    pub fn struct_type(&self, flags: TypeFlags, members: Box<[TypeId]>) -> TypeId {
        self.alloc(Type::new(TypeKind::Struct { members }, 0, 0, flags))
    }

    /// Fresh nominal union type. Never deduplicated.
    pub fn union_type(&self, flags: TypeFlags, cases: Box<[TypeId]>) -> TypeId {
        self.alloc(Type::new(TypeKind::Union { cases }, 0, 0, flags))
    }

    /// Fresh alias anchored to its declaring symbol.
    ///
    /// The target must already exist, which is what keeps alias chains
    /// acyclic and `base_type` terminating.
    pub fn alias(&self, symbol: SymbolId, aliased: TypeId) -> TypeId {
        let target = self.lookup(aliased);
        self.alloc(Type::new(
            TypeKind::Alias { symbol, aliased },
            target.width,
            target.align,
            target.flags,
        ))
    }

    fn alloc(&self, ty: Type) -> TypeId {
        let mut pool = self.pool.write();
        let id = TypeId::from_raw(u32::try_from(pool.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX entries");
        }));
        pool.push(ty);
        id
    }

    // === Classification and conversion ===

    /// Follow alias payloads to the underlying non-alias type.
    pub fn base_type(&self, id: TypeId) -> TypeId {
        let pool = self.pool.read();
        let mut current = id;
        while let TypeKind::Alias { aliased, .. } = pool[current.index()].kind {
            current = aliased;
        }
        current
    }

    /// Check for an integer base kind (the untyped integer sentinel counts).
    pub fn is_integer(&self, id: TypeId) -> bool {
        let base = self.base_type(id);
        matches!(self.pool.read()[base.index()].kind, TypeKind::Int)
    }

    /// Check for a float base kind (the untyped float sentinel counts).
    pub fn is_float(&self, id: TypeId) -> bool {
        let base = self.base_type(id);
        matches!(self.pool.read()[base.index()].kind, TypeKind::Float)
    }

    /// Check for a signed integer base kind.
    pub fn is_signed(&self, id: TypeId) -> bool {
        let base = self.base_type(id);
        let ty = &self.pool.read()[base.index()];
        matches!(ty.kind, TypeKind::Int) && ty.flags.is_signed()
    }

    /// Implicit conversion check.
    ///
    /// The untyped integer sentinel converts to itself or any integer-kind
    /// target; the untyped float sentinel to itself or any float-kind
    /// target; everything else converts only under exact identity. Aliases
    /// are deliberately not unwrapped before the identity comparison, so an
    /// alias never converts to its target; callers that need that must go
    /// through `base_type` themselves.
    pub fn convert(&self, source: TypeId, target: TypeId) -> bool {
        let b = &self.builtins;

        if source == b.untyped_int {
            return target == b.untyped_int
                || matches!(self.pool.read()[target.index()].kind, TypeKind::Int);
        }

        if source == b.untyped_float {
            return target == b.untyped_float
                || matches!(self.pool.read()[target.index()].kind, TypeKind::Float);
        }

        source == target
    }
}

/// Shared universe handle for passing across packages and phases.
///
/// This newtype enforces that all sharing goes through one type,
/// preventing accidental direct `Arc<TypeUniverse>` usage.
#[derive(Clone)]
pub struct SharedTypeUniverse(Arc<TypeUniverse>);

impl SharedTypeUniverse {
    /// Construct the universe for a target and wrap it for sharing.
    pub fn new(os: Os, arch: Arch, interner: &StringInterner) -> Result<Self, TypeError> {
        Ok(SharedTypeUniverse(Arc::new(TypeUniverse::new(
            os, arch, interner,
        )?)))
    }
}

impl std::fmt::Debug for SharedTypeUniverse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTypeUniverse")
            .field("len", &self.0.len())
            .finish()
    }
}

impl std::ops::Deref for SharedTypeUniverse {
    type Target = TypeUniverse;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;

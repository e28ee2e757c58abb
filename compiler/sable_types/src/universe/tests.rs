use pretty_assertions::assert_eq;
use sable_ir::StringInterner;

use super::*;

fn universe() -> (TypeUniverse, StringInterner) {
    let interner = StringInterner::new();
    let universe = TypeUniverse::new(Os::Linux, Arch::X86_64, &interner).unwrap();
    (universe, interner)
}

#[test]
fn invalid_is_the_zeroth_type() {
    let (u, _) = universe();
    assert_eq!(u.builtins().invalid, TypeId::INVALID);
    assert!(matches!(u.lookup(TypeId::INVALID).kind, TypeKind::Invalid));
}

#[test]
fn builtin_names_resolve_to_metatypes() {
    let (u, interner) = universe();
    let i32_name = interner.intern("i32");
    let (_, meta) = *u
        .builtin_type_names()
        .iter()
        .find(|(name, _)| *name == i32_name)
        .unwrap();
    assert_eq!(u.instance_of(meta), Some(u.builtins().i32));
}

#[test]
fn builtin_widths_follow_target_metrics() {
    let (u, _) = universe();
    let b = u.builtins();
    assert_eq!(u.width(b.i8), 8);
    assert_eq!(u.width(b.u64), 64);
    assert_eq!(u.width(b.int), 64);
    assert_eq!(u.width(b.rawptr), 64);
    assert_eq!(u.width(b.any), 128);
    assert_eq!(u.width(b.bool_), 8);
    assert_eq!(u.width(b.void), 0);

    let interner = StringInterner::new();
    let u32_target = TypeUniverse::new(Os::Linux, Arch::X86, &interner).unwrap();
    assert_eq!(u32_target.width(u32_target.builtins().int), 32);
    assert_eq!(u32_target.width(u32_target.builtins().rawptr), 32);
}

#[test]
fn signedness_and_untyped_flags() {
    let (u, _) = universe();
    let b = u.builtins();
    assert!(u.is_signed(b.i32));
    assert!(!u.is_signed(b.u32));
    assert!(u.is_integer(b.untyped_int));
    assert!(u.lookup(b.untyped_int).flags.is_untyped());
    assert!(u.is_float(b.untyped_float));
    assert!(!u.is_integer(b.f64));
}

#[test]
fn pointer_types_are_interned() {
    let (u, _) = universe();
    let b = u.builtins();
    let p1 = u.pointer(TypeFlags::empty(), b.i32);
    let p2 = u.pointer(TypeFlags::empty(), b.i32);
    assert_eq!(p1, p2);

    let q = u.pointer(TypeFlags::empty(), b.i64);
    assert_ne!(p1, q);
    assert_eq!(u.width(p1), 64);
}

#[test]
fn array_types_intern_by_length_and_element() {
    let (u, _) = universe();
    let b = u.builtins();
    let a5 = u.array(TypeFlags::empty(), 5, b.i32).unwrap();
    let a5_again = u.array(TypeFlags::empty(), 5, b.i32).unwrap();
    let a6 = u.array(TypeFlags::empty(), 6, b.i32).unwrap();
    assert_eq!(a5, a5_again);
    assert_ne!(a5, a6);
    assert_eq!(u.width(a5), 5 * 32);
}

#[test]
fn implicit_length_array_has_zero_width() {
    let (u, _) = universe();
    let a = u
        .array(TypeFlags::empty(), IMPLICIT_LENGTH, u.builtins().i32)
        .unwrap();
    assert_eq!(u.width(a), 0);
    assert!(matches!(
        u.lookup(a).kind,
        TypeKind::Array {
            length: IMPLICIT_LENGTH,
            ..
        }
    ));
}

#[test]
fn oversized_array_is_an_error() {
    let (u, _) = universe();
    let err = u
        .array(TypeFlags::empty(), i64::from(u32::MAX), u.builtins().i64)
        .unwrap_err();
    assert!(matches!(err, TypeError::OversizedArray { .. }));
}

#[test]
fn array_width_overflow_is_an_error() {
    let (u, _) = universe();
    let b = u.builtins();

    // 2^58 elements of 64 bits is exactly 2^64; an unchecked multiply
    // would wrap to zero and pass the size limit.
    let err = u.array(TypeFlags::empty(), 1 << 58, b.i64).unwrap_err();
    assert!(matches!(err, TypeError::OversizedArray { .. }));

    let err = u.array(TypeFlags::empty(), i64::MAX, b.i64).unwrap_err();
    assert!(matches!(err, TypeError::OversizedArray { .. }));

    // In range for the multiply but past the object size limit.
    let err = u.array(TypeFlags::empty(), 1 << 40, b.i64).unwrap_err();
    assert!(matches!(err, TypeError::OversizedArray { .. }));
}

#[test]
fn slice_is_distinct_from_pointer() {
    let (u, _) = universe();
    let b = u.builtins();
    let s = u.slice(TypeFlags::empty(), b.i32);
    let p = u.pointer(TypeFlags::empty(), b.i32);
    assert_ne!(s, p);
    assert_eq!(u.slice(TypeFlags::empty(), b.i32), s);
}

#[test]
fn function_types_intern_structurally() {
    let (u, _) = universe();
    let b = u.builtins();
    let f1 = u.function(TypeFlags::empty(), &[b.i32, b.f64], &[b.bool_]);
    let f2 = u.function(TypeFlags::empty(), &[b.i32, b.f64], &[b.bool_]);
    let f3 = u.function(TypeFlags::empty(), &[b.i32], &[b.bool_]);
    assert_eq!(f1, f2);
    assert_ne!(f1, f3);
    assert_eq!(u.width(f1), 64);
}

#[test]
fn structs_are_nominal() {
    let (u, _) = universe();
    let b = u.builtins();
    let members: Box<[TypeId]> = Box::new([b.i32, b.f64]);
    let s1 = u.struct_type(TypeFlags::empty(), members.clone());
    let s2 = u.struct_type(TypeFlags::empty(), members);
    assert_ne!(s1, s2);
}

#[test]
fn alias_chains_resolve_to_base() {
    let (u, _) = universe();
    let b = u.builtins();
    let a1 = u.alias(SymbolId::package(0), b.i32);
    let a2 = u.alias(SymbolId::package(1), a1);
    assert_eq!(u.base_type(a2), b.i32);
    assert!(u.is_integer(a2));
    assert_eq!(u.width(a2), 32);
    assert!(u.is_signed(a2));
}

#[test]
fn untyped_literals_convert_to_matching_kinds() {
    let (u, _) = universe();
    let b = u.builtins();
    assert!(u.convert(b.untyped_int, b.i8));
    assert!(u.convert(b.untyped_int, b.u64));
    assert!(u.convert(b.untyped_int, b.untyped_int));
    assert!(!u.convert(b.untyped_int, b.f32));
    assert!(!u.convert(b.untyped_int, b.bool_));

    assert!(u.convert(b.untyped_float, b.f32));
    assert!(u.convert(b.untyped_float, b.f64));
    assert!(!u.convert(b.untyped_float, b.i32));
}

#[test]
fn typed_conversion_is_identity() {
    let (u, _) = universe();
    let b = u.builtins();
    assert!(u.convert(b.i32, b.i32));
    assert!(!u.convert(b.i32, b.i64));
    assert!(!u.convert(b.i32, b.u32));

    // An alias does not implicitly convert to its target.
    let a = u.alias(SymbolId::package(0), b.i32);
    assert!(!u.convert(a, b.i32));
    assert!(u.convert(a, a));
}

#[test]
fn metatype_wraps_instance() {
    let (u, _) = universe();
    let b = u.builtins();
    let meta = u.metatype(b.f32);
    assert_eq!(u.instance_of(meta), Some(b.f32));
    assert_eq!(u.instance_of(b.f32), None);
}

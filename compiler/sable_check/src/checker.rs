//! The checker engine.
//!
//! The unit of work is one top-level declaration statement. [`Checker::check`]
//! dispatches on the declaration kind and returns [`CheckOutcome::Requeue`]
//! when the statement depends on a symbol that has not resolved yet; the
//! driver retries it on a later pass.
//!
//! Re-invocation after a requeue must be idempotent, so every check runs
//! inside a transaction: diagnostics, annotation writes, symbol patches and
//! local declarations are buffered and committed only when the statement
//! finishes. A requeued statement leaves no trace behind, which means the
//! pass that finally completes it reports each diagnostic and writes each
//! annotation exactly once.

use sable_diagnostic::{Diagnostics, ErrorCode};
use sable_ir::{
    Decl, DeclKind, DeclName, Expr, ExprKind, FunctionSignature, Name, NodeId, Position, SymbolId,
    TypeId, Val,
};
use sable_types::{TypeFlags, TypeKind, IMPLICIT_LENGTH};
use tracing::trace;

use crate::info::{CheckerInfo, Coercion};
use crate::package::Package;
use crate::scope::ScopeId;
use crate::session::Session;
use crate::symbol::{Symbol, SymbolKind, SymbolState};

/// Result of checking one declaration statement.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CheckOutcome {
    /// Finished, successfully or with poisoned symbols; the driver treats
    /// both the same and never revisits the statement.
    Done,
    /// Blocked on an unresolved symbol; retry after other statements make
    /// progress.
    Requeue,
}

impl CheckOutcome {
    #[inline]
    pub const fn is_requeue(self) -> bool {
        matches!(self, CheckOutcome::Requeue)
    }
}

/// What an expression result may be used for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ExprMode {
    Invalid,
    /// Depends on a symbol that has not resolved yet; not an error.
    Unresolved,
    Computed,
    Assignable,
    Addressable,
    Nil,
    File,
    Library,
    /// The expression denotes a type (its type is a metatype).
    Type,
}

/// Transient result of checking one expression.
#[derive(Copy, Clone, Debug)]
struct ExprOutcome {
    ty: TypeId,
    mode: ExprMode,
    val: Val,
}

impl ExprOutcome {
    const fn invalid() -> Self {
        ExprOutcome {
            ty: TypeId::INVALID,
            mode: ExprMode::Invalid,
            val: Val::None,
        }
    }

    const fn unresolved() -> Self {
        ExprOutcome {
            ty: TypeId::INVALID,
            mode: ExprMode::Unresolved,
            val: Val::None,
        }
    }
}

/// Result of resolving a type expression.
enum TypeOutcome {
    Resolved(TypeId),
    Unresolved,
    Invalid,
}

enum SymbolPatch {
    Poison,
    Resolve {
        kind: SymbolKind,
        ty: TypeId,
        val: Val,
    },
}

/// Buffered effects of one check, committed only on [`CheckOutcome::Done`].
struct Txn {
    diags: Diagnostics,
    info: Vec<(NodeId, CheckerInfo)>,
    patches: Vec<(SymbolId, SymbolPatch)>,
    used: Vec<SymbolId>,
    /// Scope bindings added during this check, removed again on abort.
    inserted: Vec<(ScopeId, Name)>,
    symbols_mark: usize,
}

impl Txn {
    fn begin(pkg: &Package) -> Self {
        Txn {
            diags: Diagnostics::new(),
            info: Vec::new(),
            patches: Vec::new(),
            used: Vec::new(),
            inserted: Vec::new(),
            symbols_mark: pkg.symbols_len(),
        }
    }

    fn error(&mut self, code: ErrorCode, pos: Position, message: impl Into<String>) {
        self.diags.report_error(code, pos, message);
    }

    fn note(&mut self, pos: Position, message: impl Into<String>) {
        self.diags.report_note(pos, message);
    }

    fn annotate(&mut self, node: NodeId, info: CheckerInfo) {
        self.info.push((node, info));
    }

    fn poison(&mut self, symbol: SymbolId) {
        // The builtin table is read-only; a builtin can never be poisoned.
        if !symbol.is_builtin() {
            self.patches.push((symbol, SymbolPatch::Poison));
        }
    }

    fn resolve(&mut self, symbol: SymbolId, kind: SymbolKind, ty: TypeId, val: Val) {
        debug_assert!(!symbol.is_builtin());
        self.patches
            .push((symbol, SymbolPatch::Resolve { kind, ty, val }));
    }

    fn mark_used(&mut self, symbol: SymbolId) {
        if !symbol.is_builtin() {
            self.used.push(symbol);
        }
    }

    fn commit(self, pkg: &mut Package) {
        for (id, patch) in self.patches {
            let sym = pkg.symbol_mut(id);
            match patch {
                SymbolPatch::Poison => sym.poison(),
                SymbolPatch::Resolve { kind, ty, val } => sym.resolve(kind, ty, val),
            }
        }
        for id in self.used {
            pkg.symbol_mut(id).used = true;
        }
        for (node, info) in self.info {
            pkg.info.insert(node, info);
        }
        pkg.diagnostics.absorb(self.diags);
    }

    fn abort(self, pkg: &mut Package) {
        for (scope, name) in self.inserted {
            pkg.scopes_mut().remove(scope, name);
        }
        pkg.truncate_symbols(self.symbols_mark);
    }
}

/// Checks declaration statements of one package against a session.
pub struct Checker<'a> {
    session: &'a Session,
    package: &'a mut Package,
}

impl<'a> Checker<'a> {
    pub fn new(session: &'a Session, package: &'a mut Package) -> Self {
        Checker { session, package }
    }

    /// Check one top-level declaration statement.
    ///
    /// # Panics
    /// Aborts the process for declaration kinds the checker does not yet
    /// support; that signals incompleteness of the checker itself, never a
    /// user-facing condition.
    pub fn check(&mut self, decl: &Decl) -> CheckOutcome {
        let scope = self.package.global_scope();
        let mut txn = Txn::begin(self.package);

        let outcome = match &decl.kind {
            DeclKind::Constant { names, ty, values } => {
                self.check_const_decl(&mut txn, scope, true, decl, names, ty.as_deref(), values)
            }
            DeclKind::Variable { names, ty, values } => {
                self.check_var_decl(&mut txn, scope, true, decl, names, ty.as_deref(), values)
            }
            DeclKind::Import { .. } => {
                unimplemented!("import declarations are resolved by the package loader")
            }
        };

        match outcome {
            CheckOutcome::Done => txn.commit(self.package),
            CheckOutcome::Requeue => txn.abort(self.package),
        }
        trace!(node = ?decl.id, kind = decl.describe(), ?outcome, "checked declaration");
        outcome
    }

    fn check_const_decl(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        is_global: bool,
        decl: &Decl,
        names: &[DeclName],
        ty: Option<&Expr>,
        values: &[Expr],
    ) -> CheckOutcome {
        if names.len() != 1 {
            txn.error(
                ErrorCode::MultipleConstantDecl,
                decl.pos,
                "Constant declarations must declare exactly one item",
            );
            for name in names {
                if let Some(symbol) = self.package.global_symbol(name.name) {
                    txn.poison(symbol);
                }
            }
            return CheckOutcome::Done;
        }
        let symbol = self.decl_symbol(txn, scope, is_global, &names[0], decl.id);

        if values.len() != 1 {
            txn.error(
                ErrorCode::ArityMismatch,
                decl.pos,
                format!(
                    "Constant declarations require exactly one value, but got {}",
                    values.len()
                ),
            );
            txn.poison(symbol);
            return CheckOutcome::Done;
        }

        let expected = match ty {
            None => None,
            Some(ty_expr) => match self.check_type_expr(txn, scope, ty_expr) {
                TypeOutcome::Unresolved => return CheckOutcome::Requeue,
                TypeOutcome::Invalid => {
                    txn.poison(symbol);
                    return CheckOutcome::Done;
                }
                TypeOutcome::Resolved(t) => Some(t),
            },
        };

        let value = &values[0];

        if let ExprKind::LitFunction { signature } = &value.kind {
            // The signature resolves eagerly so the symbol is usable for
            // self- and forward-recursive references before the body is
            // checked by a later pass.
            return match self.check_func_type(txn, scope, signature) {
                TypeOutcome::Unresolved => CheckOutcome::Requeue,
                TypeOutcome::Invalid => {
                    txn.poison(symbol);
                    CheckOutcome::Done
                }
                TypeOutcome::Resolved(fn_ty) => {
                    if let Some(expected) = expected {
                        if !self.session.types.convert(fn_ty, expected) {
                            self.report_conversion_error(txn, value.pos, fn_ty, expected);
                            txn.poison(symbol);
                            return CheckOutcome::Done;
                        }
                    }
                    txn.resolve(symbol, SymbolKind::Constant, fn_ty, Val::None);
                    txn.annotate(decl.id, CheckerInfo::Decl { symbol, is_global });
                    CheckOutcome::Done
                }
            };
        }

        let out = self.check_expr(txn, scope, value, expected);
        match out.mode {
            ExprMode::Unresolved => return CheckOutcome::Requeue,
            ExprMode::Invalid => {
                txn.poison(symbol);
                return CheckOutcome::Done;
            }
            ExprMode::Type => {
                if expected.is_some() {
                    txn.error(
                        ErrorCode::TypeNotAnExpression,
                        value.pos,
                        "Metatype is not a valid expression",
                    );
                    txn.poison(symbol);
                    return CheckOutcome::Done;
                }
                // `Name :: SomeType` declares a type alias anchored to this
                // symbol.
                let Some(instance) = self.session.types.instance_of(out.ty) else {
                    txn.poison(symbol);
                    return CheckOutcome::Done;
                };
                let alias = self.session.types.alias(symbol, instance);
                let meta = self.session.types.metatype(alias);
                txn.resolve(symbol, SymbolKind::Type, meta, Val::None);
                txn.annotate(decl.id, CheckerInfo::Decl { symbol, is_global });
                return CheckOutcome::Done;
            }
            _ => {}
        }

        if let Some(expected) = expected {
            if !self.session.types.convert(out.ty, expected) {
                self.report_conversion_error(txn, value.pos, out.ty, expected);
                txn.poison(symbol);
                txn.annotate(decl.id, CheckerInfo::Decl { symbol, is_global });
                return CheckOutcome::Done;
            }
        }

        txn.resolve(
            symbol,
            SymbolKind::Constant,
            expected.unwrap_or(out.ty),
            out.val,
        );
        txn.annotate(decl.id, CheckerInfo::Decl { symbol, is_global });
        CheckOutcome::Done
    }

    fn check_var_decl(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        is_global: bool,
        decl: &Decl,
        names: &[DeclName],
        ty: Option<&Expr>,
        values: &[Expr],
    ) -> CheckOutcome {
        let expected = match ty {
            None => None,
            Some(ty_expr) => match self.check_type_expr(txn, scope, ty_expr) {
                TypeOutcome::Unresolved => return CheckOutcome::Requeue,
                TypeOutcome::Invalid => {
                    for name in names {
                        if let Some(symbol) = self.package.global_symbol(name.name) {
                            txn.poison(symbol);
                        }
                    }
                    return CheckOutcome::Done;
                }
                TypeOutcome::Resolved(t) => Some(t),
            },
        };

        let symbols: Vec<SymbolId> = names
            .iter()
            .map(|name| self.decl_symbol(txn, scope, is_global, name, decl.id))
            .collect();

        if values.is_empty() {
            // `x, y: i32` adopts the declared type with a zero value.
            let Some(expected) = expected else {
                txn.error(
                    ErrorCode::Syntax,
                    decl.pos,
                    "Variable declarations require a type or an initial value",
                );
                for &symbol in &symbols {
                    txn.poison(symbol);
                }
                return CheckOutcome::Done;
            };

            for &symbol in &symbols {
                txn.resolve(symbol, SymbolKind::Variable, expected, Val::None);
            }

            let ty_pos = ty.map_or(decl.pos, |t| t.pos);
            match self.session.types.lookup(expected).kind {
                TypeKind::Array {
                    length: IMPLICIT_LENGTH,
                    ..
                } => {
                    txn.error(
                        ErrorCode::UninitImplicitArray,
                        ty_pos,
                        "Implicit-length array must have an initial value",
                    );
                }
                TypeKind::Function { .. } => {
                    txn.error(
                        ErrorCode::UninitFunctionType,
                        ty_pos,
                        "Variables of a function type must be initialized",
                    );
                    txn.note(
                        ty_pos,
                        format!(
                            "If you want an uninitialized function pointer use *{} instead",
                            self.session.types.describe(expected)
                        ),
                    );
                }
                _ => {}
            }
        } else {
            if values.len() != names.len() {
                txn.error(
                    ErrorCode::ArityMismatch,
                    decl.pos,
                    format!(
                        "The amount of identifiers ({}) doesn't match the amount of values ({})",
                        names.len(),
                        values.len()
                    ),
                );
                for &symbol in &symbols {
                    txn.poison(symbol);
                }
                return CheckOutcome::Done;
            }

            // Every value is diagnosed in one pass; a failed value poisons
            // only its own symbol.
            for (i, value) in values.iter().enumerate() {
                let out = self.check_expr(txn, scope, value, expected);
                match out.mode {
                    ExprMode::Unresolved => return CheckOutcome::Requeue,
                    ExprMode::Invalid => {
                        txn.poison(symbols[i]);
                        continue;
                    }
                    ExprMode::Type => {
                        txn.error(
                            ErrorCode::TypeNotAnExpression,
                            value.pos,
                            "Metatype is not a valid expression",
                        );
                        txn.poison(symbols[i]);
                        continue;
                    }
                    _ => {}
                }

                if let Some(expected) = expected {
                    if !self.session.types.convert(out.ty, expected) {
                        self.report_conversion_error(txn, value.pos, out.ty, expected);
                        txn.poison(symbols[i]);
                        continue;
                    }
                }

                txn.resolve(
                    symbols[i],
                    SymbolKind::Variable,
                    expected.unwrap_or(out.ty),
                    Val::None,
                );
            }
        }

        txn.annotate(
            decl.id,
            CheckerInfo::DeclList {
                symbols: symbols.into_boxed_slice(),
                is_global,
            },
        );
        CheckOutcome::Done
    }

    /// The symbol a declared name binds to: the pre-collected global, or a
    /// fresh declaration in the current scope.
    fn decl_symbol(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        is_global: bool,
        name: &DeclName,
        decl: NodeId,
    ) -> SymbolId {
        if is_global {
            if let Some(symbol) = self.package.global_symbol(name.name) {
                return symbol;
            }
        }

        if let Some(existing) = self.package.scopes().get_local(scope, name.name) {
            let spelled = self.session.interner.lookup(name.name);
            let previous_pos = self.package.symbol(existing).decl_pos;
            txn.error(
                ErrorCode::Redefinition,
                name.pos,
                format!("Duplicate definition of symbol {spelled}"),
            );
            txn.note(previous_pos, format!("Previous definition of {spelled}"));
            return existing;
        }

        let id = self
            .package
            .alloc_symbol(Symbol::unresolved(name.name, Some(decl), name.pos));
        self.package.scopes_mut().insert(scope, name.name, id);
        txn.inserted.push((scope, name.name));
        id
    }

    // === Expressions ===

    fn check_expr(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        expr: &Expr,
        desired: Option<TypeId>,
    ) -> ExprOutcome {
        match &expr.kind {
            ExprKind::Ident(name) => self.check_ident(txn, scope, expr, *name),
            ExprKind::LitInt(value) => self.check_int_lit(txn, expr, *value, desired),
            ExprKind::LitFloat(value) => self.check_float_lit(txn, expr, *value, desired),
            ExprKind::LitFunction { signature } => {
                match self.check_func_type(txn, scope, signature) {
                    TypeOutcome::Unresolved => ExprOutcome::unresolved(),
                    TypeOutcome::Invalid => ExprOutcome::invalid(),
                    TypeOutcome::Resolved(ty) => {
                        txn.annotate(
                            expr.id,
                            CheckerInfo::BasicExpr {
                                coerce: Coercion::NONE,
                                ty,
                                is_constant: false,
                                val: Val::None,
                            },
                        );
                        ExprOutcome {
                            ty,
                            mode: ExprMode::Computed,
                            val: Val::None,
                        }
                    }
                }
            }
            ExprKind::TypeFunction(signature) => {
                match self.check_func_type(txn, scope, signature) {
                    TypeOutcome::Unresolved => ExprOutcome::unresolved(),
                    TypeOutcome::Invalid => ExprOutcome::invalid(),
                    TypeOutcome::Resolved(ty) => self.meta_outcome(ty),
                }
            }
            ExprKind::TypePointer { pointee } => {
                match self.check_type_expr(txn, scope, pointee) {
                    TypeOutcome::Unresolved => ExprOutcome::unresolved(),
                    TypeOutcome::Invalid => ExprOutcome::invalid(),
                    TypeOutcome::Resolved(pointee) => {
                        let ty = self.session.types.pointer(TypeFlags::empty(), pointee);
                        self.meta_outcome(ty)
                    }
                }
            }
            ExprKind::TypeSlice { element } => match self.check_type_expr(txn, scope, element) {
                TypeOutcome::Unresolved => ExprOutcome::unresolved(),
                TypeOutcome::Invalid => ExprOutcome::invalid(),
                TypeOutcome::Resolved(element) => {
                    let ty = self.session.types.slice(TypeFlags::empty(), element);
                    self.meta_outcome(ty)
                }
            },
            ExprKind::TypeArray { length, element } => {
                self.check_array_type(txn, scope, expr, length.as_deref(), element)
            }
            ExprKind::TypeStruct(fields) => {
                let mut members = Vec::with_capacity(fields.len());
                for field in fields.iter() {
                    match self.check_type_expr(txn, scope, &field.ty) {
                        TypeOutcome::Unresolved => return ExprOutcome::unresolved(),
                        TypeOutcome::Invalid => return ExprOutcome::invalid(),
                        TypeOutcome::Resolved(t) => members.push(t),
                    }
                }
                let ty = self
                    .session
                    .types
                    .struct_type(TypeFlags::empty(), members.into_boxed_slice());
                self.meta_outcome(ty)
            }
            ExprKind::TypeUnion(cases) => {
                let mut case_types = Vec::with_capacity(cases.len());
                for case in cases.iter() {
                    match self.check_type_expr(txn, scope, &case.ty) {
                        TypeOutcome::Unresolved => return ExprOutcome::unresolved(),
                        TypeOutcome::Invalid => return ExprOutcome::invalid(),
                        TypeOutcome::Resolved(t) => case_types.push(t),
                    }
                }
                let ty = self
                    .session
                    .types
                    .union_type(TypeFlags::empty(), case_types.into_boxed_slice());
                self.meta_outcome(ty)
            }
        }
    }

    fn check_ident(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        expr: &Expr,
        name: Name,
    ) -> ExprOutcome {
        let Some(symbol) = self.lookup(scope, name) else {
            txn.error(
                ErrorCode::UndefinedIdent,
                expr.pos,
                format!(
                    "Use of undefined identifier '{}'",
                    self.session.interner.lookup(name)
                ),
            );
            return ExprOutcome::invalid();
        };

        txn.mark_used(symbol);
        let (kind, state, ty, val) = self.symbol_facts(symbol);
        if state != SymbolState::Resolved {
            return ExprOutcome::unresolved();
        }
        if kind == SymbolKind::Invalid {
            // Poisoned dependency; fail silently to stop the cascade.
            return ExprOutcome::invalid();
        }

        txn.annotate(
            expr.id,
            CheckerInfo::Ident {
                coerce: Coercion::NONE,
                symbol,
            },
        );

        let mode = match kind {
            SymbolKind::Type => ExprMode::Type,
            SymbolKind::Constant if self.session.builtins.is_bool_constant(symbol) => {
                ExprMode::Computed
            }
            _ => ExprMode::Addressable,
        };
        ExprOutcome { ty, mode, val }
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_int_lit(
        &mut self,
        txn: &mut Txn,
        expr: &Expr,
        value: u64,
        desired: Option<TypeId>,
    ) -> ExprOutcome {
        let types = &self.session.types;
        let (ty, val, coerce) = match desired {
            Some(desired) if types.is_integer(desired) => {
                let mut coerce = Coercion::SAME;
                if types.is_signed(desired) {
                    coerce = coerce.with_flag(Coercion::FLAG_SIGNED);
                }
                (desired, Val::Int(value), coerce)
            }
            Some(desired) if types.is_float(desired) => {
                (desired, Val::Float(value as f64), Coercion::INT_TO_FLOAT)
            }
            Some(desired) => {
                let from = types.describe(types.builtins().untyped_int);
                let to = types.describe(desired);
                txn.error(
                    ErrorCode::InvalidConversion,
                    expr.pos,
                    format!("Unable to convert type {from} to expected type {to}"),
                );
                return ExprOutcome::invalid();
            }
            None => (
                types.builtins().untyped_int,
                Val::Int(value),
                Coercion::NONE,
            ),
        };

        txn.annotate(
            expr.id,
            CheckerInfo::BasicExpr {
                coerce,
                ty,
                is_constant: true,
                val,
            },
        );
        ExprOutcome {
            ty,
            mode: ExprMode::Computed,
            val,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn check_float_lit(
        &mut self,
        txn: &mut Txn,
        expr: &Expr,
        value: f64,
        desired: Option<TypeId>,
    ) -> ExprOutcome {
        let types = &self.session.types;
        let (ty, val, coerce) = match desired {
            Some(desired) if types.is_integer(desired) => {
                // A float literal in integer context truncates.
                let coerce = Coercion::FLOAT_TO_INT.with_flag(Coercion::FLAG_FLOAT);
                (desired, Val::Int(value as u64), coerce)
            }
            Some(desired) if types.is_float(desired) => {
                let coerce = Coercion::SAME.with_flag(Coercion::FLAG_FLOAT);
                (desired, Val::Float(value), coerce)
            }
            Some(desired) => {
                let from = types.describe(types.builtins().untyped_float);
                let to = types.describe(desired);
                txn.error(
                    ErrorCode::InvalidConversion,
                    expr.pos,
                    format!("Unable to convert type {from} to expected type {to}"),
                );
                return ExprOutcome::invalid();
            }
            None => (
                types.builtins().untyped_float,
                Val::Float(value),
                Coercion::NONE,
            ),
        };

        txn.annotate(
            expr.id,
            CheckerInfo::BasicExpr {
                coerce,
                ty,
                is_constant: true,
                val,
            },
        );
        ExprOutcome {
            ty,
            mode: ExprMode::Computed,
            val,
        }
    }

    fn check_array_type(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        expr: &Expr,
        length: Option<&Expr>,
        element: &Expr,
    ) -> ExprOutcome {
        let element = match self.check_type_expr(txn, scope, element) {
            TypeOutcome::Unresolved => return ExprOutcome::unresolved(),
            TypeOutcome::Invalid => return ExprOutcome::invalid(),
            TypeOutcome::Resolved(t) => t,
        };

        let length = match length {
            None => IMPLICIT_LENGTH,
            Some(len_expr) => {
                let out = self.check_expr(txn, scope, len_expr, None);
                match out.mode {
                    ExprMode::Unresolved => return ExprOutcome::unresolved(),
                    ExprMode::Invalid => return ExprOutcome::invalid(),
                    _ => {}
                }
                match out.val {
                    Val::Int(n) if self.session.types.is_integer(out.ty) => {
                        match i64::try_from(n) {
                            Ok(length) => length,
                            Err(_) => {
                                txn.error(
                                    ErrorCode::TypeMismatch,
                                    len_expr.pos,
                                    format!("Array length {n} is out of range"),
                                );
                                return ExprOutcome::invalid();
                            }
                        }
                    }
                    _ => {
                        txn.error(
                            ErrorCode::TypeMismatch,
                            len_expr.pos,
                            "Array length must be a constant integer",
                        );
                        return ExprOutcome::invalid();
                    }
                }
            }
        };

        match self.session.types.array(TypeFlags::empty(), length, element) {
            Ok(ty) => self.meta_outcome(ty),
            Err(err) => {
                txn.error(ErrorCode::TypeMismatch, expr.pos, err.to_string());
                ExprOutcome::invalid()
            }
        }
    }

    /// Resolve an expression required to denote a type, lowering its
    /// metatype to the instance type.
    fn check_type_expr(&mut self, txn: &mut Txn, scope: ScopeId, expr: &Expr) -> TypeOutcome {
        let out = self.check_expr(txn, scope, expr, None);
        match out.mode {
            ExprMode::Unresolved => TypeOutcome::Unresolved,
            ExprMode::Invalid => TypeOutcome::Invalid,
            ExprMode::Type => match self.session.types.instance_of(out.ty) {
                Some(instance) => TypeOutcome::Resolved(instance),
                None => TypeOutcome::Invalid,
            },
            _ => {
                txn.error(
                    ErrorCode::NotAType,
                    expr.pos,
                    format!(
                        "{} cannot be used as a type",
                        self.session.types.describe(out.ty)
                    ),
                );
                TypeOutcome::Invalid
            }
        }
    }

    fn check_func_type(
        &mut self,
        txn: &mut Txn,
        scope: ScopeId,
        signature: &FunctionSignature,
    ) -> TypeOutcome {
        let mut params = Vec::with_capacity(signature.params.len());
        for param in signature.params.iter() {
            match self.check_type_expr(txn, scope, param) {
                TypeOutcome::Unresolved => return TypeOutcome::Unresolved,
                TypeOutcome::Invalid => return TypeOutcome::Invalid,
                TypeOutcome::Resolved(t) => params.push(t),
            }
        }

        let mut results = Vec::with_capacity(signature.results.len());
        for result in signature.results.iter() {
            match self.check_type_expr(txn, scope, result) {
                TypeOutcome::Unresolved => return TypeOutcome::Unresolved,
                TypeOutcome::Invalid => return TypeOutcome::Invalid,
                TypeOutcome::Resolved(t) => results.push(t),
            }
        }

        TypeOutcome::Resolved(
            self.session
                .types
                .function(TypeFlags::empty(), &params, &results),
        )
    }

    // === Helpers ===

    fn meta_outcome(&self, instance: TypeId) -> ExprOutcome {
        ExprOutcome {
            ty: self.session.types.metatype(instance),
            mode: ExprMode::Type,
            val: Val::None,
        }
    }

    /// Walk the package scope chain, then the shared builtin scope.
    fn lookup(&self, scope: ScopeId, name: Name) -> Option<SymbolId> {
        self.package
            .scopes()
            .lookup(scope, name)
            .or_else(|| self.session.builtins.lookup(name))
    }

    fn symbol_facts(&self, id: SymbolId) -> (SymbolKind, SymbolState, TypeId, Val) {
        let sym = if id.is_builtin() {
            self.session.builtins.symbol(id)
        } else {
            self.package.symbol(id)
        };
        (sym.kind, sym.state, sym.ty, sym.val)
    }

    fn report_conversion_error(&self, txn: &mut Txn, pos: Position, from: TypeId, to: TypeId) {
        let types = &self.session.types;
        txn.error(
            ErrorCode::InvalidConversion,
            pos,
            format!(
                "Unable to convert type {} to expected type {}",
                types.describe(from),
                types.describe(to)
            ),
        );
    }
}

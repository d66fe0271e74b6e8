use tracing::{debug, trace};

use super::env::TypeEnv;
use super::error::{TypeError, TypeErrorReason};
use super::subst::Substitution;
use super::ty::{Type, TypeVar, field_validity};
use super::unify::unify;
use crate::core::{BinOp, Binder, Expr, Literal, UnOp, Value};

/// Assign a type to `expr` under `env`.
///
/// This is the entry point of the static judgment. Each constructor has exactly
/// one rule; a rule whose premises fail produces a [`TypeError`] blaming the
/// expression the rule was tried on.
pub fn type_of(env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
    Checker::new().check(env, expr)
}

/// A field-validity premise that could not be decided when it was met.
#[derive(Debug, Clone)]
struct FieldObligation {
    ty: Type,
    is_ref: bool,
    expr: Expr,
}

/// A projection out of an operand whose aggregate shape was still unknown.
#[derive(Debug, Clone)]
struct PendingProjection {
    pair_ty: Type,
    result: Type,
    first: bool,
    expr: Expr,
}

/// Syntax-directed checker.
///
/// Parameters carry no annotations, so their types start out as type variables
/// and get pinned down by unification. The current substitution is kept in the
/// checker and applied whenever a type is read back.
///
/// Premises that depend on a still-unknown type are recorded and settled once
/// the whole expression has been walked. Whatever is left undetermined then is
/// defaulted: a projected operand becomes a plain pair, a field becomes `Int`.
pub struct Checker {
    next_var: usize,
    subst: Substitution,
    deferred: Vec<FieldObligation>,
    projections: Vec<PendingProjection>,
}

impl Checker {
    pub fn new() -> Self {
        Checker {
            next_var: 0,
            subst: Substitution::empty(),
            deferred: Vec::new(),
            projections: Vec::new(),
        }
    }

    /// Type `expr` and settle every recorded premise.
    pub fn check(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
        let ty = self.infer(env, expr)?;
        self.discharge_projections()?;
        self.discharge_deferred()?;
        let ty = self.resolve(&ty);
        debug!(ty = %ty, "expression typed");
        Ok(ty)
    }

    fn fresh_var(&mut self) -> Type {
        let id = self.next_var;
        self.next_var += 1;
        Type::Var(TypeVar::new(id))
    }

    fn resolve(&self, ty: &Type) -> Type {
        self.subst.apply(ty)
    }

    fn unify_at(&mut self, expected: &Type, found: &Type, at: &Expr) -> Result<(), TypeError> {
        let s = unify(&self.resolve(expected), &self.resolve(found))
            .map_err(|err| TypeError::from_unify_error(err, at))?;
        self.subst = s.compose(&self.subst);
        Ok(())
    }

    fn infer(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
        trace!(kind = expr.kind(), "infer");
        match expr {
            Expr::Val(value) => self.infer_value(env, value, expr),

            Expr::Var(name) => match env.lookup(name) {
                Some(ty) => Ok(self.resolve(ty)),
                None => Err(TypeError::new(
                    expr,
                    TypeErrorReason::UnboundVariable(name.clone()),
                )),
            },

            // The self-name is deliberately left unbound.
            Expr::Rec(_, param, body) => self.infer_function(env, param, body),

            Expr::App(func, arg) => self.infer_app(env, func, arg, expr),

            Expr::UnOp(op, operand) => {
                let operand_ty = self.infer(env, operand)?;
                let ty = match op {
                    UnOp::Neg => Type::Bool,
                    UnOp::Minus => Type::Int,
                };
                self.unify_at(&ty, &operand_ty, expr)?;
                Ok(ty)
            }

            Expr::BinOp(op, left, right) => {
                let Some((left_expected, right_expected, result)) = binop_signature(*op) else {
                    return Err(TypeError::new(expr, TypeErrorReason::Untypable));
                };
                let left_ty = self.infer(env, left)?;
                let right_ty = self.infer(env, right)?;
                self.unify_at(&left_expected, &left_ty, expr)?;
                self.unify_at(&right_expected, &right_ty, expr)?;
                Ok(result)
            }

            Expr::If(condition, then_expr, else_expr) => {
                let cond_ty = self.infer(env, condition)?;
                self.unify_at(&Type::Bool, &cond_ty, expr)?;
                let then_ty = self.infer(env, then_expr)?;
                let else_ty = self.infer(env, else_expr)?;
                self.unify_at(&then_ty, &else_ty, expr)?;
                Ok(self.resolve(&then_ty))
            }

            Expr::Pair(is_ref, first, second) => {
                let first_ty = self.infer(env, first)?;
                let second_ty = self.infer(env, second)?;
                self.aggregate(*is_ref, first_ty, second_ty, expr)
                    .map(|(t1, t2)| Type::pair(*is_ref, t1, t2))
            }

            Expr::Class(first, second) => {
                let first_ty = self.infer(env, first)?;
                let second_ty = self.infer(env, second)?;
                self.aggregate(false, first_ty, second_ty, expr)
                    .map(|(t1, t2)| Type::class(t1, t2))
            }

            Expr::Fst(pair) => self.infer_projection(env, pair, expr, true),
            Expr::Snd(pair) => self.infer_projection(env, pair, expr, false),

            Expr::Ref(inner) => match inner.as_ref() {
                Expr::Var(_) => Ok(Type::reference(self.infer(env, inner)?)),
                _ => Err(TypeError::new(expr, TypeErrorReason::IllegalReference)),
            },

            // Heap operations are checked at runtime only.
            Expr::AllocN(..) | Expr::Free(_) | Expr::Load(_) | Expr::Store(..) => {
                Err(TypeError::new(expr, TypeErrorReason::Untypable))
            }
        }
    }

    fn infer_value(&mut self, env: &TypeEnv, value: &Value, expr: &Expr) -> Result<Type, TypeError> {
        match value {
            Value::Lit(Literal::Int(_)) => Ok(Type::Int),
            Value::Lit(Literal::Bool(_)) => Ok(Type::Bool),
            Value::Lit(Literal::Unit) => Ok(Type::Unit),
            Value::Lit(Literal::Loc(_)) => Err(TypeError::new(expr, TypeErrorReason::Untypable)),
            Value::Closure { param, body, .. } => self.infer_function(env, param, body),
            Value::Pair {
                is_ref,
                first,
                second,
            } => {
                let first_ty = self.infer_value(env, first, &Expr::Val(first.as_ref().clone()))?;
                let second_ty =
                    self.infer_value(env, second, &Expr::Val(second.as_ref().clone()))?;
                self.aggregate(*is_ref, first_ty, second_ty, expr)
                    .map(|(t1, t2)| Type::pair(*is_ref, t1, t2))
            }
        }
    }

    fn infer_function(
        &mut self,
        env: &TypeEnv,
        param: &Binder,
        body: &Expr,
    ) -> Result<Type, TypeError> {
        let param_ty = self.fresh_var();
        let body_env = env.extend(param, param_ty.clone());
        let body_ty = self.infer(&body_env, body)?;
        Ok(Type::arrow(self.resolve(&param_ty), body_ty))
    }

    fn infer_app(
        &mut self,
        env: &TypeEnv,
        func: &Expr,
        arg: &Expr,
        expr: &Expr,
    ) -> Result<Type, TypeError> {
        let func_ty = self.infer(env, func)?;
        let arg_ty = self.infer(env, arg)?;

        match self.resolve(&func_ty) {
            Type::Arrow(param_ty, result_ty) => {
                self.unify_at(&param_ty, &arg_ty, expr)?;
                Ok(self.resolve(&result_ty))
            }
            Type::Var(_) => {
                let result_ty = self.fresh_var();
                let expected = Type::arrow(arg_ty, result_ty.clone());
                self.unify_at(&expected, &func_ty, expr)?;
                Ok(self.resolve(&result_ty))
            }
            other => Err(TypeError::new(expr, TypeErrorReason::NotAFunction(other))),
        }
    }

    fn infer_projection(
        &mut self,
        env: &TypeEnv,
        pair: &Expr,
        expr: &Expr,
        first: bool,
    ) -> Result<Type, TypeError> {
        let pair_ty = self.infer(env, pair)?;
        match self.resolve(&pair_ty) {
            Type::Pair(_, t1, t2) | Type::Class(t1, t2) => Ok(if first { *t1 } else { *t2 }),
            ty @ Type::Var(_) => {
                let result = self.fresh_var();
                trace!(operand = %ty, "projection deferred");
                self.projections.push(PendingProjection {
                    pair_ty: ty,
                    result: result.clone(),
                    first,
                    expr: expr.clone(),
                });
                Ok(result)
            }
            ty => Err(TypeError::new(expr, TypeErrorReason::NotAnAggregate(ty))),
        }
    }

    /// Settle deferred projections, repeating while any operand gets resolved.
    /// When none can make progress the oldest operand is taken to be a plain
    /// pair and the loop goes on.
    fn discharge_projections(&mut self) -> Result<(), TypeError> {
        let mut pending = std::mem::take(&mut self.projections);
        while !pending.is_empty() {
            let before = pending.len();
            let mut waiting = Vec::new();
            for projection in pending {
                match self.resolve(&projection.pair_ty) {
                    Type::Var(_) => waiting.push(projection),
                    ty => self.project(&ty, &projection)?,
                }
            }

            if waiting.len() == before
                && let Some(stalled) = waiting.first()
            {
                let (pair_ty, at) = (stalled.pair_ty.clone(), stalled.expr.clone());
                let shape = self.plain_pair_shape(&at)?;
                debug!(shape = %shape, "projection operand defaulted");
                self.unify_at(&shape, &pair_ty, &at)?;
            }
            pending = waiting;
        }
        Ok(())
    }

    fn project(&mut self, pair_ty: &Type, projection: &PendingProjection) -> Result<(), TypeError> {
        match pair_ty {
            Type::Pair(_, t1, t2) | Type::Class(t1, t2) => {
                let component = if projection.first { t1 } else { t2 };
                self.unify_at(&projection.result, component, &projection.expr)
            }
            other => Err(TypeError::new(
                &projection.expr,
                TypeErrorReason::NotAnAggregate(other.clone()),
            )),
        }
    }

    /// `(α * β)` with both fields owing a plain-field obligation.
    fn plain_pair_shape(&mut self, at: &Expr) -> Result<Type, TypeError> {
        let first = self.fresh_var();
        let second = self.fresh_var();
        self.require_field(&first, false, at)?;
        self.require_field(&second, false, at)?;
        Ok(Type::pair(false, first, second))
    }

    /// Apply the field-validity premises of an aggregate rule.
    fn aggregate(
        &mut self,
        is_ref: bool,
        first_ty: Type,
        second_ty: Type,
        expr: &Expr,
    ) -> Result<(Type, Type), TypeError> {
        let first_ty = self.resolve(&first_ty);
        let second_ty = self.resolve(&second_ty);
        self.require_field(&first_ty, is_ref, expr)?;
        self.require_field(&second_ty, is_ref, expr)?;
        Ok((first_ty, second_ty))
    }

    fn require_field(&mut self, ty: &Type, is_ref: bool, expr: &Expr) -> Result<(), TypeError> {
        match field_validity(ty, is_ref) {
            Some(true) => Ok(()),
            Some(false) => Err(TypeError::new(
                expr,
                TypeErrorReason::InvalidField {
                    ty: ty.clone(),
                    is_ref,
                },
            )),
            None => {
                self.deferred.push(FieldObligation {
                    ty: ty.clone(),
                    is_ref,
                    expr: expr.clone(),
                });
                Ok(())
            }
        }
    }

    /// Recheck deferred field premises. Variables still free at this point are
    /// bound to `Int`, which is a valid field under either tagging.
    fn discharge_deferred(&mut self) -> Result<(), TypeError> {
        for obligation in std::mem::take(&mut self.deferred) {
            let is_ref = obligation.is_ref;
            let mut ty = self.resolve(&obligation.ty);
            if field_validity(&ty, is_ref).is_none() {
                for var in ty.free_type_vars() {
                    self.unify_at(&Type::Int, &Type::Var(var), &obligation.expr)?;
                }
                ty = self.resolve(&obligation.ty);
                debug!(ty = %ty, "field defaulted");
            }
            if field_validity(&ty, is_ref) != Some(true) {
                return Err(TypeError::new(
                    &obligation.expr,
                    TypeErrorReason::InvalidField { ty, is_ref },
                ));
            }
        }
        Ok(())
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Operand and result types of a binary operator, or `None` when the operator
/// has no typing rule.
fn binop_signature(op: BinOp) -> Option<(Type, Type, Type)> {
    match op {
        BinOp::Plus
        | BinOp::Minus
        | BinOp::Mult
        | BinOp::Quot
        | BinOp::Rem
        | BinOp::ShiftL
        | BinOp::ShiftR => Some((Type::Int, Type::Int, Type::Int)),
        // Equality is restricted to booleans.
        BinOp::And | BinOp::Or | BinOp::Xor | BinOp::Eq => {
            Some((Type::Bool, Type::Bool, Type::Bool))
        }
        BinOp::Le | BinOp::Lt => Some((Type::Int, Type::Int, Type::Bool)),
        BinOp::Offset => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(expr: &Expr) -> Result<Type, TypeError> {
        type_of(&TypeEnv::empty(), expr)
    }

    fn reason(expr: &Expr) -> TypeErrorReason {
        check(expr).unwrap_err().reason
    }

    #[test]
    fn test_literals() {
        assert_eq!(check(&Expr::int(42)), Ok(Type::Int));
        assert_eq!(check(&Expr::bool(true)), Ok(Type::Bool));
        assert_eq!(check(&Expr::unit()), Ok(Type::Unit));
    }

    #[test]
    fn test_unbound_variable_blames_the_variable() {
        let err = check(&Expr::var("x")).unwrap_err();
        assert_eq!(err.expr, Expr::var("x"));
        assert_eq!(err.reason, TypeErrorReason::UnboundVariable("x".to_string()));
    }

    #[test]
    fn test_variable_from_context() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::Bool)]);
        assert_eq!(type_of(&env, &Expr::var("x")), Ok(Type::Bool));
    }

    #[test]
    fn test_identity_function() {
        let ty = check(&Expr::lam("x", Expr::var("x"))).unwrap();
        match ty {
            Type::Arrow(t1, t2) => assert_eq!(t1, t2),
            _ => panic!("Expected function type"),
        }
    }

    #[test]
    fn test_parameter_pinned_by_body() {
        let expr = Expr::lam("x", Expr::binop(BinOp::Plus, Expr::var("x"), Expr::int(1)));
        assert_eq!(check(&expr), Ok(Type::arrow(Type::Int, Type::Int)));
    }

    #[test]
    fn test_application() {
        let expr = Expr::app(Expr::lam("x", Expr::unop(UnOp::Neg, Expr::var("x"))), Expr::bool(true));
        assert_eq!(check(&expr), Ok(Type::Bool));
    }

    #[test]
    fn test_application_argument_mismatch() {
        let func = Expr::lam("x", Expr::unop(UnOp::Minus, Expr::var("x")));
        let expr = Expr::app(func, Expr::bool(true));
        assert_eq!(
            reason(&expr),
            TypeErrorReason::Mismatch {
                expected: Type::Int,
                found: Type::Bool
            }
        );
    }

    #[test]
    fn test_application_of_non_function() {
        let expr = Expr::app(Expr::int(1), Expr::int(2));
        assert_eq!(reason(&expr), TypeErrorReason::NotAFunction(Type::Int));
    }

    #[test]
    fn test_application_of_parameter() {
        // λf. f 1 : (Int -> 't) -> 't
        let expr = Expr::lam("f", Expr::app(Expr::var("f"), Expr::int(1)));
        match check(&expr).unwrap() {
            Type::Arrow(param, result) => {
                assert_eq!(*param, Type::arrow(Type::Int, (*result).clone()));
            }
            other => panic!("Expected function type, got {}", other),
        }
    }

    #[test]
    fn test_self_name_is_not_bound() {
        let expr = Expr::rec("f", "x", Expr::app(Expr::var("f"), Expr::var("x")));
        assert_eq!(reason(&expr), TypeErrorReason::UnboundVariable("f".to_string()));
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(check(&Expr::unop(UnOp::Neg, Expr::bool(false))), Ok(Type::Bool));
        assert_eq!(check(&Expr::unop(UnOp::Minus, Expr::int(3))), Ok(Type::Int));
        assert!(check(&Expr::unop(UnOp::Neg, Expr::int(3))).is_err());
    }

    #[test]
    fn test_equality_is_boolean_only() {
        let bools = Expr::binop(BinOp::Eq, Expr::bool(true), Expr::bool(false));
        assert_eq!(check(&bools), Ok(Type::Bool));

        let ints = Expr::binop(BinOp::Eq, Expr::int(1), Expr::int(1));
        assert!(matches!(reason(&ints), TypeErrorReason::Mismatch { .. }));
    }

    #[test]
    fn test_comparison_yields_bool() {
        let expr = Expr::binop(BinOp::Lt, Expr::int(1), Expr::int(2));
        assert_eq!(check(&expr), Ok(Type::Bool));
    }

    #[test]
    fn test_offset_is_untyped() {
        let expr = Expr::binop(BinOp::Offset, Expr::int(1), Expr::int(2));
        assert_eq!(reason(&expr), TypeErrorReason::Untypable);
    }

    #[test]
    fn test_if_branches_must_agree() {
        let expr = Expr::if_then_else(Expr::bool(true), Expr::int(1), Expr::bool(false));
        let err = check(&expr).unwrap_err();
        assert_eq!(err.expr, expr);
        assert_eq!(
            err.reason,
            TypeErrorReason::Mismatch {
                expected: Type::Int,
                found: Type::Bool
            }
        );
    }

    #[test]
    fn test_if_condition_must_be_bool() {
        let expr = Expr::if_then_else(Expr::int(0), Expr::int(1), Expr::int(2));
        assert!(check(&expr).is_err());
    }

    #[test]
    fn test_ref_pair_rejects_plain_pair_field() {
        let expr = Expr::pair(
            true,
            Expr::int(1),
            Expr::pair(false, Expr::int(1), Expr::int(2)),
        );
        let err = check(&expr).unwrap_err();
        assert_eq!(err.expr, expr);
        assert!(matches!(
            err.reason,
            TypeErrorReason::InvalidField { is_ref: true, .. }
        ));
    }

    #[test]
    fn test_nested_ref_pairs() {
        let expr = Expr::pair(
            true,
            Expr::int(1),
            Expr::pair(true, Expr::bool(true), Expr::unit()),
        );
        assert_eq!(
            check(&expr),
            Ok(Type::pair(
                true,
                Type::Int,
                Type::pair(true, Type::Bool, Type::Unit)
            ))
        );
    }

    #[test]
    fn test_class_rejects_ref_pair_field() {
        let expr = Expr::class(Expr::int(1), Expr::pair(true, Expr::int(1), Expr::int(2)));
        assert!(matches!(
            reason(&expr),
            TypeErrorReason::InvalidField { is_ref: false, .. }
        ));
    }

    #[test]
    fn test_class_is_distinct_from_pair() {
        let expr = Expr::if_then_else(
            Expr::bool(true),
            Expr::class(Expr::int(1), Expr::int(2)),
            Expr::pair(false, Expr::int(1), Expr::int(2)),
        );
        assert!(matches!(reason(&expr), TypeErrorReason::Mismatch { .. }));
    }

    #[test]
    fn test_projection_ignores_tagging() {
        let ref_pair = Expr::pair(true, Expr::int(1), Expr::bool(true));
        assert_eq!(check(&Expr::fst(ref_pair.clone())), Ok(Type::Int));
        assert_eq!(check(&Expr::snd(ref_pair)), Ok(Type::Bool));

        let class = Expr::class(Expr::unit(), Expr::int(4));
        assert_eq!(check(&Expr::snd(class)), Ok(Type::Int));
    }

    #[test]
    fn test_projection_of_unknown_shape() {
        let expr = Expr::lam("p", Expr::fst(Expr::var("p")));
        assert_eq!(
            check(&expr),
            Ok(Type::arrow(
                Type::pair(false, Type::Int, Type::Int),
                Type::Int
            ))
        );
        assert!(matches!(
            reason(&Expr::fst(Expr::int(1))),
            TypeErrorReason::NotAnAggregate(Type::Int)
        ));
    }

    #[test]
    fn test_deferred_field_resolved_later() {
        // λx. ((x, 1), x + 1): the field type of `x` is only known after `x + 1`.
        let expr = Expr::lam(
            "x",
            Expr::pair(
                false,
                Expr::pair(false, Expr::var("x"), Expr::int(1)),
                Expr::binop(BinOp::Plus, Expr::var("x"), Expr::int(1)),
            ),
        );
        let ty = check(&expr).unwrap();
        assert_eq!(
            ty,
            Type::arrow(
                Type::Int,
                Type::pair(false, Type::pair(false, Type::Int, Type::Int), Type::Int)
            )
        );
    }

    #[test]
    fn test_unresolved_field_defaults_to_int() {
        let expr = Expr::lam("x", Expr::pair(false, Expr::var("x"), Expr::int(1)));
        assert_eq!(
            check(&expr),
            Ok(Type::arrow(
                Type::Int,
                Type::pair(false, Type::Int, Type::Int)
            ))
        );

        let expr = Expr::lam("x", Expr::pair(true, Expr::var("x"), Expr::int(1)));
        assert_eq!(
            check(&expr),
            Ok(Type::arrow(Type::Int, Type::pair(true, Type::Int, Type::Int)))
        );
    }

    #[test]
    fn test_unresolved_reference_field_defaults_to_int() {
        // λx. ref (&x, ())
        let expr = Expr::lam(
            "x",
            Expr::pair(true, Expr::reference("x"), Expr::unit()),
        );
        assert_eq!(
            check(&expr),
            Ok(Type::arrow(
                Type::Int,
                Type::pair(true, Type::reference(Type::Int), Type::Unit)
            ))
        );
    }

    #[test]
    fn test_projection_resolved_by_application() {
        let fst = Expr::lam("p", Expr::fst(Expr::var("p")));
        let applied = Expr::app(fst, Expr::pair(false, Expr::int(1), Expr::int(2)));
        assert_eq!(check(&applied), Ok(Type::Int));

        let snd = Expr::lam("p", Expr::snd(Expr::var("p")));
        let applied = Expr::app(snd, Expr::class(Expr::int(1), Expr::bool(true)));
        assert_eq!(check(&applied), Ok(Type::Bool));
    }

    #[test]
    fn test_nested_projection_of_unknown_shape() {
        // λp. fst (fst p)
        let expr = Expr::lam("p", Expr::fst(Expr::fst(Expr::var("p"))));
        assert_eq!(
            check(&expr),
            Ok(Type::arrow(
                Type::pair(false, Type::pair(false, Type::Int, Type::Int), Type::Int),
                Type::Int
            ))
        );
    }

    #[test]
    fn test_projection_of_non_aggregate_found_late() {
        // (λp. fst p) 1
        let expr = Expr::app(Expr::lam("p", Expr::fst(Expr::var("p"))), Expr::int(1));
        let err = check(&expr).unwrap_err();
        assert_eq!(err.expr, Expr::fst(Expr::var("p")));
        assert_eq!(err.reason, TypeErrorReason::NotAnAggregate(Type::Int));
    }

    #[test]
    fn test_reference_of_variable() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::Int)]);
        assert_eq!(
            type_of(&env, &Expr::reference("x")),
            Ok(Type::reference(Type::Int))
        );
    }

    #[test]
    fn test_reference_of_non_variable() {
        let expr = Expr::Ref(Box::new(Expr::int(1)));
        let err = check(&expr).unwrap_err();
        assert_eq!(err.reason, TypeErrorReason::IllegalReference);
        assert_eq!(err.expr, expr);
    }

    #[test]
    fn test_reference_field_in_ref_struct() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::Int)]);
        let ok = Expr::pair(true, Expr::reference("x"), Expr::int(0));
        assert!(type_of(&env, &ok).is_ok());

        let bad = Expr::pair(false, Expr::reference("x"), Expr::int(0));
        assert!(type_of(&env, &bad).is_err());
    }

    #[test]
    fn test_heap_operations_are_untyped() {
        let exprs = [
            Expr::alloc(Expr::int(0)),
            Expr::free(Expr::int(0)),
            Expr::load(Expr::int(0)),
            Expr::store(Expr::int(0), Expr::int(1)),
        ];
        for expr in exprs {
            assert_eq!(reason(&expr), TypeErrorReason::Untypable);
        }
    }

    #[test]
    fn test_pair_value() {
        let value = Expr::Val(Value::pair(false, Value::int(1), Value::unit()));
        assert_eq!(check(&value), Ok(Type::pair(false, Type::Int, Type::Unit)));

        let bad = Expr::Val(Value::pair(
            true,
            Value::int(1),
            Value::pair(false, Value::int(1), Value::int(1)),
        ));
        assert!(check(&bad).is_err());
    }

    #[test]
    fn test_occurs_check() {
        // λx. x x
        let expr = Expr::lam("x", Expr::app(Expr::var("x"), Expr::var("x")));
        assert!(matches!(reason(&expr), TypeErrorReason::OccursCheck { .. }));
    }
}

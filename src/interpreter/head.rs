//! The head-step relation: one atomic reduction of a redex.
//!
//! Every rule consumes operands that are already values and produces exactly
//! one expression. A rule that fails leaves the heap exactly as it found it.

use tracing::trace;

use super::error::StuckError;
use super::heap::Heap;
use crate::core::{BinOp, Expr, Literal, UnOp, Value, subst_binder};

/// Reduce `redex` by one head step.
///
/// `redex` is expected to come out of [`super::decompose`]; anything that no
/// rule covers is reported as the matching [`StuckError`].
pub fn head_step(redex: &Expr, heap: &mut Heap) -> Result<Expr, StuckError> {
    trace!(redex = redex.kind(), "head step");
    match redex {
        Expr::Rec(name, param, body) => Ok(Expr::Val(Value::Closure {
            name: name.clone(),
            param: param.clone(),
            body: body.clone(),
        })),

        Expr::Var(name) => Err(StuckError::FreeVariable(name.clone())),

        Expr::App(func, arg) => {
            let (func, arg) = values(func, arg)?;
            match func {
                Value::Closure { name, param, body } => {
                    let body = subst_binder(name, func, body);
                    Ok(subst_binder(param, arg, &body))
                }
                other => Err(StuckError::NonFunctionApplication(other.clone())),
            }
        }

        Expr::UnOp(op, operand) => {
            let operand = value(operand)?;
            eval_unop(*op, operand).map(Expr::Val)
        }

        Expr::BinOp(op, left, right) => {
            let (left, right) = values(left, right)?;
            eval_binop(*op, left, right).map(Expr::Val)
        }

        Expr::If(condition, then_expr, else_expr) => {
            let condition = value(condition)?;
            match condition.as_bool() {
                Some(true) => Ok((**then_expr).clone()),
                Some(false) => Ok((**else_expr).clone()),
                None => Err(StuckError::NonBooleanCondition(condition.clone())),
            }
        }

        Expr::Pair(is_ref, first, second) => {
            let (first, second) = values(first, second)?;
            Ok(Expr::Val(Value::pair(*is_ref, first.clone(), second.clone())))
        }

        Expr::Class(first, second) => {
            let (first, second) = values(first, second)?;
            Ok(Expr::Val(Value::pair(false, first.clone(), second.clone())))
        }

        Expr::Fst(pair) => match value(pair)? {
            Value::Pair { first, .. } => Ok(Expr::Val((**first).clone())),
            other => Err(StuckError::NonPairProjection(other.clone())),
        },

        Expr::Snd(pair) => match value(pair)? {
            Value::Pair { second, .. } => Ok(Expr::Val((**second).clone())),
            other => Err(StuckError::NonPairProjection(other.clone())),
        },

        Expr::AllocN(size, init) => {
            let (size, init) = values(size, init)?;
            let n = size
                .as_int()
                .ok_or_else(|| StuckError::InvalidAllocationSize(size.clone()))?;
            let base = heap.allocate(n, init.clone())?;
            Ok(Expr::loc(base))
        }

        Expr::Free(loc) => {
            let loc = location(value(loc)?)?;
            heap.free(loc)?;
            Ok(Expr::unit())
        }

        Expr::Load(loc) => {
            let loc = location(value(loc)?)?;
            Ok(Expr::Val(heap.load(loc)?.clone()))
        }

        Expr::Store(loc, stored) => {
            let (loc, stored) = values(loc, stored)?;
            let loc = location(loc)?;
            heap.store(loc, stored.clone())?;
            Ok(Expr::unit())
        }

        // References are erased at runtime.
        Expr::Ref(inner) => match &**inner {
            Expr::Val(v) => Ok(Expr::Val(v.clone())),
            Expr::Var(name) => Err(StuckError::FreeVariable(name.clone())),
            _ => Err(StuckError::MalformedReference(redex.clone())),
        },

        Expr::Val(_) => Err(StuckError::NotARedex(redex.clone())),
    }
}

fn value(expr: &Expr) -> Result<&Value, StuckError> {
    match expr {
        Expr::Val(v) => Ok(v),
        Expr::Var(name) => Err(StuckError::FreeVariable(name.clone())),
        other => Err(StuckError::NotARedex(other.clone())),
    }
}

fn values<'a>(left: &'a Expr, right: &'a Expr) -> Result<(&'a Value, &'a Value), StuckError> {
    Ok((value(left)?, value(right)?))
}

fn location(value: &Value) -> Result<crate::core::Loc, StuckError> {
    value
        .as_loc()
        .ok_or_else(|| StuckError::InvalidAddress(value.clone()))
}

fn mismatch(op: &'static str, operands: &[&Value]) -> StuckError {
    StuckError::OperatorMismatch {
        op,
        operands: operands.iter().map(|v| (*v).clone()).collect(),
    }
}

pub fn eval_unop(op: UnOp, operand: &Value) -> Result<Value, StuckError> {
    match (op, operand) {
        (UnOp::Neg, Value::Lit(Literal::Bool(b))) => Ok(Value::bool(!b)),
        (UnOp::Neg, Value::Lit(Literal::Int(n))) => Ok(Value::int(!n)),
        (UnOp::Minus, Value::Lit(Literal::Int(n))) => Ok(Value::int(n.wrapping_neg())),
        _ => Err(mismatch(op.symbol(), &[operand])),
    }
}

pub fn eval_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value, StuckError> {
    let fail = || mismatch(op.symbol(), &[left, right]);
    let (Value::Lit(l), Value::Lit(r)) = (left, right) else {
        return Err(fail());
    };

    match (l, r) {
        (Literal::Int(a), Literal::Int(b)) => {
            let (a, b) = (*a, *b);
            let result = match op {
                BinOp::Plus => Value::int(a.wrapping_add(b)),
                BinOp::Minus => Value::int(a.wrapping_sub(b)),
                BinOp::Mult => Value::int(a.wrapping_mul(b)),
                BinOp::Quot => Value::int(a.checked_div(b).ok_or_else(fail)?),
                BinOp::Rem => Value::int(a.checked_rem(b).ok_or_else(fail)?),
                BinOp::And => Value::int(a & b),
                BinOp::Or => Value::int(a | b),
                BinOp::Xor => Value::int(a ^ b),
                BinOp::ShiftL => Value::int(a << shift_amount(b).ok_or_else(fail)?),
                BinOp::ShiftR => Value::int(a >> shift_amount(b).ok_or_else(fail)?),
                BinOp::Le => Value::bool(a <= b),
                BinOp::Lt => Value::bool(a < b),
                BinOp::Eq => Value::bool(a == b),
                BinOp::Offset => return Err(fail()),
            };
            Ok(result)
        }
        (Literal::Bool(a), Literal::Bool(b)) => match op {
            BinOp::And => Ok(Value::bool(a & b)),
            BinOp::Or => Ok(Value::bool(a | b)),
            BinOp::Xor => Ok(Value::bool(a ^ b)),
            BinOp::Eq => Ok(Value::bool(a == b)),
            _ => Err(fail()),
        },
        (Literal::Unit, Literal::Unit) => match op {
            BinOp::Eq => Ok(Value::bool(true)),
            _ => Err(fail()),
        },
        (Literal::Loc(a), Literal::Loc(b)) => match op {
            BinOp::Eq => Ok(Value::bool(a == b)),
            _ => Err(fail()),
        },
        (Literal::Loc(base), Literal::Int(offset)) if op == BinOp::Offset => base
            .offset(*offset)
            .map(Value::loc)
            .ok_or_else(fail),
        _ => Err(fail()),
    }
}

fn shift_amount(b: i64) -> Option<u32> {
    u32::try_from(b).ok().filter(|s| *s < 64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Loc;

    fn step(expr: &Expr) -> Result<Expr, StuckError> {
        head_step(expr, &mut Heap::new())
    }

    #[test]
    fn test_rec_becomes_closure() {
        let expr = Expr::rec("f", "x", Expr::var("x"));
        assert!(matches!(step(&expr), Ok(Expr::Val(Value::Closure { .. }))));
    }

    #[test]
    fn test_beta_substitutes_param_and_self() {
        let closure = step(&Expr::rec("f", "x", Expr::pair(false, Expr::var("f"), Expr::var("x")))).unwrap();
        let Expr::Val(closure_value) = closure.clone() else {
            panic!("Expected closure");
        };
        let result = step(&Expr::app(closure, Expr::int(4))).unwrap();
        assert_eq!(
            result,
            Expr::pair(false, Expr::Val(closure_value), Expr::int(4))
        );
    }

    #[test]
    fn test_self_name_wins_when_binders_clash() {
        let closure = step(&Expr::rec("x", "x", Expr::var("x"))).unwrap();
        let result = step(&Expr::app(closure.clone(), Expr::int(1))).unwrap();
        assert_eq!(result, closure);
    }

    #[test]
    fn test_apply_non_function() {
        let result = step(&Expr::app(Expr::int(1), Expr::int(2)));
        assert_eq!(result, Err(StuckError::NonFunctionApplication(Value::int(1))));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_binop(BinOp::Plus, &Value::int(2), &Value::int(3)), Ok(Value::int(5)));
        assert_eq!(eval_binop(BinOp::Minus, &Value::int(2), &Value::int(3)), Ok(Value::int(-1)));
        assert_eq!(eval_binop(BinOp::Quot, &Value::int(7), &Value::int(2)), Ok(Value::int(3)));
        assert_eq!(eval_binop(BinOp::Rem, &Value::int(7), &Value::int(2)), Ok(Value::int(1)));
        assert_eq!(eval_binop(BinOp::ShiftL, &Value::int(1), &Value::int(4)), Ok(Value::int(16)));
        assert_eq!(eval_binop(BinOp::Lt, &Value::int(1), &Value::int(4)), Ok(Value::bool(true)));
        assert_eq!(eval_binop(BinOp::Plus, &Value::int(i64::MAX), &Value::int(1)), Ok(Value::int(i64::MIN)));
    }

    #[test]
    fn test_partial_operators_get_stuck() {
        assert!(eval_binop(BinOp::Quot, &Value::int(1), &Value::int(0)).is_err());
        assert!(eval_binop(BinOp::Rem, &Value::int(1), &Value::int(0)).is_err());
        assert!(eval_binop(BinOp::ShiftL, &Value::int(1), &Value::int(64)).is_err());
        assert!(eval_binop(BinOp::ShiftR, &Value::int(1), &Value::int(-1)).is_err());
        assert!(eval_binop(BinOp::Offset, &Value::loc(Loc(0)), &Value::int(-1)).is_err());
    }

    #[test]
    fn test_operand_kinds_must_match() {
        let result = eval_binop(BinOp::Eq, &Value::int(1), &Value::bool(true));
        assert_eq!(
            result,
            Err(StuckError::OperatorMismatch {
                op: "=",
                operands: vec![Value::int(1), Value::bool(true)],
            })
        );
        assert!(eval_binop(BinOp::Plus, &Value::bool(true), &Value::bool(true)).is_err());
        assert!(eval_unop(UnOp::Minus, &Value::bool(true)).is_err());
    }

    #[test]
    fn test_equality_on_any_literal_kind() {
        assert_eq!(eval_binop(BinOp::Eq, &Value::int(0), &Value::int(0)), Ok(Value::bool(true)));
        assert_eq!(eval_binop(BinOp::Eq, &Value::unit(), &Value::unit()), Ok(Value::bool(true)));
        assert_eq!(
            eval_binop(BinOp::Eq, &Value::loc(Loc(1)), &Value::loc(Loc(2))),
            Ok(Value::bool(false))
        );
    }

    #[test]
    fn test_boolean_and_bitwise() {
        assert_eq!(eval_binop(BinOp::And, &Value::bool(true), &Value::bool(false)), Ok(Value::bool(false)));
        assert_eq!(eval_binop(BinOp::Xor, &Value::int(6), &Value::int(3)), Ok(Value::int(5)));
        assert_eq!(eval_unop(UnOp::Neg, &Value::bool(true)), Ok(Value::bool(false)));
        assert_eq!(eval_unop(UnOp::Neg, &Value::int(0)), Ok(Value::int(-1)));
    }

    #[test]
    fn test_offset() {
        assert_eq!(
            eval_binop(BinOp::Offset, &Value::loc(Loc(3)), &Value::int(2)),
            Ok(Value::loc(Loc(5)))
        );
    }

    #[test]
    fn test_if_selects_branch() {
        let expr = Expr::if_then_else(Expr::bool(false), Expr::int(1), Expr::int(2));
        assert_eq!(step(&expr), Ok(Expr::int(2)));

        let bad = Expr::if_then_else(Expr::int(0), Expr::int(1), Expr::int(2));
        assert_eq!(step(&bad), Err(StuckError::NonBooleanCondition(Value::int(0))));
    }

    #[test]
    fn test_pair_and_projections() {
        let pair = step(&Expr::pair(true, Expr::int(1), Expr::bool(true))).unwrap();
        assert_eq!(pair, Expr::Val(Value::pair(true, Value::int(1), Value::bool(true))));
        assert_eq!(step(&Expr::fst(pair.clone())), Ok(Expr::int(1)));
        assert_eq!(step(&Expr::snd(pair)), Ok(Expr::bool(true)));
        assert_eq!(
            step(&Expr::fst(Expr::int(1))),
            Err(StuckError::NonPairProjection(Value::int(1)))
        );
    }

    #[test]
    fn test_class_builds_plain_pair() {
        let result = step(&Expr::class(Expr::int(1), Expr::int(2)));
        assert_eq!(result, Ok(Expr::Val(Value::pair(false, Value::int(1), Value::int(2)))));
    }

    #[test]
    fn test_reference_is_erased() {
        assert_eq!(step(&Expr::Ref(Box::new(Expr::int(3)))), Ok(Expr::int(3)));
        assert_eq!(
            step(&Expr::reference("x")),
            Err(StuckError::FreeVariable("x".to_string()))
        );
    }

    #[test]
    fn test_heap_rules() {
        let mut heap = Heap::new();
        let base = head_step(&Expr::alloc_n(Expr::int(2), Expr::int(0)), &mut heap).unwrap();
        let Some(loc) = base.as_value().and_then(Value::as_loc) else {
            panic!("Expected location");
        };
        assert_eq!(heap.live_count(), 2);

        assert_eq!(head_step(&Expr::store(base.clone(), Expr::int(9)), &mut heap), Ok(Expr::unit()));
        assert_eq!(head_step(&Expr::load(base.clone()), &mut heap), Ok(Expr::int(9)));
        assert_eq!(head_step(&Expr::free(base.clone()), &mut heap), Ok(Expr::unit()));
        assert_eq!(
            head_step(&Expr::load(base), &mut heap),
            Err(StuckError::InvalidAddress(Value::loc(loc)))
        );
    }

    #[test]
    fn test_failed_allocation_leaves_heap_untouched() {
        let mut heap = Heap::new();
        let result = head_step(&Expr::alloc_n(Expr::int(0), Expr::unit()), &mut heap);
        assert_eq!(result, Err(StuckError::InvalidAllocationSize(Value::int(0))));
        let result = head_step(&Expr::alloc_n(Expr::bool(true), Expr::unit()), &mut heap);
        assert_eq!(result, Err(StuckError::InvalidAllocationSize(Value::bool(true))));
        assert_eq!(heap, Heap::new());
    }

    #[test]
    fn test_non_redex_is_rejected() {
        assert_eq!(step(&Expr::int(1)), Err(StuckError::NotARedex(Expr::int(1))));
        let nested = Expr::fst(Expr::pair(false, Expr::int(1), Expr::int(2)));
        assert!(matches!(step(&nested), Err(StuckError::NotARedex(_))));
    }

    #[test]
    fn test_free_on_non_location() {
        let result = step(&Expr::free(Expr::int(3)));
        assert_eq!(result, Err(StuckError::InvalidAddress(Value::int(3))));
    }
}

//! Substitution of values for variables.
//!
//! Values are closed, so substitution never captures: a binder only shadows
//! variables of its own name, and substitution simply stops underneath it.

use super::{Binder, Expr, Value};

/// Replace every free occurrence of `name` in `expr` with `value`.
pub fn subst(name: &str, value: &Value, expr: &Expr) -> Expr {
    let go = |e: &Expr| Box::new(subst(name, value, e));

    match expr {
        Expr::Val(_) => expr.clone(),
        Expr::Var(x) if x == name => Expr::Val(value.clone()),
        Expr::Var(_) => expr.clone(),
        Expr::Rec(f, x, body) => {
            if f.binds(name) || x.binds(name) {
                expr.clone()
            } else {
                Expr::Rec(f.clone(), x.clone(), go(body))
            }
        }
        Expr::App(e1, e2) => Expr::App(go(e1), go(e2)),
        Expr::UnOp(op, e) => Expr::UnOp(*op, go(e)),
        Expr::BinOp(op, e1, e2) => Expr::BinOp(*op, go(e1), go(e2)),
        Expr::If(c, t, e) => Expr::If(go(c), go(t), go(e)),
        Expr::Pair(r, e1, e2) => Expr::Pair(*r, go(e1), go(e2)),
        Expr::Class(e1, e2) => Expr::Class(go(e1), go(e2)),
        Expr::Fst(e) => Expr::Fst(go(e)),
        Expr::Snd(e) => Expr::Snd(go(e)),
        Expr::AllocN(e1, e2) => Expr::AllocN(go(e1), go(e2)),
        Expr::Free(e) => Expr::Free(go(e)),
        Expr::Load(e) => Expr::Load(go(e)),
        Expr::Store(e1, e2) => Expr::Store(go(e1), go(e2)),
        Expr::Ref(e) => Expr::Ref(go(e)),
    }
}

/// Substitution through a binder: anonymous binders leave `expr` untouched.
pub fn subst_binder(binder: &Binder, value: &Value, expr: &Expr) -> Expr {
    match binder {
        Binder::Anon => expr.clone(),
        Binder::Named(name) => subst(name, value, expr),
    }
}

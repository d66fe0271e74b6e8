//! # Evaluation Contexts
//!
//! A [`Frame`] is an expression with exactly one hole. A [`Context`] is a stack
//! of frames, and [`decompose`] splits an expression into the context around
//! its next redex and the redex itself.
//!
//! ## Right-to-Left Order
//!
//! For every binary-shaped construct the second operand is reduced first. The
//! frames encode this: each construct has an `…R` frame whose hole is the
//! second operand and which keeps the untouched first operand, and an `…L`
//! frame whose hole is the first operand and which keeps the *value* the second
//! operand reduced to.
//!
//! ```text
//! App(e1, e2)      e2 not a value  →  AppR(e1)   [ hole = e2 ]
//! App(e1, Val v2)  e1 not a value  →  AppL(v2)   [ hole = e1 ]
//! App(Val, Val)                    →  redex
//! ```
//!
//! ## Uniqueness
//!
//! At most one frame applies to any expression, so decomposition is a
//! function and `context.fill(redex)` gives back the original expression.
//! Filling any frame yields a non-value, and two frames filled with
//! non-values only agree if the frames and holes agree.

use tracing::trace;

use crate::core::{BinOp, Expr, UnOp, Value};

/// A single-hole evaluation frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Frame {
    AppL(Value),
    AppR(Expr),
    UnOp(UnOp),
    BinOpL(BinOp, Value),
    BinOpR(BinOp, Expr),
    If(Expr, Expr),
    PairL(bool, Value),
    PairR(bool, Expr),
    ClassL(Value),
    ClassR(Expr),
    Fst,
    Snd,
    AllocNL(Value),
    AllocNR(Expr),
    Free,
    Load,
    StoreL(Value),
    StoreR(Expr),
}

impl Frame {
    /// Plug `hole` into this frame.
    pub fn fill(self, hole: Expr) -> Expr {
        let hole = Box::new(hole);
        let val = |v: Value| Box::new(Expr::Val(v));
        match self {
            Frame::AppL(v2) => Expr::App(hole, val(v2)),
            Frame::AppR(e1) => Expr::App(Box::new(e1), hole),
            Frame::UnOp(op) => Expr::UnOp(op, hole),
            Frame::BinOpL(op, v2) => Expr::BinOp(op, hole, val(v2)),
            Frame::BinOpR(op, e1) => Expr::BinOp(op, Box::new(e1), hole),
            Frame::If(then_expr, else_expr) => {
                Expr::If(hole, Box::new(then_expr), Box::new(else_expr))
            }
            Frame::PairL(is_ref, v2) => Expr::Pair(is_ref, hole, val(v2)),
            Frame::PairR(is_ref, e1) => Expr::Pair(is_ref, Box::new(e1), hole),
            Frame::ClassL(v2) => Expr::Class(hole, val(v2)),
            Frame::ClassR(e1) => Expr::Class(Box::new(e1), hole),
            Frame::Fst => Expr::Fst(hole),
            Frame::Snd => Expr::Snd(hole),
            Frame::AllocNL(v2) => Expr::AllocN(hole, val(v2)),
            Frame::AllocNR(e1) => Expr::AllocN(Box::new(e1), hole),
            Frame::Free => Expr::Free(hole),
            Frame::Load => Expr::Load(hole),
            Frame::StoreL(v2) => Expr::Store(hole, val(v2)),
            Frame::StoreR(e1) => Expr::Store(Box::new(e1), hole),
        }
    }
}

/// An evaluation context: frames ordered innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context {
    frames: Vec<Frame>,
}

impl Context {
    /// The empty context.
    pub fn hole() -> Self {
        Context::default()
    }

    /// Build a context from frames listed innermost first.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Context { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Rebuild the surrounding expression around `hole`.
    pub fn fill(self, hole: Expr) -> Expr {
        self.frames
            .into_iter()
            .fold(hole, |inner, frame| frame.fill(inner))
    }
}

/// Result of [`decompose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    /// The expression is already a value.
    Value(Value),
    /// The next redex and the context around it.
    Redex { context: Context, redex: Expr },
}

/// Split `expr` into its evaluation context and next redex.
///
/// Walks down iteratively, so deeply nested argument chains do not grow the
/// call stack.
pub fn decompose(expr: Expr) -> Decomposition {
    let mut current = match expr {
        Expr::Val(value) => return Decomposition::Value(value),
        expr => expr,
    };
    let mut outer_first = Vec::new();

    let redex = loop {
        current = match current {
            Expr::App(e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::AppL(v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::App(e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::AppR(*e1));
                    e2
                }
            },

            Expr::UnOp(op, e) if !e.is_value() => {
                outer_first.push(Frame::UnOp(op));
                *e
            }

            Expr::BinOp(op, e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::BinOpL(op, v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::BinOp(op, e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::BinOpR(op, *e1));
                    e2
                }
            },

            Expr::If(c, t, e) if !c.is_value() => {
                outer_first.push(Frame::If(*t, *e));
                *c
            }

            Expr::Pair(is_ref, e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::PairL(is_ref, v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::Pair(is_ref, e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::PairR(is_ref, *e1));
                    e2
                }
            },

            Expr::Class(e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::ClassL(v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::Class(e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::ClassR(*e1));
                    e2
                }
            },

            Expr::Fst(e) if !e.is_value() => {
                outer_first.push(Frame::Fst);
                *e
            }
            Expr::Snd(e) if !e.is_value() => {
                outer_first.push(Frame::Snd);
                *e
            }

            Expr::AllocN(e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::AllocNL(v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::AllocN(e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::AllocNR(*e1));
                    e2
                }
            },

            Expr::Free(e) if !e.is_value() => {
                outer_first.push(Frame::Free);
                *e
            }
            Expr::Load(e) if !e.is_value() => {
                outer_first.push(Frame::Load);
                *e
            }

            Expr::Store(e1, e2) => match *e2 {
                Expr::Val(v2) if !e1.is_value() => {
                    outer_first.push(Frame::StoreL(v2));
                    *e1
                }
                Expr::Val(v2) => break Expr::Store(e1, Box::new(Expr::Val(v2))),
                e2 => {
                    outer_first.push(Frame::StoreR(*e1));
                    e2
                }
            },

            // Everything else is a redex, stuck or not: variables, function
            // literals, references and constructs whose operands are values.
            // Frames are only pushed for non-value holes, so no `Val` gets here.
            other => break other,
        };
    };

    outer_first.reverse();
    trace!(depth = outer_first.len(), redex = redex.kind(), "decomposed");
    Decomposition::Redex {
        context: Context::from_frames(outer_first),
        redex,
    }
}

//! Bundled sample programs.
//!
//! There is no surface syntax, so these are assembled from the [`Expr`]
//! builders. Each one exercises a different corner of the machine.

use clap::ValueEnum;

use crate::core::{BinOp, Expr};

/// A sample program selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Program {
    /// Recursive countdown to 1.
    Countdown,
    /// Store into the middle of a three-cell block and read it back.
    Cells,
    /// Load from a freed cell. Gets stuck.
    UseAfterFree,
    /// Exchange the contents of two cells.
    Swap,
    /// Increment a heap counter twice.
    Counter,
    /// Project a reference out of a ref-struct.
    RefStruct,
}

impl Program {
    pub const ALL: [Program; 6] = [
        Program::Countdown,
        Program::Cells,
        Program::UseAfterFree,
        Program::Swap,
        Program::Counter,
        Program::RefStruct,
    ];

    pub fn build(self) -> Expr {
        match self {
            Program::Countdown => countdown(10),
            Program::Cells => cells(),
            Program::UseAfterFree => use_after_free(),
            Program::Swap => swap(Expr::int(1), Expr::int(2)),
            Program::Counter => counter(2),
            Program::RefStruct => ref_struct(),
        }
    }
}

/// `(rec f x := if x = 0 then 1 else f (x - 1)) n`
pub fn countdown(n: i64) -> Expr {
    Expr::app(
        Expr::rec(
            "f",
            "x",
            Expr::if_then_else(
                Expr::binop(BinOp::Eq, Expr::var("x"), Expr::int(0)),
                Expr::int(1),
                Expr::app(
                    Expr::var("f"),
                    Expr::binop(BinOp::Minus, Expr::var("x"), Expr::int(1)),
                ),
            ),
        ),
        Expr::int(n),
    )
}

fn offset(base: &str, by: i64) -> Expr {
    Expr::binop(BinOp::Offset, Expr::var(base), Expr::int(by))
}

/// ```text
/// let base = allocN 3 0 in
/// store (base +ₗ 1) 7;
/// load (base +ₗ 1)
/// ```
pub fn cells() -> Expr {
    Expr::let_in(
        "base",
        Expr::alloc_n(Expr::int(3), Expr::int(0)),
        Expr::seq(
            Expr::store(offset("base", 1), Expr::int(7)),
            Expr::load(offset("base", 1)),
        ),
    )
}

/// ```text
/// let l = alloc 5 in free l; load l
/// ```
pub fn use_after_free() -> Expr {
    Expr::let_in(
        "l",
        Expr::alloc(Expr::int(5)),
        Expr::seq(Expr::free(Expr::var("l")), Expr::load(Expr::var("l"))),
    )
}

/// ```text
/// let a = alloc x in
/// let b = alloc y in
/// let t = load a in
/// store a (load b);
/// store b t;
/// (load a, load b)
/// ```
pub fn swap(x: Expr, y: Expr) -> Expr {
    Expr::let_in(
        "a",
        Expr::alloc(x),
        Expr::let_in(
            "b",
            Expr::alloc(y),
            Expr::let_in(
                "t",
                Expr::load(Expr::var("a")),
                Expr::seq(
                    Expr::store(Expr::var("a"), Expr::load(Expr::var("b"))),
                    Expr::seq(
                        Expr::store(Expr::var("b"), Expr::var("t")),
                        Expr::pair(
                            false,
                            Expr::load(Expr::var("a")),
                            Expr::load(Expr::var("b")),
                        ),
                    ),
                ),
            ),
        ),
    )
}

/// A cell starting at 0, incremented `times` times, then read.
pub fn counter(times: usize) -> Expr {
    let increment = || {
        Expr::store(
            Expr::var("c"),
            Expr::binop(BinOp::Plus, Expr::load(Expr::var("c")), Expr::int(1)),
        )
    };
    let body = (0..times).fold(Expr::load(Expr::var("c")), |rest, _| {
        Expr::seq(increment(), rest)
    });
    Expr::let_in("c", Expr::alloc(Expr::int(0)), body)
}

/// ```text
/// let x = 1 in fst (ref (&x, true))
/// ```
///
/// The only sample that passes the type checker, at `&Int`.
pub fn ref_struct() -> Expr {
    Expr::let_in(
        "x",
        Expr::int(1),
        Expr::fst(Expr::pair(true, Expr::reference("x"), Expr::bool(true))),
    )
}

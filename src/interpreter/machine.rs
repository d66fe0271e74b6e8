use tracing::{debug, warn};

use super::context::{Decomposition, decompose};
use super::error::{RunError, StuckError};
use super::head::head_step;
use super::heap::Heap;
use crate::core::{Expr, Value, dismantle};

/// Outcome of a single [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The configuration reduced to a new expression.
    Next(Expr),
    /// The expression was already a value.
    Value(Value),
    /// No rule applies. `expr` is the unchanged configuration.
    Stuck { expr: Expr, error: StuckError },
}

/// Take one step: decompose, reduce the redex, plug the result back in.
pub fn step(expr: Expr, heap: &mut Heap) -> Step {
    match decompose(expr) {
        Decomposition::Value(value) => Step::Value(value),
        Decomposition::Redex { context, redex } => match head_step(&redex, heap) {
            Ok(reduced) => Step::Next(context.fill(reduced)),
            Err(error) => Step::Stuck {
                expr: context.fill(redex),
                error,
            },
        },
    }
}

/// [`step`] for callers that only care whether progress was made.
///
/// `None` for values and stuck configurations alike.
pub fn try_step(expr: &Expr, heap: &mut Heap) -> Option<Expr> {
    match step(expr.clone(), heap) {
        Step::Next(next) => Some(next),
        Step::Value(_) | Step::Stuck { .. } => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of reduction steps. `None` runs until a value or a
    /// stuck configuration.
    pub fuel: Option<usize>,
}

impl MachineConfig {
    pub fn with_fuel(mut self, fuel: usize) -> Self {
        self.fuel = Some(fuel);
        self
    }
}

/// What a single [`Machine::step`] did. The configuration itself stays in
/// the machine and is read back with [`Machine::expr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Stepped,
    Done(Value),
    Stuck(StuckError),
}

/// An expression together with the heap it runs against.
#[derive(Debug, Clone)]
pub struct Machine {
    expr: Expr,
    heap: Heap,
    config: MachineConfig,
    steps: usize,
}

impl Machine {
    pub fn new(expr: Expr) -> Self {
        Machine::with_config(expr, MachineConfig::default())
    }

    pub fn with_config(expr: Expr, config: MachineConfig) -> Self {
        Machine {
            expr,
            heap: Heap::new(),
            config,
            steps: 0,
        }
    }

    /// Advance by one step. A stuck step leaves the machine as it was.
    pub fn step(&mut self) -> Progress {
        let expr = std::mem::replace(&mut self.expr, Expr::unit());
        match step(expr, &mut self.heap) {
            Step::Next(next) => {
                self.steps += 1;
                debug!(step = self.steps, expr = next.kind(), "stepped");
                self.expr = next;
                Progress::Stepped
            }
            Step::Value(value) => {
                self.expr = Expr::Val(value.clone());
                Progress::Done(value)
            }
            Step::Stuck { expr, error } => {
                warn!(step = self.steps, %error, "stuck");
                self.expr = expr;
                Progress::Stuck(error)
            }
        }
    }

    /// Run until a value, a stuck configuration, or the fuel runs out.
    pub fn run(&mut self) -> Result<Value, RunError> {
        loop {
            if let Some(fuel) = self.config.fuel
                && self.steps >= fuel
                && !self.expr.is_value()
            {
                return Err(RunError::OutOfFuel { steps: self.steps });
            }
            match self.step() {
                Progress::Stepped => {}
                Progress::Done(value) => return Ok(value),
                Progress::Stuck(error) => {
                    return Err(RunError::Stuck {
                        expr: self.expr.clone(),
                        error,
                        steps: self.steps,
                    });
                }
            }
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        dismantle(std::mem::replace(&mut self.expr, Expr::unit()));
    }
}

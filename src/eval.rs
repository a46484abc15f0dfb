//! Reference evaluator for bound programs.
//!
//! `run` executes structured statements directly under the language's
//! big-step semantics. `run_lowered` executes a flat block the way an
//! emitter target would: a label map, a program counter, and conditional
//! jumps that fire when the condition matches the jump flag. The tests use
//! the pair to check that lowering preserves behavior.
//!
//! Failures here are contract violations (unresolved symbols, ill-typed
//! trees, jumps outside a flat block), not user-facing errors.

use std::collections::HashMap;

use thiserror::Error;

use crate::ir::{BinOp, Expr, Stmt, UnOp, Value, VariableSymbol};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("operand type mismatch")]
    TypeMismatch,

    #[error("jump statement outside a flat block")]
    MisplacedJump,
}

/// Executes statements against a variable environment keyed by symbol.
#[derive(Default)]
pub struct Evaluator {
    variables: HashMap<VariableSymbol, Value>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Pre-seed a variable declared outside the statement under execution.
    pub fn define(&mut self, variable: VariableSymbol, value: Value) {
        self.variables.insert(variable, value);
    }

    pub fn get(&self, variable: &VariableSymbol) -> Option<Value> {
        self.variables.get(variable).copied()
    }

    /// Execute a structured statement under the reference semantics.
    /// Labels are inert markers; jumps are rejected because they only have
    /// meaning inside a flat block (use `run_lowered` for those).
    pub fn run(&mut self, stmt: &Stmt) -> Result<(), EvalError> {
        match stmt {
            Stmt::Block { statements, .. } => {
                for s in statements {
                    self.run(s)?;
                }
                Ok(())
            }
            Stmt::VarDecl {
                variable,
                initializer,
                ..
            } => {
                let value = self.eval(initializer)?;
                self.variables.insert(variable.clone(), value);
                Ok(())
            }
            Stmt::ExprStmt { expr, .. } => {
                self.eval(expr)?;
                Ok(())
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.eval_bool(condition)? {
                    self.run(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.run(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                while self.eval_bool(condition)? {
                    self.run(body)?;
                }
                Ok(())
            }
            Stmt::DoWhile {
                body, condition, ..
            } => {
                loop {
                    self.run(body)?;
                    if !self.eval_bool(condition)? {
                        break;
                    }
                }
                Ok(())
            }
            Stmt::For {
                variable,
                lower_bound,
                upper_bound,
                step,
                body,
                ..
            } => {
                // Bounds and step are each evaluated exactly once, in
                // source order; the body cannot change them afterwards.
                let low = self.eval_int(lower_bound)?;
                self.variables.insert(variable.clone(), Value::Int(low));
                let high = self.eval_int(upper_bound)?;
                let step = match step {
                    Some(step) => self.eval_int(step)?,
                    None => 1,
                };
                loop {
                    let v = self.read_int(variable)?;
                    if !((step > 0 && v <= high) || (step < 0 && v >= high)) {
                        break;
                    }
                    self.run(body)?;
                    let v = self.read_int(variable)?;
                    self.variables.insert(variable.clone(), Value::Int(v + step));
                }
                Ok(())
            }
            Stmt::Label { .. } => Ok(()),
            Stmt::Goto { .. } | Stmt::CondGoto { .. } => Err(EvalError::MisplacedJump),
        }
    }

    /// Execute a lowered block under the flat-sequence semantics: a label
    /// marks the position of the following statement, `goto` jumps
    /// unconditionally, a conditional goto jumps when its condition
    /// evaluates to the jump flag.
    pub fn run_lowered(&mut self, block: &Stmt) -> Result<(), EvalError> {
        let statements: &[Stmt] = match block {
            Stmt::Block { statements, .. } => statements,
            other => std::slice::from_ref(other),
        };

        let mut labels = HashMap::new();
        for (index, s) in statements.iter().enumerate() {
            if let Stmt::Label { name, .. } = s {
                labels.insert(name.as_str(), index);
            }
        }
        let resolve = |target: &String| {
            labels
                .get(target.as_str())
                .copied()
                .ok_or_else(|| EvalError::UndefinedLabel(target.clone()))
        };

        let mut pc = 0;
        while pc < statements.len() {
            match &statements[pc] {
                Stmt::Label { .. } => pc += 1,
                Stmt::Goto { target, .. } => pc = resolve(target)?,
                Stmt::CondGoto {
                    target,
                    condition,
                    jump_if_true,
                    ..
                } => {
                    if self.eval_bool(condition)? == *jump_if_true {
                        pc = resolve(target)?;
                    } else {
                        pc += 1;
                    }
                }
                s => {
                    self.run(s)?;
                    pc += 1;
                }
            }
        }
        Ok(())
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal { value, .. } => Ok(*value),
            Expr::Variable { variable, .. } => self
                .variables
                .get(variable)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable(variable.name.clone())),
            Expr::Assign {
                variable, value, ..
            } => {
                let value = self.eval(value)?;
                self.variables.insert(variable.clone(), value);
                Ok(value)
            }
            Expr::Unary { op, operand, .. } => match (op.op, self.eval(operand)?) {
                (UnOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
                (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                _ => Err(EvalError::TypeMismatch),
            },
            Expr::Binary {
                op, left, right, ..
            } => self.eval_binary(op.op, left, right),
        }
    }

    /// `&&` and `||` short-circuit; everything else evaluates both sides.
    fn eval_binary(&mut self, op: BinOp, left: &Expr, right: &Expr) -> Result<Value, EvalError> {
        match op {
            BinOp::And => {
                if !self.eval_bool(left)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_bool(right)?))
            }
            BinOp::Or => {
                if self.eval_bool(left)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_bool(right)?))
            }
            _ => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                match (op, left, right) {
                    (BinOp::Add, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
                    (BinOp::Sub, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a - b)),
                    (BinOp::Mul, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
                    (BinOp::Div, Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
                    (BinOp::Div, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
                    (BinOp::Mod, Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
                    (BinOp::Mod, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a % b)),
                    (BinOp::Eq, a, b) if a.ty() == b.ty() => Ok(Value::Bool(a == b)),
                    (BinOp::Neq, a, b) if a.ty() == b.ty() => Ok(Value::Bool(a != b)),
                    (BinOp::Lt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
                    (BinOp::Gt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
                    (BinOp::Le, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
                    (BinOp::Ge, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),
                    _ => Err(EvalError::TypeMismatch),
                }
            }
        }
    }

    fn eval_bool(&mut self, expr: &Expr) -> Result<bool, EvalError> {
        match self.eval(expr)? {
            Value::Bool(b) => Ok(b),
            Value::Int(_) => Err(EvalError::TypeMismatch),
        }
    }

    fn eval_int(&mut self, expr: &Expr) -> Result<i64, EvalError> {
        match self.eval(expr)? {
            Value::Int(n) => Ok(n),
            Value::Bool(_) => Err(EvalError::TypeMismatch),
        }
    }

    fn read_int(&self, variable: &VariableSymbol) -> Result<i64, EvalError> {
        match self.variables.get(variable) {
            Some(Value::Int(n)) => Ok(*n),
            Some(Value::Bool(_)) => Err(EvalError::TypeMismatch),
            None => Err(EvalError::UndefinedVariable(variable.name.clone())),
        }
    }
}

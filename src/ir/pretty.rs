//! Readable rendering of bound trees.
//!
//! Lowered blocks print one statement per line with labels flush left, the
//! format the rest of the toolchain (and the tests) grep against.

use std::fmt;

use super::node::{Expr, Stmt, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Wraps compound operands in parentheses so the printed form is
/// unambiguous without tracking precedence.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Binary { .. } | Expr::Assign { .. } => write!(f, "({})", self.0),
            simple => write!(f, "{simple}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{value}"),
            Expr::Variable { variable, .. } => write!(f, "{variable}"),
            Expr::Assign {
                variable, value, ..
            } => write!(f, "{variable} = {value}"),
            Expr::Unary { op, operand, .. } => write!(f, "{}{}", op.op, Operand(operand)),
            Expr::Binary {
                op, left, right, ..
            } => {
                write!(f, "{} {} {}", Operand(left), op.op, Operand(right))
            }
        }
    }
}

/// Render a statement as lines of text. Flat-block children print one per
/// line, indented under flush-left labels; structured statements (present
/// only before lowering) indent their bodies.
pub fn to_lines(stmt: &Stmt) -> Vec<String> {
    let mut out = Vec::new();
    push_stmt(stmt, 0, &mut out);
    out
}

fn push_stmt(s: &Stmt, depth: usize, out: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match s {
        Stmt::Block { statements, .. } => {
            for child in statements {
                if let Stmt::Label { name, .. } = child {
                    out.push(format!("{name}:"));
                } else {
                    push_stmt(child, depth + 1, out);
                }
            }
        }
        Stmt::VarDecl {
            variable,
            initializer,
            ..
        } => {
            let kw = if variable.read_only { "let" } else { "var" };
            out.push(format!("{pad}{kw} {variable} = {initializer}"));
        }
        Stmt::ExprStmt { expr, .. } => out.push(format!("{pad}{expr}")),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            out.push(format!("{pad}if {condition}"));
            push_stmt(then_branch, depth + 1, out);
            if let Some(else_branch) = else_branch {
                out.push(format!("{pad}else"));
                push_stmt(else_branch, depth + 1, out);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            out.push(format!("{pad}while {condition}"));
            push_stmt(body, depth + 1, out);
        }
        Stmt::DoWhile {
            body, condition, ..
        } => {
            out.push(format!("{pad}do"));
            push_stmt(body, depth + 1, out);
            out.push(format!("{pad}while {condition}"));
        }
        Stmt::For {
            variable,
            lower_bound,
            upper_bound,
            step,
            body,
            ..
        } => {
            let head = match step {
                Some(step) => {
                    format!("{pad}for {variable} = {lower_bound} to {upper_bound} step {step}")
                }
                None => format!("{pad}for {variable} = {lower_bound} to {upper_bound}"),
            };
            out.push(head);
            push_stmt(body, depth + 1, out);
        }
        Stmt::Label { name, .. } => out.push(format!("{name}:")),
        Stmt::Goto { target, .. } => out.push(format!("{pad}goto {target}")),
        Stmt::CondGoto {
            target,
            condition,
            jump_if_true,
            ..
        } => {
            let kw = if *jump_if_true { "if" } else { "unless" };
            out.push(format!("{pad}{kw} {condition} goto {target}"));
        }
    }
}

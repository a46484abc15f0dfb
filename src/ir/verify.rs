//! Sanity checks over the output of the lowering pass.

use std::collections::HashSet;

use thiserror::Error;

use super::node::Stmt;
use super::symbol::Type;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("structured statement survived lowering: {0}")]
    StructuredStatement(&'static str),

    #[error("block nested directly under the lowered block")]
    NestedBlock,

    #[error("label '{0}' defined more than once")]
    DuplicateLabel(String),

    #[error("jump to undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("jump condition has type {0}, expected bool")]
    NonBoolCondition(Type),
}

/// Check the invariants every lowered block satisfies: only flat statement
/// forms, no nested block, unique labels, every jump target defined, and
/// boolean jump conditions. A bare statement is treated as a block of one.
pub fn verify_lowered(stmt: &Stmt) -> Result<(), VerifyError> {
    let statements: &[Stmt] = match stmt {
        Stmt::Block { statements, .. } => statements,
        other => std::slice::from_ref(other),
    };

    let mut defined = HashSet::new();
    for s in statements {
        match s {
            Stmt::Block { .. } => return Err(VerifyError::NestedBlock),
            Stmt::If { .. } => return Err(VerifyError::StructuredStatement("if")),
            Stmt::While { .. } => return Err(VerifyError::StructuredStatement("while")),
            Stmt::DoWhile { .. } => return Err(VerifyError::StructuredStatement("do-while")),
            Stmt::For { .. } => return Err(VerifyError::StructuredStatement("for")),
            Stmt::Label { name, .. } => {
                if !defined.insert(name.clone()) {
                    return Err(VerifyError::DuplicateLabel(name.clone()));
                }
            }
            _ => {}
        }
    }

    for s in statements {
        match s {
            Stmt::Goto { target, .. } => {
                if !defined.contains(target) {
                    return Err(VerifyError::UndefinedLabel(target.clone()));
                }
            }
            Stmt::CondGoto {
                target, condition, ..
            } => {
                if !defined.contains(target) {
                    return Err(VerifyError::UndefinedLabel(target.clone()));
                }
                if condition.ty() != Type::Bool {
                    return Err(VerifyError::NonBoolCondition(condition.ty()));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

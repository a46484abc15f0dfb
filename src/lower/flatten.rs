use crate::ir::Stmt;

/// Splice nested blocks into one linear block, preserving statement order.
pub fn flatten(stmt: Stmt) -> Stmt {
    let id = stmt.id();
    let mut flat = Vec::new();
    let mut stack = vec![stmt];

    while let Some(s) = stack.pop() {
        match s {
            Stmt::Block { statements, .. } => {
                // Reversed so the children pop back off in source order.
                stack.extend(statements.into_iter().rev());
            }
            other => flat.push(other),
        }
    }

    Stmt::Block {
        id,
        statements: flat,
    }
}

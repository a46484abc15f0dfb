use crate::ir::{BinOp, BinaryOperator, Expr, NodeId, Type, VariableSymbol};

/// Per-invocation lowering state: the counters that keep fresh labels and
/// synthetic variables unique within one `lower` call. Discarded when the
/// call returns.
pub struct Lowerer {
    label_count: usize,
    var_count: usize,
}

impl Lowerer {
    pub fn new() -> Self {
        Self {
            label_count: 0,
            var_count: 0,
        }
    }

    /// Fresh label, `Label1` upward.
    pub fn new_label(&mut self) -> String {
        self.label_count += 1;
        format!("Label{}", self.label_count)
    }

    /// Fresh read-only synthetic variable. The counter is mangled into the
    /// name so synthetics from nested rewrites never collide.
    pub fn fresh_variable(&mut self, base: &str, ty: Type) -> VariableSymbol {
        self.var_count += 1;
        VariableSymbol::new(format!("__{base}{}", self.var_count), true, ty)
    }
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a binary expression through the operator-resolution table. A miss
/// here is a bug in the rewrite rules (or ill-typed input), not something
/// the caller can recover from.
pub(crate) fn binary(id: NodeId, left: Expr, op: BinOp, right: Expr) -> Expr {
    let op = match BinaryOperator::bind(op, left.ty(), right.ty()) {
        Some(resolved) => resolved,
        None => panic!(
            "no binary operator '{op}' for operands {} and {}",
            left.ty(),
            right.ty()
        ),
    };
    Expr::Binary {
        id,
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

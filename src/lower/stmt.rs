//! The rewrite rules, one per structured statement kind.
//!
//! Each rule builds a block of lower-level statements around the original
//! (untouched) bodies and feeds that block back through `rewrite_stmt`, so
//! control flow nested in the bodies is eliminated in turn. Every rewrite
//! strictly reduces the number of structured nodes, which is what makes the
//! recursion terminate. Synthesized nodes reuse the `NodeId` of the
//! statement they replace.

use super::context::{binary, Lowerer};
use crate::ir::{BinOp, Expr, NodeId, Stmt, Type, Value, VariableSymbol};

impl Lowerer {
    /// Rewrite one statement into flat-form primitives. Statement kinds
    /// with no structured children pass through unchanged; expressions are
    /// never rewritten.
    pub fn rewrite_stmt(&mut self, s: Stmt) -> Stmt {
        match s {
            Stmt::If {
                id,
                condition,
                then_branch,
                else_branch,
            } => self.rewrite_if(id, condition, *then_branch, else_branch.map(|b| *b)),
            Stmt::While {
                id,
                condition,
                body,
            } => self.rewrite_while(id, condition, *body),
            Stmt::DoWhile {
                id,
                body,
                condition,
            } => self.rewrite_do_while(id, *body, condition),
            Stmt::For {
                id,
                variable,
                lower_bound,
                upper_bound,
                step,
                body,
            } => self.rewrite_for(id, variable, lower_bound, upper_bound, step, *body),
            Stmt::Block { id, statements } => Stmt::Block {
                id,
                statements: statements
                    .into_iter()
                    .map(|child| self.rewrite_stmt(child))
                    .collect(),
            },
            other => other,
        }
    }

    /// ```text
    /// unless <condition> goto end        unless <condition> goto else
    /// <then>                             <then>
    /// end:                               goto end
    ///                                    else:
    ///                                    <else>
    ///                                    end:
    /// ```
    fn rewrite_if(
        &mut self,
        id: NodeId,
        condition: Expr,
        then_branch: Stmt,
        else_branch: Option<Stmt>,
    ) -> Stmt {
        let end = self.new_label();

        let statements = match else_branch {
            None => vec![
                Stmt::CondGoto {
                    id,
                    target: end.clone(),
                    condition,
                    jump_if_true: false,
                },
                then_branch,
                Stmt::Label { id, name: end },
            ],
            Some(else_branch) => {
                let else_label = self.new_label();
                vec![
                    Stmt::CondGoto {
                        id,
                        target: else_label.clone(),
                        condition,
                        jump_if_true: false,
                    },
                    then_branch,
                    Stmt::Goto {
                        id,
                        target: end.clone(),
                    },
                    Stmt::Label {
                        id,
                        name: else_label,
                    },
                    else_branch,
                    Stmt::Label { id, name: end },
                ]
            }
        };

        self.rewrite_stmt(Stmt::Block { id, statements })
    }

    /// Check-at-bottom form: one conditional jump per iteration on the hot
    /// path instead of a test and a jump.
    ///
    /// ```text
    /// goto check
    /// continue:
    /// <body>
    /// check:
    /// if <condition> goto continue
    /// ```
    fn rewrite_while(&mut self, id: NodeId, condition: Expr, body: Stmt) -> Stmt {
        let continue_label = self.new_label();
        let check = self.new_label();

        let statements = vec![
            Stmt::Goto {
                id,
                target: check.clone(),
            },
            Stmt::Label {
                id,
                name: continue_label.clone(),
            },
            body,
            Stmt::Label { id, name: check },
            Stmt::CondGoto {
                id,
                target: continue_label,
                condition,
                jump_if_true: true,
            },
        ];

        self.rewrite_stmt(Stmt::Block { id, statements })
    }

    /// ```text
    /// continue:
    /// <body>
    /// if <condition> goto continue
    /// ```
    fn rewrite_do_while(&mut self, id: NodeId, body: Stmt, condition: Expr) -> Stmt {
        let continue_label = self.new_label();

        let statements = vec![
            Stmt::Label {
                id,
                name: continue_label.clone(),
            },
            body,
            Stmt::CondGoto {
                id,
                target: continue_label,
                condition,
                jump_if_true: true,
            },
        ];

        self.rewrite_stmt(Stmt::Block { id, statements })
    }

    /// A counted loop becomes a `while` over a mutable loop variable and
    /// once-evaluated bound/step synthetics:
    ///
    /// ```text
    /// var v = <lower>                    var v = <lower>
    /// let upperBound = <upper>           let upperBound = <upper>
    /// while v <= upperBound              let stepper = <step>
    ///     <body>                         while (stepper > 0 && v <= upperBound)
    ///     v = v + 1                           || (stepper < 0 && v >= upperBound)
    ///                                        <body>
    ///                                        v = v + stepper
    /// ```
    ///
    /// The bounds and the step are each evaluated exactly once, in source
    /// order. With a zero step both disjuncts are false and the body never
    /// runs. The increment is always an addition; the sign travels with the
    /// stepper.
    fn rewrite_for(
        &mut self,
        id: NodeId,
        variable: VariableSymbol,
        lower_bound: Expr,
        upper_bound: Expr,
        step: Option<Expr>,
        body: Stmt,
    ) -> Stmt {
        let var = |v: &VariableSymbol| Expr::Variable {
            id,
            variable: v.clone(),
        };
        let int = |n: i64| Expr::Literal {
            id,
            value: Value::Int(n),
        };

        let upper = self.fresh_variable("upperBound", Type::Int);
        let mut statements = vec![
            Stmt::VarDecl {
                id,
                variable: variable.clone(),
                initializer: lower_bound,
            },
            Stmt::VarDecl {
                id,
                variable: upper.clone(),
                initializer: upper_bound,
            },
        ];

        let (condition, increment) = match step {
            None => (
                binary(id, var(&variable), BinOp::Le, var(&upper)),
                binary(id, var(&variable), BinOp::Add, int(1)),
            ),
            Some(step) => {
                let stepper = self.fresh_variable("stepper", Type::Int);
                statements.push(Stmt::VarDecl {
                    id,
                    variable: stepper.clone(),
                    initializer: step,
                });

                let ascending = binary(
                    id,
                    binary(id, var(&stepper), BinOp::Gt, int(0)),
                    BinOp::And,
                    binary(id, var(&variable), BinOp::Le, var(&upper)),
                );
                let descending = binary(
                    id,
                    binary(id, var(&stepper), BinOp::Lt, int(0)),
                    BinOp::And,
                    binary(id, var(&variable), BinOp::Ge, var(&upper)),
                );

                (
                    binary(id, ascending, BinOp::Or, descending),
                    binary(id, var(&variable), BinOp::Add, var(&stepper)),
                )
            }
        };

        let advance = Stmt::ExprStmt {
            id,
            expr: Expr::Assign {
                id,
                variable: variable.clone(),
                value: Box::new(increment),
            },
        };
        statements.push(Stmt::While {
            id,
            condition,
            body: Box::new(Stmt::Block {
                id,
                statements: vec![body, advance],
            }),
        });

        self.rewrite_stmt(Stmt::Block { id, statements })
    }
}

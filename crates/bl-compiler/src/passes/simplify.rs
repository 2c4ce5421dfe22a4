use std::mem;

use crate::ast::{Program, Statement};

/// Rewrite every `IF next-is-not-x THEN a ELSE b END IF` into
/// `IF next-is-x THEN b ELSE a END IF`, at any depth.
pub fn simplify_if_else(stmt: &mut Statement) {
    match stmt {
        Statement::Block(children) => children.iter_mut().for_each(simplify_if_else),
        Statement::If { body, .. } | Statement::While { body, .. } => simplify_if_else(body),
        Statement::IfElse {
            condition,
            then_body,
            else_body,
        } => {
            if condition.is_negative() {
                if let Some(positive) = condition.negated() {
                    *condition = positive;
                    mem::swap(then_body, else_body);
                }
            }
            simplify_if_else(then_body);
            simplify_if_else(else_body);
        }
        Statement::Call(_) => {}
    }
}

/// [`simplify_if_else`] over the main body and every instruction body.
pub fn simplify_program(program: &mut Program) {
    simplify_if_else(&mut program.body);
    program.context.values_mut().for_each(simplify_if_else);
}

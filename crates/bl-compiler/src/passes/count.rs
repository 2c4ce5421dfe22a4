use std::collections::BTreeSet;

use bl_common::Opcode;

use crate::ast::{Statement, Visitor};

#[derive(Default)]
struct PrimitiveCounter {
    count: usize,
}

impl Visitor for PrimitiveCounter {
    fn visit_call(&mut self, name: &str) {
        if Opcode::is_primitive_name(name) {
            self.count += 1;
        }
    }
}

/// Number of calls in `stmt` that name a primitive instruction.
/// User-defined instructions are not expanded.
pub fn count_primitive_calls(stmt: &Statement) -> usize {
    let mut counter = PrimitiveCounter::default();
    counter.visit_statement(stmt);
    counter.count
}

#[derive(Default)]
struct CallNames {
    names: BTreeSet<String>,
}

impl Visitor for CallNames {
    fn visit_call(&mut self, name: &str) {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }
}

/// Every name called anywhere in `stmt`, primitives included.
pub fn called_names(stmt: &Statement) -> BTreeSet<String> {
    let mut collector = CallNames::default();
    collector.visit_statement(stmt);
    collector.names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Condition;

    #[test]
    fn counts_in_every_branch() {
        let stmt = Statement::block(vec![
            Statement::call("move"),
            Statement::if_else(
                Condition::NextIsFriend,
                Statement::call("turnright"),
                Statement::block(vec![Statement::call("hunt"), Statement::call("infect")]),
            ),
            Statement::while_do(
                Condition::Random,
                Statement::if_then(Condition::True, Statement::call("skip")),
            ),
        ]);
        assert_eq!(count_primitive_calls(&stmt), 4);
    }

    #[test]
    fn collects_each_name_once() {
        let stmt = Statement::while_do(
            Condition::True,
            Statement::block(vec![
                Statement::call("hunt"),
                Statement::if_then(Condition::Random, Statement::call("hunt")),
                Statement::call("move"),
            ]),
        );
        let names: Vec<String> = called_names(&stmt).into_iter().collect();
        assert_eq!(names, vec!["hunt", "move"]);
    }

    #[test]
    fn user_instructions_do_not_count() {
        assert_eq!(count_primitive_calls(&Statement::call("hunt")), 0);
        assert_eq!(count_primitive_calls(&Statement::default()), 0);
    }
}

use super::condition::Condition;
use super::statement::Statement;

/// Read-only walk over a statement tree.
///
/// Default implementations recurse into children; override specific
/// methods to act on particular node types.
pub trait Visitor {
    fn visit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(children) => self.visit_block(children),
            Statement::If { condition, body } => self.visit_if(*condition, body),
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => self.visit_if_else(*condition, then_body, else_body),
            Statement::While { condition, body } => self.visit_while(*condition, body),
            Statement::Call(name) => self.visit_call(name),
        }
    }

    fn visit_block(&mut self, children: &[Statement]) {
        for child in children {
            self.visit_statement(child);
        }
    }

    fn visit_if(&mut self, _condition: Condition, body: &Statement) {
        self.visit_statement(body);
    }

    fn visit_if_else(
        &mut self,
        _condition: Condition,
        then_body: &Statement,
        else_body: &Statement,
    ) {
        self.visit_statement(then_body);
        self.visit_statement(else_body);
    }

    fn visit_while(&mut self, _condition: Condition, body: &Statement) {
        self.visit_statement(body);
    }

    fn visit_call(&mut self, _name: &str) {}
}

/// Mutable counterpart of [`Visitor`], for passes that rewrite the tree in place.
pub trait VisitorMut {
    fn visit_statement_mut(&mut self, stmt: &mut Statement) {
        match stmt {
            Statement::Block(children) => {
                for child in children {
                    self.visit_statement_mut(child);
                }
            }
            Statement::If { body, .. } | Statement::While { body, .. } => {
                self.visit_statement_mut(body)
            }
            Statement::IfElse {
                then_body,
                else_body,
                ..
            } => {
                self.visit_statement_mut(then_body);
                self.visit_statement_mut(else_body);
            }
            Statement::Call(name) => self.visit_call_mut(name),
        }
    }

    fn visit_call_mut(&mut self, _name: &mut String) {}
}

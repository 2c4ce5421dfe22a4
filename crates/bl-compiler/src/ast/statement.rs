use std::fmt;

use crate::error::PassError;

use super::condition::Condition;

/// A BL statement tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Children run in order.
    Block(Vec<Statement>),
    If {
        condition: Condition,
        body: Box<Statement>,
    },
    IfElse {
        condition: Condition,
        then_body: Box<Statement>,
        else_body: Box<Statement>,
    },
    While {
        condition: Condition,
        body: Box<Statement>,
    },
    /// Call of a primitive or user-defined instruction.
    Call(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Block,
    If,
    IfElse,
    While,
    Call,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Block => "BLOCK",
            StatementKind::If => "IF",
            StatementKind::IfElse => "IF_ELSE",
            StatementKind::While => "WHILE",
            StatementKind::Call => "CALL",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Statement {
    /// The empty block.
    fn default() -> Self {
        Statement::Block(Vec::new())
    }
}

impl Statement {
    pub fn block(children: Vec<Statement>) -> Self {
        Statement::Block(children)
    }

    pub fn if_then(condition: Condition, body: Statement) -> Self {
        Statement::If {
            condition,
            body: Box::new(body),
        }
    }

    pub fn if_else(condition: Condition, then_body: Statement, else_body: Statement) -> Self {
        Statement::IfElse {
            condition,
            then_body: Box::new(then_body),
            else_body: Box::new(else_body),
        }
    }

    pub fn while_do(condition: Condition, body: Statement) -> Self {
        Statement::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn call(name: impl Into<String>) -> Self {
        Statement::Call(name.into())
    }

    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Block(_) => StatementKind::Block,
            Statement::If { .. } => StatementKind::If,
            Statement::IfElse { .. } => StatementKind::IfElse,
            Statement::While { .. } => StatementKind::While,
            Statement::Call(_) => StatementKind::Call,
        }
    }

    fn children_mut(&mut self) -> Result<&mut Vec<Statement>, PassError> {
        match self {
            Statement::Block(children) => Ok(children),
            other => Err(PassError::NotABlock(other.kind().as_str())),
        }
    }

    pub fn length_of_block(&self) -> Result<usize, PassError> {
        match self {
            Statement::Block(children) => Ok(children.len()),
            other => Err(PassError::NotABlock(other.kind().as_str())),
        }
    }

    /// Insert `s` at `pos` of this block; `pos` may equal the length.
    pub fn add_to_block(&mut self, pos: usize, s: Statement) -> Result<(), PassError> {
        let children = self.children_mut()?;
        if pos > children.len() {
            return Err(PassError::BlockIndex {
                pos,
                len: children.len(),
            });
        }
        children.insert(pos, s);
        Ok(())
    }

    pub fn remove_from_block(&mut self, pos: usize) -> Result<Statement, PassError> {
        let children = self.children_mut()?;
        if pos >= children.len() {
            return Err(PassError::BlockIndex {
                pos,
                len: children.len(),
            });
        }
        Ok(children.remove(pos))
    }
}

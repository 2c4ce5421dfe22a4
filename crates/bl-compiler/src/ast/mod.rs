pub mod condition;
pub mod program;
pub mod statement;
pub mod visitor;

pub use condition::Condition;
pub use program::{Context, Program};
pub use statement::{Statement, StatementKind};
pub use visitor::{Visitor, VisitorMut};

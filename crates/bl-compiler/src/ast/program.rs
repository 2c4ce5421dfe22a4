use std::collections::BTreeMap;

use super::statement::Statement;

/// User-defined instructions: name to body. Ordered so output is stable.
pub type Context = BTreeMap<String, Statement>;

/// A complete BL program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub context: Context,
    pub body: Statement,
}

impl Program {
    pub fn new(name: impl Into<String>, context: Context, body: Statement) -> Self {
        Self {
            name: name.into(),
            context,
            body,
        }
    }

    /// Move name, body and context out, leaving an empty program behind.
    pub fn disassemble(&mut self) -> (String, Statement, Context) {
        (
            std::mem::take(&mut self.name),
            std::mem::take(&mut self.body),
            std::mem::take(&mut self.context),
        )
    }

    /// Replace this program's parts with the given ones.
    pub fn assemble(&mut self, name: String, body: Statement, context: Context) {
        self.name = name;
        self.body = body;
        self.context = context;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassemble_then_assemble_restores_program() {
        let mut context = Context::new();
        context.insert("hop".to_string(), Statement::call("move"));
        let original = Program::new("Hopper", context, Statement::call("hop"));

        let mut program = original.clone();
        let (name, body, context) = program.disassemble();
        assert_eq!(program, Program::default());
        assert_eq!(name, "Hopper");
        assert_eq!(context.len(), 1);

        program.assemble(name, body, context);
        assert_eq!(program, original);
    }
}

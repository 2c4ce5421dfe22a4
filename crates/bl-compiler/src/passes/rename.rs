use bl_common::Opcode;

use crate::ast::{Program, Statement, VisitorMut};
use crate::error::PassError;
use crate::lexer::is_identifier;

struct Renamer<'a> {
    old: &'a str,
    new: &'a str,
}

impl VisitorMut for Renamer<'_> {
    fn visit_call_mut(&mut self, name: &mut String) {
        if *name == self.old {
            *name = self.new.to_string();
        }
    }
}

/// Replace every call to `old` in `stmt` with a call to `new`.
pub fn rename_instruction(stmt: &mut Statement, old: &str, new: &str) {
    Renamer { old, new }.visit_statement_mut(stmt);
}

/// Rename the user-defined instruction `old` to `new`, both its
/// definition and every call to it.
pub fn rename_program_instruction(
    program: &mut Program,
    old: &str,
    new: &str,
) -> Result<(), PassError> {
    if !is_identifier(new) || Opcode::is_primitive_name(new) {
        return Err(PassError::InvalidName(new.to_string()));
    }
    if program.context.contains_key(new) {
        return Err(PassError::AlreadyDefined(new.to_string()));
    }
    let Some(body) = program.context.remove(old) else {
        return Err(PassError::UndefinedInstruction(old.to_string()));
    };
    program.context.insert(new.to_string(), body);

    let mut renamer = Renamer { old, new };
    for body in program.context.values_mut() {
        renamer.visit_statement_mut(body);
    }
    renamer.visit_statement_mut(&mut program.body);
    Ok(())
}

use bl_common::Opcode;

use crate::ast::{Condition, Context, Program, Statement};
use crate::error::CodegenError;

/// The jump taken when `condition` does not hold.
pub fn conditional_jump(condition: Condition) -> Opcode {
    match condition {
        Condition::NextIsEmpty => Opcode::JumpIfNotNextIsEmpty,
        Condition::NextIsNotEmpty => Opcode::JumpIfNotNextIsNotEmpty,
        Condition::NextIsWall => Opcode::JumpIfNotNextIsWall,
        Condition::NextIsNotWall => Opcode::JumpIfNotNextIsNotWall,
        Condition::NextIsFriend => Opcode::JumpIfNotNextIsFriend,
        Condition::NextIsNotFriend => Opcode::JumpIfNotNextIsNotFriend,
        Condition::NextIsEnemy => Opcode::JumpIfNotNextIsEnemy,
        Condition::NextIsNotEnemy => Opcode::JumpIfNotNextIsNotEnemy,
        Condition::Random => Opcode::JumpIfNotRandom,
        Condition::True => Opcode::JumpIfNotTrue,
    }
}

/// Resolves the calls inside an inlined instruction body: nothing but
/// primitives.
static EMPTY_CONTEXT: Context = Context::new();

/// Translates statement trees into flat BL byte code.
///
/// A call to a user-defined instruction inlines its body, which is
/// generated against an empty sub-context. Instruction bodies therefore
/// only reach primitives, so inlining is at most one level deep and a
/// cyclic definition is reported as an unknown instruction instead of
/// expanding forever.
pub struct CodeGenerator<'c> {
    context: &'c Context,
    /// The instruction whose body is being inlined, if any.
    caller: Option<&'c str>,
}

impl<'c> CodeGenerator<'c> {
    pub fn new(context: &'c Context) -> Self {
        Self {
            context,
            caller: None,
        }
    }

    /// Append the code for `stmt` to `code`. Jump targets are absolute
    /// indices into `code`, so anything already in it shifts them.
    pub fn generate(
        &mut self,
        stmt: &Statement,
        code: &mut Vec<u32>,
    ) -> Result<(), CodegenError> {
        match stmt {
            Statement::Block(children) => {
                for child in children {
                    self.generate(child, code)?;
                }
            }
            Statement::If { condition, body } => {
                let skip_body = emit_placeholder(code, conditional_jump(*condition));
                self.generate(body, code)?;
                patch_jump(code, skip_body);
            }
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                let to_else = emit_placeholder(code, conditional_jump(*condition));
                self.generate(then_body, code)?;
                let to_end = emit_placeholder(code, Opcode::Jump);
                patch_jump(code, to_else);
                self.generate(else_body, code)?;
                patch_jump(code, to_end);
            }
            Statement::While { condition, body } => {
                let loop_start = code.len();
                let exit = emit_placeholder(code, conditional_jump(*condition));
                self.generate(body, code)?;
                emit_jump(code, Opcode::Jump, loop_start);
                patch_jump(code, exit);
            }
            Statement::Call(name) => self.generate_call(name, code)?,
        }
        Ok(())
    }

    fn generate_call(&mut self, name: &str, code: &mut Vec<u32>) -> Result<(), CodegenError> {
        let context = self.context;
        if let Some((callee, body)) = context.get_key_value(name) {
            let mut inliner = CodeGenerator {
                context: &EMPTY_CONTEXT,
                caller: Some(callee.as_str()),
            };
            return inliner.generate(body, code);
        }

        match Opcode::primitive(name) {
            Some(op) => {
                code.push(op.byte_code());
                Ok(())
            }
            None => Err(CodegenError::UnknownInstruction {
                name: name.to_string(),
                caller: self.caller.map(str::to_string),
            }),
        }
    }
}

// ============================================================================
// Emission helpers
// ============================================================================

/// Emit `op` with a zero operand and return the operand's index for
/// [`patch_jump`].
fn emit_placeholder(code: &mut Vec<u32>, op: Opcode) -> usize {
    code.push(op.byte_code());
    code.push(0);
    code.len() - 1
}

/// Point the operand at `at` to the current end of `code`.
fn patch_jump(code: &mut [u32], at: usize) {
    let target = code.len() as u32;
    code[at] = target;
}

fn emit_jump(code: &mut Vec<u32>, op: Opcode, target: usize) {
    code.push(op.byte_code());
    code.push(target as u32);
}

impl Program {
    /// Byte code for the whole program: the body followed by `HALT`.
    pub fn generated_code(&self) -> Result<Vec<u32>, CodegenError> {
        let mut code = Vec::new();
        CodeGenerator::new(&self.context).generate(&self.body, &mut code)?;
        code.push(Opcode::Halt.byte_code());
        Ok(code)
    }
}

impl Statement {
    /// Append this statement's code to `code`, resolving calls against `context`.
    pub fn generate_code(
        &self,
        context: &Context,
        code: &mut Vec<u32>,
    ) -> Result<(), CodegenError> {
        CodeGenerator::new(context).generate(self, code)
    }
}

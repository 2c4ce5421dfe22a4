pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod passes;

use bl_common::CodeModule;

use crate::ast::Program;
use crate::error::CompileError;

/// Parse a program source and generate its byte code, optionally
/// simplifying IF/ELSE conditions first.
pub fn compile_program(
    source: &str,
    file: &str,
    simplify: bool,
) -> Result<(Program, CodeModule), CompileError> {
    let mut program = parser::parse_program_source(source, file)?;
    if simplify {
        passes::simplify_program(&mut program);
    }
    let code = program.generated_code()?;
    let module = CodeModule::new(program.name.clone(), file, code);
    Ok((program, module))
}

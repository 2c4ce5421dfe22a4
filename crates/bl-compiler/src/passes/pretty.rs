use std::fmt::{self, Write};

use crate::ast::{Program, Statement};

/// Indent used by the `Display` impls.
pub const DISPLAY_INDENT: usize = 4;

/// Format `stmt` as BL source, one statement per line, starting `offset`
/// columns in and nesting bodies by `indent`. An empty block prints nothing.
pub fn pretty_print(stmt: &Statement, offset: usize, indent: usize) -> String {
    Indented {
        stmt,
        offset,
        indent,
    }
    .to_string()
}

struct Indented<'a> {
    stmt: &'a Statement,
    offset: usize,
    indent: usize,
}

impl fmt::Display for Indented<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self.stmt, self.offset, self.indent)
    }
}

fn line<W: Write>(out: &mut W, offset: usize, text: fmt::Arguments<'_>) -> fmt::Result {
    writeln!(out, "{:offset$}{}", "", text)
}

fn write_statement<W: Write>(
    out: &mut W,
    stmt: &Statement,
    offset: usize,
    indent: usize,
) -> fmt::Result {
    match stmt {
        Statement::Block(children) => {
            for child in children {
                write_statement(out, child, offset, indent)?;
            }
            Ok(())
        }
        Statement::If { condition, body } => {
            line(out, offset, format_args!("IF {} THEN", condition.as_token()))?;
            write_statement(out, body, offset + indent, indent)?;
            line(out, offset, format_args!("END IF"))
        }
        Statement::IfElse {
            condition,
            then_body,
            else_body,
        } => {
            line(out, offset, format_args!("IF {} THEN", condition.as_token()))?;
            write_statement(out, then_body, offset + indent, indent)?;
            line(out, offset, format_args!("ELSE"))?;
            write_statement(out, else_body, offset + indent, indent)?;
            line(out, offset, format_args!("END IF"))
        }
        Statement::While { condition, body } => {
            line(out, offset, format_args!("WHILE {} DO", condition.as_token()))?;
            write_statement(out, body, offset + indent, indent)?;
            line(out, offset, format_args!("END WHILE"))
        }
        Statement::Call(name) => line(out, offset, format_args!("{}", name)),
    }
}

fn write_program<W: Write>(out: &mut W, program: &Program, indent: usize) -> fmt::Result {
    writeln!(out, "PROGRAM {} IS", program.name)?;
    writeln!(out)?;
    for (name, body) in &program.context {
        line(out, indent, format_args!("INSTRUCTION {} IS", name))?;
        write_statement(out, body, 2 * indent, indent)?;
        line(out, indent, format_args!("END {}", name))?;
        writeln!(out)?;
    }
    writeln!(out, "BEGIN")?;
    write_statement(out, &program.body, indent, indent)?;
    writeln!(out, "END {}", program.name)
}

struct IndentedProgram<'a> {
    program: &'a Program,
    indent: usize,
}

impl fmt::Display for IndentedProgram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_program(f, self.program, self.indent)
    }
}

impl Program {
    /// Format the whole program. Instruction headers sit one level in and
    /// their bodies two; the main body sits one level in.
    pub fn pretty_print(&self, indent: usize) -> String {
        IndentedProgram {
            program: self,
            indent,
        }
        .to_string()
    }
}

/// Same text as [`pretty_print`] at [`DISPLAY_INDENT`], newline included.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0, DISPLAY_INDENT)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_program(f, self, DISPLAY_INDENT)
    }
}

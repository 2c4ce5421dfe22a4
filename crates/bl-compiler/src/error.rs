use bl_common::{Diagnostic, Span};
use thiserror::Error;

/// A grammar violation. Parsing stops at the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected a condition, found {found}")]
    InvalidCondition { found: String, span: Span },

    #[error("name after END must be \"{expected}\", found \"{found}\"")]
    MismatchedName {
        expected: String,
        found: String,
        span: Span,
        opened_at: Span,
    },

    #[error("\"{name}\" is a primitive instruction and cannot be redefined")]
    PrimitiveRedefinition { name: String, span: Span },

    #[error("instruction \"{name}\" is defined more than once")]
    DuplicateInstruction {
        name: String,
        span: Span,
        first_defined_at: Span,
    },

    #[error("unexpected {found} after the end of the program")]
    TrailingInput { found: String, span: Span },

    #[error("{found} does not close any IF or WHILE")]
    UnmatchedCloser { found: String, span: Span },

    #[error("statements nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize, span: Span },

    #[error("token stream does not end with the end-of-input marker")]
    MissingEndOfInput,
}

impl ParseError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::InvalidCondition { span, .. }
            | ParseError::MismatchedName { span, .. }
            | ParseError::PrimitiveRedefinition { span, .. }
            | ParseError::DuplicateInstruction { span, .. }
            | ParseError::TrailingInput { span, .. }
            | ParseError::UnmatchedCloser { span, .. }
            | ParseError::NestingTooDeep { span, .. } => Some(span),
            ParseError::MissingEndOfInput => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        if let Some(span) = self.span() {
            diag = diag.with_span(span.clone());
        }
        match self {
            ParseError::MismatchedName { opened_at, .. } => {
                diag.with_related(opened_at.clone(), "opened here")
            }
            ParseError::DuplicateInstruction {
                first_defined_at, ..
            } => diag.with_related(first_defined_at.clone(), "first defined here"),
            ParseError::PrimitiveRedefinition { .. } => diag.with_suggestion(
                "choose a name other than move, turnleft, turnright, infect or skip",
            ),
            _ => diag,
        }
    }
}

/// Failure to turn a statement tree into byte code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    /// `caller` is the user-defined instruction whose body holds the
    /// call, or `None` for the main body.
    #[error("unknown instruction \"{name}\"{}", in_body(.caller))]
    UnknownInstruction {
        name: String,
        caller: Option<String>,
    },

    #[error("invalid opcode {word} at address {address}")]
    InvalidOpcode { address: usize, word: u32 },

    #[error("{opcode} at address {address} is missing its jump target")]
    MissingOperand { address: usize, opcode: String },
}

fn in_body(caller: &Option<String>) -> String {
    match caller {
        Some(name) => format!(" in the body of \"{}\"", name),
        None => String::new(),
    }
}

impl CodegenError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            CodegenError::UnknownInstruction { caller: None, .. } => {
                diag.with_suggestion("define it with INSTRUCTION ... END, or check the spelling")
            }
            CodegenError::UnknownInstruction { caller: Some(_), .. } => diag.with_suggestion(
                "an instruction body may only call move, turnleft, turnright, infect and skip",
            ),
            _ => diag,
        }
    }
}

/// Misuse of the tree-editing helpers and refactoring passes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PassError {
    #[error("expected a BLOCK statement, found {0}")]
    NotABlock(&'static str),

    #[error("block position {pos} out of range (length {len})")]
    BlockIndex { pos: usize, len: usize },

    #[error("instruction \"{0}\" is not defined")]
    UndefinedInstruction(String),

    #[error("instruction \"{0}\" is already defined")]
    AlreadyDefined(String),

    #[error("\"{0}\" is not a valid instruction name")]
    InvalidName(String),
}

/// Anything that can stop a source file from compiling.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("source contains {} illegal token(s)", .0.len())]
    Tokenize(Vec<Diagnostic>),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Tokenize(diags) => diags.clone(),
            CompileError::Parse(e) => vec![e.to_diagnostic()],
            CompileError::Codegen(e) => vec![e.to_diagnostic()],
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

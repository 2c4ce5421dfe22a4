pub mod errors;
pub mod manifest;
pub mod module;
pub mod opcode;
pub mod span;

pub use errors::{Diagnostic, DiagnosticBag, Severity};
pub use module::CodeModule;
pub use opcode::Opcode;
pub use span::{Position, Span};

pub mod generator;
pub mod listing;

pub use generator::{conditional_jump, CodeGenerator};
pub use listing::{disassemble, DecodedInstruction};

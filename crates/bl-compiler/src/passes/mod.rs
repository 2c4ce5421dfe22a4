//! Tree-to-tree and tree-to-text passes over parsed BL.

pub mod count;
pub mod pretty;
pub mod rename;
pub mod simplify;

pub use count::{called_names, count_primitive_calls};
pub use pretty::{pretty_print, DISPLAY_INDENT};
pub use rename::{rename_instruction, rename_program_instruction};
pub use simplify::{simplify_if_else, simplify_program};

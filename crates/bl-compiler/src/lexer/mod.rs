pub mod cursor;
pub mod token;

mod scanner;

pub use scanner::Tokenizer;
pub use token::{
    is_condition, is_identifier, is_keyword, Keyword, Token, TokenKind, TokenQueue, END_OF_INPUT,
};

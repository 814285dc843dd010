pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{Lexer, LexerData};
pub use parser::Parser;
pub use token::{Token, TokenCategory};

//! Tokenizer: turns Python source text into a stream of [`Token`]s.
//!
//! Indentation-sensitivity, line-continuation, and string-prefix handling
//! live here so every later phase (parser, binder) works with an already
//! logically-lined-up token stream instead of re-deriving it.

pub mod scanner;
pub mod token;

pub use scanner::{fstring_expression_spans, Scanner, ScannerSnapshot};
pub use token::{StringPrefix, Token, TokenKind};

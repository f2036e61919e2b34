//! Lessen turns CSS and LESS source text into a stream of typed, positioned tokens.
//!
//! ```
//! use lessen::css::token::TokenKind;
//!
//! let tokens = lessen::css::tokenize("@color: #fff;");
//! assert_eq!(tokens[0].kind(), TokenKind::AtIdentifier);
//! assert_eq!(tokens[3].text(), "#fff");
//! ```
pub use lessen_css as css;
pub use lessen_shared as shared;

pub use lessen_css::token::{Token, TokenKind};
pub use lessen_css::tokenize;
pub use lessen_css::tokenizer::Tokenizer;
pub use lessen_css::tokenizer_config::{TokenizerConfig, TokenizerOptions};

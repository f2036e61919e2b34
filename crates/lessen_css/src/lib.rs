//! Tokenizer for CSS with the LESS extensions (variables, line comments, unicode ranges and
//! such). The tokenizer is lenient: any input produces a stream of tokens that covers the input
//! exactly, without gaps or overlaps.
use crate::token::Token;
use crate::tokenizer::Tokenizer;

pub mod lookahead;
pub mod token;
pub mod tokenizer;
pub mod tokenizer_config;
pub mod unicode;

/// Tokenizes the complete text with the default configuration
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn tokenize_text() {
        let tokens = tokenize("a{b:c}");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Delimiter,
                TokenKind::Identifier,
                TokenKind::Delimiter,
                TokenKind::Identifier,
                TokenKind::Delimiter,
            ]
        );

        assert!(tokenize("").is_empty());
    }
}

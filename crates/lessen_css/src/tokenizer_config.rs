use bitflags::bitflags;
use lessen_shared::char_stream::Location;

bitflags! {
    /// Flags changing the tokens that are produced
    #[derive(Default)]
    pub struct TokenizerOptions: u8 {
        const NONE = 0b0000_0000;
        /// Report a `/* ... */` comment as an open marker (including the comment body) and a
        /// separate close marker, instead of a single comment token
        const MULTILINE_COMMENT_BEGIN_END_TOKENS = 0b0000_0001;
    }
}

/// TokenizerConfig holds the configuration for the tokenizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Position of the first character to tokenize
    pub start: usize,
    /// Position right after the last character to tokenize. `None` tokenizes up to the end.
    pub end: Option<usize>,
    /// Added to the start and end of every token, for texts embedded in a larger document
    pub position_offset: usize,
    /// Location holds the line/column of the first character in the data source
    pub location: Location,
    pub options: TokenizerOptions,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            position_offset: 0,
            location: Location::default(),
            options: TokenizerOptions::NONE,
        }
    }
}

impl TokenizerConfig {
    /// Returns true when the given option is set
    pub fn has_option(&self, option: TokenizerOptions) -> bool {
        self.options.contains(option)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = TokenizerConfig::default();
        assert_eq!(config.start, 0);
        assert_eq!(config.end, None);
        assert_eq!(config.position_offset, 0);
        assert_eq!(config.location, Location::new(1, 1, 0));
        assert!(!config.has_option(TokenizerOptions::MULTILINE_COMMENT_BEGIN_END_TOKENS));
        assert_eq!(TokenizerOptions::default(), TokenizerOptions::NONE);
    }

    #[test]
    fn options() {
        let config = TokenizerConfig {
            options: TokenizerOptions::MULTILINE_COMMENT_BEGIN_END_TOKENS,
            ..Default::default()
        };
        assert!(config.has_option(TokenizerOptions::MULTILINE_COMMENT_BEGIN_END_TOKENS));
    }
}

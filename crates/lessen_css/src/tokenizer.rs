use crate::lookahead::{
    look_over_identifier, look_over_name, look_over_unicode_code, look_over_whitespace,
};
use crate::token::{Number, Token, TokenKind};
use crate::tokenizer_config::{TokenizerConfig, TokenizerOptions};
use crate::unicode::{
    is_delimiter, is_digit, is_letter, is_line_terminator, is_name_start_char, is_whitespace,
};
use lessen_shared::char_stream::Character::{Ch, StreamEnd};
use lessen_shared::char_stream::{CharStream, Character, Location, LocationHandler, Stream};
use lessen_shared::errors::Result;
use std::iter::FusedIterator;

/// Largest mantissa a decimal can hold (2^96 - 1)
const MAX_MANTISSA: i128 = 79_228_162_514_264_337_593_543_950_335;
/// Largest number of fractional digits a decimal can hold
const MAX_SCALE: u32 = 28;

/// Builds an exact decimal out of the digits of a number. The decimal point only moves the
/// scale, all digits end up in the same integer mantissa.
#[derive(Default)]
struct NumberBuilder {
    mantissa: i128,
    scale: u32,
    /// Set when the integer part does not fit in a decimal
    overflow: bool,
    /// Set once a fractional digit did not fit, all digits after it are dropped too
    truncated: bool,
}

impl NumberBuilder {
    fn push_integer_digit(&mut self, digit: u32) {
        if self.overflow {
            return;
        }

        match self.shifted(digit) {
            Some(mantissa) => self.mantissa = mantissa,
            None => self.overflow = true,
        }
    }

    /// Fractional digits that no longer fit are dropped
    fn push_fraction_digit(&mut self, digit: u32) {
        if self.overflow || self.truncated || self.scale >= MAX_SCALE {
            return;
        }

        match self.shifted(digit) {
            Some(mantissa) => {
                self.mantissa = mantissa;
                self.scale += 1;
            }
            None => self.truncated = true,
        }
    }

    fn shifted(&self, digit: u32) -> Option<i128> {
        self.mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(i128::from(digit)))
            .filter(|m| *m <= MAX_MANTISSA)
    }

    fn build(&self, negative: bool) -> Number {
        if self.overflow {
            return if negative { Number::MIN } else { Number::MAX };
        }

        let mantissa = if negative { -self.mantissa } else { self.mantissa };
        Number::try_from_i128_with_scale(mantissa, self.scale).unwrap_or(Number::MAX)
    }
}

/// Tokenizer for CSS with LESS extensions. Every call to `next_token()` produces exactly one token
/// until the stream is exhausted.
pub struct Tokenizer<S: Stream = CharStream> {
    stream: S,
    config: TokenizerConfig,
    /// Line/column of the current position
    location: LocationHandler,
    /// Set when an open comment marker has been produced, and the close marker is next
    pending_comment_close: bool,
}

impl Tokenizer<CharStream> {
    /// Creates a tokenizer over the complete text with the default configuration
    pub fn new(text: &str) -> Self {
        Self::from_stream(CharStream::new(text), TokenizerConfig::default())
    }

    /// Creates a tokenizer over the window of the text given in the configuration
    pub fn with_config(text: &str, config: TokenizerConfig) -> Result<Self> {
        let stream = CharStream::with_range(text, config.start, config.end)?;
        Ok(Self::from_stream(stream, config))
    }
}

impl<S: Stream> Tokenizer<S> {
    /// Creates a tokenizer that reads from the given stream
    pub fn from_stream(stream: S, config: TokenizerConfig) -> Self {
        log::debug!(
            "creating tokenizer at position {} with options {:?}",
            stream.tell(),
            config.options
        );

        Self {
            stream,
            location: LocationHandler::new(config.location),
            config,
            pending_comment_close: false,
        }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Position of the next character to read, including the position offset
    pub fn tell(&self) -> usize {
        self.stream.tell().saturating_add(self.config.position_offset)
    }

    /// Line/column of the next character to read
    pub fn current_location(&self) -> Location {
        self.location.current()
    }

    /// Moves back to the start of the stream. The tokens produced after a reset are exactly the
    /// ones produced the first time.
    pub fn reset(&mut self) {
        log::debug!("resetting tokenizer");

        self.stream.reset_stream();
        self.location.reset();
        self.pending_comment_close = false;
    }

    /// Produces the next token, or `None` when the stream is exhausted
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.consume_token()?.shifted(self.config.position_offset);

        log::trace!("{} at {}..{}", token.kind(), token.start(), token.end());

        Some(token)
    }

    fn consume_token(&mut self) -> Option<Token> {
        let current = match self.current_char() {
            Ch(c) => c,
            StreamEnd => return None,
        };

        let start = self.stream.tell();
        let loc = self.location.current();

        if self.pending_comment_close {
            self.pending_comment_close = false;
            return Some(self.consume_comment_close(start, loc));
        }

        let token = match current {
            c if is_whitespace(c) => {
                let distance = look_over_whitespace(&self.stream, 0);
                self.advance(distance, true);
                Some(self.token(TokenKind::Whitespace, start, loc))
            }
            c if is_digit(c) => Some(self.consume_numeric_token(start, loc, false)),
            c if is_delimiter(c) => {
                self.next_char();
                Some(self.token(TokenKind::Delimiter, start, loc))
            }
            '~' | '|' => {
                // `~=` and `|=` are operators of two characters
                if self.stream.look_ahead(1) == Ch('=') {
                    self.next_char();
                }
                None
            }
            '/' => self.consume_comment(start, loc),
            '@' => {
                let distance = look_over_identifier(&self.stream, 1);
                (distance > 0).then(|| {
                    self.advance(1 + distance, true);
                    self.token(TokenKind::AtIdentifier, start, loc)
                })
            }
            '#' => {
                let distance = look_over_name(&self.stream, 1);
                (distance > 0).then(|| {
                    self.advance(1 + distance, true);
                    self.token(TokenKind::HashName, start, loc)
                })
            }
            '<' => {
                let cdo = self.look_ahead_is(1, "!--");
                cdo.then(|| {
                    self.advance(4, true);
                    self.token(TokenKind::CDataOpen, start, loc)
                })
            }
            '-' => self.consume_minus(start, loc),
            c if is_name_start_char(c) => Some(self.consume_ident_like_seq(start, loc)),
            c @ ('"' | '\'') => Some(self.consume_string_token(start, loc, c)),
            '$' => self.consume_variable(start, loc),
            _ => None,
        };

        // Anything that is not recognized is a single character operator
        Some(token.unwrap_or_else(|| {
            self.next_char();
            self.token(TokenKind::Operator, start, loc)
        }))
    }

    /// `//` up to the end of the line, or `/*` up to and including `*/`
    fn consume_comment(&mut self, start: usize, loc: Location) -> Option<Token> {
        match self.stream.look_ahead(1) {
            Ch('/') => Some(self.consume_line_comment(start, loc)),
            Ch('*') => Some(self.consume_block_comment(start, loc)),
            _ => None,
        }
    }

    fn consume_line_comment(&mut self, start: usize, loc: Location) -> Token {
        // consume '//'
        self.advance(2, false);

        let value_start = self.stream.tell();
        while let Ch(c) = self.current_char() {
            if is_line_terminator(c) {
                break;
            }
            self.next_char();
        }

        let value = self.slice(value_start, self.stream.tell());
        self.string_value_token(TokenKind::Comment, start, loc, value)
    }

    fn consume_block_comment(&mut self, start: usize, loc: Location) -> Token {
        // consume '/*'
        self.advance(2, false);

        let value_start = self.stream.tell();
        let mut terminated = false;
        loop {
            match self.current_char() {
                StreamEnd => break,
                Ch('*') if self.stream.look_ahead(1) == Ch('/') => {
                    terminated = true;
                    break;
                }
                Ch(_) => self.next_char(),
            }
        }

        let value = self.slice(value_start, self.stream.tell());

        if self
            .config
            .has_option(TokenizerOptions::MULTILINE_COMMENT_BEGIN_END_TOKENS)
        {
            // The close marker will be produced on the next call
            self.pending_comment_close = terminated;
            return self.string_value_token(TokenKind::Comment, start, loc, value);
        }

        if terminated {
            // consume '*/'
            self.advance(2, false);
        }

        let token = self.string_value_token(TokenKind::Comment, start, loc, value);
        self.stream.flush(token.end());
        token
    }

    fn consume_comment_close(&mut self, start: usize, loc: Location) -> Token {
        // consume '*/'
        self.advance(2, false);

        let token = self.token(TokenKind::Comment, start, loc);
        self.stream.flush(token.end());
        token
    }

    /// `-->`, a negative number, or an identifier starting with `-`
    fn consume_minus(&mut self, start: usize, loc: Location) -> Option<Token> {
        if self.look_ahead_is(1, "->") {
            self.advance(3, true);
            return Some(self.token(TokenKind::CDataClose, start, loc));
        }

        if self.stream.look_ahead(1).is(is_digit) {
            // consume '-', the token still starts at the sign
            self.next_char();
            return Some(self.consume_numeric_token(start, loc, true));
        }

        let distance = look_over_name(&self.stream, 1);
        if distance > 0 {
            self.advance(1 + distance, true);
            return Some(self.token(TokenKind::Identifier, start, loc));
        }

        None
    }

    /// Returns a `number`, `percentage` or `dimension` token
    fn consume_numeric_token(&mut self, start: usize, loc: Location, negative: bool) -> Token {
        let mut number = NumberBuilder::default();

        self.consume_digits(|digit| number.push_integer_digit(digit));
        if self.current_char() == Ch('.') {
            // consume '.'
            self.next_char();
            self.consume_digits(|digit| number.push_fraction_digit(digit));
        }

        let value = number.build(negative);

        let token = match self.current_char() {
            Ch('%') => {
                // consume '%'
                self.next_char();
                let end = self.stream.tell();
                Token::new_numeric(
                    TokenKind::Percentage,
                    start,
                    end,
                    self.slice(start, end),
                    loc,
                    value,
                )
            }
            Ch(c) if is_letter(c) => {
                let unit_start = self.stream.tell();
                while self.current_char().is(is_letter) {
                    self.next_char();
                }

                let end = self.stream.tell();
                Token::new_dimension(
                    start,
                    end,
                    self.slice(start, end),
                    loc,
                    value,
                    self.slice(unit_start, end),
                )
            }
            _ => {
                let end = self.stream.tell();
                Token::new_numeric(
                    TokenKind::Number,
                    start,
                    end,
                    self.slice(start, end),
                    loc,
                    value,
                )
            }
        };

        self.stream.flush(token.end());
        token
    }

    fn consume_digits(&mut self, mut push: impl FnMut(u32)) {
        while let Ch(c) = self.current_char() {
            if !is_digit(c) {
                break;
            }

            push(u32::from(c) - u32::from('0'));
            self.next_char();
        }
    }

    /// Returns an `identifier`, `function`, `uri` or `unicode-range` token
    fn consume_ident_like_seq(&mut self, start: usize, loc: Location) -> Token {
        if self.look_ahead_is(0, "u+") {
            if let Some(token) = self.consume_unicode_range(start, loc) {
                return token;
            }
        }

        // The current character starts a name, so the distance is at least 1
        let distance = look_over_name(&self.stream, 0);
        let name = self.slice(start, start + distance);

        if self.stream.look_ahead(distance) == Ch('(') {
            // consume name and '('
            self.advance(distance + 1, false);

            if name == "uri" || name == "url" {
                return self.consume_uri(start, loc, name);
            }

            return self.token(TokenKind::Function, start, loc);
        }

        self.advance(distance, true);
        self.token(TokenKind::Identifier, start, loc)
    }

    /// `u+` followed by up to 6 hex digits, and optionally `-` with up to 6 more hex digits
    fn consume_unicode_range(&mut self, start: usize, loc: Location) -> Option<Token> {
        let first = look_over_unicode_code(&self.stream, 2);
        if first == 0 {
            return None;
        }
        self.advance(2 + first, false);

        if self.current_char() == Ch('-') {
            let second = look_over_unicode_code(&self.stream, 1);
            if second > 0 {
                self.advance(1 + second, false);
            }
        }

        let token = self.token(TokenKind::UnicodeRange, start, loc);
        self.stream.flush(token.end());
        Some(token)
    }

    /// Rest of an uri after `url(` or `uri(`. A missing close parenthesis is accepted.
    fn consume_uri(&mut self, start: usize, loc: Location, prefix: String) -> Token {
        self.consume_whitespace();

        let value = match self.current_char() {
            Ch(quote @ ('"' | '\'')) => {
                // consume opening quote
                self.next_char();
                self.consume_string(quote)
            }
            _ => {
                let value_start = self.stream.tell();
                while let Ch(c) = self.current_char() {
                    if is_whitespace(c) || c == ')' {
                        break;
                    }
                    self.next_char();
                }
                self.slice(value_start, self.stream.tell())
            }
        };

        self.consume_whitespace();
        if self.current_char() == Ch(')') {
            // consume ')'
            self.next_char();
        }

        let end = self.stream.tell();
        Token::new_uri(start, end, self.slice(start, end), loc, prefix, value)
    }

    fn consume_string_token(&mut self, start: usize, loc: Location, quote: char) -> Token {
        // consume opening quote
        self.next_char();

        let value = self.consume_string(quote);
        self.string_value_token(TokenKind::String, start, loc, value)
    }

    /// Consumes the string after its opening quote and returns the raw text between the quotes.
    /// Escapes are kept as written. A line terminator ends the string without being consumed.
    fn consume_string(&mut self, quote: char) -> String {
        let value_start = self.stream.tell();

        let value_end = loop {
            match self.current_char() {
                StreamEnd => break self.stream.tell(),
                Ch(c) if c == quote => {
                    let end = self.stream.tell();
                    // consume closing quote
                    self.next_char();
                    break end;
                }
                Ch(c) if is_line_terminator(c) => break self.stream.tell(),
                Ch('\\') if self.stream.has_more(1) => {
                    // consume '\' and the character it escapes
                    self.advance(2, false);
                }
                Ch(_) => self.next_char(),
            }
        };

        self.slice(value_start, value_end)
    }

    /// `${name}` or `$` followed by letters
    fn consume_variable(&mut self, start: usize, loc: Location) -> Option<Token> {
        let (distance, name_start, name_end) = match self.stream.look_ahead(1) {
            Ch('{') => {
                let mut distance = 2;
                let name_end = loop {
                    match self.stream.look_ahead(distance) {
                        StreamEnd => break distance,
                        Ch('}') => {
                            distance += 1;
                            break distance - 1;
                        }
                        Ch(_) => distance += 1,
                    }
                };
                (distance, 2, name_end)
            }
            Ch(c) if is_letter(c) => {
                let mut distance = 2;
                while self.stream.look_ahead(distance).is(is_letter) {
                    distance += 1;
                }
                (distance, 1, distance)
            }
            _ => return None,
        };

        let name = self.slice(start + name_start, start + name_end);
        self.advance(distance, true);
        Some(self.string_value_token(TokenKind::Variable, start, loc, name))
    }

    fn consume_whitespace(&mut self) {
        let distance = look_over_whitespace(&self.stream, 0);
        self.advance(distance, false);
    }

    fn current_char(&self) -> Character {
        self.stream.read()
    }

    /// Returns true when the characters from `offset` on are exactly the given ones
    fn look_ahead_is(&self, offset: usize, expected: &str) -> bool {
        expected
            .chars()
            .enumerate()
            .all(|(i, c)| self.stream.look_ahead(offset + i) == Ch(c))
    }

    fn next_char(&mut self) {
        self.advance(1, false);
    }

    /// Advances the stream and keeps track of the line/column
    fn advance(&mut self, n: usize, flush: bool) {
        for i in 0..n {
            self.location
                .inc(self.stream.look_ahead(i), self.stream.look_ahead(i + 1));
        }

        self.stream.next_n(n, flush);
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.stream.get_slice(start, end)
    }

    /// Token of the given kind from `start` up to the current position
    fn token(&self, kind: TokenKind, start: usize, loc: Location) -> Token {
        let end = self.stream.tell();
        Token::new(kind, start, end, self.slice(start, end), loc)
    }

    fn string_value_token(
        &self,
        kind: TokenKind,
        start: usize,
        loc: Location,
        value: String,
    ) -> Token {
        let end = self.stream.tell();
        Token::new_string_value(kind, start, end, self.slice(start, end), loc, value)
    }
}

impl<S: Stream> Iterator for Tokenizer<S> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<S: Stream> FusedIterator for Tokenizer<S> {}

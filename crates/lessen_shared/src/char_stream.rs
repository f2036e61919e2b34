use crate::errors::{Error, Result};
use std::fmt;
use std::fmt::{Debug, Formatter};

pub const CHAR_LF: char = '\u{000A}';
pub const CHAR_CR: char = '\u{000D}';
pub const CHAR_FF: char = '\u{000C}';

/// Defines a single character/element in the stream. Reading past the end of the stream
/// does not fail, but returns `StreamEnd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// Stream buffer is exhausted
    StreamEnd,
}

use Character::*;

/// Converts the given character to a char. `StreamEnd` is converted to 0x0000
impl From<Character> for char {
    fn from(c: Character) -> Self {
        match c {
            Ch(c) => c,
            StreamEnd => 0x0000 as char,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
        }
    }
}

impl Character {
    /// Returns true when the character is a whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(c) if c.is_whitespace())
    }

    /// Returns true when the character is an ascii digit
    pub fn is_ascii_digit(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }

    /// Returns true when the character matches the given predicate. `StreamEnd` never matches.
    pub fn is(&self, predicate: impl Fn(char) -> bool) -> bool {
        matches!(self, Ch(c) if predicate(*c))
    }
}

/// Character access used by the tokenizer. All offsets passed to the lookahead functions are
/// relative to the current position, while `tell`, `flush` and `get_slice` work on absolute
/// positions in the source.
pub trait Stream {
    /// Returns true when at least `offset + 1` characters are left from the current position
    fn has_more(&self, offset: usize) -> bool;
    /// Looks ahead in the stream without consuming anything
    fn look_ahead(&self, offset: usize) -> Character;
    /// Read current character
    fn read(&self) -> Character {
        self.look_ahead(0)
    }
    /// Absolute position of the current character
    fn tell(&self) -> usize;
    /// Advance with 1 character. Never flushes.
    fn next(&mut self) {
        self.next_n(1, false);
    }
    /// Advance with `n` characters, flushing everything before the new position when asked
    fn next_n(&mut self, n: usize, flush: bool);
    /// Signals that everything before `up_to` will not be read again
    fn flush(&mut self, up_to: usize);
    /// Returns the text between the two absolute positions
    fn get_slice(&self, from: usize, to: usize) -> String;
    /// Resets the stream back to the start position
    fn reset_stream(&mut self);
    /// Returns true when no characters are left
    fn eof(&self) -> bool {
        !self.has_more(0)
    }
}

/// In-memory stream over the characters of a string. The stream can be limited to a window
/// of the text, in which case reading starts at `start` and stops at `end`.
pub struct CharStream {
    /// All characters of the source text
    buffer: Vec<char>,
    /// First position of the window
    start: usize,
    /// Position right after the last character of the window
    end: usize,
    /// Current position in the stream
    position: usize,
    /// Everything before this position has been flushed
    committed: usize,
}

impl CharStream {
    /// Creates a stream over the complete text
    pub fn new(text: &str) -> Self {
        let buffer: Vec<char> = text.chars().collect();
        let end = buffer.len();

        Self {
            buffer,
            start: 0,
            end,
            position: 0,
            committed: 0,
        }
    }

    /// Creates a stream over the `[start, end)` window of the text. Positions are character
    /// positions, not byte positions.
    pub fn with_range(text: &str, start: usize, end: Option<usize>) -> Result<Self> {
        let mut stream = Self::new(text);
        let len = stream.buffer.len();
        let end = end.unwrap_or(len);

        if start > end || end > len {
            return Err(Error::InvalidRange { start, end, len });
        }

        stream.start = start;
        stream.end = end;
        stream.position = start;
        stream.committed = start;

        Ok(stream)
    }

    /// Position of the first character of the window
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position right after the last character of the window
    pub fn end(&self) -> usize {
        self.end
    }

    /// Position up to where the stream has been flushed
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Number of characters left in the window
    pub fn chars_left(&self) -> usize {
        self.end - self.position
    }
}

impl Stream for CharStream {
    fn has_more(&self, offset: usize) -> bool {
        self.position + offset < self.end
    }

    fn look_ahead(&self, offset: usize) -> Character {
        if !self.has_more(offset) {
            return StreamEnd;
        }

        Ch(self.buffer[self.position + offset])
    }

    fn tell(&self) -> usize {
        self.position
    }

    fn next_n(&mut self, n: usize, flush: bool) {
        self.position = (self.position + n).min(self.end);
        if flush {
            self.flush(self.position);
        }
    }

    fn flush(&mut self, up_to: usize) {
        if up_to > self.committed {
            log::trace!("flushing stream up to {up_to}");
            self.committed = up_to.min(self.end);
        }
    }

    fn get_slice(&self, from: usize, to: usize) -> String {
        let to = to.min(self.end);
        if from >= to {
            return String::new();
        }

        self.buffer[from..to].iter().collect()
    }

    fn reset_stream(&mut self) {
        self.position = self.start;
        self.committed = self.start;
    }
}

/// Location holds the start position of the given element in the data source
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 1
    pub column: usize,
    /// Character offset, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// LocationHandler is a wrapper that will deal with line/column locations in the stream
pub struct LocationHandler {
    /// The start location. Normally this is 1:1, but can be different in case of inline streams
    pub start_location: Location,
    /// The current location of the stream, relative to the start location
    pub cur_location: Location,
}

impl LocationHandler {
    /// Create a new LocationHandler. Start_location can be set in case the stream is
    /// not starting at 1:1
    pub fn new(start_location: Location) -> Self {
        Self {
            start_location,
            cur_location: Location::default(),
        }
    }

    /// Moves back to the start location
    pub fn reset(&mut self) {
        self.cur_location = Location::default();
    }

    /// Returns the current location with the start location taken into account
    pub fn current(&self) -> Location {
        let column = if self.cur_location.line == 1 {
            self.start_location.column + self.cur_location.column - 1
        } else {
            self.cur_location.column
        };

        Location::new(
            self.start_location.line + self.cur_location.line - 1,
            column,
            self.start_location.offset + self.cur_location.offset,
        )
    }

    /// Will increase the current location based on the given character. The character that
    /// follows is needed to count a CR/LF pair as a single line ending.
    pub fn inc(&mut self, ch: Character, next: Character) {
        match ch {
            Ch(CHAR_LF) | Ch(CHAR_FF) => self.new_line(),
            Ch(CHAR_CR) if next != Ch(CHAR_LF) => self.new_line(),
            Ch(_) => {
                self.cur_location.column += 1;
                self.cur_location.offset += 1;
            }
            StreamEnd => {}
        }
    }

    fn new_line(&mut self) {
        self.cur_location.line += 1;
        self.cur_location.column = 1;
        self.cur_location.offset += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stream() {
        let mut stream = CharStream::new("f👽f");
        assert!(!stream.eof());
        assert_eq!(stream.chars_left(), 3);

        assert_eq!(stream.read(), Ch('f'));
        assert_eq!(stream.look_ahead(1), Ch('👽'));
        assert_eq!(stream.look_ahead(2), Ch('f'));
        assert_eq!(stream.look_ahead(3), StreamEnd);

        stream.next();
        assert_eq!(stream.read(), Ch('👽'));
        assert_eq!(stream.tell(), 1);
        stream.next_n(2, false);
        assert!(stream.eof());
        assert_eq!(stream.read(), StreamEnd);

        stream.reset_stream();
        assert_eq!(stream.read(), Ch('f'));
        assert_eq!(stream.tell(), 0);
    }

    #[test]
    fn has_more() {
        let stream = CharStream::new("abc");
        assert!(stream.has_more(0));
        assert!(stream.has_more(2));
        assert!(!stream.has_more(3));

        let empty = CharStream::new("");
        assert!(!empty.has_more(0));
        assert!(empty.eof());
    }

    #[test]
    fn advance_never_passes_the_end() {
        let mut stream = CharStream::new("abc");
        stream.next_n(10, false);
        assert_eq!(stream.tell(), 3);
        assert!(stream.eof());
    }

    #[test]
    fn flush() {
        let mut stream = CharStream::new("abcdef");
        stream.next();
        assert_eq!(stream.committed(), 0);

        stream.next_n(2, true);
        assert_eq!(stream.committed(), 3);

        stream.next_n(1, false);
        assert_eq!(stream.committed(), 3);

        // flushing never moves backwards
        stream.flush(1);
        assert_eq!(stream.committed(), 3);

        stream.reset_stream();
        assert_eq!(stream.committed(), 0);
    }

    #[test]
    fn window() {
        let mut stream = CharStream::with_range("..abc..", 2, Some(5)).unwrap();
        assert_eq!(stream.tell(), 2);
        assert_eq!(stream.read(), Ch('a'));
        assert_eq!(stream.look_ahead(2), Ch('c'));
        assert_eq!(stream.look_ahead(3), StreamEnd);
        assert_eq!(stream.get_slice(2, 5), "abc");

        stream.next_n(3, true);
        assert!(stream.eof());
        assert_eq!(stream.committed(), 5);

        stream.reset_stream();
        assert_eq!(stream.tell(), 2);
    }

    #[test]
    fn invalid_window() {
        assert_eq!(
            CharStream::with_range("abc", 2, Some(1)).err(),
            Some(Error::InvalidRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert!(CharStream::with_range("abc", 0, Some(4)).is_err());
        assert!(CharStream::with_range("abc", 4, None).is_err());
        assert!(CharStream::with_range("abc", 3, None).is_ok());
    }

    #[test]
    fn test_slice() {
        let stream = CharStream::new("a👽bcd");
        assert_eq!(stream.get_slice(0, 3), "a👽b");
        assert_eq!(stream.get_slice(2, 2), "");
        assert_eq!(stream.get_slice(3, 100), "cd");
    }

    #[test]
    fn test_character() {
        let ch = Ch('a');
        assert_eq!(char::from(ch), 'a');
        assert_eq!(format!("{}", ch), "a");
        assert_eq!(char::from(StreamEnd), '\0');

        assert!(Ch('0').is_ascii_digit());
        assert!(!Ch('b').is_ascii_digit());
        assert!(!Ch('\u{0663}').is_ascii_digit());
        assert!(Ch(' ').is_whitespace());
        assert!(Ch('\n').is_whitespace());
        assert!(!StreamEnd.is_whitespace());
        assert!(Ch('x').is(|c| c == 'x'));
        assert!(!StreamEnd.is(|_| true));
    }

    #[test]
    fn location_handler() {
        let mut handler = LocationHandler::new(Location::default());
        handler.inc(Ch('a'), Ch('\n'));
        assert_eq!(handler.current(), Location::new(1, 2, 1));

        handler.inc(Ch('\n'), Ch('b'));
        assert_eq!(handler.current(), Location::new(2, 1, 2));

        // CR/LF counts as a single line ending
        handler.inc(Ch('\r'), Ch('\n'));
        handler.inc(Ch('\n'), Ch('c'));
        assert_eq!(handler.current().line, 3);

        // a lone CR and a form feed both end a line
        handler.inc(Ch('\r'), Ch('d'));
        handler.inc(Ch('\u{000C}'), Ch('e'));
        assert_eq!(handler.current(), Location::new(5, 1, 6));

        handler.reset();
        assert_eq!(handler.current(), Location::default());
    }

    #[test]
    fn location_handler_with_start_location() {
        let mut handler = LocationHandler::new(Location::new(10, 5, 100));
        assert_eq!(handler.current(), Location::new(10, 5, 100));

        handler.inc(Ch('a'), Ch('\n'));
        assert_eq!(handler.current(), Location::new(10, 6, 101));

        handler.inc(Ch('\n'), StreamEnd);
        assert_eq!(handler.current(), Location::new(11, 1, 102));
        assert_eq!(format!("{:?}", handler.current()), "(11:1)");
    }
}

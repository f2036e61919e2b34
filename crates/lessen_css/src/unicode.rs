//! Character classification used by the tokenizer and the lookahead scanners

#[allow(clippy::module_name_repetitions)]
pub struct UnicodeChar;

impl UnicodeChar {
    pub const LINE_FEED: char = '\u{000A}';
    pub const FORM_FEED: char = '\u{000C}';
    pub const CARRIAGE_RETURN: char = '\u{000D}';
    pub const LOW_LINE: char = '\u{005F}';
    pub const HYPHEN_MINUS: char = '\u{002D}';
    /// Every character above this one is accepted as part of a name
    pub const NAME_THRESHOLD: char = '\u{00B1}';
}

/// Single character delimiters. Each of them always forms a token on its own.
pub const DELIMITERS: &str = "{}()[]:;,";

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

/// `\r`, `\n` and `\f` end a line
pub fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        UnicodeChar::CARRIAGE_RETURN | UnicodeChar::LINE_FEED | UnicodeChar::FORM_FEED
    )
}

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(c)
}

/// Letters, `_` and anything above U+00B1 can start a name
pub fn is_name_start_char(c: char) -> bool {
    c == UnicodeChar::LOW_LINE || is_letter(c) || c > UnicodeChar::NAME_THRESHOLD
}

pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c == UnicodeChar::HYPHEN_MINUS || is_digit(c)
}

//! Lookahead scanners
//!
//! Every function in here measures how many characters, starting at `offset` from the current
//! position of the stream, form a certain construct. Nothing is consumed, so the tokenizer can
//! decide on a production before committing to it. A distance of 0 means "no match".
use crate::unicode::{
    is_hex_digit, is_line_terminator, is_name_char, is_name_start_char, is_whitespace,
};
use lessen_shared::char_stream::Character::Ch;
use lessen_shared::char_stream::Stream;

/// Maximum number of hex digits in a unicode code
pub const MAX_UNICODE_CODE_LEN: usize = 6;

/// Length of the whitespace run at `offset`
pub fn look_over_whitespace<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    let mut distance = 0;
    while stream.look_ahead(offset + distance).is(is_whitespace) {
        distance += 1;
    }

    distance
}

/// An identifier is a name start character followed by any number of name characters
pub fn look_over_identifier<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    let distance = look_over_name_start_char(stream, offset);
    if distance == 0 {
        return 0;
    }

    distance + look_over_name(stream, offset + distance)
}

/// A name is any run of name characters, without restrictions on the first one
pub fn look_over_name<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    let mut distance = 0;
    loop {
        let char_distance = look_over_name_char(stream, offset + distance);
        if char_distance == 0 {
            break;
        }
        distance += char_distance;
    }

    distance
}

pub fn look_over_name_start_char<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    match stream.look_ahead(offset) {
        Ch(c) if is_name_start_char(c) => 1,
        Ch('\\') => look_over_escape(stream, offset),
        _ => 0,
    }
}

pub fn look_over_name_char<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    match stream.look_ahead(offset) {
        Ch(c) if is_name_char(c) => 1,
        Ch('\\') => look_over_escape(stream, offset),
        _ => 0,
    }
}

/// Escape sequence at `offset`:
///  - `\` followed by up to 6 hex digits is a unicode escape
///  - `\` followed by anything else but a line terminator escapes that single character
///  - `\` followed by a line terminator, or at the end of the stream, is no escape at all
pub fn look_over_escape<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    if stream.look_ahead(offset) != Ch('\\') {
        return 0;
    }

    match stream.look_ahead(offset + 1) {
        Ch(c) if is_hex_digit(c) => 1 + look_over_unicode_code(stream, offset + 1),
        Ch(c) if !is_line_terminator(c) => 2,
        _ => 0,
    }
}

/// Run of at most 6 hex digits
pub fn look_over_unicode_code<S: Stream + ?Sized>(stream: &S, offset: usize) -> usize {
    let mut distance = 0;
    while distance < MAX_UNICODE_CODE_LEN && stream.look_ahead(offset + distance).is(is_hex_digit)
    {
        distance += 1;
    }

    distance
}

#[cfg(test)]
mod test {
    use super::*;
    use lessen_shared::char_stream::CharStream;
    use test_case::test_case;

    #[test_case("   x", 0, 3; "leading run")]
    #[test_case(" \t\r\n\u{000C}", 0, 5; "all kinds")]
    #[test_case("x  ", 0, 0; "no whitespace")]
    #[test_case("x  ", 1, 2; "with offset")]
    #[test_case("", 0, 0; "empty")]
    fn whitespace(input: &str, offset: usize, expected: usize) {
        let stream = CharStream::new(input);
        assert_eq!(look_over_whitespace(&stream, offset), expected);
    }

    #[test_case("import", 0, 6; "plain")]
    #[test_case("@media screen", 1, 5; "after marker")]
    #[test_case("_private-1 ", 0, 10; "underscore digits and hyphens")]
    #[test_case("1abc", 0, 0; "digit cannot start")]
    #[test_case("-abc", 0, 0; "hyphen cannot start")]
    #[test_case("\\41 bc", 0, 3; "unicode escape start")]
    #[test_case("\\.a", 0, 3; "literal escape start")]
    #[test_case("\\\nx", 0, 0; "escaped newline")]
    fn identifier(input: &str, offset: usize, expected: usize) {
        let stream = CharStream::new(input);
        assert_eq!(look_over_identifier(&stream, offset), expected);
    }

    #[test_case("fff;", 0, 3; "hex color")]
    #[test_case("123", 0, 3; "digits")]
    #[test_case("-webkit-box ", 0, 11; "vendor prefix")]
    #[test_case("a\\:b", 0, 4; "escaped colon")]
    #[test_case("ab\\", 0, 2; "dangling backslash")]
    #[test_case("x\\", 1, 0; "only a dangling backslash")]
    #[test_case("a\\123456 b", 0, 8; "six digit escape")]
    #[test_case("(", 0, 0; "no name")]
    fn name(input: &str, offset: usize, expected: usize) {
        let stream = CharStream::new(input);
        assert_eq!(look_over_name(&stream, offset), expected);
    }

    #[test_case("\\26 ", 0, 3; "hex escape")]
    #[test_case("\\aBcDeF0", 0, 7; "hex escape is capped")]
    #[test_case("\\z", 0, 2; "literal escape")]
    #[test_case("\\\r", 0, 0; "carriage return")]
    #[test_case("\\\u{000C}", 0, 0; "form feed")]
    #[test_case("\\", 0, 0; "end of stream")]
    #[test_case("a", 0, 0; "not an escape")]
    fn escape(input: &str, offset: usize, expected: usize) {
        let stream = CharStream::new(input);
        assert_eq!(look_over_escape(&stream, offset), expected);
    }

    #[test_case("u+0-7F", 2, 1; "single digit")]
    #[test_case("u+0025-00FF", 2, 4; "four digits")]
    #[test_case("1234567", 0, 6; "capped at six")]
    #[test_case("xyz", 0, 0; "no hex")]
    fn unicode_code(input: &str, offset: usize, expected: usize) {
        let stream = CharStream::new(input);
        assert_eq!(look_over_unicode_code(&stream, offset), expected);
    }

    #[test]
    fn lookahead_does_not_consume() {
        let stream = CharStream::new("identifier");
        assert_eq!(look_over_identifier(&stream, 0), 10);
        assert_eq!(stream.tell(), 0);
    }
}

use lessen_shared::char_stream::Location;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt;

pub type Number = Decimal;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Never produced by the tokenizer
    Invalid,
    Whitespace,
    /// A `// line` or `/* block */` comment
    Comment,
    /// One of `{ } ( ) [ ] : ; ,`
    Delimiter,
    /// Any other single character, or `~=` / `|=`
    Operator,
    /// `<!--`
    CDataOpen,
    /// `-->`
    CDataClose,
    Identifier,
    /// `@` followed by an identifier, the marker is part of the text
    AtIdentifier,
    /// `#` followed by a name, the marker is part of the text
    HashName,
    /// A name directly followed by `(`, the parenthesis is part of the text
    Function,
    /// `$name` or `${name}`
    Variable,
    String,
    /// `url(...)` or `uri(...)`
    Uri,
    Number,
    Percentage,
    /// A number followed by a unit, like `12px`
    Dimension,
    /// `u+0025-00FF`
    UnicodeRange,
    /// Never produced by the tokenizer. A later stage can reclassify a hash name or an
    /// identifier as a color.
    Color,
}

impl TokenKind {
    /// Name of the kind, only used for printing
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Invalid => "invalid",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Operator => "operator",
            TokenKind::CDataOpen => "cdata-open",
            TokenKind::CDataClose => "cdata-close",
            TokenKind::Identifier => "identifier",
            TokenKind::AtIdentifier => "@identifier",
            TokenKind::HashName => "#name",
            TokenKind::Function => "function",
            TokenKind::Variable => "variable",
            TokenKind::String => "string",
            TokenKind::Uri => "uri",
            TokenKind::Number => "number",
            TokenKind::Percentage => "percentage",
            TokenKind::Dimension => "dimension",
            TokenKind::UnicodeRange => "unicode-range",
            TokenKind::Color => "color",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded value carried by some of the tokens
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Payload {
    None,
    /// Value of a number or percentage
    Number(Number),
    /// Value and unit of a dimension
    Dimension { value: Number, unit: String },
    /// String without quotes, comment without markers or the name of a variable
    Text(String),
    /// Prefix (`url` or `uri`) and value of an uri
    Uri { prefix: String, value: String },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    /// Type of the token
    kind: TokenKind,
    /// Position of the first character
    start: usize,
    /// Position right after the last character
    end: usize,
    /// The exact source text between start and end
    text: String,
    /// Line and column of the first character
    location: Location,
    payload: Payload,
}

impl Token {
    /// Returns a new token for the given type on the given location
    pub(crate) fn new(
        kind: TokenKind,
        start: usize,
        end: usize,
        text: String,
        location: Location,
    ) -> Token {
        Token {
            kind,
            start,
            end,
            text,
            location,
            payload: Payload::None,
        }
    }

    pub(crate) fn new_numeric(
        kind: TokenKind,
        start: usize,
        end: usize,
        text: String,
        location: Location,
        value: Number,
    ) -> Token {
        Token::new(kind, start, end, text, location).with_payload(Payload::Number(value))
    }

    pub(crate) fn new_dimension(
        start: usize,
        end: usize,
        text: String,
        location: Location,
        value: Number,
        unit: String,
    ) -> Token {
        Token::new(TokenKind::Dimension, start, end, text, location)
            .with_payload(Payload::Dimension { value, unit })
    }

    pub(crate) fn new_string_value(
        kind: TokenKind,
        start: usize,
        end: usize,
        text: String,
        location: Location,
        value: String,
    ) -> Token {
        Token::new(kind, start, end, text, location).with_payload(Payload::Text(value))
    }

    pub(crate) fn new_uri(
        start: usize,
        end: usize,
        text: String,
        location: Location,
        prefix: String,
        value: String,
    ) -> Token {
        Token::new(TokenKind::Uri, start, end, text, location)
            .with_payload(Payload::Uri { prefix, value })
    }

    fn with_payload(mut self, payload: Payload) -> Token {
        self.payload = payload;
        self
    }

    /// Moves the token by the given number of positions. Used when the source text is part of a
    /// larger document.
    pub(crate) fn shifted(mut self, offset: usize) -> Token {
        self.start = self.start.saturating_add(offset);
        self.end = self.end.saturating_add(offset);
        self
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Number of characters covered by the token
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Decoded value of numbers, percentages and dimensions
    pub fn number(&self) -> Option<Number> {
        match &self.payload {
            Payload::Number(value) | Payload::Dimension { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Unit of a dimension
    pub fn unit(&self) -> Option<&str> {
        match &self.payload {
            Payload::Dimension { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// Value of strings, comments, variables and uris without their surrounding markers
    pub fn unquoted_value(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(value) | Payload::Uri { value, .. } => Some(value),
            _ => None,
        }
    }

    /// `url` or `uri`, as written in the source
    pub fn prefix(&self) -> Option<&str> {
        match &self.payload {
            Payload::Uri { prefix, .. } => Some(prefix),
            _ => None,
        }
    }

    /// Text of the token as it should be written back. Comments with a decoded value are always
    /// written as block comments, so line comments turn into `/* ... */`.
    pub fn clean_text(&self) -> Cow<'_, str> {
        match (&self.kind, &self.payload) {
            (TokenKind::Comment, Payload::Text(value)) => Cow::Owned(format!("/*{value}*/")),
            _ => Cow::Borrowed(&self.text),
        }
    }

    /// Returns the same token as a color when it is a hash name or identifier. Any other token
    /// is returned unchanged.
    pub fn into_color(mut self) -> Token {
        if matches!(self.kind, TokenKind::HashName | TokenKind::Identifier) {
            self.kind = TokenKind::Color;
        }
        self
    }
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    pub fn is_delimiter(&self, delim: char) -> bool {
        self.kind == TokenKind::Delimiter && self.is_single_char(delim)
    }

    pub fn is_operator(&self, operator: char) -> bool {
        self.kind == TokenKind::Operator && self.is_single_char(operator)
    }

    fn is_single_char(&self, c: char) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            _ if self.kind == TokenKind::Whitespace => write!(f, "{}", self.kind),
            Payload::Text(value) | Payload::Uri { value, .. } => write!(f, "{}: {}", self.kind, value),
            _ => write!(f, "{}: {}", self.kind, self.text),
        }
    }
}

//! Lexical tokenizer for GLSL source
//!
//! The tokenizer is purely lexical. Every non-whitespace character ends up in exactly
//! one token, so tokenizing never fails:
//!
//! - a run of word characters (letters, digits, underscore),
//! - a run of other characters excluding whitespace, `#` and `.` (an operator run),
//! - a single `.`,
//! - `#` up to the end of the line (a preprocessor line).

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Any identifier or keyword other than the three below
    Identifier,
    /// The `attribute` keyword
    Attribute,
    /// The `uniform` keyword
    Uniform,
    /// The `varying` keyword
    Varying,
    /// A run of punctuation such as `){` or `+=`
    Operator,
    /// A single `.`
    Dot,
    /// A word starting with a digit
    Numeric,
    /// A whole line starting with `#`
    Preprocessor,
}

impl TokenKind {
    /// Classifies the text of a token
    pub fn classify(text: &str) -> Self {
        match text {
            "attribute" => Self::Attribute,
            "uniform" => Self::Uniform,
            "varying" => Self::Varying,
            "." => Self::Dot,
            _ => match text.chars().next() {
                Some('#') => Self::Preprocessor,
                Some(c) if c.is_ascii_digit() => Self::Numeric,
                Some(c) if is_word_char(c) => Self::Identifier,
                _ => Self::Operator,
            },
        }
    }

    /// Whether tokens of this kind consist of word characters
    ///
    /// Two adjacent word tokens must be separated by whitespace in the output.
    pub fn is_word(self) -> bool {
        matches!(self, Self::Identifier | Self::Attribute | Self::Uniform | Self::Varying | Self::Numeric)
    }
}

/// A token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    !c.is_whitespace() && !is_word_char(c) && c != '#' && c != '.'
}

/// Iterator over the tokens of a source string
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, position: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = &self.source[self.position..];
        let start = remaining.find(|c: char| !c.is_whitespace())?;
        let rest = &remaining[start..];
        let first = rest.chars().next()?;

        let length = if is_word_char(first) {
            rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len())
        } else if first == '#' {
            rest.find('\n').unwrap_or(rest.len())
        } else if first == '.' {
            1
        } else {
            rest.find(|c: char| !is_operator_char(c)).unwrap_or(rest.len())
        };

        let text = &rest[..length];
        self.position += start + length;
        Some(Token {
            text,
            kind: TokenKind::classify(text),
        })
    }
}

/// Tokenizes `source`
pub fn tokenize(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

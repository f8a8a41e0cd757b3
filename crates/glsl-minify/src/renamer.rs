//! Token-level identifier renaming
//!
//! The final pass walks the token stream and writes the minified program. Whether an
//! identifier is renamed depends on the two tokens before it:
//!
//! - after a `.` it is a member or swizzle access and is copied verbatim,
//! - two tokens after `attribute` or `varying` it is an interface name and is reserved,
//! - two tokens after `uniform` it is a uniform name and its type is recorded.
//!
//! Whitespace is dropped except for a single space between adjacent word tokens.

use crate::options::MinifyOptions;
use crate::reserved::BUILTIN_PREFIX;
use crate::symbols::SymbolTable;
use crate::tokenizer::{Token, TokenKind, tokenize};
use regex::Regex;
use std::sync::LazyLock;

static DEFINE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#define\s([A-Za-z0-9_]+)\s(.*)$").unwrap());

/// Role of an identifier as implied by the preceding tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position<'a> {
    /// Follows a `.`
    Member,
    /// Declared by `attribute <type> NAME` or `varying <type> NAME`
    Interface,
    /// Declared by `uniform <type> NAME`
    Uniform { declared_type: &'a str },
    Other,
}

/// Two-token history of the renamer
#[derive(Debug, Clone, Copy, Default)]
struct Lookback<'a> {
    previous: Option<Token<'a>>,
    before_previous: Option<TokenKind>,
}

impl<'a> Lookback<'a> {
    /// Role of the identifier following the recorded tokens
    fn position(&self) -> Position<'a> {
        match (self.previous, self.before_previous) {
            (Some(Token { kind: TokenKind::Dot, .. }), _) => Position::Member,
            (_, Some(TokenKind::Attribute | TokenKind::Varying)) => Position::Interface,
            (Some(previous), Some(TokenKind::Uniform)) => Position::Uniform { declared_type: previous.text },
            _ => Position::Other,
        }
    }

    /// Whether a word token emitted now needs a separating space
    fn needs_separator(&self) -> bool {
        self.previous.is_some_and(|token| token.kind.is_word())
    }

    fn advance(&mut self, token: Token<'a>) {
        self.before_previous = self.previous.map(|previous| previous.kind);
        self.previous = Some(token);
    }
}

/// Writes minified code while renaming identifiers through a [`SymbolTable`]
pub struct Renamer<'t> {
    table: &'t mut SymbolTable,
    options: &'t MinifyOptions,
}

impl<'t> Renamer<'t> {
    pub fn new(table: &'t mut SymbolTable, options: &'t MinifyOptions) -> Self {
        Self { table, options }
    }

    /// Minifies `source`, recording every renamed identifier in the symbol table
    pub fn run(&mut self, source: &str) -> String {
        self.reserve_kept_names(source);

        let mut output = String::with_capacity(source.len());
        let mut lookback = Lookback::default();

        for token in tokenize(source) {
            match token.kind {
                TokenKind::Preprocessor => self.emit_preprocessor(token.text, &mut output),
                TokenKind::Operator | TokenKind::Dot => output.push_str(token.text),
                TokenKind::Numeric => {
                    if lookback.needs_separator() {
                        output.push(' ');
                    }
                    output.push_str(token.text);
                }
                TokenKind::Identifier | TokenKind::Attribute | TokenKind::Uniform | TokenKind::Varying => match lookback.position() {
                    Position::Member => output.push_str(token.text),
                    position => {
                        let name = self.resolve(token.text, position);
                        if lookback.needs_separator() {
                            output.push(' ');
                        }
                        output.push_str(&name);
                    }
                },
            }
            lookback.advance(token);
        }

        output
    }

    /// Reserves attribute/varying names and preserved `#define` names before any allocation
    ///
    /// A kept name may be declared after identifiers that get renamed, so allocation must
    /// already know about it to avoid handing out the same name twice.
    fn reserve_kept_names(&mut self, source: &str) {
        let mut lookback = Lookback::default();
        for token in tokenize(source) {
            match token.kind {
                TokenKind::Preprocessor if self.options.preserve_defines => {
                    if let Some(captures) = DEFINE_LINE.captures(token.text) {
                        let name = &captures[1];
                        if !name.starts_with(BUILTIN_PREFIX) {
                            self.table.reserve([name]);
                        }
                    }
                }
                TokenKind::Identifier | TokenKind::Attribute | TokenKind::Uniform | TokenKind::Varying => {
                    if lookback.position() == Position::Interface && !token.text.starts_with(BUILTIN_PREFIX) {
                        tracing::trace!(name = token.text, "reserving interface name");
                        self.table.reserve([token.text]);
                    }
                }
                _ => {}
            }
            lookback.advance(token);
        }
    }

    /// Output name of an identifier that is not a member access
    fn resolve(&mut self, name: &str, position: Position<'_>) -> String {
        if name.starts_with(BUILTIN_PREFIX) {
            return name.to_string();
        }

        let declared_type = match position {
            Position::Uniform { declared_type } => Some(declared_type),
            _ => None,
        };

        if self.options.disable_mangle || (declared_type.is_some() && self.options.preserve_uniforms) {
            self.table.preserve(name, declared_type)
        } else {
            self.table.rename(name, declared_type)
        }
    }

    fn emit_preprocessor(&mut self, line: &str, output: &mut String) {
        if self.options.strip_version && line.starts_with("#version") {
            return;
        }

        // Directives must start a line of their own
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }

        match DEFINE_LINE.captures(line) {
            Some(captures) => {
                let name = &captures[1];
                let renamed = if name.starts_with(BUILTIN_PREFIX) {
                    name.to_string()
                } else if self.options.preserve_defines {
                    self.table.reserve([name]);
                    name.to_string()
                } else if self.options.disable_mangle {
                    self.table.preserve(name, None)
                } else {
                    self.table.rename(name, None)
                };
                output.push_str(&format!("#define {renamed} {}\n", &captures[2]));
            }
            None => {
                output.push_str(line);
                output.push('\n');
            }
        }
    }
}

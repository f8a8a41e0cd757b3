//! `@nomangle` and `@define` directive processing
//!
//! The second pass consumes minifier directives from the flattened source:
//!
//! - `@nomangle a b c` reserves the listed identifiers so the renamer keeps them.
//! - `@define NAME value` substitutes `value` for every whole-word `NAME` in the buffer.
//!
//! Directive lines are removed from the output. Lines that look like directives but do
//! not match the expected shape are left alone and reported as warnings.

use crate::symbols::SymbolTable;
use crate::tokenizer::is_word_char;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

static NOMANGLE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@nomangle[ \t]+([^\n]*)\n?").unwrap());
static DEFINE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@define[ \t]+([A-Za-z0-9_]+)[ \t]+([^\n]*)\n?").unwrap());
static STRAY_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(?:include|nomangle|define)\b[^\n]*").unwrap());

/// Applies every `@nomangle` and `@define` directive in `source`
///
/// Reserved names are added to `table`. The returned string no longer contains the
/// directive lines.
pub fn process_directives(source: &str, table: &mut SymbolTable) -> String {
    let without_nomangle = apply_nomangle(source, table);
    let output = apply_defines(without_nomangle);

    for stray in STRAY_DIRECTIVE.find_iter(&output) {
        tracing::warn!(directive = stray.as_str(), "ignoring malformed directive");
    }

    output
}

/// Reserves the names of all `@nomangle` lines and removes those lines
fn apply_nomangle(source: &str, table: &mut SymbolTable) -> String {
    NOMANGLE_DIRECTIVE
        .replace_all(source, |captures: &Captures| {
            let names: Vec<&str> = captures[1].split_whitespace().collect();
            if names.is_empty() {
                tracing::warn!("@nomangle directive without identifiers");
            }
            tracing::trace!(?names, "reserving identifiers");
            table.reserve(names);
            ""
        })
        .into_owned()
}

/// Applies `@define` directives one at a time, top to bottom
///
/// Each substitution runs over the whole buffer, so later directives see the text
/// produced by earlier ones. Occurrences above the directive line are substituted too.
fn apply_defines(source: String) -> String {
    let mut buffer = source;
    while let Some((range, name, value)) = find_define(&buffer) {
        tracing::trace!(%name, %value, "expanding macro");
        buffer.replace_range(range, "");
        buffer = substitute_whole_word(&buffer, &name, &value);
    }
    buffer
}

/// Locates the first `@define` line and returns its byte range, name and value
fn find_define(buffer: &str) -> Option<(Range<usize>, String, String)> {
    let captures = DEFINE_DIRECTIVE.captures(buffer)?;
    let directive = captures.get(0)?;
    Some((directive.range(), captures[1].to_string(), captures[2].to_string()))
}

/// Replaces every `name` not followed by a word character with `value`
///
/// Inserted text is never rescanned. The character before a match is not checked.
pub fn substitute_whole_word(buffer: &str, name: &str, value: &str) -> String {
    if name.is_empty() {
        return buffer.to_string();
    }

    let mut output = String::with_capacity(buffer.len());
    let mut rest = buffer;
    while let Some(index) = rest.find(name) {
        output.push_str(&rest[..index]);
        let after = &rest[index + name.len()..];
        if after.starts_with(is_word_char) {
            // Retry from the next character of the rejected match
            let step = rest[index..].chars().next().map_or(1, char::len_utf8);
            output.push_str(&rest[index..index + step]);
            rest = &rest[index + step..];
        } else {
            output.push_str(value);
            rest = after;
        }
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_expansion() {
        let mut table = SymbolTable::new();
        let output = process_directives("@define PI 3.14159\nfloat getPi(){ return PI; }", &mut table);
        assert_eq!(output, "float getPi(){ return 3.14159; }");
    }

    /// Uses above the directive line are substituted as well
    #[test]
    fn test_define_applies_to_whole_buffer() {
        let mut table = SymbolTable::new();
        let output = process_directives("x = PI;\n@define PI 3.0\ny = PI;", &mut table);
        assert_eq!(output, "x = 3.0;\ny = 3.0;");
    }

    #[test]
    fn test_define_matches_whole_words_only_at_the_end() {
        let mut table = SymbolTable::new();
        let output = process_directives("@define N 4\nint NN = N; int N2; aN;", &mut table);
        assert_eq!(output, "int N4 = 4; int N2; a4;");
    }

    #[test]
    fn test_define_value_is_not_rescanned() {
        let mut table = SymbolTable::new();
        let output = process_directives("@define X X+1\nfloat y = X;", &mut table);
        assert_eq!(output, "float y = X+1;");
    }

    #[test]
    fn test_defines_apply_in_order() {
        let mut table = SymbolTable::new();
        let output = process_directives("@define A 1\n@define B A\nfloat v = B;", &mut table);
        assert_eq!(output, "float v = 1;");
    }

    #[test]
    fn test_nomangle_reserves_names() {
        let mut table = SymbolTable::new();
        let output = process_directives("@nomangle uTime  uResolution\nuniform float uTime;\n@nomangle other\n", &mut table);
        assert_eq!(output, "uniform float uTime;\n");
        for name in ["uTime", "uResolution", "other"] {
            assert_eq!(table.rename(name, None), name);
        }
        assert_eq!(table.allocated(), 0);
    }

    #[test]
    fn test_malformed_directives_are_left_in_place() {
        let mut table = SymbolTable::new();
        let source = "@define LONELY\n@nomangle\nfloat x;";
        assert_eq!(process_directives(source, &mut table), source);
    }

    #[test]
    fn test_substitute_whole_word() {
        assert_eq!(substitute_whole_word("ABA ABABA", "ABA", "x"), "x ABx");
        assert_eq!(substitute_whole_word("a_b a_bc a_b;", "a_b", "1"), "1 a_bc 1;");
        assert_eq!(substitute_whole_word("nothing here", "X", "1"), "nothing here");
        assert_eq!(substitute_whole_word("é X", "X", "1"), "é 1");
    }
}

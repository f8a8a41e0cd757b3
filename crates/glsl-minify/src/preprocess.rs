//! Comment removal and include expansion
//!
//! This is the first pass of the minifier. It normalizes line endings, drops comments
//! and splices every `@include "file"` directive with the recursively processed
//! contents of the referenced file, producing one flattened source string.

use crate::error::{INLINE_SOURCE, MinifyError};
use crate::source::{IncludeResolver, SourceUnit};
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Deepest include chain accepted before the expansion is assumed to loop
const MAX_INCLUDE_DEPTH: usize = 64;

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*\n?").unwrap());
static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"@include[ \t]+("(?:[^"\\\n]|\\.)*")"#).unwrap());

/// Normalizes line endings and removes block and line comments
///
/// A line comment is replaced by a single newline so a directive on the following
/// line still starts a line of its own.
pub fn strip_comments(source: &str) -> String {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let without_blocks = BLOCK_COMMENT.replace_all(&normalized, "");
    LINE_COMMENT.replace_all(&without_blocks, "\n").into_owned()
}

/// Expands include directives depth-first through an [`IncludeResolver`]
pub struct IncludeExpander<'r, R: IncludeResolver + ?Sized> {
    resolver: &'r mut R,
    default_dir: Option<&'r Path>,
    /// Files currently being expanded, outermost first
    stack: Vec<PathBuf>,
}

impl<'r, R: IncludeResolver + ?Sized> IncludeExpander<'r, R> {
    /// Creates an expander
    ///
    /// # Arguments
    /// * `resolver` - Collaborator that reads included files
    /// * `default_dir` - Base directory for includes made from buffers without a path
    pub fn new(resolver: &'r mut R, default_dir: Option<&'r Path>) -> Self {
        Self {
            resolver,
            default_dir,
            stack: Vec::new(),
        }
    }

    /// Returns the comment-free contents of `unit` with all includes spliced in
    ///
    /// # Errors
    /// Fails when an included file cannot be resolved or read, when an include filename
    /// is not a valid string literal, or when a file includes itself directly or indirectly.
    pub fn expand(&mut self, unit: &SourceUnit) -> Result<String, MinifyError> {
        self.expand_tracked(unit, unit.path.clone())
    }

    fn expand_tracked(&mut self, unit: &SourceUnit, key: Option<PathBuf>) -> Result<String, MinifyError> {
        let tracked = key.is_some();
        if let Some(key) = key {
            self.stack.push(key);
        }
        let result = self.expand_contents(unit);
        if tracked {
            self.stack.pop();
        }
        result
    }

    fn expand_contents(&mut self, unit: &SourceUnit) -> Result<String, MinifyError> {
        let mut buffer = strip_comments(&unit.contents);
        let requested_by = unit.path.as_ref().map_or_else(|| INLINE_SOURCE.to_string(), |path| path.display().to_string());
        let base_dir = unit.directory().or(self.default_dir);

        // Restart from the top after every splice; earlier splices shift later directives
        while let Some((range, literal)) = find_include(&buffer) {
            let filename: String = serde_json::from_str(&literal).map_err(|source| MinifyError::MalformedInclude {
                literal: literal.clone(),
                requested_by: requested_by.clone(),
                source,
            })?;

            tracing::debug!(%filename, %requested_by, "resolving include");
            let included = self
                .resolver
                .resolve_and_read(&filename, base_dir)
                .map_err(|source| MinifyError::Inclusion {
                    filename: filename.clone(),
                    requested_by: requested_by.clone(),
                    source,
                })?;

            let key = included.path.clone().unwrap_or_else(|| PathBuf::from(&filename));
            if self.stack.contains(&key) || self.stack.len() >= MAX_INCLUDE_DEPTH {
                return Err(MinifyError::IncludeCycle { filename, requested_by });
            }

            let expanded = self.expand_tracked(&included, Some(key))?;
            buffer.replace_range(range, &expanded);
        }

        Ok(buffer)
    }
}

/// Locates the first include directive and returns its byte range and quoted filename
fn find_include(buffer: &str) -> Option<(Range<usize>, String)> {
    let captures = INCLUDE_DIRECTIVE.captures(buffer)?;
    let directive = captures.get(0)?;
    Some((directive.range(), captures[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    /// Builds an in-memory resolver that joins filenames onto the base directory
    fn memory_resolver(files: &[(&str, &str)]) -> impl FnMut(&str, Option<&Path>) -> io::Result<SourceUnit> + use<> {
        let files: HashMap<PathBuf, String> = files.iter().map(|(path, contents)| (PathBuf::from(path), contents.to_string())).collect();
        move |filename: &str, base_dir: Option<&Path>| {
            let path = base_dir.map_or_else(|| PathBuf::from(filename), |dir| dir.join(filename));
            files
                .get(&path)
                .map(|contents| SourceUnit::with_path(path.clone(), contents.clone()))
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("File not found: {}", path.display())))
        }
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("a /* b */c"), "a c");
        assert_eq!(strip_comments("a/* multi\nline */b"), "ab");
        assert_eq!(strip_comments("float x; // trailing\nfloat y;"), "float x; \nfloat y;");
        assert_eq!(strip_comments("x;// no newline"), "x;\n");
        assert_eq!(strip_comments("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(strip_comments("/* one */ x /* two */"), " x ");
    }

    #[test]
    fn test_commented_include_is_ignored() {
        let mut resolver = memory_resolver(&[]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let output = expander.expand(&SourceUnit::inline("// @include \"missing.glsl\"\nfloat x;")).unwrap();
        assert_eq!(output, "\nfloat x;");
    }

    #[test]
    fn test_nested_includes() {
        let mut resolver = memory_resolver(&[
            ("shaders/a.glsl", "A;\n@include \"b.glsl\"\nA2;"),
            ("shaders/b.glsl", "B; // comment in b\n@include \"lib/c.glsl\""),
            ("shaders/lib/c.glsl", "/* c */C;"),
        ]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let output = expander.expand(&SourceUnit::with_path("shaders/main.glsl", "@include \"a.glsl\"\nmain;")).unwrap();
        assert_eq!(output, "A;\nB; \nC;\nA2;\nmain;");
    }

    /// Sibling includes are spliced in textual order
    #[test]
    fn test_sibling_includes_in_order() {
        let mut order = Vec::new();
        let mut resolver = |filename: &str, _: Option<&Path>| -> io::Result<SourceUnit> {
            order.push(filename.to_string());
            Ok(SourceUnit::inline(format!("<{filename}>")))
        };
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let output = expander.expand(&SourceUnit::inline("@include \"1\" @include \"2\"\n@include \"3\"")).unwrap();
        assert_eq!(output, "<1> <2>\n<3>");
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_inline_unit_uses_default_dir() {
        let mut resolver = memory_resolver(&[("common/util.glsl", "util;")]);
        let mut expander = IncludeExpander::new(&mut resolver, Some(Path::new("common")));
        let output = expander.expand(&SourceUnit::inline("@include \"util.glsl\"")).unwrap();
        assert_eq!(output, "util;");
    }

    #[test]
    fn test_missing_nested_include_fails() {
        let mut resolver = memory_resolver(&[("a.glsl", "@include \"b.glsl\""), ("b.glsl", "@include \"c.glsl\"")]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let error = expander.expand(&SourceUnit::inline("@include \"a.glsl\"")).unwrap_err();
        assert!(matches!(error, MinifyError::Inclusion { .. }));
        assert_eq!(error.filename(), "c.glsl");
        assert_eq!(error.requested_by(), "b.glsl");
    }

    #[test]
    fn test_missing_include_from_inline_source() {
        let mut resolver = memory_resolver(&[]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let error = expander.expand(&SourceUnit::inline("@include \"nope.glsl\"")).unwrap_err();
        assert_eq!(error.filename(), "nope.glsl");
        assert_eq!(error.requested_by(), "inline");
    }

    #[test]
    fn test_include_filename_escapes() {
        let mut resolver = memory_resolver(&[("dir/a \"quoted\".glsl", "ok;")]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let output = expander.expand(&SourceUnit::inline(r#"@include "dir/a \"quoted\".glsl""#)).unwrap();
        assert_eq!(output, "ok;");
    }

    #[test]
    fn test_malformed_include_literal() {
        let mut resolver = memory_resolver(&[]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let error = expander.expand(&SourceUnit::inline(r#"@include "bad\q.glsl""#)).unwrap_err();
        assert!(matches!(error, MinifyError::MalformedInclude { .. }));
        assert_eq!(error.filename(), r#""bad\q.glsl""#);
    }

    #[test]
    fn test_include_cycle_is_detected() {
        let mut resolver = memory_resolver(&[("a.glsl", "@include \"b.glsl\""), ("b.glsl", "@include \"a.glsl\"")]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let error = expander.expand(&SourceUnit::with_path("a.glsl", "@include \"b.glsl\"")).unwrap_err();
        assert!(matches!(error, MinifyError::IncludeCycle { .. }));
        assert_eq!(error.filename(), "a.glsl");
        assert_eq!(error.requested_by(), "b.glsl");
    }

    /// A chain of distinct files fails once it grows past the depth limit
    #[test]
    fn test_include_chain_depth_limit() {
        let mut resolver = |filename: &str, _: Option<&Path>| -> io::Result<SourceUnit> {
            let depth: usize = filename.trim_start_matches("depth").trim_end_matches(".glsl").parse().unwrap();
            Ok(SourceUnit::with_path(filename, format!("@include \"depth{}.glsl\"", depth + 1)))
        };
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let error = expander.expand(&SourceUnit::inline("@include \"depth0.glsl\"")).unwrap_err();
        assert!(matches!(error, MinifyError::IncludeCycle { .. }));
        assert_eq!(error.filename(), format!("depth{MAX_INCLUDE_DEPTH}.glsl"));
        assert_eq!(error.requested_by(), format!("depth{}.glsl", MAX_INCLUDE_DEPTH - 1));
    }

    /// Including the same file twice side by side is not a cycle
    #[test]
    fn test_repeated_include_is_not_a_cycle() {
        let mut resolver = memory_resolver(&[("x.glsl", "x;")]);
        let mut expander = IncludeExpander::new(&mut resolver, None);
        let output = expander.expand(&SourceUnit::inline("@include \"x.glsl\"\n@include \"x.glsl\"")).unwrap();
        assert_eq!(output, "x;\nx;");
    }
}

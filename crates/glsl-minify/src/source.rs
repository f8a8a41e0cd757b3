//! Source buffers and include resolution
//!
//! The minifier never touches the filesystem itself. Include directives are resolved
//! through an [`IncludeResolver`], which turns a requested filename into a [`SourceUnit`].

use std::io;
use std::path::{Path, PathBuf};

/// One physical or logical source buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// File the contents came from; anchors relative includes made from this buffer
    pub path: Option<PathBuf>,
    /// Source text
    pub contents: String,
}

impl SourceUnit {
    /// Creates a buffer that is not backed by a file
    pub fn inline(contents: impl Into<String>) -> Self {
        Self { path: None, contents: contents.into() }
    }

    /// Creates a buffer read from `path`
    pub fn with_path(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            contents: contents.into(),
        }
    }

    /// Reads a file into a path-anchored buffer
    pub fn from_file(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        Ok(Self::with_path(path, contents))
    }

    /// Directory used to resolve includes made from this buffer
    pub fn directory(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// Resolves include directives to source buffers
pub trait IncludeResolver {
    /// Finds and reads `filename`, relative to `base_dir` when one is given
    fn resolve_and_read(&mut self, filename: &str, base_dir: Option<&Path>) -> io::Result<SourceUnit>;
}

impl<F> IncludeResolver for F
where
    F: FnMut(&str, Option<&Path>) -> io::Result<SourceUnit>,
{
    fn resolve_and_read(&mut self, filename: &str, base_dir: Option<&Path>) -> io::Result<SourceUnit> {
        self(filename, base_dir)
    }
}

/// Resolves includes from the filesystem and records every file it read
#[derive(Debug, Clone, Default)]
pub struct FileSystemResolver {
    dependencies: Vec<PathBuf>,
}

impl FileSystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files read so far, in the order they were included
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }
}

impl IncludeResolver for FileSystemResolver {
    fn resolve_and_read(&mut self, filename: &str, base_dir: Option<&Path>) -> io::Result<SourceUnit> {
        let path = match base_dir {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        };
        let unit = SourceUnit::from_file(&path).inspect_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "failed to read include");
        })?;
        tracing::debug!(path = %path.display(), "read include");
        self.dependencies.push(path);
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("glsl-minify-source-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_directory_of_unit() {
        let unit = SourceUnit::with_path("shaders/lighting/main.frag", "");
        assert_eq!(unit.directory(), Some(Path::new("shaders/lighting")));
        assert_eq!(SourceUnit::inline("").directory(), None);
    }

    #[test]
    fn test_filesystem_resolver_tracks_dependencies() {
        let dir = scratch_dir("deps");
        std::fs::write(dir.join("common.glsl"), "float common;").unwrap();

        let mut resolver = FileSystemResolver::new();
        let unit = resolver.resolve_and_read("common.glsl", Some(&dir)).unwrap();
        assert_eq!(unit.contents, "float common;");
        assert_eq!(unit.path, Some(dir.join("common.glsl")));
        assert_eq!(resolver.dependencies(), &[dir.join("common.glsl")]);

        let missing = resolver.resolve_and_read("missing.glsl", Some(&dir)).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);
        assert_eq!(resolver.dependencies().len(), 1);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_closure_resolver() {
        let mut resolver = |filename: &str, base_dir: Option<&Path>| -> io::Result<SourceUnit> {
            let path = base_dir.unwrap_or(Path::new("")).join(filename);
            Ok(SourceUnit::with_path(path, format!("// {filename}")))
        };
        let unit = resolver.resolve_and_read("a.glsl", Some(Path::new("lib"))).unwrap();
        assert_eq!(unit.path, Some(PathBuf::from("lib/a.glsl")));
        assert_eq!(unit.contents, "// a.glsl");
    }
}

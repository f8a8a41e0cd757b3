//! GLSL minification
//!
//! This crate shrinks GLSL shader source for size-constrained delivery. A run goes
//! through three passes:
//!
//! 1. comments are removed and `@include "file"` directives are expanded recursively,
//! 2. `@nomangle` and `@define` directives are applied,
//! 3. the source is tokenized and identifiers are renamed to the shortest free names.
//!
//! Reserved GLSL names, `gl_` built-ins, swizzles and attribute/varying names are never
//! renamed. Uniforms are reported with their type and minified name so runtime code can
//! bind data after minification.

pub mod directives;
pub mod error;
pub mod options;
pub mod preprocess;
pub mod program;
pub mod renamer;
pub mod reserved;
pub mod source;
pub mod symbols;
pub mod tokenizer;

pub use error::MinifyError;
pub use options::MinifyOptions;
pub use program::{GlslProgram, UniformBinding};
pub use source::{FileSystemResolver, IncludeResolver, SourceUnit};
pub use symbols::SymbolTable;

use preprocess::IncludeExpander;
use renamer::Renamer;

/// Minification pipeline bound to an include resolver
///
/// Every call to [`GlslMinifier::execute`] uses a fresh symbol table, so the names
/// assigned in one run never leak into another.
pub struct GlslMinifier<R: IncludeResolver> {
    resolver: R,
    options: MinifyOptions,
}

impl<R: IncludeResolver> GlslMinifier<R> {
    /// Creates a minifier
    ///
    /// # Arguments
    /// * `resolver` - Collaborator used to read included files
    /// * `options` - Settings applied to every run
    pub fn new(resolver: R, options: MinifyOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &MinifyOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn into_resolver(self) -> R {
        self.resolver
    }

    /// Minifies a source buffer
    ///
    /// # Errors
    /// Returns a [`MinifyError`] when an include cannot be expanded. No partial output
    /// is produced in that case.
    pub fn execute(&mut self, unit: &SourceUnit) -> Result<GlslProgram, MinifyError> {
        let flattened = IncludeExpander::new(&mut self.resolver, self.options.include_dir.as_deref()).expand(unit)?;
        tracing::debug!(bytes = flattened.len(), "expanded includes");

        let mut table = SymbolTable::new();
        table.reserve(&self.options.nomangle);

        let processed = directives::process_directives(&flattened, &mut table);
        tracing::debug!(bytes = processed.len(), "applied directives");

        let code = Renamer::new(&mut table, &self.options).run(&processed);
        tracing::debug!(bytes = code.len(), renamed = table.allocated(), "renamed identifiers");

        Ok(GlslProgram {
            code,
            uniforms: table.uniforms(),
        })
    }
}

/// Minifies an inline source string
///
/// Includes are read from the filesystem, relative to `options.include_dir` when set.
pub fn minify_str(source: &str, options: &MinifyOptions) -> Result<GlslProgram, MinifyError> {
    GlslMinifier::new(FileSystemResolver::new(), options.clone()).execute(&SourceUnit::inline(source))
}

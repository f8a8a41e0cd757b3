//! Minification options
//!
//! Options can be built in code or loaded from a YAML file; every field is optional
//! and defaults to the plain minifying behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one minification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MinifyOptions {
    /// Base directory for includes requested from a buffer without a path
    pub include_dir: Option<PathBuf>,
    /// Identifiers that are never renamed, in addition to the reserved GLSL names
    pub nomangle: Vec<String>,
    /// Keep the names defined by `#define NAME value` lines
    pub preserve_defines: bool,
    /// Keep uniform names; they are still reported in the program's uniform map
    pub preserve_uniforms: bool,
    /// Skip identifier renaming entirely
    pub disable_mangle: bool,
    /// Drop `#version` lines from the output
    pub strip_version: bool,
}

impl MinifyOptions {
    /// Parses options from YAML content
    ///
    /// # Arguments
    /// * `yaml_content` - YAML mapping with any subset of the option fields
    pub fn from_yaml(yaml_content: &str) -> Result<Self, serde_norway::Error> {
        serde_norway::from_str(yaml_content)
    }

    /// Parses options from a YAML file
    ///
    /// # Arguments
    /// * `path` - Path to the YAML options file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}

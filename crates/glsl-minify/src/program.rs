//! Minified program output
//!
//! A [`GlslProgram`] is produced once per pipeline run. Besides the minified code it
//! reports every uniform by its original name so runtime code can bind data to the
//! post-minification identifier. This module also renders a program as JSON or as a
//! Rust module for embedding into a binary.

use serde::Serialize;
use std::collections::BTreeMap;

/// Declared type and output name of a uniform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniformBinding {
    /// GLSL type from the declaration (e.g. `vec3`)
    #[serde(rename = "type")]
    pub variable_type: String,
    /// Identifier the uniform is declared as in the minified code
    #[serde(rename = "minifiedName")]
    pub minified_name: String,
}

/// Result of a minification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlslProgram {
    /// Minified GLSL source
    pub code: String,
    /// Uniforms keyed by their original name
    pub uniforms: BTreeMap<String, UniformBinding>,
}

impl GlslProgram {
    /// Serializes the program as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generates Rust source embedding the program
    ///
    /// The code becomes `pub const <const_name>: &str`, followed by one constant per
    /// uniform holding its minified name.
    ///
    /// # Arguments
    /// * `const_name` - Name of the constant holding the shader code
    pub fn to_rust_module(&self, const_name: &str) -> String {
        let mut output = String::new();
        output.push_str("// Generated by glsl-minify. Do not edit.\n\n");
        output.push_str(&format!("pub const {const_name}: &str = {};\n", dump_string_literal(&self.code)));

        for (name, binding) in &self.uniforms {
            output.push('\n');
            output.push_str(&format!("/// `uniform {} {name}`\n", binding.variable_type));
            output.push_str(&format!(
                "pub const {}: &str = {};\n",
                screaming_snake_case(name),
                dump_string_literal(&binding.minified_name)
            ));
        }

        output
    }
}

/// Converts text into a Rust string literal
fn dump_string_literal(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Converts a GLSL identifier such as `uColorMap` into `U_COLOR_MAP`
fn screaming_snake_case(name: &str) -> String {
    let mut output = String::with_capacity(name.len() + 4);
    let mut previous_lowercase = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && previous_lowercase {
            output.push('_');
        }
        previous_lowercase = c.is_ascii_lowercase() || c.is_ascii_digit();
        output.push(c.to_ascii_uppercase());
    }
    if output.starts_with(|c: char| c.is_ascii_digit()) {
        output.insert(0, '_');
    }
    output
}

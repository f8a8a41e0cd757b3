//! GLSL minifier CLI
//!
//! Minifies a shader file and writes the result as JSON (code plus uniform map),
//! plain GLSL, or a Rust module ready to be `include!`d.
//!
//! # Usage
//! ```bash
//! glsl_minify shaders/main.frag -o main.min.json --format json --preserve-uniforms
//! ```

use clap::Parser;
use glsl_minify::{FileSystemResolver, GlslMinifier, MinifyOptions, SourceUnit};
use std::path::PathBuf;

/// Command-line arguments for the GLSL minifier
#[derive(Parser)]
#[command(version, about = "Minifies GLSL shaders and reports renamed uniforms")]
struct Args {
    /// Shader file to minify
    input: PathBuf,

    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format (json, glsl, rust)
    #[arg(long, short, default_value = "json")]
    format: String,

    /// Name of the shader constant in rust output
    #[arg(long, default_value = "SHADER")]
    const_name: String,

    /// YAML file with minification options
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Base directory for includes of inline sources
    #[arg(long, short = 'I')]
    include_dir: Option<PathBuf>,

    /// Identifier that must keep its name (repeatable)
    #[arg(long)]
    nomangle: Vec<String>,

    /// Keep names defined with #define
    #[arg(long)]
    preserve_defines: bool,

    /// Keep uniform names
    #[arg(long)]
    preserve_uniforms: bool,

    /// Only strip comments and whitespace, never rename
    #[arg(long)]
    disable_mangle: bool,

    /// Drop #version lines
    #[arg(long)]
    strip_version: bool,

    /// Write a make-style dependency file listing every included shader
    #[arg(long)]
    depfile: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Merges the config file (if any) with the command-line flags
    fn options(&self) -> Result<MinifyOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => MinifyOptions::from_file(path)?,
            None => MinifyOptions::default(),
        };

        if self.include_dir.is_some() {
            options.include_dir = self.include_dir.clone();
        }
        options.nomangle.extend(self.nomangle.iter().cloned());
        options.preserve_defines |= self.preserve_defines;
        options.preserve_uniforms |= self.preserve_uniforms;
        options.disable_mangle |= self.disable_mangle;
        options.strip_version |= self.strip_version;

        Ok(options)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = args.options()?;
    let unit = SourceUnit::from_file(&args.input).inspect_err(|e| {
        tracing::error!(path = %args.input.display(), error = %e, "failed to read shader");
    })?;

    let mut minifier = GlslMinifier::new(FileSystemResolver::new(), options);
    let program = minifier.execute(&unit)?;
    tracing::info!(
        input = %args.input.display(),
        bytes_in = unit.contents.len(),
        bytes_out = program.code.len(),
        uniforms = program.uniforms.len(),
        "minified shader"
    );

    let rendered = match args.format.to_lowercase().as_str() {
        "json" => program.to_json()?,
        "glsl" => program.code.clone(),
        "rust" => program.to_rust_module(&args.const_name),
        other => return Err(format!("Unknown output format: {other} (expected json, glsl or rust)").into()),
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    if let Some(depfile) = &args.depfile {
        let target = args.output.as_ref().unwrap_or(&args.input);
        let mut line = format!("{}: {}", target.display(), args.input.display());
        for dependency in minifier.resolver().dependencies() {
            line.push_str(&format!(" {}", dependency.display()));
        }
        line.push('\n');
        std::fs::write(depfile, line)?;
    }

    Ok(())
}

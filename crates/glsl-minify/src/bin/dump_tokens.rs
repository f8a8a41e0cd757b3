//! Token dump tool
//!
//! Runs include expansion and directive processing on a shader, then prints the token
//! stream the renamer would see. Useful when a shader minifies unexpectedly.

use glsl_minify::directives::process_directives;
use glsl_minify::preprocess::IncludeExpander;
use glsl_minify::tokenizer::{Token, tokenize};
use glsl_minify::{FileSystemResolver, SourceUnit, SymbolTable};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        let program = args.first().map_or("dump_tokens", String::as_str);
        eprintln!("Usage: {program} <shader.glsl>");
        eprintln!("Expands includes and directives, then dumps the token stream to stdout");
        process::exit(1);
    }

    let shader_path = &args[1];

    if !Path::new(shader_path).exists() {
        eprintln!("Error: Shader file '{shader_path}' does not exist");
        process::exit(1);
    }

    let unit = match SourceUnit::from_file(shader_path) {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("Error reading shader '{shader_path}': {e}");
            process::exit(1);
        }
    };

    let mut resolver = FileSystemResolver::new();
    let flattened = match IncludeExpander::new(&mut resolver, None).expand(&unit) {
        Ok(flattened) => flattened,
        Err(e) => {
            eprintln!("Error expanding includes of '{shader_path}': {e}");
            process::exit(1);
        }
    };

    let mut table = SymbolTable::new();
    let processed = process_directives(&flattened, &mut table);
    let tokens: Vec<Token> = tokenize(&processed).collect();
    println!("{tokens:#?}");
}

use std::{fs::File, io::Read, path::Path};

pub mod ast;
pub mod backend;
pub mod frontend;
pub mod semantic;
pub mod utils;

pub use utils::errors;

use tracing::debug;

use crate::backend::{emit_with, EmitConfig};
use crate::errors::{BlameError, BlameResult};
use crate::frontend::parser::parse_source;
use crate::utils::config::source::SOURCE_EXTENSION;

pub const VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub emit: EmitConfig,
    /// Emit from the best-effort tree even when parsing recorded diagnostics.
    pub allow_diagnostics: bool,
}

/// Translate source text into C with default options.
pub fn compile(source: &str) -> BlameResult<String> {
    compile_with(source, &CompileOptions::default())
}

pub fn compile_with(source: &str, options: &CompileOptions) -> BlameResult<String> {
    let (program, diagnostics) = parse_source(source);
    debug!(
        statements = program.len(),
        diagnostics = diagnostics.len(),
        "parsed source"
    );
    if !diagnostics.is_empty() && !options.allow_diagnostics {
        return Err(BlameError::ParseFailed { diagnostics });
    }
    emit_with(&program, &options.emit)
}

pub fn read(filename: &Path) -> BlameResult<String> {
    match filename.extension() {
        Some(ext) if ext == SOURCE_EXTENSION => {}
        _ => {
            return Err(BlameError::FileReadError(format!(
                "File must have a .{} extension",
                SOURCE_EXTENSION
            )));
        }
    }
    // Open the path in read-only mode, returns `io::Result<File>`
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

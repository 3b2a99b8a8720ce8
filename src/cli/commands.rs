//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Report;
use rep_syntax::{Ast, ParseError, ParseWarning, RepParser};

use super::{CliError, CliResult, ExitCode, OutputFormat};

/// Maximum source file size (16 MB)
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Suppress warnings.
    pub quiet: bool,
}

/// A successfully parsed `.rep` file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub ast: Ast,
    pub warnings: Vec<ParseWarning>,
}

/// Parse one file.
///
/// ## Errors
///
/// Returns an error if:
/// - The file exceeds `MAX_SOURCE_SIZE`
/// - The file cannot be opened or read
/// - A declaration is malformed
pub fn parse_source(path: &Path) -> CliResult<ParsedFile> {
    if let Ok(metadata) = fs::metadata(path) {
        if metadata.len() > MAX_SOURCE_SIZE {
            return Err(CliError::failure(format!(
                "Source file '{}' is too large ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                MAX_SOURCE_SIZE
            )));
        }
    }

    let mut parser = RepParser::new();
    if let Err(err) = parser.parse_file(path) {
        return Err(CliError::failure(format_error(path, err)));
    }

    let warnings = parser.warnings().to_vec();
    Ok(ParsedFile {
        path: path.to_path_buf(),
        ast: parser.into_ast(),
        warnings,
    })
}

/// Render a parse error with its diagnostic code and help.
pub fn format_error(path: &Path, err: ParseError) -> String {
    format!("error in {}\n{:?}", path.display(), Report::new(err))
}

fn format_warning(path: &Path, warning: &ParseWarning) -> String {
    format!("warning in {}\n{:?}", path.display(), Report::new(warning.clone()))
}

fn report_warnings(file: &ParsedFile, options: Options) {
    if options.quiet {
        return;
    }
    for warning in &file.warnings {
        eprintln!("{}", format_warning(&file.path, warning));
    }
}

/// Render a single AST in the requested format.
pub fn render_ast(ast: &Ast, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Summary => Ok(ast.to_string()),
        OutputFormat::Debug => Ok(format!("{:#?}\n", ast)),
        OutputFormat::Json => serde_json::to_string_pretty(ast)
            .map(|json| json + "\n")
            .map_err(|e| CliError::failure(format!("Error serializing AST: {}", e))),
    }
}

/// Render several parsed files.
///
/// A single file renders exactly like [`render_ast`]. Several files render as a
/// JSON object keyed by path, or as text sections headed `==> path <==`.
pub fn render_files(files: &[ParsedFile], format: OutputFormat) -> CliResult<String> {
    if let [file] = files {
        return render_ast(&file.ast, format);
    }

    if format == OutputFormat::Json {
        let mut map = serde_json::Map::new();
        for file in files {
            let value = serde_json::to_value(&file.ast)
                .map_err(|e| CliError::failure(format!("Error serializing AST: {}", e)))?;
            map.insert(file.path.display().to_string(), value);
        }
        return serde_json::to_string_pretty(&map)
            .map(|json| json + "\n")
            .map_err(|e| CliError::failure(format!("Error serializing AST: {}", e)));
    }

    let mut out = String::new();
    for file in files {
        out.push_str(&format!("==> {} <==\n", file.path.display()));
        out.push_str(&render_ast(&file.ast, format)?);
    }
    Ok(out)
}

/// Parse files and print their ASTs. Stops at the first file that fails.
pub fn parse_files(files: &[PathBuf], format: OutputFormat, options: Options) -> CliResult<ExitCode> {
    let mut parsed = Vec::with_capacity(files.len());
    for path in files {
        let file = parse_source(path)?;
        report_warnings(&file, options);
        parsed.push(file);
    }

    print!("{}", render_files(&parsed, format)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse every file and report `ok` or the diagnostic for each.
pub fn check_files(files: &[PathBuf], options: Options) -> CliResult<ExitCode> {
    let mut failures = 0;
    for path in files {
        match parse_source(path) {
            Ok(file) => {
                report_warnings(&file, options);
                println!("ok {}", path.display());
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}", e.message);
            }
        }
    }

    if failures > 0 {
        tracing::info!(failures, total = files.len(), "check failed");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

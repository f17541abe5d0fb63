use blamec::{
    backend::{emit_with, EmitConfig},
    errors::{BlameError, BlameResult},
    frontend::{lexer::scan, Lexer, Parser as SourceParser},
    read,
    semantic::NodeCounter,
    utils::config::{emitter::DEFAULT_INDENT, source::TARGET_EXTENSION},
};
use clap::Parser;
use std::{fs, path::PathBuf, time::Instant};
use tracing::{debug, info, warn, Level};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Translates blame source programs into C",
    long_about = "Translates blame source programs into C.\n\
                 The translator lexes and parses the source into an abstract syntax tree\n\
                 and walks it to produce a single C translation unit.\n\
                 \n\
                 Example usage:\n\
                 blamec input.blame                     # Translate to input.c\n\
                 blamec input.blame -o output.c         # Specify output file\n\
                 blamec input.blame --stdout            # Print C code instead of writing it\n\
                 blamec input.blame --show-ast          # Display abstract syntax tree\n\
                 blamec input.blame --dump-vars         # Print every variable at exit\n\
                 blamec input.blame --verbose           # Verbose translation output"
)]
struct Cli {
    // The path to the file to translate
    path: PathBuf,

    // Output file path (defaults to input file with .c extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    // Print the generated C code instead of writing a file
    #[arg(long)]
    stdout: bool,

    // Print the token stream after lexing
    #[arg(long)]
    show_tokens: bool,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Show interned identifiers after parsing
    #[arg(long)]
    show_symbols: bool,

    // Print every variable before main returns
    #[arg(long)]
    dump_vars: bool,

    // Spaces per indentation level in the generated code
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    // Emit code even when parsing recorded diagnostics
    #[arg(long)]
    allow_diagnostics: bool,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    // Show translation timing
    #[arg(short, long)]
    timing: bool,
}

// Translation statistics for performance analysis
#[derive(Debug, Default)]
struct CompilationStats {
    lexer_time: f64,
    parser_time: f64,
    emit_time: f64,
    total_time: f64,
    token_count: usize,
    ast_size: usize,
    diagnostic_count: usize,
    output_lines: usize,
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

// Generate output file path from input path if not specified
fn determine_output_path(input_path: &PathBuf, output: &Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) => path.clone(),
        None => {
            let basename = input_path.file_stem().unwrap_or_default();
            let mut path = PathBuf::from(basename);
            path.set_extension(TARGET_EXTENSION);
            path
        }
    }
}

// Perform lexical analysis phase; only needed for statistics and --show-tokens,
// the parser pulls its own tokens.
fn lexical_analysis(source: &str, stats: &mut CompilationStats, show_tokens: bool) {
    let lexer_start = Instant::now();
    let tokens = scan(source);
    stats.lexer_time = lexer_start.elapsed().as_secs_f64();
    stats.token_count = tokens.len();
    debug!(tokens = stats.token_count, seconds = stats.lexer_time, "lexical analysis completed");

    if show_tokens {
        println!("\n Tokens:");
        for token in &tokens {
            println!("  {:>4}  {:<22} {:?}", token.line, token.kind.to_string(), token.literal);
        }
    }
}

// Main translation function
fn compile(input_path: &PathBuf, args: &Cli) -> BlameResult<(String, CompilationStats)> {
    let start_time = Instant::now();
    let mut stats = CompilationStats::default();
    info!(path = %input_path.display(), "starting translation");

    if !input_path.exists() {
        return Err(BlameError::FileReadError(format!(
            "Input file does not exist: {}",
            input_path.display()
        )));
    }

    let source = read(input_path)?;
    debug!(bytes = source.len(), "read input file");

    lexical_analysis(&source, &mut stats, args.show_tokens);

    // Parsing
    let parser_start = Instant::now();
    let mut parser = SourceParser::new(Lexer::new(&source));
    let program = parser.parse();
    stats.parser_time = parser_start.elapsed().as_secs_f64();
    stats.ast_size = NodeCounter::count(&program).total();
    let diagnostics = parser.into_diagnostics();
    stats.diagnostic_count = diagnostics.len();
    debug!(
        statements = program.len(),
        nodes = stats.ast_size,
        seconds = stats.parser_time,
        "parsing completed"
    );

    if args.show_ast {
        println!("\n Abstract Syntax Tree:");
        if program.is_empty() {
            println!("  (empty)");
        } else {
            print!("{}", program);
        }
    }
    if args.show_symbols {
        program.scopes.print_symbols();
    }

    if !diagnostics.is_empty() {
        if !args.allow_diagnostics {
            return Err(BlameError::ParseFailed { diagnostics });
        }
        for diagnostic in &diagnostics {
            warn!(line = diagnostic.line, "{}", diagnostic.message);
        }
    }

    // Emission
    let emit_start = Instant::now();
    let config = EmitConfig {
        indent: args.indent,
        dump_variables: args.dump_vars,
    };
    let output = emit_with(&program, &config)?;
    stats.emit_time = emit_start.elapsed().as_secs_f64();
    stats.output_lines = output.lines().count();
    debug!(lines = stats.output_lines, seconds = stats.emit_time, "emission completed");

    stats.total_time = start_time.elapsed().as_secs_f64();
    info!(seconds = stats.total_time, "translation completed");
    Ok((output, stats))
}

// Print detailed translation statistics
fn print_stats(stats: &CompilationStats) {
    println!("\n Translation Statistics:");
    println!("+---------------------+-----------+");
    println!("| Phase               | Time (s)  |");
    println!("+---------------------+-----------+");
    println!("| Lexical Analysis    | {:>9.3} |", stats.lexer_time);
    println!("| Parsing             | {:>9.3} |", stats.parser_time);
    println!("| Emission            | {:>9.3} |", stats.emit_time);
    println!("+---------------------+-----------+");
    println!("| Total Time          | {:>9.3} |", stats.total_time);
    println!("+---------------------+-----------+");

    println!("\n Code Metrics:");
    println!("  - Tokens:       {}", stats.token_count);
    println!("  - AST Nodes:    {}", stats.ast_size);
    println!("  - Diagnostics:  {}", stats.diagnostic_count);
    println!("  - Output Lines: {}", stats.output_lines);
}

fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match compile(&args.path, &args) {
        Ok((output, stats)) => {
            if args.stdout {
                print!("{}", output);
            } else {
                let output_path = determine_output_path(&args.path, &args.output);
                if let Err(e) = fs::write(&output_path, &output) {
                    fatal(&format!("Failed to write output file '{}': {}", output_path.display(), e));
                }
                info!(path = %output_path.display(), "C code written");
            }

            if args.timing {
                print_stats(&stats);
            }
        }
        Err(e) => fatal(&format!("Translation failed: {}", e)),
    }
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;

use bl_common::manifest::{self, BlManifest, DEFAULT_INDENT};
use bl_common::{CodeModule, Diagnostic, Opcode};
use bl_compiler::ast::{Context, Program, Statement};
use bl_compiler::codegen::disassemble;
use bl_compiler::lexer::Tokenizer;
use bl_compiler::parser::Parser as BlParser;
use bl_compiler::passes::{self, pretty_print};

/// BL language compiler.
///
/// Compiles .bl source files to .bl-code (JSON byte code) files.
#[derive(Parser)]
#[command(
    name = "blc",
    version,
    about,
    long_about = "BL language compiler.\n\nCompiles .bl programs into .bl-code files holding the flat byte code\nfor the BL virtual machine.\n\nExamples:\n  blc hunter.bl                 Compile to hunter.bl-code\n  blc hunter.bl -o out.json     Compile to custom output path\n  blc hunter.bl --check         Check for errors only\n  blc hunter.bl --listing       Print a disassembly\n  blc                           Compile the entry named in Bl.toml"
)]
struct Cli {
    /// Input .bl source file (default: the [project] entry of Bl.toml).
    input: Option<PathBuf>,

    /// Output file path (default: <input>.bl-code).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check for errors, code generation included, without writing output.
    #[arg(long)]
    check: bool,

    /// Suppress warnings and the summary line.
    #[arg(short, long)]
    quiet: bool,

    /// Treat the input as a bare statement sequence instead of a PROGRAM.
    #[arg(long)]
    statement: bool,

    /// Indentation for --emit-pretty (overrides Bl.toml).
    #[arg(long)]
    indent: Option<usize>,

    /// Emit code module JSON to stdout instead of writing to file.
    #[arg(long = "emit-code")]
    emit_code: bool,

    /// Print a disassembly of the generated code.
    #[arg(long)]
    listing: bool,

    /// Print the parsed source back in canonical layout.
    #[arg(long = "emit-pretty")]
    emit_pretty: bool,

    /// Emit token stream to stdout (debug).
    #[arg(long = "emit-tokens")]
    emit_tokens: bool,

    /// Emit syntax tree to stdout (debug).
    #[arg(long = "emit-ast")]
    emit_ast: bool,
}

/// What was parsed: a whole program, or a statement block compiled
/// without user-defined instructions.
enum Unit {
    Program(Program),
    Statements(Statement),
}

fn main() {
    let cli = Cli::parse();

    // === Manifest ===
    // Bl.toml is optional; look for it next to the input, or from the
    // working directory when no input is given.
    let search_from = match cli.input {
        Some(ref input) => fs::canonicalize(input).unwrap_or_else(|_| input.clone()),
        None => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("_"),
    };
    let manifest = match manifest::find_and_load_manifest(&search_from) {
        Ok(m) => Some(m),
        Err(manifest::ManifestError::NotFound(_)) => None,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let input = match resolve_input(cli.input.as_deref(), manifest.as_ref()) {
        Some(path) => path,
        None => {
            eprintln!("error: no input file given and no [project] entry in Bl.toml");
            process::exit(1);
        }
    };
    let indent = cli
        .indent
        .or(manifest.as_ref().map(|m| m.format.indent))
        .unwrap_or(DEFAULT_INDENT);
    let simplify = manifest.as_ref().is_some_and(|m| m.codegen.simplify);

    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", input.display(), e);
            process::exit(1);
        }
    };

    let file_name = input
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    // === Tokenizer ===
    let (mut tokens, lex_diags) = Tokenizer::new(&source, &file_name).tokenize();

    if lex_diags.has_errors() {
        for diag in lex_diags.diagnostics() {
            print_diagnostic(diag, &source, &file_name);
        }
        process::exit(1);
    }

    if cli.emit_tokens {
        for token in &tokens {
            println!(
                "{:>4}:{:<3} {:?} {:?}",
                token.span.start.line, token.span.start.column, token.kind, token.lexeme,
            );
        }
        return;
    }

    // === Parser ===
    let mut parser = BlParser::new(&mut tokens);
    let parsed = if cli.statement {
        parser.parse_statements().map(Unit::Statements)
    } else {
        parser.parse_program().map(Unit::Program)
    };
    let mut unit = match parsed {
        Ok(unit) => unit,
        Err(e) => {
            print_diagnostic(&e.to_diagnostic(), &source, &file_name);
            process::exit(1);
        }
    };

    let warnings = parser.take_diagnostics();
    if !cli.quiet {
        for diag in warnings.diagnostics() {
            print_diagnostic(diag, &source, &file_name);
        }
    }

    if simplify {
        match unit {
            Unit::Program(ref mut program) => passes::simplify_program(program),
            Unit::Statements(ref mut block) => passes::simplify_if_else(block),
        }
    }

    if cli.emit_ast {
        match unit {
            Unit::Program(ref program) => println!("{:#?}", program),
            Unit::Statements(ref block) => println!("{:#?}", block),
        }
        return;
    }

    if cli.emit_pretty {
        match unit {
            Unit::Program(ref program) => print!("{}", program.pretty_print(indent)),
            Unit::Statements(ref block) => print!("{}", pretty_print(block, 0, indent)),
        }
        return;
    }

    // === Code generation ===
    let module_name = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let generated = match unit {
        Unit::Program(ref program) => program
            .generated_code()
            .map(|code| (program.name.clone(), code)),
        Unit::Statements(ref block) => {
            let mut code = Vec::new();
            block
                .generate_code(&Context::new(), &mut code)
                .map(|()| {
                    code.push(Opcode::Halt.byte_code());
                    (module_name, code)
                })
        }
    };
    let (program_name, code) = match generated {
        Ok(g) => g,
        Err(e) => {
            print_diagnostic(&e.to_diagnostic(), &source, &file_name);
            process::exit(1);
        }
    };

    if cli.check {
        if !cli.quiet {
            println!("No errors found.");
        }
        return;
    }

    if cli.listing {
        match disassemble(&code) {
            Ok(listing) => listing.iter().for_each(|instr| println!("{}", instr)),
            Err(e) => {
                print_diagnostic(&e.to_diagnostic(), &source, &file_name);
                process::exit(1);
            }
        }
        return;
    }

    let module = CodeModule::new(program_name, file_name.as_str(), code);
    let json = match module.to_json() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("error: failed to serialize code module: {}", e);
            process::exit(1);
        }
    };

    // --emit-code: print JSON to stdout
    if cli.emit_code {
        println!("{}", json);
        return;
    }

    let output_path = cli.output.unwrap_or_else(|| {
        let mut p = input.clone();
        p.set_extension("bl-code");
        p
    });

    match fs::write(&output_path, &json) {
        Ok(()) => {
            if !cli.quiet {
                println!(
                    "Compiled {} -> {} ({} words)",
                    input.display(),
                    output_path.display(),
                    module.code.len()
                );
            }
        }
        Err(e) => {
            eprintln!("error: could not write '{}': {}", output_path.display(), e);
            process::exit(1);
        }
    }
}

/// The explicit input wins; otherwise fall back to the manifest entry.
fn resolve_input(input: Option<&Path>, manifest: Option<&BlManifest>) -> Option<PathBuf> {
    match input {
        Some(path) => Some(path.to_path_buf()),
        None => manifest.and_then(BlManifest::entry_path),
    }
}

fn print_diagnostic(diag: &Diagnostic, source: &str, file_name: &str) {
    let kind = if diag.is_error() {
        ReportKind::Error
    } else {
        ReportKind::Warning
    };

    if let Some(ref span) = diag.span {
        let range = span.byte_range();

        let color = if diag.is_error() {
            Color::Red
        } else {
            Color::Yellow
        };

        let mut report = Report::build(kind, file_name, range.start)
            .with_message(&diag.message)
            .with_label(
                Label::new((file_name, range))
                    .with_message(&diag.message)
                    .with_color(color),
            );

        for related in &diag.related {
            report = report.with_label(
                Label::new((file_name, related.span.byte_range()))
                    .with_message(&related.message)
                    .with_color(Color::Blue),
            );
        }

        if let Some(ref suggestion) = diag.suggestion {
            report = report.with_help(suggestion);
        }

        if let Err(e) = report
            .finish()
            .eprint((file_name, Source::from(source)))
        {
            eprintln!("error: {} ({})", diag.message, e);
        }
    } else {
        eprintln!("{}", diag);
        eprintln!();
    }
}

//! Stack-machine assembler and simulator CLI.
//!
//! This binary provides the two toolchain entry points. It performs:
//! 1. **Assemble:** Translate a source file and write the binary image plus `.hex` listing
//!    (or a JSON dump for `.json` targets).
//! 2. **Run:** Load a binary image and an input file, simulate to halt or tick limit, and
//!    print the output followed by the tick count.
//!
//! Logging goes to stderr through `tracing-subscriber`; `RUST_LOG` overrides the level.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use stackcpu_core::config::Config;
use stackcpu_core::sim::loader;
use stackcpu_core::{AsmError, Error, Program, assemble, simulate};

#[derive(Parser, Debug)]
#[command(
    name = "stackcpu",
    author,
    version,
    about = "Stack-machine cross-assembler and tick-accurate simulator",
    long_about = "Assemble Forth-like programs and run them on a microcoded stack processor.\n\nExamples:\n  stackcpu asm programs/hello.fs out/hello.bin\n  stackcpu run out/hello.bin input.txt\n  stackcpu run out/cat.bin input.txt --quiet --stats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file.
    Asm {
        /// Program text.
        source: PathBuf,

        /// Output path; `.json` writes a JSON dump, anything else a binary image plus `.hex`.
        target: PathBuf,
    },

    /// Simulate an assembled program.
    Run {
        /// Binary image (or `.json` dump) produced by `asm`.
        code: PathBuf,

        /// Text queued on input port 0.
        input: PathBuf,

        /// Only log errors.
        #[arg(short, long)]
        quiet: bool,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print run statistics after the output.
        #[arg(long)]
        stats: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let quiet = matches!(cli.command, Commands::Run { quiet: true, .. });
    init_logging(quiet);

    let code = match cli.command {
        Commands::Asm { source, target } => cmd_asm(&source, &target),
        Commands::Run {
            code,
            input,
            config,
            stats,
            ..
        } => cmd_run(&code, &input, config.as_deref(), stats),
    };
    process::exit(code);
}

/// Installs the stderr formatter. `RUST_LOG` wins unless `quiet` is set.
fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Formats a compiler-style diagnostic pointing at the offending term.
fn render_diagnostic(file: &Path, source: &str, err: &AsmError) -> String {
    let pos = err.pos();
    let mut diag = String::new();
    let _ = writeln!(diag, "error: {err}");
    let _ = writeln!(diag, " --> {}:{}:{}", file.display(), pos.line, pos.column);
    if let Some(raw_line) = source.lines().nth(pos.line.saturating_sub(1)) {
        let underline = " ".repeat(pos.column.saturating_sub(1));
        let _ = writeln!(diag, "  |");
        let _ = writeln!(diag, "{:>4} | {}", pos.line, raw_line.trim_end_matches('\r'));
        let _ = writeln!(diag, "  | {underline}^");
    }
    diag
}

/// Assembles `source` into `target`. Returns the process exit code.
fn cmd_asm(source: &Path, target: &Path) -> i32 {
    let text = match fs::read_to_string(source) {
        Ok(text) => text,
        Err(e) => {
            error!(path = %source.display(), "could not read source: {e}");
            return 1;
        }
    };

    let program = match assemble(&text) {
        Ok(program) => program,
        Err(e) => {
            eprint!("{}", render_diagnostic(source, &text, &e));
            return 1;
        }
    };

    match loader::write_artifacts(&program, target) {
        Ok(artifacts) => println!("{}", artifacts.listing),
        Err(e) => {
            error!(path = %target.display(), "could not write artifacts: {e}");
            return 1;
        }
    }
    println!(
        "source LoC: {} code instr: {}",
        text.split('\n').count(),
        program.instructions.len()
    );
    0
}

/// Reads the configuration, program image, and input text for a run.
fn load_run(
    code: &Path,
    input: &Path,
    config: Option<&Path>,
) -> Result<(Config, Program, String), Error> {
    let config = config.map_or_else(|| Ok(Config::default()), Config::from_file)?;
    let program = loader::load_program(code)?;
    let input = loader::load_input(input)?;
    Ok((config, program, input))
}

/// Simulates `code` with `input`. Returns the process exit code.
fn cmd_run(code: &Path, input: &Path, config: Option<&Path>, stats: bool) -> i32 {
    let (config, program, input) = match load_run(code, input, config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{e}");
            return 1;
        }
    };

    match simulate(&program, &input, &config) {
        Ok(outcome) => {
            println!("{}", outcome.output);
            println!("ticks: {}", outcome.ticks);
            if stats {
                outcome.stats.print();
            }
            0
        }
        Err(e) => {
            error!("simulation aborted: {e}");
            1
        }
    }
}

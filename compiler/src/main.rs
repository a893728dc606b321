use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tlispc::{diagnostics, Program};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tlispc")]
#[command(about = "The tlisp language front end", long_about = None)]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a tlisp program and report syntax errors
    Check {
        /// Input .tl file
        input: PathBuf,
    },

    /// Print the parsed AST
    Ast {
        /// Input .tl file
        input: PathBuf,
    },

    /// Print the program in canonical form
    Fmt {
        /// Input .tl file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let color = !cli.no_color;

    match cli.command {
        Commands::Check { input } => {
            let program = load_program(&input, color)?;
            println!(
                "{}: ok ({} top-level forms)",
                input.display(),
                program.forms.len()
            );
        }
        Commands::Ast { input } => {
            let program = load_program(&input, color)?;
            println!("{:#?}", program);
        }
        Commands::Fmt { input } => {
            let program = load_program(&input, color)?;
            println!("{}", program);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_program(input: &Path, color: bool) -> Result<Program> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read source file {}", input.display()))?;
    info!(path = %input.display(), "parsing");

    let name = input.display().to_string();
    match tlispc::parse(&source) {
        Ok(program) => Ok(program),
        Err(err) => {
            diagnostics::eprint(&name, &source, &err, color)
                .context("Failed to print diagnostic")?;
            let loc = diagnostics::locate(&source, err.offset());
            bail!("Parse error in {}:{}:{}", name, loc.line, loc.column)
        }
    }
}

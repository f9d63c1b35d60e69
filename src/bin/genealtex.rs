//! genealtex CLI - render recorded document scripts to LaTeX

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use genealtex::{DocScript, OutputTarget, LATEX_TEMPLATE};
#[cfg(feature = "cli")]
use std::io::{self, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "genealtex")]
#[command(version)]
#[command(about = "genealtex - LaTeX document generator with negotiated longtable widths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document script
    Render {
        /// Script file
        script: PathBuf,

        /// Output file; `.tex` is appended when missing (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Body only, for `\input` into a master document
        #[arg(long)]
        no_preamble: bool,
    },

    /// Print the macro preamble used by generated documents
    Preamble,
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> genealtex::DocGenResult<()> {
    match cli.command {
        Commands::Render {
            script,
            output,
            no_preamble,
        } => {
            let mut script = DocScript::from_file(&script)?;
            if no_preamble {
                script.options.with_preamble = false;
            }

            let target = match &output {
                Some(path) => OutputTarget::file(path),
                None => OutputTarget::Memory,
            };
            let written = target.path().map(|p| p.to_path_buf());

            let mut doc = script.document();
            let skipped = script.write_into(&mut doc, target)?;

            if !cli.quiet {
                for warning in skipped.iter().chain(doc.warnings()) {
                    eprintln!("⚠ {}", warning);
                }
            }

            match written {
                Some(path) => eprintln!("✓ Output written to: {}", path.display()),
                None => io::stdout().write_all(doc.output().as_bytes())?,
            }
        }
        Commands::Preamble => {
            io::stdout().write_all(LATEX_TEMPLATE.as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  genealtex render <SCRIPT> [-o OUTPUT] [--no-preamble]");
    eprintln!("  genealtex preamble");
}

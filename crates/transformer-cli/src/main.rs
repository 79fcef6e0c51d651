//! Transformer compiler CLI.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use miette::{miette, IntoDiagnostic};
use tracing_subscriber::{fmt, EnvFilter};

use transformer_compiler::diagnostic::Diagnostic;
use transformer_compiler::{Compiler, CompilerConfig};

mod ui;

#[derive(Parser)]
#[command(name = "transformer")]
#[command(about = "Transformer compiler - checks transformer packages and generates their HTTP service")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Analyze source units one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a transformer package without generating code
    Check {
        /// Package description file or directory containing package.json
        package: PathBuf,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a transformer package and write its generated service
    Build {
        /// Package description file or directory containing package.json
        package: PathBuf,

        /// Output directory for the generated service
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Default port of the generated listener
        #[arg(short, long)]
        port: Option<u16>,

        /// Print the compile result as JSON
        #[arg(long)]
        json: bool,

        /// Write the service even if rules are violated
        #[arg(long)]
        force: bool,
    },
}

fn main() -> miette::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CompilerConfig::from_file(path)?,
        None => CompilerConfig::default(),
    };
    if cli.sequential {
        config.parallel = false;
    }
    tracing::debug!(frontend = %config.frontend, parallel = config.parallel, "configuration loaded");

    match cli.command {
        Commands::Check { package, json } => check(config, &package, json),
        Commands::Build {
            package,
            output,
            port,
            json,
            force,
        } => {
            if let Some(port) = port {
                config.codegen.port = port;
            }
            build(config, &package, &output, json, force)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Check a package and report its diagnostics.
fn check(config: CompilerConfig, package_path: &Path, json: bool) -> miette::Result<()> {
    let start = Instant::now();
    let compiler = Compiler::new(config);

    let spinner = (!json).then(|| ui::spinner("Checking transformer package..."));
    let checked = compiler.load_package(package_path).map(|package| {
        let diagnostics = compiler.check(&package);
        (package, diagnostics)
    });
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let (package, diagnostics) = checked?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diagnostics).into_diagnostic()?);
    } else if diagnostics.is_empty() {
        ui::no_violations();
        println!();
        ui::dim(&format!(
            "{} modules {} {} source units",
            package.modules.len(),
            ui::symbols::DOT,
            package.modules.iter().map(|m| m.document_count()).sum::<usize>()
        ));
        ui::timing("Checked", start.elapsed().as_millis());
    } else {
        ui::violations_header(diagnostics.len());
        print_diagnostics(&diagnostics);
    }

    fail_on_diagnostics(&diagnostics)
}

/// Compile a package and write the generated service.
fn build(config: CompilerConfig, package_path: &Path, output: &Path, json: bool, force: bool) -> miette::Result<()> {
    let start = Instant::now();
    let compiler = Compiler::new(config);

    let spinner = (!json).then(|| ui::spinner("Compiling transformer package..."));
    let result = compiler
        .load_package(package_path)
        .map(|package| compiler.compile(&package));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else if result.has_errors() {
        ui::violations_header(result.diagnostics.len());
        print_diagnostics(&result.diagnostics);
    }

    if result.has_errors() && !force {
        return fail_on_diagnostics(&result.diagnostics);
    }

    let Some(source) = &result.generated else {
        return Err(miette!("service generation failed; see the warning above"));
    };
    let path = compiler.write_output(source, output)?;
    tracing::debug!(path = %path.display(), "service written");

    if !json {
        ui::success(&format!("Generated {}", path.display()));
        println!();
        for name in &result.transformers {
            ui::transformer_line(name);
        }
        println!();
        ui::info(&format!("Listening port defaults to {}", compiler.config().codegen.port));
        ui::timing("Built", start.elapsed().as_millis());
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    let styled = console::Term::stdout().is_term();
    for diagnostic in diagnostics {
        if styled {
            ui::diagnostic(diagnostic);
        } else {
            println!("{}", ui::diagnostic_line(diagnostic));
        }
    }
    println!();
}

fn fail_on_diagnostics(diagnostics: &[Diagnostic]) -> miette::Result<()> {
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(miette!("{} transformer rule violation(s)", diagnostics.len()))
    }
}

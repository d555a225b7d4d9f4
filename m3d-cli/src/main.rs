/// m3d - compile CSS `transform` values to `matrix3d()`
///
/// Usage:
///   m3d convert "translateX(100px) scale(2)"
///   m3d rewrite dist/ --keep-original
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use m3d_core::{ConvertOptions, Converter, InvalidCallPolicy, CONFIG_FILE_NAME};
use m3d_cli::{ReportPrinter, RewriteApp};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "m3d", version, about)]
struct Cli {
    /// Log skipped calls and per-file progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the matrix3d() for each transform value.
    Convert(ConvertArgs),
    /// Rewrite transform declarations in stylesheet files.
    Rewrite(RewriteArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Transform values, e.g. "rotate(45deg) scale(2)".
    #[arg(required = true)]
    values: Vec<String>,

    /// Leave the whole value unchanged if any function is unknown or malformed.
    #[arg(long)]
    abort_on_invalid: bool,
}

#[derive(Args, Debug)]
struct RewriteArgs {
    /// Stylesheet files or directories to scan.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (defaults to ./m3d.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the original declaration and append the matrix3d() one after it.
    #[arg(long)]
    keep_original: bool,

    /// Regex file names must match.
    #[arg(long)]
    test: Option<String>,

    /// Leave a declaration unchanged if any function is unknown or malformed.
    #[arg(long)]
    abort_on_invalid: bool,

    /// Write rewritten files here instead of in place.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Report what would change without writing.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Convert(args) => convert(args),
        Command::Rewrite(args) => rewrite(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut options = ConvertOptions::default();
    if args.abort_on_invalid {
        options.on_invalid = InvalidCallPolicy::Abort;
    }

    let converter = Converter::new(options);
    let printer = ReportPrinter::new(false);
    let mut out = stdout();
    for value in &args.values {
        let result = converter.convert(value);
        printer.conversion(&mut out, value, result.as_deref())?;
    }

    Ok(())
}

fn rewrite(args: RewriteArgs) -> anyhow::Result<()> {
    let mut options = load_options(args.config.as_ref())?;
    if args.keep_original {
        options.keep_original = true;
    }
    if let Some(test) = args.test {
        options.test = test;
    }
    if args.abort_on_invalid {
        options.on_invalid = InvalidCallPolicy::Abort;
    }

    let app = RewriteApp::new(options, args.out_dir, args.dry_run)
        .context("invalid rewrite options")?;
    let reports = app.run(&args.paths);

    ReportPrinter::new(args.dry_run).files(&mut stdout(), &reports)?;

    let failed = reports.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        bail!("{} file(s) could not be rewritten", failed);
    }
    Ok(())
}

fn load_options(config: Option<&PathBuf>) -> anyhow::Result<ConvertOptions> {
    if let Some(path) = config {
        return ConvertOptions::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let default_path = PathBuf::from(CONFIG_FILE_NAME);
    if default_path.is_file() {
        return ConvertOptions::load(&default_path)
            .with_context(|| format!("failed to load config {}", default_path.display()));
    }

    Ok(ConvertOptions::default())
}

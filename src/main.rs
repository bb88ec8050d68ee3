use clap::Parser;
use i18n_rewrite::{
    RewriteError, RewriteReport, RuleSet, WriteMode, generate_execution_id, rewrite_file,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_TARGET: &str = "frontend/src/i18n/translations.ts";

/// Insert admin table labels into the translation source file
#[derive(Parser, Debug)]
#[command(name = "i18n-rewrite")]
#[command(version = "0.1.0")]
#[command(about = "Insert translation lines ahead of marker keys, per locale", long_about = None)]
struct Args {
    /// Translation file to rewrite in place
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    file: PathBuf,

    /// JSON file with insertion rules (omit to use the built-in ones)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Report what would be inserted without touching the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rules(path: Option<&PathBuf>) -> Result<RuleSet, RewriteError> {
    match path {
        Some(p) => Ok(RuleSet::from_json_file(p)?),
        None => Ok(RuleSet::default()),
    }
}

fn run(args: &Args, execution_id: String) -> Result<RewriteReport, RewriteError> {
    let rules = load_rules(args.rules.as_ref())?;
    let mode = if args.dry_run { WriteMode::DryRun } else { WriteMode::Overwrite };

    let outcome = rewrite_file(&args.file, &rules, mode)?;

    Ok(RewriteReport::success(
        execution_id,
        args.file.display().to_string(),
        args.dry_run,
        &outcome,
    ))
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let execution_id = generate_execution_id();
    tracing::debug!(%execution_id, file = %args.file.display(), "starting rewrite");

    let report = match run(&args, execution_id.clone()) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "rewrite failed");
            RewriteReport::failure(
                execution_id,
                args.file.display().to_string(),
                args.dry_run,
                e.to_string(),
            )
        }
    };

    output_report(&report, args.json, args.output.as_ref());

    if !report.success {
        std::process::exit(1);
    }
}

/// Format and output the report
fn output_report(report: &RewriteReport, json_mode: bool, output_path: Option<&PathBuf>) {
    let output = if json_mode { report.to_json() } else { report.to_human() };

    if let Some(path) = output_path {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }
}

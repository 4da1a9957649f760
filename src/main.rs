//! CLI entry point for `emlpdf`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use emlpdf::model::report::{PdfCandidate, ScanSummary};

#[derive(Parser)]
#[command(
    name = "emlpdf",
    version,
    about = "Extract PDF attachments from .eml files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Folder to scan for .eml files
    #[arg(value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output folder for extracted PDFs
    #[arg(short, long, global = true, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract PDF attachments from every .eml file under a folder
    Extract { input: PathBuf },
    /// List PDF attachment candidates without writing anything
    List { input: PathBuf },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = emlpdf::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let output = cli
        .output
        .unwrap_or_else(|| config.extract.default_output_dir.clone());

    match cli.command {
        Some(Commands::Extract { input }) => cmd_extract(&input, &output, cli.json),
        Some(Commands::List { input }) => cmd_list(&input, cli.json),
        None => {
            if let Some(input) = cli.input {
                cmd_extract(&input, &output, cli.json)
            } else {
                anyhow::bail!("No input directory given. Run `emlpdf <DIR>` or see --help.");
            }
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &emlpdf::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = emlpdf::config::log_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "emlpdf.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "emlpdf", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Scan a folder and extract every PDF attachment.
fn cmd_extract(input: &Path, output: &Path, json: bool) -> anyhow::Result<()> {
    if !input.is_dir() {
        anyhow::bail!("Input directory not found: {}", input.display());
    }

    if !json {
        println!(
            "  Scanning '{}' for .eml files, extracting PDFs to '{}'",
            input.display(),
            output.display()
        );
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Extracting [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let summary = emlpdf::scan::extract_dir(
        input,
        output,
        Some(&|current, total| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
        }),
    )?;
    pb.finish_and_clear();
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary_table(output, &summary, elapsed);
    }

    Ok(())
}

/// List PDF attachment candidates without writing anything.
fn cmd_list(input: &Path, json: bool) -> anyhow::Result<()> {
    if !input.is_dir() {
        anyhow::bail!("Input directory not found: {}", input.display());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Listing [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let candidates = emlpdf::scan::list_dir(
        input,
        Some(&|current, total| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
        }),
    )?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        print_candidates_table(&candidates);
    }

    Ok(())
}

/// Print the extraction summary in a human-readable table.
fn print_summary_table(output: &Path, summary: &ScanSummary, elapsed: std::time::Duration) {
    use humansize::{format_size, BINARY};

    println!();
    println!("  {:<20} {}", "EML files scanned", summary.files_scanned);
    println!("  {:<20} {}", "PDFs extracted", summary.pdfs_extracted);
    println!(
        "  {:<20} {}",
        "Bytes written",
        format_size(summary.bytes_written, BINARY)
    );
    println!("  {:<20} {}", "Output folder", output.display());
    println!("  {:<20} {:.2?}", "Elapsed", elapsed);

    if !summary.warnings.is_empty() {
        println!();
        println!("  {} warning(s):", summary.warnings.len());
        for w in &summary.warnings {
            println!("    {w}");
        }
    }
    println!();
    println!("  Finished! Extracted {} PDF(s).", summary.pdfs_extracted);
}

/// Print candidate PDFs as a human-readable table.
fn print_candidates_table(candidates: &[PdfCandidate]) {
    use humansize::{format_size, BINARY};

    println!();
    println!("  {} PDF candidate(s)", candidates.len());
    println!();

    if candidates.is_empty() {
        return;
    }

    println!(
        "  {:<4} {:<40} {:>10}  {}",
        "#", "Filename", "Size", "Source"
    );
    println!("  {}", "-".repeat(90));

    for (i, c) in candidates.iter().enumerate() {
        let name_trunc: String = c.filename.chars().take(39).collect();
        println!(
            "  {:<4} {:<40} {:>10}  {}",
            i + 1,
            name_trunc,
            format_size(c.size, BINARY),
            c.source.display()
        );
    }
    println!();
}

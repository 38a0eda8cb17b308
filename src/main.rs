use clap::{Parser, Subcommand};
use mdtally::{analyze, config, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    match (env!("ON_RELEASE_TAG"), env!("GIT_HASH")) {
        ("true", _) => env!("CARGO_PKG_VERSION"),
        (_, "") => concat!(env!("CARGO_PKG_VERSION"), "-dev"),
        // Leaked once at startup, lives for the rest of the process
        (_, hash) => Box::leak(format!("{}-dev@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "mdtally")]
#[command(about = "Content statistics for book-style markdown sites")]
#[command(long_about = "\
Content statistics for book-style markdown sites

Your filesystem is the data source. Top-level directories are the book's
parts, markdown files are the content, and config.toml names the parts and
fixes their display order.

Content structure:

  content/
  ├── config.toml                  # Parts configuration (optional)
  ├── part-1-introduction/         # One [[parts]] entry per directory
  │   ├── index.md
  │   └── 01-getting-started.md
  ├── part-2-core-tools/
  │   └── scan/usage.md            # Nesting is fine
  ├── appendix/
  │   └── glossary.md
  └── drafts/                      # Not configured = skipped silently

Counted per part: files, lines, headings, code blocks, words.

Run 'mdtally gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for stage manifests
    #[arg(long, default_value = ".mdtally-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect markdown documents into a manifest
    Scan,
    /// Compute per-part statistics from the document manifest
    Analyze,
    /// Print the report from the stats manifest
    Report,
    /// Run the full pipeline: scan, analyze, report
    Run,
    /// Validate the content directory and preview the report
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan_stage(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let path = cli.temp_dir.join("documents.json");
            std::fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
            output::print_scan_output(&manifest.documents, &manifest.config);
        }
        Command::Analyze => {
            let content = std::fs::read_to_string(cli.temp_dir.join("documents.json"))?;
            let manifest: scan::Manifest = serde_json::from_str(&content)?;
            let stats = analyze::StatsManifest::build(&manifest.documents, &manifest.config.parts);
            let path = cli.temp_dir.join("stats.json");
            std::fs::write(&path, serde_json::to_string_pretty(&stats)?)?;
            println!(
                "Analyzed {} files into {} parts",
                stats.totals.files,
                stats.groups.len()
            );
        }
        Command::Report => {
            let content = std::fs::read_to_string(cli.temp_dir.join("stats.json"))?;
            let stats: analyze::StatsManifest = serde_json::from_str(&content)?;
            output::print_report(&stats.groups, &stats.totals);
        }
        Command::Run => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan_stage(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            std::fs::write(
                cli.temp_dir.join("documents.json"),
                serde_json::to_string_pretty(&manifest)?,
            )?;
            output::print_scan_output(&manifest.documents, &manifest.config);

            println!("==> Stage 2: Analyzing {} documents", manifest.documents.len());
            let stats = analyze::StatsManifest::build(&manifest.documents, &manifest.config.parts);
            std::fs::write(
                cli.temp_dir.join("stats.json"),
                serde_json::to_string_pretty(&stats)?,
            )?;

            println!("==> Stage 3: Report");
            output::print_report(&stats.groups, &stats.totals);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan_stage(&cli.source)?;
            output::print_scan_output(&manifest.documents, &manifest.config);
            let stats = analyze::StatsManifest::build(&manifest.documents, &manifest.config.parts);
            output::print_report(&stats.groups, &stats.totals);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, size the reader pool from it, then scan.
fn scan_stage(source: &Path) -> Result<scan::Manifest, scan::ScanError> {
    let config = config::load_config(source)?;
    init_worker_pool(&config.processing);
    scan::scan_with_config(source, config)
}

/// Initialize the rayon pool used for parallel document reads.
///
/// Caps at the number of available CPU cores — config can constrain down,
/// not up.
fn init_worker_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}

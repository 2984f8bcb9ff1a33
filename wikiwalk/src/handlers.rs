use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wikiwalk_core::report::{ReportFormat, generate_report, save_report};
use wikiwalk_scanner::config::DEFAULT_BASE_URL;
use wikiwalk_scanner::{CrawlConfig, ScanError};

// Re-export crawl types and functions from wikiwalk-core
pub use wikiwalk_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl};

/// Raw command-line inputs, before validation.
#[derive(Debug, Clone)]
pub struct CrawlArgs {
    pub topic: String,
    pub distance: String,
    pub branching: String,
    pub base_url: String,
    pub threads: usize,
    pub timeout: u64,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

impl CrawlArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let string_arg = |name: &str| matches.get_one::<String>(name).cloned().unwrap_or_default();

        Self {
            topic: string_arg("TOPIC"),
            distance: string_arg("DISTANCE"),
            branching: string_arg("BRANCHING"),
            base_url: matches
                .get_one::<String>("BASE_URL")
                .cloned()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            threads: *matches.get_one::<usize>("threads").unwrap_or(&4),
            timeout: *matches.get_one::<u64>("timeout").unwrap_or(&10),
            format: matches
                .get_one::<String>("format")
                .and_then(|f| ReportFormat::from_str(f))
                .unwrap_or(ReportFormat::Text),
            output: matches.get_one::<PathBuf>("output").cloned(),
            quiet: matches.get_flag("quiet"),
        }
    }
}

/// Parse a distance or branching factor; only positive integers are accepted.
pub fn parse_positive(name: &str, value: &str) -> Result<usize, ScanError> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ScanError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, value
        ))),
        Ok(n) => Ok(n),
    }
}

/// Validate the raw arguments into crawl options.
pub fn build_options(args: &CrawlArgs) -> Result<CrawlOptions, ScanError> {
    if args.topic.trim().is_empty() {
        return Err(ScanError::Config("topic must not be empty".to_string()));
    }

    let distance = parse_positive("distance", &args.distance)?;
    let branching = parse_positive("branching factor", &args.branching)?;

    let config = CrawlConfig::new(distance, branching, &args.base_url)?
        .with_workers(args.threads)?
        .with_timeout_secs(args.timeout)?;

    Ok(CrawlOptions {
        topic: args.topic.clone(),
        config,
        show_progress_bars: !args.quiet,
    })
}

/// Write the report to `output`, or to stdout when no path is given.
pub fn emit_report(report: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => save_report(report, path)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(report.as_bytes())
                .context("Failed to write report to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn init_tracing() {
    // Logs go to stderr so the report on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(1);
}

pub async fn handle_crawl(matches: &ArgMatches) {
    init_tracing();

    let args = CrawlArgs::from_matches(matches);

    let options = match build_options(&args) {
        Ok(options) => options,
        Err(e) => fail(e),
    };

    debug!("Crawl configuration: {:?}", options.config);

    if !args.quiet {
        eprintln!(
            "{} {} (distance {}, branching {}, {})",
            "Crawling".bright_cyan().bold(),
            options.topic.bright_white(),
            options.config.distance,
            options.config.branching,
            options.config.base_url
        );
    }

    let tree = match execute_crawl(options, None).await {
        Ok(tree) => tree,
        Err(e) => fail(format!("Crawl failed: {}", e)),
    };

    let report = match generate_report(&tree, args.format) {
        Ok(report) => report,
        Err(e) => fail(format!("Failed to build report: {}", e)),
    };

    if let Err(e) = emit_report(&report, args.output.as_deref()) {
        fail(format!("{:#}", e));
    }

    if let Some(ref path) = args.output
        && !args.quiet
    {
        eprintln!(
            "{} Report saved to {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        );
    }
}

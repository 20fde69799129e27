// ABOUTME: CLI binary for the metalens SEO metadata analyzer.
// ABOUTME: Analyzes URLs or a local HTML file and prints JSON, markdown or plain-text reports.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use metalens_analyzer::{AnalysisResult, Client, OutputFormat, StoredAnalysis};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Audit the SEO metadata of web pages.
#[derive(Parser, Debug)]
#[command(name = "metalens")]
#[command(about = "Analyze title, description, canonical, Open Graph and Twitter Card tags")]
struct Args {
    /// URLs to analyze (fetch mode)
    #[arg()]
    urls: Vec<String>,

    /// HTML file to analyze instead of fetching (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Page URL the HTML file was served from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Output format: json (default), markdown/md, text/txt
    #[arg(short = 'f', long = "format", default_value = "json")]
    format: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output compact JSON instead of pretty
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// List the N most recent analyses from this run on stderr (in-memory history)
    #[arg(long = "recent", value_name = "N")]
    recent: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn validate(args: &Args) -> Result<()> {
    if args.html.is_some() && args.url.is_none() {
        bail!("--url is required when using --html");
    }
    if args.html.is_none() && args.urls.is_empty() {
        bail!("at least one URL is required, or use --html with --url");
    }
    if args.html.is_some() && !args.urls.is_empty() {
        bail!("cannot use both --html and positional URLs");
    }
    if args.url.is_some() && args.html.is_none() {
        bail!("--url is only valid together with --html");
    }
    Ok(())
}

fn render(results: &[AnalysisResult], format: OutputFormat, compact: bool) -> Result<String> {
    let out = match format {
        OutputFormat::Json => {
            let value = if results.len() == 1 {
                serde_json::to_value(&results[0])?
            } else {
                serde_json::to_value(results)?
            };
            if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            }
        }
        OutputFormat::Markdown => results
            .iter()
            .map(AnalysisResult::format_markdown)
            .collect::<Vec<_>>()
            .join("\n\n---\n\n"),
        OutputFormat::Text => results
            .iter()
            .map(AnalysisResult::format_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    Ok(out)
}

fn print_recent(recent: &[StoredAnalysis]) {
    let mut stderr = io::stderr();
    let _ = writeln!(stderr, "recent analyses:");
    for stored in recent {
        let overall = stored.result.overall();
        let _ = writeln!(
            stderr,
            "  #{} {} {:>3} {:<10} {}",
            stored.id,
            stored.result.analyzed_at.format("%Y-%m-%d %H:%M:%S"),
            overall.value,
            overall.category.label(),
            stored.result.url
        );
    }
}

/// Runs the requested analyses. Returns false if any target failed.
async fn run(args: Args) -> Result<bool> {
    validate(&args)?;

    let format = OutputFormat::from(args.format.as_str());
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .allow_private_networks(args.allow_private_networks)
        .build();

    let start = Instant::now();
    let mut results = Vec::new();
    let mut ok = true;

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        let html = fs::read_to_string(html_path)
            .with_context(|| format!("reading {}", html_path.display()))?;
        results.push(client.analyze_html(&html, url));
    } else {
        for url in &args.urls {
            match client.analyze(url).await {
                Ok(stored) => results.push(stored.result),
                Err(e) => {
                    eprintln!("error analyzing {}: {}", url, e);
                    ok = false;
                }
            }
        }
    }

    let elapsed = start.elapsed();
    debug!(analyzed = results.len(), elapsed_ms = elapsed.as_millis() as u64, "done");

    if !results.is_empty() {
        let output = render(&results, format, args.compact)?;
        match &args.output {
            Some(path) => fs::write(path, &output)
                .with_context(|| format!("writing {}", path.display()))?,
            None => println!("{}", output),
        }
    }

    if let Some(limit) = args.recent {
        print_recent(&client.recent(limit).await?);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    Ok(ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

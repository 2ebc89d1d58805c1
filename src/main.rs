mod model;
mod parser;
mod render;
mod source;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use scraper::Html;
use tracing::warn;

use model::Api;
use parser::{ParseError, RawSpecification, Release, Selection, Specification};
use render::golang::{self, Template};
use render::Fileset;
use source::{LocationSource, Source};

#[derive(Parser)]
#[command(name = "tgen", about = "Telegram Bot API code generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Documentation page: URL or local HTML file
    #[arg(short, long, env = "TGEN_SPEC", default_value = "https://core.telegram.org/bots/api")]
    spec: String,
    /// HTTP timeout in seconds
    #[arg(long, env = "TGEN_TIMEOUT", default_value = "30")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go types (objects.go, unions.go)
    Go {
        #[command(flatten)]
        source: SourceArgs,
        /// Output directory
        #[arg(short, long, env = "TGEN_OUT", default_value = "api")]
        out: PathBuf,
        /// Go package name
        #[arg(short, long, env = "TGEN_PACKAGE", default_value = "api")]
        package: String,
        /// Templates to render: objects, unions (default: all)
        #[arg(short, long)]
        template: Vec<String>,
    },
    /// Dump the parsed specification as JSON
    Json {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Report every definition the parser cannot read
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Go {
            source,
            out,
            package,
            template,
        } => {
            let templates = templates(&template)?;
            let doc = load(&source).await?;
            let api = collect(&doc)?;
            Fileset::new(golang::artifacts(&api, &package, &templates)).emit(&out)?;
            println!(
                "Generated {} objects, {} unions into {}",
                api.objects.len(),
                api.unions.len(),
                out.display()
            );
            Ok(())
        }
        Commands::Json { source, out } => {
            let doc = load(&source).await?;
            let api = collect(&doc)?;
            let json = serde_json::to_string_pretty(&api).context("serializing specification")?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json + "\n")
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Check { source } => {
            let doc = load(&source).await?;
            let spec = RawSpecification::new(Selection::from_document(&doc));
            let errors = model::diagnose(&spec);
            for error in &errors {
                warn!("{error}");
            }
            if !errors.is_empty() {
                let count = |kind: fn(&ParseError) -> bool| {
                    errors.iter().filter(|e| kind(&e.source)).count()
                };
                bail!(
                    "{} accessors failed: {} missing attributes, {} grammar mismatches, {} unexpected structures",
                    errors.len(),
                    count(ParseError::is_missing_attribute),
                    count(ParseError::is_grammar_mismatch),
                    count(ParseError::is_unexpected_structure)
                );
            }
            let release = match spec.latest_release() {
                Some(release) => release.version().unwrap_or_default(),
                None => "unknown".to_string(),
            };
            println!(
                "OK: {} objects, {} unions (Bot API {})",
                spec.objects().count(),
                spec.unions().count(),
                release
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn load(args: &SourceArgs) -> anyhow::Result<Html> {
    let source = LocationSource::new(args.spec.as_str(), Duration::from_secs(args.timeout));
    let bytes = source.open().await?;
    Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
}

fn templates(names: &[String]) -> anyhow::Result<Vec<Template>> {
    if names.is_empty() {
        return Ok(Template::ALL.to_vec());
    }
    names.iter().map(|name| Template::from_name(name)).collect()
}

fn collect(doc: &Html) -> anyhow::Result<Api> {
    let spec = RawSpecification::new(Selection::from_document(doc));
    Api::collect(&spec).context("parsing specification")
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

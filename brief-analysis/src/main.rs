#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use brief_analysis::export::articles_markdown;
use brief_analysis::{
    generate_comparative_analysis, overall_summary, parse_articles, ArticleCache, ArticleRecord,
    ExportDocument,
};
use brief_common::config::hours_to_duration;
use brief_common::error::{Error, ResultExt};
use brief_common::logging::{generate_run_id, init_logging};
use brief_common::Config;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, info_span, warn};

/// Comparative sentiment and topic analysis over scored news articles.
#[derive(Parser, Debug)]
#[command(name = "brief-analysis")]
#[command(version)]
#[command(about = "Compare how a batch of news articles covers a company.", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.newsbrief/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a batch of scored articles
    Analyze {
        /// Article JSON array ("-" for stdin)
        #[arg(long, short, required_unless_present = "from_cache")]
        input: Option<PathBuf>,

        /// Read today's cached batch for --company instead of a file
        #[arg(long, requires = "company", conflicts_with = "input")]
        from_cache: bool,

        /// Company the articles are about
        #[arg(long, short)]
        company: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Number of frequent topics to list (defaults to config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Manage cached article batches
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Validate a batch and store it under today's key
    Store {
        #[arg(long, short)]
        company: String,

        /// Article JSON array ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,
    },

    /// Print today's batch if it is still fresh
    Show {
        #[arg(long, short)]
        company: String,

        /// Override the configured maximum age
        #[arg(long)]
        max_age_hours: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Raw comparative report
    Json,
    /// Full markdown report with article cards
    Markdown,
    /// Short terminal digest
    Text,
    /// Downloadable export document
    Export,
    /// Plain-language overall summary
    Summary,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<Error>())
            .map_or(1, Error::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_with_env(cli.config.as_deref())?;
    config
        .validate()
        .map_err(|e| Error::Config(e.to_string()))?;

    init_logging(&config.observability.log_level, &config.observability.log_format);

    let run_id = generate_run_id();
    let _span = info_span!("brief", run_id = %run_id).entered();

    match cli.command {
        Commands::Analyze {
            input,
            from_cache,
            company,
            format,
            top,
        } => {
            let articles = if from_cache {
                let Some(company) = company.as_deref() else {
                    bail!("--from-cache requires --company");
                };
                load_cached(&config, company, None)?
            } else {
                let Some(input) = input.as_deref() else {
                    bail!("either --input or --from-cache is required");
                };
                read_articles(input)?
            };

            let top = top.unwrap_or(config.analysis.top_topics);
            let company = company.as_deref().unwrap_or("Unknown company");
            let output = analyze(&articles, company, format, top)?;
            println!("{output}");
            Ok(())
        }

        Commands::Cache { action } => {
            if !config.cache.enabled {
                return Err(Error::Config("article cache is disabled".into()).into());
            }
            match action {
                CacheCommands::Store { company, input } => {
                    let articles = read_articles(&input)?;
                    let cache = ArticleCache::new(config.cache.cache_dir());
                    let path = cache.store(&company, &articles)?;
                    println!("{}", path.display());
                    Ok(())
                }
                CacheCommands::Show {
                    company,
                    max_age_hours,
                } => {
                    let articles = load_cached(&config, &company, max_age_hours)?;
                    println!("{}", serde_json::to_string_pretty(&articles)?);
                    Ok(())
                }
            }
        }
    }
}

fn analyze(
    articles: &[ArticleRecord],
    company: &str,
    format: OutputFormat,
    top: usize,
) -> Result<String> {
    if articles.is_empty() {
        warn!("Article batch is empty");
    }

    let report = generate_comparative_analysis(articles);
    info!(
        articles = articles.len(),
        overall = %report.overall_sentiment(),
        format = ?format,
        "Analysis finished"
    );

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Markdown => {
            format!("{}\n{}", report.to_markdown(top), articles_markdown(articles))
        }
        OutputFormat::Text => report.to_text(),
        OutputFormat::Export => ExportDocument::new(company, articles, &report).to_json()?,
        OutputFormat::Summary => overall_summary(company, &report),
    };
    Ok(output)
}

/// Read and validate an article batch from a file or stdin.
fn read_articles(path: &Path) -> Result<Vec<ArticleRecord>> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("reading articles from stdin")?
    } else {
        fs::read_to_string(path).context(format!("reading articles from {}", path.display()))?
    };

    let articles = parse_articles(&content)
        .map_err(Error::from)
        .context(format!("validating articles from {}", path.display()))?;
    info!(count = articles.len(), path = %path.display(), "Loaded articles");
    Ok(articles)
}

fn load_cached(
    config: &Config,
    company: &str,
    max_age_hours: Option<u64>,
) -> Result<Vec<ArticleRecord>> {
    if !config.cache.enabled {
        return Err(Error::Config("article cache is disabled".into()).into());
    }

    let max_age = max_age_hours.map_or_else(|| config.cache.max_age(), hours_to_duration);
    let cache = ArticleCache::new(config.cache.cache_dir());

    match cache.load_fresh(company, max_age)? {
        Some(entry) => {
            info!(company = %company, stored_at = %entry.timestamp, "Using cached articles");
            Ok(entry.articles)
        }
        None => Err(Error::NotFound(format!("no fresh cached articles for {company}")).into()),
    }
}

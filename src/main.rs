use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use patchmine::crawler::{CrawlConfig, Crawler, GithubClient, JsonlSink};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "patchmine",
    version = "0.1.0",
    author = "patchmine developers",
    about = "Collects merged GitHub PRs and mines their diffs into structured change records"
)]
struct Cli {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Directory holding the top-starred repository JSONL lists
    #[arg(long, value_name = "DIR", default_value = "top_2000_star_repos_this_year")]
    repos_dir: PathBuf,

    /// Directory the JSONL record streams are written to
    #[arg(short, long, value_name = "DIR", default_value = "github_pr_data")]
    output_dir: PathBuf,

    /// Comma-separated list of languages to crawl
    #[arg(
        short,
        long,
        value_name = "LANGS",
        value_delimiter = ',',
        default_value = "python"
    )]
    languages: Vec<String>,

    /// Number of repositories to process per language
    #[arg(short, long, value_name = "N", default_value_t = 100)]
    target_repos: usize,

    /// Cap on PRs processed per repository
    #[arg(long, value_name = "N")]
    max_prs: Option<usize>,

    /// Minimum star count for a repository to qualify
    #[arg(long, value_name = "N", default_value_t = 1000)]
    min_stars: u64,

    /// Repositories with more merged PRs than this are skipped
    #[arg(long, value_name = "N", default_value_t = 200)]
    skip_if_too_many_prs: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let languages: Vec<String> = cli
        .languages
        .into_iter()
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
        .collect();

    info!("starting multi-language PR crawl for {languages:?}");
    info!("repos dir: {}", cli.repos_dir.display());
    info!("output dir: {}", cli.output_dir.display());

    let client = GithubClient::new(cli.token)?;
    let sink = JsonlSink::new(cli.output_dir)?;
    let config = CrawlConfig {
        repos_dir: cli.repos_dir,
        target_repos: cli.target_repos,
        max_prs_per_repo: cli.max_prs,
        min_stars: cli.min_stars,
        skip_if_too_many_prs: cli.skip_if_too_many_prs,
    };

    let mut crawler = Crawler::new(client, sink, config);
    crawler.run(&languages).await
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One line of a `top_{lang}_stars_this_year.jsonl` repository list.
#[derive(Debug, Clone, Deserialize)]
struct RepoEntry {
    repo_name: String,
    #[serde(default)]
    star_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    latest_pushed_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub language: Option<String>,
    pub stars: u64,
    pub pushed_at: Option<String>,
}

/// The list files use GitHub's language naming, not the crawl keys.
pub fn repo_list_file(repos_dir: &Path, language: &str) -> PathBuf {
    let file_language = match language {
        "cpp" => "c++",
        "golang" => "go",
        other => other,
    };
    repos_dir.join(format!("top_{file_language}_stars_this_year.jsonl"))
}

/// Loads a window of qualifying repositories from the per-language list.
/// `start_index` counts only entries passing the star filter, so successive
/// batches never overlap.
pub fn load_batch(
    repos_dir: &Path,
    language: &str,
    min_stars: u64,
    start_index: usize,
    batch_size: usize,
) -> Result<Vec<RepoInfo>> {
    let path = repo_list_file(repos_dir, language);
    let file = File::open(&path)
        .with_context(|| format!("repository list not found: {}", path.display()))?;
    info!(
        "loading repositories from {} (start {start_index}, batch {batch_size})",
        path.display()
    );

    let mut repos = Vec::new();
    let mut current_index = 0usize;

    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry: RepoEntry = match serde_json::from_str(trimmed) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping malformed repository entry: {err}");
                continue;
            }
        };
        if entry.star_count < min_stars {
            continue;
        }
        if current_index >= start_index {
            if let Some((owner, name)) = entry.repo_name.split_once('/') {
                repos.push(RepoInfo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    full_name: entry.repo_name.clone(),
                    language: entry.language.clone(),
                    stars: entry.star_count,
                    pushed_at: entry.latest_pushed_time.clone(),
                });
                if repos.len() >= batch_size {
                    break;
                }
            }
        }
        current_index += 1;
    }

    info!("loaded {} repositories for {language}", repos.len());
    Ok(repos)
}

use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Streams consulted when resuming: any record naming a repository counts it
/// as processed.
const RESUME_STREAMS: &[&str] = &[
    "pr_data",
    "commits",
    "file_changes",
    "function_changes",
    "class_changes",
    "imports",
];

/// Append-only JSONL writer, one file per record stream under the output
/// directory.
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn append<T: Serialize>(&self, stream: &str, record: &T) -> Result<()> {
        let path = self.dir.join(format!("{stream}.jsonl"));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Scans the existing per-language streams for `repo_full_name` values so an
/// interrupted crawl can skip repositories it already covered.
pub fn processed_repos(dir: &Path, language: &str) -> HashSet<String> {
    let mut processed = HashSet::new();

    for stream in RESUME_STREAMS {
        let path = dir.join(format!("{language}_{stream}.jsonl"));
        let Ok(file) = File::open(&path) else {
            continue;
        };
        for line in BufReader::new(file).lines() {
            let Ok(line) = line else {
                warn!("stopping scan of unreadable file {}", path.display());
                break;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<serde_json::Value>(trimmed) {
                Ok(value) => {
                    if let Some(full_name) = value.get("repo_full_name").and_then(|v| v.as_str()) {
                        processed.insert(full_name.to_string());
                    }
                }
                Err(err) => warn!("skipping malformed line in {}: {err}", path.display()),
            }
        }
    }

    info!("found {} already processed repos", processed.len());
    processed
}

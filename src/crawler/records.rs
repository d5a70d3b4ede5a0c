//! Serde models for the per-language JSONL record streams. Field names are
//! the wire schema — downstream tooling reads these files directly, so
//! changes here are format changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{ChangeType, ImportChangeType, SymbolKind};
use crate::grammars::Language;

#[derive(Debug, Clone, Serialize)]
pub struct PrStats {
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: usize,
    pub commits_count: usize,
    pub reviews_count: usize,
    pub review_comments_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrRecord {
    pub repo_full_name: String,
    pub repo_language: Option<String>,
    pub repo_stars: u64,
    pub pr_number: u64,
    pub pr_title: String,
    pub pr_body: String,
    pub pr_author: String,
    pub pr_created_at: Option<String>,
    pub pr_merged_at: Option<String>,
    pub pr_stats: PrStats,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCommentRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub comment_type: &'static str,
    pub reviewer: String,
    pub comment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u64>,
    pub created_at: Option<String>,
}

/// GitHub's commit stats object; deserialized from the API and re-serialized
/// into the commit record unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub commit_hash: String,
    pub commit_message: String,
    pub commit_author: String,
    pub commit_author_email: String,
    pub committed_at: Option<String>,
    pub commit_stats: CommitStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileChangeRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub commit_hash: String,
    pub file_path: String,
    pub file_language: Option<Language>,
    pub change_type: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    pub patch_content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HunkRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub commit_hash: String,
    pub file_path: String,
    pub file_language: Language,
    pub hunk_index: usize,
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    pub section: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolChangeRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub commit_hash: String,
    pub file_path: String,
    pub file_language: Language,
    pub kind: SymbolKind,
    pub name: String,
    pub change_type: ChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_signature: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportChangeRecord {
    pub repo_full_name: String,
    pub pr_number: u64,
    pub commit_hash: String,
    pub file_path: String,
    pub file_language: Language,
    pub module_name: String,
    pub import_statement: String,
    pub change_type: ImportChangeType,
}
